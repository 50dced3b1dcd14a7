//!  __conegen__ generates random cone programs with known solutions, for
//! testing conic optimization solvers.  Every generated problem has the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & c^T x\\\\\[2ex\]
//!  \text{subject to} & Ax + s = b \\\\\[1ex\]
//!         & s \in \mathcal{K}
//!  \end{array}
//! $$
//!
//! with decision variables
//! $x \in \mathbb{R}^n$,
//! $s \in \mathbb{R}^m$
//! and data
//! $c \in \mathbb{R}^n$,
//! $A \in \mathbb{R}^{m \times n}$, and
//! $b \in \mathbb{R}^m$.
//! The convex set $\mathcal{K}$ is a composition of zero, nonnegative,
//! second order, positive semidefinite, exponential and power cones, or
//! the duals of the latter two.
//!
//! ## Features
//!
//! * __Certified problems__: Feasible problems are generated together with
//!   an optimal primal-dual pair and the optimal objective.  Infeasible and
//!   unbounded problems carry a dual or primal ray certifying their status.
//!
//! * __Cone projections__: Euclidean projection onto any supported composite
//!   cone or its dual, used both for problem generation and for checking
//!   solver output.
//!
//! * __Conformance checks__: Solvers implementing [`SolverAdapter`](conformance::SolverAdapter)
//!   can be tested against the optimality and infeasibility conditions of
//!   each generated problem.
//!
//! * __Deterministic__: All randomness comes from a caller supplied
//!   generator, and seeded convenience functions give identical problems
//!   on every platform.
//!
//! __Example usage__ :
//!
//! ```no_run
//! use conegen::cones::{ConeParam, ConeSpec};
//! use conegen::conformance::{run_conformance, CertificateOracle};
//! use conegen::generator::generate_feasible;
//!
//! let spec = ConeSpec::from_mapping([
//!     ("l", ConeParam::Count(10)),
//!     ("q", ConeParam::Sizes(vec![5, 3])),
//! ])
//! .unwrap();
//! let problem = generate_feasible(&spec, 8, 0.25, 1234).unwrap();
//!
//! let report = run_conformance(
//!     &mut CertificateOracle,
//!     &problem,
//!     &Default::default(),
//!     Default::default(),
//! )
//! .unwrap();
//! assert!(report.passed());
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

pub mod algebra;
pub mod cones;
pub mod conformance;
pub mod generator;
pub mod io;
