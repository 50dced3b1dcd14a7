//! Random cone program instances with known certificates.
//!
//! Instances are of the form
//!
//! ```text
//! minimize    c'x
//! subject to  Ax + s = b,  s ∈ K
//! ```
//!
//! with dual `maximize -b'y subject to A'y + c = 0, y ∈ K*`.  Every
//! instance is constructed around a certificate that proves its status,
//! and all randomness is drawn from an explicitly supplied generator.

#![allow(non_snake_case)]

use crate::algebra::*;
use crate::cones::{ConeProjector, ConeSpec, ProjectionError, ProjectionSettings};
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use derive_builder::Builder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

mod feasible;
mod infeasible;
mod info_print;
mod random;
mod unbounded;
#[cfg(feature = "serde")]
mod json;

pub use info_print::*;
pub use random::*;
#[cfg(feature = "serde")]
pub use json::*;

/// Status of a generated instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProblemKind {
    /// the instance has an optimal solution
    Feasible,
    /// the constraints admit no solution
    Infeasible,
    /// the objective is unbounded below
    Unbounded,
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            ProblemKind::Feasible => "feasible",
            ProblemKind::Infeasible => "infeasible",
            ProblemKind::Unbounded => "unbounded",
        };
        write!(f, "{s}")
    }
}

/// Vectors proving the status of a generated instance
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub enum Certificate<T> {
    /// optimal primal-dual pair with `Ax + s = b`, `A'y + c = 0`, `s'y = 0`
    Optimal {
        x: Vec<T>,
        y: Vec<T>,
        s: Vec<T>,
        objective: T,
    },
    /// dual ray `y ∈ K*` with `A'y = 0` and `b'y = -1`
    PrimalInfeasible { y: Vec<T> },
    /// primal ray with `s ∈ K`, `Ax + s = 0` and `c'x = -1`
    DualInfeasible { x: Vec<T>, s: Vec<T> },
}

impl<T> Certificate<T> {
    pub fn kind(&self) -> ProblemKind {
        match self {
            Certificate::Optimal { .. } => ProblemKind::Feasible,
            Certificate::PrimalInfeasible { .. } => ProblemKind::Infeasible,
            Certificate::DualInfeasible { .. } => ProblemKind::Unbounded,
        }
    }
}

/// Generated cone program data and its certificate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct ProblemInstance<T: FloatT = f64> {
    /// constraint matrix, with one row per cone entry
    pub A: CscMatrix<T>,
    /// constraint offset
    pub b: Vec<T>,
    /// linear cost
    pub c: Vec<T>,
    /// the cone K
    pub cone: ConeSpec,
    /// proof of feasibility, infeasibility or unboundedness
    pub certificate: Certificate<T>,
}

impl<T> ProblemInstance<T>
where
    T: FloatT,
{
    /// number of constraints
    pub fn m(&self) -> usize {
        self.A.m
    }

    /// number of variables
    pub fn n(&self) -> usize {
        self.A.n
    }

    pub fn kind(&self) -> ProblemKind {
        self.certificate.kind()
    }
}

/// Error type returned by problem generation.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Requested density is not in [0,1]
    #[error("matrix density {0} is not in [0,1]")]
    InvalidDensity(f64),
    /// A cone projection failed while constructing the certificate
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    /// The random certificate cannot be normalised
    #[error("degenerate certificate: {0}")]
    DegenerateCertificate(&'static str),
    /// Verbose output could not be written
    #[error("failed to write problem summary: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings for random problem generation

#[derive(Builder, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorSettings<T: FloatT> {
    ///print a summary of each generated problem
    #[builder(default = "false")]
    pub verbose: bool,

    ///settings for the cone projections used to build certificates
    #[builder(default = "ProjectionSettings::<T>::default()")]
    pub projection: ProjectionSettings<T>,
}

impl<T> Default for GeneratorSettings<T>
where
    T: FloatT,
{
    fn default() -> GeneratorSettings<T> {
        GeneratorSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Generator of random cone programs over a caller supplied random
/// number generator.
///
/// __Example usage__ :
///
/// ```no_run
/// use conegen::cones::ConeSpecBuilder;
/// use conegen::generator::RandomProblemFactory;
///
/// let spec = ConeSpecBuilder::default().l(5).q(vec![3]).ep(1).build().unwrap();
/// let mut factory = RandomProblemFactory::<f64>::from_seed(1, Default::default());
/// let problem = factory.generate_feasible(&spec, 4, 0.5).unwrap();
///
/// assert_eq!(problem.m(), spec.total_dimension());
/// ```
pub struct RandomProblemFactory<T: FloatT = f64, R: Rng = ChaCha8Rng> {
    rng: R,
    projector: ConeProjector<T>,
    settings: GeneratorSettings<T>,
    stream: PrintTarget,
}

impl<T> RandomProblemFactory<T, ChaCha8Rng>
where
    T: FloatT,
{
    /// Factory drawing from a `ChaCha8Rng` seeded with `seed`
    pub fn from_seed(seed: u64, settings: GeneratorSettings<T>) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed), settings)
    }
}

impl<T, R> RandomProblemFactory<T, R>
where
    T: FloatT,
    R: Rng,
{
    pub fn new(rng: R, settings: GeneratorSettings<T>) -> Self {
        let projector = ConeProjector::new(settings.projection.clone());
        Self {
            rng,
            projector,
            settings,
            stream: PrintTarget::default(),
        }
    }

    pub fn settings(&self) -> &GeneratorSettings<T> {
        &self.settings
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Instance with an optimal solution, for `n` variables and a
    /// constraint matrix of the given density
    pub fn generate_feasible(
        &mut self,
        spec: &ConeSpec,
        n: usize,
        density: f64,
    ) -> Result<ProblemInstance<T>, GeneratorError> {
        let problem = feasible::gen_feasible(&mut self.rng, &self.projector, spec, n, density)?;
        self.print_problem(&problem)?;
        Ok(problem)
    }

    /// Instance whose constraints are infeasible
    pub fn generate_infeasible(
        &mut self,
        spec: &ConeSpec,
        n: usize,
        density: f64,
    ) -> Result<ProblemInstance<T>, GeneratorError> {
        let problem =
            infeasible::gen_infeasible(&mut self.rng, &self.projector, spec, n, density)?;
        self.print_problem(&problem)?;
        Ok(problem)
    }

    /// Instance whose objective is unbounded below
    pub fn generate_unbounded(
        &mut self,
        spec: &ConeSpec,
        n: usize,
        density: f64,
    ) -> Result<ProblemInstance<T>, GeneratorError> {
        let problem = unbounded::gen_unbounded(&mut self.rng, &self.projector, spec, n, density)?;
        self.print_problem(&problem)?;
        Ok(problem)
    }

    fn print_problem(&mut self, problem: &ProblemInstance<T>) -> std::io::Result<()> {
        if !self.settings.verbose {
            return Ok(());
        }
        print_problem_summary(&mut self.stream, problem)
    }
}

impl<T, R> ConfigurablePrintTarget for RandomProblemFactory<T, R>
where
    T: FloatT,
    R: Rng,
{
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn std::io::Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

/// Feasible instance drawn from a `ChaCha8Rng` seeded with `seed`
pub fn generate_feasible(
    spec: &ConeSpec,
    n: usize,
    density: f64,
    seed: u64,
) -> Result<ProblemInstance<f64>, GeneratorError> {
    RandomProblemFactory::from_seed(seed, GeneratorSettings::default())
        .generate_feasible(spec, n, density)
}

/// Infeasible instance drawn from a `ChaCha8Rng` seeded with `seed`
pub fn generate_infeasible(
    spec: &ConeSpec,
    n: usize,
    density: f64,
    seed: u64,
) -> Result<ProblemInstance<f64>, GeneratorError> {
    RandomProblemFactory::from_seed(seed, GeneratorSettings::default())
        .generate_infeasible(spec, n, density)
}

/// Unbounded instance drawn from a `ChaCha8Rng` seeded with `seed`
pub fn generate_unbounded(
    spec: &ConeSpec,
    n: usize,
    density: f64,
    seed: u64,
) -> Result<ProblemInstance<f64>, GeneratorError> {
    RandomProblemFactory::from_seed(seed, GeneratorSettings::default())
        .generate_unbounded(spec, n, density)
}
