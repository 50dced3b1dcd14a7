use super::*;
use crate::cones::{CompositeCone, SupportedConeAsTag, SupportedConeT, SupportedConeTag};
use std::io::Write;

/// Writes the problem dimensions, certificate type and cone
/// composition of `problem` to `out`.
pub fn print_problem_summary<T: FloatT>(
    out: &mut PrintTarget,
    problem: &ProblemInstance<T>,
) -> std::io::Result<()> {
    let blocks: Vec<SupportedConeT<T>> = problem.cone.blocks();
    let cones = CompositeCone::<T>::new(&blocks);

    writeln!(out, "\nproblem:")?;
    writeln!(out, "  type          = {}", problem.kind())?;
    writeln!(out, "  variables     = {}", problem.n())?;
    writeln!(out, "  constraints   = {}", problem.m())?;
    writeln!(out, "  nnz(A)        = {}", problem.A.nnz())?;
    writeln!(out, "  cones (total) = {}", cones.len())?;

    for conetag in SupportedConeTag::ALL {
        _print_conedims_by_type(out, &blocks, &cones, conetag)?;
    }

    if let Certificate::Optimal { objective, .. } = &problem.certificate {
        writeln!(out, "  objective     = {:+.6e}", objective)?;
    }
    writeln!(out,)?;

    out.flush()
}

fn _print_conedims_by_type<T: FloatT>(
    out: &mut PrintTarget,
    blocks: &[SupportedConeT<T>],
    cones: &CompositeCone<T>,
    conetag: SupportedConeTag,
) -> std::io::Result<()> {
    let maxlistlen = 5;

    let count = cones.get_type_count(conetag);

    //skip if there are none of this type
    if count == 0 {
        return Ok(());
    }

    // drops trailing "Cone" part of name
    let name = conetag.as_str();
    let name = &name[0..name.len() - 4];
    let name = format!("{name:>15}");

    let nvars: Vec<usize> = blocks
        .iter()
        .filter(|cone| cone.as_tag() == conetag)
        .map(|cone| cone.nvars())
        .collect();

    write!(out, "    : {name} = {count}, ")?;

    if count == 1 {
        write!(out, " numel = {}", nvars[0])?;
    } else if count <= maxlistlen {
        write!(out, " numel = (")?;
        for nvar in nvars.iter().take(nvars.len() - 1) {
            write!(out, "{nvar},")?;
        }
        write!(out, "{})", nvars[nvars.len() - 1])?;
    } else {
        // first (maxlistlen-1) and the final one
        write!(out, " numel = (")?;
        for nvar in nvars.iter().take(maxlistlen - 1) {
            write!(out, "{nvar},")?;
        }
        write!(out, "...,{})", nvars[nvars.len() - 1])?;
    }

    writeln!(out,)
}

#[test]
fn test_print_problem_summary() {
    use crate::cones::ConeSpecBuilder;
    use crate::io::ConfigurablePrintTarget;

    let spec = ConeSpecBuilder::default()
        .l(4)
        .q(vec![3, 3, 2, 2, 2, 5])
        .ep(1)
        .build()
        .unwrap();
    let settings = GeneratorSettingsBuilder::<f64>::default()
        .verbose(true)
        .build()
        .unwrap();
    let mut factory = RandomProblemFactory::from_seed(0, settings);
    factory.print_to_buffer();
    factory.generate_feasible(&spec, 3, 0.5).unwrap();

    let text = factory.get_print_buffer().unwrap();
    assert!(text.contains("type          = feasible"));
    assert!(text.contains("constraints   = 24"));
    assert!(text.contains("    Nonnegative = 1,  numel = 4"));
    assert!(text.contains("   SecondOrder = 6,  numel = (3,3,2,2,...,5)"));
    assert!(text.contains("    Exponential = 1,  numel = 3"));
    assert!(!text.contains("PSDTriangle"));
}
