// Seeded random draws for problem data.  All draws are taken in f64 and
// converted, so the same seed gives the same instance for every `T`.

#![allow(non_snake_case)]

use super::GeneratorError;
use crate::algebra::*;
use rand::seq::index;
use rand::Rng;
use rand_distr::StandardNormal;

/// Vector of `n` independent standard normal draws
pub fn randn<T, R>(rng: &mut R, n: usize) -> Vec<T>
where
    T: FloatT,
    R: Rng + ?Sized,
{
    (0..n)
        .map(|_| {
            let v: f64 = rng.sample(StandardNormal);
            v.as_T()
        })
        .collect()
}

// redraws allowed for a ray or normalising product that comes out zero
pub(crate) const MAX_DRAWS: usize = 100;

pub(crate) fn check_density(density: f64) -> Result<(), GeneratorError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(GeneratorError::InvalidDensity(density));
    }
    Ok(())
}

/// Random `m × n` sparse matrix with `round(density·m·n)` structural
/// nonzeros at distinct uniformly chosen positions, and standard normal
/// values.
pub fn sprandn<T, R>(rng: &mut R, m: usize, n: usize, density: f64) -> Result<CscMatrix<T>, GeneratorError>
where
    T: FloatT,
    R: Rng + ?Sized,
{
    check_density(density)?;

    let len = m * n;
    let nnz = usize::min((density * len as f64).round() as usize, len);
    if nnz == 0 {
        return Ok(CscMatrix::spalloc(m, n, 0));
    }

    // linear indices into the column major matrix
    let mut positions = index::sample(rng, len, nnz).into_vec();
    positions.sort_unstable();
    let nzval = randn(rng, nnz);

    let mut colptr = vec![0; n + 1];
    let mut rowval = Vec::with_capacity(nnz);
    for &k in positions.iter() {
        colptr[k / m + 1] += 1;
        rowval.push(k % m);
    }
    for col in 0..n {
        colptr[col + 1] += colptr[col];
    }

    Ok(CscMatrix::new(m, n, colptr, rowval, nzval))
}

#[test]
fn test_sprandn_structure() {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let A: CscMatrix<f64> = sprandn(&mut rng, 20, 15, 0.1).unwrap();
    assert!(A.check_format().is_ok());
    assert_eq!(A.nnz(), 30);
    assert!(A.nzval.is_finite());

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let B: CscMatrix<f64> = sprandn(&mut rng, 20, 15, 0.1).unwrap();
    assert_eq!(A, B);

    let A: CscMatrix<f64> = sprandn(&mut rng, 4, 3, 1.0).unwrap();
    assert_eq!(A.nnz(), 12);

    let A: CscMatrix<f64> = sprandn(&mut rng, 0, 3, 0.5).unwrap();
    assert_eq!(A.nnz(), 0);

    assert!(matches!(
        sprandn::<f64, _>(&mut rng, 4, 3, 1.5),
        Err(GeneratorError::InvalidDensity(_))
    ));
    assert!(matches!(
        sprandn::<f64, _>(&mut rng, 4, 3, f64::NAN),
        Err(GeneratorError::InvalidDensity(_))
    ));
}
