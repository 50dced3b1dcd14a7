use super::*;
use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

/// JSON export and import of generated problems
pub trait ProblemJSONReadWrite: Sized {
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error>;
    fn read_from_file(file: &mut File) -> Result<Self, io::Error>;
}

impl<T> ProblemJSONReadWrite for ProblemInstance<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let problem: ProblemInstance<T> = serde_json::from_str(&buffer)?;
        _check_problem_dims(&problem)?;
        Ok(problem)
    }
}

fn _check_problem_dims<T: FloatT>(problem: &ProblemInstance<T>) -> Result<(), io::Error> {
    let invalid = |msg: &str| io::Error::new(io::ErrorKind::InvalidData, msg.to_string());

    problem
        .A
        .check_format()
        .map_err(|e| invalid(&e.to_string()))?;

    let (m, n) = (problem.m(), problem.n());
    if m != problem.cone.total_dimension() {
        return Err(invalid("constraint rows do not match the cone dimension"));
    }
    if problem.b.len() != m || problem.c.len() != n {
        return Err(invalid("problem vectors do not match the constraint matrix"));
    }

    let consistent = match &problem.certificate {
        Certificate::Optimal { x, y, s, .. } => x.len() == n && y.len() == m && s.len() == m,
        Certificate::PrimalInfeasible { y } => y.len() == m,
        Certificate::DualInfeasible { x, s } => x.len() == n && s.len() == m,
    };
    if !consistent {
        return Err(invalid("certificate does not match the problem dimensions"));
    }
    Ok(())
}

#[test]
fn test_json_io() {
    use crate::cones::ConeSpecBuilder;
    use std::io::{Seek, SeekFrom};

    let spec = ConeSpecBuilder::default()
        .z(1)
        .l(2)
        .s(vec![2])
        .p(vec![-0.4])
        .build()
        .unwrap();
    let problem = generate_unbounded(&spec, 3, 0.5, 17).unwrap();

    let mut file = tempfile::tempfile().unwrap();
    problem.write_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2 = ProblemInstance::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(problem, problem2);
}

#[test]
fn test_json_rejects_bad_dimensions() {
    use crate::cones::ConeSpecBuilder;
    use std::io::{Seek, SeekFrom};

    let spec = ConeSpecBuilder::default().l(3).build().unwrap();
    let mut problem = generate_feasible(&spec, 2, 1.0, 4).unwrap();
    problem.b.push(0.0);

    let mut file = tempfile::tempfile().unwrap();
    problem.write_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let err = ProblemInstance::<f64>::read_from_file(&mut file).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
