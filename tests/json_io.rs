#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use conegen::{cones::*, generator::*};
    use std::io::{Seek, SeekFrom};

    let spec = ConeSpec::from_json(
        r#"{"z":10,"l":15,"q":[5,10,0,1],"s":[3,4,0,0,1,10],"ep":10,"ed":10,"p":[-0.25,0.5,0.75,-0.33]}"#,
    )
    .unwrap();
    assert_eq!(spec.total_dimension(), 185);

    let problem = generate_feasible(&spec, 40, 0.2, 2024).unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    problem.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2 = ProblemInstance::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(problem, problem2);
    assert_eq!(problem2.cone, spec);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_rejects_bad_cone() {
    use conegen::generator::*;
    use std::io::{Seek, SeekFrom, Write};

    let spec = conegen::cones::ConeSpecBuilder::default()
        .l(2)
        .build()
        .unwrap();
    let problem = generate_infeasible(&spec, 2, 1.0, 1).unwrap();

    // replace the cone by one with an out of range exponent
    let json = serde_json::to_string(&problem).unwrap();
    assert!(json.contains(r#""ed":0,"p":[]"#));
    let json = json.replace(r#""ed":0,"p":[]"#, r#""ed":0,"p":[1.5]"#);

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    assert!(ProblemInstance::<f64>::read_from_file(&mut file).is_err());
}
