#![allow(non_snake_case)]

use conegen::{cones::*, generator::*, io::ConfigurablePrintTarget};

fn test_print_factory() -> RandomProblemFactory<f64> {
    let settings = GeneratorSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();
    RandomProblemFactory::from_seed(0, settings)
}

fn test_print_spec() -> ConeSpec {
    ConeSpecBuilder::default()
        .z(2)
        .l(3)
        .s(vec![2])
        .p(vec![0.5])
        .build()
        .unwrap()
}

#[test]
fn test_print_to_stdout() {
    let mut factory = test_print_factory();
    factory.print_to_stdout();
    factory.generate_feasible(&test_print_spec(), 3, 0.5).unwrap();
}

#[test]
fn test_print_to_buffer() {
    let mut factory = test_print_factory();
    factory.print_to_buffer();
    factory.generate_infeasible(&test_print_spec(), 3, 0.5).unwrap();
    let result = factory.get_print_buffer().unwrap();
    assert!(result.contains("type          = infeasible"));
    assert!(result.contains("PSDTriangle = 1,  numel = 3"));
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let mut factory = test_print_factory();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    factory.print_to_file(file.into_file());
    factory.generate_unbounded(&test_print_spec(), 3, 0.5).unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("type          = unbounded"));
}

#[test]
fn test_quiet_factory() {
    let mut factory = RandomProblemFactory::<f64>::from_seed(0, GeneratorSettings::default());
    factory.print_to_buffer();
    factory.generate_feasible(&test_print_spec(), 3, 0.5).unwrap();
    assert!(factory.get_print_buffer().unwrap().is_empty());
}
