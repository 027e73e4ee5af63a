#![allow(non_snake_case)]

use lpcontrol::io::ConfigurablePrintTarget;
use lpcontrol::problem::*;
use lpcontrol::solver::Status;

fn test_print_problem() -> Problem {
    // minimize x subject to x + y >= 1, x >= 0, 0 <= y <= 0.5
    let mut P = Problem::new();
    P.add_rows(1);
    P.add_cols(2);
    P.set_mat_row(0, &[(0, 1.), (1, 1.)]).unwrap();
    P.set_row_bnds(0, Bounds::Lower(1.)).unwrap();
    P.set_col_bnds(0, Bounds::Lower(0.)).unwrap();
    P.set_col_bnds(1, Bounds::Double(0., 0.5)).unwrap();
    P.set_obj_coef(0, 1.).unwrap();
    P
}

#[test]
fn test_print_to_stdout() {
    let mut P = test_print_problem();
    P.print_to_stdout();
    assert_eq!(P.simplex(), Status::Ok);
}

#[test]
fn test_print_to_buffer() {
    let mut P = test_print_problem();
    P.print_to_buffer();
    assert_eq!(P.simplex(), Status::Ok);
    let result = P.get_print_buffer().unwrap();
    assert!(result.contains("OPTIMAL SOLUTION FOUND"));
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let mut P = test_print_problem();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    P.print_to_file(file.into_file());
    assert_eq!(P.simplex(), Status::Ok);

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("OPTIMAL SOLUTION FOUND"));
}

#[test]
fn test_print_to_stream() {
    use std::io::{Read, Seek};

    let mut P = test_print_problem();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    let stream = Box::new(file.into_file());

    P.print_to_stream(stream);
    assert_eq!(P.interior(), Status::Ok);

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("OPTIMAL SOLUTION FOUND"));
}

#[test]
fn test_print_to_sink() {
    let mut P = test_print_problem();
    P.print_to_sink();
    assert_eq!(P.simplex(), Status::Ok);
    assert!(P.get_print_buffer().is_err());
}

#[test]
fn test_message_level_off() {
    let mut P = test_print_problem();
    P.print_to_buffer();
    P.set_int_param(lpcontrol::params::ParamKey::MsgLev, 0).unwrap();
    assert_eq!(P.simplex(), Status::Ok);
    assert!(P.get_print_buffer().unwrap().is_empty());
}

#[test]
fn test_print_to_tracing() {
    let mut P = test_print_problem();
    P.print_to_tracing();
    assert_eq!(P.simplex(), Status::Ok);
    assert!(P.get_print_buffer().is_err());
}
