//! Integration tests for the results-file reader.

use std::path::PathBuf;

use lab_cli::results::read_results_file;
use lab_model::Flag;

fn temp_file(contents: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("lab_cli_results_{stamp}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("results.csv");
    std::fs::write(&path, contents).expect("write results file");
    path
}

#[test]
fn test_reads_values_and_overrides() {
    let path = temp_file(
        "Parameter,Value,Range Override,Flag Override\n\
         hemoglobin,11.9,,\n\
         crp,4.9,<10,\n\
         esr,20,,NORMAL\n",
    );
    let results = read_results_file(&path).expect("read");
    assert_eq!(
        results.values.get("hemoglobin").map(String::as_str),
        Some("11.9")
    );
    assert_eq!(
        results.range_overrides,
        vec![("crp".to_string(), "<10".to_string())]
    );
    assert_eq!(
        results.flag_overrides,
        vec![("esr".to_string(), Flag::Normal)]
    );
    assert!(results.issues.is_empty());
}

#[test]
fn test_override_columns_are_optional() {
    let path = temp_file("Parameter,Value\nwbc,12500\n");
    let results = read_results_file(&path).expect("read");
    assert_eq!(results.values.get("wbc").map(String::as_str), Some("12500"));
    assert!(results.range_overrides.is_empty());
    assert!(results.flag_overrides.is_empty());
}

#[test]
fn test_blank_values_are_kept_for_the_form() {
    // A row with no entered value still belongs to the form; the
    // evaluator omits it from the flag map later.
    let path = temp_file("Parameter,Value\nurea,\n");
    let results = read_results_file(&path).expect("read");
    assert_eq!(results.values.get("urea").map(String::as_str), Some(""));
}

#[test]
fn test_bad_flag_token_is_an_issue_not_an_error() {
    let path = temp_file("Parameter,Value,Flag Override\nesr,20,VERYHIGH\n");
    let results = read_results_file(&path).expect("read");
    assert!(results.flag_overrides.is_empty());
    assert_eq!(results.issues.len(), 1);
    assert!(results.issues[0].contains("VERYHIGH"));
}

#[test]
fn test_repeated_parameter_is_rejected() {
    let path = temp_file("Parameter,Value\nwbc,12500\nwbc,9000\n");
    let results = read_results_file(&path).expect("read");
    assert_eq!(results.values.get("wbc").map(String::as_str), Some("12500"));
    assert_eq!(results.issues.len(), 1);
}

#[test]
fn test_missing_parameter_column_is_an_error() {
    let path = temp_file("Name,Value\nwbc,12500\n");
    assert!(read_results_file(&path).is_err());
}
