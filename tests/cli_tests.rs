//! CLI engine: file sums through each combinator, settings file parsing.

use flowkit::engine::{FileSum, Report, run_files, sum_numbers};
use flowkit::utils::{apply_file_to_opts, parse_flowkit_toml};
use flowkit::{FlowError, Opts};
use std::fs;
use std::path::{Path, PathBuf};

/// Fresh directory under the system temp dir, unique per test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flowkit-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_files(dir: &Path, contents: &[&str]) -> Vec<PathBuf> {
    contents
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let path = dir.join(format!("{i}.txt"));
            fs::write(&path, text).unwrap();
            path
        })
        .collect()
}

// --- sum_numbers ---

#[test]
fn test_sum_numbers_whitespace_separated() {
    assert_eq!(sum_numbers("1 2 3\n4\t5".to_string()), 15);
}

#[test]
fn test_sum_numbers_skips_non_integers() {
    assert_eq!(sum_numbers("10 abc -4 2.5".to_string()), 6);
}

#[test]
fn test_sum_numbers_saturates() {
    assert_eq!(sum_numbers(format!("{} 1", i64::MAX)), i64::MAX);
}

// --- run_files ---

#[test]
fn test_run_files_sums_in_input_order() {
    let dir = scratch_dir("sums");
    let files = write_files(&dir, &["1 2 3", "100", "-5 5 7", "40 2"]);
    let opts = Opts {
        limit: Some(2),
        ..Default::default()
    };
    let report = run_files(&files, &opts).unwrap();
    let expected: Vec<FileSum> = files
        .iter()
        .cloned()
        .zip([6, 100, 7, 42])
        .map(|(path, sum)| FileSum { path, sum })
        .collect();
    assert_eq!(report, Report::Sums(expected));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_files_above_keeps_matching_files() {
    let dir = scratch_dir("above");
    let files = write_files(&dir, &["1 2 3", "100", "-5 5 7", "40 2"]);
    let opts = Opts {
        limit: Some(3),
        above: Some(10),
        ..Default::default()
    };
    let report = run_files(&files, &opts).unwrap();
    assert_eq!(report, Report::Kept(vec![files[1].clone(), files[3].clone()]));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_files_serial_total() {
    let dir = scratch_dir("serial");
    let files = write_files(&dir, &["1 2 3", "100", "-5 5 7"]);
    let opts = Opts {
        serial: true,
        ..Default::default()
    };
    assert_eq!(run_files(&files, &opts).unwrap(), Report::Total(113));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_files_empty_file_is_missing_input() {
    let dir = scratch_dir("empty");
    let files = write_files(&dir, &["1", ""]);
    let err = run_files(&files, &Opts::default()).unwrap_err();
    assert_eq!(err.downcast_ref::<FlowError>(), Some(&FlowError::MissingInput));
    assert!(format!("{err:#}").contains("1.txt"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_files_missing_file_names_path() {
    let dir = scratch_dir("missing");
    let files = vec![dir.join("nope.txt")];
    let err = run_files(&files, &Opts::default()).unwrap_err();
    assert!(err.downcast_ref::<std::io::Error>().is_some());
    assert!(format!("{err:#}").contains("nope.txt"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_files_zero_limit_is_rejected() {
    let dir = scratch_dir("zero");
    let files = write_files(&dir, &["1"]);
    let opts = Opts {
        limit: Some(0),
        ..Default::default()
    };
    let err = run_files(&files, &opts).unwrap_err();
    assert_eq!(
        err.downcast_ref::<FlowError>(),
        Some(&FlowError::InvalidLimit { limit: 0 })
    );
    fs::remove_dir_all(&dir).unwrap();
}

// --- settings file ---

#[test]
fn test_settings_file_applies_present_fields() {
    let file = parse_flowkit_toml("[settings]\nlimit = 4\njson = true\n").unwrap();
    let mut opts = Opts {
        above: Some(3),
        verbose: true,
        ..Default::default()
    };
    apply_file_to_opts(&file, &mut opts);
    assert_eq!(opts.limit, Some(4));
    assert!(opts.json);
    assert_eq!(opts.above, Some(3));
    assert!(opts.verbose);
    assert!(!opts.serial);
}

#[test]
fn test_settings_file_empty_is_default() {
    let file = parse_flowkit_toml("").unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts);
    assert_eq!(opts.limit, None);
    assert!(!opts.json);
}

#[test]
fn test_settings_file_rejects_unknown_keys() {
    assert!(parse_flowkit_toml("[settings]\nlimt = 4\n").is_err());
}

// --- default limit ---

#[test]
fn test_default_limit_is_clamped() {
    use flowkit::utils::ConcurrencyLimits;
    let few = ConcurrencyLimits {
        all_threads: 1,
        ..Default::default()
    };
    assert_eq!(few.default_limit(), ConcurrencyLimits::FLOOR);
    let many = ConcurrencyLimits {
        all_threads: 1000,
        ..Default::default()
    };
    assert_eq!(many.default_limit(), ConcurrencyLimits::MAX);
    assert!(ConcurrencyLimits::current().default_limit() >= ConcurrencyLimits::FLOOR);
}

// --- logging ---

#[test]
fn test_setup_logging_twice_keeps_first_logger() {
    flowkit::utils::setup_logging(false);
    flowkit::utils::setup_logging(true);
    log::info!("still logging");
}
