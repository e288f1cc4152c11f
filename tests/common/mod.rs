//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use energy_calc::calc::{LoadDefaults, LoadInputs};
use energy_calc::tables::FileTableSource;

/// Directory of the reference tables shipped with the crate.
pub fn instance_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("instance")
}

/// File-backed source over the shipped tables.
pub fn shipped_tables() -> FileTableSource {
    FileTableSource::new(instance_dir())
}

/// Stored control example of the load calculator.
pub fn control_loads() -> (LoadDefaults, LoadInputs) {
    let defaults = LoadDefaults::load(&shipped_tables()).expect("load defaults should parse");
    let inputs = LoadInputs::from_defaults(&defaults);
    (defaults, inputs)
}

/// Form body of the load calculator built from the stored control example.
pub fn control_loads_form() -> String {
    let (defaults, _) = control_loads();
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (group, suffix) in [(&defaults.normal, ""), (&defaults.big, "_big")] {
        let columns = [
            ("nu", &group.efficiency),
            ("cos", &group.power_factor),
            ("Uh", &group.voltage),
            ("n", &group.quantity),
            ("Ph", &group.rated_power),
            ("KB", &group.use_factor),
            ("tg", &group.reactive_factor),
        ];
        for (name, values) in columns {
            for value in values {
                pairs.push((format!("{name}{suffix}[]"), value.to_string()));
            }
        }
    }
    let all = defaults.all;
    for (name, value) in [
        ("n", all.n),
        ("nPh", all.rated),
        ("nPhKB", all.used),
        ("nPhKBtg", all.reactive),
        ("nPh_square", all.square),
    ] {
        pairs.push((name.to_string(), value.to_string()));
    }

    pairs
        .iter()
        .map(|(k, v)| format!("{}={v}", k.replace('[', "%5B").replace(']', "%5D")))
        .collect::<Vec<_>>()
        .join("&")
}

/// Asserts `actual` is within `tol` of `expected`.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}
