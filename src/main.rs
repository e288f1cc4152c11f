//! energy-calc entry point: CLI wiring, logging setup and the HTTP server.

use std::path::{Path, PathBuf};
use std::process;

use tracing::info;

use energy_calc::calc::{LoadDefaults, LoadInputs};
use energy_calc::config::AppConfig;
use energy_calc::io::export::export_csv;
use energy_calc::tables::FileTableSource;
use energy_calc::telemetry::init_tracing;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    bind: Option<String>,
    data_dir: Option<String>,
    loads_csv: Option<String>,
}

fn print_help() {
    eprintln!("energy-calc: power engineering course calculators");
    eprintln!();
    eprintln!("Usage: energy-calc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>      Load service configuration from TOML");
    eprintln!("  --bind <addr>        Listener address (overrides server.bind)");
    eprintln!("  --data-dir <path>    Reference table directory (overrides data.dir)");
    eprintln!("  --loads-csv <path>   Compute the stored load example, print the summary");
    eprintln!("                       and write the cabinet breakdown as CSV, then exit");
    eprintln!("  --help               Show this help message");
    eprintln!();
    eprintln!("Without --loads-csv the HTTP API is served.");
}

/// Value following a flag, or exit with an error naming the flag.
fn flag_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        bind: None,
        data_dir: None,
        loads_csv: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                cli.config_path = Some(flag_value(&args, i, "--config", "a path argument"));
            }
            "--bind" => {
                i += 1;
                cli.bind = Some(flag_value(&args, i, "--bind", "an address argument"));
            }
            "--data-dir" => {
                i += 1;
                cli.data_dir = Some(flag_value(&args, i, "--data-dir", "a path argument"));
            }
            "--loads-csv" => {
                i += 1;
                cli.loads_csv = Some(flag_value(&args, i, "--loads-csv", "a path argument"));
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Computes the stored control example, prints it and writes the CSV.
fn export_loads(tables: &FileTableSource, path: &str) {
    let report = LoadDefaults::load(tables).and_then(|defaults| {
        let report = LoadInputs::from_defaults(&defaults).compute(tables)?;
        Ok((defaults, report))
    });
    let (defaults, report) = match report {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!("{report}");

    if let Err(e) = export_csv(&defaults.normal.naming, &report.cabinet_lines, Path::new(path)) {
        eprintln!("error: failed to write CSV: {e}");
        process::exit(1);
    }
    eprintln!("Cabinet breakdown written to {path}");
}

fn main() {
    let cli = parse_args();

    let mut config = if let Some(ref path) = cli.config_path {
        match AppConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    };

    // CLI overrides
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(dir) = cli.data_dir {
        config.data.dir = PathBuf::from(dir);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("warning: logging not initialised: {e}");
    }

    let tables = FileTableSource::new(&config.data.dir);
    info!(dir = %config.data.dir.display(), "reference tables");

    if let Some(ref path) = cli.loads_csv {
        export_loads(&tables, path);
        return;
    }

    #[cfg(feature = "api")]
    {
        use std::sync::Arc;

        let addr = match config.bind_addr() {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        };
        let state = Arc::new(energy_calc::api::AppState::new(tables));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(energy_calc::api::serve(state, addr)) {
            eprintln!("error: server failed: {e}");
            process::exit(1);
        }
    }

    #[cfg(not(feature = "api"))]
    {
        eprintln!("error: built without the `api` feature; use --loads-csv");
        process::exit(1);
    }
}
