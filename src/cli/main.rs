use std::{io::BufReader, path::PathBuf};

use clap::{value_parser, Arg, ArgAction, Command};

use marten_fd::{config::Config, context::Context, reports::Report, structures::atom::Polarity};

fn cli() -> Command {
    Command::new("marten_fd")
        .about("Determines whether a finite-domain equality formula is satisfiable or unsatisfiable")

        .arg(Arg::new("path")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("The problem file to solve, in extended DIMACS form (optionally xz compressed)."))

        .arg(Arg::new("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help("Time budget for the solve, in seconds.
Default: 3600"))

        .arg(Arg::new("log")
            .long("log")
            .action(ArgAction::SetTrue)
            .required(false)
            .help("Log the solve to stderr (detail via RUST_LOG)."))

        .arg(Arg::new("watched_literals")
            .long("watched-literals")
            .action(ArgAction::SetTrue)
            .required(false)
            .help("Detect unit and conflicting clauses through two watched atoms per clause.
Equivalent to the default detection through free-atom counts."))

        .arg(Arg::new("restart_threshold")
            .long("restart-threshold")
            .value_name("BACKTRACKS")
            .value_parser(value_parser!(u32))
            .required(false)
            .num_args(1)
            .help("Restart (jump back to level zero, keeping learned clauses) after this many backtracks.
Default: 0, which disables restarts"))
}

fn main() {
    let matches = cli().get_matches();

    if matches.get_flag("log") {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();
    }

    let mut config = Config::default();
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config.time_limit.value = std::time::Duration::from_secs(*seconds);
    }
    if matches.get_flag("watched_literals") {
        config.watched_literals.value = true;
    }
    if let Some(backtracks) = matches.get_one::<u32>("restart_threshold") {
        config.restart_threshold.value = *backtracks;
    }

    let path = matches.get_one::<PathBuf>("path").expect("path is required");
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Could not open problem file {}: {e}", path.display());
            std::process::exit(3);
        }
    };

    let mut ctx = Context::from_config(config);

    let parse_result = match path.extension().and_then(|extension| extension.to_str()) {
        Some("xz") => ctx.read_problem(BufReader::new(xz2::read::XzDecoder::new(&file))),
        _ => ctx.read_problem(BufReader::new(&file)),
    };
    if let Err(e) = parse_result {
        eprintln!("Could not read {}: {e:?}", path.display());
        std::process::exit(3);
    }

    let report = match ctx.solve() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Solver failure: {e:?}");
            std::process::exit(4);
        }
    };

    match report {
        Report::Satisfiable => {
            for entry in ctx.trail.entries() {
                if entry.atom.polarity == Polarity::Eq {
                    println!("{}", entry.atom);
                }
            }
        }
        Report::Unsatisfiable => println!("UNSAT"),
        Report::Timeout => println!("TIMEOUT"),
        Report::Unknown => {
            eprintln!("The solve concluded without a result");
            std::process::exit(4);
        }
    }

    println!();
    println!("{}", ctx.statistics());

    std::process::exit(match report {
        Report::Satisfiable => 0,
        Report::Unsatisfiable => 1,
        _ => 2,
    });
}
