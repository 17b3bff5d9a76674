//! Parses command line arguments, loads settings and a replay
//! script, and replays it against a simulated IR gesture sensor,
//! stopping gracefully on ctrl+c.
//!
//! Handles exit codes based on whether loading or replaying produced
//! an error, and ensures fatal errors are logged.
use clap::{self, crate_authors, crate_name, crate_version, Arg, ArgMatches};
use failure::Error;
use ir_gestures::{
    app::script::{self, Script},
    log::{init_logging, log_fatal},
    settings, App,
};
use log::debug;
use std::process::exit;

fn main() {
    if bootstrap().is_err() {
        exit(1);
    }
}

fn bootstrap() -> Result<(), Error> {
    let matches = clap::App::new(crate_name!())
        .version(crate_version!())
        .about("Replays call, screen and gesture events against the IR gesture arbitration.")
        .author(crate_authors!())
        .arg(
            Arg::with_name("script")
                .help("Replay script to run")
                .long_help("Path to a YAML replay script with settings and a list of steps.")
                .required_unless("demo")
                .conflicts_with("demo"),
        )
        .arg(
            Arg::with_name("demo")
                .short("d")
                .long("demo")
                .help("Replays a bundled demo script instead of a file")
                .long_help("Replays a bundled demo script instead of a file."),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .value_name("FILE")
                .help("Settings to start with")
                .long_help(
                    "YAML file with the keys ring_silencer and wake_gesture, \
                     both booleans. Features not mentioned start disabled. \
                     Settings in the script take precedence.",
                ),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Silence warnings and errors")
                .long_help("Turn off logging completely, including warnings and errors."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Verbose logging")
                .long_help(
                    "Print non-essential output with diagnostic information to stderr. \
                     Multiple occurrences increase logging verbosity. -vvv is the highest verbosity, \
                     printing every delivered gesture."
                )
                .conflicts_with("quiet"),
        )
        .get_matches();

    let verbosity_level = if matches.is_present("quiet") {
        None
    } else {
        Some(matches.occurrences_of("verbose"))
    };
    init_logging(verbosity_level);

    let result = build_app(&matches)
        .and_then(|app| load_script(&matches).map(|script| (app, script)))
        .and_then(|(mut app, script)| {
            debug!("initialization complete, starting replay");
            app.run(&script)
        });

    match result {
        Ok(summary) => {
            println!("{}", summary);
            debug!("exiting after normal operation.");
            Ok(())
        }
        Err(err) => {
            log_fatal(&err);
            Err(err)
        }
    }
}

fn build_app(matches: &ArgMatches) -> Result<App, Error> {
    let mut app = App::builder();

    if let Some(config) = matches.value_of("config") {
        app.settings(settings::from_path(config)?);
    }

    app.terminate_on_ctrlc_and_sigterm();

    app.build()
}

fn load_script(matches: &ArgMatches) -> Result<Script, Error> {
    if matches.is_present("demo") {
        script::from_str(include_str!("../resources/demo.yaml"))
    } else {
        // unwrap_or is safe: required unless demo
        script::from_path(matches.value_of("script").unwrap_or(""))
    }
}
