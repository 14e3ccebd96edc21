/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::io::{self, BufWriter, Write};
use std::process;

use chrono::Utc;
use clap::{ArgMatches, ErrorKind};
use log::info;

use check_if_errors::cli;
use check_if_errors::error::Result;
use check_if_errors::{run_check, Report, Severity, StateStore};
use snmp_protocol::Snmp2cSession;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = match cli::app().get_matches_safe() {
        Ok(matches) => matches,
        Err(e) => {
            match e.kind {
                ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                    println!("{}", e.message)
                }
                _ => println!("{}: {}", Severity::Unknown, e.message),
            }
            process::exit(Severity::Unknown.exit_code());
        }
    };

    // enable logging
    if let Err(e) = simplelog::TermLogger::init(
        cli::log_level(matches.occurrences_of("verbose")),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        println!("{}: failed to initialize logging: {}", Severity::Unknown, e);
        process::exit(Severity::Unknown.exit_code());
    }

    match check(&matches).await {
        Ok(report) => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            if let Err(e) = report
                .write_output(&mut out)
                .and_then(|_| out.flush())
            {
                eprintln!("Error: failed to write output: {}", e);
                process::exit(Severity::Unknown.exit_code());
            }
            process::exit(report.severity().exit_code());
        }
        Err(err) => {
            println!("{}: {}", Severity::Unknown, err);
            process::exit(Severity::Unknown.exit_code());
        }
    }
}

async fn check(matches: &ArgMatches<'_>) -> Result<Report> {
    let options = cli::options(matches).await?;
    info!("With options: {:?}", &options);

    let session = Snmp2cSession::open(&options.host_name, &options.snmp).await?;
    let store = StateStore::new(&options.state_dir, &options.host_name);

    run_check(&session, &options, &store, Utc::now().timestamp()).await
}
