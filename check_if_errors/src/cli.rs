/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::path::PathBuf;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use regex::Regex;
use snmp_protocol::{HostConfig, SnmpVersion};

use crate::context::{Options, DEFAULT_STATE_DIR};
use crate::counters::Thresholds;
use crate::error::{Error, Result};

const AFTER_HELP: &str = "\
Each run compares the summed EtherLike error counters of every matched \
interface against the totals stored by the previous run and reports the \
difference in errors per minute. State is kept in \
<state-dir>/<host>/<ifDescr>.state, with all characters except letters, \
digits, '.' and '-' removed from host and interface names. Interfaces \
whose names only differ in removed characters share one state file.

The first run for an interface, and runs where the clock went backwards, \
report 'unknown errors/min'.

Exit codes: 0 = OK, 1 = WARNING, 2 = CRITICAL, 3 = UNKNOWN. Any interface \
that could not be queried makes the whole result UNKNOWN; otherwise any \
interface above the warning threshold makes it WARNING, and interfaces \
that are down or above the critical threshold make it CRITICAL.";

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("check_if_errors")
		.version(std::env!("CARGO_PKG_VERSION"))
		.author("Maarten Deprez <mdp@si-int.eu>")
		.about("Checks operational status and error rate of network interfaces over SNMP.")
		.after_help(AFTER_HELP)
		.arg(Arg::with_name("host").long("host").short("H").takes_value(true).required(true)
			.help("Host name or IP address of the device to poll."))
		.arg(Arg::with_name("community").long("community").short("C").takes_value(true)
			.help("SNMP community (default: public)."))
		.arg(Arg::with_name("snmp-version").long("snmp-version").short("P").takes_value(true)
			.help("SNMP protocol version. Only 2c is supported (default: 2c)."))
		.arg(Arg::with_name("port").long("port").short("p").takes_value(true)
			.help("SNMP port (default: 161)."))
		.arg(Arg::with_name("timeout").long("timeout").short("t").takes_value(true)
			.help("Timeout per SNMP request in seconds (default: 5)."))
		.arg(Arg::with_name("snmp-config").long("snmp-config").takes_value(true)
			.help("JSON file with SNMP session settings. Command line options \
				take precedence over values from this file."))
		.arg(Arg::with_name("state-dir").long("state-dir").short("s").takes_value(true)
			.default_value(DEFAULT_STATE_DIR)
			.help("Directory in which error totals are kept between runs."))
		.arg(Arg::with_name("descr").long("descr").short("d").takes_value(true)
			.help("Regular expression selecting interfaces by ifDescr."))
		.arg(Arg::with_name("alias").long("alias").short("a").takes_value(true)
			.help("Regular expression selecting interfaces by ifAlias."))
		.arg(Arg::with_name("warning").long("warning").short("w").takes_value(true)
			.default_value("5")
			.help("Warning threshold in errors per minute."))
		.arg(Arg::with_name("critical").long("critical").short("c").takes_value(true)
			.default_value("10")
			.help("Critical threshold in errors per minute."))
		.arg(Arg::with_name("verbose").long("verbose").short("v").multiple(true)
			.help("Increase verbosity on stderr. This option can be specified \
				multiple times."))
}

pub fn log_level(verbose: u64) -> simplelog::LevelFilter {
    match verbose {
        0 => simplelog::LevelFilter::Off,
        1 => simplelog::LevelFilter::Error,
        2 => simplelog::LevelFilter::Warn,
        3 => simplelog::LevelFilter::Info,
        4 => simplelog::LevelFilter::Debug,
        5.. => simplelog::LevelFilter::Trace,
    }
}

pub async fn options(matches: &ArgMatches<'_>) -> Result<Options> {
    let mut snmp = match matches.value_of("snmp-config") {
        Some(path) => HostConfig::load(path).await?,
        None => HostConfig::default(),
    };

    if let Some(community) = matches.value_of("community") {
        snmp.community = community.to_string();
    }
    if let Some(version) = matches.value_of("snmp-version") {
        snmp.version = SnmpVersion::parse(version).ok_or_else(|| {
            Error::InvalidArgument("snmp version", version.to_string())
        })?;
    }
    if let Some(port) = parse_arg(matches, "port", "port")? {
        snmp.port = port;
    }
    if let Some(timeout) = parse_arg::<f64>(matches, "timeout", "timeout")? {
        if !(timeout.is_finite() && timeout > 0.0) {
            return Err(Error::InvalidArgument("timeout", timeout.to_string()));
        }
        snmp.timing.timeout = timeout;
    }

    let descr = matches.value_of("descr").map(Regex::new).transpose()?;
    let alias = matches.value_of("alias").map(Regex::new).transpose()?;
    if descr.is_none() && alias.is_none() {
        return Err(Error::MissingPattern);
    }

    let defaults = Thresholds::default();

    Ok(Options {
        host_name: matches
            .value_of("host")
            .ok_or(Error::MissingArgument("host"))?
            .to_string(),
        state_dir: PathBuf::from(
            matches.value_of("state-dir").unwrap_or(DEFAULT_STATE_DIR),
        ),
        descr,
        alias,
        thresholds: Thresholds {
            warning: parse_arg(matches, "warning", "warning threshold")?
                .unwrap_or(defaults.warning),
            critical: parse_arg(matches, "critical", "critical threshold")?
                .unwrap_or(defaults.critical),
        },
        snmp,
    })
}

fn parse_arg<T: FromStr>(
    matches: &ArgMatches<'_>,
    name: &str,
    what: &'static str,
) -> Result<Option<T>> {
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse()
                .map_err(|_| Error::InvalidArgument(what, value.to_string()))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use snmp_protocol::SnmpVersion;

    use super::{app, options};
    use crate::counters::Thresholds;
    use crate::error::Error;

    #[tokio::test]
    async fn defaults() {
        let matches = app()
            .get_matches_from_safe(vec![
                "check_if_errors",
                "-H",
                "sw1",
                "-d",
                "^Gi",
            ])
            .unwrap();
        let opts = options(&matches).await.unwrap();
        assert_eq!(opts.host_name, "sw1");
        assert_eq!(opts.thresholds, Thresholds::default());
        assert_eq!(opts.snmp.community, "public");
        assert_eq!(opts.snmp.port, 161);
        assert_eq!(opts.state_dir.to_str(), Some("/var/tmp/check_if_errors"));
        assert!(opts.alias.is_none());
    }

    #[tokio::test]
    async fn requires_a_pattern() {
        let matches = app()
            .get_matches_from_safe(vec!["check_if_errors", "-H", "sw1"])
            .unwrap();
        assert!(matches!(options(&matches).await, Err(Error::MissingPattern)));
    }

    #[tokio::test]
    async fn rejects_bad_values() {
        for args in [
            vec!["check_if_errors", "-H", "sw1", "-d", "("],
            vec!["check_if_errors", "-H", "sw1", "-a", "x", "-w", "five"],
            vec!["check_if_errors", "-H", "sw1", "-a", "x", "-P", "4"],
            vec!["check_if_errors", "-H", "sw1", "-a", "x", "-t", "0"],
        ] {
            let matches = app().get_matches_from_safe(args).unwrap();
            assert!(options(&matches).await.is_err());
        }
        assert!(app()
            .get_matches_from_safe(vec!["check_if_errors", "-d", "x"])
            .is_err());
    }

    #[tokio::test]
    async fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"community": "private", "port": 1161}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let matches = app()
            .get_matches_from_safe(vec![
                "check_if_errors",
                "-H",
                "sw1",
                "-a",
                "uplink",
                "--snmp-config",
                path.as_str(),
                "-p",
                "10161",
                "-P",
                "2c",
                "-w",
                "1",
                "-c",
                "2",
            ])
            .unwrap();
        let opts = options(&matches).await.unwrap();
        assert_eq!(opts.snmp.community, "private");
        assert_eq!(opts.snmp.port, 10161);
        assert_eq!(opts.snmp.version, SnmpVersion::V2c);
        assert_eq!(
            opts.thresholds,
            Thresholds {
                warning: 1,
                critical: 2
            }
        );
    }
}
