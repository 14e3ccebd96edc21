/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::path::PathBuf;

use regex::Regex;
use snmp_protocol::HostConfig;

use crate::counters::Thresholds;

pub const DEFAULT_STATE_DIR: &str = "/var/tmp/check_if_errors";

#[derive(Debug)]
pub struct Options {
    pub host_name: String,
    pub state_dir: PathBuf,
    pub descr: Option<Regex>,
    pub alias: Option<Regex>,
    pub thresholds: Thresholds,
    pub snmp: HostConfig,
}
