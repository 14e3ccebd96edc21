/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::{io, result};

use thiserror::Error;

/// Result type for run-level failures.
pub type Result<T> = result::Result<T, Error>;

/// Errors that abort the whole check. Per-interface failures are
/// reported as `SampleError` instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument for {0}: {1}")]
    InvalidArgument(&'static str, String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("At least one of --descr or --alias must be given")]
    MissingPattern,
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("I/O error: {0}")]
    IO(#[from] io::Error),
    #[error("SNMP: {0}")]
    SNMP(#[from] snmp_protocol::Error),
}
