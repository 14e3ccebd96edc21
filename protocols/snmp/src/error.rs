/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use thiserror::Error;

use super::config::SnmpVersion;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("SNMP version {0} is not supported")]
    UnsupportedVersion(SnmpVersion),
    #[error("Invalid OID: {0}")]
    InvalidOid(String),
    #[error("No address found for host {0}")]
    NoAddress(String),
    #[error("Failed to connect: {0}")]
    Connection(#[source] csnmp::SnmpClientError),
    #[error("Query failed: {0}")]
    Query(#[source] csnmp::SnmpClientError),
}
