/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt;
use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::fs;

use super::error::Result;

/* Config */

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    pub version: SnmpVersion,
    pub community: String,
    pub port: u16,
    pub timing: TimingConfig,
    pub bulk: BulkConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            version: SnmpVersion::V2c,
            community: String::from("public"),
            port: 161,
            timing: TimingConfig::default(),
            bulk: BulkConfig::default(),
        }
    }
}

impl HostConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("SNMP: reading host config from {}", path.as_ref().display());
        let data = fs::read(path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnmpVersion {
    #[serde(rename = "1")]
    V1,
    #[serde(rename = "2c")]
    V2c,
    #[serde(rename = "3")]
    V3,
}

impl SnmpVersion {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(Self::V1),
            "2" | "2c" => Some(Self::V2c),
            "3" => Some(Self::V3),
            _ => None,
        }
    }
}

impl fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "1"),
            Self::V2c => write!(f, "2c"),
            Self::V3 => write!(f, "3"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub retries: usize,
    pub timeout: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            retries: 0,
            timeout: 5.0,
        }
    }
}

impl TimingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout.max(0.0))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BulkConfig {
    pub max_repetitions: u32,
}

impl Default for BulkConfig {
    fn default() -> Self {
        BulkConfig { max_repetitions: 10 }
    }
}
