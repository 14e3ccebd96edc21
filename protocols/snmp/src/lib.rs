/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

mod config;
mod error;
mod oid;
mod session;
mod value;
mod walk;

pub use config::{BulkConfig, HostConfig, SnmpVersion, TimingConfig};
pub use error::{Error, Result};
pub use oid::Oid;
pub use session::{Session, Snmp2cSession};
pub use value::Value;
pub use walk::{column, WalkMap};
