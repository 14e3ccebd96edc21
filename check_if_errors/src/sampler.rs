/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use log::debug;
use snmp_protocol::{Oid, Session, WalkMap};
use thiserror::Error;

use crate::mib;
use crate::status::OperStatus;

/// Outcome of sampling one interface.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Sample {
    Up { errors: u64 },
    Down(OperStatus),
}

/// Per-interface sampling failure. The display text is the reason shown
/// in the detail line.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("is UNKNOWN")]
    Transport(#[source] snmp_protocol::Error),
    #[error("interface status is UNKNOWN")]
    StatusMissing,
    #[error("interface errors are UNKNOWN")]
    ErrorsMissing,
}

/// Status oid followed by the error counter oids for `index`.
pub fn request_oids(index: u32) -> Vec<Oid> {
    std::iter::once(mib::if_oper_status(index))
        .chain(mib::error_counters(index).map(|(_, oid)| oid))
        .collect()
}

pub async fn sample<S: Session + ?Sized>(
    session: &S,
    index: u32,
) -> Result<Sample, SampleError> {
    let data = session
        .get(&request_oids(index))
        .await
        .map_err(SampleError::Transport)?;
    classify(index, &data)
}

pub fn classify(index: u32, data: &WalkMap) -> Result<Sample, SampleError> {
    let status = data
        .get(&mib::if_oper_status(index))
        .and_then(|value| value.as_i64())
        .map(OperStatus::from_code)
        .ok_or(SampleError::StatusMissing)?;

    let errors = mib::error_counters(index)
        .filter_map(|(name, oid)| {
            let value = data.get(&oid)?.as_u64();
            debug!("ifIndex {}: {} = {:?}", index, name, value);
            value
        })
        .reduce(|a, b| a.saturating_add(b))
        .ok_or(SampleError::ErrorsMissing)?;

    match status.is_up() {
        true => Ok(Sample::Up { errors }),
        false => Ok(Sample::Down(status)),
    }
}
