/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::output::Bucket;

/// Error totals per minute above which an interface is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: u64,
    pub critical: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: 5,
            critical: 10,
        }
    }
}

impl Thresholds {
    pub fn bucket(&self, rate: u64) -> Bucket {
        if rate > self.critical {
            Bucket::Critical
        } else if rate > self.warning {
            Bucket::Warning
        } else {
            Bucket::Ok
        }
    }
}

/// Error total as seen at the previous run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorState {
    pub timestamp: i64,
    pub errors: u64,
}

impl ErrorState {
    fn parse(data: &str) -> Option<Self> {
        let mut lines = data.lines();
        let timestamp = lines.next()?.trim().parse().ok()?;
        if timestamp < 0 {
            return None;
        }
        let errors = lines.next()?.trim().parse().ok()?;
        Some(Self { timestamp, errors })
    }

    /// Errors per minute since `self`, or `None` if the clock did not
    /// move forward.
    pub fn rate(&self, now: i64, errors: u64) -> Option<u64> {
        let elapsed = match now.checked_sub(self.timestamp) {
            Some(elapsed) if elapsed > 0 => elapsed,
            _ => return None,
        };
        match errors > self.errors {
            true => Some(
                ((errors - self.errors) as f64 / (elapsed as f64 / 60.0))
                    .floor() as u64,
            ),
            false => Some(0),
        }
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.timestamp)?;
        writeln!(f, "{}", self.errors)
    }
}

/// Keep only `[A-Za-z0-9.-]`. Distinct names may sanitize to the same
/// key; such interfaces share one state file.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect()
}

/// Per-host directory of `<ifname>.state` files.
pub struct StateStore {
    base_dir: PathBuf,
}

impl StateStore {
    pub fn new<P: AsRef<Path>>(state_dir: P, host: &str) -> Self {
        Self {
            base_dir: state_dir.as_ref().join(sanitize(host)),
        }
    }

    pub fn path(&self, if_name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.state", sanitize(if_name)))
    }

    /// Previous state; unreadable or garbled files count as absent.
    pub async fn load(&self, if_name: &str) -> Option<ErrorState> {
        let path = self.path(if_name);
        match fs::read_to_string(&path).await {
            Err(e) => {
                debug!("no counter state in {}: {}", path.display(), e);
                None
            }
            Ok(data) => {
                let state = ErrorState::parse(&data);
                if state.is_none() {
                    warn!(
                        "ignoring undecodable counter state in {}",
                        path.display()
                    );
                }
                state
            }
        }
    }

    pub async fn save(&self, if_name: &str, state: &ErrorState) -> Result<()> {
        fs::create_dir_all(&self.base_dir).await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(self.path(if_name))
            .await?;
        file.write_all(state.to_string().as_bytes()).await?;
        Ok(file.flush().await?)
    }
}

/// Result of comparing the current error total against the stored one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateOutcome {
    NoHistory,
    ClockSkew,
    Rate(u64),
}

impl RateOutcome {
    pub fn bucket(&self, thresholds: &Thresholds) -> Bucket {
        match self {
            Self::Rate(rate) => thresholds.bucket(*rate),
            Self::NoHistory | Self::ClockSkew => Bucket::Ok,
        }
    }

    pub fn reason(&self) -> String {
        match self {
            Self::Rate(rate) => format!("is up, {} errors/min", rate),
            Self::NoHistory | Self::ClockSkew => {
                String::from("is up, unknown errors/min")
            }
        }
    }
}

/// Load the previous state, store the current one and derive the
/// errors-per-minute rate. The new state is written before the rate is
/// computed, also when no rate can be given.
pub async fn compute_rate(
    store: &StateStore,
    if_name: &str,
    now: i64,
    errors: u64,
) -> RateOutcome {
    let previous = store.load(if_name).await;
    let current = ErrorState {
        timestamp: now,
        errors,
    };

    if let Err(e) = store.save(if_name, &current).await {
        warn!(
            "failed to write counter state {}: {}",
            store.path(if_name).display(),
            e
        );
    }

    match previous {
        None => RateOutcome::NoHistory,
        Some(previous) => match previous.rate(now, errors) {
            Some(rate) => RateOutcome::Rate(rate),
            None => {
                info!(
                    "{}: clock went backwards ({} -> {}), skipping rate",
                    if_name, previous.timestamp, now
                );
                RateOutcome::ClockSkew
            }
        },
    }
}
