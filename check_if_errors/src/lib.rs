/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

pub mod check;
pub mod cli;
pub mod context;
pub mod counters;
pub mod error;
pub mod matcher;
pub mod mib;
pub mod output;
pub mod sampler;
pub mod status;

pub use check::run_check;
pub use counters::{StateStore, Thresholds};
pub use output::{Bucket, Report, Severity};
