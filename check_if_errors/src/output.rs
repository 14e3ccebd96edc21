/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt;
use std::io::{self, Write};

/// Per-interface classification.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Bucket {
    Critical,
    Warning,
    Unknown,
    Ok,
}

/// Overall check state, ordered by exit code.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Accumulated per-interface results of one run.
#[derive(Default, Debug)]
pub struct Report {
    matched: usize,
    up: usize,
    critical: Vec<String>,
    warning: Vec<String>,
    unknown: Vec<String>,
    ok: Vec<String>,
}

impl Report {
    pub fn new(matched: usize) -> Self {
        Self {
            matched,
            ..Self::default()
        }
    }

    pub fn count_up(&mut self) {
        self.up += 1;
    }

    pub fn push(&mut self, bucket: Bucket, line: String) {
        match bucket {
            Bucket::Critical => self.critical.push(line),
            Bucket::Warning => self.warning.push(line),
            Bucket::Unknown => self.unknown.push(line),
            Bucket::Ok => self.ok.push(line),
        }
    }

    /// Unknown beats warning beats critical beats ok.
    pub fn severity(&self) -> Severity {
        let mut severity = Severity::Ok;
        if self.matched == 0 {
            return Severity::Unknown;
        }
        if !self.critical.is_empty() {
            severity = Severity::Critical;
        }
        if !self.warning.is_empty() {
            severity = Severity::Warning;
        }
        if !self.unknown.is_empty() {
            severity = Severity::Unknown;
        }
        severity
    }

    pub fn summary(&self) -> String {
        if self.matched == 0 {
            return String::from("0 interfaces checked");
        }
        match self.critical.len() + self.warning.len() {
            0 => format!(
                "{} of {} interfaces up, no errors",
                self.up, self.matched
            ),
            n => format!(
                "{} of {} interfaces up, {} interfaces with errors",
                self.up, self.matched, n
            ),
        }
    }

    /// Detail lines: criticals, warnings, unknowns, then oks.
    pub fn details(&self) -> impl Iterator<Item = &str> {
        self.critical
            .iter()
            .chain(&self.warning)
            .chain(&self.unknown)
            .chain(&self.ok)
            .map(String::as_str)
    }

    pub fn write_output<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}: {}", self.severity(), self.summary())?;
        for line in self.details() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
