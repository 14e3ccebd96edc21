/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use regex::Regex;
use snmp_protocol::{HostConfig, Oid, Session, Value, WalkMap};

use check_if_errors::context::Options;
use check_if_errors::mib;
use check_if_errors::{run_check, Report, Severity, StateStore, Thresholds};

/// In-memory agent. Interfaces listed in `unreachable` fail their get.
struct FakeAgent {
    data: WalkMap,
    unreachable: HashSet<u32>,
    fail_alias_walk: bool,
    requests: Mutex<Vec<Vec<Oid>>>,
}

impl FakeAgent {
    fn new() -> Self {
        Self {
            data: WalkMap::new(),
            unreachable: HashSet::new(),
            fail_alias_walk: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn interface(
        mut self,
        index: u32,
        descr: &str,
        alias: Option<&str>,
        status: Option<i64>,
        errors: Option<u64>,
    ) -> Self {
        self.data.insert(
            mib::if_descr().child(index),
            Value::OctetStr(descr.as_bytes().to_vec()),
        );
        if let Some(alias) = alias {
            self.data.insert(
                mib::if_alias().child(index),
                Value::OctetStr(alias.as_bytes().to_vec()),
            );
        }
        if let Some(status) = status {
            self.data
                .insert(mib::if_oper_status(index), Value::Integer(status));
        }
        for (i, (_, oid)) in mib::error_counters(index).enumerate() {
            let value = match (i, errors) {
                (0, Some(errors)) => Value::Counter(errors),
                (_, Some(_)) => Value::Counter(0),
                (_, None) => Value::NoSuchInstance,
            };
            self.data.insert(oid, value);
        }
        self
    }

    fn set_errors(&mut self, index: u32, errors: u64) {
        let (_, oid) = mib::error_counters(index).next().unwrap();
        self.data.insert(oid, Value::Counter(errors));
    }
}

#[async_trait]
impl Session for FakeAgent {
    async fn walk_columns(
        &self,
        columns: &[Oid],
    ) -> snmp_protocol::Result<WalkMap> {
        if self.fail_alias_walk && columns.contains(&mib::if_alias()) {
            return Err(snmp_protocol::Error::NoAddress("switch".into()));
        }
        Ok(self
            .data
            .iter()
            .filter(|(oid, _)| columns.iter().any(|c| c.contains(oid)))
            .map(|(oid, value)| (oid.clone(), value.clone()))
            .collect())
    }

    async fn get(&self, oids: &[Oid]) -> snmp_protocol::Result<WalkMap> {
        self.requests.lock().unwrap().push(oids.to_vec());
        let index = oids[0].as_slice().last().copied().unwrap();
        if self.unreachable.contains(&index) {
            return Err(snmp_protocol::Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "timeout",
            )));
        }
        Ok(oids
            .iter()
            .map(|oid| {
                let value = self
                    .data
                    .get(oid)
                    .cloned()
                    .unwrap_or(Value::NoSuchInstance);
                (oid.clone(), value)
            })
            .collect())
    }
}

fn options(
    state_dir: &Path,
    descr: Option<&str>,
    alias: Option<&str>,
) -> Options {
    Options {
        host_name: String::from("switch"),
        state_dir: state_dir.to_path_buf(),
        descr: descr.map(|re| Regex::new(re).unwrap()),
        alias: alias.map(|re| Regex::new(re).unwrap()),
        thresholds: Thresholds::default(),
        snmp: HostConfig::default(),
    }
}

fn render(report: &Report) -> Vec<String> {
    let mut out = Vec::new();
    report.write_output(&mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[tokio::test]
async fn no_matching_interfaces() {
    let dir = tempfile::tempdir().unwrap();
    let agent = FakeAgent::new().interface(1, "lo", None, Some(1), Some(0));
    let opts = options(dir.path(), Some("^eth"), None);
    let store = StateStore::new(&opts.state_dir, &opts.host_name);

    let report = run_check(&agent, &opts, &store, 1000).await.unwrap();
    assert_eq!(render(&report), vec!["UNKNOWN: 0 interfaces checked"]);
    assert_eq!(report.severity().exit_code(), 3);
    assert!(agent.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn first_run_then_rate() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = FakeAgent::new()
        .interface(2, "eth0", Some("uplink"), Some(1), Some(100))
        .interface(1, "lo", None, Some(1), Some(0));
    let opts = options(dir.path(), Some("^eth"), None);
    let store = StateStore::new(&opts.state_dir, &opts.host_name);

    let report = run_check(&agent, &opts, &store, 1000).await.unwrap();
    assert_eq!(
        render(&report),
        vec![
            "OK: 1 of 1 interfaces up, no errors",
            "eth0 (uplink) is up, unknown errors/min",
        ]
    );
    assert_eq!(agent.requests.lock().unwrap().len(), 1);
    assert_eq!(agent.requests.lock().unwrap()[0].len(), 13);
    assert!(dir.path().join("switch").join("eth0.state").exists());

    agent.set_errors(2, 160);
    let report = run_check(&agent, &opts, &store, 1060).await.unwrap();
    assert_eq!(
        render(&report),
        vec![
            "CRITICAL: 1 of 1 interfaces up, 1 interfaces with errors",
            "eth0 (uplink) is up, 60 errors/min",
        ]
    );
    assert_eq!(report.severity(), Severity::Critical);

    agent.set_errors(2, 166);
    let report = run_check(&agent, &opts, &store, 1120).await.unwrap();
    assert_eq!(report.severity(), Severity::Warning);

    /* counter reset */
    agent.set_errors(2, 0);
    let report = run_check(&agent, &opts, &store, 1180).await.unwrap();
    assert_eq!(
        render(&report),
        vec![
            "OK: 1 of 1 interfaces up, no errors",
            "eth0 (uplink) is up, 0 errors/min",
        ]
    );

    /* 10 errors over a minute and a half */
    agent.set_errors(2, 10);
    let report = run_check(&agent, &opts, &store, 1270).await.unwrap();
    assert_eq!(
        render(&report),
        vec![
            "WARNING: 1 of 1 interfaces up, 1 interfaces with errors",
            "eth0 (uplink) is up, 6 errors/min",
        ]
    );
}

#[tokio::test]
async fn clock_skew_reports_without_rate() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent =
        FakeAgent::new().interface(1, "eth0", None, Some(1), Some(10));
    let opts = options(dir.path(), Some("eth0"), None);
    let store = StateStore::new(&opts.state_dir, &opts.host_name);

    run_check(&agent, &opts, &store, 2000).await.unwrap();
    agent.set_errors(1, 1000);
    let report = run_check(&agent, &opts, &store, 1990).await.unwrap();
    assert_eq!(
        render(&report),
        vec![
            "OK: 1 of 1 interfaces up, no errors",
            "eth0 is up, unknown errors/min",
        ]
    );
}

#[tokio::test]
async fn mixed_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = FakeAgent::new()
        .interface(1, "Gi0/1", Some("core"), Some(1), Some(0))
        .interface(2, "Gi0/2", None, Some(2), Some(0))
        .interface(3, "Gi0/3", None, None, Some(0))
        .interface(4, "Gi0/4", None, Some(1), None)
        .interface(5, "Gi0/5", None, Some(1), Some(0))
        .interface(6, "Gi0/6", None, Some(8), Some(0))
        .interface(7, "Vlan1", Some("core"), Some(1), Some(0));
    agent.unreachable.insert(5);
    let opts = options(dir.path(), Some("^Gi"), Some("core"));
    let store = StateStore::new(&opts.state_dir, &opts.host_name);

    let report = run_check(&agent, &opts, &store, 1000).await.unwrap();
    assert_eq!(
        render(&report),
        vec![
            "UNKNOWN: 2 of 7 interfaces up, 2 interfaces with errors",
            "Gi0/2 interface status is down",
            "Gi0/6 interface status is unknown(8)",
            "Gi0/3 interface status is UNKNOWN",
            "Gi0/4 interface errors are UNKNOWN",
            "Gi0/5 is UNKNOWN",
            "Gi0/1 (core) is up, unknown errors/min",
            "Vlan1 (core) is up, unknown errors/min",
        ]
    );
    assert!(dir.path().join("switch").join("Gi01.state").exists());
    assert!(!dir.path().join("switch").join("Gi02.state").exists());
}

#[tokio::test]
async fn alias_walk_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = FakeAgent::new()
        .interface(1, "eth0", Some("uplink"), Some(1), Some(0));
    agent.fail_alias_walk = true;
    let opts = options(dir.path(), Some("eth"), Some("uplink"));
    let store = StateStore::new(&opts.state_dir, &opts.host_name);

    let report = run_check(&agent, &opts, &store, 1000).await.unwrap();
    assert_eq!(
        render(&report),
        vec![
            "OK: 1 of 1 interfaces up, no errors",
            "eth0 is up, unknown errors/min",
        ]
    );
}

#[tokio::test]
async fn interfaces_sharing_a_state_key() {
    let dir = tempfile::tempdir().unwrap();
    let agent = FakeAgent::new()
        .interface(1, "Gi0/1", None, Some(1), Some(0))
        .interface(2, "Gi01", None, Some(1), Some(600));
    let opts = options(dir.path(), Some("^Gi"), None);
    let store = StateStore::new(&opts.state_dir, &opts.host_name);

    let report = run_check(&agent, &opts, &store, 1000).await.unwrap();
    /* Gi01 sees the total just written for Gi0/1 at the same time */
    assert_eq!(
        report.details().collect::<Vec<_>>(),
        vec![
            "Gi0/1 is up, unknown errors/min",
            "Gi01 is up, unknown errors/min"
        ]
    );

    assert_eq!(
        std::fs::read_to_string(dir.path().join("switch").join("Gi01.state"))
            .unwrap(),
        "1000\n600\n"
    );

    let report = run_check(&agent, &opts, &store, 1060).await.unwrap();
    assert_eq!(
        report.details().collect::<Vec<_>>(),
        vec![
            "Gi0/1 is up, 0 errors/min",
            "Gi01 is up, unknown errors/min",
        ]
    );
}
