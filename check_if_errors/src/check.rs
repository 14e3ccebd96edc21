/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::collections::BTreeMap;

use log::{debug, info, warn};
use snmp_protocol::{column, Oid, Session, WalkMap};

use crate::context::Options;
use crate::counters::{compute_rate, StateStore};
use crate::error::Result;
use crate::matcher::{match_interfaces, Interface};
use crate::mib;
use crate::output::{Bucket, Report};
use crate::sampler::{sample, Sample, SampleError};

/// Discover matching interfaces, sample each in ascending ifIndex order
/// and collect the results. Only a failing ifDescr walk aborts the run.
pub async fn run_check<S: Session + ?Sized>(
    session: &S,
    options: &Options,
    store: &StateStore,
    now: i64,
) -> Result<Report> {
    let descrs = strings(
        &session.walk_columns(&[mib::if_descr()]).await?,
        &mib::if_descr(),
    );
    let aliases = match session.walk_columns(&[mib::if_alias()]).await {
        Ok(data) => strings(&data, &mib::if_alias()),
        Err(e) => {
            warn!("failed to retrieve ifAlias table: {}", e);
            BTreeMap::new()
        }
    };
    debug!("found {} interfaces, {} aliases", descrs.len(), aliases.len());

    let indices = match_interfaces(
        &descrs,
        &aliases,
        options.descr.as_ref(),
        options.alias.as_ref(),
    );
    info!("matched interfaces: {:?}", indices);

    let mut report = Report::new(indices.len());

    for index in indices {
        let interface = Interface::new(index, &descrs, &aliases);
        let name = interface.name();

        let errors = match sample(session, index).await {
            Ok(Sample::Up { errors }) => errors,
            Ok(Sample::Down(status)) => {
                report.push(
                    Bucket::Critical,
                    format!("{} interface status is {}", name, status),
                );
                continue;
            }
            Err(e) => {
                if let SampleError::Transport(err) = &e {
                    warn!("{}: SNMP request failed: {}", name, err);
                }
                report.push(Bucket::Unknown, format!("{} {}", name, e));
                continue;
            }
        };

        report.count_up();
        let rate = compute_rate(store, &interface.descr, now, errors).await;
        debug!("{}: {} errors total, {:?}", name, errors, rate);
        report.push(
            rate.bucket(&options.thresholds),
            format!("{} {}", name, rate.reason()),
        );
    }

    Ok(report)
}

fn strings(data: &WalkMap, oid: &Oid) -> BTreeMap<u32, String> {
    column(data, oid)
        .into_iter()
        .map(|(index, value)| (index, value.to_string_lossy().into_owned()))
        .collect()
}
