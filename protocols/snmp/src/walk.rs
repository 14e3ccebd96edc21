/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::collections::BTreeMap;
use std::ops::Bound;

use log::debug;

use super::oid::Oid;
use super::value::Value;

/// Retrieved instances, keyed by full instance oid.
pub type WalkMap = BTreeMap<Oid, Value>;

/// Extract `index -> value` for one table column from walk data. Only
/// single-arc instance suffixes (ifIndex-style tables) are returned;
/// exception values are skipped.
pub fn column(data: &WalkMap, column: &Oid) -> BTreeMap<u32, Value> {
    data.range((Bound::Excluded(column.clone()), Bound::Unbounded))
        .take_while(|(oid, _)| column.contains(oid))
        .filter_map(|(oid, value)| match oid.index_after(column) {
            Some(&[index]) if !value.is_exception() => {
                Some((index, value.clone()))
            }
            Some(_) => {
                debug!("SNMP: walk {}: skipping {} = {}", column, oid, value);
                None
            }
            None => None,
        })
        .collect()
}
