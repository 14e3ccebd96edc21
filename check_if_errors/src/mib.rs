/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Object identifiers used by the check.

use snmp_protocol::Oid;

/// IF-MIB::ifDescr
pub const IF_DESCR: &[u32] = &[1, 3, 6, 1, 2, 1, 2, 2, 1, 2];
/// IF-MIB::ifOperStatus
pub const IF_OPER_STATUS: &[u32] = &[1, 3, 6, 1, 2, 1, 2, 2, 1, 8];
/// IF-MIB::ifAlias
pub const IF_ALIAS: &[u32] = &[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 18];

/// EtherLike-MIB::dot3StatsEntry
const DOT3_STATS_ENTRY: &[u32] = &[1, 3, 6, 1, 2, 1, 10, 7, 2, 1];

/// Error counters summed into the per-interface error total, as
/// (name, column within dot3StatsEntry).
pub const ERROR_COUNTERS: [(&str, u32); 12] = [
    ("dot3StatsAlignmentErrors", 2),
    ("dot3StatsFCSErrors", 3),
    ("dot3StatsSingleCollisionFrames", 4),
    ("dot3StatsMultipleCollisionFrames", 5),
    ("dot3StatsSQETestErrors", 6),
    ("dot3StatsDeferredTransmissions", 7),
    ("dot3StatsLateCollisions", 8),
    ("dot3StatsExcessiveCollisions", 9),
    ("dot3StatsInternalMacTransmitErrors", 10),
    ("dot3StatsCarrierSenseErrors", 11),
    ("dot3StatsFrameTooLongs", 13),
    ("dot3StatsInternalMacReceiveErrors", 16),
];

pub fn if_descr() -> Oid {
    Oid::from_slice(IF_DESCR)
}

pub fn if_alias() -> Oid {
    Oid::from_slice(IF_ALIAS)
}

pub fn if_oper_status(index: u32) -> Oid {
    Oid::from_slice(IF_OPER_STATUS).child(index)
}

/// Instance oids for all error counters of one interface, in
/// `ERROR_COUNTERS` order.
pub fn error_counters(index: u32) -> impl Iterator<Item = (&'static str, Oid)> {
    ERROR_COUNTERS.iter().map(move |(name, column)| {
        (*name, Oid::from_slice(DOT3_STATS_ENTRY).child(*column).child(index))
    })
}
