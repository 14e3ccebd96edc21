/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::borrow::Cow;
use std::fmt;

use super::oid::Oid;

/// A variable binding value as returned by the agent.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Value {
    Integer(i64),
    Counter(u64),
    Gauge(u64),
    TimeTicks(u64),
    OctetStr(Vec<u8>),
    Oid(Oid),
    IpAddress([u8; 4]),
    Opaque(Vec<u8>),
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
}

impl Value {
    /// Non-negative numeric interpretation, if the value looks like a number.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(v) => u64::try_from(*v).ok(),
            Self::Counter(v) | Self::Gauge(v) | Self::TimeTicks(v) => Some(*v),
            Self::OctetStr(v) => {
                std::str::from_utf8(v).ok()?.trim().parse().ok()
            }
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Counter(v) | Self::Gauge(v) | Self::TimeTicks(v) => {
                i64::try_from(*v).ok()
            }
            Self::OctetStr(v) => {
                std::str::from_utf8(v).ok()?.trim().parse().ok()
            }
            _ => None,
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Self::NoSuchObject | Self::NoSuchInstance | Self::EndOfMibView
        )
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        match self {
            Self::OctetStr(v) | Self::Opaque(v) => String::from_utf8_lossy(v),
            v => Cow::Owned(v.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Counter(v) | Self::Gauge(v) | Self::TimeTicks(v) => {
                write!(f, "{}", v)
            }
            Self::OctetStr(v) | Self::Opaque(v) => {
                write!(f, "{}", String::from_utf8_lossy(v))
            }
            Self::Oid(v) => write!(f, "{}", v),
            Self::IpAddress([a, b, c, d]) => {
                write!(f, "{}.{}.{}.{}", a, b, c, d)
            }
            Self::NoSuchObject => write!(f, "noSuchObject"),
            Self::NoSuchInstance => write!(f, "noSuchInstance"),
            Self::EndOfMibView => write!(f, "endOfMibView"),
        }
    }
}
