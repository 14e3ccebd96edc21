/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt;

/// IF-MIB::ifOperStatus
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum OperStatus {
    Up,
    Down,
    Testing,
    Unknown,
    Dormant,
    NotPresent,
    LowerLayerDown,
    /// A code outside the IF-MIB enumeration.
    Unmapped(i64),
}

impl OperStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Up,
            2 => Self::Down,
            3 => Self::Testing,
            4 => Self::Unknown,
            5 => Self::Dormant,
            6 => Self::NotPresent,
            7 => Self::LowerLayerDown,
            n => Self::Unmapped(n),
        }
    }

    pub fn is_up(&self) -> bool {
        *self == Self::Up
    }
}

impl fmt::Display for OperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Testing => write!(f, "testing"),
            Self::Unknown => write!(f, "unknown"),
            Self::Dormant => write!(f, "dormant"),
            Self::NotPresent => write!(f, "notPresent"),
            Self::LowerLayerDown => write!(f, "lowerLayerDown"),
            Self::Unmapped(n) => write!(f, "unknown({})", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OperStatus;

    #[test]
    fn status_names() {
        let names = (1..=7)
            .map(|code| OperStatus::from_code(code).to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "up",
                "down",
                "testing",
                "unknown",
                "dormant",
                "notPresent",
                "lowerLayerDown"
            ]
        );
        assert_eq!(OperStatus::from_code(9).to_string(), "unknown(9)");
        assert!(OperStatus::from_code(1).is_up());
        assert!(!OperStatus::from_code(9).is_up());
    }
}
