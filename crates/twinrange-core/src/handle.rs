#![forbid(unsafe_code)]

//! Handle identity.

use std::fmt;

/// One of the two draggable endpoints of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Handle {
    /// Lower endpoint.
    Min,
    /// Upper endpoint.
    Max,
}

impl Handle {
    /// Both handles in track order.
    pub const ALL: [Handle; 2] = [Handle::Min, Handle::Max];

    /// The opposite handle.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Min => Self::Max,
            Self::Max => Self::Min,
        }
    }

    /// Position of this handle in [`Handle::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Min => 0,
            Self::Max => 1,
        }
    }

    /// Stable lowercase name, used as a structured logging field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_involution() {
        for h in Handle::ALL {
            assert_ne!(h, h.other());
            assert_eq!(h, h.other().other());
        }
    }

    #[test]
    fn index_matches_all_order() {
        for (i, h) in Handle::ALL.iter().enumerate() {
            assert_eq!(h.index(), i);
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Handle::Min.to_string(), "min");
        assert_eq!(Handle::Max.to_string(), "max");
    }
}
