//! Prayer identities and their daily order.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The six daily boundaries, in chronological order.
///
/// Sunrise is not a prayer, but it closes the Fajr window and is
/// tracked as a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

/// All boundaries in daily order.
pub const ALL_PRAYERS: [Prayer; 6] = [
    Prayer::Fajr,
    Prayer::Sunrise,
    Prayer::Dhuhr,
    Prayer::Asr,
    Prayer::Maghrib,
    Prayer::Isha,
];

impl Prayer {
    /// 0-based position in the daily order.
    pub const fn index(self) -> usize {
        match self {
            Self::Fajr => 0,
            Self::Sunrise => 1,
            Self::Dhuhr => 2,
            Self::Asr => 3,
            Self::Maghrib => 4,
            Self::Isha => 5,
        }
    }

    /// Following boundary on the same day; `None` after Isha.
    pub fn next(self) -> Option<Self> {
        ALL_PRAYERS.get(self.index() + 1).copied()
    }

    /// Preceding boundary on the same day; `None` before Fajr.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| ALL_PRAYERS[i])
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }
}

impl Display for Prayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_index() {
        for (i, p) in ALL_PRAYERS.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn next_and_previous() {
        assert_eq!(Prayer::Fajr.next(), Some(Prayer::Sunrise));
        assert_eq!(Prayer::Isha.next(), None);
        assert_eq!(Prayer::Fajr.previous(), None);
        assert_eq!(Prayer::Dhuhr.previous(), Some(Prayer::Sunrise));
    }

    #[test]
    fn display() {
        assert_eq!(Prayer::Maghrib.to_string(), "Maghrib");
    }
}
