//! Weekdays as the API numbers them: Monday = 0 .. Sunday = 6

use serde::{Deserialize, Serialize};

/// Day of the week, zero-indexed from Monday
///
/// Serialized as its index, matching `publish_days` in the schedule API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Mon = 0,
    Tue = 1,
    Wed = 2,
    Thu = 3,
    Fri = 4,
    Sat = 5,
    Sun = 6,
}

impl Weekday {
    /// Create from zero-based index (Monday = 0)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Mon),
            1 => Some(Self::Tue),
            2 => Some(Self::Wed),
            3 => Some(Self::Thu),
            4 => Some(Self::Fri),
            5 => Some(Self::Sat),
            6 => Some(Self::Sun),
            _ => None,
        }
    }

    /// Zero-based index (Monday = 0)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Key used in the `business_hours` map
    pub fn key(&self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }

    /// One-character Korean label
    pub fn korean_name(&self) -> &'static str {
        match self {
            Self::Mon => "월",
            Self::Tue => "화",
            Self::Wed => "수",
            Self::Thu => "목",
            Self::Fri => "금",
            Self::Sat => "토",
            Self::Sun => "일",
        }
    }

    /// Parse an index, a `business_hours` key or a Korean label
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u8>() {
            return Self::from_index(index);
        }
        Self::all()
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(s) || d.korean_name() == s)
    }

    /// All days, Monday first
    pub fn all() -> [Self; 7] {
        [
            Self::Mon,
            Self::Tue,
            Self::Wed,
            Self::Thu,
            Self::Fri,
            Self::Sat,
            Self::Sun,
        ]
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.index()
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| format!("Invalid day: {value}. Must be 0-6 (월-일)"))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.korean_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_covers_week() {
        for day in Weekday::all() {
            assert_eq!(Weekday::from_index(day.index()), Some(day));
        }
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(Weekday::parse("1"), Some(Weekday::Tue));
        assert_eq!(Weekday::parse("fri"), Some(Weekday::Fri));
        assert_eq!(Weekday::parse("토"), Some(Weekday::Sat));
        assert_eq!(Weekday::parse("9"), None);
        assert_eq!(Weekday::parse("holiday"), None);
    }

    #[test]
    fn test_serializes_as_index() {
        let json = serde_json::to_string(&vec![Weekday::Tue, Weekday::Fri]).unwrap();
        assert_eq!(json, "[1,4]");

        let bad: Result<Weekday, _> = serde_json::from_str("8");
        assert!(bad.is_err());
    }

    #[test]
    fn test_from_chrono() {
        assert_eq!(Weekday::from(chrono::Weekday::Mon), Weekday::Mon);
        assert_eq!(Weekday::from(chrono::Weekday::Sun).index(), 6);
    }
}
