//! Validated request parameters

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Provider coin identifier, e.g. `bitcoin` or `usd-coin`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinId(String);

impl CoinId {
    /// Normalize and validate a coin id.
    ///
    /// Ids are lowercased; only ASCII letters, digits, `-`, `_` and `.` are
    /// accepted since the id is spliced into the provider path.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let id = raw.trim().to_ascii_lowercase();
        if id.is_empty() || id.len() > 128 {
            return Err(Error::InvalidInput(format!("invalid coin id '{}'", raw)));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            || id.starts_with('.')
        {
            return Err(Error::InvalidInput(format!("invalid coin id '{}'", raw)));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Span of a historical series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryRange {
    Days(u32),
    Max,
}

impl HistoryRange {
    /// True for ranges of one day or less
    pub fn is_intraday(&self) -> bool {
        matches!(self, HistoryRange::Days(d) if *d <= 1)
    }
}

impl Default for HistoryRange {
    fn default() -> Self {
        HistoryRange::Days(7)
    }
}

impl FromStr for HistoryRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(HistoryRange::Max);
        }
        match s.parse::<u32>() {
            Ok(d) if d > 0 => Ok(HistoryRange::Days(d)),
            _ => Err(Error::InvalidInput(format!(
                "days must be a positive integer or 'max', got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRange::Days(d) => write!(f, "{}", d),
            HistoryRange::Max => f.write_str("max"),
        }
    }
}

/// Sampling interval for a historical series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Daily,
    Hourly,
}

impl Interval {
    /// Parse an optional interval; blank means provider default
    pub fn parse_opt(raw: Option<&str>) -> Result<Option<Self>, Error> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Hourly => "hourly",
        }
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Interval::Daily),
            "hourly" => Ok(Interval::Hourly),
            other => Err(Error::InvalidInput(format!(
                "interval must be 'daily' or 'hourly', got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_id_normalized() {
        assert_eq!(CoinId::parse("  Bitcoin ").unwrap().as_str(), "bitcoin");
        assert_eq!(CoinId::parse("usd-coin").unwrap().as_str(), "usd-coin");
    }

    #[test]
    fn test_coin_id_rejects_path_tricks() {
        assert!(CoinId::parse("").is_err());
        assert!(CoinId::parse("../global").is_err());
        assert!(CoinId::parse("btc/markets").is_err());
        assert!(CoinId::parse("btc?x=1").is_err());
        assert!(CoinId::parse(".hidden").is_err());
    }

    #[test]
    fn test_history_range_parse() {
        assert_eq!("1".parse::<HistoryRange>().unwrap(), HistoryRange::Days(1));
        assert_eq!("007".parse::<HistoryRange>().unwrap(), HistoryRange::Days(7));
        assert_eq!("MAX".parse::<HistoryRange>().unwrap(), HistoryRange::Max);
        assert!("0".parse::<HistoryRange>().is_err());
        assert!("-3".parse::<HistoryRange>().is_err());
        assert!("week".parse::<HistoryRange>().is_err());
    }

    #[test]
    fn test_history_range_intraday() {
        assert!(HistoryRange::Days(1).is_intraday());
        assert!(!HistoryRange::Days(2).is_intraday());
        assert!(!HistoryRange::Max.is_intraday());
    }

    #[test]
    fn test_history_range_display_is_canonical() {
        assert_eq!("007".parse::<HistoryRange>().unwrap().to_string(), "7");
        assert_eq!(HistoryRange::Max.to_string(), "max");
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!(Interval::parse_opt(None).unwrap(), None);
        assert_eq!(Interval::parse_opt(Some(" ")).unwrap(), None);
        assert_eq!(
            Interval::parse_opt(Some("Daily")).unwrap(),
            Some(Interval::Daily)
        );
        assert!(Interval::parse_opt(Some("weekly")).is_err());
    }
}
