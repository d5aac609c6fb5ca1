use std::fmt;
use std::str::FromStr;

/// A chart date in `YYYY-MM-DD` shape.
///
/// Only the shape is checked: ten characters with hyphens at offsets 4 and 7.
/// Calendar validity is not, so `9999-99-99` is a valid `ChartDate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDate(String);

impl ChartDate {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let chars: Vec<char> = input.chars().collect();

        if chars.len() == 10 && chars[4] == '-' && chars[7] == '-' {
            Some(Self(input.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading `YYYY` segment, used to narrow catalog searches.
    pub fn year(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    pub fn playlist_name(&self) -> String {
        format!("{} Billboard 100", self.0)
    }
}

impl fmt::Display for ChartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChartDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("'{}' is not in YYYY-MM-DD format", s))
    }
}
