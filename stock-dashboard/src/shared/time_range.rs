/// Selectable price history windows
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum TimeRange {
    Minutes5,
    #[default]
    Minutes15,
    Minutes30,
    Hour1,
}

impl TimeRange {
    /// Every range in display order
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Minutes5,
        TimeRange::Minutes15,
        TimeRange::Minutes30,
        TimeRange::Hour1,
    ];

    /// Window length sent as `?minutes=` to the price API
    pub fn minutes(&self) -> u32 {
        match self {
            TimeRange::Minutes5 => 5,
            TimeRange::Minutes15 => 15,
            TimeRange::Minutes30 => 30,
            TimeRange::Hour1 => 60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Minutes5 => "5m",
            TimeRange::Minutes15 => "15m",
            TimeRange::Minutes30 => "30m",
            TimeRange::Hour1 => "1h",
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.minutes() == minutes)
    }

    /// Next longer range, wrapping to the shortest
    pub fn next(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Next shorter range, wrapping to the longest
    pub fn prev(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).unwrap_or(0)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Last {}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_and_labels() {
        assert_eq!(TimeRange::Minutes5.minutes(), 5);
        assert_eq!(TimeRange::Hour1.minutes(), 60);
        assert_eq!(TimeRange::Hour1.label(), "1h");
        assert_eq!(TimeRange::Minutes30.to_string(), "Last 30m");
    }

    #[test]
    fn test_from_minutes() {
        assert_eq!(TimeRange::from_minutes(15), Some(TimeRange::Minutes15));
        assert_eq!(TimeRange::from_minutes(60), Some(TimeRange::Hour1));
        assert_eq!(TimeRange::from_minutes(10), None);
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(TimeRange::Minutes15.next(), TimeRange::Minutes30);
        assert_eq!(TimeRange::Hour1.next(), TimeRange::Minutes5);
        assert_eq!(TimeRange::Minutes5.prev(), TimeRange::Hour1);
        assert_eq!(TimeRange::Minutes30.prev(), TimeRange::Minutes15);
    }
}
