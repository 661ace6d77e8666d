use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ClockTime;
use crate::error::{Result, ScoringError};
use crate::services::time_codec;

/// Maximum duration allowed for a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct WorkoutTimeCap {
    pub minutes: u32,
    #[validate(range(max = 59, message = "Seconds must be between 0 and 59"))]
    pub seconds: u32,
}

impl WorkoutTimeCap {
    pub fn new(minutes: u32, seconds: u32) -> Result<Self> {
        let cap = Self { minutes, seconds };
        cap.validate()
            .map_err(|e| ScoringError::InvalidTimeCap(e.to_string()))?;
        Ok(cap)
    }

    pub fn as_seconds(&self) -> i64 {
        i64::from(self.minutes) * 60 + i64::from(self.seconds)
    }

    pub fn to_clock_time(&self) -> ClockTime {
        ClockTime::new(self.to_string())
    }
}

impl fmt::Display for WorkoutTimeCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

impl FromStr for WorkoutTimeCap {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        if !time_codec::is_valid_format(s) {
            return Err(ScoringError::InvalidTimeCap(format!(
                "'{}' must be in mm:ss format",
                s
            )));
        }

        let total = time_codec::parse_to_seconds(s);
        let minutes = u32::try_from(total / 60)
            .map_err(|_| ScoringError::InvalidTimeCap(s.to_string()))?;
        let seconds = u32::try_from(total % 60)
            .map_err(|_| ScoringError::InvalidTimeCap(s.to_string()))?;

        Self::new(minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_seconds_only() {
        let cap = WorkoutTimeCap::new(10, 0).unwrap();
        assert_eq!(cap.to_string(), "10:00");
        assert_eq!(WorkoutTimeCap::new(7, 5).unwrap().to_string(), "7:05");
    }

    #[test]
    fn test_seconds_out_of_range() {
        assert!(matches!(
            WorkoutTimeCap::new(5, 60),
            Err(ScoringError::InvalidTimeCap(_))
        ));
    }

    #[test]
    fn test_parse_from_clock_text() {
        let cap: WorkoutTimeCap = "12:30".parse().unwrap();
        assert_eq!(cap, WorkoutTimeCap { minutes: 12, seconds: 30 });
        assert_eq!(cap.as_seconds(), 750);

        assert!("12:3".parse::<WorkoutTimeCap>().is_err());
        assert!("soon".parse::<WorkoutTimeCap>().is_err());
    }
}
