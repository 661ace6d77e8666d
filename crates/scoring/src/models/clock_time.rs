use std::fmt;

use serde::{Deserialize, Serialize};

use crate::services::time_codec;

/// A duration as entered by an athlete or judge, e.g. `"08:45"`.
///
/// The text is kept verbatim so results serialize exactly as submitted;
/// comparisons go through the parsed seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(String);

impl ClockTime {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self(time_codec::format_from_seconds(seconds))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lenient: malformed text counts as zero seconds.
    pub fn seconds(&self) -> i64 {
        time_codec::parse_to_seconds(&self.0)
    }

    pub fn is_valid_format(&self) -> bool {
        time_codec::is_valid_format(&self.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClockTime {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
