//! Log domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// CI system a log was collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    Github,
    Gitlab,
    Jenkins,
}

impl LogSource {
    pub const ALL: [LogSource; 3] = [LogSource::Github, LogSource::Gitlab, LogSource::Jenkins];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogSource::Github => "github",
            LogSource::Gitlab => "gitlab",
            LogSource::Jenkins => "jenkins",
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`LogSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSource(pub String);

impl fmt::Display for UnknownSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is not a valid source (expected one of: github, gitlab, jenkins)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSource {}

impl FromStr for LogSource {
    type Err = UnknownSource;

    /// Matching is exact: `GitHub` is rejected just like `travis`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

/// A single persisted log submission
///
/// Records are created once at ingestion time and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: Uuid,
    pub source: LogSource,
    pub repo: String,
    pub pipeline_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub content: String,
    /// Free-form client data, kept verbatim (nested objects and arrays included)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}
