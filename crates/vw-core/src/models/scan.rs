use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Clean,
    Infected,
}

impl Display for ScanStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ScanStatus::Clean => write!(f, "clean"),
            ScanStatus::Infected => write!(f, "infected"),
        }
    }
}

/// What a scanning engine reports for one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineVerdict {
    pub is_infected: bool,
    pub virus_name: Option<String>,
}

impl EngineVerdict {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn infected(virus_name: impl Into<String>) -> Self {
        Self {
            is_infected: true,
            virus_name: Some(virus_name.into()),
        }
    }
}

/// Verdict message published once per scanned upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanVerdict {
    pub media_id: i64,
    pub scan_result: ScanStatus,
    /// ISO-8601 UTC, millisecond precision.
    pub scan_timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virus_name: Option<String>,
}

impl ScanVerdict {
    pub fn from_engine(media_id: i64, verdict: EngineVerdict, at: DateTime<Utc>) -> Self {
        Self {
            media_id,
            scan_result: if verdict.is_infected {
                ScanStatus::Infected
            } else {
                ScanStatus::Clean
            },
            scan_timestamp: format_timestamp(at),
            virus_name: verdict.virus_name,
        }
    }

    /// Synthetic verdict for a record that could not be scanned.
    pub fn scan_error(media_id: i64, reason: impl Display, at: DateTime<Utc>) -> Self {
        Self {
            media_id,
            scan_result: ScanStatus::Infected,
            scan_timestamp: format_timestamp(at),
            virus_name: Some(format!("Scan error: {}", reason)),
        }
    }

    pub fn subject(&self) -> String {
        format!("Virus Scan Result: Media {}", self.media_id)
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
