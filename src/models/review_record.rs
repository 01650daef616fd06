//! ReviewRecord is one scheduled review of a studied topic.
//!
//! Records are never updated in place: completing a review deletes the old
//! record and inserts a successor with a fresh id and `cycle + 1`, so at any
//! moment exactly one live record exists per topic lineage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: i64,
    pub topic: String,
    #[serde(rename = "date", with = "iso_utc")]
    pub due_date: DateTime<Utc>,
    pub cycle: u32,
    #[serde(rename = "lastInterval")]
    pub last_interval: u32,
}

impl ReviewRecord {
    /// First record of a lineage: cycle 1, no prior interval.
    pub fn initial(id: i64, topic: String, due_date: DateTime<Utc>) -> Self {
        Self {
            id,
            topic,
            due_date,
            cycle: 1,
            last_interval: 0,
        }
    }

    /// Record that supersedes this one after a completion.
    /// Keeps the topic, bumps the cycle, records the interval just computed.
    pub fn successor(&self, id: i64, interval_days: u32, due_date: DateTime<Utc>) -> Self {
        Self {
            id,
            topic: self.topic.clone(),
            due_date,
            cycle: self.cycle + 1,
            last_interval: interval_days,
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now
    }
}

/// The `date` wire field is an ISO-8601 UTC timestamp with whole seconds
/// and a `Z` suffix, e.g. `2026-03-01T14:00:00Z`.
mod iso_utc {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
