//! Participant inputs to generation.
//!
//! Only the birthday is read, to derive the adult-participant flag. Past
//! sessions are accepted for interface compatibility with the study platform
//! and play no part in randomization.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// The participant a protocol is generated for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub given_name: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[serde(default)]
    pub birthday: Option<String>,
}

impl Participant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_birthday(mut self, birthday: impl Into<String>) -> Self {
        self.birthday = Some(birthday.into());
        self
    }

    pub fn with_given_name(mut self, name: impl Into<String>) -> Self {
        self.given_name = Some(name.into());
        self
    }

    /// Parsed birthday, if present and well-formed.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let raw = self.birthday.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    /// Age in whole days on `today`.
    pub fn age_in_days(&self, today: NaiveDate) -> Option<i64> {
        self.birth_date()
            .map(|born| today.signed_duration_since(born).num_days())
    }

    /// Whether the participant is at least `threshold_days` old on `today`.
    ///
    /// A missing or unparseable birthday counts as not adult.
    pub fn is_adult(&self, today: NaiveDate, threshold_days: i64) -> bool {
        match self.age_in_days(today) {
            Some(days) => days >= threshold_days,
            None => {
                warn!(
                    birthday = ?self.birthday,
                    "could not compute participant age, assuming non-adult"
                );
                false
            }
        }
    }
}

/// A prior session of the same participant, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastSession {
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_preview: bool,
    /// Counterbalancing record stored by the platform; opaque here.
    #[serde(default)]
    pub conditions: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ADULT_AGE_DAYS;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_in_days() {
        let p = Participant::new().with_birthday("2020-01-01");
        assert_eq!(p.age_in_days(date(2020, 1, 31)), Some(30));
    }

    #[test]
    fn test_adult_threshold() {
        let today = date(2024, 6, 1);
        let exactly = today - chrono::Duration::days(ADULT_AGE_DAYS);
        let p = Participant::new().with_birthday(exactly.format("%Y-%m-%d").to_string());
        assert!(p.is_adult(today, ADULT_AGE_DAYS));

        let younger = Participant::new().with_birthday("2019-03-14");
        assert!(!younger.is_adult(today, ADULT_AGE_DAYS));
    }

    #[test]
    fn test_timestamp_birthday() {
        let p = Participant::new().with_birthday("2001-09-09T12:00:00Z");
        assert_eq!(p.birth_date(), Some(date(2001, 9, 9)));
    }

    #[test]
    fn test_unparseable_birthday_is_not_adult() {
        let p = Participant::new().with_birthday("last spring");
        assert_eq!(p.age_in_days(date(2024, 1, 1)), None);
        assert!(!p.is_adult(date(2024, 1, 1), ADULT_AGE_DAYS));
        assert!(!Participant::new().is_adult(date(2024, 1, 1), ADULT_AGE_DAYS));
    }

    #[test]
    fn test_deserialize_platform_shape() {
        let json = r#"{"givenName": "Sam", "birthday": "2017-05-02"}"#;
        let p: Participant = serde_json::from_str(json).unwrap();
        assert_eq!(p.given_name.as_deref(), Some("Sam"));
        assert_eq!(p.birth_date(), Some(date(2017, 5, 2)));

        let sessions: Vec<PastSession> =
            serde_json::from_str(r#"[{"createdOn": "2021-12-01", "completed": true}]"#).unwrap();
        assert!(sessions[0].completed);
        assert!(!sessions[0].is_preview);
    }
}
