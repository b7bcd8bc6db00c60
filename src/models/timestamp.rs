//! ISO-8601 timestamp helpers.
//!
//! Every timestamp that leaves the service is rendered as
//! `YYYY-MM-DDTHH:MM:SS.mmmZ` (UTC, millisecond precision), and only strings
//! in exactly that form are accepted back.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};

/// Current time truncated to milliseconds so it round-trips through `format_iso`.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Render a timestamp in the canonical wire form.
pub fn format_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Shift a timestamp by whole days.
pub fn add_days(ts: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    ts + TimeDelta::days(days)
}

/// Parse a timestamp only if formatting it back yields the identical string.
///
/// Rejects offsets other than `Z`, missing or extra fractional digits and
/// impossible calendar dates.
pub fn parse_strict(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc);
    (format_iso(&parsed) == raw).then_some(parsed)
}

/// `#[serde(with = "...")]` adapter for canonical timestamps.
///
/// Reading accepts only what `parse_strict` accepts.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_iso(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_strict(&raw).ok_or_else(|| {
            D::Error::custom(format!(
                "`{raw}` is not a timestamp of the form YYYY-MM-DDTHH:MM:SS.mmmZ"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_millis_and_zulu() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format_iso(&ts), "2024-03-05T07:08:09.000Z");
    }

    #[test]
    fn add_days_crosses_month_boundary() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).unwrap();
        assert_eq!(format_iso(&add_days(ts, 1)), "2024-02-01T23:30:00.000Z");
    }

    #[test]
    fn strict_parse_accepts_canonical_form() {
        let parsed = parse_strict("2023-11-02T10:20:30.456Z").unwrap();
        assert_eq!(format_iso(&parsed), "2023-11-02T10:20:30.456Z");
    }

    #[test]
    fn strict_parse_rejects_near_misses() {
        for raw in [
            "2023-11-02",
            "2023-11-02T10:20:30Z",
            "2023-11-02T10:20:30.4Z",
            "2023-11-02T10:20:30.456789Z",
            "2023-11-02T10:20:30.456+00:00",
            "2023-02-30T10:20:30.456Z",
            "not a date",
            "",
        ] {
            assert!(parse_strict(raw).is_none(), "{raw} should be rejected");
        }
    }

    #[derive(serde::Deserialize, Debug)]
    struct Stamped {
        #[serde(with = "iso_millis")]
        at: DateTime<Utc>,
    }

    #[test]
    fn deserialize_is_strict() {
        let ok: Stamped = serde_json::from_str(r#"{"at":"2023-11-02T10:20:30.456Z"}"#).unwrap();
        assert_eq!(format_iso(&ok.at), "2023-11-02T10:20:30.456Z");

        for raw in [
            r#"{"at":"2023-11-02T10:20:30Z"}"#,
            r#"{"at":"2023-11-02T10:20:30.456+02:00"}"#,
            r#"{"at":"2023-11-02T10:20:30.456789Z"}"#,
        ] {
            assert!(serde_json::from_str::<Stamped>(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn now_round_trips() {
        let ts = now();
        assert_eq!(parse_strict(&format_iso(&ts)), Some(ts));
    }
}
