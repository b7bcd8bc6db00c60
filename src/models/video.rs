//! Represents a video record and the resolutions it can be served in.

use crate::models::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolution label a video may be made available in.
///
/// The wire value of each variant is its name (`"P720"`, ...).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    P144,
    P240,
    P360,
    P480,
    P720,
    P1080,
    P1440,
    P2160,
}

impl Resolution {
    pub const ALL: [Resolution; 8] = [
        Resolution::P144,
        Resolution::P240,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::P1440,
        Resolution::P2160,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::P144 => "P144",
            Resolution::P240 => "P240",
            Resolution::P360 => "P360",
            Resolution::P480 => "P480",
            Resolution::P720 => "P720",
            Resolution::P1080 => "P1080",
            Resolution::P1440 => "P1440",
            Resolution::P2160 => "P2160",
        }
    }

    /// Look up a label; case-sensitive, returns `None` for anything outside the set.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == label)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single video in the catalogue.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Assigned by the store on creation; never reused.
    pub id: u64,

    pub title: String,

    pub author: String,

    pub can_be_downloaded: bool,

    /// Minimum viewer age in `0..=18`, serialized as `null` when unrestricted.
    pub min_age_restriction: Option<u8>,

    /// Fixed at creation.
    #[serde(with = "timestamp::iso_millis")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp::iso_millis")]
    pub publication_date: DateTime<Utc>,

    /// Never empty, never holds duplicates.
    pub available_resolutions: Vec<Resolution>,
}

impl Video {
    /// Add resolutions without revoking any already granted.
    ///
    /// Existing entries keep their position; new ones are appended in the
    /// order given.
    pub fn grant_resolutions(&mut self, incoming: &[Resolution]) {
        for resolution in incoming {
            if !self.available_resolutions.contains(resolution) {
                self.available_resolutions.push(*resolution);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Video {
        let created_at = timestamp::now();
        Video {
            id: 7,
            title: "Intro".into(),
            author: "Ann".into(),
            can_be_downloaded: false,
            min_age_restriction: None,
            created_at,
            publication_date: timestamp::add_days(created_at, 1),
            available_resolutions: vec![Resolution::P144],
        }
    }

    #[test]
    fn labels_are_distinct() {
        for (i, a) in Resolution::ALL.iter().enumerate() {
            for b in Resolution::ALL.iter().skip(i + 1) {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn from_label_matches_exact_names_only() {
        assert_eq!(Resolution::from_label("P480"), Some(Resolution::P480));
        assert_eq!(Resolution::from_label("P2160"), Some(Resolution::P2160));
        assert_eq!(Resolution::from_label("p480"), None);
        assert_eq!(Resolution::from_label("P999"), None);
    }

    #[test]
    fn grant_resolutions_is_a_union() {
        let mut video = sample();
        video.grant_resolutions(&[Resolution::P480, Resolution::P144, Resolution::P720]);
        assert_eq!(
            video.available_resolutions,
            vec![Resolution::P144, Resolution::P480, Resolution::P720]
        );
    }

    #[test]
    fn serializes_camel_case_with_null_age() {
        let video = sample();
        let value = serde_json::to_value(&video).unwrap();
        assert_eq!(value["id"], json!(7));
        assert_eq!(value["canBeDownloaded"], json!(false));
        assert_eq!(value["minAgeRestriction"], json!(null));
        assert_eq!(value["availableResolutions"], json!(["P144"]));
        assert_eq!(
            value["createdAt"],
            json!(timestamp::format_iso(&video.created_at))
        );

        let back: Video = serde_json::from_value(value).unwrap();
        assert_eq!(back, video);
    }
}
