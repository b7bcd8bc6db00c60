//! Request body accepted by create and update.
//!
//! Fields are kept as raw JSON so that a wrongly typed value becomes a
//! field error from the validation engine rather than a body rejection.
//! The body itself must be a JSON object; arrays, scalars and `null` are
//! rejected during deserialization.

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use serde_json::Value;
use std::fmt;

/// Untrusted create/update payload. Missing keys are `null`; unknown keys are ignored.
#[derive(Debug, Default, Clone)]
pub struct VideoInput {
    pub title: Value,
    pub author: Value,
    pub available_resolutions: Value,
    pub min_age_restriction: Value,
    pub can_be_downloaded: Value,
    pub publication_date: Value,
}

impl<'de> Deserialize<'de> for VideoInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VideoInputVisitor)
    }
}

struct VideoInputVisitor;

impl<'de> Visitor<'de> for VideoInputVisitor {
    type Value = VideoInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<VideoInput, A::Error> {
        let mut input = VideoInput::default();
        while let Some(key) = map.next_key::<String>()? {
            let slot = match key.as_str() {
                "title" => &mut input.title,
                "author" => &mut input.author,
                "availableResolutions" => &mut input.available_resolutions,
                "minAgeRestriction" => &mut input.min_age_restriction,
                "canBeDownloaded" => &mut input.can_be_downloaded,
                "publicationDate" => &mut input.publication_date,
                _ => {
                    map.next_value::<serde::de::IgnoredAny>()?;
                    continue;
                }
            };
            *slot = map.next_value()?;
        }
        Ok(input)
    }
}
