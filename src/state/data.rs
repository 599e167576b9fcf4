//! Shared data structures for the gallery state
//!
//! These structs represent the data model that flows between
//! the photo sources, the reaction store and the rendering surface.
//! Serde names follow the JSON feed format (`thumbSrc`, `userSince`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The person credited for a photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    /// Avatar image URL
    #[serde(rename = "avatar")]
    pub avatar_url: String,
    #[serde(rename = "userSince")]
    pub member_since: NaiveDate,
    /// Display handle, e.g. "@chef1000"
    #[serde(rename = "channel")]
    pub handle: String,
}

/// Represents a single displayable photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Unique within a session ("g-1000", "c-001", "r-1003", ...)
    pub id: String,
    #[serde(rename = "name")]
    pub title: String,
    #[serde(rename = "dateTaken")]
    pub date_taken: NaiveDate,
    #[serde(rename = "thumbSrc")]
    pub thumbnail_url: String,
    /// Full-size image; the thumbnail doubles for it when absent
    #[serde(rename = "fullSrc", default, skip_serializing_if = "Option::is_none")]
    pub full_image_url: Option<String>,
    pub author: Author,
}

impl Photo {
    /// URL shown in the lightbox
    pub fn display_url(&self) -> &str {
        self.full_image_url.as_deref().unwrap_or(&self.thumbnail_url)
    }
}

/// A viewer's vote on a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    Like,
    Dislike,
}

/// Current reaction of the local viewer to a photo.
///
/// Stored as `1` / `-1` / `0` so existing reaction blobs keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i8", into = "i8")]
pub enum Reaction {
    #[default]
    None,
    Liked,
    Disliked,
}

impl From<Vote> for Reaction {
    fn from(vote: Vote) -> Self {
        match vote {
            Vote::Like => Reaction::Liked,
            Vote::Dislike => Reaction::Disliked,
        }
    }
}

impl From<i8> for Reaction {
    fn from(value: i8) -> Self {
        match value {
            1 => Reaction::Liked,
            -1 => Reaction::Disliked,
            _ => Reaction::None,
        }
    }
}

impl From<Reaction> for i8 {
    fn from(reaction: Reaction) -> Self {
        match reaction {
            Reaction::None => 0,
            Reaction::Liked => 1,
            Reaction::Disliked => -1,
        }
    }
}

/// Running tallies shown next to the reaction buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionCounts {
    #[serde(rename = "heart", default)]
    pub hearts: u32,
    #[serde(rename = "vomit", default)]
    pub dislikes: u32,
}

impl ReactionCounts {
    /// Counter carrying the given vote
    pub fn counter_mut(&mut self, vote: Vote) -> &mut u32 {
        match vote {
            Vote::Like => &mut self.hearts,
            Vote::Dislike => &mut self.dislikes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_ITEM: &str = r#"{
        "id": "c-001",
        "name": "Gordon Ramsay",
        "dateTaken": "2025-10-01",
        "thumbSrc": "https://example.com/t.jpg",
        "fullSrc": "https://example.com/f.jpg",
        "author": {
            "name": "Gordon Ramsay",
            "avatar": "https://example.com/a.png",
            "userSince": "2017-01-01",
            "channel": "@gordonramsay"
        }
    }"#;

    #[test]
    fn test_photo_from_feed_json() {
        let photo: Photo = serde_json::from_str(FEED_ITEM).unwrap();
        assert_eq!(photo.id, "c-001");
        assert_eq!(photo.title, "Gordon Ramsay");
        assert_eq!(photo.date_taken, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(photo.author.handle, "@gordonramsay");
        assert_eq!(photo.display_url(), "https://example.com/f.jpg");
    }

    #[test]
    fn test_display_url_falls_back_to_thumbnail() {
        let mut photo: Photo = serde_json::from_str(FEED_ITEM).unwrap();
        photo.full_image_url = None;
        assert_eq!(photo.display_url(), "https://example.com/t.jpg");

        let json = serde_json::to_string(&photo).unwrap();
        assert!(!json.contains("fullSrc"));
    }

    #[test]
    fn test_reaction_wire_values() {
        assert_eq!(serde_json::to_string(&Reaction::Liked).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Reaction::Disliked).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Reaction::None).unwrap(), "0");

        let parsed: Reaction = serde_json::from_str("-1").unwrap();
        assert_eq!(parsed, Reaction::Disliked);
        // Unknown values read as no reaction
        let parsed: Reaction = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, Reaction::None);
    }

    #[test]
    fn test_counts_wire_names() {
        let counts: ReactionCounts = serde_json::from_str(r#"{"heart":3,"vomit":1}"#).unwrap();
        assert_eq!(counts, ReactionCounts { hearts: 3, dislikes: 1 });
    }
}
