//! Sitemap entry types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// How often the page at a location is likely to change.
///
/// The protocol defines seven values. Anything else is kept verbatim in
/// [`ChangeFreq::Other`] so documents using newer or non-standard hints
/// survive a read/write cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
    Other(String),
}

impl ChangeFreq {
    /// The text written to `<changefreq>`.
    pub fn as_str(&self) -> &str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
            ChangeFreq::Other(value) => value,
        }
    }
}

impl From<&str> for ChangeFreq {
    fn from(value: &str) -> Self {
        match value {
            "always" => ChangeFreq::Always,
            "hourly" => ChangeFreq::Hourly,
            "daily" => ChangeFreq::Daily,
            "weekly" => ChangeFreq::Weekly,
            "monthly" => ChangeFreq::Monthly,
            "yearly" => ChangeFreq::Yearly,
            "never" => ChangeFreq::Never,
            other => ChangeFreq::Other(other.to_string()),
        }
    }
}

impl From<String> for ChangeFreq {
    fn from(value: String) -> Self {
        match ChangeFreq::from(value.as_str()) {
            ChangeFreq::Other(_) => ChangeFreq::Other(value),
            known => known,
        }
    }
}

impl From<ChangeFreq> for String {
    fn from(value: ChangeFreq) -> Self {
        match value {
            ChangeFreq::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ChangeFreq {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ChangeFreq::from(s))
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<url>` entry in a sitemap, or a `<sitemap>` entry in a sitemap index.
///
/// `loc` is the only mandatory item; every other field is written only when
/// it is `Some`. Entries of a sitemap index should leave `change_freq`,
/// `priority` and `video` unset.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Url {
    /// Absolute location of the page (or of the child sitemap).
    pub loc: String,
    /// Last modification time. `None` is distinct from the Unix epoch.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub last_mod: Option<DateTime<Utc>>,
    /// Change frequency hint.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub change_freq: Option<ChangeFreq>,
    /// Priority relative to other pages of the same site, 0.0 to 1.0 by convention.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub priority: Option<f32>,
    /// Video metadata block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub video: Option<Video>,
}

impl Url {
    /// Create an entry with only a location set.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }

    /// Set the last modification time.
    pub fn last_mod(mut self, last_mod: DateTime<Utc>) -> Self {
        self.last_mod = Some(last_mod);
        self
    }

    /// Set the change frequency hint.
    pub fn change_freq(mut self, change_freq: impl Into<ChangeFreq>) -> Self {
        self.change_freq = Some(change_freq.into());
        self
    }

    /// Set the priority.
    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Attach a video block.
    pub fn video(mut self, video: Video) -> Self {
        self.video = Some(video);
        self
    }
}

/// A `<video:video>` block.
///
/// String fields are omitted from the output when empty, `duration` when zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Video {
    pub thumbnail_loc: String,
    pub title: String,
    pub description: String,
    pub content_loc: String,
    pub player_loc: String,
    /// Kept as text (`yes`/`no`) to match the protocol.
    pub allow_embed: String,
    /// Duration in seconds.
    pub duration: u64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub gallery_loc: Option<GalleryLocation>,
}

impl Video {
    /// Create a video block with the three fields search engines require.
    pub fn new(
        thumbnail_loc: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            thumbnail_loc: thumbnail_loc.into(),
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn content_loc(mut self, content_loc: impl Into<String>) -> Self {
        self.content_loc = content_loc.into();
        self
    }

    pub fn player_loc(mut self, player_loc: impl Into<String>) -> Self {
        self.player_loc = player_loc.into();
        self
    }

    pub fn allow_embed(mut self, allow_embed: impl Into<String>) -> Self {
        self.allow_embed = allow_embed.into();
        self
    }

    pub fn duration(mut self, seconds: u64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn gallery_loc(mut self, gallery_loc: GalleryLocation) -> Self {
        self.gallery_loc = Some(gallery_loc);
        self
    }
}

/// A `<gallery_loc>` element: gallery page URL with an optional `title` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct GalleryLocation {
    /// Written as the `title` attribute when non-empty.
    pub title: String,
    /// Gallery page URL, written as the element text.
    pub value: String,
}

impl GalleryLocation {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_freq_known_values() {
        for name in ["always", "hourly", "daily", "weekly", "monthly", "yearly", "never"] {
            let freq = ChangeFreq::from(name);
            assert!(!matches!(freq, ChangeFreq::Other(_)), "{name} parsed as Other");
            assert_eq!(freq.as_str(), name);
        }
    }

    #[test]
    fn test_change_freq_keeps_unknown_text() {
        let freq: ChangeFreq = "fortnightly".parse().unwrap();
        assert_eq!(freq, ChangeFreq::Other("fortnightly".to_string()));
        assert_eq!(freq.to_string(), "fortnightly");
        assert_eq!(String::from(freq), "fortnightly");
    }

    #[test]
    fn test_change_freq_is_case_sensitive() {
        assert_eq!(
            ChangeFreq::from("Daily".to_string()),
            ChangeFreq::Other("Daily".to_string())
        );
    }

    #[test]
    fn test_url_builder() {
        let url = Url::new("http://example.com/")
            .change_freq(ChangeFreq::Weekly)
            .priority(0.8);

        assert_eq!(url.loc, "http://example.com/");
        assert_eq!(url.change_freq, Some(ChangeFreq::Weekly));
        assert_eq!(url.priority, Some(0.8));
        assert!(url.last_mod.is_none());
        assert!(url.video.is_none());
    }

    #[test]
    fn test_video_builder() {
        let video = Video::new("http://example.com/t.png", "Title", "Description")
            .duration(60)
            .gallery_loc(GalleryLocation::new("", "http://example.com/gallery"));

        assert_eq!(video.duration, 60);
        assert!(video.content_loc.is_empty());
        assert_eq!(video.gallery_loc.unwrap().value, "http://example.com/gallery");
    }
}
