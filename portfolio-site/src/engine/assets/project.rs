use serde::{Deserialize, Deserializer, Serialize};

use crate::routing::location::Category;

/// Media type tag used by thumbnails and gallery items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Gif,
    Video,
    /// Anything else in the data file. Rendered as nothing.
    #[serde(other)]
    Unsupported,
}

/// Cover media of a project card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub path: String,
}

/// One entry of a project's detail gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

/// A portfolio entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub client: String,
    #[serde(default, deserialize_with = "year_from_number_or_string")]
    pub year: String,
    #[serde(default)]
    pub role: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub thumbnail: MediaRef,
    #[serde(default)]
    pub media_gallery: Vec<MediaItem>,
    /// Markdown-capable body text.
    #[serde(default)]
    pub body: String,
}

impl Project {
    pub fn detail_path(&self) -> String {
        self.category.detail_path(&self.id)
    }
}

/// Older data files store the year as a number; some leave it null.
fn year_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged, expecting = "a year as a number or a string")]
    enum Year {
        Number(u32),
        Text(String),
    }

    Ok(match Option::<Year>::deserialize(deserializer)? {
        Some(Year::Number(year)) => year.to_string(),
        Some(Year::Text(year)) => year,
        None => String::new(),
    })
}
