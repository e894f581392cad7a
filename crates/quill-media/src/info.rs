//! Video metadata as reported by `yt-dlp -j`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A chapter marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Start offset in seconds.
    pub start_time: f64,
    /// End offset in seconds.
    pub end_time: f64,
    /// Chapter title.
    pub title: String,
}

/// Metadata for one video.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Full title.
    pub title: String,
    /// Channel or uploader name.
    pub uploader: Option<String>,
    /// Length in seconds.
    pub duration: Option<f64>,
    /// Platform categories.
    pub categories: Vec<String>,
    /// View count at fetch time.
    pub view_count: Option<u64>,
    /// Like count at fetch time.
    pub like_count: Option<u64>,
    /// Upload date as `YYYYMMDD`.
    pub upload_date: Option<String>,
    /// Chapter markers, possibly empty.
    pub chapters: Vec<Chapter>,
    /// Uploader channel URL.
    pub uploader_url: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail: Option<String>,
    /// Video description.
    pub description: Option<String>,
    /// Uploader-assigned tags.
    pub tags: Vec<String>,
    /// URL the metadata was requested for.
    pub video_url: String,
}

// yt-dlp emits `null` for absent lists, so every field is optional here.
#[derive(Deserialize)]
struct RawInfo {
    fulltitle: Option<String>,
    title: Option<String>,
    uploader: Option<String>,
    duration: Option<f64>,
    categories: Option<Vec<String>>,
    view_count: Option<u64>,
    like_count: Option<u64>,
    upload_date: Option<String>,
    chapters: Option<Vec<Chapter>>,
    uploader_url: Option<String>,
    thumbnail: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
}

impl VideoInfo {
    /// Parse `yt-dlp -j` output for `url`.
    pub fn from_ytdlp_json(json: &str, url: &str) -> Result<Self> {
        let raw: RawInfo = serde_json::from_str(json)?;
        Ok(Self {
            title: raw.fulltitle.or(raw.title).unwrap_or_default(),
            uploader: raw.uploader,
            duration: raw.duration,
            categories: raw.categories.unwrap_or_default(),
            view_count: raw.view_count,
            like_count: raw.like_count,
            upload_date: raw.upload_date,
            chapters: raw.chapters.unwrap_or_default(),
            uploader_url: raw.uploader_url,
            thumbnail: raw.thumbnail,
            description: raw.description,
            tags: raw.tags.unwrap_or_default(),
            video_url: url.to_string(),
        })
    }

    /// Upload date as a calendar date, when present and well-formed.
    pub fn upload_day(&self) -> Option<NaiveDate> {
        let raw = self.upload_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y%m%d").ok()
    }
}
