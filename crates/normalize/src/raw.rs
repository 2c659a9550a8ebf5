//! Raw payload shapes as the service emits them.
//!
//! These types decode a fragment's payload (the value under its tag key). They
//! are deliberately loose: anything downstream code can live without is an
//! `Option` or defaults to empty, and fields that are only required on some
//! code paths are checked by the accessor methods, which report the missing
//! path as [`NormalizeError::Structure`].
//!
//! Unknown fields are ignored; the service adds new ones all the time.
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NormalizeError;
use crate::image::ImageCandidate;
use crate::text::RichText;

/// Decodes a list leniently: a non-list value becomes empty and entries that
/// fail to decode are skipped.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Where a click on an element leads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEndpoint {
    pub browse_endpoint: Option<BrowseEndpoint>,
    pub command_metadata: Option<CommandMetadata>,
    pub watch_endpoint: Option<WatchEndpoint>,
    pub url_endpoint: Option<UrlEndpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEndpoint {
    pub browse_id: String,
    pub canonical_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandMetadata {
    pub web_command_metadata: WebCommandMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebCommandMetadata {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEndpoint {
    pub video_id: String,
    pub playlist_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEndpoint {
    pub url: String,
}

impl NavigationEndpoint {
    pub fn browse(&self) -> Result<&BrowseEndpoint, NormalizeError> {
        self.browse_endpoint
            .as_ref()
            .ok_or_else(|| NormalizeError::missing("navigationEndpoint.browseEndpoint"))
    }

    pub fn watch(&self) -> Result<&WatchEndpoint, NormalizeError> {
        self.watch_endpoint
            .as_ref()
            .ok_or_else(|| NormalizeError::missing("navigationEndpoint.watchEndpoint"))
    }

    /// `commandMetadata.webCommandMetadata.url`, the generic target of any endpoint.
    pub fn web_url(&self) -> Result<&str, NormalizeError> {
        self.command_metadata
            .as_ref()
            .map(|meta| meta.web_command_metadata.url.as_str())
            .ok_or_else(|| {
                NormalizeError::missing("navigationEndpoint.commandMetadata.webCommandMetadata")
            })
    }

    /// `urlEndpoint.url`, used by external links.
    pub fn external_url(&self) -> Result<&str, NormalizeError> {
        self.url_endpoint
            .as_ref()
            .map(|endpoint| endpoint.url.as_str())
            .ok_or_else(|| NormalizeError::missing("endpoint.urlEndpoint"))
    }

    /// Channel link: the canonical base URL when present, the generic web
    /// command URL otherwise. Requires a browse endpoint.
    pub fn channel_url(&self) -> Result<&str, NormalizeError> {
        match self.browse()?.canonical_base_url.as_deref() {
            Some(canonical) if !canonical.is_empty() => Ok(canonical),
            _ => self.web_url(),
        }
    }
}

/// `{"thumbnails": [...]}` wrapper used by every image-bearing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub thumbnails: Vec<ImageCandidate>,
}

/// `{"metadataBadgeRenderer": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub metadata_badge_renderer: BadgeRenderer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRenderer {
    pub style: Option<String>,
    pub label: Option<String>,
    pub tooltip: Option<String>,
    pub icon: Option<BadgeIcon>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeIcon {
    pub icon_type: Option<String>,
}

/// The byline fields shared by playlists, movies and shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bylines {
    pub short_byline_text: Option<RichText>,
    pub long_byline_text: Option<RichText>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub owner_badges: Vec<Badge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelThumbnailSupport {
    pub channel_thumbnail_with_link_renderer: ThumbnailHolder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailHolder {
    pub thumbnail: Thumbnails,
}

/// `upcomingEventData.startTime`, epoch seconds, usually as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpochSeconds {
    Text(String),
    Number(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEventData {
    pub start_time: EpochSeconds,
}

/// `videoRenderer` / `gridVideoRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRenderer {
    pub video_id: String,
    pub title: Option<RichText>,
    pub thumbnail: Thumbnails,
    #[serde(default, deserialize_with = "lenient_list")]
    pub badges: Vec<Badge>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub owner_badges: Vec<Badge>,
    pub owner_text: Option<RichText>,
    pub upcoming_event_data: Option<UpcomingEventData>,
    pub channel_thumbnail_supported_renderers: Option<ChannelThumbnailSupport>,
    pub description_snippet: Option<RichText>,
    pub view_count_text: Option<RichText>,
    pub length_text: Option<RichText>,
    #[serde(default)]
    pub thumbnail_overlays: Vec<Value>,
    pub published_time_text: Option<RichText>,
}

/// `channelRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRenderer {
    pub channel_id: String,
    pub title: Option<RichText>,
    pub navigation_endpoint: NavigationEndpoint,
    pub thumbnail: Thumbnails,
    #[serde(default, deserialize_with = "lenient_list")]
    pub owner_badges: Vec<Badge>,
    pub subscriber_count_text: Option<RichText>,
    pub description_snippet: Option<RichText>,
    pub video_count_text: Option<RichText>,
}

/// `{"childVideoRenderer": {...}}` entries of playlists and mixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildVideoEntry {
    pub child_video_renderer: ChildVideo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildVideo {
    pub title: Option<RichText>,
    pub length_text: Option<RichText>,
}

/// `playlistRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRenderer {
    pub playlist_id: String,
    pub title: Option<RichText>,
    #[serde(default)]
    pub videos: Vec<ChildVideoEntry>,
    pub navigation_endpoint: Option<NavigationEndpoint>,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnails>,
    #[serde(flatten)]
    pub bylines: Bylines,
    pub published_time_text: Option<RichText>,
    pub video_count: Option<String>,
}

/// `radioRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioRenderer {
    pub title: Option<RichText>,
    pub navigation_endpoint: NavigationEndpoint,
    #[serde(default)]
    pub videos: Vec<ChildVideoEntry>,
    pub thumbnail: Thumbnails,
}

/// `gridMovieRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridMovieRenderer {
    pub video_id: String,
    pub title: Option<RichText>,
    pub navigation_endpoint: NavigationEndpoint,
    pub thumbnail: Thumbnails,
    pub length_text: Option<RichText>,
}

/// `movieRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRenderer {
    pub video_id: String,
    pub title: Option<RichText>,
    pub navigation_endpoint: NavigationEndpoint,
    pub thumbnail: Thumbnails,
    #[serde(flatten)]
    pub bylines: Bylines,
    pub description_snippet: Option<RichText>,
    pub top_metadata_items: Vec<RichText>,
    #[serde(default)]
    pub bottom_metadata_items: Vec<RichText>,
    pub length_text: Option<RichText>,
}

/// `showRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowRenderer {
    pub title: Option<RichText>,
    pub thumbnail_renderer: ShowThumbnailRenderer,
    pub navigation_endpoint: NavigationEndpoint,
    #[serde(default)]
    pub thumbnail_overlays: Vec<Value>,
    #[serde(flatten)]
    pub bylines: Bylines,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowThumbnailRenderer {
    pub show_custom_thumbnail_renderer: ThumbnailHolder,
}

/// `clarificationRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarificationRenderer {
    pub content_title: Option<RichText>,
    pub text: Option<RichText>,
    pub source: Option<RichText>,
    pub endpoint: NavigationEndpoint,
    pub secondary_source: Option<RichText>,
    pub secondary_endpoint: Option<NavigationEndpoint>,
}

/// `shelfRenderer` / `richShelfRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfRenderer {
    pub title: Option<RichText>,
    pub contents: Option<Vec<RichItemEntry>>,
    pub content: Option<ShelfContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichItemEntry {
    pub rich_item_renderer: RichItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichItem {
    pub content: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfContent {
    pub vertical_list_renderer: Option<ItemList>,
    pub horizontal_movie_list_renderer: Option<ItemList>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<Value>,
}

/// `horizontalCardListRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalCardListRenderer {
    pub cards: Vec<Value>,
    pub style: Option<Value>,
    pub header: Option<RichListHeaderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichListHeaderEntry {
    pub rich_list_header_renderer: RichListHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichListHeader {
    pub title: Option<RichText>,
    pub subtitle: Option<RichText>,
    pub endpoint: Option<NavigationEndpoint>,
    pub channel_thumbnail: Option<ChannelThumbnailSupport>,
}

/// `searchRefinementCardRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRefinementCard {
    pub query: Option<RichText>,
    pub search_endpoint: NavigationEndpoint,
    pub thumbnail: Thumbnails,
}

/// `previewCardRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCard {
    pub header: RichListHeaderEntry,
    pub contents: Vec<GridVideoEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridVideoEntry {
    pub grid_video_renderer: VideoRenderer,
}

/// `didYouMeanRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidYouMeanRenderer {
    pub corrected_query: Option<RichText>,
    pub corrected_query_endpoint: NavigationEndpoint,
}

/// `showingResultsForRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowingResultsForRenderer {
    pub corrected_query: Option<RichText>,
}

/// `backgroundPromoRenderer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundPromoRenderer {
    pub title: Option<RichText>,
}
