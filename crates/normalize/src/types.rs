//! Normalized record types.
//!
//! Every record serializes with a `type` discriminator fixed by its Rust type,
//! so a record's kind is decided once, at construction, and cannot drift.
//! Deserializing an [`Item`] reads that discriminator first and decodes the
//! matching record, never a look-alike.
//! Field names follow the downstream JSON contract (`channelID`, `shortURL`,
//! `bestThumbnail`, ...).
//!
//! # Type Hierarchy
//!
//! ```text
//! Item
//! ├── Video            (author: Option<Author>)
//! ├── Channel
//! ├── Playlist         (firstVideo: Option<PlaylistPreview>, owner: Option<Owner>)
//! ├── Mix              (firstVideo: MixPreview)
//! ├── GridMovie
//! ├── Movie            (owner: Owner)
//! ├── Show             (owner: OwnerLink)
//! ├── Clarification    (sources: 1..=2 × Source)
//! ├── HorizontalChannelList (channels: Vec<ChannelPreview>)
//! ├── ChannelPreview   (videos: Vec<Video>)
//! └── Shelf            (items: Vec<Item>)
//! ```
//!
//! Side-channel output lives in [`ResponseEnvelope`], which is owned by the
//! caller, never by a record.
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::image::Image;
use crate::owner::{Author, Owner, OwnerLink};

/// A normalized record.
///
/// Each variant's struct carries its own `type` tag, which keeps nested
/// records (videos inside a channel preview, items inside a shelf) tagged too.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Item {
    Video(Video),
    Channel(Channel),
    Playlist(Playlist),
    Mix(Mix),
    GridMovie(GridMovie),
    Movie(Movie),
    Show(Show),
    Clarification(Clarification),
    HorizontalChannelList(HorizontalChannelList),
    ChannelPreview(ChannelPreview),
    Shelf(Shelf),
}

impl Item {
    /// The record's `type` discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Video(_) => "video",
            Item::Channel(_) => "channel",
            Item::Playlist(_) => "playlist",
            Item::Mix(_) => "mix",
            Item::GridMovie(_) => "gridMovie",
            Item::Movie(_) => "movie",
            Item::Show(_) => "show",
            Item::Clarification(_) => "clarification",
            Item::HorizontalChannelList(_) => "horizontalChannelList",
            Item::ChannelPreview(_) => "channelPreview",
            Item::Shelf(_) => "shelf",
        }
    }
}

/// Every `type` discriminator an [`Item`] can carry.
const KINDS: &[&str] = &[
    "video",
    "channel",
    "playlist",
    "mix",
    "gridMovie",
    "movie",
    "show",
    "clarification",
    "horizontalChannelList",
    "channelPreview",
    "shelf",
];

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| <D::Error as de::Error>::missing_field("type"))?
            .to_owned();

        let item = match kind.as_str() {
            "video" => Video::deserialize(value).map(Item::Video),
            "channel" => Channel::deserialize(value).map(Item::Channel),
            "playlist" => Playlist::deserialize(value).map(Item::Playlist),
            "mix" => Mix::deserialize(value).map(Item::Mix),
            "gridMovie" => GridMovie::deserialize(value).map(Item::GridMovie),
            "movie" => Movie::deserialize(value).map(Item::Movie),
            "show" => Show::deserialize(value).map(Item::Show),
            "clarification" => Clarification::deserialize(value).map(Item::Clarification),
            "horizontalChannelList" => {
                HorizontalChannelList::deserialize(value).map(Item::HorizontalChannelList)
            }
            "channelPreview" => ChannelPreview::deserialize(value).map(Item::ChannelPreview),
            "shelf" => Shelf::deserialize(value).map(Item::Shelf),
            other => return Err(de::Error::unknown_variant(other, KINDS)),
        };
        item.map_err(de::Error::custom)
    }
}

/// `type: "video"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "video", rename_all = "camelCase")]
pub struct Video {
    pub title: String,
    pub id: String,
    pub url: String,
    pub best_thumbnail: Option<Image>,
    pub thumbnails: Vec<Image>,
    pub is_upcoming: bool,
    /// Scheduled start, epoch milliseconds.
    pub upcoming: Option<i64>,
    pub is_live: bool,
    pub badges: Vec<String>,
    /// Absent for some shows and auto-generated content.
    pub author: Option<Author>,
    pub description: String,
    pub views: Option<u64>,
    /// Empty for live streams, most upcoming content and occasionally at random.
    pub duration: String,
    pub uploaded_at: String,
}

/// `type: "channel"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "channel", rename_all = "camelCase")]
pub struct Channel {
    pub name: String,
    #[serde(rename = "channelID")]
    pub channel_id: String,
    pub url: String,
    pub best_avatar: Option<Image>,
    pub avatars: Vec<Image>,
    pub verified: bool,
    pub subscribers: String,
    pub description_short: String,
    pub videos: Option<u64>,
}

/// `type: "playlist"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "playlist", rename_all = "camelCase")]
pub struct Playlist {
    pub title: String,
    #[serde(rename = "playlistID")]
    pub playlist_id: String,
    pub url: String,
    pub first_video: Option<PlaylistPreview>,
    /// Absent when the byline is a bare label without a linked channel.
    pub owner: Option<Owner>,
    pub published_at: String,
    pub length: u64,
}

/// First entry of a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPreview {
    pub id: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
    pub url: String,
    pub title: String,
    pub length: String,
    pub thumbnails: Vec<Image>,
    pub best_thumbnail: Option<Image>,
}

/// `type: "mix"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "mix", rename_all = "camelCase")]
pub struct Mix {
    pub title: String,
    pub url: String,
    pub first_video: MixPreview,
}

/// First entry of a mix; same shape as [`PlaylistPreview`] with `text` for the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixPreview {
    pub id: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
    pub url: String,
    pub text: String,
    pub length: String,
    pub thumbnails: Vec<Image>,
    pub best_thumbnail: Option<Image>,
}

/// `type: "gridMovie"`, a movie inside a horizontal movie list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "gridMovie", rename_all = "camelCase")]
pub struct GridMovie {
    pub title: String,
    #[serde(rename = "videoID")]
    pub video_id: String,
    pub url: String,
    pub best_thumbnail: Option<Image>,
    pub thumbnails: Vec<Image>,
    pub duration: String,
}

/// `type: "movie"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "movie", rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    #[serde(rename = "videoID")]
    pub video_id: String,
    pub url: String,
    pub best_thumbnail: Option<Image>,
    pub thumbnails: Vec<Image>,
    pub owner: Owner,
    pub description: String,
    /// Free-form attributes from the top metadata line (year, genre, ...).
    pub meta: Vec<String>,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
    pub duration: String,
}

/// `type: "show"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "show", rename_all = "camelCase")]
pub struct Show {
    pub title: String,
    pub best_thumbnail: Option<Image>,
    pub thumbnails: Vec<Image>,
    pub url: String,
    #[serde(rename = "videoID")]
    pub video_id: String,
    #[serde(rename = "playlistID")]
    pub playlist_id: Option<String>,
    pub episodes: Option<u64>,
    pub owner: OwnerLink,
}

/// `type: "clarification"`, a fact-check style panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "clarification", rename_all = "camelCase")]
pub struct Clarification {
    pub title: String,
    pub text: String,
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub text: String,
    pub url: String,
}

/// `type: "horizontalChannelList"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "horizontalChannelList", rename_all = "camelCase")]
pub struct HorizontalChannelList {
    pub title: String,
    pub channels: Vec<ChannelPreview>,
}

/// `type: "channelPreview"`, a channel together with a few of its videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "channelPreview", rename_all = "camelCase")]
pub struct ChannelPreview {
    pub name: String,
    #[serde(rename = "channelID")]
    pub channel_id: String,
    pub url: String,
    pub best_avatar: Option<Image>,
    pub avatars: Vec<Image>,
    pub subscribers: String,
    pub videos: Vec<Video>,
}

/// `type: "shelf"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "shelf", rename_all = "camelCase")]
pub struct Shelf {
    pub title: String,
    pub items: Vec<Item>,
}

/// A suggested alternate query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refinement {
    pub q: String,
    pub url: String,
    pub best_thumbnail: Option<Image>,
    pub thumbnails: Option<Vec<Image>>,
}

/// Caller-owned aggregate response that side-channel fragments write into.
///
/// `refinements` is `None` when the caller does not collect refinements;
/// annotators leave it alone in that case.
///
/// Only one normalization call may hold the `&mut` at a time; callers that
/// normalize a page concurrently must serialize the fragments that share an
/// envelope themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub refinements: Option<Vec<Refinement>>,
    /// `None` until a showing-results-for fragment is seen; empty when that
    /// fragment carried no query.
    pub corrected_query: Option<String>,
}

impl ResponseEnvelope {
    /// An envelope that collects refinements.
    pub fn collecting_refinements() -> Self {
        Self {
            refinements: Some(Vec::new()),
            corrected_query: None,
        }
    }
}
