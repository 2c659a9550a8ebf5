//! Renderer fragment normalization.
//!
//! Search and browse responses arrive as lists of *fragments*: JSON objects
//! whose first key names a renderer (`videoRenderer`, `shelfRenderer`, ...)
//! and whose value is that renderer's payload. This crate turns each fragment
//! into a typed [`Item`] or into nothing.
//!
//! ## What happens to a fragment
//!
//! - **Records** - videos, channels, playlists, mixes, movies, shows,
//!   clarifications, channel lists and shelves become an [`Item`]. Shelves
//!   recurse into their children.
//! - **Annotations** - spelling corrections and related searches describe
//!   the response as a whole. They are written into the caller's
//!   [`ResponseEnvelope`] and produce nothing.
//! - **Skipped content** - ads, notices and the "no results" promo produce
//!   nothing.
//! - **Anything else** - an unknown tag or a payload of the wrong shape is a
//!   [`NormalizeError`]. [`Normalizer::normalize`] logs it, dumps the fragment
//!   for later inspection, and returns `None`, so one bad fragment never takes
//!   down the rest of the page.
//!
//! ## Example
//!
//! ```
//! use normalize::{Item, NormalizeConfig, Normalizer};
//! use serde_json::json;
//!
//! let normalizer = Normalizer::new(NormalizeConfig::default()).unwrap();
//! let fragment = json!({"channelRenderer": {
//!     "channelId": "UCrust",
//!     "title": {"simpleText": "Rust"},
//!     "navigationEndpoint": {
//!         "browseEndpoint": {"browseId": "UCrust", "canonicalBaseUrl": "/@rust"}
//!     },
//!     "thumbnail": {"thumbnails": []}
//! }});
//!
//! let Some(Item::Channel(channel)) = normalizer.normalize(&fragment, None) else {
//!     panic!("expected a channel");
//! };
//! assert_eq!(channel.url, "https://www.youtube.com/@rust");
//! ```
mod annotate;
mod config;
mod dump;
mod error;
mod image;
mod normalizer;
mod origin;
mod owner;
pub mod raw;
mod router;
mod tag;
pub mod text;
mod types;
mod variants;

pub use crate::config::{
    ConfigError, DiagnosticsConfig, NestedFailurePolicy, NormalizeConfig, DEFAULT_BASE_URL,
    DEFAULT_DUMP_DIR,
};
pub use crate::error::NormalizeError;
pub use crate::image::{prep_images, Image, ImageCandidate};
pub use crate::normalizer::Normalizer;
pub use crate::origin::Origin;
pub use crate::owner::{Author, Owner, OwnerLink};
pub use crate::tag::{split_fragment, Tag, TAGS};
pub use crate::types::{
    Channel, ChannelPreview, Clarification, GridMovie, HorizontalChannelList, Item, Mix,
    MixPreview, Movie, Playlist, PlaylistPreview, Refinement, ResponseEnvelope, Shelf, Show,
    Source, Video,
};
