//! Fragment tags and the lookup table that decodes them.
//!
//! A fragment is an object whose first own key is its tag, e.g.
//! `{"videoRenderer": {...}}`. The vocabulary is closed: a key missing from
//! [`TAGS`] is an [`UnknownVariant`](NormalizeError::UnknownVariant) error so
//! that schema drift upstream is noticed instead of mis-parsed.
use serde_json::Value;

use crate::error::NormalizeError;

/// Every tag the router understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Tag {
    Video,
    GridVideo,
    Channel,
    Playlist,
    Radio,
    GridMovie,
    Movie,
    Shelf,
    RichShelf,
    Show,
    Clarification,
    DidYouMean,
    ShowingResultsFor,
    HorizontalCardList,
    BackgroundPromo,
    Message,
    CarouselAd,
    SearchPyv,
    PromotedVideo,
    PromotedSparklesTextSearch,
    EmergencyOnebox,
    DebugPreviewCard,
}

/// Tag string to [`Tag`].
pub const TAGS: &[(&str, Tag)] = &[
    ("videoRenderer", Tag::Video),
    ("gridVideoRenderer", Tag::GridVideo),
    ("channelRenderer", Tag::Channel),
    ("playlistRenderer", Tag::Playlist),
    ("radioRenderer", Tag::Radio),
    ("gridMovieRenderer", Tag::GridMovie),
    ("movieRenderer", Tag::Movie),
    ("shelfRenderer", Tag::Shelf),
    ("richShelfRenderer", Tag::RichShelf),
    ("showRenderer", Tag::Show),
    ("clarificationRenderer", Tag::Clarification),
    ("didYouMeanRenderer", Tag::DidYouMean),
    ("showingResultsForRenderer", Tag::ShowingResultsFor),
    ("horizontalCardListRenderer", Tag::HorizontalCardList),
    ("backgroundPromoRenderer", Tag::BackgroundPromo),
    ("messageRenderer", Tag::Message),
    ("carouselAdRenderer", Tag::CarouselAd),
    ("searchPyvRenderer", Tag::SearchPyv),
    ("promotedVideoRenderer", Tag::PromotedVideo),
    ("promotedSparklesTextSearchRenderer", Tag::PromotedSparklesTextSearch),
    ("emergencyOneboxRenderer", Tag::EmergencyOnebox),
    ("debug#previewCardRenderer", Tag::DebugPreviewCard),
];

impl Tag {
    pub fn from_key(key: &str) -> Option<Tag> {
        TAGS.iter()
            .find_map(|(name, tag)| (*name == key).then_some(*tag))
    }
}

/// Splits a fragment into its tag key and payload.
///
/// The tag is the first own key. Sibling keys are tolerated; the
/// showing-results-for fragment sometimes carries its corrected query there.
pub fn split_fragment(fragment: &Value) -> Result<(&str, &Value), NormalizeError> {
    fragment
        .as_object()
        .and_then(|map| map.iter().next())
        .map(|(key, payload)| (key.as_str(), payload))
        .ok_or(NormalizeError::NotAFragment)
}
