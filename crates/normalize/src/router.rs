//! Tag dispatch.
use serde_json::Value;
use tracing::trace;

use crate::annotate;
use crate::error::NormalizeError;
use crate::normalizer::Normalizer;
use crate::raw::BackgroundPromoRenderer;
use crate::tag::{split_fragment, Tag};
use crate::text::parse_text;
use crate::types::{Item, ResponseEnvelope};
use crate::variants::{card_list, channel, clarification, decode, movie, playlist, shelf, video};

/// Promo text the service shows on an empty result page.
const NO_RESULTS: &str = "No results found";

impl Normalizer {
    /// Routes one fragment to its normalizer without fault isolation.
    ///
    /// `Ok(None)` means the fragment is a side-channel annotation or content
    /// that is deliberately skipped.
    pub(crate) fn route(
        &self,
        fragment: &Value,
        envelope: Option<&mut ResponseEnvelope>,
    ) -> Result<Option<Item>, NormalizeError> {
        let (key, payload) = split_fragment(fragment)?;
        let tag = Tag::from_key(key).ok_or_else(|| NormalizeError::UnknownVariant {
            tag: key.to_string(),
        })?;
        let origin = self.origin();

        let item = match tag {
            Tag::Video | Tag::GridVideo => {
                Item::Video(video::normalize(&decode(key, payload)?, origin)?)
            }
            Tag::Channel => Item::Channel(channel::normalize(&decode(key, payload)?, origin)?),
            Tag::Playlist => {
                Item::Playlist(playlist::normalize_playlist(&decode(key, payload)?, origin)?)
            }
            Tag::Radio => Item::Mix(playlist::normalize_mix(&decode(key, payload)?, origin)?),
            Tag::GridMovie => {
                Item::GridMovie(movie::normalize_grid_movie(&decode(key, payload)?, origin)?)
            }
            Tag::Movie => Item::Movie(movie::normalize_movie(&decode(key, payload)?, origin)?),
            Tag::Show => Item::Show(movie::normalize_show(&decode(key, payload)?, origin)?),
            Tag::Clarification => {
                Item::Clarification(clarification::normalize(&decode(key, payload)?, origin)?)
            }
            Tag::Shelf | Tag::RichShelf => Item::Shelf(shelf::normalize(self, &decode(key, payload)?)?),
            Tag::DebugPreviewCard => {
                Item::ChannelPreview(card_list::channel_preview(&decode(key, payload)?, origin)?)
            }
            Tag::HorizontalCardList => {
                return card_list::normalize(&decode(key, payload)?, origin, envelope);
            }
            Tag::DidYouMean => {
                annotate::did_you_mean(payload, origin, envelope)?;
                return Ok(None);
            }
            Tag::ShowingResultsFor => {
                annotate::showing_results_for(payload, fragment, envelope)?;
                return Ok(None);
            }
            Tag::BackgroundPromo => {
                let promo: BackgroundPromoRenderer = decode(key, payload)?;
                let text = parse_text(promo.title.as_ref(), "");
                if text != NO_RESULTS {
                    return Err(NormalizeError::UnexpectedMessage { text });
                }
                trace!(tag = key, "no_results");
                return Ok(None);
            }
            Tag::Message
            | Tag::CarouselAd
            | Tag::SearchPyv
            | Tag::PromotedVideo
            | Tag::PromotedSparklesTextSearch
            | Tag::EmergencyOnebox => {
                trace!(tag = key, "fragment_skipped");
                return Ok(None);
            }
        };

        Ok(Some(item))
    }
}
