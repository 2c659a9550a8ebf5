//! Side-channel annotators.
//!
//! These fragments describe the response as a whole (spelling corrections,
//! related searches) rather than a result, so they write into the caller's
//! [`ResponseEnvelope`] and produce no record. Without an envelope, or with an
//! envelope that does not collect refinements, they do nothing.
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::NormalizeError;
use crate::image::{best, prep_images};
use crate::origin::Origin;
use crate::raw::{
    DidYouMeanRenderer, HorizontalCardListRenderer, SearchRefinementCard, ShowingResultsForRenderer,
};
use crate::text::{parse_text, RichText};
use crate::types::{Refinement, ResponseEnvelope};
use crate::variants::card_list::SEARCH_REFINEMENT_CARD;
use crate::variants::decode;

const DID_YOU_MEAN: &str = "didYouMeanRenderer";
const SHOWING_RESULTS_FOR: &str = "showingResultsForRenderer";
const CORRECTED_QUERY: &str = "correctedQuery";

/// Prepends the suggested query to the envelope's refinements.
pub(crate) fn did_you_mean(
    payload: &Value,
    origin: &Origin,
    envelope: Option<&mut ResponseEnvelope>,
) -> Result<(), NormalizeError> {
    let Some(refinements) = envelope.and_then(|envelope| envelope.refinements.as_mut()) else {
        return Ok(());
    };

    let raw: DidYouMeanRenderer = decode(DID_YOU_MEAN, payload)?;
    let refinement = Refinement {
        q: parse_text(raw.corrected_query.as_ref(), ""),
        url: origin.resolve(raw.corrected_query_endpoint.web_url()?)?,
        best_thumbnail: None,
        thumbnails: None,
    };
    debug!(q = %refinement.q, "refinement_prepended");
    refinements.insert(0, refinement);
    Ok(())
}

/// Records the query the service actually searched for.
///
/// The corrected query lives in the payload, or on older responses next to
/// the tag key on the fragment itself. When neither is present the envelope's
/// corrected query becomes the empty string.
pub(crate) fn showing_results_for(
    payload: &Value,
    fragment: &Value,
    envelope: Option<&mut ResponseEnvelope>,
) -> Result<(), NormalizeError> {
    let Some(envelope) = envelope else {
        return Ok(());
    };

    let raw: ShowingResultsForRenderer = decode(SHOWING_RESULTS_FOR, payload)?;
    let corrected = match raw.corrected_query {
        Some(text) => Some(text),
        None => fragment
            .get(CORRECTED_QUERY)
            .map(RichText::deserialize)
            .transpose()
            .map_err(|err| NormalizeError::Structure(format!("{CORRECTED_QUERY}: {err}")))?,
    };

    envelope.corrected_query = Some(parse_text(corrected.as_ref(), ""));
    debug!(corrected_query = ?envelope.corrected_query, "corrected_query_set");
    Ok(())
}

/// Appends one refinement per search-refinement card, in card order.
///
/// Every card is decoded before the envelope is touched, so a malformed card
/// leaves the refinements unchanged.
pub(crate) fn horizontal_refinements(
    raw: &HorizontalCardListRenderer,
    origin: &Origin,
    envelope: Option<&mut ResponseEnvelope>,
) -> Result<(), NormalizeError> {
    let Some(refinements) = envelope.and_then(|envelope| envelope.refinements.as_mut()) else {
        return Ok(());
    };

    let mut cards = Vec::with_capacity(raw.cards.len());
    for card in &raw.cards {
        let payload = card
            .get(SEARCH_REFINEMENT_CARD)
            .ok_or_else(|| NormalizeError::missing("cards[].searchRefinementCardRenderer"))?;
        let card: SearchRefinementCard = decode(SEARCH_REFINEMENT_CARD, payload)?;
        let thumbnails = prep_images(&card.thumbnail.thumbnails, origin)?;
        cards.push(Refinement {
            q: parse_text(card.query.as_ref(), ""),
            url: origin.resolve(card.search_endpoint.web_url()?)?,
            best_thumbnail: best(&thumbnails),
            thumbnails: Some(thumbnails),
        });
    }

    debug!(count = cards.len(), "refinements_appended");
    refinements.extend(cards);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;

    fn origin() -> Origin {
        Origin::new(Url::parse("https://www.youtube.com/").expect("static base url parses"))
    }

    fn did_you_mean_payload() -> Value {
        json!({
            "correctedQuery": {"runs": [{"text": "rust "}, {"text": "lang"}]},
            "correctedQueryEndpoint": {
                "commandMetadata": {"webCommandMetadata": {"url": "/results?search_query=rust+lang"}}
            }
        })
    }

    #[test]
    fn did_you_mean_prepends() {
        let mut envelope = ResponseEnvelope {
            refinements: Some(vec![Refinement {
                q: "older".into(),
                url: "https://www.youtube.com/results?search_query=older".into(),
                best_thumbnail: None,
                thumbnails: Some(vec![]),
            }]),
            corrected_query: None,
        };

        did_you_mean(&did_you_mean_payload(), &origin(), Some(&mut envelope))
            .expect("annotation succeeds");

        let refinements = envelope.refinements.expect("still collecting");
        assert_eq!(refinements.len(), 2);
        assert_eq!(refinements[0].q, "rust lang");
        assert_eq!(
            refinements[0].url,
            "https://www.youtube.com/results?search_query=rust+lang"
        );
        assert_eq!(refinements[0].thumbnails, None);
        assert_eq!(refinements[1].q, "older");
    }

    #[test]
    fn did_you_mean_without_refinement_list_is_noop() {
        let mut envelope = ResponseEnvelope::default();
        did_you_mean(&did_you_mean_payload(), &origin(), Some(&mut envelope))
            .expect("annotation succeeds");
        assert_eq!(envelope, ResponseEnvelope::default());

        // Nothing is decoded when there is nowhere to write.
        did_you_mean(&json!("garbage"), &origin(), None).expect("no envelope, no work");
    }

    #[test]
    fn showing_results_for_reads_payload_then_sibling() {
        let mut envelope = ResponseEnvelope::default();
        let fragment = json!({
            "showingResultsForRenderer": {"correctedQuery": {"simpleText": "rust"}}
        });
        showing_results_for(&fragment["showingResultsForRenderer"], &fragment, Some(&mut envelope))
            .expect("annotation succeeds");
        assert_eq!(envelope.corrected_query.as_deref(), Some("rust"));

        let fragment = json!({
            "showingResultsForRenderer": {},
            "correctedQuery": {"runs": [{"text": "crab"}]}
        });
        showing_results_for(&fragment["showingResultsForRenderer"], &fragment, Some(&mut envelope))
            .expect("annotation succeeds");
        assert_eq!(envelope.corrected_query.as_deref(), Some("crab"));

        let fragment = json!({"showingResultsForRenderer": {}});
        showing_results_for(&fragment["showingResultsForRenderer"], &fragment, Some(&mut envelope))
            .expect("annotation succeeds");
        assert_eq!(envelope.corrected_query.as_deref(), Some(""));
    }

    #[test]
    fn refinement_cards_append_in_order() {
        let raw: HorizontalCardListRenderer = serde_json::from_value(json!({
            "cards": [
                {"searchRefinementCardRenderer": {
                    "query": {"runs": [{"text": "rust tutorial"}]},
                    "searchEndpoint": {"commandMetadata": {"webCommandMetadata": {"url": "/results?search_query=rust+tutorial"}}},
                    "thumbnail": {"thumbnails": [
                        {"url": "//i.ytimg.com/a.jpg", "width": 100, "height": 56},
                        {"url": "//i.ytimg.com/b.jpg", "width": 300, "height": 168}
                    ]}
                }},
                {"searchRefinementCardRenderer": {
                    "query": {"runs": [{"text": "rust game"}]},
                    "searchEndpoint": {"commandMetadata": {"webCommandMetadata": {"url": "/results?search_query=rust+game"}}},
                    "thumbnail": {"thumbnails": []}
                }}
            ]
        }))
        .expect("card list decodes");

        let mut envelope = ResponseEnvelope::collecting_refinements();
        horizontal_refinements(&raw, &origin(), Some(&mut envelope)).expect("annotation succeeds");

        let refinements = envelope.refinements.expect("still collecting");
        let queries: Vec<&str> = refinements.iter().map(|r| r.q.as_str()).collect();
        assert_eq!(queries, ["rust tutorial", "rust game"]);
        let best = refinements[0].best_thumbnail.as_ref().expect("thumbnail present");
        assert_eq!(best.url, "https://i.ytimg.com/b.jpg");
        assert_eq!(refinements[1].thumbnails, Some(vec![]));
    }

    #[test]
    fn malformed_card_leaves_envelope_untouched() {
        let raw: HorizontalCardListRenderer = serde_json::from_value(json!({
            "cards": [
                {"searchRefinementCardRenderer": {
                    "query": {"simpleText": "ok"},
                    "searchEndpoint": {"commandMetadata": {"webCommandMetadata": {"url": "/results?search_query=ok"}}},
                    "thumbnail": {"thumbnails": []}
                }},
                {"searchRefinementCardRenderer": {"query": {"simpleText": "broken"}}}
            ]
        }))
        .expect("card list decodes");

        let mut envelope = ResponseEnvelope::collecting_refinements();
        let err = horizontal_refinements(&raw, &origin(), Some(&mut envelope)).unwrap_err();
        assert!(matches!(err, NormalizeError::Structure(_)));
        assert_eq!(envelope.refinements, Some(vec![]));
    }
}
