use serde_json::Value;

use crate::annotate;
use crate::error::NormalizeError;
use crate::image::{best, prep_images};
use crate::origin::Origin;
use crate::raw::{HorizontalCardListRenderer, PreviewCard};
use crate::tag::split_fragment;
use crate::text::parse_text;
use crate::types::{ChannelPreview, HorizontalChannelList, Item, ResponseEnvelope};
use crate::variants::{decode, video};

pub(crate) const SEARCH_REFINEMENT_CARD: &str = "searchRefinementCardRenderer";
pub(crate) const PREVIEW_CARD: &str = "previewCardRenderer";

const CHANNELS_STYLE_MARKER: &str = "CHANNELS";

/// `horizontalCardListRenderer`, dispatched on the tag of its first card.
///
/// Refinement cards go to the caller's envelope and produce nothing; preview
/// cards produce a [`HorizontalChannelList`].
pub(crate) fn normalize(
    raw: &HorizontalCardListRenderer,
    origin: &Origin,
    envelope: Option<&mut ResponseEnvelope>,
) -> Result<Option<Item>, NormalizeError> {
    let first = raw
        .cards
        .first()
        .ok_or_else(|| NormalizeError::missing("horizontalCardListRenderer.cards[0]"))?;
    let (card_tag, _) = split_fragment(first)?;

    match card_tag {
        SEARCH_REFINEMENT_CARD => {
            annotate::horizontal_refinements(raw, origin, envelope)?;
            Ok(None)
        }
        PREVIEW_CARD => channel_list(raw, origin).map(|list| Some(Item::HorizontalChannelList(list))),
        other => Err(NormalizeError::UnknownSubVariant {
            tag: other.to_string(),
        }),
    }
}

fn channel_list(
    raw: &HorizontalCardListRenderer,
    origin: &Origin,
) -> Result<HorizontalChannelList, NormalizeError> {
    // Preview cards have only been observed as channel + videos lists.
    if !raw
        .style
        .as_ref()
        .is_some_and(|style| mentions(style, CHANNELS_STYLE_MARKER))
    {
        return Err(NormalizeError::UnsupportedCardListStyle);
    }

    let header = raw
        .header
        .as_ref()
        .ok_or_else(|| NormalizeError::missing("horizontalCardListRenderer.header"))?;

    let channels = raw
        .cards
        .iter()
        .map(|card| {
            let payload = card
                .get(PREVIEW_CARD)
                .ok_or_else(|| NormalizeError::missing("cards[].previewCardRenderer"))?;
            channel_preview(&decode(PREVIEW_CARD, payload)?, origin)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HorizontalChannelList {
        title: parse_text(header.rich_list_header_renderer.title.as_ref(), ""),
        channels,
    })
}

/// `previewCardRenderer` to [`ChannelPreview`].
pub(crate) fn channel_preview(
    raw: &PreviewCard,
    origin: &Origin,
) -> Result<ChannelPreview, NormalizeError> {
    let header = &raw.header.rich_list_header_renderer;
    let endpoint = header
        .endpoint
        .as_ref()
        .ok_or_else(|| NormalizeError::missing("richListHeaderRenderer.endpoint"))?;
    let holder = header
        .channel_thumbnail
        .as_ref()
        .ok_or_else(|| NormalizeError::missing("richListHeaderRenderer.channelThumbnail"))?;
    let avatars = prep_images(
        &holder.channel_thumbnail_with_link_renderer.thumbnail.thumbnails,
        origin,
    )?;
    let videos = raw
        .contents
        .iter()
        .map(|entry| video::normalize(&entry.grid_video_renderer, origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ChannelPreview {
        name: parse_text(header.title.as_ref(), ""),
        channel_id: endpoint.browse()?.browse_id.clone(),
        url: origin.resolve(endpoint.web_url()?)?,
        best_avatar: best(&avatars),
        avatars,
        subscribers: parse_text(header.subtitle.as_ref(), ""),
        videos,
    })
}

/// Whether any key or string anywhere inside `value` contains `marker`.
fn mentions(value: &Value, marker: &str) -> bool {
    match value {
        Value::String(text) => text.contains(marker),
        Value::Array(values) => values.iter().any(|value| mentions(value, marker)),
        Value::Object(map) => map
            .iter()
            .any(|(key, value)| key.contains(marker) || mentions(value, marker)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn style_marker_found_in_nested_strings() {
        let style = json!({"styleType": "HORIZONTAL_CARD_LIST_STYLE_TYPE_ENGAGEMENT_PANEL_CHANNELS"});
        assert!(mentions(&style, CHANNELS_STYLE_MARKER));
        assert!(!mentions(&json!({"styleType": "VIDEOS"}), CHANNELS_STYLE_MARKER));
        assert!(!mentions(&json!(7), CHANNELS_STYLE_MARKER));
    }
}
