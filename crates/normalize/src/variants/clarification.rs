use crate::error::NormalizeError;
use crate::origin::Origin;
use crate::raw::ClarificationRenderer;
use crate::text::parse_text;
use crate::types::{Clarification, Source};

/// `clarificationRenderer` to [`Clarification`]; the secondary source is
/// only listed when the payload carries one.
pub(crate) fn normalize(
    raw: &ClarificationRenderer,
    origin: &Origin,
) -> Result<Clarification, NormalizeError> {
    let mut sources = vec![Source {
        text: parse_text(raw.source.as_ref(), ""),
        url: origin.resolve(raw.endpoint.external_url()?)?,
    }];

    if let Some(secondary) = raw.secondary_source.as_ref() {
        let endpoint = raw
            .secondary_endpoint
            .as_ref()
            .ok_or_else(|| NormalizeError::missing("clarificationRenderer.secondaryEndpoint"))?;
        sources.push(Source {
            text: parse_text(Some(secondary), ""),
            url: origin.resolve(endpoint.external_url()?)?,
        });
    }

    Ok(Clarification {
        title: parse_text(raw.content_title.as_ref(), ""),
        text: parse_text(raw.text.as_ref(), ""),
        sources,
    })
}
