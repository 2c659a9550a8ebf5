use serde_json::Value;

use crate::config::NestedFailurePolicy;
use crate::error::NormalizeError;
use crate::normalizer::Normalizer;
use crate::raw::ShelfRenderer;
use crate::text::parse_text;
use crate::types::Shelf;

const DEFAULT_TITLE: &str = "Show More";

/// `shelfRenderer` / `richShelfRenderer` to [`Shelf`].
///
/// Children are routed one by one in order; absent results are dropped. With
/// [`NestedFailurePolicy::Propagate`] children bypass the fault-isolation
/// wrapper, so one malformed child fails the whole shelf.
pub(crate) fn normalize(normalizer: &Normalizer, raw: &ShelfRenderer) -> Result<Shelf, NormalizeError> {
    let children = children(raw)?;
    let policy = normalizer.config().nested_failures;

    let mut items = Vec::with_capacity(children.len());
    for child in children {
        let item = match policy {
            NestedFailurePolicy::Propagate => normalizer.route(child, None)?,
            NestedFailurePolicy::Isolate => normalizer.normalize(child, None),
        };
        items.extend(item);
    }

    Ok(Shelf {
        title: parse_text(raw.title.as_ref(), DEFAULT_TITLE),
        items,
    })
}

/// The nested fragments of either container shape.
fn children(raw: &ShelfRenderer) -> Result<Vec<&Value>, NormalizeError> {
    if let Some(contents) = raw.contents.as_ref() {
        return Ok(contents
            .iter()
            .map(|entry| &entry.rich_item_renderer.content)
            .collect());
    }

    let content = raw
        .content
        .as_ref()
        .ok_or_else(|| NormalizeError::missing("shelfRenderer.content"))?;
    content
        .vertical_list_renderer
        .as_ref()
        .or(content.horizontal_movie_list_renderer.as_ref())
        .map(|list| list.items.iter().collect())
        .ok_or_else(|| NormalizeError::missing("shelfRenderer.content.verticalListRenderer"))
}
