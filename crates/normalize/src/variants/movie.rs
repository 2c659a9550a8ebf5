use serde::Deserialize;

use crate::error::NormalizeError;
use crate::image::{best, prep_images};
use crate::origin::Origin;
use crate::owner::{resolve_owner, OwnerLink};
use crate::raw::{GridMovieRenderer, MovieRenderer, ShowRenderer};
use crate::text::{parse_count, parse_text, RichText};
use crate::types::{GridMovie, Movie, Show};

const META_SEPARATOR: &str = " · ";
const ACTORS_PREFIX: &str = "Actors";
const DIRECTORS_PREFIX: &str = "Director";
const BOTTOM_PANEL_OVERLAY: &str = "thumbnailOverlayBottomPanelRenderer";

/// `gridMovieRenderer` to [`GridMovie`].
pub(crate) fn normalize_grid_movie(
    raw: &GridMovieRenderer,
    origin: &Origin,
) -> Result<GridMovie, NormalizeError> {
    let thumbnails = prep_images(&raw.thumbnail.thumbnails, origin)?;
    Ok(GridMovie {
        title: parse_text(raw.title.as_ref(), ""),
        video_id: raw.video_id.clone(),
        url: origin.resolve(raw.navigation_endpoint.web_url()?)?,
        best_thumbnail: best(&thumbnails),
        thumbnails,
        duration: parse_text(raw.length_text.as_ref(), ""),
    })
}

/// `movieRenderer` to [`Movie`].
pub(crate) fn normalize_movie(raw: &MovieRenderer, origin: &Origin) -> Result<Movie, NormalizeError> {
    let bottom: Vec<String> = raw
        .bottom_metadata_items
        .iter()
        .map(|item| parse_text(Some(item), ""))
        .collect();
    let meta = parse_text(raw.top_metadata_items.first(), "")
        .split(META_SEPARATOR)
        .filter(|attr| !attr.is_empty())
        .map(str::to_string)
        .collect();
    let thumbnails = prep_images(&raw.thumbnail.thumbnails, origin)?;

    Ok(Movie {
        title: parse_text(raw.title.as_ref(), ""),
        video_id: raw.video_id.clone(),
        url: origin.resolve(raw.navigation_endpoint.web_url()?)?,
        best_thumbnail: best(&thumbnails),
        thumbnails,
        owner: resolve_owner(&raw.bylines, origin)?,
        description: parse_text(raw.description_snippet.as_ref(), ""),
        meta,
        actors: credited(&bottom, ACTORS_PREFIX),
        directors: credited(&bottom, DIRECTORS_PREFIX),
        duration: parse_text(raw.length_text.as_ref(), ""),
    })
}

/// Names listed on the first line starting with `prefix`, e.g.
/// `"Actors: A, B"`. Empty when no line matches.
fn credited(lines: &[String], prefix: &str) -> Vec<String> {
    lines
        .iter()
        .find(|line| line.starts_with(prefix))
        .and_then(|line| line.split_once(": "))
        .map(|(_, names)| names.split(", ").map(str::to_string).collect())
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct BottomPanelOverlay {
    text: RichText,
}

/// `showRenderer` to [`Show`]. The service never reliably supplies owner
/// badges for shows, so the owner is reduced to an [`OwnerLink`].
pub(crate) fn normalize_show(raw: &ShowRenderer, origin: &Origin) -> Result<Show, NormalizeError> {
    let candidates = &raw
        .thumbnail_renderer
        .show_custom_thumbnail_renderer
        .thumbnail
        .thumbnails;
    let thumbnails = prep_images(candidates, origin)?;
    let watch = raw.navigation_endpoint.watch()?;
    let owner = OwnerLink::from(resolve_owner(&raw.bylines, origin)?);

    let panel = raw
        .thumbnail_overlays
        .first()
        .and_then(|overlay| overlay.get(BOTTOM_PANEL_OVERLAY))
        .ok_or_else(|| {
            NormalizeError::missing("showRenderer.thumbnailOverlays[0].thumbnailOverlayBottomPanelRenderer")
        })?;
    let panel = BottomPanelOverlay::deserialize(panel)
        .map_err(|err| NormalizeError::Structure(format!("{BOTTOM_PANEL_OVERLAY}: {err}")))?;

    Ok(Show {
        title: parse_text(raw.title.as_ref(), ""),
        best_thumbnail: best(&thumbnails),
        thumbnails,
        url: origin.resolve(raw.navigation_endpoint.web_url()?)?,
        video_id: watch.video_id.clone(),
        playlist_id: watch.playlist_id.clone(),
        episodes: parse_count(&panel.text),
        owner,
    })
}
