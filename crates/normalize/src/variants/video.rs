use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::NormalizeError;
use crate::image::{best, prep_images};
use crate::origin::Origin;
use crate::owner::{badge_tooltips, is_verified, resolve_link, Author};
use crate::raw::{EpochSeconds, VideoRenderer};
use crate::text::{parse_count, parse_text, RichText, TextRun};
use crate::types::Video;

const LIVE_BADGE: &str = "LIVE NOW";
const TIME_STATUS_OVERLAY: &str = "thumbnailOverlayTimeStatusRenderer";

#[derive(Deserialize)]
struct TimeStatusOverlay {
    text: Option<RichText>,
}

/// `videoRenderer` / `gridVideoRenderer` to [`Video`].
pub(crate) fn normalize(raw: &VideoRenderer, origin: &Origin) -> Result<Video, NormalizeError> {
    let author = raw
        .owner_text
        .as_ref()
        .and_then(RichText::first_run)
        .map(|run| author(raw, run, origin))
        .transpose()?;

    let badges: Vec<String> = raw
        .badges
        .iter()
        .filter_map(|badge| badge.metadata_badge_renderer.label.clone())
        .collect();
    let is_live = badges.iter().any(|badge| badge == LIVE_BADGE);

    let upcoming = raw
        .upcoming_event_data
        .as_ref()
        .map(|event| epoch_millis(&event.start_time))
        .transpose()?;

    let overlay_length = match raw.length_text {
        Some(_) => None,
        None => time_status_text(&raw.thumbnail_overlays)?,
    };
    let length = raw.length_text.as_ref().or(overlay_length.as_ref());

    let thumbnails = prep_images(&raw.thumbnail.thumbnails, origin)?;

    Ok(Video {
        title: parse_text(raw.title.as_ref(), ""),
        id: raw.video_id.clone(),
        url: origin.watch_url(&raw.video_id)?,
        best_thumbnail: best(&thumbnails),
        thumbnails,
        is_upcoming: upcoming.is_some(),
        upcoming,
        is_live,
        badges,
        author,
        description: parse_text(raw.description_snippet.as_ref(), ""),
        views: raw.view_count_text.as_ref().and_then(parse_count),
        duration: parse_text(length, ""),
        uploaded_at: parse_text(raw.published_time_text.as_ref(), ""),
    })
}

fn author(raw: &VideoRenderer, run: &TextRun, origin: &Origin) -> Result<Author, NormalizeError> {
    let link = resolve_link(run, origin)?;
    let holder = raw
        .channel_thumbnail_supported_renderers
        .as_ref()
        .ok_or_else(|| NormalizeError::missing("channelThumbnailSupportedRenderers"))?;
    let avatars = prep_images(
        &holder.channel_thumbnail_with_link_renderer.thumbnail.thumbnails,
        origin,
    )?;

    Ok(Author {
        name: link.name,
        channel_id: link.channel_id,
        url: link.url,
        best_avatar: best(&avatars),
        avatars,
        owner_badges: badge_tooltips(&raw.owner_badges),
        verified: is_verified(&raw.owner_badges),
    })
}

/// Epoch seconds to epoch milliseconds.
fn epoch_millis(start: &EpochSeconds) -> Result<i64, NormalizeError> {
    let seconds = match start {
        EpochSeconds::Number(seconds) => *seconds,
        EpochSeconds::Text(text) => text.trim().parse().map_err(|_| {
            NormalizeError::Structure(format!(
                "upcomingEventData.startTime {text:?} is not epoch seconds"
            ))
        })?,
    };
    DateTime::from_timestamp(seconds, 0)
        .map(|start| start.timestamp_millis())
        .ok_or_else(|| {
            NormalizeError::Structure(format!(
                "upcomingEventData.startTime {seconds} is out of range"
            ))
        })
}

/// Text of the first time-status overlay, if any.
fn time_status_text(overlays: &[Value]) -> Result<Option<RichText>, NormalizeError> {
    let Some(overlay) = overlays.iter().find_map(|overlay| {
        overlay
            .as_object()
            .and_then(|map| map.iter().next())
            .filter(|(key, _)| key.as_str() == TIME_STATUS_OVERLAY)
            .map(|(_, payload)| payload)
    }) else {
        return Ok(None);
    };
    let overlay = TimeStatusOverlay::deserialize(overlay)
        .map_err(|err| NormalizeError::Structure(format!("{TIME_STATUS_OVERLAY}: {err}")))?;
    Ok(overlay.text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;

    fn origin() -> Origin {
        Origin::new(Url::parse("https://www.youtube.com/").expect("static base url parses"))
    }

    fn raw(mut overrides: Value) -> VideoRenderer {
        let mut base = json!({
            "videoId": "vid1",
            "title": {"runs": [{"text": "A video"}]},
            "thumbnail": {"thumbnails": [
                {"url": "https://i.ytimg.com/vi/vid1/default.jpg", "width": 120, "height": 90},
                {"url": "https://i.ytimg.com/vi/vid1/hq.jpg", "width": 480, "height": 360}
            ]},
            "ownerText": {"runs": [{
                "text": "Owner",
                "navigationEndpoint": {
                    "browseEndpoint": {"browseId": "UCowner", "canonicalBaseUrl": "/@owner"},
                    "commandMetadata": {"webCommandMetadata": {"url": "/channel/UCowner"}}
                }
            }]},
            "channelThumbnailSupportedRenderers": {"channelThumbnailWithLinkRenderer": {
                "thumbnail": {"thumbnails": [{"url": "https://yt3.ggpht.com/a.jpg", "width": 68, "height": 68}]}
            }},
            "descriptionSnippet": {"runs": [{"text": "desc"}]},
            "viewCountText": {"simpleText": "1,234 views"},
            "lengthText": {"simpleText": "4:20"},
            "publishedTimeText": {"simpleText": "2 days ago"},
            "thumbnailOverlays": []
        });
        if let (Some(base), Some(overrides)) = (base.as_object_mut(), overrides.as_object_mut()) {
            for (key, value) in std::mem::take(overrides) {
                if value.is_null() {
                    base.remove(&key);
                } else {
                    base.insert(key, value);
                }
            }
        }
        serde_json::from_value(base).expect("video renderer decodes")
    }

    #[test]
    fn full_video() {
        let video = normalize(&raw(json!({})), &origin()).expect("video normalizes");
        assert_eq!(video.title, "A video");
        assert_eq!(video.url, "https://www.youtube.com/watch?v=vid1");
        assert_eq!(video.thumbnails[0].width, 480);
        assert_eq!(video.best_thumbnail, Some(video.thumbnails[0].clone()));
        assert_eq!(video.views, Some(1_234));
        assert_eq!(video.duration, "4:20");
        assert_eq!(video.uploaded_at, "2 days ago");
        assert!(!video.is_live);
        assert!(!video.is_upcoming);

        let author = video.author.expect("author present");
        assert_eq!(author.channel_id, "UCowner");
        assert_eq!(author.url, "https://www.youtube.com/@owner");
        assert_eq!(author.avatars.len(), 1);
        assert!(!author.verified);
    }

    #[test]
    fn missing_owner_means_no_author_and_no_avatar_lookup() {
        let video = normalize(
            &raw(json!({"ownerText": null, "channelThumbnailSupportedRenderers": null})),
            &origin(),
        )
        .expect("video normalizes");
        assert_eq!(video.author, None);
    }

    #[test]
    fn owner_without_avatar_holder_is_structural() {
        let err = normalize(
            &raw(json!({"channelThumbnailSupportedRenderers": null})),
            &origin(),
        )
        .unwrap_err();
        assert!(matches!(err, NormalizeError::Structure(msg) if msg.contains("channelThumbnail")));
    }

    #[test]
    fn live_badge_sets_live() {
        let video = normalize(
            &raw(json!({
                "badges": [
                    {"metadataBadgeRenderer": {"label": "New"}},
                    {"metadataBadgeRenderer": {"label": "LIVE NOW", "style": "BADGE_STYLE_TYPE_LIVE_NOW"}}
                ],
                "lengthText": null
            })),
            &origin(),
        )
        .expect("video normalizes");
        assert!(video.is_live);
        assert_eq!(video.badges, ["New", "LIVE NOW"]);
        assert_eq!(video.duration, "");
    }

    #[test]
    fn malformed_badges_become_empty() {
        let video = normalize(&raw(json!({"badges": {"oops": true}})), &origin())
            .expect("video normalizes");
        assert!(video.badges.is_empty());
    }

    #[test]
    fn upcoming_start_time_in_millis() {
        let video = normalize(
            &raw(json!({"upcomingEventData": {"startTime": "1700000000"}})),
            &origin(),
        )
        .expect("video normalizes");
        assert_eq!(video.upcoming, Some(1_700_000_000_000));
        assert!(video.is_upcoming);
    }

    #[test]
    fn garbage_start_time_is_structural() {
        let err = normalize(
            &raw(json!({"upcomingEventData": {"startTime": "soon"}})),
            &origin(),
        )
        .unwrap_err();
        assert!(matches!(err, NormalizeError::Structure(_)));
    }

    #[test]
    fn duration_falls_back_to_time_status_overlay() {
        let video = normalize(
            &raw(json!({
                "lengthText": null,
                "thumbnailOverlays": [
                    {"thumbnailOverlayNowPlayingRenderer": {}},
                    {"thumbnailOverlayTimeStatusRenderer": {"text": {"simpleText": "12:01"}}}
                ]
            })),
            &origin(),
        )
        .expect("video normalizes");
        assert_eq!(video.duration, "12:01");
    }

    #[test]
    fn verified_owner_badge() {
        let video = normalize(
            &raw(json!({
                "ownerBadges": [{"metadataBadgeRenderer": {
                    "style": "BADGE_STYLE_TYPE_VERIFIED",
                    "tooltip": "Verified"
                }}]
            })),
            &origin(),
        )
        .expect("video normalizes");
        let author = video.author.expect("author present");
        assert!(author.verified);
        assert_eq!(author.owner_badges, ["Verified"]);
    }
}
