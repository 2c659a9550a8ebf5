use crate::error::NormalizeError;
use crate::image::{best, prep_images};
use crate::origin::Origin;
use crate::owner::resolve_owner;
use crate::raw::{ChildVideo, NavigationEndpoint, PlaylistRenderer, RadioRenderer};
use crate::text::{parse_integer, parse_text};
use crate::types::{Mix, MixPreview, Playlist, PlaylistPreview};

/// `playlistRenderer` to [`Playlist`].
pub(crate) fn normalize_playlist(
    raw: &PlaylistRenderer,
    origin: &Origin,
) -> Result<Playlist, NormalizeError> {
    let first_video = match raw.videos.first() {
        Some(entry) => Some(playlist_preview(raw, &entry.child_video_renderer, origin)?),
        None => None,
    };

    // Some playlists (ids starting with OL) only carry a plain label as byline.
    let bare_byline = raw
        .bylines
        .short_byline_text
        .as_ref()
        .is_some_and(|text| text.simple_text.is_some());
    let owner = if bare_byline {
        None
    } else {
        Some(resolve_owner(&raw.bylines, origin)?)
    };

    Ok(Playlist {
        title: parse_text(raw.title.as_ref(), ""),
        playlist_id: raw.playlist_id.clone(),
        url: origin.playlist_url(&raw.playlist_id)?,
        first_video,
        owner,
        published_at: parse_text(raw.published_time_text.as_ref(), ""),
        length: raw
            .video_count
            .as_deref()
            .and_then(parse_integer)
            .unwrap_or_default(),
    })
}

fn playlist_preview(
    raw: &PlaylistRenderer,
    child: &ChildVideo,
    origin: &Origin,
) -> Result<PlaylistPreview, NormalizeError> {
    let endpoint = raw
        .navigation_endpoint
        .as_ref()
        .ok_or_else(|| NormalizeError::missing("playlistRenderer.navigationEndpoint"))?;
    let target = WatchTarget::from_endpoint(endpoint, origin)?;
    let candidates = raw
        .thumbnails
        .first()
        .ok_or_else(|| NormalizeError::missing("playlistRenderer.thumbnails[0]"))?;
    let thumbnails = prep_images(&candidates.thumbnails, origin)?;

    Ok(PlaylistPreview {
        id: target.id,
        short_url: target.short_url,
        url: target.url,
        title: parse_text(child.title.as_ref(), ""),
        length: parse_text(child.length_text.as_ref(), ""),
        best_thumbnail: best(&thumbnails),
        thumbnails,
    })
}

/// `radioRenderer` to [`Mix`]. Mixes always carry their first video.
pub(crate) fn normalize_mix(raw: &RadioRenderer, origin: &Origin) -> Result<Mix, NormalizeError> {
    let child = raw
        .videos
        .first()
        .map(|entry| &entry.child_video_renderer)
        .ok_or_else(|| NormalizeError::missing("radioRenderer.videos[0]"))?;
    let target = WatchTarget::from_endpoint(&raw.navigation_endpoint, origin)?;
    let thumbnails = prep_images(&raw.thumbnail.thumbnails, origin)?;

    Ok(Mix {
        title: parse_text(raw.title.as_ref(), ""),
        url: target.url.clone(),
        first_video: MixPreview {
            id: target.id,
            short_url: target.short_url,
            url: target.url,
            text: parse_text(child.title.as_ref(), ""),
            length: parse_text(child.length_text.as_ref(), ""),
            best_thumbnail: best(&thumbnails),
            thumbnails,
        },
    })
}

/// The video a playlist-like endpoint starts playing.
struct WatchTarget {
    id: String,
    short_url: String,
    url: String,
}

impl WatchTarget {
    fn from_endpoint(endpoint: &NavigationEndpoint, origin: &Origin) -> Result<Self, NormalizeError> {
        let id = endpoint.watch()?.video_id.clone();
        Ok(Self {
            short_url: origin.watch_url(&id)?,
            url: origin.resolve(endpoint.web_url()?)?,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use url::Url;

    use super::*;

    fn origin() -> Origin {
        Origin::new(Url::parse("https://www.youtube.com/").expect("static base url parses"))
    }

    fn endpoint() -> Value {
        json!({
            "watchEndpoint": {"videoId": "first", "playlistId": "PL1"},
            "commandMetadata": {"webCommandMetadata": {"url": "/watch?v=first&list=PL1"}}
        })
    }

    fn owner_run() -> Value {
        json!({"runs": [{
            "text": "Curator",
            "navigationEndpoint": {
                "browseEndpoint": {"browseId": "UCcurator", "canonicalBaseUrl": "/@curator"}
            }
        }]})
    }

    #[test]
    fn playlist_with_first_video_and_owner() {
        let raw: PlaylistRenderer = serde_json::from_value(json!({
            "playlistId": "PL1",
            "title": {"simpleText": "Best of"},
            "videos": [{"childVideoRenderer": {
                "title": {"simpleText": "Opener"},
                "lengthText": {"simpleText": "3:33"}
            }}],
            "navigationEndpoint": endpoint(),
            "thumbnails": [{"thumbnails": [{"url": "https://i.ytimg.com/p.jpg", "width": 336, "height": 188}]}],
            "shortBylineText": owner_run(),
            "videoCount": "42"
        }))
        .expect("playlist renderer decodes");

        let playlist = normalize_playlist(&raw, &origin()).expect("playlist normalizes");
        assert_eq!(playlist.url, "https://www.youtube.com/playlist?list=PL1");
        assert_eq!(playlist.length, 42);

        let first = playlist.first_video.expect("first video present");
        assert_eq!(first.id, "first");
        assert_eq!(first.short_url, "https://www.youtube.com/watch?v=first");
        assert_eq!(first.url, "https://www.youtube.com/watch?v=first&list=PL1");
        assert_eq!(first.title, "Opener");
        assert_eq!(first.length, "3:33");
        assert_eq!(first.best_thumbnail, first.thumbnails.first().cloned());

        let owner = playlist.owner.expect("owner present");
        assert_eq!(owner.name, "Curator");
        assert_eq!(owner.url, "https://www.youtube.com/@curator");
    }

    #[test]
    fn bare_byline_and_empty_videos() {
        let raw: PlaylistRenderer = serde_json::from_value(json!({
            "playlistId": "OLAK5",
            "title": {"simpleText": "Album"},
            "videos": [],
            "shortBylineText": {"simpleText": "Album"},
            "videoCount": "12"
        }))
        .expect("playlist renderer decodes");

        let playlist = normalize_playlist(&raw, &origin()).expect("playlist normalizes");
        assert_eq!(playlist.first_video, None);
        assert_eq!(playlist.owner, None);
        assert_eq!(playlist.length, 12);
    }

    #[test]
    fn mix_first_video_uses_text() {
        let raw: RadioRenderer = serde_json::from_value(json!({
            "title": {"simpleText": "Mix - Artist"},
            "navigationEndpoint": endpoint(),
            "videos": [{"childVideoRenderer": {"title": {"simpleText": "Song"}}}],
            "thumbnail": {"thumbnails": [{"url": "https://i.ytimg.com/m.jpg", "width": 480, "height": 270}]}
        }))
        .expect("radio renderer decodes");

        let mix = normalize_mix(&raw, &origin()).expect("mix normalizes");
        assert_eq!(mix.url, "https://www.youtube.com/watch?v=first&list=PL1");
        assert_eq!(mix.first_video.text, "Song");
        assert_eq!(mix.first_video.length, "");
        assert_eq!(mix.first_video.thumbnails.len(), 1);
    }

    #[test]
    fn mix_without_videos_is_structural() {
        let raw: RadioRenderer = serde_json::from_value(json!({
            "navigationEndpoint": endpoint(),
            "thumbnail": {"thumbnails": []}
        }))
        .expect("radio renderer decodes");

        let err = normalize_mix(&raw, &origin()).unwrap_err();
        assert!(matches!(err, NormalizeError::Structure(msg) if msg.contains("videos")));
    }
}
