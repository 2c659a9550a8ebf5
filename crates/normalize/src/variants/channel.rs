use crate::error::NormalizeError;
use crate::image::{best, prep_images};
use crate::origin::Origin;
use crate::owner::is_verified;
use crate::raw::ChannelRenderer;
use crate::text::{parse_count, parse_text};
use crate::types::Channel;

/// `channelRenderer` to [`Channel`].
pub(crate) fn normalize(raw: &ChannelRenderer, origin: &Origin) -> Result<Channel, NormalizeError> {
    let url = origin.resolve(raw.navigation_endpoint.channel_url()?)?;
    let avatars = prep_images(&raw.thumbnail.thumbnails, origin)?;

    Ok(Channel {
        name: parse_text(raw.title.as_ref(), ""),
        channel_id: raw.channel_id.clone(),
        url,
        best_avatar: best(&avatars),
        avatars,
        verified: is_verified(&raw.owner_badges),
        subscribers: parse_text(raw.subscriber_count_text.as_ref(), ""),
        description_short: parse_text(raw.description_snippet.as_ref(), ""),
        videos: raw.video_count_text.as_ref().and_then(parse_count),
    })
}
