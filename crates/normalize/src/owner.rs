//! Owner/byline resolution shared by several variants.
//!
//! Playlists, movies and shows carry their owner as a byline run; videos carry
//! it as `ownerText`. Both resolve the same way: first run, browse id, and a
//! URL taken from the canonical base URL with the web command URL as fallback.
//!
//! Owners are either fully populated or absent. There is no partially filled
//! owner record.
use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::image::Image;
use crate::origin::Origin;
use crate::raw::{Badge, Bylines};
use crate::text::TextRun;

/// Markers whose presence in a badge marks its owner as verified.
const VERIFIED_MARKERS: [&str; 2] = ["OFFICIAL", "VERIFIED"];

/// Byline reference of a playlist or movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub name: String,
    #[serde(rename = "channelID")]
    pub channel_id: String,
    pub url: String,
    pub owner_badges: Vec<String>,
    pub verified: bool,
}

/// Owner without badge information; used where the service never supplies
/// badges reliably (shows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerLink {
    pub name: String,
    #[serde(rename = "channelID")]
    pub channel_id: String,
    pub url: String,
}

impl From<Owner> for OwnerLink {
    fn from(owner: Owner) -> Self {
        Self {
            name: owner.name,
            channel_id: owner.channel_id,
            url: owner.url,
        }
    }
}

/// Author of a video, with avatars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(rename = "channelID")]
    pub channel_id: String,
    pub url: String,
    pub best_avatar: Option<Image>,
    pub avatars: Vec<Image>,
    pub owner_badges: Vec<String>,
    pub verified: bool,
}

/// Resolves the owner of a payload from its short byline, falling back to the
/// long byline.
///
/// Callers only invoke this on payloads known to carry a byline; a payload
/// without one yields [`NormalizeError::MissingByline`].
pub(crate) fn resolve_owner(bylines: &Bylines, origin: &Origin) -> Result<Owner, NormalizeError> {
    let run = bylines
        .short_byline_text
        .as_ref()
        .and_then(|text| text.first_run())
        .or_else(|| {
            bylines
                .long_byline_text
                .as_ref()
                .and_then(|text| text.first_run())
        })
        .ok_or(NormalizeError::MissingByline)?;

    let link = resolve_link(run, origin)?;
    Ok(Owner {
        name: link.name,
        channel_id: link.channel_id,
        url: link.url,
        owner_badges: badge_tooltips(&bylines.owner_badges),
        verified: is_verified(&bylines.owner_badges),
    })
}

/// Name, browse id and absolute channel URL of a byline run.
pub(crate) fn resolve_link(run: &TextRun, origin: &Origin) -> Result<OwnerLink, NormalizeError> {
    let endpoint = run
        .navigation_endpoint
        .as_ref()
        .ok_or_else(|| NormalizeError::missing("runs[0].navigationEndpoint"))?;
    Ok(OwnerLink {
        name: run.text.clone(),
        channel_id: endpoint.browse()?.browse_id.clone(),
        url: origin.resolve(endpoint.channel_url()?)?,
    })
}

/// Tooltips of an owner-badge list, in order; badges without one are skipped.
pub(crate) fn badge_tooltips(badges: &[Badge]) -> Vec<String> {
    badges
        .iter()
        .filter_map(|badge| badge.metadata_badge_renderer.tooltip.clone())
        .collect()
}

/// Whether any badge carries an "official" or "verified" marker in its style,
/// icon, tooltip or label. An empty list is not verified.
pub(crate) fn is_verified(badges: &[Badge]) -> bool {
    badges.iter().any(|badge| {
        let renderer = &badge.metadata_badge_renderer;
        let icon = renderer
            .icon
            .as_ref()
            .and_then(|icon| icon.icon_type.as_deref());
        [
            renderer.style.as_deref(),
            icon,
            renderer.tooltip.as_deref(),
            renderer.label.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| VERIFIED_MARKERS.iter().any(|marker| field.contains(marker)))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;

    fn origin() -> Origin {
        Origin::new(Url::parse("https://www.youtube.com/").expect("static base url parses"))
    }

    fn bylines(value: serde_json::Value) -> Bylines {
        serde_json::from_value(value).expect("bylines decode")
    }

    fn run(name: &str, canonical: Option<&str>) -> serde_json::Value {
        let mut browse = json!({"browseId": format!("UC-{name}")});
        if let Some(canonical) = canonical {
            browse["canonicalBaseUrl"] = json!(canonical);
        }
        json!({
            "text": name,
            "navigationEndpoint": {
                "browseEndpoint": browse,
                "commandMetadata": {"webCommandMetadata": {"url": format!("/channel/UC-{name}")}}
            }
        })
    }

    #[test]
    fn short_byline_preferred() {
        let owner = resolve_owner(
            &bylines(json!({
                "shortBylineText": {"runs": [run("short", Some("/@short"))]},
                "longBylineText": {"runs": [run("long", None)]}
            })),
            &origin(),
        )
        .expect("owner resolves");
        assert_eq!(owner.name, "short");
        assert_eq!(owner.channel_id, "UC-short");
        assert_eq!(owner.url, "https://www.youtube.com/@short");
        assert!(!owner.verified);
        assert!(owner.owner_badges.is_empty());
    }

    #[test]
    fn long_byline_fallback_uses_web_command_url() {
        let owner = resolve_owner(
            &bylines(json!({"longBylineText": {"runs": [run("long", None)]}})),
            &origin(),
        )
        .expect("owner resolves");
        assert_eq!(owner.url, "https://www.youtube.com/channel/UC-long");
    }

    #[test]
    fn no_byline_is_a_contract_violation() {
        let err = resolve_owner(&bylines(json!({})), &origin()).unwrap_err();
        assert_eq!(err, NormalizeError::MissingByline);
    }

    #[test]
    fn official_style_marks_verified() {
        let owner = resolve_owner(
            &bylines(json!({
                "shortBylineText": {"runs": [run("artist", None)]},
                "ownerBadges": [{
                    "metadataBadgeRenderer": {
                        "icon": {"iconType": "OFFICIAL_ARTIST_BADGE"},
                        "style": "BADGE_STYLE_TYPE_VERIFIED_ARTIST",
                        "tooltip": "Official Artist Channel"
                    }
                }]
            })),
            &origin(),
        )
        .expect("owner resolves");
        assert!(owner.verified);
        assert_eq!(owner.owner_badges, ["Official Artist Channel"]);
    }

    #[test]
    fn unrelated_badges_do_not_verify() {
        let badges: Vec<Badge> = serde_json::from_value(json!([
            {"metadataBadgeRenderer": {"style": "BADGE_STYLE_TYPE_SIMPLE", "label": "4K"}}
        ]))
        .expect("badges decode");
        assert!(!is_verified(&badges));
        assert!(!is_verified(&[]));
    }

    #[test]
    fn show_owner_drops_badge_fields() {
        let owner = Owner {
            name: "n".into(),
            channel_id: "c".into(),
            url: "https://www.youtube.com/c".into(),
            owner_badges: vec!["Verified".into()],
            verified: true,
        };
        let link = OwnerLink::from(owner);
        let value = serde_json::to_value(&link).expect("link serializes");
        assert!(value.get("verified").is_none());
        assert!(value.get("ownerBadges").is_none());
        assert_eq!(value["channelID"], "c");
    }
}
