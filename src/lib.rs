//! Workspace umbrella crate for rendernorm.
//!
//! Re-exports the fragment normalizer and adds the page-level helper and the
//! YAML configuration loader used by the binary.

pub mod config;

pub use config::{ConfigLoadError, RendernormConfig};
pub use normalize::{
    Author, Channel, ChannelPreview, Clarification, ConfigError, DiagnosticsConfig, GridMovie,
    HorizontalChannelList, Image, Item, Mix, MixPreview, Movie, NestedFailurePolicy,
    NormalizeConfig, NormalizeError, Normalizer, Owner, OwnerLink, Playlist, PlaylistPreview,
    Refinement, ResponseEnvelope, Shelf, Show, Source, Video,
};

use serde_json::Value;
use tracing::info;

/// Normalizes every fragment of a page through the fault boundary, keeping
/// the records that come back, in page order.
///
/// Annotation fragments write into `envelope`; fragments that fail are logged
/// and dropped without affecting their neighbours.
pub fn normalize_page(
    normalizer: &Normalizer,
    fragments: &[Value],
    mut envelope: Option<&mut ResponseEnvelope>,
) -> Vec<Item> {
    let items: Vec<Item> = fragments
        .iter()
        .filter_map(|fragment| normalizer.normalize(fragment, envelope.as_deref_mut()))
        .collect();
    info!(
        fragments = fragments.len(),
        items = items.len(),
        "page_normalized"
    );
    items
}
