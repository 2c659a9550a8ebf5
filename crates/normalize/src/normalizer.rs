use std::env::consts::{ARCH, OS};
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, warn, Level};

use crate::config::{ConfigError, NormalizeConfig};
use crate::dump::write_artifact;
use crate::error::NormalizeError;
use crate::origin::Origin;
use crate::types::{Item, ResponseEnvelope};

/// Normalizes renderer fragments into [`Item`]s.
///
/// Holds a validated configuration and the origin URLs are resolved against.
/// A `Normalizer` has no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizeConfig,
    origin: Origin,
}

impl Normalizer {
    /// Validates `config` and builds a normalizer from it.
    pub fn new(config: NormalizeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let origin = Origin::new(config.parsed_base_url()?);
        Ok(Self { config, origin })
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Normalizes one fragment, turning any failure into `None`.
    ///
    /// This is the fault boundary: on failure the arguments are dumped (when
    /// diagnostics are enabled), a single error event is logged, and the
    /// caller's page loop carries on. `None` is also returned for fragments
    /// that legitimately produce no record, such as ads and annotations.
    ///
    /// ```rust
    /// use normalize::{NormalizeConfig, Normalizer, ResponseEnvelope};
    /// use serde_json::json;
    ///
    /// let normalizer = Normalizer::new(NormalizeConfig::default()).unwrap();
    /// let mut envelope = ResponseEnvelope::default();
    /// let fragment = json!({"showingResultsForRenderer": {"correctedQuery": {"simpleText": "rust"}}});
    ///
    /// assert_eq!(normalizer.normalize(&fragment, Some(&mut envelope)), None);
    /// assert_eq!(envelope.corrected_query.as_deref(), Some("rust"));
    /// ```
    pub fn normalize(
        &self,
        fragment: &Value,
        mut envelope: Option<&mut ResponseEnvelope>,
    ) -> Option<Item> {
        let start = Instant::now();
        let tag = tag_hint(fragment);
        let span = tracing::span!(Level::DEBUG, "normalize.item", tag);
        let _guard = span.enter();

        match self.route(fragment, envelope.as_deref_mut()) {
            Ok(item) => {
                let elapsed_micros = start.elapsed().as_micros();
                debug!(
                    kind = item.as_ref().map(Item::kind),
                    elapsed_micros,
                    "normalize_success"
                );
                item
            }
            Err(err) => {
                let elapsed_micros = start.elapsed().as_micros();
                self.report_failure(&err, fragment, envelope.as_deref(), elapsed_micros);
                None
            }
        }
    }

    fn report_failure(
        &self,
        err: &NormalizeError,
        fragment: &Value,
        envelope: Option<&ResponseEnvelope>,
        elapsed_micros: u128,
    ) {
        let diagnostics = &self.config.diagnostics;
        let dump = if diagnostics.enabled {
            match write_artifact(&diagnostics.dump_dir, fragment, envelope) {
                Ok(path) => Some(path.display().to_string()),
                Err(dump_err) => {
                    warn!(
                        dir = %diagnostics.dump_dir.display(),
                        error = %dump_err,
                        "dump_failure"
                    );
                    None
                }
            }
        } else {
            None
        };

        error!(
            func = "route",
            error = %err,
            os = OS,
            arch = ARCH,
            rust_version = env!("CARGO_PKG_RUST_VERSION"),
            version = env!("CARGO_PKG_VERSION"),
            dump = dump.as_deref(),
            report_to = diagnostics.issues_url.as_deref(),
            elapsed_micros,
            "normalize_failure"
        );
    }
}

/// The fragment's tag for log context, or `""` when it has none.
fn tag_hint(fragment: &Value) -> &str {
    fragment
        .as_object()
        .and_then(|map| map.keys().next())
        .map_or("", String::as_str)
}
