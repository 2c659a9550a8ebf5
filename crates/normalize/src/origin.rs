//! URL resolution against the service origin.
//!
//! The service hands out a mix of absolute, root-relative (`/channel/abc`) and
//! protocol-relative (`//i.ytimg.com/...`) URLs. Every `url` field in a record
//! goes through [`Origin::resolve`] so records only ever carry absolute URLs.
use url::Url;

use crate::error::NormalizeError;

/// The base every service URL is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    base: Url,
}

impl Origin {
    pub(crate) fn new(base: Url) -> Self {
        Self { base }
    }

    /// Resolves `href` against the origin, leaving absolute inputs untouched
    /// apart from serialization.
    ///
    /// ```rust
    /// use normalize::{NormalizeConfig, Normalizer};
    ///
    /// let normalizer = Normalizer::new(NormalizeConfig::default()).unwrap();
    /// let origin = normalizer.origin();
    /// assert_eq!(
    ///     origin.resolve("/channel/abc").unwrap(),
    ///     "https://www.youtube.com/channel/abc"
    /// );
    /// ```
    pub fn resolve(&self, href: &str) -> Result<String, NormalizeError> {
        self.base
            .join(href)
            .map(String::from)
            .map_err(|err| NormalizeError::InvalidUrl {
                href: href.to_string(),
                reason: err.to_string(),
            })
    }

    /// `<origin>/watch?v=<id>`
    pub fn watch_url(&self, video_id: &str) -> Result<String, NormalizeError> {
        self.with_query("/watch", "v", video_id)
    }

    /// `<origin>/playlist?list=<id>`
    pub fn playlist_url(&self, playlist_id: &str) -> Result<String, NormalizeError> {
        self.with_query("/playlist", "list", playlist_id)
    }

    fn with_query(&self, path: &str, key: &str, value: &str) -> Result<String, NormalizeError> {
        let mut url = self.base.join(path).map_err(|err| NormalizeError::InvalidUrl {
            href: path.to_string(),
            reason: err.to_string(),
        })?;
        url.query_pairs_mut().clear().append_pair(key, value);
        Ok(url.into())
    }
}
