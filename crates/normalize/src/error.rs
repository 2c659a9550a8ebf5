//! Error types produced by the normalize crate.
//!
//! Every failure below the fault-isolation wrapper is a typed
//! [`NormalizeError`]. The wrapper ([`Normalizer::normalize`](crate::Normalizer::normalize))
//! is the only place that converts one into an absent result; everything else
//! propagates with `?`.
//!
//! # Error Categories
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`NotAFragment`](NormalizeError::NotAFragment) | Input is not an object with an own key |
//! | [`UnknownVariant`](NormalizeError::UnknownVariant) | Top-level tag outside the known vocabulary |
//! | [`UnknownSubVariant`](NormalizeError::UnknownSubVariant) | Card list whose first card tag is unknown |
//! | [`UnexpectedMessage`](NormalizeError::UnexpectedMessage) | Promo message other than the "no results" sentinel |
//! | [`UnsupportedCardListStyle`](NormalizeError::UnsupportedCardListStyle) | Preview card list whose style is not a channel list |
//! | [`Structure`](NormalizeError::Structure) | A field the service omitted or reshaped |
//! | [`MissingByline`](NormalizeError::MissingByline) | Owner resolution on a payload without a byline |
//! | [`InvalidUrl`](NormalizeError::InvalidUrl) | A service URL that cannot be resolved against the origin |
//!
//! # Examples
//!
//! ```rust
//! use normalize::NormalizeError;
//!
//! let err = NormalizeError::UnknownVariant { tag: "bogusRenderer".into() };
//! assert_eq!(err.to_string(), "fragment tag `bogusRenderer` is not known");
//! ```
use thiserror::Error;

/// Errors that can occur while normalizing a single fragment.
///
/// All variants are cloneable and comparable so tests can match on them
/// directly. The enum is `#[non_exhaustive]`; include a catch-all arm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NormalizeError {
    /// The input is not an object carrying at least one own key.
    #[error("fragment must be an object with a single tag key")]
    NotAFragment,

    /// The fragment's tag is not part of the known vocabulary.
    ///
    /// Schema drift upstream shows up here instead of being silently
    /// mis-parsed.
    #[error("fragment tag `{tag}` is not known")]
    UnknownVariant { tag: String },

    /// A horizontal card list whose first card carries an unknown tag.
    #[error("card tag `{tag}` of horizontalCardListRenderer is not known")]
    UnknownSubVariant { tag: String },

    /// A promo message whose text is not the "no results" sentinel.
    #[error("unexpected message in backgroundPromoRenderer: {text:?}")]
    UnexpectedMessage { text: String },

    /// A preview card list whose declared style does not describe channels.
    #[error("unknown style in horizontalCardListRenderer")]
    UnsupportedCardListStyle,

    /// A field was missing or had an unexpected shape.
    ///
    /// The message names the field path (or carries the serde decode error).
    #[error("unexpected structure: {0}")]
    Structure(String),

    /// The owner resolver was handed a payload that carries no byline run.
    #[error("payload carries neither shortBylineText nor longBylineText runs")]
    MissingByline,

    /// A URL supplied by the service could not be resolved.
    #[error("cannot resolve url {href:?}: {reason}")]
    InvalidUrl { href: String, reason: String },
}

impl NormalizeError {
    /// Shorthand for a [`Structure`](NormalizeError::Structure) error naming a missing field path.
    pub(crate) fn missing(path: &str) -> Self {
        NormalizeError::Structure(format!("missing field `{path}`"))
    }
}
