//! Per-variant normalizers.
//!
//! Each normalizer is a pure function from a decoded raw payload (see
//! [`crate::raw`]) to a record; none of them touch shared state. The shelf
//! and card-list normalizers recurse into nested fragments.
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::NormalizeError;

pub(crate) mod card_list;
pub(crate) mod channel;
pub(crate) mod clarification;
pub(crate) mod movie;
pub(crate) mod playlist;
pub(crate) mod shelf;
pub(crate) mod video;

/// Decodes a payload into its raw shape, naming the tag on failure.
pub(crate) fn decode<T: DeserializeOwned>(tag: &str, payload: &Value) -> Result<T, NormalizeError> {
    T::deserialize(payload).map_err(|err| NormalizeError::Structure(format!("{tag}: {err}")))
}
