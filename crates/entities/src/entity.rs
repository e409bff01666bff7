//! The generic entity abstraction shared by every collection.

use std::fmt::Debug;

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

/// A persisted record type with an integer identity.
///
/// Each entity comes with two companion shapes:
/// - [`Entity::Base`]: every field except `id`, used as creation input.
/// - [`Entity::Patch`]: the same fields, all optional, used for partial
///   updates. Fields left out of a patch keep their stored value.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Creation input (all fields except `id`).
    type Base: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Partial-update input.
    type Patch: Clone + Debug + Default + DeserializeOwned + Send + Sync + 'static;

    /// Human-readable entity name, used in error messages ("User not found").
    const NAME: &'static str;

    /// Collection name, used as the HTTP path segment and table name.
    const COLLECTION: &'static str;

    /// Returns the identity of this record.
    fn id(&self) -> i64;

    /// Builds a persisted record from its base fields and an assigned id.
    fn from_base(id: i64, base: Self::Base) -> Self;

    /// Merges the fields present in `patch` into this record.
    ///
    /// The identity is never touched.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Deserializes a present value (including `null`) as `Some`.
///
/// Combined with `#[serde(default)]` on an `Option<Option<T>>` field this
/// distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`).
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
