use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Revision-tracking metadata carried by every stored resource.
///
/// `resource_id` is stable across revisions; `revision_id` changes on every
/// edit. A collection holds at most one live `Resource<T>` per `resource_id`
/// (current-revision pointer semantics).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceMeta {
    /// Username of the creator.
    pub creator: String,
    pub created_time: DateTime<Utc>,
    /// Username of the last editor.
    pub updater: String,
    pub updated_time: DateTime<Utc>,
    /// Stable identifier, unique within a collection.
    pub resource_id: String,
    /// Opaque identifier of the current revision.
    pub revision_id: String,
}

/// A domain payload together with its revision metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource<T> {
    pub meta: ResourceMeta,
    pub data: T,
}

impl<T> Resource<T> {
    /// The stable resource identifier.
    pub fn id(&self) -> &str {
        &self.meta.resource_id
    }
}
