use serde::{Deserialize, Serialize};

/// A browsable data resource.
///
/// Datasets form a lineage tree: a derived dataset records the revision of
/// the dataset it was produced from in `origin_revision_id`. Cases reference
/// a specific dataset revision via their `dataset_revision_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub description: String,
    /// Revision of the dataset this one was derived from, if any.
    pub origin_revision_id: Option<String>,
    pub tags: Vec<String>,
}
