//! Shared types serialized between the batch pipeline and its manifests.

use serde::{Deserialize, Serialize};

fn default_category() -> String {
    "geral".to_string()
}

/// One unit of batch input: an article title plus its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverRequest {
    pub title: String,
    /// Category label used for template resolution. Optional in manifests;
    /// absent means the generic category.
    #[serde(default = "default_category")]
    pub category: String,
}

/// One unit of batch output: where the cover landed and whether it was
/// already cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverRecord {
    pub title: String,
    pub category: String,
    pub path: String,
    pub cached: bool,
}
