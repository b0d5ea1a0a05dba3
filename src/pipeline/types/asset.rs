use serde::{Deserialize, Serialize};

use super::element::{Dimensions, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Icon,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_type: AssetKind,
    pub dimensions: Dimensions,
    pub position: Position,
    pub alt_text_intent: Option<String>,
    pub file_format: Option<String>,
}
