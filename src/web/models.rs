// Request and response bodies of the gateway endpoints

use serde::{Deserialize, Serialize};

/// Response to POST /upload/image, in the host's image reference shape
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub name: String,
    pub subfolder: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl UploadResponse {
    pub fn input(name: String) -> Self {
        Self {
            name,
            subfolder: String::new(),
            kind: "input".to_string(),
        }
    }
}

/// Response to POST /prompt
#[derive(Serialize, Debug, Clone)]
pub struct PromptAccepted {
    pub status: &'static str,
}

impl PromptAccepted {
    pub const ACCEPTED: Self = Self { status: "accepted" };
}

/// Query parameters of GET /history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub client_id: Option<String>,
}

impl HistoryQuery {
    /// Builds the query from raw pairs; a repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let client_id = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "client_id").then_some(value));
        Self { client_id }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryImage {
    pub url: String,
    pub filename: String,
}

/// Response to GET /history
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HistoryResponse {
    pub images: Vec<HistoryImage>,
}
