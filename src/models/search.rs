use serde::Serialize;

/// Projection returned by the search endpoint. Computed per query, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
}
