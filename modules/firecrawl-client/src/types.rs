use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<Vec<SearchDoc>>,
    pub error: Option<String>,
}

/// One document as returned by the search endpoint. All fields are optional
/// on the wire; callers substitute empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchDoc {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScrapeRequest {
    pub url: String,
    pub formats: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<ScrapeData>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeData {
    pub markdown: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_decodes_sparse_docs() {
        let json = r#"{"success":true,"data":[{"url":"https://a.example"},{"title":"t","description":"d"}]}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        let docs = resp.data.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].url.as_deref(), Some("https://a.example"));
        assert!(docs[0].title.is_none());
        assert!(docs[1].url.is_none());
    }

    #[test]
    fn scrape_response_decodes_failure_body() {
        let json = r#"{"success":false,"error":"blocked by robots"}"#;
        let resp: ScrapeResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("blocked by robots"));
        assert!(resp.data.is_none());
    }

    #[test]
    fn scrape_response_tolerates_missing_markdown() {
        let json = r#"{"success":true,"data":{}}"#;
        let resp: ScrapeResponse = serde_json::from_str(json).unwrap();
        assert!(resp.data.unwrap().markdown.is_none());
    }
}
