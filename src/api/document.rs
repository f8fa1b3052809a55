//! Wire types for the content API
//!
//! The API is a Prismic-style document store: a predicate query returns a
//! page of typed documents plus a `next_page` cursor, and the cursor is
//! itself a plain fetchable URL returning the same page shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of query results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub results: Vec<Document>,
    /// Cursor URL for the next page; `None` means this was the final page
    #[serde(default)]
    pub next_page: Option<String>,
}

/// A document as returned by the content repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub uid: String,
    /// Publication timestamp; null for unpublished previews
    #[serde(default)]
    pub first_publication_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: DocumentData,
}

/// The `data` payload of a post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<ContentSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub url: String,
}

/// A heading plus its rich-text body blocks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    pub heading: String,
    pub body: Vec<RichTextBlock>,
}

/// A structured rich-text unit (paragraph, heading, list item, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextBlock {
    /// Block type tag, e.g. "paragraph", "heading2", "list-item"
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    /// Source URL for image blocks
    pub url: Option<String>,
}

impl RichTextBlock {
    /// Plain-text block of the given kind (handy in tests and fixtures)
    pub fn new(kind: &str, text: &str) -> Self {
        Self {
            kind: kind.to_string(),
            text: text.to_string(),
            url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page_response() {
        let json = r#"{
            "page": 1,
            "results_per_page": 1,
            "next_page": "https://example.cdn.prismic.io/api/v2/documents/search?page=2",
            "results": [
                {
                    "uid": "my-first-post",
                    "type": "posts",
                    "first_publication_date": "2021-03-01T10:00:00+00:00",
                    "data": {
                        "title": "My first post",
                        "subtitle": "Hello world",
                        "author": "Jane Doe"
                    }
                }
            ]
        }"#;

        let page: PageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.next_page.is_some());

        let doc = &page.results[0];
        assert_eq!(doc.uid, "my-first-post");
        assert_eq!(doc.data.title, "My first post");
        assert!(doc.first_publication_date.is_some());
        // unlisted fields fall back to defaults
        assert!(doc.data.content.is_empty());
        assert_eq!(doc.data.banner.url, "");
    }

    #[test]
    fn test_decode_final_page() {
        let json = r#"{"next_page": null, "results": []}"#;
        let page: PageResponse = serde_json::from_str(json).unwrap();
        assert!(page.next_page.is_none());
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_decode_rich_text_block() {
        let json = r#"{"type": "image", "text": "", "url": "https://images.example/banner.png"}"#;
        let block: RichTextBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind, "image");
        assert_eq!(block.url.as_deref(), Some("https://images.example/banner.png"));
    }
}
