//! Post models
//!
//! Summary and detail views of the same underlying document: the listing
//! page only needs title/subtitle/author, the detail page carries the
//! banner and the full rich-text content.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::{ContentSection, Document};

/// A post as shown on the listing page. Immutable once fetched;
/// identity is the uid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub uid: String,
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            uid: doc.uid.clone(),
            published_at: doc.first_publication_date,
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
        }
    }
}

/// A post with its full content, as shown on the detail page
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub uid: String,
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
    pub banner_url: String,
    pub author: String,
    pub content: Vec<ContentSection>,
}

impl PostDetail {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            uid: doc.uid.clone(),
            published_at: doc.first_publication_date,
            title: doc.data.title.clone(),
            banner_url: doc.data.banner.url.clone(),
            author: doc.data.author.clone(),
            content: doc.data.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Banner, DocumentData, RichTextBlock};
    use chrono::TimeZone;

    fn sample_document() -> Document {
        Document {
            uid: "how-to-travel".to_string(),
            first_publication_date: Some(Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap()),
            data: DocumentData {
                title: "How to travel".to_string(),
                subtitle: "A short guide".to_string(),
                author: "Jane Doe".to_string(),
                banner: Banner {
                    url: "https://images.example/banner.png".to_string(),
                },
                content: vec![ContentSection {
                    heading: "First steps".to_string(),
                    body: vec![RichTextBlock::new("paragraph", "Pack light.")],
                }],
            },
        }
    }

    #[test]
    fn test_summary_from_document() {
        let summary = PostSummary::from_document(&sample_document());
        assert_eq!(summary.uid, "how-to-travel");
        assert_eq!(summary.title, "How to travel");
        assert_eq!(summary.subtitle, "A short guide");
        assert_eq!(summary.author, "Jane Doe");
        assert!(summary.published_at.is_some());
    }

    #[test]
    fn test_detail_from_document() {
        let detail = PostDetail::from_document(&sample_document());
        assert_eq!(detail.banner_url, "https://images.example/banner.png");
        assert_eq!(detail.content.len(), 1);
        assert_eq!(detail.content[0].heading, "First steps");
    }
}
