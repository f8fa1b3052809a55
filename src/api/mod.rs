//! Content repository query client
//!
//! Thin wrapper over the headless CMS HTTP API. Three operations: a
//! predicate query returning one page of documents plus a cursor, a
//! single-document lookup by uid, and a plain retrieval of a cursor URL.
//! No retries anywhere: a failed fetch propagates to the caller.

mod document;

pub use document::{Banner, ContentSection, Document, DocumentData, PageResponse, RichTextBlock};

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use thiserror::Error;

/// The content store operations the pages depend on. Implemented by
/// `ContentClient`; stub implementations keep the generator and server
/// paths testable offline.
pub trait ContentSource: Send + Sync {
    fn query(
        &self,
        predicate: &str,
        options: &QueryOptions,
    ) -> impl std::future::Future<Output = Result<PageResponse, ApiError>> + Send;

    fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
    ) -> impl std::future::Future<Output = Result<Document, ApiError>> + Send;

    fn fetch_page(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<PageResponse, ApiError>> + Send;
}

impl ContentSource for ContentClient {
    async fn query(
        &self,
        predicate: &str,
        options: &QueryOptions,
    ) -> Result<PageResponse, ApiError> {
        ContentClient::query(self, predicate, options).await
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document, ApiError> {
        ContentClient::get_by_uid(self, doc_type, uid).await
    }

    async fn fetch_page(&self, url: &str) -> Result<PageResponse, ApiError> {
        ContentClient::fetch_page(self, url).await
    }
}

/// Errors from the content API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no {document_type} document with uid {uid:?}")]
    NotFound { document_type: String, uid: String },
}

/// Options for a predicate query
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Number of documents per page; `None` uses the repository default
    pub page_size: Option<usize>,
}

/// Client for a Prismic-style document store
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    api_url: String,
}

impl ContentClient {
    pub fn new(api_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Predicate for "document.type equals `doc_type`"
    pub fn at_document_type(doc_type: &str) -> String {
        format!("[[at(document.type,\"{}\")]]", doc_type)
    }

    /// Run a structured predicate query, returning one page of documents
    /// plus the cursor for the next page.
    pub async fn query(
        &self,
        predicate: &str,
        options: &QueryOptions,
    ) -> Result<PageResponse, ApiError> {
        let mut url = format!(
            "{}/documents/search?q={}",
            self.api_url,
            utf8_percent_encode(predicate, NON_ALPHANUMERIC)
        );
        if let Some(page_size) = options.page_size {
            url.push_str(&format!("&pageSize={}", page_size));
        }
        self.fetch_page(&url).await
    }

    /// Fetch a single document by uid, or `ApiError::NotFound`.
    pub async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document, ApiError> {
        let predicate = format!("[[at(my.{}.uid,\"{}\")]]", doc_type, uid);
        let page = self
            .query(&predicate, &QueryOptions { page_size: Some(1) })
            .await?;

        page.results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound {
                document_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
    }

    /// Retrieve a page cursor URL. The cursor returned by the query
    /// interface is directly fetchable and yields the same page shape.
    pub async fn fetch_page(&self, url: &str) -> Result<PageResponse, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
