//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // Content API
    /// Base URL of the headless content API (a Prismic-style repository
    /// endpoint)
    pub api_url: String,
    /// Document type queried for posts
    pub document_type: String,
    /// Page size for the initial listing fetch. The original front-end
    /// shipped with 1, which looks like a placeholder value; kept as the
    /// default for behavioral parity.
    pub page_size: usize,

    // Directory
    pub public_dir: String,
    /// Directory under public_dir where post pages are written
    pub post_dir: String,

    // Date / Time format
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            description: String::new(),
            author: String::new(),

            api_url: String::new(),
            document_type: "posts".to_string(),
            page_size: 1,

            public_dir: "public".to_string(),
            post_dir: "post".to_string(),

            date_format: "DD MMM YYYY".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
