//! Generator module - renders listing and post pages into the public
//! directory
//!
//! Build-time pipeline: fetch the first listing page, resolve the set of
//! known post uids, render everything with the embedded templates. The
//! same machinery resolves fallback paths at request time (see `server`).

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::api::{ContentClient, ContentSource, PageResponse, QueryOptions};
use crate::content::{HtmlRenderer, PostDetail};
use crate::feed::Feed;
use crate::templates::{PostItemData, PostPageData, SiteData, TemplateRenderer, STYLES};
use crate::Blog;

/// Static site generator backed by the content API
pub struct Generator<C: ContentSource = ContentClient> {
    blog: Blog,
    client: C,
    renderer: TemplateRenderer,
    rich_text: HtmlRenderer,
    site: SiteData,
}

impl Generator {
    /// Create a new generator against the configured API
    pub fn new(blog: &Blog) -> Result<Self> {
        Self::with_client(blog, ContentClient::new(&blog.config.api_url))
    }
}

impl<C: ContentSource> Generator<C> {
    /// Create a generator over any content source
    pub fn with_client(blog: &Blog, client: C) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let site = SiteData::from_config(&blog.config);

        Ok(Self {
            blog: blog.clone(),
            client,
            renderer,
            rich_text: HtmlRenderer,
            site,
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Generate the entire site. Returns the number of post pages written.
    pub async fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.blog.public_dir)?;
        self.write_styles()?;

        // First listing page, fetched at build time
        let first_page = self
            .client
            .query(
                &ContentClient::at_document_type(&self.blog.config.document_type),
                &QueryOptions {
                    page_size: Some(self.blog.config.page_size),
                },
            )
            .await?;
        self.generate_index(&first_page)?;

        // Pre-render every known post path; uids outside this set are
        // resolved lazily by the server on first request
        let uids = self.static_paths().await?;
        tracing::info!("Pre-rendering {} post pages", uids.len());

        for uid in &uids {
            self.resolve_post(uid).await?;
        }

        Ok(uids.len())
    }

    /// Render the listing page from a fetched first page
    pub fn generate_index(&self, first_page: &PageResponse) -> Result<()> {
        let feed = Feed::new(first_page);
        let items: Vec<PostItemData> = feed
            .posts()
            .iter()
            .map(|summary| PostItemData::from_summary(summary, &self.blog.config.date_format))
            .collect();

        let html = self
            .renderer
            .render_index(&self.site, &items, feed.next_page())?;
        fs::write(self.blog.public_dir.join("index.html"), html)?;

        tracing::debug!("Rendered index with {} posts", items.len());
        Ok(())
    }

    /// The finite (possibly empty) set of post uids known at build time
    pub async fn static_paths(&self) -> Result<Vec<String>> {
        let page = self
            .client
            .query(
                &ContentClient::at_document_type(&self.blog.config.document_type),
                &QueryOptions::default(),
            )
            .await?;

        Ok(page
            .results
            .iter()
            .filter(|doc| !doc.uid.is_empty())
            .map(|doc| doc.uid.clone())
            .collect())
    }

    /// Fetch one post by uid and materialize its page on disk
    pub async fn resolve_post(&self, uid: &str) -> Result<PathBuf> {
        let doc = self
            .client
            .get_by_uid(&self.blog.config.document_type, uid)
            .await?;
        self.write_post_page(&PostDetail::from_document(&doc))
    }

    /// Render a post detail page into public/post/{uid}/index.html
    pub fn write_post_page(&self, detail: &PostDetail) -> Result<PathBuf> {
        let page = PostPageData::from_detail(
            detail,
            &self.rich_text,
            &self.blog.config.date_format,
        );
        let html = self.renderer.render_post(&self.site, &page)?;

        let path = self.post_page_path(&detail.uid);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;

        tracing::debug!("Rendered post page {:?}", path);
        Ok(path)
    }

    /// Where a post page lives on disk
    pub fn post_page_path(&self, uid: &str) -> PathBuf {
        self.blog
            .public_dir
            .join(&self.blog.config.post_dir)
            .join(uid)
            .join("index.html")
    }

    /// The placeholder page served while a fallback path resolves
    pub fn fallback_page(&self) -> Result<String> {
        self.renderer.render_fallback(&self.site)
    }

    /// Render a bare list fragment (load-more responses)
    pub fn render_post_items(&self, items: &[PostItemData]) -> Result<String> {
        self.renderer.render_post_items(items)
    }

    /// Write the embedded style sheets into public/styles/
    fn write_styles(&self) -> Result<()> {
        let styles_dir = self.blog.public_dir.join("styles");
        fs::create_dir_all(&styles_dir)?;
        for (name, content) in STYLES {
            fs::write(styles_dir.join(name), content)?;
        }
        Ok(())
    }
}
