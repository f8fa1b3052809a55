//! Built-in blog templates using the Tera template engine
//!
//! All templates and style sheets are embedded in the binary, so a site
//! needs nothing but a `_config.yml` next to it.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{read_time_minutes, PostDetail, PostSummary, RichTextRenderer};
use crate::helpers::date::publication_date;

/// Style sheets written into `public/styles/`: one shared scope plus one
/// per page.
pub const STYLES: &[(&str, &str)] = &[
    ("common.css", include_str!("blog/styles/common.css")),
    ("home.css", include_str!("blog/styles/home.css")),
    ("post.css", include_str!("blog/styles/post.css")),
];

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("fallback.html", include_str!("blog/fallback.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("blog/partials/header.html"),
            ),
            (
                "partials/post_items.html",
                include_str!("blog/partials/post_items.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render the listing page
    pub fn render_index(
        &self,
        site: &SiteData,
        posts: &[PostItemData],
        next_page: Option<&str>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("posts", posts);
        context.insert("next_page", &next_page);
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render the list fragment alone (load-more responses)
    pub fn render_post_items(&self, posts: &[PostItemData]) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", posts);
        Ok(self.tera.render("partials/post_items.html", &context)?)
    }

    /// Render a post detail page
    pub fn render_post(&self, site: &SiteData, post: &PostPageData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("post", post);
        Ok(self.tera.render("post.html", &context)?)
    }

    /// Render the placeholder shown while a fallback path resolves
    pub fn render_fallback(&self, site: &SiteData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        Ok(self.tera.render("fallback.html", &context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
        }
    }
}

/// One entry of the listing page
#[derive(Debug, Clone, Serialize)]
pub struct PostItemData {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

impl PostItemData {
    pub fn from_summary(summary: &PostSummary, date_format: &str) -> Self {
        Self {
            uid: summary.uid.clone(),
            title: summary.title.clone(),
            subtitle: summary.subtitle.clone(),
            author: summary.author.clone(),
            date: publication_date(&summary.published_at, date_format),
        }
    }
}

/// One rendered content section of a post page
#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub heading: String,
    pub body_html: String,
}

/// Full context for a post detail page
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub banner_url: String,
    pub author: String,
    pub date: String,
    pub read_time: u64,
    pub sections: Vec<SectionData>,
}

impl PostPageData {
    /// Shape a fetched post for rendering. The reading time is computed
    /// here, once per payload; body blocks pass through the rich-text
    /// renderer untransformed.
    pub fn from_detail(
        detail: &PostDetail,
        renderer: &dyn RichTextRenderer,
        date_format: &str,
    ) -> Self {
        Self {
            title: detail.title.clone(),
            banner_url: detail.banner_url.clone(),
            author: detail.author.clone(),
            date: publication_date(&detail.published_at, date_format),
            read_time: read_time_minutes(&detail.content),
            sections: detail
                .content
                .iter()
                .map(|section| SectionData {
                    heading: section.heading.clone(),
                    body_html: renderer.render(&section.body),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ContentSection, RichTextBlock};
    use crate::content::HtmlRenderer;
    use chrono::{TimeZone, Utc};

    fn site() -> SiteData {
        SiteData {
            title: "spacetraveling".to_string(),
            description: String::new(),
        }
    }

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: uid.to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap()),
            title: "How to travel".to_string(),
            subtitle: "A short guide".to_string(),
            author: "Jane Doe".to_string(),
        }
    }

    fn detail() -> PostDetail {
        PostDetail {
            uid: "how-to-travel".to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap()),
            title: "How to travel".to_string(),
            banner_url: "https://images.example/banner.png".to_string(),
            author: "Jane Doe".to_string(),
            content: vec![ContentSection {
                heading: "First steps".to_string(),
                body: vec![RichTextBlock::new("paragraph", "Pack light.")],
            }],
        }
    }

    /// Wraps every body in a marker so assembly is testable without the
    /// real renderer
    struct StubRenderer;

    impl RichTextRenderer for StubRenderer {
        fn render(&self, blocks: &[RichTextBlock]) -> String {
            format!("[{} blocks]", blocks.len())
        }
    }

    #[test]
    fn test_post_item_formats_date() {
        let item = PostItemData::from_summary(&summary("a"), "DD MMM YYYY");
        assert_eq!(item.date, "01 mar 2021");
        assert_eq!(item.uid, "a");
    }

    #[test]
    fn test_post_page_uses_renderer_opaquely() {
        let page = PostPageData::from_detail(&detail(), &StubRenderer, "DD MMM YYYY");
        assert_eq!(page.read_time, 1);
        assert_eq!(page.sections.len(), 1);
        assert_eq!(page.sections[0].heading, "First steps");
        assert_eq!(page.sections[0].body_html, "[1 blocks]");
    }

    #[test]
    fn test_render_index_lists_posts_and_load_more() {
        let renderer = TemplateRenderer::new().unwrap();
        let posts = [PostItemData::from_summary(&summary("a"), "DD MMM YYYY")];

        let html = renderer
            .render_index(&site(), &posts, Some("https://api.example/page2"))
            .unwrap();
        assert!(html.contains("How to travel"));
        assert!(html.contains("01 mar 2021"));
        assert!(html.contains("/post/a"));
        assert!(html.contains("Carregar mais posts"));
        // the button carries the view's own cursor and sends it along
        assert!(html.contains("data-next-page="));
        assert!(html.contains("/api/load-more?cursor="));
        // a failed request re-enables the button for a retry
        assert!(html.contains("catch"));
        assert!(html.contains("button.disabled = false"));

        let html = renderer.render_index(&site(), &posts, None).unwrap();
        assert!(!html.contains("Carregar mais posts"));
    }

    #[test]
    fn test_render_post_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let page = PostPageData::from_detail(&detail(), &HtmlRenderer, "DD MMM YYYY");

        let html = renderer.render_post(&site(), &page).unwrap();
        assert!(html.contains("<h1>How to travel</h1>"));
        assert!(html.contains("<p>Pack light.</p>"));
        assert!(html.contains("1 min"));
        assert!(html.contains("https://images.example/banner.png"));
    }

    #[test]
    fn test_render_fallback_placeholder() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_fallback(&site()).unwrap();
        assert!(html.contains("Carregando..."));
    }
}
