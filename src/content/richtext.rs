//! Rich-text to markup rendering
//!
//! The content API delivers structured rich-text blocks; turning them into
//! markup is a pluggable capability so page assembly can be tested against
//! a stub. `HtmlRenderer` covers the block set the document store emits.

use crate::api::RichTextBlock;

/// Renders a sequence of rich-text blocks to a markup string.
///
/// Implementations receive the body blocks untransformed, in document
/// order, and are responsible for their own escaping.
pub trait RichTextRenderer {
    fn render(&self, blocks: &[RichTextBlock]) -> String;
}

/// Default HTML renderer
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl RichTextRenderer for HtmlRenderer {
    fn render(&self, blocks: &[RichTextBlock]) -> String {
        let mut html = String::new();
        let mut list_tag: Option<&str> = None;

        for block in blocks {
            let tag = match block.kind.as_str() {
                "list-item" => Some("ul"),
                "o-list-item" => Some("ol"),
                _ => None,
            };

            // close an open list when leaving it, open one when entering
            if list_tag != tag {
                if let Some(open) = list_tag {
                    html.push_str(&format!("</{}>", open));
                }
                if let Some(new) = tag {
                    html.push_str(&format!("<{}>", new));
                }
                list_tag = tag;
            }

            match block.kind.as_str() {
                "paragraph" => {
                    html.push_str(&format!("<p>{}</p>", escape_html(&block.text)));
                }
                "preformatted" => {
                    html.push_str(&format!("<pre>{}</pre>", escape_html(&block.text)));
                }
                "list-item" | "o-list-item" => {
                    html.push_str(&format!("<li>{}</li>", escape_html(&block.text)));
                }
                "image" => {
                    if let Some(url) = &block.url {
                        html.push_str(&format!(
                            "<img src=\"{}\" alt=\"{}\">",
                            escape_html(url),
                            escape_html(&block.text)
                        ));
                    }
                }
                kind if kind.starts_with("heading") => {
                    let level = kind
                        .trim_start_matches("heading")
                        .parse::<u8>()
                        .unwrap_or(1)
                        .clamp(1, 6);
                    html.push_str(&format!(
                        "<h{level}>{}</h{level}>",
                        escape_html(&block.text)
                    ));
                }
                // embeds and unknown block types are skipped
                _ => {}
            }
        }

        if let Some(open) = list_tag {
            html.push_str(&format!("</{}>", open));
        }

        html
    }
}

/// Escape text for safe injection into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
