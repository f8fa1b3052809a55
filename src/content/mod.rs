//! Content models and shaping

pub mod post;
pub mod readtime;
pub mod richtext;

pub use post::{PostDetail, PostSummary};
pub use readtime::read_time_minutes;
pub use richtext::{HtmlRenderer, RichTextRenderer};
