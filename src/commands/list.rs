//! List every post in the content repository

use anyhow::Result;

use crate::api::{ContentClient, QueryOptions};
use crate::feed::{Feed, LoadOutcome};
use crate::helpers::date::publication_date;
use crate::Blog;

/// Print all post summaries, walking every listing page through the
/// pagination cursor.
pub async fn run(blog: &Blog) -> Result<()> {
    let client = ContentClient::new(&blog.config.api_url);

    let first_page = client
        .query(
            &ContentClient::at_document_type(&blog.config.document_type),
            &QueryOptions {
                page_size: Some(blog.config.page_size),
            },
        )
        .await?;

    let mut feed = Feed::new(&first_page);
    while let LoadOutcome::Appended(_) = feed.load_next(&client).await? {}

    println!("Posts ({}):", feed.posts().len());
    for post in feed.posts() {
        println!(
            "  {}  {}  by {}  (/post/{})",
            publication_date(&post.published_at, &blog.config.date_format),
            post.title,
            post.author,
            post.uid
        );
    }

    Ok(())
}
