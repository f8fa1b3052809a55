//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site from the content API
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(blog)?;
    let post_count = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated index and {} post pages in {:.2}s",
        post_count,
        duration.as_secs_f64()
    );

    Ok(())
}
