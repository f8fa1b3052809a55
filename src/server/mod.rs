//! Local server with lazy fallback rendering
//!
//! Serves the generated public directory and adds the two dynamic
//! behaviors the static output cannot carry: resolving post paths that
//! were not pre-built, and loading further listing pages through the
//! pagination cursor.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::services::ServeDir;

use crate::api::{ContentClient, ContentSource};
use crate::feed::Feed;
use crate::generator::Generator;
use crate::templates::PostItemData;
use crate::Blog;

/// Server state
struct ServerState<C: ContentSource> {
    blog: Blog,
    generator: Generator<C>,
    /// Serializes listing loads: one fetch in flight at a time. Each
    /// page view owns its listing state and sends its cursor with the
    /// request, so the guard only prevents concurrent fetches.
    load_guard: tokio::sync::Mutex<()>,
    /// Uids with a fallback resolution in flight
    resolving: Mutex<HashSet<String>>,
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let generator = Generator::new(blog)?;

    let state = Arc::new(ServerState {
        blog: blog.clone(),
        generator,
        load_guard: tokio::sync::Mutex::new(()),
        resolving: Mutex::new(HashSet::new()),
    });

    let app = router::<ContentClient>(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router<C: ContentSource + 'static>(state: Arc<ServerState<C>>) -> Router {
    let serve_dir =
        ServeDir::new(&state.blog.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/api/load-more", get(load_more_handler::<C>))
        .route("/post/:uid", get(post_handler::<C>))
        .fallback_service(serve_dir)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct LoadMoreParams {
    /// The requesting view's cursor; absent once its feed is exhausted
    cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoadMoreResponse {
    /// Rendered list items to append; empty when nothing was loaded
    html: String,
    /// Cursor after this load; null once the final page was fetched
    next_page: Option<String>,
}

/// Load the next listing page for the requesting view.
///
/// The view carries its own pagination state (accumulated list plus
/// cursor) and resumes from the cursor it sends, so a freshly reloaded
/// page never skips ahead to where some other view left off. Loads are
/// serialized; a re-entrant call gets its cursor back with no items
/// instead of racing a second fetch.
async fn load_more_handler<C: ContentSource + 'static>(
    State(state): State<Arc<ServerState<C>>>,
    Query(params): Query<LoadMoreParams>,
) -> Result<Json<LoadMoreResponse>, StatusCode> {
    let Some(cursor) = params.cursor else {
        // no further pages: a no-op, not an error
        return Ok(Json(LoadMoreResponse {
            html: String::new(),
            next_page: None,
        }));
    };

    let Ok(_guard) = state.load_guard.try_lock() else {
        return Ok(Json(LoadMoreResponse {
            html: String::new(),
            next_page: Some(cursor),
        }));
    };

    // Fetch without holding any feed lock; failures surface as-is
    let mut feed = Feed::resume(&cursor);
    if let Err(e) = feed.load_next(state.generator.client()).await {
        tracing::error!("Failed to load page {}: {}", cursor, e);
        return Err(StatusCode::BAD_GATEWAY);
    }

    let items: Vec<PostItemData> = feed
        .posts()
        .iter()
        .map(|summary| PostItemData::from_summary(summary, &state.blog.config.date_format))
        .collect();

    let html = state.generator.render_post_items(&items).map_err(|e| {
        tracing::error!("Failed to render list fragment: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(LoadMoreResponse {
        html,
        next_page: feed.next_page().map(str::to_string),
    }))
}

/// Serve a post page; unknown uids resolve lazily.
///
/// A pre-built page is served from disk. For anything else the response
/// is a placeholder while a single background task (per uid) fetches the
/// document and materializes the page, so the next request gets real
/// content. The placeholder never exposes partial fields.
async fn post_handler<C: ContentSource + 'static>(
    State(state): State<Arc<ServerState<C>>>,
    Path(uid): Path<String>,
) -> Response {
    let path = state.generator.post_page_path(&uid);

    if let Ok(html) = tokio::fs::read_to_string(&path).await {
        return Html(html).into_response();
    }

    let newly_inserted = state.resolving.lock().unwrap().insert(uid.clone());
    if newly_inserted {
        let state = state.clone();
        let uid = uid.clone();
        tokio::spawn(async move {
            match state.generator.resolve_post(&uid).await {
                Ok(path) => tracing::info!("Resolved fallback path {:?}", path),
                Err(e) => tracing::error!("Failed to resolve post {:?}: {}", uid, e),
            }
            state.resolving.lock().unwrap().remove(&uid);
        });
    }

    match state.generator.fallback_page() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render placeholder: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
