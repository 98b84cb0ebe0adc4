use super::{Directories, MAX_UPLOAD_SIZE_BYTES, OUTPUT_MOUNT, cors, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, get_service, post},
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

// Asset folders of the web client. Each one is mounted twice: under /test/
// (original page layout) and at the root (older client builds).
const ASSET_DIRS: [&str; 3] = ["css", "js", "images"];

/// Appends the gateway routes to a router owned by the host and wraps the
/// result, host routes included, in the CORS middleware.
pub fn register(router: Router, directories: Directories) -> Router {
    let directories = Arc::new(directories);

    let api = Router::new()
        .route(
            "/upload/image",
            post(handlers::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE_BYTES)),
        )
        .route("/prompt", post(handlers::submit_prompt))
        .route("/history", get(handlers::list_history))
        .with_state(directories.clone());

    mount_static(router.merge(api), &directories).layer(middleware::from_fn(cors::cors))
}

fn mount_static(router: Router, directories: &Directories) -> Router {
    let webroot = &directories.webroot;

    let mut router = router
        .route(
            "/test",
            get_service(ServeFile::new(webroot.join("landing.html"))),
        )
        .route(
            "/test/index.html",
            get_service(ServeFile::new(webroot.join("index.html"))),
        );

    for asset in ASSET_DIRS {
        let dir = webroot.join(asset);
        router = router
            .nest_service(&format!("/test/{}", asset), ServeDir::new(&dir))
            .nest_service(&format!("/{}", asset), ServeDir::new(&dir));
    }

    router.nest_service(OUTPUT_MOUNT, ServeDir::new(&directories.output_dir))
}
