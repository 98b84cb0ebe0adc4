// Handlers for the gateway endpoints

use super::{
    OUTPUT_MOUNT, SharedDirectories,
    directories::{HISTORY_ROOT, history_folder},
    error::ApiError,
    models::*,
    prompt_graph::{NodeBindings, PromptGraph, PromptMetadata, is_provided},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Query, State, multipart::MultipartRejection, rejection::QueryRejection},
};
use std::path::Path;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info};
use uuid::Uuid;

// Multipart field that carries the uploaded image
const IMAGE_FIELD: &str = "image";

// File extensions listed by GET /history (compared lowercase)
const HISTORY_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

// --- POST /upload/image ---
// Stores the first multipart part (which must be named "image") in the input
// directory under a fresh random prefix.
pub async fn upload_image(
    State(dirs): State<SharedDirectories>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    let mut field = match multipart.next_field().await? {
        Some(field) if field.name() == Some(IMAGE_FIELD) => field,
        _ => return Err(ApiError::bad_request("No image field found")),
    };

    // Only the last path component of the client-declared name is kept.
    let original_name = field
        .file_name()
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or(IMAGE_FIELD)
        .to_string();
    let stored_name = format!("{}_{}", Uuid::new_v4().simple(), original_name);

    fs::create_dir_all(&dirs.input_dir).await?;
    let path = dirs.input_dir.join(&stored_name);
    let mut file = fs::File::create(&path).await?;

    let mut written = 0usize;
    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len();
    }
    file.flush().await?;

    info!("Image uploaded: {} ({} bytes)", stored_name, written);

    Ok(Json(UploadResponse::input(stored_name)))
}

// --- POST /prompt ---
// Records the prompt text and seed of a job next to where the host will write
// its images. Generation itself is left to the host.
pub async fn submit_prompt(
    State(dirs): State<SharedDirectories>,
    body: Bytes,
) -> Result<Json<PromptAccepted>, ApiError> {
    let payload: serde_json::Value = serde_json::from_slice(&body)?;

    let client_id = payload.get("client_id");
    let prompt = payload.get("prompt");
    let prompt = match prompt {
        Some(prompt) if is_provided(client_id) && is_provided(Some(prompt)) => prompt,
        _ => return Err(ApiError::bad_request("Missing client_id or prompt")),
    };

    let bindings = NodeBindings::default();
    let graph = PromptGraph::new(prompt);
    let filename_prefix = graph.filename_prefix(&bindings).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Missing filename_prefix in node {}",
            bindings.filename_prefix.node_id
        ))
    })?;

    let target = dirs.prompt_session(filename_prefix);
    fs::create_dir_all(&target.session_dir).await?;

    let metadata = PromptMetadata::from_graph(&graph, &bindings);
    let metadata_path = target.metadata_path();
    fs::write(&metadata_path, metadata.render()).await?;

    info!("Saved prompt metadata to {}", metadata_path.display());

    Ok(Json(PromptAccepted::ACCEPTED))
}

// --- GET /history?client_id=... ---
// Lists the images in the client's session folder, sorted by name.
pub async fn list_history(
    State(dirs): State<SharedDirectories>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(pairs) = query?;
    let client_id = HistoryQuery::from_pairs(pairs)
        .client_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing client_id"))?;

    let folder = history_folder(&client_id);
    let session_dir = dirs.history_dir(&folder);

    if !fs::try_exists(&session_dir).await? {
        debug!("No history for {}", folder);
        return Ok(Json(HistoryResponse::default()));
    }

    let mut names = Vec::new();
    let mut entries = fs::read_dir(&session_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => debug!("Skipping non UTF-8 file name {:?}", name),
        }
    }
    names.sort();

    let images = names
        .into_iter()
        .filter(|name| is_history_image(name))
        .map(|filename| HistoryImage {
            url: format!("{}/{}/{}/{}", OUTPUT_MOUNT, HISTORY_ROOT, folder, filename),
            filename,
        })
        .collect();

    Ok(Json(HistoryResponse { images }))
}

fn is_history_image(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        HISTORY_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}
