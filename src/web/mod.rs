// Web layer of the gateway
// Registers static mounts, CORS handling and the upload / prompt / history endpoints

mod app;
mod cors;
mod directories;
mod error;
mod handlers;
mod listeners;
mod models;
mod prompt_graph;

pub use app::register;
pub use directories::{Directories, SessionTarget};
pub use error::ApiError;
pub use listeners::create_listener;
pub use prompt_graph::{NodeBindings, NodeField, PromptGraph, PromptMetadata};

use std::sync::Arc;

// Maximum accepted body size for image uploads
pub const MAX_UPLOAD_SIZE_BYTES: usize = 100 * 1024 * 1024; // 100MB

// URL prefix under which the host output directory is mounted
pub const OUTPUT_MOUNT: &str = "/output";

pub type SharedDirectories = Arc<Directories>;
