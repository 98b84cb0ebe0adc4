// Routes for the dungeon web client, attached to a router owned by the
// image-generation host. The host builds the router and runs the server;
// this crate only appends middleware and handlers to it.

pub mod web;

pub use web::{ApiError, Directories, register};

/// Registry shape the host's extension loader expects: `(key, value)` pairs.
pub type NodeRegistry = &'static [(&'static str, &'static str)];

/// Custom processing nodes provided by this extension. There are none; the
/// registry only has to exist for the host to accept the extension.
pub const NODE_CLASS_MAPPINGS: NodeRegistry = &[];

/// Display names for the nodes in [`NODE_CLASS_MAPPINGS`].
pub const NODE_DISPLAY_NAME_MAPPINGS: NodeRegistry = &[];
