// Read-only view over the job graph posted to /prompt.
//
// The graph format belongs to the host: a JSON object mapping node ids to
// `{ "class_type": ..., "inputs": { ... } }`. The web client always builds it
// from the same workflow template, so fixed node ids stand for fixed roles.
// If the template is renumbered the lookups silently fall back to their
// defaults; `NodeBindings` is the one place to update.

use serde_json::Value;

pub const MISSING_TEXT: &str = "N/A";
pub const MISSING_SEED: &str = "unknown";

/// One input field of one node in the job graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeField {
    pub node_id: &'static str,
    pub input: &'static str,
}

/// Which node/input pairs carry the values the gateway cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBindings {
    /// SaveImage node: `<session folder>/<timestamp>`.
    pub filename_prefix: NodeField,
    pub positive_text: NodeField,
    pub negative_text: NodeField,
    /// Sampler node.
    pub seed: NodeField,
}

impl NodeBindings {
    pub const DEFAULT: Self = Self {
        filename_prefix: NodeField {
            node_id: "28",
            input: "filename_prefix",
        },
        positive_text: NodeField {
            node_id: "30",
            input: "text_g",
        },
        negative_text: NodeField {
            node_id: "33",
            input: "text_g",
        },
        seed: NodeField {
            node_id: "3",
            input: "seed",
        },
    };
}

impl Default for NodeBindings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PromptGraph<'a> {
    nodes: &'a Value,
}

impl<'a> PromptGraph<'a> {
    pub fn new(nodes: &'a Value) -> Self {
        Self { nodes }
    }

    /// `nodes[node_id]["inputs"][input]`, or `None` if any step is missing or
    /// not an object.
    pub fn input(&self, field: NodeField) -> Option<&'a Value> {
        self.nodes
            .as_object()?
            .get(field.node_id)?
            .as_object()?
            .get("inputs")?
            .as_object()?
            .get(field.input)
    }

    /// Non-empty string value of the filename prefix input.
    pub fn filename_prefix(&self, bindings: &NodeBindings) -> Option<&'a str> {
        self.input(bindings.filename_prefix)
            .and_then(Value::as_str)
            .filter(|prefix| !prefix.is_empty())
    }

    fn input_text(&self, field: NodeField, default: &str) -> String {
        self.input(field)
            .map(render_value)
            .unwrap_or_else(|| default.to_string())
    }
}

/// The human-readable summary written next to the generated images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMetadata {
    pub positive: String,
    pub negative: String,
    pub seed: String,
}

impl PromptMetadata {
    pub fn from_graph(graph: &PromptGraph<'_>, bindings: &NodeBindings) -> Self {
        Self {
            positive: graph.input_text(bindings.positive_text, MISSING_TEXT),
            negative: graph.input_text(bindings.negative_text, MISSING_TEXT),
            seed: graph.input_text(bindings.seed, MISSING_SEED),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Positive Prompt:\n{}\n\nNegative Prompt:\n{}\n\nSeed: {}\n",
            self.positive, self.negative, self.seed
        )
    }
}

/// Strings as-is, everything else as JSON text.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a request field counts as provided: present and not null, false,
/// zero or empty.
pub fn is_provided(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}
