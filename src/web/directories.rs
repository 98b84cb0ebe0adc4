// Filesystem layout shared with the host installation

use std::path::{Component, Path, PathBuf};

/// Folder under the output root that holds per-client history sessions.
pub const HISTORY_ROOT: &str = "gradio";

/// Number of client id characters used to name a history session folder.
pub const CLIENT_ID_PREFIX_LEN: usize = 8;

/// Directories the gateway reads from and writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directories {
    /// Static web client (`landing.html`, `index.html`, `css/`, `js/`, `images/`).
    pub webroot: PathBuf,
    /// Host input directory; uploads land here.
    pub input_dir: PathBuf,
    /// Host output directory; prompt metadata and history live here.
    pub output_dir: PathBuf,
}

/// Where the metadata of one prompt submission goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTarget {
    pub session_dir: PathBuf,
    pub timestamp: String,
}

impl SessionTarget {
    pub fn metadata_path(&self) -> PathBuf {
        self.session_dir
            .join(format!("{}_prompt.txt", self.timestamp))
    }
}

impl Directories {
    /// Layout relative to the extension's install directory: the web root is
    /// `<base>/web`, input and output sit two levels above `base`.
    ///
    /// `base` is made absolute against the working directory and `.` / `..`
    /// segments are resolved lexically, so symlinks are not followed.
    pub fn from_base(base: impl AsRef<Path>) -> Self {
        let base = normalize(base.as_ref());
        let host_root = base
            .ancestors()
            .nth(2)
            .or_else(|| base.ancestors().last())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| base.clone());

        Self {
            webroot: base.join("web"),
            input_dir: host_root.join("input"),
            output_dir: host_root.join("output"),
        }
    }

    /// Splits a `filename_prefix` into the session directory (its directory
    /// part under the output root) and the timestamp label (its last segment).
    pub fn prompt_session(&self, filename_prefix: &str) -> SessionTarget {
        let (dir_part, timestamp) = filename_prefix
            .rsplit_once('/')
            .unwrap_or(("", filename_prefix));

        let mut session_dir = self.output_dir.clone();
        // Only plain segments; the session must stay under the output root.
        for component in Path::new(dir_part).components() {
            if let Component::Normal(segment) = component {
                session_dir.push(segment);
            }
        }

        SessionTarget {
            session_dir,
            timestamp: timestamp.to_string(),
        }
    }

    pub fn history_dir(&self, session_folder: &str) -> PathBuf {
        self.output_dir.join(HISTORY_ROOT).join(session_folder)
    }
}

fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// `session_<first 8 chars of client_id>`
pub fn history_folder(client_id: &str) -> String {
    let short_id: String = client_id.chars().take(CLIENT_ID_PREFIX_LEN).collect();
    format!("session_{}", short_id)
}
