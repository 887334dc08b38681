use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Calculate a notebook id from the notebook's source path using SHA256
///
/// The path is canonicalized first so that the same file reached through a
/// symlink or a relative path maps to the same notebook.
pub fn notebook_id_from_path(source_path: &Path) -> String {
    let normalized = normalize_path(source_path);
    let path_str = normalized.to_string_lossy();

    let mut hasher = Sha256::new();
    hasher.update(path_str.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check if string is 64-character hexadecimal
pub fn is_64_char_hex(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize a path for comparison (resolve to absolute, canonicalize if possible)
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}
