use std::path::{Path, PathBuf};

/// File name of the player configuration.
pub const CONFIG_FILE_NAME: &str = "player.json";

fn resource_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            roots.push(parent.to_path_buf());
        }
    }
    let manifest_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_root.exists() {
        roots.push(manifest_root);
    }
    roots
}

/// Resolve a relative resource path against the executable directory, then
/// the crate root. Falls back to the first root when nothing exists yet.
pub fn resolve_resource_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let roots = resource_roots();
    for root in &roots {
        let candidate = root.join(path);
        if candidate.exists() {
            return candidate;
        }
    }
    roots
        .first()
        .map(|root| root.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}

pub fn config_path() -> PathBuf {
    resolve_resource_path(Path::new(CONFIG_FILE_NAME))
}

/// Where timeline snapshots are written.
pub fn snapshot_dir() -> PathBuf {
    std::env::temp_dir().join("video-timeline-player").join("snapshots")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_paths_pass_through() {
        let absolute = std::env::temp_dir().join("player.json");
        assert_eq!(resolve_resource_path(&absolute), absolute);
    }

    #[test]
    fn test_relative_paths_resolve_to_a_root() {
        let resolved = resolve_resource_path(Path::new("Cargo.toml"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("Cargo.toml"));
    }
}
