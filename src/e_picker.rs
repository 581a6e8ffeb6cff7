use crate::prelude::*;
use walkdir::{DirEntry, WalkDir};

/// Extension the build file picker is restricted to.
pub const BUILD_FILE_EXTENSION: &str = "xml";

const MAX_DEPTH: usize = 6;
const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "bin", "out"];

fn is_skipped(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Lists `*.xml` files beneath `root`, shallowest first, `build.xml` ahead of
/// its siblings.
pub fn collect_build_file_candidates(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(MAX_DEPTH)
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case(BUILD_FILE_EXTENSION))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    found.sort_by_key(|p| {
        let depth = p.strip_prefix(root).map(|r| r.components().count()).unwrap_or(usize::MAX);
        let not_build_xml = p.file_name().map(|n| n != "build.xml").unwrap_or(true);
        (depth, not_build_xml, p.clone())
    });
    debug!("build file candidates under {}: {}", root.display(), found.len());
    found
}
