//! Root path helpers.
//!
//! Root paths are absolute and `/`-separated. Folder paths end with `/`, file
//! paths do not.

/// The last segment of a root path, without a folder's trailing slash.
///
/// The root folder `/` is named `/`.
pub fn name_of(root_path: &str) -> &str {
    let trimmed = root_path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if root_path.is_empty() { "" } else { "/" };
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// The folder containing `root_path`, including its trailing slash.
///
/// For a folder path this is the parent folder. Returns `None` for the root
/// folder and for relative paths.
pub fn parent_folder(root_path: &str) -> Option<&str> {
    let trimmed = root_path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    trimmed.rfind('/').map(|idx| &trimmed[..=idx])
}

/// The folder a target path lives in.
///
/// A path that already ends with `/` names a folder and is returned as is;
/// otherwise the last segment is stripped.
pub fn containing_folder(target_path: &str) -> &str {
    if target_path.ends_with('/') {
        return target_path;
    }
    match target_path.rfind('/') {
        Some(idx) => &target_path[..=idx],
        None => "/",
    }
}

/// Returns `true` if `path` is inside `folder` (at any depth), excluding the
/// folder itself.
pub fn is_below(path: &str, folder: &str) -> bool {
    path.len() > folder.len() && path.starts_with(folder) && folder.ends_with('/')
}

/// Returns `true` if `path` is a direct child of `folder`.
pub fn is_direct_child(path: &str, folder: &str) -> bool {
    is_below(path, folder) && parent_folder(path) == Some(folder)
}

/// Default temporary-file naming convention: the name starts with `~`.
pub fn is_temporary_file_name(name: &str) -> bool {
    name.starts_with('~')
}

/// Ensure a folder path ends with a single `/`.
pub fn as_folder_path(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
