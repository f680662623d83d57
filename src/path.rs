use crate::domain::NormalizedPath;

/// Final component of a path, as `basename` would report it.
///
/// Splits on `/` and the platform separator; a trailing separator yields `""`.
pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit(['/', std::path::MAIN_SEPARATOR])
        .next()
        .unwrap_or(path)
}

/// Path of `path` relative to `cwd`, with forward slashes only.
///
/// Delegates to [`NormalizedPath::relative_to`]; no filesystem access.
pub(crate) fn relative_to_cwd(path: &str, cwd: &str) -> String {
    let cwd = NormalizedPath::new(&cwd.replace('\\', "/"), "/");
    NormalizedPath::new(&path.replace('\\', "/"), cwd.as_str())
        .relative_to(&cwd)
}
