/// A normalized absolute file path.
///
/// Relative paths resolved against cwd, `..` and `.` components collapsed
/// (logical, no filesystem access).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(pub(crate) String);

impl NormalizedPath {
    /// Normalize a path against the given cwd.
    ///
    /// Steps:
    /// 1. Prepend `cwd` if path is relative
    /// 2. Collapse `..` and `.` components logically (no filesystem access)
    /// 3. Collapse duplicate `/` separators
    /// 4. Remove trailing `/`
    pub fn new(raw: &str, cwd: &str) -> Self {
        let path = if raw.starts_with('/') {
            raw.to_string()
        } else {
            format!("{cwd}/{raw}")
        };

        let mut components: Vec<&str> = Vec::new();
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                other => components.push(other),
            }
        }

        if components.is_empty() {
            NormalizedPath("/".to_string())
        } else {
            NormalizedPath(format!("/{}", components.join("/")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|c| !c.is_empty())
    }

    /// Express this path relative to `base`, walking up with `..` where the
    /// two diverge. A path equal to `base` is `"."`.
    pub fn relative_to(&self, base: &NormalizedPath) -> String {
        let target: Vec<&str> = self.components().collect();
        let from: Vec<&str> = base.components().collect();

        let shared = target
            .iter()
            .zip(from.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = vec![".."; from.len() - shared];
        parts.extend(&target[shared..]);

        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }
}
