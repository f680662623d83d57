use regex::Regex;

use crate::path::{file_name, relative_to_cwd};

/// Compiled exclude patterns.
///
/// Globs are translated to regexes anchored at the start only, so a pattern
/// matches when it matches a *prefix* of the candidate: `*.log` excludes
/// `app.log` and also `app.log.1`. This prefix behavior is what existing
/// `excludePatterns` lists were written against.
#[derive(Debug)]
pub struct ExclusionMatcher {
    patterns: Vec<(String, Regex)>,
}

impl ExclusionMatcher {
    /// Compile every glob in `patterns`.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let glob = p.as_ref();
                Regex::new(&glob_to_regex(glob)).map(|re| (glob.to_string(), re))
            })
            .collect::<Result<_, _>>()?;
        Ok(ExclusionMatcher { patterns })
    }

    /// The first pattern matching either the base name of `file_path` or its
    /// path relative to `cwd`.
    pub fn matching_pattern(&self, file_path: &str, cwd: &str) -> Option<&str> {
        let name = file_name(file_path);
        let relative = relative_to_cwd(file_path, cwd);
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(name) || re.is_match(&relative))
            .map(|(glob, _)| glob.as_str())
    }

    pub fn is_excluded(&self, file_path: &str, cwd: &str) -> bool {
        self.matching_pattern(file_path, cwd).is_some()
    }
}

/// Translate a glob into a start-anchored regex.
///
/// `**` matches any run of characters including separators, `*` any run
/// without `/` or `\`. Every other character is literal.
pub(crate) fn glob_to_regex(glob: &str) -> String {
    let mut out = String::from("^");
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            if chars.peek() == Some(&'*') {
                chars.next();
                out.push_str(".*");
            } else {
                out.push_str("[^/\\\\]*");
            }
        } else {
            let mut buf = [0u8; 4];
            out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        }
    }
    out
}
