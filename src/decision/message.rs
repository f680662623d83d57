use crate::path::file_name;

/// Marker appended to a truncated commit message.
pub const ELLIPSIS: &str = "...";

const SESSION_FALLBACK: &str = "unknown";

/// Values substituted into the commit message template.
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    pub tool_name: Option<&'a str>,
    pub file_path: &'a str,
    pub session_id: Option<&'a str>,
}

/// Render `template` and cap the result at `max_len` characters.
///
/// Tokens are literal markers, replaced in this order: `{{toolName}}`,
/// `{{fileName}}`, `{{filePath}}`, `{{sessionId}}`. Anything else in the
/// template, including unknown `{{...}}` markers, is copied verbatim.
pub fn build_message(template: &str, max_len: usize, ctx: MessageContext<'_>) -> String {
    let message = template
        .replace("{{toolName}}", ctx.tool_name.unwrap_or(""))
        .replace("{{fileName}}", file_name(ctx.file_path))
        .replace("{{filePath}}", ctx.file_path)
        .replace("{{sessionId}}", ctx.session_id.unwrap_or(SESSION_FALLBACK));
    truncate(message, max_len)
}

/// Cut `message` to `max_len` characters, ending in [`ELLIPSIS`] when cut.
///
/// Counts `char`s, not bytes, and does not look for word boundaries. A limit
/// shorter than the ellipsis keeps only as many dots as fit.
pub fn truncate(message: String, max_len: usize) -> String {
    if message.chars().count() <= max_len {
        return message;
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut cut: String = message.chars().take(keep).collect();
    cut.push_str(&ELLIPSIS[..max_len.min(ELLIPSIS.len())]);
    cut
}
