use once_cell::sync::Lazy;
use regex::Regex;

// Matches "path:123" with an optional ":in 'method'" suffix. Backtick-quoted
// method names ("`method'") are accepted alongside single quotes since both
// appear in the wild.
static FRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?):(\d+)(?::in [`'](.+?)')?").unwrap());

/// Parse one raw stack-frame string into `(file, line, method)`.
///
/// Traces are best-effort diagnostic data, not validated input: a frame that
/// does not match the expected shape yields `(None, None, None)` rather than
/// an error. A line number that overflows `u32` counts as not matching.
pub fn parse_frame(raw: &str) -> (Option<String>, Option<u32>, Option<String>) {
    let Some(caps) = FRAME_RE.captures(raw) else {
        return (None, None, None);
    };

    let Ok(line) = caps[2].parse::<u32>() else {
        return (None, None, None);
    };

    let file = caps[1].to_string();
    let method = caps.get(3).map(|m| m.as_str().to_string());

    (Some(file), Some(line), method)
}
