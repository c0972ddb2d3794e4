//! Container log shaping.

/// Joins log frames into a single newline-separated string.
///
/// Frames are concatenated as delivered: the engine splits lines longer
/// than its frame size across several frames, so a frame boundary is not a
/// line boundary. `\r\n` is normalized to `\n` and the final line break is
/// dropped.
#[must_use]
pub fn join_log_lines<I, S>(frames: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined: String = frames
        .into_iter()
        .map(|frame| frame.as_ref().replace("\r\n", "\n"))
        .collect();
    match joined.strip_suffix('\n') {
        Some(trimmed) => trimmed.to_string(),
        None => joined,
    }
}

/// Returns the last `tail` lines of `lines`.
#[must_use]
pub fn tail_lines(lines: &[String], tail: usize) -> &[String] {
    &lines[lines.len().saturating_sub(tail)..]
}

/// Formats one log line the way the engine does with timestamps enabled.
#[must_use]
pub fn timestamped_line(at: chrono::DateTime<chrono::Utc>, message: &str) -> String {
    format!(
        "{} {message}",
        at.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
    )
}
