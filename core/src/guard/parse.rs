//! Moderation response parsing.
//!
//! The model echoes the rendered prompt back ahead of its own generation,
//! so parsing starts by stripping everything up to the last occurrence of
//! the echo marker. The remaining tail follows a two-line contract: a
//! `safe`/`unsafe` verdict line, and, only when unsafe, a comma-separated
//! list of violated category codes.
//!
//! This function never fails. Malformed input degrades to an unsafe verdict
//! with empty category lists and the best-effort tail as `raw_response`.

use super::categories::label_for;
use super::Moderation;

/// Marker separating the echoed prompt from the model's own generation,
/// for backends that echo the Llama 3 chat template. Backends that do not
/// echo (or use different delimiters) work too: when the marker is absent
/// the whole decoded text is treated as the generation.
pub const DEFAULT_ECHO_MARKER: &str = "assistant<|end_header_id|>";

/// Parse raw decoded model output into a [`Moderation`].
///
/// Verdict rule: the first line of the tail, trimmed, must compare equal to
/// `safe` ignoring ASCII case. Anything else — empty, `safe.`, or any value
/// that merely starts with `safe` — is unsafe. Deliberately strict; no
/// fuzzy matching.
///
/// Unknown codes on the category line are kept verbatim in
/// `violated_categories` but dropped from `category_descriptions`. The
/// asymmetry mirrors the upstream contract and is intentional.
pub fn parse_moderation_response(raw: &str, echo_marker: &str) -> Moderation {
    let tail = match raw.rfind(echo_marker) {
        Some(idx) => &raw[idx + echo_marker.len()..],
        None => raw,
    };
    let tail = tail.trim();

    let mut lines = tail.lines();
    let verdict = lines.next().unwrap_or("").trim();
    let is_safe = verdict.eq_ignore_ascii_case("safe");

    let mut violated_categories = Vec::new();
    let mut category_descriptions = Vec::new();

    // A second line is only ever inspected for an unsafe verdict.
    if !is_safe {
        if let Some(category_line) = lines.next() {
            for code in category_line.split(',').map(str::trim) {
                violated_categories.push(code.to_owned());
                if let Some(label) = label_for(code) {
                    category_descriptions.push(format!("{code}: {label}"));
                }
            }
        }
    }

    Moderation {
        is_safe,
        violated_categories,
        category_descriptions,
        raw_response: tail.to_owned(),
    }
}
