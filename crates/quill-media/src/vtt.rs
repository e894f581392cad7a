//! WebVTT to plain text.
//!
//! Auto-generated captions repeat each line across several overlapping cues
//! and wrap words in timing tags. The conversion keeps only cue payload
//! text, strips inline tags and entities, and drops a line when it equals
//! the line emitted just before it.

use std::sync::LazyLock;

use regex::Regex;

static INLINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("inline tag pattern is valid"));

/// Plain transcript text from a WebVTT document, one caption line per line.
pub fn vtt_to_text(vtt: &str) -> String {
    let normalized = vtt.replace("\r\n", "\n");
    let mut lines: Vec<String> = Vec::new();

    for block in normalized.split("\n\n") {
        let mut block_lines = block.lines();
        // Header, NOTE, STYLE and REGION blocks have no timing line.
        if !block_lines.any(|l| l.contains("-->")) {
            continue;
        }
        for raw in block_lines {
            let text = decode_entities(&INLINE_TAG.replace_all(raw, ""));
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if lines.last().is_some_and(|last| last == text) {
                continue;
            }
            lines.push(text.to_string());
        }
    }

    lines.join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
