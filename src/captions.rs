use regex::Regex;

/// Flatten a raw VTT caption document into deduplicated plain text.
///
/// Auto-generated tracks repeat each spoken line across several overlapping
/// cues, so a line is kept only when it differs from the previously retained
/// one. Non-adjacent repeats (a refrain, say) survive.
pub fn normalize(raw: &str) -> String {
    let timestamp = Regex::new(r"^\d{2}:\d{2}:\d{2}\.\d{3}").unwrap();
    let metadata = Regex::new(r"(?i)^(Kind:|Language:)").unwrap();
    let cue_index = Regex::new(r"^\d+$").unwrap();
    let tags = Regex::new(r"<[^>]*>").unwrap();

    let mut lines: Vec<String> = Vec::new();
    let mut previous = String::new();

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty()
            || trimmed.contains("WEBVTT")
            || cue_index.is_match(trimmed)
            || timestamp.is_match(trimmed)
            || metadata.is_match(trimmed)
        {
            continue;
        }

        let cleaned = tags.replace_all(trimmed, "").trim().to_string();

        if !cleaned.is_empty() && cleaned != previous {
            previous = cleaned.clone();
            lines.push(cleaned);
        }
    }

    lines.join(" ")
}
