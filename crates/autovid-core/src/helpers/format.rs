// crates/autovid-core/src/helpers/format.rs
//
// Label shortening for the thumbnail strip. Counts characters, not bytes,
// so multibyte file names never split a codepoint.

/// Names up to this many characters are shown whole.
pub const MAX_LABEL_CHARS: usize = 15;
/// Characters kept before the "..." when a name is too long.
pub const KEEP_LABEL_CHARS: usize = 12;

/// `clip_from_last_night.mp4` → `clip_from_la...`
pub fn short_label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_CHARS {
        return name.to_string();
    }
    name.chars().take(KEEP_LABEL_CHARS).collect::<String>() + "..."
}

/// `"3 videos"` style counter. Always plural.
pub fn count_label(n: usize, noun: &str) -> String {
    format!("{n} {noun}s")
}
