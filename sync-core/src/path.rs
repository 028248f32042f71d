//! Heuristic validation of user-typed directory paths.
//!
//! The directory field on the hosting form doubles as a display for file
//! picker results ("3 media files selected"), so free text submitted from it
//! may be UI-generated description rather than a path. [`is_valid_path`]
//! tells the two apart without touching the filesystem.
//!
//! Rules, in order:
//! 1. empty input is rejected;
//! 2. short input (under 10 characters) that looks like display text is
//!    rejected, even when it also looks like a path;
//! 3. input matching a known path shape is accepted, and so is any input
//!    longer than 3 characters that contains a separator.

/// Inputs shorter than this (in characters) are checked against the
/// display-text patterns.
pub const DISPLAY_TEXT_MAX_LEN: usize = 10;

/// Separator-bearing input must be longer than this to be accepted without
/// matching a known shape.
pub const MIN_SEPARATED_LEN: usize = 3;

/// Folder names accepted on their own, compared case-insensitively.
const WELL_KNOWN_FOLDERS: &[&str] = &[
    "desktop",
    "documents",
    "downloads",
    "music",
    "pictures",
    "videos",
    "movies",
    "media",
    "my documents",
    "my music",
    "my pictures",
    "my videos",
];

/// Returns true when `input` plausibly names a directory.
pub fn is_valid_path(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }

    let len = trimmed.chars().count();
    if len < DISPLAY_TEXT_MAX_LEN && looks_like_display_text(trimmed) {
        return false;
    }

    if matches_path_shape(trimmed) {
        return true;
    }

    has_separator(trimmed) && len > MIN_SEPARATED_LEN
}

/// Trim a raw directory string and strip surrounding quote characters.
///
/// Paths pasted from a file manager often arrive wrapped in quotes.
pub fn normalize_directory(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn has_separator(s: &str) -> bool {
    s.chars().any(is_separator)
}

fn looks_like_display_text(s: &str) -> bool {
    is_selection_summary(s) || s.to_lowercase().contains("selected") || !has_separator(s)
}

/// Matches `"<N> media file selected"` / `"<N> media files selected"`.
fn is_selection_summary(s: &str) -> bool {
    let lower = s.to_lowercase();
    let digits = lower.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    matches!(
        &lower[digits..],
        " media file selected" | " media files selected"
    )
}

fn matches_path_shape(s: &str) -> bool {
    has_drive_prefix(s)
        || s.starts_with('/')
        || has_relative_prefix(s)
        || has_leading_segment(s)
        || is_well_known_folder(s)
}

/// `C:\...` or `C:/...`
fn has_drive_prefix(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(drive), Some(':'), Some(sep)) if drive.is_ascii_alphabetic() && is_separator(sep)
    )
}

/// `./`, `../`, `~/` and their backslash forms.
fn has_relative_prefix(s: &str) -> bool {
    ["./", ".\\", "../", "..\\", "~/", "~\\"]
        .iter()
        .any(|prefix| s.starts_with(prefix))
}

/// A plain folder name followed by a separator, e.g. `media/clips`.
fn has_leading_segment(s: &str) -> bool {
    let segment_len = s
        .chars()
        .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '))
        .count();
    segment_len > 0 && s.chars().nth(segment_len).is_some_and(is_separator)
}

fn is_well_known_folder(s: &str) -> bool {
    let lower = s.to_lowercase();
    WELL_KNOWN_FOLDERS.iter().any(|name| *name == lower)
}
