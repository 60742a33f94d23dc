//! Fixed labels for media apps, applied before the model is consulted.
//!
//! Spotify is always distracting. YouTube is productive only when the window
//! title names a study topic as a whole word, otherwise distracting.

/// Title words that make a YouTube window count as study.
pub const EDUCATIONAL_KEYWORDS: &[&str] = &[
    "class",
    "lecture",
    "unit",
    "chapter",
    "lesson",
    "tutorial",
    "course",
    "study",
    "java",
    "programming",
    "dsa",
    "concepts",
    "python",
    "fundamental",
];

pub const DISTRACTING: &str = "distracting";
pub const PRODUCTIVE: &str = "productive";

/// True when `title` contains an educational keyword as a whole word.
///
/// Words are ASCII alphanumeric/underscore runs, compared case-insensitively.
pub fn has_educational_keyword(title: &str) -> bool {
    title
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .any(|word| {
            EDUCATIONAL_KEYWORDS
                .iter()
                .any(|keyword| word.eq_ignore_ascii_case(keyword))
        })
}

/// Label forced by the media rules, or `None` to ask the model.
pub fn media_override(app_name: &str, window_title: &str) -> Option<&'static str> {
    let combined = format!("{app_name} {window_title}").to_lowercase();

    if combined.contains("spotify") {
        return Some(DISTRACTING);
    }
    if combined.contains("youtube") {
        return Some(if has_educational_keyword(window_title) {
            PRODUCTIVE
        } else {
            DISTRACTING
        });
    }
    None
}
