use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s-]").expect("valid regex");
}

/// Filesystem/URL-safe form of a section name: lowercase, each whitespace
/// run becomes one underscore, then anything outside `[\w\s-]` is dropped.
/// Underscoring happens first, so a stripped character between two spaces
/// leaves both underscores behind ("A & B" -> "a__b").
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let underscored = WHITESPACE.replace_all(&lowered, "_");
    NON_WORD.replace_all(&underscored, "").into_owned()
}
