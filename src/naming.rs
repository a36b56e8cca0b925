//! Identifier sanitization shared by all targets.
use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("static regex"));

/// Map an arbitrary rule/attribute name to a legal identifier:
/// - non-word characters become `_`
/// - a leading digit gets a `_` prefix
/// - keywords get a `_` suffix
pub fn safe_name(name: &str, is_keyword: impl Fn(&str) -> bool) -> String {
    let mut out = NON_WORD.replace_all(name, "_").into_owned();
    if out.is_empty() {
        return "_".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if is_keyword(&out) {
        out.push('_');
    }
    out
}
