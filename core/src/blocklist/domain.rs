use std::sync::OnceLock;

use regex::Regex;

fn scheme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^https?://").unwrap())
}

/// Canonicalize a raw domain string: trim, drop a leading http(s) scheme,
/// cut everything from the first `/`, strip trailing dots. Never fails;
/// degenerate input comes back empty.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = scheme_re().replace(trimmed, "");
    let host = match without_scheme.find('/') {
        Some(idx) => &without_scheme[..idx],
        None => without_scheme.as_ref(),
    };
    host.trim().trim_end_matches('.').to_string()
}
