use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::domain::normalize;
use super::model::Preset;

/// Address family for the null redirect target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn null_address(self) -> &'static str {
        match self {
            AddressFamily::V4 => "0.0.0.0",
            AddressFamily::V6 => "::",
        }
    }
}

/// One logical hosts-file entry redirecting a domain to the null address.
/// Renders as exactly `"<address> <domain>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockEntry {
    pub family: AddressFamily,
    pub domain: String,
}

impl BlockEntry {
    pub fn v4(domain: impl Into<String>) -> Self {
        Self {
            family: AddressFamily::V4,
            domain: domain.into(),
        }
    }

    pub fn v6(domain: impl Into<String>) -> Self {
        Self {
            family: AddressFamily::V6,
            domain: domain.into(),
        }
    }
}

impl fmt::Display for BlockEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family.null_address(), self.domain)
    }
}

/// Expand a preset into block entries, lazily, one base domain at a time.
///
/// Dedup is case-insensitive and scoped to this single call. Order is
/// deterministic: base domains in input order, each immediately followed by
/// its variant-derived subdomains in variant order. Variants are derived from
/// the normalized base domain even when that base was itself a duplicate.
pub fn expand(preset: &Preset) -> impl Iterator<Item = BlockEntry> + '_ {
    let mut seen: HashSet<String> = HashSet::new();
    preset.domains.iter().flat_map(move |raw| {
        let domain = normalize(raw);
        let mut out = Vec::new();
        if seen.insert(domain.to_ascii_lowercase()) {
            out.push(BlockEntry::v4(domain.clone()));
            if preset.ipv6 {
                out.push(BlockEntry::v6(domain.clone()));
            }
        }
        for variant in &preset.auto_variants {
            let sub = format!("{}.{}", variant.trim_matches('.'), domain);
            if seen.insert(sub.to_ascii_lowercase()) {
                out.push(BlockEntry::v4(sub.clone()));
                if preset.ipv6 {
                    out.push(BlockEntry::v6(sub));
                }
            }
        }
        out
    })
}

/// Convenience for callers that want the rendered lines.
pub fn expand_lines(preset: &Preset) -> Vec<String> {
    expand(preset).map(|e| e.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(domains: &[&str], variants: &[&str], ipv6: bool) -> Preset {
        Preset {
            name: "test".to_string(),
            domains: domains.iter().map(|s| s.to_string()).collect(),
            auto_variants: variants.iter().map(|s| s.to_string()).collect(),
            ipv6,
        }
    }

    #[test]
    fn test_base_then_variants_with_ipv6_mirror() {
        let lines = expand_lines(&preset(&["a.com"], &["www", "m"], true));
        assert_eq!(
            lines,
            vec![
                "0.0.0.0 a.com",
                ":: a.com",
                "0.0.0.0 www.a.com",
                ":: www.a.com",
                "0.0.0.0 m.a.com",
                ":: m.a.com",
            ]
        );
    }

    #[test]
    fn test_ipv6_disabled_emits_v4_only() {
        let lines = expand_lines(&preset(&["ads.com"], &[], false));
        assert_eq!(lines, vec!["0.0.0.0 ads.com"]);
    }

    #[test]
    fn test_duplicate_domains_emitted_once() {
        let lines = expand_lines(&preset(&["x.com", "x.com"], &[], true));
        assert_eq!(lines, vec!["0.0.0.0 x.com", ":: x.com"]);
    }

    #[test]
    fn test_dedup_is_case_insensitive() {
        let lines = expand_lines(&preset(&["A.com", "a.com"], &["www"], true));
        assert_eq!(
            lines,
            vec!["0.0.0.0 A.com", ":: A.com", "0.0.0.0 www.A.com", ":: www.A.com"]
        );
    }

    #[test]
    fn test_variants_derived_even_for_duplicate_base() {
        // Second pass over the duplicate base still tries its variants, so a
        // variant unseen on the first pass cannot sneak through twice.
        let lines = expand_lines(&preset(&["x.com", "x.com"], &["www"], false));
        assert_eq!(lines, vec!["0.0.0.0 x.com", "0.0.0.0 www.x.com"]);
    }

    #[test]
    fn test_variant_dots_trimmed() {
        let lines = expand_lines(&preset(&["x.com"], &[".www."], false));
        assert_eq!(lines, vec!["0.0.0.0 x.com", "0.0.0.0 www.x.com"]);
    }

    #[test]
    fn test_domains_normalized_before_expansion() {
        let lines = expand_lines(&preset(&["https://x.com/track"], &["www"], false));
        assert_eq!(lines, vec!["0.0.0.0 x.com", "0.0.0.0 www.x.com"]);
    }

    #[test]
    fn test_expansion_is_lazy() {
        let p = preset(&["a.com", "b.com"], &[], false);
        let mut it = expand(&p);
        assert_eq!(it.next().unwrap().to_string(), "0.0.0.0 a.com");
        assert_eq!(it.next().unwrap().to_string(), "0.0.0.0 b.com");
        assert!(it.next().is_none());
    }
}
