use crate::blocklist::expand::BlockEntry;

pub const CATEGORY_BEGIN: &str = "# BEGIN CATEGORY: ";
pub const CATEGORY_END: &str = "# END CATEGORY: ";
pub const SINGLE_ENTRY_PREFIX: &str = "# Blocked site: ";

/// What a hosts-file line is, once classified. Payloads carry the parsed
/// piece the document logic cares about; the raw text lives on [`Line`] so
/// lines this tool did not write render back byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// Comment or anything else we do not act on.
    Plain,
    /// `<address> <domain>` mapping, ours or pre-existing.
    Entry,
    CategoryStart(String),
    CategoryEnd(String),
    /// `# Blocked site: <domain>` marker above a manual entry.
    SingleEntryComment(String),
}

/// One hosts-file line: original text plus its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub raw: String,
    pub kind: LineKind,
}

impl Line {
    /// Classify one raw line read from disk.
    pub fn classify(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = classify_kind(&raw);
        Self { raw, kind }
    }

    pub fn blank() -> Self {
        Self {
            raw: String::new(),
            kind: LineKind::Blank,
        }
    }

    pub fn category_start(name: &str) -> Self {
        Self {
            raw: format!("{CATEGORY_BEGIN}{name}"),
            kind: LineKind::CategoryStart(name.to_string()),
        }
    }

    pub fn category_end(name: &str) -> Self {
        Self {
            raw: format!("{CATEGORY_END}{name}"),
            kind: LineKind::CategoryEnd(name.to_string()),
        }
    }

    pub fn single_entry_comment(domain: &str) -> Self {
        Self {
            raw: format!("{SINGLE_ENTRY_PREFIX}{domain}"),
            kind: LineKind::SingleEntryComment(domain.to_string()),
        }
    }

    pub fn entry(entry: &BlockEntry) -> Self {
        Self {
            raw: entry.to_string(),
            kind: LineKind::Entry,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }
}

fn classify_kind(raw: &str) -> LineKind {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if let Some(name) = trimmed.strip_prefix(CATEGORY_BEGIN) {
        return LineKind::CategoryStart(name.to_string());
    }
    if let Some(name) = trimmed.strip_prefix(CATEGORY_END) {
        return LineKind::CategoryEnd(name.to_string());
    }
    if let Some(domain) = trimmed.strip_prefix(SINGLE_ENTRY_PREFIX) {
        return LineKind::SingleEntryComment(domain.to_string());
    }
    if trimmed.starts_with('#') {
        return LineKind::Plain;
    }
    let mut fields = trimmed.split_whitespace();
    if let (Some(first), Some(_)) = (fields.next(), fields.next()) {
        if first.parse::<std::net::IpAddr>().is_ok() {
            return LineKind::Entry;
        }
    }
    LineKind::Plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_classification() {
        assert_eq!(Line::classify("").kind, LineKind::Blank);
        assert_eq!(Line::classify("   \t").kind, LineKind::Blank);
    }

    #[test]
    fn test_marker_classification() {
        assert_eq!(
            Line::classify("# BEGIN CATEGORY: social").kind,
            LineKind::CategoryStart("social".to_string())
        );
        assert_eq!(
            Line::classify("# END CATEGORY: social").kind,
            LineKind::CategoryEnd("social".to_string())
        );
        assert_eq!(
            Line::classify("# Blocked site: x.com").kind,
            LineKind::SingleEntryComment("x.com".to_string())
        );
    }

    #[test]
    fn test_entry_classification() {
        assert_eq!(Line::classify("0.0.0.0 ads.com").kind, LineKind::Entry);
        assert_eq!(Line::classify(":: ads.com").kind, LineKind::Entry);
        assert_eq!(Line::classify("127.0.0.1 localhost").kind, LineKind::Entry);
    }

    #[test]
    fn test_plain_classification() {
        assert_eq!(Line::classify("# a comment").kind, LineKind::Plain);
        assert_eq!(Line::classify("not an entry").kind, LineKind::Plain);
        assert_eq!(Line::classify("bare-token").kind, LineKind::Plain);
    }

    #[test]
    fn test_classification_keeps_raw_text() {
        let line = Line::classify("  0.0.0.0   ads.com  ");
        assert_eq!(line.kind, LineKind::Entry);
        assert_eq!(line.raw, "  0.0.0.0   ads.com  ");
    }

    #[test]
    fn test_constructed_lines_render_exact_format() {
        assert_eq!(Line::category_start("x").raw, "# BEGIN CATEGORY: x");
        assert_eq!(Line::category_end("x").raw, "# END CATEGORY: x");
        assert_eq!(Line::single_entry_comment("d.com").raw, "# Blocked site: d.com");
        assert_eq!(
            Line::entry(&BlockEntry::v4("d.com")).raw,
            "0.0.0.0 d.com"
        );
    }
}
