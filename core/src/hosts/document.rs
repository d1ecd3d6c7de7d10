use std::fs;
use std::path::Path;

use super::line::{Line, SINGLE_ENTRY_PREFIX};
use crate::blocklist::expand::BlockEntry;
use crate::error::{BlockerError, BlockerResult};

/// In-memory, line-oriented view of the hosts file.
///
/// Callers run one load, one mutation, one save; nothing is cached between
/// operations, so each operation sees whatever is on disk at that moment.
/// The document enforces no uniqueness across lines; dedup of block entries
/// is the expander's per-call concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsDocument {
    lines: Vec<Line>,
}

impl HostsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and classify the file. Missing file is an error here, not an
    /// empty document; the engine never creates the hosts file from scratch.
    pub fn load(path: &Path) -> BlockerResult<Self> {
        if !path.exists() {
            return Err(BlockerError::HostsFileMissing(path.display().to_string()));
        }
        let text = fs::read_to_string(path).map_err(|e| BlockerError::from_io(e, path))?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(Line::classify).collect(),
        }
    }

    /// Whole-file overwrite, one trailing newline per line.
    pub fn save(&self, path: &Path) -> BlockerResult<()> {
        fs::write(path, self.render()).map_err(|e| BlockerError::from_io(e, path))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.raw);
            out.push('\n');
        }
        out
    }

    /// Raw text of every line, in order.
    pub fn raw_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.raw.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a delimited category block followed by one blank separator.
    /// Deliberately no check for an existing block with the same name:
    /// re-applying a category appends a second block.
    pub fn append_category_block(
        &mut self,
        name: &str,
        entries: impl IntoIterator<Item = BlockEntry>,
    ) {
        self.lines.push(Line::category_start(name));
        for entry in entries {
            self.lines.push(Line::entry(&entry));
        }
        self.lines.push(Line::category_end(name));
        self.lines.push(Line::blank());
    }

    /// Append one manual entry: comment marker, v4 entry line, blank
    /// separator. The three lines form the unit `remove_entry` takes out.
    pub fn append_single_entry(&mut self, domain: &str) {
        self.lines.push(Line::single_entry_comment(domain));
        self.lines.push(Line::entry(&BlockEntry::v4(domain)));
        self.lines.push(Line::blank());
    }

    /// Remove the first entry whose comment line matches `# <domain>` or
    /// `# Blocked site: <domain>` (trimmed, case-insensitive), together with
    /// every following non-blank line and the blank that ends the unit.
    /// Later duplicates are untouched. Returns whether anything was removed.
    pub fn remove_entry(&mut self, domain: &str) -> bool {
        let bare = format!("# {domain}");
        let tagged = format!("{SINGLE_ENTRY_PREFIX}{domain}");
        let start = self.lines.iter().position(|l| {
            let t = l.raw.trim();
            t.eq_ignore_ascii_case(&bare) || t.eq_ignore_ascii_case(&tagged)
        });
        let Some(start) = start else {
            return false;
        };

        let mut end = start + 1;
        while end < self.lines.len() && !self.lines[end].is_blank() {
            end += 1;
        }
        if end < self.lines.len() {
            // take the blank separator with the unit
            end += 1;
        }
        self.lines.drain(start..end);
        self.collapse_blank_runs();
        true
    }

    /// Collapse runs of two or more blank lines down to one, scanning from
    /// the end of the file backward.
    fn collapse_blank_runs(&mut self) {
        if self.lines.len() < 2 {
            return;
        }
        let mut i = self.lines.len() - 2;
        loop {
            if self.lines[i].is_blank() && self.lines[i + 1].is_blank() {
                self.lines.remove(i + 1);
            }
            if i == 0 {
                break;
            }
            i -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> HostsDocument {
        HostsDocument::parse(&lines.join("\n"))
    }

    fn raw(doc: &HostsDocument) -> Vec<String> {
        doc.raw_lines().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_render_round_trip() {
        let text = "127.0.0.1 localhost\n\n# comment\n0.0.0.0 ads.com\n";
        let d = HostsDocument::parse(text);
        assert_eq!(d.render(), text);
    }

    #[test]
    fn test_append_category_block() {
        let mut d = doc(&["127.0.0.1 localhost"]);
        d.append_category_block("test", vec![BlockEntry::v4("ads.com")]);
        assert_eq!(
            raw(&d),
            vec![
                "127.0.0.1 localhost",
                "# BEGIN CATEGORY: test",
                "0.0.0.0 ads.com",
                "# END CATEGORY: test",
                "",
            ]
        );
    }

    #[test]
    fn test_reapplying_category_duplicates_block() {
        let mut d = HostsDocument::new();
        d.append_category_block("x", vec![BlockEntry::v4("a.com")]);
        d.append_category_block("x", vec![BlockEntry::v4("a.com")]);
        let begins = d
            .raw_lines()
            .filter(|l| *l == "# BEGIN CATEGORY: x")
            .count();
        assert_eq!(begins, 2);
    }

    #[test]
    fn test_single_entry_round_trip() {
        let before = ["127.0.0.1 localhost", "", "# keep me"];
        let mut d = doc(&before);
        d.append_single_entry("bad.com");
        assert!(d.remove_entry("bad.com"));
        assert_eq!(raw(&d), before.to_vec());
    }

    #[test]
    fn test_remove_matches_tagged_comment() {
        let mut d = doc(&["# Blocked site: bad.com", "0.0.0.0 bad.com", "", "keep"]);
        assert!(d.remove_entry("bad.com"));
        assert_eq!(raw(&d), vec!["keep"]);
    }

    #[test]
    fn test_remove_matches_bare_comment() {
        let mut d = doc(&["# bad.com", "0.0.0.0 bad.com", ":: bad.com", "", "keep"]);
        assert!(d.remove_entry("bad.com"));
        assert_eq!(raw(&d), vec!["keep"]);
    }

    #[test]
    fn test_remove_is_case_insensitive() {
        let mut d = doc(&["# Blocked site: BAD.com", "0.0.0.0 BAD.com", ""]);
        assert!(d.remove_entry("bad.COM"));
        assert!(d.is_empty());
    }

    #[test]
    fn test_remove_absent_domain_is_noop() {
        let before = ["127.0.0.1 localhost", "", "# other.com note"];
        let mut d = doc(&before);
        assert!(!d.remove_entry("missing.com"));
        assert_eq!(raw(&d), before.to_vec());
    }

    #[test]
    fn test_remove_only_first_match() {
        let mut d = doc(&[
            "# Blocked site: dup.com",
            "0.0.0.0 dup.com",
            "",
            "# Blocked site: dup.com",
            "0.0.0.0 dup.com",
            "",
        ]);
        assert!(d.remove_entry("dup.com"));
        assert_eq!(
            raw(&d),
            vec!["# Blocked site: dup.com", "0.0.0.0 dup.com", ""]
        );
    }

    #[test]
    fn test_remove_runs_to_eof_without_blank() {
        let mut d = doc(&["keep", "# Blocked site: bad.com", "0.0.0.0 bad.com"]);
        assert!(d.remove_entry("bad.com"));
        assert_eq!(raw(&d), vec!["keep"]);
    }

    #[test]
    fn test_remove_collapses_new_blank_runs() {
        // unit sits between two blanks; removal would leave two in a row
        let mut d = doc(&["keep", "", "# Blocked site: bad.com", "0.0.0.0 bad.com", "", "tail"]);
        assert!(d.remove_entry("bad.com"));
        assert_eq!(raw(&d), vec!["keep", "", "tail"]);
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        let mut d = doc(&["# Blocked site: bad.com", "0.0.0.0 bad.com", "   ", "keep"]);
        assert!(d.remove_entry("bad.com"));
        assert_eq!(raw(&d), vec!["keep"]);
    }
}
