use serde::Serialize;

/// One named group of domains to block, plus optional subdomain variants
/// that get prepended to every base domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: String,
    pub domains: Vec<String>,
    pub auto_variants: Vec<String>,
    /// Mirror every entry with a `::` line. On unless the document says otherwise.
    pub ipv6: bool,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            name: String::new(),
            domains: Vec::new(),
            auto_variants: Vec::new(),
            ipv6: true,
        }
    }
}

/// Parsed shape of one blocklist JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockListFile {
    pub presets: Vec<Preset>,
}
