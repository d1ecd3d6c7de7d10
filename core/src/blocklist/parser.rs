use std::fs;
use std::path::Path;

use serde_json::Value;

use super::model::{BlockListFile, Preset};
use crate::error::{BlockerError, BlockerResult};

/// Parse a blocklist document, degrading anything malformed to an empty
/// preset list. Field names match case-insensitively; the historical
/// `Auto_Varients` spelling is accepted alongside `auto_variants`.
pub fn parse_blocklist(json: &str) -> BlockListFile {
    parse_blocklist_strict(json).unwrap_or_default()
}

/// Strict variant of [`parse_blocklist`] that reports the parse failure
/// instead of swallowing it.
pub fn parse_blocklist_strict(json: &str) -> BlockerResult<BlockListFile> {
    let root: Value = serde_json::from_str(json)
        .map_err(|e| BlockerError::MalformedBlocklist(e.to_string()))?;
    let presets = match field(&root, "presets").and_then(Value::as_array) {
        Some(arr) => arr.iter().filter_map(parse_preset).collect(),
        None => Vec::new(),
    };
    Ok(BlockListFile { presets })
}

/// Read and parse a blocklist file. Only I/O failures propagate; malformed
/// content yields an empty preset list like [`parse_blocklist`].
pub fn load_blocklist(path: &Path) -> BlockerResult<BlockListFile> {
    let text = fs::read_to_string(path).map_err(|e| BlockerError::from_io(e, path))?;
    Ok(parse_blocklist(&text))
}

fn parse_preset(v: &Value) -> Option<Preset> {
    v.as_object()?;
    Some(Preset {
        name: field(v, "name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        domains: string_seq(field(v, "domains")),
        auto_variants: string_seq(
            field(v, "auto_variants").or_else(|| field(v, "auto_varients")),
        ),
        ipv6: field(v, "ipv6").and_then(Value::as_bool).unwrap_or(true),
    })
}

fn field<'a>(v: &'a Value, name: &str) -> Option<&'a Value> {
    v.as_object()?
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, val)| val)
}

fn string_seq(v: Option<&Value>) -> Vec<String> {
    v.and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
