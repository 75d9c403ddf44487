use std::collections::HashMap;
use anyhow::{anyhow, Result};

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub positional: String,
    pub metadata: HashMap<String, String>,
}

/// Splits quick-add input into the URL part and `key:value` options.
/// URLs such as `https://...` are never read as options.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut positional = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            let is_key = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic());
            if is_key && !value.is_empty() && !value.starts_with("//") {
                metadata.insert(key.to_lowercase(), value.to_string());
                continue;
            }
        }
        positional.push(arg.as_str());
    }

    ParsedInput {
        positional: positional.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}
