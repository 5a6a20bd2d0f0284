use anyhow::{Context, Result};
use chrono::Utc;
use partyspill_game::BoardConfig;
use partyspill_game::seed::seed_from_str;
use std::path::Path;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Numeric seeds are used as-is; anything else is hashed the same way the
/// game hashes seed strings.
pub fn resolve_seeds(tokens: &[String]) -> Vec<u64> {
    tokens
        .iter()
        .map(|token| token.parse::<u64>().unwrap_or_else(|_| seed_from_str(token)))
        .collect()
}

pub fn load_config(path: Option<&Path>) -> Result<BoardConfig> {
    let Some(path) = path else {
        return Ok(BoardConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    BoardConfig::from_json(&json)
        .with_context(|| format!("invalid board config {}", path.display()))
}

pub fn report_stamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
