//! Ticker normalization
//!
//! Users type friendly names; Yahoo wants its own tickers for futures and FX.

use crate::error::{Result, SnapshotError};

/// Friendly alias → provider ticker. Exact matches only.
pub const SYMBOL_ALIASES: &[(&str, &str)] = &[
    ("GOLD", "GC=F"),
    ("EURUSD", "EURUSD=X"),
    ("GBPUSD", "GBPUSD=X"),
];

/// Map a friendly alias to its provider ticker, passing anything else through
pub fn resolve_alias(symbol: &str) -> &str {
    SYMBOL_ALIASES
        .iter()
        .find(|&&(alias, _)| alias == symbol)
        .map_or(symbol, |&(_, ticker)| ticker)
}

/// Trim, uppercase and resolve aliases
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let cleaned = raw.trim().to_uppercase();
    if cleaned.is_empty() {
        return Err(SnapshotError::InvalidSymbol(raw.to_string()));
    }
    Ok(resolve_alias(&cleaned).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(resolve_alias("GOLD"), "GC=F");
        assert_eq!(resolve_alias("EURUSD"), "EURUSD=X");
        assert_eq!(resolve_alias("GBPUSD"), "GBPUSD=X");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(resolve_alias("BTC-USD"), "BTC-USD");
        assert_eq!(resolve_alias("GBPUSD=X"), "GBPUSD=X");
        // no partial matching
        assert_eq!(resolve_alias("GOLDX"), "GOLDX");
        assert_eq!(resolve_alias("GOL"), "GOL");
    }

    #[test]
    fn test_normalize_uppercases_before_lookup() {
        assert_eq!(normalize_symbol(" gold ").unwrap(), "GC=F");
        assert_eq!(normalize_symbol("aapl").unwrap(), "AAPL");
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(matches!(
            normalize_symbol("   "),
            Err(SnapshotError::InvalidSymbol(_))
        ));
    }
}
