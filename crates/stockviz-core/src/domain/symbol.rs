use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized ticker symbol.
///
/// Watchlist entries and API path segments are always built from this type,
/// so two spellings of the same ticker (`aapl`, ` AAPL `) compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !(first.is_ascii_alphanumeric() || first == '^') {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        // Exchange-qualified tickers: `7203.T`, `BINANCE:BTCUSDT`, `^GSPC`, `EURUSD=X`.
        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | ':' | '^' | '=');
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "AAPL");
    }

    #[test]
    fn accepts_class_shares_and_suffixes() {
        assert_eq!(Symbol::parse("brk.b").expect("valid").as_str(), "BRK.B");
        assert_eq!(Symbol::parse("RDS-A").expect("valid").as_str(), "RDS-A");
    }

    #[test]
    fn accepts_exchange_qualified_tickers() {
        assert_eq!(Symbol::parse("7203.t").expect("valid").as_str(), "7203.T");
        assert_eq!(
            Symbol::parse("binance:btcusdt").expect("valid").as_str(),
            "BINANCE:BTCUSDT"
        );
        assert_eq!(Symbol::parse("^gspc").expect("valid").as_str(), "^GSPC");
        assert_eq!(Symbol::parse("EURUSD=X").expect("valid").as_str(), "EURUSD=X");
    }

    #[test]
    fn rejects_invalid_start() {
        let err = Symbol::parse(".AAPL").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidStart { ch: '.' }));
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Symbol::parse("AAPL/../x").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { ch: '/', .. }));
    }

    #[test]
    fn deserializes_through_validation() {
        let parsed: Vec<Symbol> = serde_json::from_str(r#"["msft","googl"]"#).expect("json");
        assert_eq!(parsed[0].as_str(), "MSFT");

        let err = serde_json::from_str::<Symbol>(r#""""#);
        assert!(err.is_err());
    }
}
