//! Quote card: price, daily move and OHLC summary for one symbol.

use stockviz_core::{Quote, Symbol};

/// `$` prefix, two decimals.
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// Absolute value, two decimals; the sign is carried by the trend marker.
pub fn format_change(value: f64) -> String {
    format!("{:.2}", value.abs())
}

/// Signed percentage with a leading `+` for non-negative values.
pub fn format_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

pub fn trend_marker(positive: bool) -> &'static str {
    if positive {
        "▲"
    } else {
        "▼"
    }
}

fn star(in_watchlist: bool) -> &'static str {
    if in_watchlist {
        "★"
    } else {
        "☆"
    }
}

/// Region of the card that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    Body,
    Star,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Select(Symbol),
    ToggleWatchlist(Symbol),
}

pub struct QuoteCard<'a> {
    quote: &'a Quote,
    in_watchlist: bool,
}

impl<'a> QuoteCard<'a> {
    pub fn new(quote: &'a Quote, in_watchlist: bool) -> Self {
        Self {
            quote,
            in_watchlist,
        }
    }

    /// A star click yields only the toggle; it never also selects the card.
    pub fn click(&self, target: CardTarget) -> CardAction {
        let symbol = self.quote.symbol.clone();
        match target {
            CardTarget::Body => CardAction::Select(symbol),
            CardTarget::Star => CardAction::ToggleWatchlist(symbol),
        }
    }

    pub fn render(&self) -> String {
        let quote = self.quote;
        let mut lines = Vec::with_capacity(6);

        lines.push(format!(
            "{}  {}  {}",
            quote.symbol,
            quote.name,
            star(self.in_watchlist)
        ));
        lines.push(format!(
            "{}  {} {} ({})",
            format_price(quote.current_price),
            trend_marker(quote.is_positive()),
            format_change(quote.change),
            format_percent(quote.change_percent)
        ));
        lines.push(format!(
            "Open {:<12} Prev close {}",
            format_price(quote.open),
            format_price(quote.previous_close)
        ));
        lines.push(format!(
            "High {:<12} Low {}",
            format_price(quote.high),
            format_price(quote.low)
        ));
        if let Some(volume) = quote.volume {
            lines.push(format!("Volume {}", group_thousands(volume)));
        }
        lines.push(format!("Updated {}", quote.timestamp));

        lines.join("\n")
    }

    /// Single-line form used by the watchlist panel.
    pub fn render_compact(&self) -> String {
        let quote = self.quote;
        format!(
            "{:<8} {:<24} {:>12} {}",
            quote.symbol.as_str(),
            truncate(&quote.name, 24),
            format_price(quote.current_price),
            format_percent(quote.change_percent)
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_owned();
    }
    let mut truncated: String = value.chars().take(max.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockviz_core::EpochMillis;

    fn quote(change: f64, change_percent: f64) -> Quote {
        Quote {
            symbol: Symbol::parse("AAPL").expect("symbol"),
            name: String::from("Apple Inc."),
            current_price: 150.256,
            change,
            change_percent,
            open: 149.0,
            high: 151.5,
            low: 148.25,
            previous_close: 149.1,
            volume: Some(1_234_567),
            timestamp: EpochMillis::new(1_700_000_000_000),
        }
    }

    #[test]
    fn price_is_rounded_to_cents() {
        assert_eq!(format_price(150.256), "$150.26");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn percent_carries_explicit_sign() {
        assert_eq!(format_percent(0.0), "+0.00%");
        assert_eq!(format_percent(1.234), "+1.23%");
        assert_eq!(format_percent(-2.5), "-2.50%");
        assert_eq!(format_change(-1.156), "1.16");
    }

    #[test]
    fn render_shows_price_and_positive_marker() {
        let quote = quote(1.15, 0.77);
        let rendered = QuoteCard::new(&quote, false).render();

        assert!(rendered.contains("$150.26"));
        assert!(rendered.contains("▲ 1.15 (+0.77%)"));
        assert!(rendered.contains("Volume 1,234,567"));
        assert!(rendered.contains("☆"));
    }

    #[test]
    fn zero_change_counts_as_positive() {
        let quote = quote(0.0, 0.0);
        assert!(QuoteCard::new(&quote, true).render().contains("▲"));
    }

    #[test]
    fn star_click_only_toggles() {
        let quote = quote(-1.0, -0.5);
        let card = QuoteCard::new(&quote, true);
        let symbol = Symbol::parse("AAPL").expect("symbol");

        assert_eq!(card.click(CardTarget::Star), CardAction::ToggleWatchlist(symbol.clone()));
        assert_eq!(card.click(CardTarget::Body), CardAction::Select(symbol));
        assert!(card.render().contains("▼ 1.00 (-0.50%)"));
    }

    #[test]
    fn compact_row_truncates_long_names() {
        let mut quote = quote(1.0, 0.5);
        quote.name = String::from("An Extremely Long Company Name Incorporated");
        let row = QuoteCard::new(&quote, true).render_compact();

        assert!(row.starts_with("AAPL"));
        assert!(row.contains('…'));
        assert!(row.ends_with("+0.50%"));
    }
}
