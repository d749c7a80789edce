//! # stockviz-ui
//!
//! Page controller and plain-text components for the stockviz viewer.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`controller`] | Page state, selection, range and watchlist actions |
//! | [`search_box`] | Debounced search with a results dropdown |
//! | [`quote_card`] | Quote summary and value formatting |
//! | [`chart`] | Closing-price chart with range selector |
//! | [`page`] | Full page composition |
//! | [`debounce`] | Cancellable delayed task |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockviz_core::{ApiConfig, StockApi, Symbol};
//! use stockviz_store::{DuckDbStore, WatchlistRepository};
//! use stockviz_ui::{render_page, PageController};
//!
//! let api = StockApi::with_reqwest(ApiConfig::from_env());
//! let watchlist = WatchlistRepository::new(Arc::new(DuckDbStore::open_default()?));
//! let mut page = PageController::new(api, watchlist);
//!
//! page.load_watchlist().await;
//! page.select_symbol(Symbol::parse("AAPL")?).await;
//! println!("{}", render_page(page.state(), None));
//! ```

pub mod chart;
pub mod controller;
pub mod debounce;
pub mod page;
pub mod quote_card;
pub mod search_box;

pub use chart::{price_change, PriceChange, StockChart, EMPTY_HISTORY_MESSAGE};
pub use controller::{PageController, PageState, RangeTicket, SelectionTicket, WatchlistTicket};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use page::{render_page, render_watchlist};
pub use quote_card::{
    format_change, format_percent, format_price, CardAction, CardTarget, QuoteCard,
};
pub use search_box::{SearchBox, SearchEvent, NO_MATCHES_MESSAGE};
