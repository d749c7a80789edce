//! Closing-price chart with a range selector.
//!
//! The plot is drawn line by line from the top: each column holds one sampled
//! close, and the row is the close's position between the window's minimum and
//! maximum.

use stockviz_core::{DataPoint, HistoryData, TimeRange};

use crate::quote_card::{format_change, format_percent, format_price, trend_marker};

pub const EMPTY_HISTORY_MESSAGE: &str = "No historical data";

const DEFAULT_WIDTH: usize = 60;
const DEFAULT_HEIGHT: usize = 10;
const Y_AXIS_WIDTH: usize = 11;
const POINT: char = '•';
const VOID: char = ' ';

/// Move between the first and last close of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub absolute: f64,
    pub percent: f64,
}

impl PriceChange {
    pub fn is_positive(&self) -> bool {
        self.absolute >= 0.0
    }
}

/// Percent is `0` when the first close is zero or the window is empty.
pub fn price_change(data: &[DataPoint]) -> PriceChange {
    let first = data.first().map_or(0.0, |point| point.close);
    let last = data.last().map_or(0.0, |point| point.close);
    let absolute = last - first;
    let percent = if first == 0.0 {
        0.0
    } else {
        absolute / first * 100.0
    };

    PriceChange { absolute, percent }
}

/// Range selector row; the active range is bracketed.
pub fn render_range_selector(current: TimeRange) -> String {
    TimeRange::ALL
        .iter()
        .map(|range| {
            if *range == current {
                format!("[{}]", range.as_str())
            } else {
                format!(" {} ", range.as_str())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct StockChart<'a> {
    history: &'a HistoryData,
    range: TimeRange,
    width: usize,
    height: usize,
}

impl<'a> StockChart<'a> {
    pub fn new(history: &'a HistoryData, range: TimeRange) -> Self {
        Self {
            history,
            range,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    /// Plot area size in characters, excluding the y-axis gutter.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width.max(2);
        self.height = height.max(2);
        self
    }

    pub fn change(&self) -> PriceChange {
        price_change(&self.history.data)
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("{}  {}", self.history.symbol, self.range.label()),
            render_range_selector(self.range),
        ];

        if self.history.is_empty() {
            lines.push(EMPTY_HISTORY_MESSAGE.to_owned());
            return lines.join("\n");
        }

        let change = self.change();
        lines.push(format!(
            "{} {} ({})",
            trend_marker(change.is_positive()),
            format_change(change.absolute),
            format_percent(change.percent)
        ));
        lines.extend(self.plot());
        lines.push(self.x_axis());

        lines.join("\n")
    }

    fn sampled(&self) -> Vec<&DataPoint> {
        let data = &self.history.data;
        if data.len() <= self.width {
            return data.iter().collect();
        }

        let last = data.len() - 1;
        (0..self.width)
            .map(|column| &data[column * last / (self.width - 1)])
            .collect()
    }

    fn plot(&self) -> Vec<String> {
        let points = self.sampled();
        let (min, max) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), point| {
            (lo.min(point.close), hi.max(point.close))
        });
        let span = max - min;

        let rows: Vec<usize> = points
            .iter()
            .map(|point| {
                if span <= f64::EPSILON {
                    self.height / 2
                } else {
                    let ratio = (point.close - min) / span;
                    (ratio * (self.height - 1) as f64).round() as usize
                }
            })
            .collect();

        (0..self.height)
            .rev()
            .map(|row| {
                let label = if row == self.height - 1 {
                    format_price(max)
                } else if row == 0 {
                    format_price(min)
                } else {
                    String::new()
                };
                let cells: String = rows
                    .iter()
                    .map(|point_row| if *point_row == row { POINT } else { VOID })
                    .collect();
                format!("{label:>width$} │{cells}", width = Y_AXIS_WIDTH - 2)
            })
            .collect()
    }

    fn x_axis(&self) -> String {
        let intraday = self.range.is_intraday();
        let data = &self.history.data;
        let first = data
            .first()
            .map(|point| point.timestamp.format_axis_label(intraday))
            .unwrap_or_default();
        let last = data
            .last()
            .map(|point| point.timestamp.format_axis_label(intraday))
            .unwrap_or_default();

        let columns = self.sampled().len();
        let gap = columns.saturating_sub(first.chars().count() + last.chars().count());
        format!(
            "{:width$}{first}{:gap$}{last}",
            "",
            "",
            width = Y_AXIS_WIDTH
        )
    }
}
