//! Order book types

use serde::{Deserialize, Serialize};

/// One price level of the book
///
/// `None` marks a cell that was missing or not a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    /// Price in the quote asset
    pub price: Option<f64>,
    /// Amount of the base asset
    pub amount: Option<f64>,
    /// Running total of the base asset
    pub cumulative: Option<f64>,
    /// `price * amount * rate`, rounded to 7 decimals
    pub value_usdt: Option<f64>,
}

impl OrderBookLevel {
    /// Build a level and price it at `rate` USDT per quote unit
    pub fn new(price: Option<f64>, amount: Option<f64>, cumulative: Option<f64>, rate: f64) -> Self {
        let value_usdt = price
            .zip(amount)
            .map(|(price, amount)| round_to(price * amount * rate, 7));
        Self {
            price,
            amount,
            cumulative,
            value_usdt,
        }
    }
}

/// Bid and ask levels in page order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Buy side
    pub bids: Vec<OrderBookLevel>,
    /// Sell side
    pub asks: Vec<OrderBookLevel>,
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
