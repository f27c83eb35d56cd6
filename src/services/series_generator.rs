use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use rand::Rng;
use tracing::debug;

use crate::models::{Market, PricePoint};
use crate::services::indicators::{envelope, round2, TrailingWindow, ENVELOPE_PCT};

/// Daily move range as a fraction of the starting price.
pub const VOLATILITY: f64 = 0.03;
pub const MA_WINDOW: usize = 20;
pub const VOLUME_MIN: u64 = 500_000;
pub const VOLUME_MAX: u64 = 1_500_000;

/// Generate `days` simulated daily points ending yesterday (UTC), using the
/// thread-local RNG.
pub fn generate(days: u32, start_price: f64) -> Vec<PricePoint> {
    let today = Utc::now().date_naive();
    generate_with(days, start_price, today, &mut rand::rng())
}

/// Random walk from `start_price`, oldest point first.
///
/// Each step moves the price by a uniform draw in
/// `[-start_price * VOLATILITY / 2, +start_price * VOLATILITY / 2)`. The walk
/// has no floor, so very long series can drift to zero or below.
pub fn generate_with<R: Rng>(
    days: u32,
    start_price: f64,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<PricePoint> {
    debug!("Generating {} simulated points from {:.2}", days, start_price);

    let volatility = start_price * VOLATILITY;
    let mut history = TrailingWindow::seeded(start_price, MA_WINDOW);
    let mut price = start_price;

    (1..=days)
        .rev()
        .map(|offset| {
            let change = (rng.random::<f64>() - 0.5) * volatility;
            price += change;

            history.push(price);
            let moving_average = history.mean();
            let (upper, lower) = envelope(moving_average, ENVELOPE_PCT);

            PricePoint {
                date: today - ChronoDuration::days(i64::from(offset)),
                price: round2(price),
                volume: rng.random_range(VOLUME_MIN..VOLUME_MAX),
                moving_average_20: round2(moving_average),
                upper_band: round2(upper),
                lower_band: round2(lower),
            }
        })
        .collect()
}

/// Starting price for a simulated chart.
///
/// Without a symbol (page load) the market default applies. A searched symbol,
/// the landing one included, gets a price keyed off its length so repeated
/// searches for the same ticker start from the same level.
pub fn start_price_for(market: Market, symbol: Option<&str>) -> f64 {
    let symbol = match symbol.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return market.default_start_price(),
    };

    let seed = (symbol.chars().count() * 10) as f64;
    match market {
        Market::US => 100.0 + seed,
        Market::KR => 50_000.0 + seed * 100.0,
    }
}
