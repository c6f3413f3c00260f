//! Decimal string <-> integer tick conversion.
//!
//! ## Overview
//!
//! The engine works exclusively in integer ticks; outer layers usually speak
//! decimal prices. These helpers convert between the two given the
//! instrument's tick size, using `rust_decimal` so no floating point is
//! involved in the conversion either.
//!
//! ## Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use tickbook::types::ticks::{from_ticks, to_ticks};
//!
//! let tick_size = Decimal::new(25, 2); // 0.25
//!
//! assert_eq!(to_ticks("100.50", tick_size), Some(402));
//! assert_eq!(from_ticks(402, tick_size), "100.5");
//!
//! // Off-tick prices are rejected, not rounded
//! assert_eq!(to_ticks("100.10", tick_size), None);
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::types::Price;

/// Parse a decimal price string into a signed tick count.
///
/// Returns `None` if the string does not parse, the tick size is not
/// positive, the price is not an exact multiple of the tick size, or the
/// tick count overflows `i64`. Off-tick prices are rejected rather than
/// rounded so no caller can silently change a price.
pub fn to_ticks(s: &str, tick_size: Decimal) -> Option<Price> {
    if tick_size <= Decimal::ZERO {
        return None;
    }
    let price = Decimal::from_str(s).ok()?;
    let ticks = price.checked_div(tick_size)?;
    if !ticks.fract().is_zero() {
        return None;
    }
    ticks.to_i64()
}

/// Render a tick count as a decimal price string, trailing zeros trimmed.
pub fn from_ticks(price: Price, tick_size: Decimal) -> String {
    let decimal = Decimal::from(price) * tick_size;
    decimal.normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
