//! Rental pricing
//!
//! Single home for duration counting, price composition and display
//! formatting. Everything here is pure; both the quote endpoint and
//! reservation creation price through `calculate_breakdown`.

pub mod model;

pub use model::{
    calculate_breakdown, calculate_total, format_price, rental_days, OptionLine, PriceBreakdown,
    DRIVER_FEE_PER_DAY,
};
