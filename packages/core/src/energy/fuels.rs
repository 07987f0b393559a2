//! Clean fuel classification and interval scoring.

use crate::energy::types::FuelShare;

/// Low-carbon generation sources.
pub const CLEAN_FUELS: [&str; 5] = ["biomass", "nuclear", "hydro", "wind", "solar"];

pub fn is_clean_fuel(fuel: &str) -> bool {
    CLEAN_FUELS.contains(&fuel)
}

/// Sum of the percentages contributed by clean fuels.
///
/// Unknown fuel types count as non-clean.
pub fn clean_energy_score(mix: &[FuelShare]) -> f64 {
    mix.iter()
        .filter(|share| is_clean_fuel(&share.fuel))
        .map(|share| share.perc)
        .sum()
}

/// Round the stored value to two decimal places.
///
/// Decides on the exact binary value, so `1.115` (stored just below the
/// half-cent) rounds down. Exact half-cent ties, which are only possible
/// for odd multiples of 1/8, round up.
pub fn round2(value: f64) -> f64 {
    let is_exact_tie = (value * 8.0).fract() == 0.0 && (value * 4.0).fract() != 0.0;
    if is_exact_tie {
        return (value * 100.0).ceil() / 100.0;
    }

    format!("{:.2}", value).parse().unwrap_or(value)
}
