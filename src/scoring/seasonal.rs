//! Seasonal release-timing factors
//!
//! A month-indexed multiplier table approximating calendar-driven shifts in
//! listener demand. Values stay within [0.9, 1.2]; the seasonal score is
//! `50 * factor`, or a flat 50 when the release month is unknown.

/// Month-indexed demand multipliers (index 0 = January)
pub const SEASONAL_FACTORS: [f32; 12] = [
    0.95, // January: post-holiday lull
    0.90, // February
    0.95, // March
    1.00, // April
    1.05, // May
    1.10, // June: summer playlists ramp up
    1.15, // July
    1.05, // August
    1.00, // September
    1.05, // October
    1.10, // November
    1.20, // December: holiday peak
];

/// Demand multiplier for a calendar month (1-12)
///
/// Out-of-range months report a neutral 1.0.
pub fn factor(month: u32) -> f32 {
    if (1..=12).contains(&month) {
        SEASONAL_FACTORS[(month - 1) as usize]
    } else {
        1.0
    }
}

/// Seasonal score component: `50 * factor(month)`, flat 50 when unknown
pub fn seasonal_score(month: Option<u32>) -> f32 {
    match month {
        Some(m) => 50.0 * factor(m),
        None => 50.0,
    }
}
