//! Season-aware price computation. Shares `DateRange`'s half-open semantics
//! with admission control: the checkout day is never charged.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::CarParkConfig;
use crate::model::DateRange;

/// A priced date range, converted to major currency units exactly once at
/// this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub amount: f64,
    pub currency: String,
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Rate for one day in minor units. Seasons are evaluated in configured
/// order; the first whose month window contains the day wins, otherwise the
/// base rate applies.
pub fn day_rate(config: &CarParkConfig, day: NaiveDate) -> u32 {
    let weekend = is_weekend(day);
    let month = day.month();
    for season in &config.seasons {
        if month >= season.start_month && month <= season.end_month {
            return if weekend {
                season.weekend_price
            } else {
                season.weekday_price
            };
        }
    }
    if weekend {
        config.weekend_price
    } else {
        config.weekday_price
    }
}

/// Total for `[start, end)` in minor units. Accumulates integer minor units
/// so rounding never compounds across days.
pub fn total_minor(config: &CarParkConfig, span: &DateRange) -> u32 {
    span.days().map(|day| day_rate(config, day)).sum()
}

pub fn to_major(minor: u32) -> f64 {
    f64::from(minor) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn span(from: NaiveDate, to: NaiveDate) -> DateRange {
        DateRange::new(from, to)
    }

    #[test]
    fn single_base_weekday() {
        // 2025-10-01 is a Wednesday outside both seasons.
        let config = CarParkConfig::default();
        let minor = total_minor(&config, &span(d(2025, 10, 1), d(2025, 10, 2)));
        assert_eq!(minor, 1000);
        assert_eq!(to_major(minor), 10.00);
    }

    #[test]
    fn base_weekend_rate() {
        // 2025-10-04 is a Saturday.
        let config = CarParkConfig::default();
        assert_eq!(day_rate(&config, d(2025, 10, 4)), 1500);
        assert_eq!(day_rate(&config, d(2025, 10, 5)), 1500); // Sunday
    }

    #[test]
    fn summer_rates() {
        let config = CarParkConfig::default();
        // 2025-07-05/06 weekend, 2025-07-07 Monday.
        assert_eq!(day_rate(&config, d(2025, 7, 5)), 2500);
        assert_eq!(day_rate(&config, d(2025, 7, 7)), 2000);
        // Sat + Sun + Mon
        assert_eq!(total_minor(&config, &span(d(2025, 7, 5), d(2025, 7, 8))), 7000);
    }

    #[test]
    fn winter_rates() {
        let config = CarParkConfig::default();
        // 2025-11-03/04 are Monday/Tuesday.
        assert_eq!(total_minor(&config, &span(d(2025, 11, 3), d(2025, 11, 5))), 3000);
        // 2025-11-01 is a Saturday.
        assert_eq!(day_rate(&config, d(2025, 11, 1)), 2000);
    }

    #[test]
    fn checkout_day_not_charged() {
        let config = CarParkConfig::default();
        // [Fri, Sat): only Friday is charged even though Saturday is pricier.
        assert_eq!(total_minor(&config, &span(d(2025, 10, 3), d(2025, 10, 4))), 1000);
    }

    #[test]
    fn day_additive_across_season_boundary() {
        // Aug 30 (Sat, summer) .. Sep 2 crosses the summer/base boundary.
        let config = CarParkConfig::default();
        let a = d(2025, 8, 30);
        let b = d(2025, 9, 1);
        let c = d(2025, 9, 2);
        let whole = total_minor(&config, &span(a, c));
        let parts = total_minor(&config, &span(a, b)) + total_minor(&config, &span(b, c));
        assert_eq!(whole, parts);
        assert_eq!(whole, 2500 + 2500 + 1000);
    }

    #[test]
    fn first_matching_season_wins() {
        // Deliberately overlapping windows: the earlier entry must win.
        let mut config = CarParkConfig::default();
        config.seasons[1].start_month = 6; // winter now also claims June
        assert_eq!(day_rate(&config, d(2025, 6, 2)), 2000); // summer weekday, not winter's 1500
    }

    #[test]
    fn deterministic() {
        let config = CarParkConfig::default();
        let range = span(d(2025, 6, 1), d(2026, 1, 15));
        assert_eq!(total_minor(&config, &range), total_minor(&config, &range));
    }
}
