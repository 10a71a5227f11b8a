//! Formatting helpers for the leaderboard widgets.

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Medal for the podium, `#n` below it.
pub fn rank_medal(rank: u32) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{n}"),
    }
}

/// Compact dollar amount: `$999`, `$1.5K`, `$2.3M`.
pub fn format_currency(amount: u64) -> String {
    if amount >= 1_000_000 {
        format!("${}M", one_decimal(amount, 1_000_000))
    } else if amount >= 1_000 {
        format!("${}K", one_decimal(amount, 1_000))
    } else {
        format!("${amount}")
    }
}

fn one_decimal(amount: u64, unit: u64) -> Decimal {
    let mut scaled = (Decimal::from(amount) / Decimal::from(unit))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    scaled.rescale(1);
    scaled
}

/// Days left in `today`'s month, counting today and the last day: 1..=31.
pub fn days_until_month_end(today: NaiveDate) -> u32 {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    let last_day = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(today);
    (last_day - today).num_days() as u32 + 1
}

/// [`days_until_month_end`] on the local clock.
pub fn days_until_month_end_now() -> u32 {
    days_until_month_end(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use proptest::prelude::*;

    #[test]
    fn currency_formats() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1000), "$1.0K");
        assert_eq!(format_currency(1500), "$1.5K");
        assert_eq!(format_currency(128_450), "$128.5K");
        assert_eq!(format_currency(2_300_000), "$2.3M");
        assert_eq!(format_currency(1_000_000), "$1.0M");
    }

    #[test]
    fn medals() {
        assert_eq!(rank_medal(1), "🥇");
        assert_eq!(rank_medal(3), "🥉");
        assert_eq!(rank_medal(4), "#4");
    }

    #[test]
    fn month_end_counts() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(days_until_month_end(d(2026, 10, 19)), 13);
        assert_eq!(days_until_month_end(d(2026, 10, 31)), 1);
        assert_eq!(days_until_month_end(d(2026, 1, 1)), 31);
        assert_eq!(days_until_month_end(d(2024, 2, 1)), 29);
        assert_eq!(days_until_month_end(d(2025, 2, 1)), 28);
        assert_eq!(days_until_month_end(d(2025, 12, 31)), 1);
    }

    #[test]
    fn month_end_now_in_range() {
        let n = days_until_month_end_now();
        assert!((1..=31).contains(&n));
    }

    proptest! {
        #[test]
        fn month_end_lands_on_last_day(offset in 0u64..60_000) {
            let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let today = base + Days::new(offset);
            let n = days_until_month_end(today);
            prop_assert!((1..=31).contains(&n));
            let last = today + Days::new(u64::from(n) - 1);
            prop_assert_eq!(last.month(), today.month());
            prop_assert_ne!((last + Days::new(1)).month(), today.month());
        }
    }
}
