//! Property tests for normalization invariants.
//!
//! Uses proptest to verify:
//! 1. Business days never fall on a weekend and stay within the range
//! 2. Week ranges never end before they start, even across new year
//! 3. Normalized output is always sorted by date
//! 4. Month/Year normalization is idempotent on its own output

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use hubdata_core::normalize::{business_days, normalize, parse_week_range, Normalized};
use hubdata_core::{Period, RawTable};
use proptest::prelude::*;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_price_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..2000).prop_map(|c| format!("{:.2}", c as f64 / 100.0)),
        Just("--".to_string()),
        Just("W".to_string()),
        Just(String::new()),
    ]
}

fn series_of(normalized: Normalized) -> hubdata_core::PriceSeries {
    match normalized {
        Normalized::Series(report) => report.series,
        Normalized::Passthrough(_) => panic!("expected a series"),
    }
}

// ── 1. Business days ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn business_days_are_weekdays_in_range(start in arb_date(), len in 0i64..40) {
        let end = start + Duration::days(len);
        let days = business_days(start, end);

        for day in &days {
            prop_assert!(!matches!(day.weekday(), Weekday::Sat | Weekday::Sun));
            prop_assert!(*day >= start && *day <= end);
        }
        for w in days.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
    }
}

// ── 2. Week ranges ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn week_range_round_trips_through_text(start in arb_date()) {
        let end = start + Duration::days(4);
        let text = format!(
            "{} {}-{:2} to {}-{:2}",
            start.year(),
            MONTHS[start.month0() as usize],
            start.day(),
            MONTHS[end.month0() as usize],
            end.day()
        );

        let (s, e) = parse_week_range(&text).unwrap();
        prop_assert_eq!(s, start);
        prop_assert_eq!(e, end);
        prop_assert!(e >= s);
    }
}

// ── 3. Sorted output ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn monthly_output_is_sorted(
        years in prop::collection::vec(1990i32..2030, 1..6),
        cells in prop::collection::vec(arb_price_cell(), 12 * 6),
    ) {
        let mut table = RawTable::new(
            std::iter::once("Year".to_string())
                .chain(MONTHS.iter().map(|m| m.to_string()))
                .collect(),
        );
        for (i, year) in years.iter().enumerate() {
            let mut row = vec![Some(year.to_string())];
            row.extend(cells[i * 12..(i + 1) * 12].iter().map(|c| Some(c.clone())));
            table.push_row(row);
        }

        let series = series_of(normalize(Period::Month, table));
        prop_assert_eq!(series.len(), years.len() * 12);
        prop_assert!(series.is_sorted());
    }

    #[test]
    fn monthly_normalization_is_idempotent(
        year in 1990i32..2030,
        cells in prop::collection::vec(arb_price_cell(), 12),
    ) {
        let mut table = RawTable::new(
            std::iter::once("Year".to_string())
                .chain(MONTHS.iter().map(|m| m.to_string()))
                .collect(),
        );
        let mut row = vec![Some(year.to_string())];
        row.extend(cells.into_iter().map(Some));
        table.push_row(row);

        let first = series_of(normalize(Period::Month, table));
        let second = series_of(normalize(Period::Month, first.to_raw_table()));
        prop_assert_eq!(first.len(), 12);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn yearly_normalization_is_idempotent(
        cells in prop::collection::vec(arb_price_cell(), 10),
    ) {
        let mut columns = vec!["Decade".to_string()];
        columns.extend((0..10).map(|i| format!("Year-{i}")));
        let mut table = RawTable::new(columns);
        let mut row = vec![Some("2000's".to_string())];
        row.extend(cells.into_iter().map(Some));
        table.push_row(row);

        let first = series_of(normalize(Period::Year, table));
        let second = series_of(normalize(Period::Year, first.to_raw_table()));
        prop_assert_eq!(first, second);
    }
}
