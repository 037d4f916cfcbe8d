use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::{DateRange, DayAvailability, Days};

use super::store::BookingTable;

// ── Availability Algorithm ────────────────────────────────────────

/// Remaining capacity per day over `from..=to`.
///
/// The report deliberately includes the end date as a boundary display day,
/// even though occupancy and pricing are exclusive of it — a booking ending
/// on `to` frees its space that day, so the boundary usually shows full
/// availability.
pub fn availability_report(
    table: &BookingTable,
    from: NaiveDate,
    to: NaiveDate,
    total_spaces: u32,
) -> Vec<DayAvailability> {
    Days::through(from, to)
        .map(|date| {
            let occupied = table.count_active_on(date, None);
            DayAvailability {
                date,
                available_spaces: total_spaces.saturating_sub(occupied),
            }
        })
        .collect()
}

/// Occupied days of `span` on which `total_spaces` or more other active
/// bookings already hold a space. Admission fails when this is non-empty.
pub fn saturated_days(
    table: &BookingTable,
    span: &DateRange,
    total_spaces: u32,
    exclude: Option<Ulid>,
) -> Vec<NaiveDate> {
    span.days()
        .filter(|day| table.count_active_on(*day, exclude) >= total_spaces)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Booking, BookingStatus};
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn table_with(rows: Vec<(NaiveDate, NaiveDate, BookingStatus)>) -> BookingTable {
        let mut table = BookingTable::new();
        let now = Utc::now();
        for (from, to, status) in rows {
            table.insert(Booking {
                id: Ulid::new(),
                owner_id: Ulid::new(),
                span: DateRange::new(from, to),
                status,
                total_price: 0,
                notes: None,
                created_at: now,
                updated_at: now,
            });
        }
        table
    }

    #[test]
    fn empty_lot_reports_full_capacity_per_day() {
        let table = BookingTable::new();
        let report = availability_report(&table, d(2025, 10, 1), d(2025, 10, 2), 10);
        assert_eq!(
            report,
            vec![
                DayAvailability { date: d(2025, 10, 1), available_spaces: 10 },
                DayAvailability { date: d(2025, 10, 2), available_spaces: 10 },
            ]
        );
    }

    #[test]
    fn full_day_reports_zero_but_checkout_day_is_free() {
        let rows = (0..10)
            .map(|_| (d(2025, 10, 5), d(2025, 10, 6), BookingStatus::Active))
            .collect();
        let table = table_with(rows);
        let report = availability_report(&table, d(2025, 10, 5), d(2025, 10, 6), 10);
        assert_eq!(
            report,
            vec![
                DayAvailability { date: d(2025, 10, 5), available_spaces: 0 },
                DayAvailability { date: d(2025, 10, 6), available_spaces: 10 },
            ]
        );
    }

    #[test]
    fn report_floors_at_zero() {
        // More rows than spaces can only happen if capacity was lowered after
        // the rows were written; the report must not underflow.
        let rows = (0..5)
            .map(|_| (d(2025, 10, 1), d(2025, 10, 2), BookingStatus::Active))
            .collect();
        let table = table_with(rows);
        let report = availability_report(&table, d(2025, 10, 1), d(2025, 10, 1), 3);
        assert_eq!(report[0].available_spaces, 0);
    }

    #[test]
    fn cancelled_rows_do_not_consume_spaces() {
        let table = table_with(vec![
            (d(2025, 10, 1), d(2025, 10, 3), BookingStatus::Cancelled),
            (d(2025, 10, 1), d(2025, 10, 3), BookingStatus::Active),
        ]);
        let report = availability_report(&table, d(2025, 10, 1), d(2025, 10, 1), 10);
        assert_eq!(report[0].available_spaces, 9);
    }

    #[test]
    fn saturated_days_names_every_full_day() {
        let mut rows = vec![(d(2025, 10, 1), d(2025, 10, 2), BookingStatus::Active)];
        rows.push((d(2025, 10, 3), d(2025, 10, 4), BookingStatus::Active));
        let table = table_with(rows);

        let span = DateRange::new(d(2025, 10, 1), d(2025, 10, 4));
        let full = saturated_days(&table, &span, 1, None);
        assert_eq!(full, vec![d(2025, 10, 1), d(2025, 10, 3)]);
    }

    #[test]
    fn saturated_days_excludes_own_row() {
        let mut table = BookingTable::new();
        let now = Utc::now();
        let own = Booking {
            id: Ulid::new(),
            owner_id: Ulid::new(),
            span: DateRange::new(d(2025, 10, 1), d(2025, 10, 3)),
            status: BookingStatus::Active,
            total_price: 0,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let own_id = own.id;
        table.insert(own);

        let span = DateRange::new(d(2025, 10, 2), d(2025, 10, 5));
        assert_eq!(saturated_days(&table, &span, 1, None), vec![d(2025, 10, 2)]);
        assert!(saturated_days(&table, &span, 1, Some(own_id)).is_empty());
    }
}
