//! Candidate date-window derivation.
//!
//! A request's travel-date specification expands into at most
//! [`MAX_WINDOWS`] departure windows, all sharing the requested trip
//! length. `today` is injected so derivation stays a pure function.

use time::{Date, Month};

use crate::domain::TravelDates;

/// Upper bound on candidate windows per request.
pub const MAX_WINDOWS: usize = 3;

/// One fan-out departure window: a departure date plus trip length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub departure: Date,
    pub nights: u8,
}

/// Expand a travel-date specification into search windows.
///
/// - Specific range: one window at the start date (the end date is
///   informational only).
/// - Single month: one window at day 1 of that month.
/// - Flexible months: one window per listed month, first three only.
/// - Flexible with nothing listed: day 1 of each of the next three
///   calendar months after `today`.
pub fn derive_windows(dates: &TravelDates, nights: u8, today: Date) -> Vec<DateWindow> {
    let windows: Vec<DateWindow> = match dates {
        TravelDates::Specific { start_date, .. } => vec![DateWindow {
            departure: *start_date,
            nights,
        }],
        TravelDates::Month { month } => vec![DateWindow {
            departure: month.first_day(),
            nights,
        }],
        TravelDates::Flexible { preferred_months } => preferred_months
            .iter()
            .take(MAX_WINDOWS)
            .map(|month| DateWindow {
                departure: month.first_day(),
                nights,
            })
            .collect(),
    };

    if windows.is_empty() {
        return upcoming_months(today, nights);
    }
    windows
}

fn upcoming_months(today: Date, nights: u8) -> Vec<DateWindow> {
    (1..=MAX_WINDOWS)
        .map(|offset| {
            let (year, month) = add_months(today.year(), today.month(), offset);
            DateWindow {
                departure: Date::from_calendar_date(year, month, 1)
                    .expect("day 1 exists in every month"),
                nights,
            }
        })
        .collect()
}

fn add_months(year: i32, month: Month, offset: usize) -> (i32, Month) {
    let index = u8::from(month) as usize - 1 + offset;
    let month = Month::try_from((index % 12 + 1) as u8).expect("month index is in range");
    (year + (index / 12) as i32, month)
}
