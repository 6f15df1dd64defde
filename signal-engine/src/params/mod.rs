//! Validation and normalization of raw signal parameters.

pub mod normalize;
pub mod validate;

pub use normalize::{normalize, NormalizeError};
pub use validate::{is_expiration_valid, validate};

use chrono::{Datelike, NaiveDate};

/// Expand an expiration string into a calendar date. The two-part form
/// `M/D` implies the current year; a 2-digit year gets a "20" prefix.
/// Returns `None` for anything that is not a real calendar date.
pub(crate) fn expiration_to_date(exp: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = exp.split('/').collect();
    let (year, month_str, day_str) = match parts.as_slice() {
        [month, day] => (today.year(), *month, *day),
        [month, day, year] => {
            let year: i32 = if year.len() == 2 {
                format!("20{year}").parse().ok()?
            } else {
                year.parse().ok()?
            };
            (year, *month, *day)
        }
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month_str.parse().ok()?, day_str.parse().ok()?)
}

#[cfg(test)]
mod tests;
