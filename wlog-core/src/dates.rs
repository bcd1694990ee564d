use chrono::{Datelike, Months, NaiveDate};

/// The first day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

/// `date` shifted one calendar month forward.
pub fn add_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap()
}

/// `date` shifted one calendar month back.
pub fn sub_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap()
}

/// The previous calendar month relative to `today`, as a half-open range
/// `[first day, first day of the current month)`.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use wlog_core::dates::previous_month;
/// let today = NaiveDate::from_ymd_opt(2021, 2, 15).unwrap();
///
/// let (from, toex) = previous_month(today);
///
/// assert_eq!(from, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
/// assert_eq!(toex, NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
/// ```
pub fn previous_month(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let toex = first_of_month(today);
    (sub_month(toex), toex)
}
