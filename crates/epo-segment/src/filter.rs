//! Age computation and range filtering

use chrono::{Datelike, NaiveDate};

/// Age in whole years on `today`, accounting for whether the birthday
/// has already passed this year
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    let birthday_pending = (today.month(), today.day()) < (birth.month(), birth.day());
    if birthday_pending {
        age -= 1;
    }
    age
}

/// Whether a birth date falls inside the inclusive age range
///
/// A missing birth date never matches.
pub fn within_age_range(
    birth: Option<NaiveDate>,
    today: NaiveDate,
    min_age: i32,
    max_age: i32,
) -> bool {
    match birth {
        Some(birth) => {
            let age = age_on(birth, today);
            age >= min_age && age <= max_age
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_birthday() {
        // Birthday later this year: still 22
        assert_eq!(age_on(date(2001, 12, 1), date(2024, 6, 15)), 22);
    }

    #[test]
    fn test_age_after_birthday() {
        assert_eq!(age_on(date(2001, 1, 1), date(2024, 6, 15)), 23);
    }

    #[test]
    fn test_age_on_birthday() {
        assert_eq!(age_on(date(2001, 6, 15), date(2024, 6, 15)), 23);
    }

    #[test]
    fn test_range_is_inclusive() {
        let today = date(2024, 6, 15);
        assert!(within_age_range(Some(date(2001, 1, 1)), today, 23, 63));
        assert!(within_age_range(Some(date(1961, 1, 1)), today, 23, 63));
        assert!(!within_age_range(Some(date(2002, 1, 1)), today, 23, 63));
        assert!(!within_age_range(Some(date(1960, 1, 1)), today, 23, 63));
    }

    #[test]
    fn test_missing_birth_date_never_matches() {
        assert!(!within_age_range(None, date(2024, 6, 15), 23, 63));
    }
}
