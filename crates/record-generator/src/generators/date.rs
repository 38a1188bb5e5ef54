//! Date of birth generator.

use chrono::{Months, NaiveDate};
use rand::Rng;

/// Generate a birth date such that the person is between `min_age` and
/// `max_age` years old (inclusive) on `today`.
pub fn generate_date_of_birth<R: Rng>(
    rng: &mut R,
    today: NaiveDate,
    min_age: u32,
    max_age: u32,
) -> NaiveDate {
    // Latest birth date: exactly min_age years ago.
    let latest = today
        .checked_sub_months(Months::new(min_age * 12))
        .unwrap_or(NaiveDate::MIN);
    // Earliest birth date: the day after (max_age + 1) years ago.
    let earliest = today
        .checked_sub_months(Months::new((max_age + 1) * 12))
        .and_then(|d| d.succ_opt())
        .unwrap_or(NaiveDate::MIN);

    let span = (latest - earliest).num_days();
    if span <= 0 {
        return latest;
    }
    let offset = rng.gen_range(0..=span);
    earliest + chrono::Duration::days(offset)
}

/// Age in whole years on `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(birth).unwrap_or(0)
}
