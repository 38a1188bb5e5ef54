//! Phone number generators.
//!
//! Both renderings share one rule: a locale calling code plus a 10-digit
//! subscriber number whose first digit is 2-9. The string form splits the
//! subscriber number 4 + 6.

use rand::Rng;
use record_core::LocaleContext;

/// Number of subscriber digits.
pub const SUBSCRIBER_DIGITS: usize = 10;

/// Calling code digits for a region (no `+`).
pub fn calling_code(locale: &LocaleContext) -> &'static str {
    match locale.region {
        "US" | "CA" => "1",
        "GB" => "44",
        "FR" => "33",
        "DE" => "49",
        _ => "1",
    }
}

/// Random 10-digit subscriber number without a leading zero or one.
pub fn subscriber_number<R: Rng>(rng: &mut R) -> String {
    let mut number = String::with_capacity(SUBSCRIBER_DIGITS);
    number.push(char::from(b'0' + rng.gen_range(2..=9)));
    for _ in 1..SUBSCRIBER_DIGITS {
        number.push(char::from(b'0' + rng.gen_range(0..=9)));
    }
    number
}

/// `(+CC) NNNN NNNNNN`
pub fn format_phone(calling_code: &str, subscriber: &str) -> String {
    let (head, tail) = subscriber.split_at(4.min(subscriber.len()));
    format!("(+{calling_code}) {head} {tail}")
}

/// Calling code digits followed by the subscriber digits, as one integer.
pub fn phone_as_integer(calling_code: &str, subscriber: &str) -> u64 {
    format!("{calling_code}{subscriber}")
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc * 10 + u64::from(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use record_core::SUPPORTED_LOCALES;

    #[test]
    fn test_subscriber_number_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let number = subscriber_number(&mut rng);
            assert_eq!(number.len(), SUBSCRIBER_DIGITS);
            assert!(number.chars().all(|c| c.is_ascii_digit()));
            assert!(!number.starts_with('0') && !number.starts_with('1'));
        }
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("44", "7123456789"), "(+44) 7123 456789");
    }

    #[test]
    fn test_phone_as_integer() {
        assert_eq!(phone_as_integer("33", "6123456789"), 336123456789);
        assert_eq!(phone_as_integer("1", "2025550143"), 12025550143);
    }

    #[test]
    fn test_every_locale_has_calling_code() {
        for locale in SUPPORTED_LOCALES {
            assert!(!calling_code(locale).is_empty());
        }
        let gb = LocaleContext::for_region("GB").unwrap();
        assert_eq!(calling_code(&gb), "44");
    }
}
