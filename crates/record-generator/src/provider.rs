//! Value providers.
//!
//! A [`ValueProvider`] has one method per value kind. Locale-dependent
//! methods take the record's [`LocaleContext`] explicitly.

use crate::generator::GeneratorError;
use crate::generators::{address, date, music, phone};
use chrono::{NaiveDate, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;
use rand::Rng;
use record_core::LocaleContext;

pub use crate::generators::address::Address;

/// Trait for producing plausible values of each kind.
pub trait ValueProvider {
    fn full_name<R: Rng>(&self, rng: &mut R) -> String;

    fn first_name<R: Rng>(&self, rng: &mut R) -> String;

    fn last_name<R: Rng>(&self, rng: &mut R) -> String;

    fn email<R: Rng>(&self, rng: &mut R) -> String;

    /// Formatted phone number using the locale's calling code.
    fn phone_string<R: Rng>(&self, rng: &mut R, locale: &LocaleContext) -> String;

    /// Digit-only phone number using the locale's calling code.
    fn phone_integer<R: Rng>(&self, rng: &mut R, locale: &LocaleContext) -> u64;

    fn address<R: Rng>(&self, rng: &mut R, locale: &LocaleContext) -> Address;

    fn boolean<R: Rng>(&self, rng: &mut R) -> bool;

    fn date_of_birth<R: Rng>(&self, rng: &mut R) -> NaiveDate;

    fn id_number<R: Rng>(&self, rng: &mut R) -> i64;

    fn music_genre<R: Rng>(&self, rng: &mut R) -> String;

    fn music_instrument<R: Rng>(&self, rng: &mut R) -> String;

    fn artist_name<R: Rng>(&self, rng: &mut R) -> String;

    fn song_title<R: Rng>(&self, rng: &mut R) -> String;

    fn album_title<R: Rng>(&self, rng: &mut R) -> String;
}

/// Inclusive age range for generated birth dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    pub fn new(min: u32, max: u32) -> Result<Self, GeneratorError> {
        if max < min || max > 150 {
            return Err(GeneratorError::InvalidAgeRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { min: 18, max: 90 }
    }
}

/// Default provider backed by `fake` for people and by static locale tables
/// for addresses and phone numbers.
#[derive(Debug, Clone, Default)]
pub struct FakeProvider {
    ages: AgeRange,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age_range(mut self, ages: AgeRange) -> Self {
        self.ages = ages;
        self
    }

    pub fn age_range(&self) -> AgeRange {
        self.ages
    }
}

impl ValueProvider for FakeProvider {
    fn full_name<R: Rng>(&self, rng: &mut R) -> String {
        Name().fake_with_rng(rng)
    }

    fn first_name<R: Rng>(&self, rng: &mut R) -> String {
        FirstName().fake_with_rng(rng)
    }

    fn last_name<R: Rng>(&self, rng: &mut R) -> String {
        LastName().fake_with_rng(rng)
    }

    fn email<R: Rng>(&self, rng: &mut R) -> String {
        SafeEmail().fake_with_rng(rng)
    }

    fn phone_string<R: Rng>(&self, rng: &mut R, locale: &LocaleContext) -> String {
        let subscriber = phone::subscriber_number(rng);
        phone::format_phone(phone::calling_code(locale), &subscriber)
    }

    fn phone_integer<R: Rng>(&self, rng: &mut R, locale: &LocaleContext) -> u64 {
        let subscriber = phone::subscriber_number(rng);
        phone::phone_as_integer(phone::calling_code(locale), &subscriber)
    }

    fn address<R: Rng>(&self, rng: &mut R, locale: &LocaleContext) -> Address {
        address::generate_address(rng, locale)
    }

    fn boolean<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen_bool(0.5)
    }

    fn date_of_birth<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let today = Utc::now().date_naive();
        date::generate_date_of_birth(rng, today, self.ages.min, self.ages.max)
    }

    fn id_number<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.gen_range(1000..=999_999)
    }

    fn music_genre<R: Rng>(&self, rng: &mut R) -> String {
        music::generate_genre(rng)
    }

    fn music_instrument<R: Rng>(&self, rng: &mut R) -> String {
        music::generate_instrument(rng)
    }

    fn artist_name<R: Rng>(&self, rng: &mut R) -> String {
        if rng.gen_bool(0.5) {
            Name().fake_with_rng(rng)
        } else {
            music::generate_band_name(rng)
        }
    }

    fn song_title<R: Rng>(&self, rng: &mut R) -> String {
        music::generate_song_title(rng)
    }

    fn album_title<R: Rng>(&self, rng: &mut R) -> String {
        music::generate_album_title(rng)
    }
}
