//! Individual value generators for each field kind.
//!
//! [`generate_value`] dispatches a resolved [`FieldKind`] to the provider.
//! Locale-bound kinds receive the record's [`LocaleContext`]; no generator
//! ever draws its own locale.

pub mod address;
pub mod date;
pub mod music;
pub mod phone;

use crate::provider::ValueProvider;
use crate::registry::FieldKind;
use rand::Rng;
use record_core::LocaleContext;
use serde_json::Value;

/// Pick one entry of a non-empty static table.
pub(crate) fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}

/// Generate one value of the given kind.
pub fn generate_value<P: ValueProvider, R: Rng>(
    kind: FieldKind,
    provider: &P,
    rng: &mut R,
    locale: &LocaleContext,
) -> Value {
    match kind {
        FieldKind::FullName => Value::String(provider.full_name(rng)),

        FieldKind::FirstName => Value::String(provider.first_name(rng)),

        FieldKind::LastName => Value::String(provider.last_name(rng)),

        FieldKind::Email => Value::String(provider.email(rng)),

        FieldKind::PhoneString => Value::String(provider.phone_string(rng, locale)),

        FieldKind::PhoneInteger => Value::from(provider.phone_integer(rng, locale)),

        FieldKind::Address => Value::String(provider.address(rng, locale).one_line()),

        FieldKind::AddressObject => provider.address(rng, locale).to_json(),

        FieldKind::RegionCode => Value::String(locale.region.to_string()),

        FieldKind::LocaleTag => Value::String(locale.tag.to_string()),

        FieldKind::Boolean => Value::Bool(provider.boolean(rng)),

        FieldKind::DateOfBirth => Value::String(provider.date_of_birth(rng).to_string()),

        FieldKind::IdNumber => Value::from(provider.id_number(rng)),

        FieldKind::MusicGenre => Value::String(provider.music_genre(rng)),

        FieldKind::MusicInstrument => Value::String(provider.music_instrument(rng)),

        FieldKind::ArtistName => Value::String(provider.artist_name(rng)),

        FieldKind::SongTitle => Value::String(provider.song_title(rng)),

        FieldKind::AlbumTitle => Value::String(provider.album_title(rng)),
    }
}
