//! Field type registry.
//!
//! Maps a field type identifier (as written in a schema) to the
//! [`FieldKind`] that produces it. Lookup is a plain table scan; the table
//! is small and static.

use std::fmt;

/// Semantic kind of a generated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    FullName,
    FirstName,
    LastName,
    Email,
    /// `(+CC) NNNN NNNNNN`
    PhoneString,
    /// Calling code digits followed by the 10-digit subscriber number
    PhoneInteger,
    /// Single-line address
    Address,
    /// Address as a nested object
    AddressObject,
    /// Two-letter region code
    RegionCode,
    /// Locale tag such as `fr_FR`
    LocaleTag,
    Boolean,
    /// ISO `YYYY-MM-DD` birth date
    DateOfBirth,
    /// Integer id in `1000..=999999`
    IdNumber,
    MusicGenre,
    MusicInstrument,
    ArtistName,
    SongTitle,
    AlbumTitle,
}

/// Identifier table. The first entry for each kind is its canonical name.
const FIELD_TYPES: &[(&str, FieldKind)] = &[
    ("full_name", FieldKind::FullName),
    ("name", FieldKind::FullName),
    ("first_name", FieldKind::FirstName),
    ("last_name", FieldKind::LastName),
    ("email_address", FieldKind::Email),
    ("email", FieldKind::Email),
    ("phone_number", FieldKind::PhoneString),
    ("phone_number_string", FieldKind::PhoneString),
    ("phone_number_int", FieldKind::PhoneInteger),
    ("phone_number_integer", FieldKind::PhoneInteger),
    ("full_address", FieldKind::Address),
    ("address", FieldKind::Address),
    ("address_object", FieldKind::AddressObject),
    ("alpha2", FieldKind::RegionCode),
    ("country_code", FieldKind::RegionCode),
    ("locale", FieldKind::LocaleTag),
    ("boolean", FieldKind::Boolean),
    ("date_iso", FieldKind::DateOfBirth),
    ("date_of_birth", FieldKind::DateOfBirth),
    ("id_number", FieldKind::IdNumber),
    ("music_genre", FieldKind::MusicGenre),
    ("music_instrument", FieldKind::MusicInstrument),
    ("artist_name", FieldKind::ArtistName),
    ("song_title", FieldKind::SongTitle),
    ("album_title", FieldKind::AlbumTitle),
];

/// Resolve a field type identifier. `None` means the type is unknown.
pub fn resolve(field_type: &str) -> Option<FieldKind> {
    let field_type = field_type.trim();
    FIELD_TYPES
        .iter()
        .find(|(name, _)| *name == field_type)
        .map(|(_, kind)| *kind)
}

impl FieldKind {
    pub const ALL: [FieldKind; 18] = [
        FieldKind::FullName,
        FieldKind::FirstName,
        FieldKind::LastName,
        FieldKind::Email,
        FieldKind::PhoneString,
        FieldKind::PhoneInteger,
        FieldKind::Address,
        FieldKind::AddressObject,
        FieldKind::RegionCode,
        FieldKind::LocaleTag,
        FieldKind::Boolean,
        FieldKind::DateOfBirth,
        FieldKind::IdNumber,
        FieldKind::MusicGenre,
        FieldKind::MusicInstrument,
        FieldKind::ArtistName,
        FieldKind::SongTitle,
        FieldKind::AlbumTitle,
    ];

    /// Canonical identifier of this kind.
    pub fn identifier(self) -> &'static str {
        FIELD_TYPES
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Whether values of this kind must come from the record's locale.
    pub fn is_locale_bound(self) -> bool {
        matches!(
            self,
            FieldKind::PhoneString
                | FieldKind::PhoneInteger
                | FieldKind::Address
                | FieldKind::AddressObject
                | FieldKind::RegionCode
                | FieldKind::LocaleTag
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
