//! Music catalogue generators.

use super::pick;
use rand::Rng;

pub const GENRES: &[&str] = &[
    "Rock", "Jazz", "Blues", "Hip Hop", "Classical", "Electronic", "Folk", "Reggae",
    "Country", "Metal", "Soul", "Funk", "Indie Pop", "Ambient",
];

pub const INSTRUMENTS: &[&str] = &[
    "Guitar", "Bass", "Drums", "Piano", "Violin", "Cello", "Saxophone", "Trumpet",
    "Flute", "Synthesizer", "Harmonica", "Ukulele",
];

const ADJECTIVES: &[&str] = &[
    "Electric", "Silent", "Golden", "Broken", "Midnight", "Velvet", "Neon", "Wild",
    "Hollow", "Crimson", "Lonely", "Burning",
];

const NOUNS: &[&str] = &[
    "Heart", "River", "Echo", "Highway", "Garden", "Storm", "Mirror", "Signal",
    "Horizon", "Shadow", "Fire", "Dream",
];

pub fn generate_genre<R: Rng>(rng: &mut R) -> String {
    pick(rng, GENRES).to_string()
}

pub fn generate_instrument<R: Rng>(rng: &mut R) -> String {
    pick(rng, INSTRUMENTS).to_string()
}

/// Band-style artist name, e.g. "The Velvet Echoes".
pub fn generate_band_name<R: Rng>(rng: &mut R) -> String {
    format!("The {} {}s", pick(rng, ADJECTIVES), pick(rng, NOUNS))
}

pub fn generate_song_title<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, ADJECTIVES), pick(rng, NOUNS)),
        1 => format!("My {}", pick(rng, NOUNS)),
        _ => format!("{} of the {}", pick(rng, NOUNS), pick(rng, NOUNS)),
    }
}

pub fn generate_album_title<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..2) {
        0 => format!("{} {}s", pick(rng, ADJECTIVES), pick(rng, NOUNS)),
        _ => format!("Songs from the {} {}", pick(rng, ADJECTIVES), pick(rng, NOUNS)),
    }
}
