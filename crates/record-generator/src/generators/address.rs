//! Locale-specific address generators.

use super::pick;
use rand::Rng;
use record_core::LocaleContext;
use serde_json::{json, Value};

/// A generated postal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// House number and street
    pub street: String,
    pub city: String,
    /// State, province or region
    pub region: String,
    pub postcode: String,
    /// Region code of the locale the address was drawn from
    pub country_code: String,
}

impl Address {
    /// Single-line rendering in the locale's usual order.
    pub fn one_line(&self) -> String {
        match self.country_code.as_str() {
            "GB" => format!("{}, {}, {}", self.street, self.city, self.postcode),
            "FR" | "DE" => format!("{}, {} {}", self.street, self.postcode, self.city),
            _ => format!(
                "{}, {}, {} {}",
                self.street, self.city, self.region, self.postcode
            ),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "street": self.street,
            "city": self.city,
            "region": self.region,
            "postcode": self.postcode,
            "country_code": self.country_code,
        })
    }
}

const US_STREETS: &[&str] = &[
    "Maple", "Oak", "Washington", "Lake", "Hill", "Cedar", "Park", "Elm",
];
const US_SUFFIXES: &[&str] = &["St", "Ave", "Blvd", "Rd", "Ln", "Dr"];
const US_CITIES: &[(&str, &str)] = &[
    ("Springfield", "IL"),
    ("Austin", "TX"),
    ("Portland", "OR"),
    ("Denver", "CO"),
    ("Columbus", "OH"),
    ("Raleigh", "NC"),
];

const GB_STREETS: &[&str] = &[
    "High Street",
    "Station Road",
    "Church Lane",
    "Victoria Road",
    "Mill Lane",
    "Park Avenue",
];
const GB_CITIES: &[(&str, &str)] = &[
    ("London", "Greater London"),
    ("Leeds", "West Yorkshire"),
    ("Bristol", "Bristol"),
    ("Norwich", "Norfolk"),
    ("York", "North Yorkshire"),
];
const GB_POSTCODE_LETTERS: &[u8] = b"ABDEFGHJLNPQRSTUWXYZ";

const FR_STREETS: &[&str] = &[
    "rue de la Paix",
    "avenue Victor Hugo",
    "boulevard Voltaire",
    "rue du Moulin",
    "place de la République",
    "rue Pasteur",
];
/// (city, region, department prefix)
const FR_CITIES: &[(&str, &str, &str)] = &[
    ("Paris", "Île-de-France", "75"),
    ("Lyon", "Auvergne-Rhône-Alpes", "69"),
    ("Marseille", "Provence-Alpes-Côte d'Azur", "13"),
    ("Toulouse", "Occitanie", "31"),
    ("Nantes", "Pays de la Loire", "44"),
];

const DE_STREETS: &[&str] = &[
    "Hauptstraße",
    "Bahnhofstraße",
    "Gartenweg",
    "Schillerstraße",
    "Lindenallee",
    "Goethestraße",
];
const DE_CITIES: &[(&str, &str)] = &[
    ("Berlin", "Berlin"),
    ("München", "Bayern"),
    ("Hamburg", "Hamburg"),
    ("Köln", "Nordrhein-Westfalen"),
    ("Leipzig", "Sachsen"),
];

const CA_STREETS: &[&str] = &["Queen", "King", "Yonge", "Main", "Bay", "Maple"];
const CA_SUFFIXES: &[&str] = &["St", "Ave", "Rd", "Blvd"];
const CA_CITIES: &[(&str, &str)] = &[
    ("Toronto", "ON"),
    ("Vancouver", "BC"),
    ("Montréal", "QC"),
    ("Calgary", "AB"),
    ("Halifax", "NS"),
];
const CA_POSTCODE_LETTERS: &[u8] = b"ABCEGHJKLMNPRSTVXY";

/// City names an address for this region may use.
pub fn cities_for(region: &str) -> Vec<&'static str> {
    match region {
        "GB" => GB_CITIES.iter().map(|(c, _)| *c).collect(),
        "FR" => FR_CITIES.iter().map(|(c, _, _)| *c).collect(),
        "DE" => DE_CITIES.iter().map(|(c, _)| *c).collect(),
        "CA" => CA_CITIES.iter().map(|(c, _)| *c).collect(),
        _ => US_CITIES.iter().map(|(c, _)| *c).collect(),
    }
}

fn pick_pair<R: Rng>(rng: &mut R, items: &[(&'static str, &'static str)]) -> (&'static str, &'static str) {
    items[rng.gen_range(0..items.len())]
}

fn letter<R: Rng>(rng: &mut R, alphabet: &[u8]) -> char {
    char::from(alphabet[rng.gen_range(0..alphabet.len())])
}

fn digit<R: Rng>(rng: &mut R) -> char {
    char::from(b'0' + rng.gen_range(0..=9))
}

/// Generate an address for the given locale.
pub fn generate_address<R: Rng>(rng: &mut R, locale: &LocaleContext) -> Address {
    let number: u32 = rng.gen_range(1..=250);
    let country_code = locale.region.to_string();

    match locale.region {
        "GB" => {
            let (city, region) = pick_pair(rng, GB_CITIES);
            let postcode = format!(
                "{}{}{} {}{}{}",
                letter(rng, GB_POSTCODE_LETTERS),
                letter(rng, GB_POSTCODE_LETTERS),
                rng.gen_range(1..=20),
                digit(rng),
                letter(rng, GB_POSTCODE_LETTERS),
                letter(rng, GB_POSTCODE_LETTERS),
            );
            Address {
                street: format!("{number} {}", pick(rng, GB_STREETS)),
                city: city.to_string(),
                region: region.to_string(),
                postcode,
                country_code,
            }
        }
        "FR" => {
            let (city, region, department) = FR_CITIES[rng.gen_range(0..FR_CITIES.len())];
            Address {
                street: format!("{number} {}", pick(rng, FR_STREETS)),
                city: city.to_string(),
                region: region.to_string(),
                postcode: format!("{department}{:03}", rng.gen_range(0..1000)),
                country_code,
            }
        }
        "DE" => {
            let (city, region) = pick_pair(rng, DE_CITIES);
            Address {
                street: format!("{} {number}", pick(rng, DE_STREETS)),
                city: city.to_string(),
                region: region.to_string(),
                postcode: format!("{:05}", rng.gen_range(1067..=99998)),
                country_code,
            }
        }
        "CA" => {
            let (city, province) = pick_pair(rng, CA_CITIES);
            let postcode = format!(
                "{}{}{} {}{}{}",
                letter(rng, CA_POSTCODE_LETTERS),
                digit(rng),
                letter(rng, CA_POSTCODE_LETTERS),
                digit(rng),
                letter(rng, CA_POSTCODE_LETTERS),
                digit(rng),
            );
            Address {
                street: format!(
                    "{number} {} {}",
                    pick(rng, CA_STREETS),
                    pick(rng, CA_SUFFIXES)
                ),
                city: city.to_string(),
                region: province.to_string(),
                postcode,
                country_code,
            }
        }
        _ => {
            let (city, state) = pick_pair(rng, US_CITIES);
            Address {
                street: format!(
                    "{number} {} {}",
                    pick(rng, US_STREETS),
                    pick(rng, US_SUFFIXES)
                ),
                city: city.to_string(),
                region: state.to_string(),
                postcode: format!("{:05}", rng.gen_range(10000..=99999)),
                country_code,
            }
        }
    }
}
