//! Main record generator.

use crate::generators::generate_value;
use crate::provider::{FakeProvider, ValueProvider};
use crate::registry::resolve;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use record_core::{FieldMap, LocaleContext, Record, Schema, SUPPORTED_LOCALES};
use serde_json::Value;

/// Error type for generator configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeneratorError {
    /// Age range for birth dates is inverted or absurd
    #[error("Invalid age range {min}..={max}: max must be >= min and <= 150")]
    InvalidAgeRange { min: u32, max: u32 },
}

/// Produces records from a field map.
///
/// One [`LocaleContext`] is drawn per record and shared by every
/// locale-bound field of that record. Unknown field types yield an
/// `invalid: <field> - <type>` string in place of a value.
pub struct RecordGenerator<P = FakeProvider> {
    provider: P,
    rng: StdRng,
}

impl RecordGenerator<FakeProvider> {
    /// Create a generator with the default provider and a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self::with_provider(FakeProvider::default(), seed)
    }

    /// Create a generator with the default provider seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            provider: FakeProvider::default(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl<P: ValueProvider> RecordGenerator<P> {
    pub fn with_provider(provider: P, seed: u64) -> Self {
        Self {
            provider,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Get a reference to the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Draw a locale uniformly from the supported set.
    pub fn pick_locale(&mut self) -> LocaleContext {
        SUPPORTED_LOCALES[self.rng.gen_range(0..SUPPORTED_LOCALES.len())]
    }

    /// Generate one record in a freshly drawn locale.
    pub fn generate_record(&mut self, fields: &FieldMap) -> Record {
        let locale = self.pick_locale();
        self.generate_record_in(fields, &locale)
    }

    /// Generate one record in the given locale.
    pub fn generate_record_in(&mut self, fields: &FieldMap, locale: &LocaleContext) -> Record {
        let mut record = Record::new();
        for (name, field_type) in fields.iter() {
            let value = match resolve(field_type) {
                Some(kind) => generate_value(kind, &self.provider, &mut self.rng, locale),
                None => Value::String(format!("invalid: {name} - {field_type}")),
            };
            record.insert(name.to_string(), value);
        }
        record
    }

    /// Generate exactly `count` records.
    pub fn generate(&mut self, fields: &FieldMap, count: usize) -> Vec<Record> {
        self.records(fields, count).collect()
    }

    /// Generate the schema's default number of records.
    pub fn generate_schema(&mut self, schema: &Schema) -> Vec<Record> {
        self.generate(&schema.fields, schema.count)
    }

    /// Returns an iterator that lazily generates records.
    pub fn records<'a>(&'a mut self, fields: &'a FieldMap, count: usize) -> RecordIterator<'a, P> {
        RecordIterator {
            generator: self,
            fields,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates records.
pub struct RecordIterator<'a, P> {
    generator: &'a mut RecordGenerator<P>,
    fields: &'a FieldMap,
    remaining: usize,
}

impl<P: ValueProvider> Iterator for RecordIterator<'_, P> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.generate_record(self.fields))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<P: ValueProvider> ExactSizeIterator for RecordIterator<'_, P> {}
