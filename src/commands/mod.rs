//! Subcommand implementations.

mod generate;
mod schemas;
mod serve;
mod ship;

pub use generate::{run_generate, GenerateArgs};
pub use schemas::{run_schemas, SchemaAction, SchemasArgs};
pub use serve::{run_serve, ServeArgs};
pub use ship::{load_fields_file, run_ship, ShipArgs};

use record_core::{parse_field_spec, FieldMap, SchemaError};

/// Build a field map from repeated `NAME=TYPE` flags, keeping flag order.
pub fn fields_from_specs(specs: &[String]) -> Result<FieldMap, SchemaError> {
    let mut fields = FieldMap::new();
    for spec in specs {
        let (name, field_type) = parse_field_spec(spec)?;
        fields.insert(name, field_type);
    }
    Ok(fields)
}
