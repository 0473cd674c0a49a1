use crate::core::{Conversion, Direction, IdentifierPathConverter};
use crate::utils::error::Result;

/// Runs a batch of conversions in one direction.
pub struct ConversionEngine {
    converter: IdentifierPathConverter,
    strict: bool,
}

impl ConversionEngine {
    pub fn new(converter: IdentifierPathConverter) -> Self {
        Self {
            converter,
            strict: false,
        }
    }

    /// In strict mode the first rejected input aborts the batch.
    pub fn new_strict(converter: IdentifierPathConverter) -> Self {
        Self {
            converter,
            strict: true,
        }
    }

    pub fn convert(&self, direction: Direction, input: &str) -> Result<Conversion> {
        let output = match (direction, self.strict) {
            (Direction::Oid2Dn, false) => self.converter.oid_to_path(input),
            (Direction::Oid2Dn, true) => self.converter.try_oid_to_path(input)?,
            (Direction::Dn2Oid, false) => self.converter.path_to_oid(input),
            (Direction::Dn2Oid, true) => self.converter.try_path_to_oid(input)?,
        };

        if output.is_empty() {
            tracing::debug!("{:?} produced no value for '{}'", direction, input);
        }

        Ok(Conversion::new(direction, input, output))
    }

    pub fn run<I, S>(&self, direction: Direction, inputs: I) -> Result<Vec<Conversion>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let conversions = inputs
            .into_iter()
            .map(|input| self.convert(direction, input.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Converted {} values ({:?})", conversions.len(), direction);
        Ok(conversions)
    }
}
