use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "oid2dn")]
    Oid2Dn,
    #[serde(rename = "dn2oid")]
    Dn2Oid,
}

/// One converted value, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub direction: Direction,
    pub input: String,
    pub output: String,
}

impl Conversion {
    pub fn new(direction: Direction, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            direction,
            input: input.into(),
            output: output.into(),
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Oid2Dn => write!(f, "dn: {}", self.output),
            Direction::Dn2Oid => write!(f, "oid: {}", self.output),
        }
    }
}
