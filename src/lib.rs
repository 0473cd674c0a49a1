pub mod config;
pub mod core;
pub mod domain;
pub mod schema;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use self::core::{ConversionEngine, ConvertError, IdentifierPathConverter, DEFAULT_REGISTRATION_BASE};
pub use schema::{ExtractOptions, SchemaExtractor, ServerFormat};
pub use utils::error::{OidDirError, Result};
