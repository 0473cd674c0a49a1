pub mod converter;
pub mod engine;

pub use crate::domain::model::{Conversion, Direction};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
pub use converter::{ConvertError, IdentifierPathConverter, DEFAULT_REGISTRATION_BASE};
pub use engine::ConversionEngine;
