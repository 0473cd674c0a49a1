use crate::core::converter::ConvertError;
use crate::schema::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OidDirError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Conversion error: {0}")]
    ConversionError(#[from] ConvertError),

    #[error("Schema extraction error: {0}")]
    SchemaError(#[from] SchemaError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Conversion,
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OidDirError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OidDirError::IoError(_) | OidDirError::SerializationError(_) => ErrorCategory::Io,
            OidDirError::ConversionError(_) => ErrorCategory::Conversion,
            OidDirError::SchemaError(_) => ErrorCategory::Schema,
            OidDirError::ConfigValidationError { .. }
            | OidDirError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 輸入被拒絕只影響單筆資料
            OidDirError::ConversionError(_) => ErrorSeverity::Medium,
            OidDirError::SchemaError(SchemaError::UnknownElements(_)) => ErrorSeverity::Medium,
            OidDirError::SchemaError(_) => ErrorSeverity::High,
            OidDirError::ConfigValidationError { .. }
            | OidDirError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            OidDirError::IoError(_) | OidDirError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            OidDirError::IoError(_) => {
                "Check that the file exists and is readable".to_string()
            }
            OidDirError::SerializationError(_) => {
                "Retry without --json or report the failing input".to_string()
            }
            OidDirError::ConversionError(ConvertError::SuffixMismatch { base, .. }) => format!(
                "Make sure the DN ends with ',{}' or pass the matching --base",
                base
            ),
            OidDirError::ConversionError(ConvertError::PathTooShort { base, .. }) => {
                format!("The DN must end with ',{}'", base)
            }
            OidDirError::ConversionError(ConvertError::MissingValue { .. }) => {
                "Every DN component needs the form attr=value, e.g. n=1".to_string()
            }
            OidDirError::ConversionError(ConvertError::EmptyInput) => {
                "Provide a non-empty dotNotation such as 1.3.6.1.4.1.56521".to_string()
            }
            OidDirError::SchemaError(SchemaError::NoDefinitions) => {
                "Make sure the file is a revision of draft-coretta-oiddir-schema".to_string()
            }
            OidDirError::SchemaError(_) => {
                "Inspect the commented unknown elements in the output".to_string()
            }
            OidDirError::ConfigValidationError { field, .. }
            | OidDirError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in the config file or CLI flags", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Conversion => format!("Input rejected: {}", self),
            ErrorCategory::Schema => format!("Schema extraction failed: {}", self),
        }
    }

    /// 依嚴重程度決定結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, OidDirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_errors_are_medium() {
        let err: OidDirError = ConvertError::EmptyInput.into();
        assert_eq!(err.category(), ErrorCategory::Conversion);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_suffix_mismatch_suggestion_names_base() {
        let err: OidDirError = ConvertError::SuffixMismatch {
            path: "n=1,o=x".to_string(),
            base: "ou=Registrations,o=rA".to_string(),
        }
        .into();
        assert!(err.recovery_suggestion().contains(",ou=Registrations,o=rA"));
    }

    #[test]
    fn test_dn_rejections_get_dn_suggestions() {
        let too_short: OidDirError = ConvertError::PathTooShort {
            path: "n=1,o=x".to_string(),
            base: "ou=Registrations,o=rA".to_string(),
        }
        .into();
        assert_eq!(
            too_short.recovery_suggestion(),
            "The DN must end with ',ou=Registrations,o=rA'"
        );

        let missing: OidDirError = ConvertError::MissingValue {
            component: "bogus".to_string(),
        }
        .into();
        assert!(missing.recovery_suggestion().contains("attr=value"));

        let empty: OidDirError = ConvertError::EmptyInput.into();
        assert!(empty.recovery_suggestion().contains("dotNotation"));
    }

    #[test]
    fn test_config_errors_exit_one() {
        let err = OidDirError::InvalidConfigValueError {
            field: "converter.registration_base".to_string(),
            value: "Registrations".to_string(),
            reason: "Component 'Registrations' is not of the form attr=value".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }
}
