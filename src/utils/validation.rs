use crate::utils::error::{OidDirError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OidDirError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(OidDirError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OidDirError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Checks that `dn` is a comma-separated list of `attr=value` components.
pub fn validate_dn(field_name: &str, dn: &str) -> Result<()> {
    validate_non_empty_string(field_name, dn)?;

    for component in dn.split(',') {
        match component.split_once('=') {
            Some((attr, _)) if !attr.trim().is_empty() => {}
            _ => {
                return Err(OidDirError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: dn.to_string(),
                    reason: format!("Component '{}' is not of the form attr=value", component),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dn() {
        assert!(validate_dn("converter.registration_base", "ou=Registrations,o=rA").is_ok());
        assert!(validate_dn("converter.registration_base", "o=rA").is_ok());
        assert!(validate_dn("converter.registration_base", "").is_err());
        assert!(validate_dn("converter.registration_base", "   ").is_err());
        assert!(validate_dn("converter.registration_base", "ou=Registrations,rA").is_err());
        assert!(validate_dn("converter.registration_base", "=x,o=rA").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("schema.file", "draft.txt").is_ok());
        assert!(validate_path("schema.file", "").is_err());
        assert!(validate_path("schema.file", "a\0b").is_err());
    }
}
