use crate::domain::ports::ConfigProvider;
use thiserror::Error;

/// Location of registration entries within the RA DIT.
pub const DEFAULT_REGISTRATION_BASE: &str = "ou=Registrations,o=rA";

const ARC_SEPARATOR: char = '.';
const RDN_SEPARATOR: char = ',';
const NUMBER_FORM_PREFIX: &str = "n=";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("input is empty")]
    EmptyInput,

    #[error("'{path}' is not under registration base '{base}'")]
    SuffixMismatch { path: String, base: String },

    #[error("'{path}' is shorter than registration base '{base}'")]
    PathTooShort { path: String, base: String },

    #[error("component '{component}' has no attribute value")]
    MissingValue { component: String },
}

/// Converts between dotNotation OIDs and registration DNs (draft-coretta-oiddir-radit, 3.1.3).
///
/// Suffix matching against the registration base ignores case, so the base
/// may use whatever case-folding the DIT prefers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierPathConverter {
    registration_base: String,
}

impl Default for IdentifierPathConverter {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRATION_BASE)
    }
}

impl IdentifierPathConverter {
    pub fn new(registration_base: impl Into<String>) -> Self {
        Self {
            registration_base: registration_base.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.registration_base())
    }

    pub fn registration_base(&self) -> &str {
        &self.registration_base
    }

    /// Returns the DN for `dot`, or an empty string when `dot` is empty.
    ///
    /// Arcs are echoed verbatim and are not checked for being numeric.
    pub fn oid_to_path(&self, dot: &str) -> String {
        self.try_oid_to_path(dot).unwrap_or_default()
    }

    /// Returns the dotNotation for `path`, or an empty string when `path` is
    /// not anchored under the registration base.
    ///
    /// A component without `=` yields an empty arc at its position.
    pub fn path_to_oid(&self, path: &str) -> String {
        match self.split_components(path) {
            Ok(components) => components
                .into_iter()
                .rev()
                .map(|component| attribute_value(component).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("."),
            Err(_) => String::new(),
        }
    }

    pub fn try_oid_to_path(&self, dot: &str) -> Result<String, ConvertError> {
        if dot.is_empty() {
            tracing::trace!("Rejecting empty dotNotation");
            return Err(ConvertError::EmptyInput);
        }

        let arcs: Vec<&str> = dot.split(ARC_SEPARATOR).rev().collect();
        let mut dn = String::with_capacity(dot.len() * 3 + self.registration_base.len() + 1);
        dn.push_str(NUMBER_FORM_PREFIX);
        dn.push_str(&arcs.join(",n="));
        dn.push(RDN_SEPARATOR);
        dn.push_str(&self.registration_base);
        Ok(dn)
    }

    /// Like [`path_to_oid`](Self::path_to_oid), but reports why a path was
    /// rejected, including components that carry no attribute value.
    pub fn try_path_to_oid(&self, path: &str) -> Result<String, ConvertError> {
        let components = self.split_components(path)?;
        let mut arcs = Vec::with_capacity(components.len());
        for component in components.into_iter().rev() {
            let value = attribute_value(component).ok_or_else(|| ConvertError::MissingValue {
                component: component.to_string(),
            })?;
            arcs.push(value);
        }
        Ok(arcs.join("."))
    }

    /// Strips the registration suffix and splits what remains on commas.
    fn split_components<'a>(&self, path: &'a str) -> Result<Vec<&'a str>, ConvertError> {
        let suffix = format!("{}{}", RDN_SEPARATOR, self.registration_base).to_lowercase();

        if path.len() + 1 < self.registration_base.len() {
            tracing::trace!(path, "Rejecting DN shorter than registration base");
            return Err(ConvertError::PathTooShort {
                path: path.to_string(),
                base: self.registration_base.clone(),
            });
        }

        let head = suffix_start(path, suffix.len()).and_then(|start| {
            let (head, tail) = path.split_at(start);
            (tail.to_lowercase() == suffix).then_some(head)
        });

        match head {
            Some(head) => Ok(head.split(RDN_SEPARATOR).collect()),
            None => {
                tracing::trace!(path, "Rejecting DN outside registration base");
                Err(ConvertError::SuffixMismatch {
                    path: path.to_string(),
                    base: self.registration_base.clone(),
                })
            }
        }
    }
}

/// Char index where the trailing run of `path` lowercases to exactly
/// `folded_len` bytes. Lowercasing may change a char's byte length (`İ`, `K`).
fn suffix_start(path: &str, folded_len: usize) -> Option<usize> {
    let mut len = 0;
    for (idx, ch) in path.char_indices().rev() {
        len += ch.to_lowercase().map(char::len_utf8).sum::<usize>();
        if len >= folded_len {
            return (len == folded_len).then_some(idx);
        }
    }
    None
}

/// Everything after the first `=`, so values that contain `=` survive.
fn attribute_value(component: &str) -> Option<&str> {
    component.split_once('=').map(|(_, value)| value)
}
