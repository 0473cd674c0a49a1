use super::dialect::LDAP_SYNTAX_LABEL;
use super::{SchemaError, SchemaExtract, ServerFormat};
use regex::{NoExpand, Regex};
use std::path::Path;

const SYNTAX_PREFIX: &str = "( 1.3.6.1.4.1.56521.101.2.1";
const ATTRIBUTE_TYPE_PREFIX: &str = "( 1.3.6.1.4.1.56521.101.2.3";
const OBJECT_CLASS_PREFIX: &str = "( 1.3.6.1.4.1.56521.101.2.5";
const NAME_FORM_PREFIX: &str = "( 1.3.6.1.4.1.56521.101.2.7";

const X_ORIGIN: &str = "X-ORIGIN 'draft-coretta-oiddir-schema' )";
const ORIGIN_MARKER: &str = "draft-coretta-oiddir-schema'";
const TEN_LEAD: &str = "          ";

/// Custom ldapSyntaxes for OpenDJ covering the pattern concerns in Section 2.1
/// of the RASCHEMA draft. They are not part of the draft series itself.
const CUSTOM_SYNTAXES: &str = r#"
      ( 1.3.6.1.4.1.56521.101.2.1.3
          DESC 'X.680, cl. 34: OID-IRI'
          X-PATTERN '^(\/[A-Za-z0-9\-._~]+|[\uA0000-\uD7FF]+|[\uF900}-\uFDCF]+|[\uFDF0}-\uFFEF]+|[\u10000}-\u1FFFD]+|[\u20000}-\u2FFFD]+|[\u30000}-\u3FFFD]+|[\u40000}-\u4FFFD]+|[\u50000}-\u5FFFD]+|[\u60000}-\u6FFFD]+|[\u70000}-\u7FFFD]+|[\u80000}-\u8FFFD]+|[\u90000}-\u9FFFD]+|[\uA0000}-\uAFFFD]+|[\uB0000}-\uBFFFD]+|[\uC0000}-\uCFFFD]+|[\uD0000}-\uDFFFD]+|[\uE1000}-\uEFFFD]+)+$' )

      ( 1.3.6.1.4.1.56521.101.2.1.4
          DESC 'X.680, cl 32.3: ObjectIdentifierValue'
          X-PATTERN '^\{([a-z](-?[A-Za-z0-9]+)*(\(\d+\))?)(\s([a-z](-?[A-Za-z0-9]+)*(\(\d+\))))*\}$' )

      ( 1.3.6.1.4.1.56521.101.2.1.5
          DESC 'X.660, cl 7.5: non-integer Unicode label'
          X-PATTERN '^([A-Za-z0-9\-._~]+|[\uA0000-\uD7FF]+|[\uF900}-\uFDCF]+|[\uFDF0}-\uFFEF]+|[\u10000}-\u1FFFD]+|[\u20000}-\u2FFFD]+|[\u30000}-\u3FFFD]+|[\u40000}-\u4FFFD]+|[\u50000}-\u5FFFD]+|[\u60000}-\u6FFFD]+|[\u70000}-\u7FFFD]+|[\u80000}-\u8FFFD]+|[\u90000}-\u9FFFD]+|[\uA0000}-\uAFFFD]+|[\uB0000}-\uBFFFD]+|[\uC0000}-\uCFFFD]+|[\uD0000}-\uDFFFD]+|[\uE1000}-\uEFFFD]+)+$' )

      ( 1.3.6.1.4.1.56521.101.2.1.7
          DESC 'X.680, cl. 12.3: Identifier'
          X-PATTERN '^[a-z](-?[A-Za-z0-9]+)*$' )

      ( 1.3.6.1.4.1.56521.101.2.1.18
          DESC 'X.660, cl. A.2-A.3: StandardizedNameForm'
          X-PATTERN '^\{(([a-z](-?[A-Za-z0-9]+)*)|\d+)+\}$' )

      ( 1.3.6.1.4.1.56521.101.2.1.19
          DESC 'X.680, cl. 32.3: NameAndNumberForm'
          X-PATTERN '^[a-z](-?[A-Za-z0-9]+)*(\(\d+\))$' )

      ( 1.3.6.1.4.1.56521.101.2.1.20
          DESC 'X.660, cl. A.7: Long Arc'
          X-PATTERN '^\/([A-Za-z0-9\-._~]+|[\uA0000-\uD7FF]+|[\uF900}-\uFDCF]+|[\uFDF0}-\uFFEF]+|[\u10000}-\u1FFFD]+|[\u20000}-\u2FFFD]+|[\u30000}-\u3FFFD]+|[\u40000}-\u4FFFD]+|[\u50000}-\u5FFFD]+|[\u60000}-\u6FFFD]+|[\u70000}-\u7FFFD]+|[\u80000}-\u8FFFD]+|[\u90000}-\u9FFFD]+|[\uA0000}-\uAFFFD]+|[\uB0000}-\uBFFFD]+|[\uC0000}-\uCFFFD]+|[\uD0000}-\uDFFFD]+|[\uE1000}-\uEFFFD]+)+$' )
"#;

/// attribute type OID -> custom syntax OID imposed on it (OpenDJ only).
/// Some syntaxes serve more than one attribute type.
const SYNTAX_REPLACEMENTS: &[(&str, &str)] = &[
    ("1.3.6.1.4.1.56521.101.2.3.3", "1.3.6.1.4.1.56521.101.2.1.3"),
    ("1.3.6.1.4.1.56521.101.2.3.4", "1.3.6.1.4.1.56521.101.2.1.4"),
    ("1.3.6.1.4.1.56521.101.2.3.5", "1.3.6.1.4.1.56521.101.2.1.5"),
    ("1.3.6.1.4.1.56521.101.2.3.6", "1.3.6.1.4.1.56521.101.2.1.5"),
    ("1.3.6.1.4.1.56521.101.2.3.7", "1.3.6.1.4.1.56521.101.2.1.7"),
    ("1.3.6.1.4.1.56521.101.2.3.8", "1.3.6.1.4.1.56521.101.2.1.7"),
    ("1.3.6.1.4.1.56521.101.2.3.18", "1.3.6.1.4.1.56521.101.2.1.18"),
    ("1.3.6.1.4.1.56521.101.2.3.19", "1.3.6.1.4.1.56521.101.2.1.19"),
    ("1.3.6.1.4.1.56521.101.2.3.20", "1.3.6.1.4.1.56521.101.2.1.20"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    pub format: ServerFormat,
    /// Strip line breaks and collapse runs of spaces inside each definition.
    pub no_newlines: bool,
    /// Prepend the custom ldapSyntaxes and rewire attribute types to them (OpenDJ only).
    pub custom_syntaxes: bool,
    /// Skip the X-ORIGIN extension.
    pub no_extensions: bool,
}

pub struct SchemaExtractor {
    options: ExtractOptions,
    definition_start: Regex,
    explicit_syntax: Regex,
    superior: Regex,
    spaces: Regex,
}

impl SchemaExtractor {
    pub fn new(options: ExtractOptions) -> Result<Self, SchemaError> {
        Ok(Self {
            options,
            definition_start: Regex::new(
                r"^\s{6,}\(\s1\.3\.6\.1\.4\.1\.56521\.101\.2\.[1357]\.\d",
            )?,
            explicit_syntax: Regex::new(r"SYNTAX\s(0|1|2)(\.\d+)+")?,
            superior: Regex::new(r"SUP\s\w+")?,
            spaces: Regex::new(r" +")?,
        })
    }

    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> crate::utils::error::Result<SchemaExtract> {
        let text = std::fs::read_to_string(&path)?;
        let source = path.as_ref().display().to_string();
        Ok(self.extract(&text, &source)?)
    }

    /// Extracts every recognised definition from a draft revision.
    ///
    /// `source` only appears in the rendered header.
    pub fn extract(&self, text: &str, source: &str) -> Result<SchemaExtract, SchemaError> {
        let format = self.options.format;
        let use_custom_syntaxes = format == ServerFormat::OpenDj && self.options.custom_syntaxes;

        let text = if use_custom_syntaxes {
            format!("{}{}", CUSTOM_SYNTAXES, text)
        } else {
            text.to_string()
        };

        let definitions = self.scan_definitions(&text);
        if definitions.is_empty() {
            tracing::warn!("No definitions parsed from {}", source);
            return Err(SchemaError::NoDefinitions);
        }
        tracing::debug!("Matched {} definitions in {}", definitions.len(), source);

        let mut extract = SchemaExtract::new(format, format.header(source));

        for definition in definitions {
            let mut value = definition.trim().to_string();

            if !self.options.no_extensions {
                value.pop();
                if !self.options.no_newlines {
                    value.push('\n');
                    value.push_str(TEN_LEAD);
                }
                value.push_str(X_ORIGIN);
            }

            if value.starts_with(SYNTAX_PREFIX) && format == ServerFormat::OpenDj {
                let value = self.flatten(value);
                extract
                    .ldap_syntaxes
                    .push(format!("{}{}", LDAP_SYNTAX_LABEL, value));
            } else if value.starts_with(ATTRIBUTE_TYPE_PREFIX) {
                if use_custom_syntaxes {
                    value = self.replace_syntax(value);
                }
                let value = self.flatten(value);
                extract
                    .attribute_types
                    .push(format!("{}{}", format.attribute_type_label(), value));
            } else if value.starts_with(OBJECT_CLASS_PREFIX) {
                let value = self.flatten(value);
                extract
                    .object_classes
                    .push(format!("{}{}", format.object_class_label(), value));
            } else if value.starts_with(NAME_FORM_PREFIX) {
                let value = if format.supports_name_forms() || self.options.no_newlines {
                    self.flatten(value)
                } else {
                    // Comment out every line of a definition the server can't load.
                    value.replace('\r', "\r#").replace('\n', "\n#")
                };
                extract
                    .name_forms
                    .push(format!("{}{}", format.name_form_label(), value));
            } else {
                tracing::warn!("Unknown schema element: {}", value.lines().next().unwrap_or(""));
                extract.unknown.push(value);
            }
        }

        tracing::info!(
            "📋 Extracted {} definitions for {} ({} unknown)",
            extract.definition_count(),
            format,
            extract.unknown.len()
        );

        Ok(extract)
    }

    /// A definition starts on the line after an empty line and runs to the first
    /// line ending in `)` that is itself followed by an empty line.
    fn scan_definitions(&self, text: &str) -> Vec<String> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut definitions = Vec::new();
        let mut i = 1;

        while i < lines.len() {
            if !lines[i - 1].is_empty() {
                i += 1;
                continue;
            }
            let Some(start) = self.definition_start.find(lines[i]) else {
                i += 1;
                continue;
            };

            let end = (i..lines.len() - 1).find(|&j| {
                lines[j].ends_with(')')
                    && lines[j + 1].is_empty()
                    && (j > i || start.end() < lines[j].len() - 1)
            });

            match end {
                Some(j) => {
                    definitions.push(lines[i..=j].join("\n"));
                    i = j + 2;
                }
                None => i += 1,
            }
        }

        definitions
    }

    fn replace_syntax(&self, value: String) -> String {
        let oid: String = value
            .get(2..)
            .and_then(|rest| rest.split(' ').next())
            .unwrap_or("")
            .chars()
            .filter(|c| *c != '\r' && *c != '\n')
            .collect();

        let Some((_, syntax)) = SYNTAX_REPLACEMENTS.iter().find(|(attr, _)| *attr == oid) else {
            return value;
        };
        tracing::debug!("Replacing syntax of {} with {}", oid, syntax);

        let replacement = format!("SYNTAX {}", syntax);
        let value = if self.explicit_syntax.is_match(&value) {
            self.explicit_syntax
                .replace_all(&value, NoExpand(replacement.as_str()))
                .into_owned()
        } else if let Some(sup) = self.superior.find(&value) {
            format!(
                "{}\n{}{}{}",
                &value[..sup.end()],
                TEN_LEAD,
                replacement,
                &value[sup.end()..]
            )
        } else {
            value
        };

        // Let administrators know the draft's syntax was supplanted.
        value.replace(
            ORIGIN_MARKER,
            &format!("{}\n{}X-WARNING 'syntax replacement'", ORIGIN_MARKER, TEN_LEAD),
        )
    }

    fn flatten(&self, value: String) -> String {
        if !self.options.no_newlines {
            return value;
        }
        let joined = value.replace(['\r', '\n'], "");
        self.spaces.replace_all(&joined, " ").into_owned()
    }
}
