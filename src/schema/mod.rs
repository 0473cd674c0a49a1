// Extraction of draft-coretta-oiddir-schema definitions into server-ready schema files.

pub mod dialect;
pub mod extractor;

pub use dialect::ServerFormat;
pub use extractor::{ExtractOptions, SchemaExtractor};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("No definitions parsed")]
    NoDefinitions,

    #[error("{0} unknown elements")]
    UnknownElements(usize),

    #[error("Invalid matching pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Definitions sorted by kind, each already prefixed with its server label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaExtract {
    pub format: ServerFormat,
    pub header: String,
    pub ldap_syntaxes: Vec<String>,
    pub attribute_types: Vec<String>,
    pub object_classes: Vec<String>,
    pub name_forms: Vec<String>,
    pub unknown: Vec<String>,
}

impl SchemaExtract {
    pub fn new(format: ServerFormat, header: String) -> Self {
        Self {
            format,
            header,
            ldap_syntaxes: Vec::new(),
            attribute_types: Vec::new(),
            object_classes: Vec::new(),
            name_forms: Vec::new(),
            unknown: Vec::new(),
        }
    }

    pub fn definition_count(&self) -> usize {
        self.ldap_syntaxes.len()
            + self.attribute_types.len()
            + self.object_classes.len()
            + self.name_forms.len()
    }

    /// Ideally there are never any unknown elements.
    pub fn ensure_known(&self) -> Result<(), SchemaError> {
        if self.unknown.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::UnknownElements(self.unknown.len()))
        }
    }

    /// Renders the schema file, every entry followed by a lone `#` line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, &self.header);

        if self.format == ServerFormat::OpenDj {
            push_section(&mut out, "CUSTOM ldap syntaxes", &self.ldap_syntaxes, "");
        }

        push_section(&mut out, "attribute types", &self.attribute_types, "");
        push_section(&mut out, "object classes", &self.object_classes, "");

        if self.format.supports_name_forms() {
            push_section(&mut out, "name forms", &self.name_forms, "");
        } else {
            push_section(&mut out, "(disabled) name forms", &self.name_forms, "#");
        }

        if !self.unknown.is_empty() {
            push_line(&mut out, &format!("# {} unknown elements\n#", self.unknown.len()));
            for element in &self.unknown {
                push_line(&mut out, &format!("#{}", element));
                push_line(&mut out, "#\n#");
            }
        }

        out
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_section(out: &mut String, title: &str, entries: &[String], entry_prefix: &str) {
    push_line(out, &format!("# {} {}\n#", entries.len(), title));
    for entry in entries {
        push_line(out, &format!("{}{}", entry_prefix, entry));
        push_line(out, "#");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_openldap() {
        let extract = SchemaExtract::new(ServerFormat::OpenLdap, "##".to_string());
        assert_eq!(
            extract.render(),
            "##\n# 0 attribute types\n#\n# 0 object classes\n#\n# 0 (disabled) name forms\n#\n"
        );
    }

    #[test]
    fn test_render_disables_name_forms_outside_opendj() {
        let mut extract = SchemaExtract::new(ServerFormat::Ds389, "##".to_string());
        extract.name_forms.push("nameforms: ( 1.2 )".to_string());
        assert!(extract.render().contains("#nameforms: ( 1.2 )\n#\n"));
    }

    #[test]
    fn test_unknown_elements_are_reported() {
        let mut extract = SchemaExtract::new(ServerFormat::OpenLdap, "##".to_string());
        extract.unknown.push("( 9.9 )".to_string());
        let rendered = extract.render();
        assert!(rendered.ends_with("# 1 unknown elements\n#\n#( 9.9 )\n#\n#\n"));
        assert!(matches!(
            extract.ensure_known(),
            Err(SchemaError::UnknownElements(1))
        ));
    }
}
