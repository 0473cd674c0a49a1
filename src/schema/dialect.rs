use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Only OpenDJ accepts ldapSyntax definitions over LDIF.
pub const LDAP_SYNTAX_LABEL: &str = "ldapSyntaxes: ";

/// Directory server flavour the extracted schema is formatted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(try_from = "String", into = "String")]
pub enum ServerFormat {
    #[default]
    #[cfg_attr(feature = "cli", value(name = "openldap"))]
    OpenLdap,
    #[cfg_attr(feature = "cli", value(name = "389ds"))]
    Ds389,
    #[cfg_attr(feature = "cli", value(name = "opendj"))]
    OpenDj,
}

impl ServerFormat {
    pub fn name(self) -> &'static str {
        match self {
            ServerFormat::OpenLdap => "openldap",
            ServerFormat::Ds389 => "389ds",
            ServerFormat::OpenDj => "opendj",
        }
    }

    pub fn attribute_type_label(self) -> &'static str {
        match self {
            ServerFormat::OpenLdap => "attributetype ",
            ServerFormat::Ds389 => "attributetypes: ",
            ServerFormat::OpenDj => "attributeTypes: ",
        }
    }

    pub fn object_class_label(self) -> &'static str {
        match self {
            ServerFormat::OpenLdap => "objectclass ",
            ServerFormat::Ds389 => "objectclasses: ",
            ServerFormat::OpenDj => "objectClasses: ",
        }
    }

    pub fn name_form_label(self) -> &'static str {
        match self {
            ServerFormat::OpenLdap => "nameform ",
            ServerFormat::Ds389 => "nameforms: ",
            ServerFormat::OpenDj => "nameForms: ",
        }
    }

    pub fn supports_name_forms(self) -> bool {
        matches!(self, ServerFormat::OpenDj)
    }

    pub fn header(self, source: &str) -> String {
        let mut header = format!(
            "## OID Directory schema - EXPERIMENTAL USE ONLY\n## Formatted for {}\n## Sourced from {}\n##",
            self, source
        );

        match self {
            ServerFormat::OpenLdap => {}
            ServerFormat::Ds389 => {
                header.push_str("\n## NOTE: 389DS >=1.4.3 required for UUID support");
                header.push_str("\n#\ndn: cn=schema\n#");
            }
            ServerFormat::OpenDj => {
                header.push_str("\n#\ndn: cn=schema\n");
                header.push_str("objectClass: top\n");
                header.push_str("objectClass: ldapSubentry\n");
                header.push_str("objectClass: subschema\n#");
            }
        }

        header
    }
}

impl fmt::Display for ServerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServerFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openldap" => Ok(ServerFormat::OpenLdap),
            "389ds" => Ok(ServerFormat::Ds389),
            "opendj" => Ok(ServerFormat::OpenDj),
            other => Err(format!(
                "unsupported format '{}' (expected openldap, 389ds or opendj)",
                other
            )),
        }
    }
}

impl TryFrom<String> for ServerFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServerFormat> for String {
    fn from(format: ServerFormat) -> Self {
        format.name().to_string()
    }
}
