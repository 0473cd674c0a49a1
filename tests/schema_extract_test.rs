use oiddir_3d::schema::{SchemaError, SchemaExtract};
use oiddir_3d::{ExtractOptions, OidDirError, SchemaExtractor, ServerFormat};
use std::io::Write;
use tempfile::NamedTempFile;

const DRAFT: &str = r#"
4.  Schema Definitions

   The following definitions are extracted by the tooling.

      ( 1.3.6.1.4.1.56521.101.2.3.2
          NAME 'n'
          DESC 'X.660, cl. A.3: Number Form'
          EQUALITY integerMatch
          SYNTAX 1.3.6.1.4.1.1466.115.121.1.27
          SINGLE-VALUE )

      ( 1.3.6.1.4.1.56521.101.2.3.3
          NAME 'iRI'
          DESC 'X.680, cl. 34: OID-IRI'
          EQUALITY caseIgnoreMatch
          SYNTAX 1.3.6.1.4.1.1466.115.121.1.15 )

      ( 1.3.6.1.4.1.56521.101.2.5.2
          NAME 'registration'
          SUP top ABSTRACT
          MUST n )

      ( 1.3.6.1.4.1.56521.101.2.7.1
          NAME 'nRegistrationNameForm'
          OC registration
          MUST n )

   Trailing prose.
"#;

fn draft_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DRAFT.as_bytes()).unwrap();
    file
}

fn extract(options: ExtractOptions) -> SchemaExtract {
    let file = draft_file();
    SchemaExtractor::new(options)
        .unwrap()
        .extract_file(file.path())
        .unwrap()
}

#[test]
fn test_openldap_extraction() {
    let extract = extract(ExtractOptions::default());

    assert_eq!(extract.attribute_types.len(), 2);
    assert_eq!(extract.object_classes.len(), 1);
    assert_eq!(extract.name_forms.len(), 1);
    assert!(extract.unknown.is_empty());
    assert!(extract.ensure_known().is_ok());

    let rendered = extract.render();
    assert!(rendered.starts_with("## OID Directory schema - EXPERIMENTAL USE ONLY\n## Formatted for openldap\n"));
    assert!(rendered.contains("# 2 attribute types\n#\nattributetype ( 1.3.6.1.4.1.56521.101.2.3.2\n"));
    assert!(rendered.contains("          SINGLE-VALUE \n          X-ORIGIN 'draft-coretta-oiddir-schema' )\n#\n"));
    assert!(rendered.contains("# 1 (disabled) name forms\n#\n#nameform ( 1.3.6.1.4.1.56521.101.2.7.1\n#          NAME"));
    assert!(!rendered.contains("ldap syntaxes"));
}

#[test]
fn test_389ds_flat_extraction() {
    let extract = extract(ExtractOptions {
        format: ServerFormat::Ds389,
        no_newlines: true,
        no_extensions: true,
        ..Default::default()
    });

    assert_eq!(
        extract.object_classes,
        vec!["objectclasses: ( 1.3.6.1.4.1.56521.101.2.5.2 NAME 'registration' SUP top ABSTRACT MUST n )"]
    );
    let rendered = extract.render();
    assert!(rendered.contains("dn: cn=schema\n#\n"));
    assert!(rendered.contains(
        "#nameforms: ( 1.3.6.1.4.1.56521.101.2.7.1 NAME 'nRegistrationNameForm' OC registration MUST n )\n#\n"
    ));
}

#[test]
fn test_opendj_custom_syntaxes() {
    let extract = extract(ExtractOptions {
        format: ServerFormat::OpenDj,
        custom_syntaxes: true,
        ..Default::default()
    });

    assert_eq!(extract.ldap_syntaxes.len(), 7);
    assert!(extract.ldap_syntaxes[0].starts_with("ldapSyntaxes: ( 1.3.6.1.4.1.56521.101.2.1.3"));

    // 2.3.2 has no replacement, 2.3.3 does
    assert!(extract.attribute_types[0].contains("SYNTAX 1.3.6.1.4.1.1466.115.121.1.27"));
    assert!(!extract.attribute_types[0].contains("X-WARNING"));
    assert!(extract.attribute_types[1].contains("SYNTAX 1.3.6.1.4.1.56521.101.2.1.3"));
    assert!(extract.attribute_types[1].contains("X-WARNING 'syntax replacement'"));

    let rendered = extract.render();
    assert!(rendered.contains("# 7 CUSTOM ldap syntaxes\n#\n"));
    assert!(rendered.contains("# 1 name forms\n#\nnameForms: ( 1.3.6.1.4.1.56521.101.2.7.1\n"));
}

#[test]
fn test_missing_file_is_io_error() {
    let extractor = SchemaExtractor::new(ExtractOptions::default()).unwrap();
    assert!(matches!(
        extractor.extract_file("/nonexistent/draft-coretta-oiddir-schema.txt"),
        Err(OidDirError::IoError(_))
    ));
}

#[test]
fn test_prose_only_has_no_definitions() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"Just prose.\n\nNo schema here.\n").unwrap();

    let extractor = SchemaExtractor::new(ExtractOptions::default()).unwrap();
    assert!(matches!(
        extractor.extract_file(file.path()),
        Err(OidDirError::SchemaError(SchemaError::NoDefinitions))
    ));
}
