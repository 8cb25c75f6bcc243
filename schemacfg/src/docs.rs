//! Plain-text documentation rendered from a schema.
//!
//! The output is line oriented and reStructuredText flavoured: headings are
//! underlined, and every fact about an option sits on its own line.
//!
//! ```text
//! Configuration documentation
//! ===========================
//!
//! server
//! ------
//!
//! port
//! ~~~~
//! ** This option is required! **
//! *Type : int.*
//! Port to listen on.
//! The default value is 8080.
//! ```

use crate::data::{OptionSpec, Schema};

/// First line of every generated document.
pub const DOCUMENTATION_TITLE: &str = "Configuration documentation";

/// Flag line for required options.
pub const REQUIRED_FLAG: &str = "** This option is required! **";

/// Flag line for deprecated options.
pub const DEPRECATED_FLAG: &str = "** This option is deprecated! **";

fn push_heading(lines: &mut Vec<String>, text: &str, underline: char) {
    lines.push(text.to_string());
    lines.push(underline.to_string().repeat(text.chars().count()));
}

fn push_option(lines: &mut Vec<String>, name: &str, spec: &OptionSpec) {
    lines.push(String::new());
    push_heading(lines, name, '~');

    if spec.required {
        lines.push(REQUIRED_FLAG.to_string());
    }
    if spec.deprecated {
        lines.push(DEPRECATED_FLAG.to_string());
    }
    if let Some(ty) = &spec.type_hint {
        lines.push(format!("*Type : {ty}.*"));
    }
    if let Some(description) = &spec.description {
        lines.push(description.clone());
    }
    if let Some(default) = &spec.default {
        lines.push(format!("The default value is {default}."));
    }
}

/// Render documentation for every option of `schema`, in schema order.
///
/// Sections without options are left out. Names and descriptions are
/// inserted as they are.
pub fn generate_documentation(schema: &Schema) -> String {
    let mut lines = Vec::new();
    push_heading(&mut lines, DOCUMENTATION_TITLE, '=');

    for (section, options) in schema.sections() {
        if options.is_empty() {
            continue;
        }
        lines.push(String::new());
        push_heading(&mut lines, section, '-');
        for (name, spec) in options {
            push_option(&mut lines, name, spec);
        }
    }

    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Scalar;
    use crate::format::{SchemaFormat, load_schema};

    fn document(schema_text: &str) -> Vec<String> {
        let schema = load_schema(schema_text, SchemaFormat::Yaml).unwrap();
        generate_documentation(&schema)
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    fn has(lines: &[String], line: &str) -> bool {
        lines.iter().any(|l| l == line)
    }

    #[test]
    fn test_basic_case() {
        let lines = document(
            r#"
"section":
    "option":
        "required": true
        "description": "This is a description."
"#,
        );

        assert_eq!(lines[0], "Configuration documentation");
        assert!(has(&lines, "section"));
        assert!(has(&lines, "option"));
        assert!(has(&lines, "This is a description."));
        assert!(has(&lines, REQUIRED_FLAG));
        assert!(!has(&lines, DEPRECATED_FLAG));
    }

    #[test]
    fn test_option_with_type() {
        let lines = document(
            r#"
"section":
    "option":
        "required": true
        "type": "bool"
"#,
        );
        assert!(has(&lines, "*Type : bool.*"));
    }

    #[test]
    fn test_deprecated() {
        let lines = document(
            r#"
"section":
    "option":
        "required": true
        "deprecated": true
        "type": "bool"
"#,
        );
        assert!(has(&lines, DEPRECATED_FLAG));
        assert!(has(&lines, REQUIRED_FLAG));
    }

    #[test]
    fn test_default() {
        let lines = document(
            r#"
"section":
    "option":
        "default": "1"
"#,
        );
        assert!(has(&lines, "The default value is 1."));
        assert!(!has(&lines, REQUIRED_FLAG));
        assert!(!lines.iter().any(|l| l.starts_with("*Type")));
    }

    #[test]
    fn test_exact_layout() {
        let mut schema = Schema::new();
        schema.insert(
            "server",
            "port",
            OptionSpec {
                required: true,
                default: Some(Scalar::Integer(8080)),
                type_hint: Some("int".into()),
                description: Some("Port to listen on.".into()),
                ..Default::default()
            },
        );
        schema.insert("server", "legacy", OptionSpec {
            deprecated: true,
            ..Default::default()
        });
        schema.add_section("empty");

        assert_eq!(
            generate_documentation(&schema),
            "Configuration documentation\n\
             ===========================\n\
             \n\
             server\n\
             ------\n\
             \n\
             port\n\
             ~~~~\n\
             ** This option is required! **\n\
             *Type : int.*\n\
             Port to listen on.\n\
             The default value is 8080.\n\
             \n\
             legacy\n\
             ~~~~~~\n\
             ** This option is deprecated! **\n"
        );
    }

    #[test]
    fn test_empty_schema() {
        assert_eq!(
            generate_documentation(&Schema::new()),
            "Configuration documentation\n===========================\n"
        );
    }

    #[test]
    fn test_whole_float_default() {
        let lines = document(
            r#"
"section":
    "ratio":
        "default": 1.0
"#,
        );
        assert!(has(&lines, "The default value is 1.0."));
    }
}
