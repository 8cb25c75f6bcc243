use schemacfg::{
    Config, Error, OptionStore, SchemaFormat, Selection, append_existing_values,
    generate_config_parser, generate_config_store, generate_documentation, generate_schema_file,
    load_schema, parse_config,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config_from_config_string(config_string: &str) -> Config {
    parse_config(config_string).unwrap()
}

#[test]
fn test_append() {
    init_logger();
    let config = config_from_config_string("[section]\noption1=value1\noption2=value2");
    let schema = load_schema(
        r#"
"section":
    "option1":
        "required": true
    "option2":
        "required": true
    "option3":
        "required": true
"#,
        SchemaFormat::Yaml,
    )
    .unwrap();

    let migrated = append_existing_values(&schema, &config);

    let option3 = migrated.option("section", "option3").unwrap();
    assert!(option3.required);
    assert!(option3.value.is_none());
    assert!(migrated.option("section", "option1").unwrap().value.is_some());
    assert!(migrated.option("section", "option2").unwrap().value.is_some());
}

#[test]
fn test_init() {
    init_logger();
    let schema_string = generate_schema_file("[section]\noption1=value1\noption2=value2").unwrap();
    let schema = load_schema(&schema_string, SchemaFormat::Yaml).unwrap();

    let option1 = schema.option("section", "option1").unwrap();
    assert_eq!(option1.description.as_deref(), Some("No description provided."));
}

#[test]
fn test_migrate_then_generate() {
    init_logger();
    let schema = load_schema(
        r#"
database:
    host:
        required: true
        description: Database host.
    port:
        default: 5432
    user:
        default: admin
logging:
    level:
        required: true
        default: info
"#,
        SchemaFormat::Yaml,
    )
    .unwrap();
    let config = config_from_config_string("[database]\nhost=db.local\nuser=app\nobsolete=1\n");

    let migrated = append_existing_values(&schema, &config);
    let store = generate_config_store(&migrated, Selection::RequiredOrSet);

    assert_eq!(store.sections(), ["database", "logging"]);
    assert_eq!(store.get("database", "host").unwrap(), Some("db.local"));
    assert_eq!(store.get("database", "user").unwrap(), Some("app"));
    assert!(store.get("database", "port").unwrap_err().is_not_found());
    assert!(store.get("database", "obsolete").is_err());
    assert_eq!(store.get("logging", "level").unwrap(), Some("info"));

    assert_eq!(
        store.to_ini_string(),
        "[database]\n\
         # required\n\
         # Database host.\n\
         host = db.local\n\
         user = app\n\
         \n\
         [logging]\n\
         # required\n\
         level = info\n"
    );

    let full = generate_config_parser(&migrated, true);
    assert_eq!(full.get("database", "port").unwrap(), Some("5432"));
}

#[test]
fn test_missing_section_lookup() {
    let store = generate_config_parser(&schemacfg::Schema::new(), true);
    assert!(matches!(
        store.options("section"),
        Err(Error::SectionNotFound { .. })
    ));
}

#[test]
fn test_documentation_from_bootstrap() {
    init_logger();
    let schema_string = generate_schema_file("[web]\nport=80\n").unwrap();
    let schema = load_schema(&schema_string, SchemaFormat::Yaml).unwrap();
    let doc = generate_documentation(&schema);
    let lines: Vec<_> = doc.lines().collect();

    assert_eq!(lines[0], "Configuration documentation");
    assert!(lines.contains(&"web"));
    assert!(lines.contains(&"port"));
    assert!(lines.contains(&"No description provided."));
    assert!(!lines.iter().any(|l| l.starts_with("The default value")));
}

#[test]
fn test_malformed_schema_section() {
    let err = load_schema("{\"section\": [1, 2]}", SchemaFormat::Json).unwrap_err();
    assert!(matches!(err, Error::MalformedSchema { .. }));
}

#[test]
fn test_migration_keeps_values_verbatim() {
    init_logger();
    let schema = load_schema(
        r#"
paths:
    root:
        required: true
        description: |
            Install root.
            Backslashes are kept as written.
    greeting:
        default: hello
    ratio:
        default: 1.0
"#,
        SchemaFormat::Yaml,
    )
    .unwrap();
    let config = config_from_config_string(
        "[paths]\nroot = C:\\temp\\new\\\ngreeting = \"hi ; there\"\n",
    );
    assert_eq!(config.get("paths", "root"), Some(r"C:\temp\new\"));
    assert_eq!(config.get("paths", "greeting"), Some("\"hi ; there\""));

    let migrated = append_existing_values(&schema, &config);
    let text = generate_config_parser(&migrated, true).to_ini_string();
    let reread = config_from_config_string(&text);

    let options: Vec<_> = reread.section("paths").unwrap().keys().collect();
    assert_eq!(options, ["root", "greeting", "ratio"]);
    assert_eq!(reread.get("paths", "root"), config.get("paths", "root"));
    assert_eq!(reread.get("paths", "greeting"), config.get("paths", "greeting"));
    assert_eq!(reread.get("paths", "ratio"), Some("1.0"));
}
