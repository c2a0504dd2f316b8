use chrono::DateTime;
use profilegen_codegen::{
    CodegenError, FixedClock, GenerationOptions, Generator, Stage, generate, generate_from_tables,
};
use profilegen_schema::{RawTable, SchemaError};
use std::collections::HashSet;
use std::sync::Arc;

const TYPE_COLUMNS: &[&str] = &["Type Name", "Base Type", "Value Name", "Value", "Comment"];
const MESSAGE_COLUMNS: &[&str] = &[
    "Message Name",
    "Message Number",
    "Field Def #",
    "Field Name",
    "Field Type",
    "Array",
    "Units",
    "Ref Field Name",
    "Ref Field Value",
];
const INDEX_COLUMNS: &[&str] = &["Message Number", "Message Name"];

fn types_table() -> RawTable {
    RawTable::from_rows(
        "Types",
        TYPE_COLUMNS,
        &[
            &["kind", "enum", "", "", ""],
            &["", "", "a", "0", ""],
            &["", "", "b", "1", ""],
        ],
    )
}

fn messages_table(rows: &[&[&str]]) -> RawTable {
    RawTable::from_rows("Messages", MESSAGE_COLUMNS, rows)
}

fn index_table(numbers: &[&str]) -> RawTable {
    let rows: Vec<[&str; 2]> = numbers.iter().map(|n| [*n, ""]).collect();
    let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    RawTable::from_rows("MesgNums", INDEX_COLUMNS, &rows)
}

const PING_ROWS: &[&[&str]] = &[
    &["ping", "10", "", "", "", "", "", "", ""],
    &["", "", "0", "kind", "kind", "", "", "", ""],
];

fn minimal_tables(index: &[&str]) -> Vec<RawTable> {
    vec![types_table(), messages_table(PING_ROWS), index_table(index)]
}

fn richer_tables() -> Vec<RawTable> {
    vec![
        types_table(),
        messages_table(&[
            &["ping", "10", "", "", "", "", "", "", ""],
            &["", "", "0", "kind", "kind", "", "", "", ""],
            &["", "", "1", "samples", "uint16", "[N]", "ms", "", ""],
            &["", "", "", "slow samples", "uint32", "", "", "kind", "b"],
            &["pong", "0x0B", "", "", "", "", "", "", ""],
            &["", "", "0", "echo", "string", "", "", "", ""],
        ]),
        index_table(&["10", "11", "12", "0x0B", "reserved"]),
    ]
}

fn schema_error(err: &CodegenError) -> &SchemaError {
    err.schema_error().expect("schema error")
}

#[test]
fn test_minimal_profile() {
    let profile =
        generate_from_tables(minimal_tables(&["10"]), GenerationOptions::new()).expect("generate");

    let types = profile.types_source();
    assert!(types.contains("pub struct Kind(pub u8);"));
    let a = types.find("pub const A: Self = Self(0);").expect("A");
    let b = types.find("pub const B: Self = Self(1);").expect("B");
    assert!(a < b);

    assert!(profile.messages_source().contains("pub struct PingMsg {"));
    assert!(profile.messages_source().contains("pub kind: Kind,"));
    assert!(profile.profile_source().contains("(10, \"Ping\")"));
    assert!(
        profile
            .profile_source()
            .contains("10 => Some(Message::Ping(PingMsg::default())),")
    );
    assert_eq!(profile.stringer_input(), "Kind\n");
    assert!(profile.orphans().is_empty());

    assert_eq!(profile.types().len(), 1);
    let values: Vec<&str> = profile.types()[0].values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(values, ["A", "B"]);
    assert_eq!(profile.messages()[0].name, "Ping");
    assert_eq!(profile.messages()[0].fields[0].name, "kind");
}

#[test]
fn test_orphan_index_entry() {
    let profile = generate_from_tables(minimal_tables(&["10", "11"]), GenerationOptions::new())
        .expect("orphans are not an error");

    assert_eq!(profile.orphans(), ["11"]);
}

#[test]
fn test_unresolved_type() {
    let tables = vec![
        types_table(),
        messages_table(&[
            &["ping", "10", "", "", "", "", "", "", ""],
            &["", "", "0", "kind", "Unknown", "", "", "", ""],
        ]),
        index_table(&["10"]),
    ];
    let err = generate_from_tables(tables, GenerationOptions::new()).expect_err("unresolved");

    assert_eq!(err.stage(), Stage::Resolve);
    assert_eq!(
        schema_error(&err),
        &SchemaError::UnresolvedType {
            message: "Ping".into(),
            field: "kind".into(),
            token: "Unknown".into(),
        }
    );
}

#[test]
fn test_duplicate_message_number() {
    let tables = vec![
        types_table(),
        messages_table(&[
            &["ping", "10", "", "", "", "", "", "", ""],
            &["", "", "0", "kind", "kind", "", "", "", ""],
            &["pong", "10", "", "", "", "", "", "", ""],
        ]),
        index_table(&["10"]),
    ];
    let err = generate_from_tables(tables, GenerationOptions::new()).expect_err("duplicate");

    assert!(matches!(
        schema_error(&err),
        SchemaError::DuplicateMessageNumber { number: 10, .. }
    ));
}

#[test]
fn test_missing_table_is_normalize_stage() {
    let tables = vec![types_table(), messages_table(PING_ROWS)];
    let err = generate_from_tables(tables, GenerationOptions::new()).expect_err("missing index");

    assert_eq!(err.stage(), Stage::Normalize);
    assert!(matches!(
        schema_error(&err),
        SchemaError::SchemaStructure { .. }
    ));
}

#[test]
fn test_determinism() {
    let first = generate_from_tables(richer_tables(), GenerationOptions::new()).expect("first");
    let second = generate_from_tables(richer_tables(), GenerationOptions::new()).expect("second");

    assert_eq!(first, second);
    assert_eq!(first.render(), second.render());
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn test_parallel_normalize_matches_sequential() {
    let sequential =
        generate_from_tables(richer_tables(), GenerationOptions::new()).expect("sequential");
    let parallel = generate_from_tables(
        richer_tables(),
        GenerationOptions::new().with_parallel_normalize(true),
    )
    .expect("parallel");

    assert_eq!(sequential.fingerprint(), parallel.fingerprint());
}

#[test]
fn test_timestamp_independence() {
    let early = Arc::new(FixedClock(
        DateTime::from_timestamp(1_000_000_000, 0).expect("valid timestamp"),
    ));
    let late = Arc::new(FixedClock(
        DateTime::from_timestamp(2_000_000_000, 0).expect("valid timestamp"),
    ));
    let xml = include_bytes!("testdata/minimal.xml");

    let run = |clock: Arc<FixedClock>, options: GenerationOptions| {
        Generator::new("minimal.xml", xml, options)
            .with_clock(clock)
            .generate_profile()
            .expect("generate")
    };

    let a = run(early.clone(), GenerationOptions::new());
    let b = run(late.clone(), GenerationOptions::new());
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert!(!a.profile_source().contains("Generated at"));

    let stamped = GenerationOptions::new().with_generation_timestamp(true);
    let a = run(early, stamped.clone());
    let b = run(late, stamped);
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert!(a.profile_source().contains("// Generated at 2001-09-09T01:46:40Z."));
}

#[test]
fn test_sdk_version_stamp() {
    let options = GenerationOptions::new().with_sdk_version("21.40");
    let profile = generate_from_tables(minimal_tables(&["10"]), options).expect("generate");

    assert!(
        profile
            .profile_source()
            .contains("pub const PROFILE_VERSION: &str = \"21.40\";")
    );
}

#[test]
fn test_name_uniqueness_and_reference_integrity() {
    let profile = generate_from_tables(richer_tables(), GenerationOptions::new()).expect("generate");
    let (model, _) = profilegen_schema::resolve(
        profilegen_schema::normalize(&richer_tables()).expect("normalize"),
    )
    .expect("resolve");

    let names: HashSet<&str> = model.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names.len(), model.types.len());

    for msg in &model.messages {
        let numbers: HashSet<u8> = msg.fields.iter().map(|f| f.number).collect();
        assert_eq!(numbers.len(), msg.fields.len());
        for field in &msg.fields {
            if let profilegen_schema::TypeRef::Declared { index, name } = &field.ty {
                assert_eq!(&model.types[*index].name, name);
            }
        }
    }

    assert!(profile.messages_source().contains("pub samples: Vec<u16>,"));
    assert!(profile.messages_source().contains("/// Field 1, array, units ms."));
    assert!(
        profile
            .messages_source()
            .contains("(1, \"slow_samples\", \"u32\", &[(\"kind\", \"b\")]),")
    );
}

fn assert_no_leaked_lines(source: &str, needle: &str) {
    let leaked: Vec<&str> = source
        .lines()
        .filter(|line| line.trim_start().starts_with(needle))
        .collect();
    assert!(leaked.is_empty(), "comment text leaked as code: {leaked:?}");
}

#[test]
fn test_multi_line_comments_stay_comments() {
    let types = RawTable::from_rows(
        "Types",
        TYPE_COLUMNS,
        &[
            &["kind", "enum", "", "", "first line\nfn broken() {"],
            &["", "", "a", "0", "zero\r\nfn value_broken() {"],
        ],
    );
    let mut columns = MESSAGE_COLUMNS.to_vec();
    columns.push("Comment");
    let messages = RawTable::from_rows(
        "Messages",
        &columns,
        &[
            &["ping", "10", "", "", "", "", "", "", "", "ping\nfn msg_broken() {"],
            &["", "", "0", "kind", "kind", "", "", "", "", "kind\nfn field_broken() {"],
        ],
    );
    let options = GenerationOptions::new().with_sdk_version("16.20\nfn version_broken() {");
    let profile = generate_from_tables(vec![types, messages, index_table(&["10"])], options)
        .expect("generate");

    assert!(profile.types_source().contains("/// first line\n/// fn broken() {\n"));
    assert_no_leaked_lines(profile.types_source(), "fn broken");
    assert_no_leaked_lines(profile.types_source(), "fn value_broken");
    assert_no_leaked_lines(profile.messages_source(), "fn msg_broken");
    assert_no_leaked_lines(profile.messages_source(), "fn field_broken");
    assert_no_leaked_lines(profile.profile_source(), "fn version_broken");
    assert!(profile.profile_source().contains("// Profile version 16.20\n// fn version_broken() {.\n"));
}

#[test]
fn test_subfield_without_selectors_is_rendered() {
    let tables = vec![
        types_table(),
        messages_table(&[
            &["ev", "10", "", "", "", "", "", "", ""],
            &["", "", "0", "data", "uint16", "", "", "", ""],
            &["", "", "", "alt", "uint16", "", "m/s", "", ""],
        ]),
        index_table(&["10"]),
    ];
    let profile = generate_from_tables(tables, GenerationOptions::new()).expect("generate");

    let messages = profile.messages_source();
    assert!(messages.contains("        // alt: units m/s.\n"), "subfield meta missing");
    assert!(messages.contains("        (0, \"alt\", \"u16\", &[]),\n"), "subfield alt missing");
}

#[test]
fn test_orphan_accounting() {
    let tables = richer_tables();
    let index_len = tables[2].rows().len();
    let (model, orphans) =
        profilegen_schema::resolve(profilegen_schema::normalize(&tables).expect("normalize"))
            .expect("resolve");
    let profile = generate_from_tables(tables, GenerationOptions::new()).expect("generate");

    assert_eq!(model.indexed_messages + orphans.len(), index_len);
    assert_eq!(model.indexed_messages, 3);
    assert_eq!(profile.orphans(), ["12", "reserved"]);
}

#[test]
fn test_generate_from_xml_bytes() {
    let profile =
        generate(include_bytes!("testdata/minimal.xml"), GenerationOptions::new()).expect("generate");

    assert_eq!(profile.stringer_input(), "Kind\n");
    assert!(profile.orphans().is_empty());
}

#[test]
fn test_error_reports_path() {
    let err = Generator::new("profiles/broken.xml", b"<workbook/>", GenerationOptions::new())
        .generate_profile()
        .expect_err("no tables");

    assert_eq!(err.path(), "profiles/broken.xml");
    assert_eq!(err.stage(), Stage::Normalize);
    assert!(err.to_string().starts_with("profiles/broken.xml: normalize stage failed: "));
}
