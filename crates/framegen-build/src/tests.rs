use crate::{BuildConfig, GenerateError, generate, write_artifacts};
use framegen_spec::{SpecError, node::Spec};
use tracing_test::traced_test;

const DESCRIPTION: &str = r#"{
    "major-version": 0,
    "minor-version": 9,
    "revision": 1,
    "port": 5672,
    "domains": [["queue-name", "shortstr"], ["no-wait", "bit"], ["peer-properties", "table"]],
    "constants": [
        {"name": "FRAME-END", "value": 206},
        {"name": "NOT-FOUND", "value": 404, "class": "soft-error"},
        {"name": "CHANNEL-ERROR", "value": 504, "class": "hard-error"},
        {"name": "INTERNAL-ERROR", "value": 541, "class": "hard-error"}
    ],
    "classes": [
        {
            "id": 50,
            "name": "queue",
            "methods": [
                {
                    "id": 10,
                    "name": "declare",
                    "synchronous": true,
                    "arguments": [
                        {"type": "short", "name": "reserved-1", "default-value": 0},
                        {"domain": "queue-name", "name": "queue", "default-value": ""},
                        {"type": "bit", "name": "passive", "default-value": false},
                        {"type": "bit", "name": "durable", "default-value": false},
                        {"domain": "no-wait", "name": "no-wait", "default-value": false},
                        {"domain": "peer-properties", "name": "arguments", "default-value": {}}
                    ]
                },
                {"id": 11, "name": "declare-ok", "arguments": []}
            ]
        },
        {
            "id": 60,
            "name": "basic",
            "properties": [
                {"type": "shortstr", "name": "content-type"},
                {"type": "octet", "name": "delivery-mode"},
                {"type": "bit", "name": "persistent"},
                {"type": "timestamp", "name": "timestamp"}
            ],
            "methods": [
                {"id": 40, "name": "publish", "content": true, "arguments": [
                    {"domain": "queue-name", "name": "routing-key"}
                ]}
            ]
        }
    ]
}"#;

fn spec() -> Spec {
    Spec::from_json_str(DESCRIPTION).expect("description should load")
}

fn item_names(source: &str) -> Vec<String> {
    let file = syn::parse_file(source).expect("artifact should parse as rust");

    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Const(item) => Some(item.ident.to_string()),
            syn::Item::Enum(item) => Some(item.ident.to_string()),
            syn::Item::Fn(item) => Some(item.sig.ident.to_string()),
            syn::Item::Struct(item) => Some(item.ident.to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn declarations_parse_and_declare_every_record() {
    let artifacts = generate(&spec(), &BuildConfig::default()).unwrap();
    let names = item_names(&artifacts.declarations);

    for expected in [
        "VERSION",
        "PROTOCOL_PORT",
        "FRAME_END",
        "NOT_FOUND",
        "QueueDeclare",
        "QueueDeclareOk",
        "QueueProperties",
        "BasicPublish",
        "BasicProperties",
        "MethodName",
        "Method",
        "Properties",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
}

#[test]
fn definitions_parse_and_define_every_procedure() {
    let artifacts = generate(&spec(), &BuildConfig::default()).unwrap();
    let names = item_names(&artifacts.definitions);

    for expected in [
        "version",
        "lookup_method_name",
        "method_id",
        "method_has_content",
        "method_fieldnames",
        "method_record",
        "is_method_synchronous",
        "decode_method_fields",
        "encode_method_fields",
        "decode_queue_declare",
        "encode_queue_declare_ok",
        "decode_properties",
        "encode_properties",
        "decode_basic_properties",
        "lookup_class_name",
        "class_id",
        "lookup_exception",
        "exception_code",
        "exception_name",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
}

#[test]
fn generation_is_deterministic() {
    let spec = spec();
    let config = BuildConfig::default();

    let first = generate(&spec, &config).unwrap();
    let second = generate(&spec, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.name, "framing_amqp_0_9_1");
}

#[test]
fn runtime_path_is_configurable() {
    let config = BuildConfig {
        runtime_crate: "crate::rt".to_string(),
        ..BuildConfig::default()
    };
    let artifacts = generate(&spec(), &config).unwrap();

    assert!(artifacts.definitions.contains("crate :: rt :: Reader"));
    assert!(!artifacts.definitions.contains("framegen_runtime"));
}

#[test]
fn unknown_domain_aborts_generation() {
    let json = DESCRIPTION.replace(r#""type": "octet""#, r#""type": "float""#);
    let spec = Spec::from_json_str(&json).unwrap();

    let err = generate(&spec, &BuildConfig::default()).unwrap_err();
    assert!(matches!(err, GenerateError::Spec(SpecError::UnknownDomain(d)) if d == "float"));
}

#[test]
fn mismatched_default_aborts_generation() {
    let json = DESCRIPTION.replace(
        r#""name": "reserved-1", "default-value": 0"#,
        r#""name": "reserved-1", "default-value": "zero""#,
    );
    let spec = Spec::from_json_str(&json).unwrap();

    assert!(matches!(
        generate(&spec, &BuildConfig::default()),
        Err(GenerateError::DefaultMismatch { .. })
    ));
}

#[test]
#[traced_test]
fn generation_logs_the_artifact_name() {
    generate(&spec(), &BuildConfig::default()).unwrap();

    assert!(logs_contain("generated framing artifacts"));
    assert!(logs_contain("framing_amqp_0_9_1"));
}

#[test]
fn artifacts_are_written_side_by_side() {
    let dir = std::env::temp_dir().join(format!("framegen-build-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let artifacts = generate(&spec(), &BuildConfig::default()).unwrap();
    let (decls, defs) = write_artifacts(&artifacts, &dir).unwrap();

    assert_eq!(std::fs::read_to_string(&decls).unwrap(), artifacts.declarations);
    assert_eq!(std::fs::read_to_string(&defs).unwrap(), artifacts.definitions);
    assert!(decls.ends_with("framing_amqp_0_9_1_decls.rs"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn method_free_descriptions_match_through_dereference() {
    let json = r#"{
        "major-version": 0,
        "minor-version": 9,
        "revision": 1,
        "port": 5672,
        "constants": [{"name": "INTERNAL-ERROR", "value": 541, "class": "hard-error"}],
        "classes": [
            {"id": 60, "name": "header", "properties": [{"type": "octet", "name": "priority"}]}
        ]
    }"#;
    let spec = Spec::from_json_str(json).unwrap();
    let artifacts = generate(&spec, &BuildConfig::default()).unwrap();

    item_names(&artifacts.declarations);
    item_names(&artifacts.definitions);

    assert!(artifacts.declarations.contains("match * self"));
    assert!(artifacts.definitions.contains("match * method"));
    assert!(artifacts.definitions.contains("match * properties"));
}

#[test]
fn class_free_descriptions_still_render() {
    let json = r#"{
        "major-version": 0,
        "minor-version": 9,
        "revision": 1,
        "port": 5672,
        "constants": [{"name": "INTERNAL-ERROR", "value": 541, "class": "hard-error"}],
        "classes": []
    }"#;
    let spec = Spec::from_json_str(json).unwrap();
    let artifacts = generate(&spec, &BuildConfig::default()).unwrap();

    assert!(item_names(&artifacts.declarations).iter().any(|n| n == "Properties"));
    assert!(item_names(&artifacts.definitions).iter().any(|n| n == "encode_properties"));
}
