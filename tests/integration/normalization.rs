use serde_json::{Value, json};
use service_scaffold::answers::AnswerSet;
use service_scaffold::normalize::{
    dependencies, extract_package, normalize_answers, normalize_config, normalize_dependencies,
};
use service_scaffold::test_utils::{init_test_logging, sample_answers};

/// The mysql scenario: storage block, sequelize refs and no apps.
#[test]
fn test_mysql_config_scenario() {
    init_test_logging(None);

    let raw = json!({
        "_sqlProvider": "mysql",
        "_sqlHost": "localhost",
        "_sqlDatabase": "app",
        "_sqlUsername": "root",
        "_sqlPassword": "pw",
        "_apps": [],
    });
    let Value::Object(raw) = raw else { unreachable!() };

    let tree = normalize_config(&raw).unwrap().to_json();
    assert_eq!(
        tree,
        json!({
            "storage": {
                "mysql": {
                    "host": "localhost",
                    "ssl": false,
                    "databases": {"main": {"db": "app", "username": "root", "password": "pw"}},
                },
            },
            "apps": {},
            "sequelize": {
                "cache": false,
                "dialect": "mysql",
                "host": {"$ref": "#/storage/mysql/host"},
                "port": {"$ref": "#/storage/mysql/port"},
                "ssl": {"$ref": "#/storage/mysql/ssl"},
                "db": {"$ref": "#/storage/mysql/databases/main/db"},
                "username": {"$ref": "#/storage/mysql/databases/main/username"},
                "password": {"$ref": "#/storage/mysql/databases/main/password"},
            },
        })
    );
}

/// `["mysql", "mocha"]` splits into runtime and dev sets over the baseline.
#[test]
fn test_dependency_split_scenario() {
    let selected = vec!["mysql".to_string(), "mocha".to_string()];
    let set = normalize_dependencies(
        &selected,
        &dependencies::default_registry(),
        &dependencies::default_baseline(),
    );

    assert_eq!(
        serde_json::to_value(&set).unwrap(),
        json!({
            "dependencies": {"bi-service": "*", "bluebird": "*", "lodash": "*", "mysql": "*"},
            "devDependencies": {"mocha": "*"},
        })
    );
}

/// Every `$ref` target that names generated data resolves within the tree.
#[test]
fn test_sequelize_refs_resolve_into_storage() {
    let answers = AnswerSet::from_value(sample_answers()).unwrap();
    let tree = normalize_config(&answers.raw_config().unwrap()).unwrap().to_json();

    for field in ["host", "port", "ssl", "db", "username", "password"] {
        let pointer = tree["sequelize"][field]["$ref"].as_str().unwrap();
        let target = tree.pointer(pointer.trim_start_matches('#'));
        assert!(target.is_some(), "{pointer} does not resolve");
    }

    let base_url = &tree["apps"]["public"]["baseUrl"]["$join"];
    assert_eq!(base_url[0], "http://127.0.0.1:");
    let port_ref = base_url[1]["$ref"].as_str().unwrap();
    assert_eq!(tree.pointer(port_ref.trim_start_matches('#')), Some(&json!(3000)));
}

#[test]
fn test_doc_app_nests_under_parent() {
    let answers = AnswerSet::from_value(sample_answers()).unwrap();
    let tree = normalize_config(&answers.raw_config().unwrap()).unwrap();

    assert_eq!(tree.app_names(), vec!["public", "cli"]);
    let json = tree.to_json();
    assert_eq!(json["apps"]["public"]["doc"]["listen"]["$ref"], "#/listen/public-doc/port");
    assert!(json["apps"]["cli"].get("doc").is_none());
    assert_eq!(json["storage"]["couchbase"]["host"], "localhost");
}

#[test]
fn test_normalizers_do_not_touch_input() {
    let original = sample_answers();
    let answers = AnswerSet::from_value(original.clone()).unwrap();

    let normalized = normalize_answers(
        &answers,
        &dependencies::default_registry(),
        &dependencies::default_baseline(),
    )
    .unwrap();
    let again = normalize_answers(
        &answers,
        &dependencies::default_registry(),
        &dependencies::default_baseline(),
    )
    .unwrap();

    assert_eq!(serde_json::to_value(&answers).unwrap(), original);
    assert_eq!(normalized, again);
}

#[test]
fn test_package_drops_internal_fields_only() {
    let answers = AnswerSet::from_value(json!({
        "name": "svc",
        "_": "kept",
        "_config": {},
        "_private": 1,
        "scripts": {"_test": "x"},
    }))
    .unwrap();

    let package = extract_package(&answers);
    assert_eq!(
        Value::Object(package),
        json!({"name": "svc", "_": "kept", "scripts": {"_test": "x"}})
    );
}
