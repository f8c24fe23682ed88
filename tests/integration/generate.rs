use serde_json::{Value, json};
use service_scaffold::answers::AnswerSet;
use service_scaffold::config::GeneratorConfig;
use service_scaffold::scaffold::{self, ScaffoldOptions};
use service_scaffold::test_utils::{init_test_logging, sample_answers};

use crate::common::{TestProject, serve_once};

#[tokio::test]
async fn test_generate_full_project() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();

    let document = json!({"body": "Copyright (c) [year] [fullname]"});
    let (base_url, _request) = serve_once(200, document.to_string()).await.unwrap();

    let mut config = GeneratorConfig {
        github_api_url: base_url,
        ..GeneratorConfig::default()
    };
    #[cfg(unix)]
    {
        config.npm_command = project.fake_npm(0, "").unwrap().to_string_lossy().to_string();
    }
    #[cfg(not(unix))]
    {
        config.skip_install = true;
    }

    let answers = AnswerSet::from_value(sample_answers()).unwrap();
    let options = ScaffoldOptions::new(project.project_dir());
    let summary = scaffold::run(answers, &config, &options).await.unwrap();

    for path in [
        "package.json",
        "config/development/config.json5",
        "index.js",
        "LICENSE",
        "CHANGELOG.md",
        "lib/app.js",
        ".gitignore",
        ".npmignore",
        "test/test.js",
        "lib/database/sequelize.js",
        "lib/database/couchbase.js",
        "lib/routes/v1.0/public/example/router.js",
        "lib/routes/v1.0/public/example/routes/get.js",
    ] {
        assert!(project.project_dir().join(path).is_file(), "missing {path}");
    }
    assert!(project.project_dir().join("lib/models/orm").is_dir());
    assert!(project.project_dir().join("lib/models/odm").is_dir());
    assert!(!project.project_dir().join("lib/routes/v1.0/cli").exists());
    assert_eq!(summary.files.len(), 13);

    let license = project.read_project_file("LICENSE").unwrap();
    assert!(license.contains("Sample Author"));
    assert!(!license.contains("[year]"));

    let package: Value = serde_json::from_str(&project.read_project_file("package.json").unwrap()).unwrap();
    assert_eq!(package["name"], "sample-service");
    assert_eq!(package["scripts"]["start"], "./node_modules/.bin/bi-service run");
    assert!(package.get("_dependencies").is_none());

    #[cfg(unix)]
    {
        assert!(summary.installed);
        assert_eq!(
            project.npm_calls(),
            vec!["install --save bi-service bluebird lodash mysql", "install --save-dev mocha"]
        );
    }
}

#[tokio::test]
async fn test_license_service_failure_aborts_before_writing() {
    let project = TestProject::new().unwrap();
    let (base_url, _request) = serve_once(500, "oops".to_string()).await.unwrap();

    let config = GeneratorConfig {
        github_api_url: base_url,
        skip_install: true,
        ..GeneratorConfig::default()
    };
    let answers = AnswerSet::from_value(sample_answers()).unwrap();
    let err = scaffold::run(answers, &config, &ScaffoldOptions::new(project.project_dir()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"));
    assert!(!project.project_dir().exists());
}

#[tokio::test]
async fn test_none_license_writes_empty_license_file() {
    let project = TestProject::new().unwrap();
    let mut answers = sample_answers();
    answers["license"] = json!("None");

    let config = GeneratorConfig {
        // Unused: "None" never reaches the network.
        github_api_url: "http://127.0.0.1:0".to_string(),
        skip_install: true,
        ..GeneratorConfig::default()
    };
    scaffold::run(
        AnswerSet::from_value(answers).unwrap(),
        &config,
        &ScaffoldOptions::new(project.project_dir()),
    )
    .await
    .unwrap();

    assert_eq!(project.read_project_file("LICENSE").unwrap(), "\n");
}
