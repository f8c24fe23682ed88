#![cfg(unix)]

use service_scaffold::core::ScaffoldError;
use service_scaffold::normalize::{DependencyMap, DependencySet};
use service_scaffold::scaffold::Installer;

use crate::common::TestProject;

fn deps(names: &[&str]) -> DependencyMap {
    names.iter().map(|name| (name.to_string(), "*".to_string())).collect()
}

#[tokio::test]
async fn test_installs_runtime_then_dev() {
    let project = TestProject::new().unwrap();
    let npm = project.fake_npm(0, "").unwrap();

    let set = DependencySet {
        dependencies: deps(&["bi-service", "lodash"]),
        dev_dependencies: deps(&["mocha"]),
    };
    Installer::new(npm.to_string_lossy(), project.root()).install_all(&set).await.unwrap();

    assert_eq!(
        project.npm_calls(),
        vec!["install --save bi-service lodash", "install --save-dev mocha"]
    );
}

#[tokio::test]
async fn test_empty_dev_set_is_skipped() {
    let project = TestProject::new().unwrap();
    let npm = project.fake_npm(0, "").unwrap();

    let set = DependencySet {
        dependencies: deps(&["lodash"]),
        dev_dependencies: DependencyMap::new(),
    };
    Installer::new(npm.to_string_lossy(), project.root()).install_all(&set).await.unwrap();

    assert_eq!(project.npm_calls(), vec!["install --save lodash"]);
}

#[tokio::test]
async fn test_failure_carries_stderr_and_stops() {
    let project = TestProject::new().unwrap();
    let npm = project.fake_npm(1, "registry unreachable").unwrap();

    let set = DependencySet {
        dependencies: deps(&["lodash"]),
        dev_dependencies: deps(&["mocha"]),
    };
    let err = Installer::new(npm.to_string_lossy(), project.root())
        .install_all(&set)
        .await
        .unwrap_err();

    match err.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::ExternalProcess {
            command,
            stderr,
        }) => {
            assert!(command.ends_with("install --save lodash"));
            assert!(stderr.contains("registry unreachable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(project.npm_calls().len(), 1);
}
