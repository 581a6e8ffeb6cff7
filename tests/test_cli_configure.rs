mod common {
    pub mod test_prelude;
    pub mod test_utils;
}
use common::test_prelude::*;
use common::test_utils::{TestWorkspace, SCENARIO_XML};

#[test]
fn test_configure_saves_relative_path() {
    let ws = TestWorkspace::new().unwrap();
    let build = ws.write_file("sub/build.xml", SCENARIO_XML).unwrap();
    ant_e(ws.path())
        .arg("configure")
        .arg(&build)
        .assert()
        .success()
        .stdout(contains("Build file configured: sub/build.xml"));
    assert!(ws.settings().unwrap().contains("build_file_path = \"sub/build.xml\""));

    ant_e(ws.path())
        .args(["list", "--primary"])
        .assert()
        .success()
        .stdout(contains("clean"));
}

#[test]
fn test_configure_keeps_outside_path_absolute() {
    let ws = TestWorkspace::new().unwrap();
    let outside = ws.temp_dir.path().join("elsewhere.xml");
    std::fs::write(&outside, SCENARIO_XML).unwrap();
    ant_e(ws.path())
        .arg("configure")
        .arg(&outside)
        .assert()
        .success();
    assert!(ws.settings().unwrap().contains("elsewhere.xml"));
    ant_e(ws.path()).arg("list").assert().success().stdout(contains("init"));
}

#[test]
fn test_configure_picker_lists_candidates() {
    let ws = TestWorkspace::new().unwrap();
    ws.write_file("build.xml", SCENARIO_XML).unwrap();
    ws.write_file("conf/ivy.xml", "<ivy/>").unwrap();
    ws.write_file("node_modules/pkg/build.xml", SCENARIO_XML).unwrap();
    // stdin is not a terminal here, so nothing gets picked.
    ant_e(ws.path())
        .arg("configure")
        .assert()
        .success()
        .stdout(
            contains("1: build.xml")
                .and(contains("ivy.xml"))
                .and(contains("node_modules").not())
                .and(contains("No build file selected.")),
        );
    assert!(ws.settings().is_err());
}

#[test]
fn test_version_feature_flags() {
    let ws = TestWorkspace::new().unwrap();
    ant_e(ws.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("ant-e ").and(contains("[")).and(contains("]")))
        .stdout(if cfg!(feature = "tui") {
            contains("\"tui\"").and(contains("\"!tui\"").not()).boxed()
        } else {
            contains("\"!tui\"").boxed()
        });
}
