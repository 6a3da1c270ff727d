use preview_worker::{build_gallery, DeployTarget};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TREE_URL: &str = "https://github.com/qiime/emperor";

/// Lays out a minimal project clone: entry-point script, example manifest,
/// and a test-data tree for the module.
fn write_project(root: &Path, manifest: &str) -> PathBuf {
    let scripts = root.join("scripts");
    fs::create_dir_all(&scripts).unwrap();

    let script = scripts.join("make_emperor.py");
    fs::write(&script, "#!/usr/bin/env python\n").unwrap();
    fs::write(scripts.join("make_emperor.examples.toml"), manifest).unwrap();

    let test_data = root.join("tests/scripts_test_data/make_emperor");
    fs::create_dir_all(&test_data).unwrap();
    fs::write(test_data.join("mapping.txt"), "#SampleID\tTreatment\n").unwrap();

    script
}

#[tokio::test]
async fn builds_pull_request_gallery_end_to_end() {
    let project = TempDir::new().unwrap();
    let deploy = TempDir::new().unwrap();

    // out1 succeeds, out2's command fails; both must be linked, in order.
    let script = write_project(
        project.path(),
        r#"
[[example]]
description = "working example"
command = "mkdir -p out1 && cp mapping.txt out1/mapping.txt && touch out1/index.html"
output-dir = "out1"

[[example]]
description = "broken example"
command = "%prog --no-such-flag"
output-dir = "out2"
"#,
    );

    let report = build_gallery(&script, deploy.path(), DeployTarget::PullRequest(42), TREE_URL)
        .await
        .unwrap();

    assert_eq!(report.examples_attempted, 2);
    assert_eq!(report.command_failures, 1);

    let workdir = deploy.path().join("make_emperor");

    // Test data was copied next to the examples.
    assert!(workdir.join("mapping.txt").is_file());
    // The working example ran in the module directory and saw the test data.
    assert_eq!(
        fs::read_to_string(workdir.join("out1/mapping.txt")).unwrap(),
        "#SampleID\tTreatment\n"
    );

    let index = fs::read_to_string(workdir.join("index.html")).unwrap();
    assert!(index.contains(
        "<h1>Examples built from <a href=\"https://github.com/qiime/emperor/pull/42\">pull_42</a></h1>"
    ));
    assert!(index.contains("<br><a href=\"out1/index.html\">out1</a>"));
    assert!(index.contains("<br><a href=\"out2/index.html\">out2</a>"));

    // Links appear in manifest order.
    let out1 = index.find("out1/index.html").unwrap();
    let out2 = index.find("out2/index.html").unwrap();
    assert!(out1 < out2);
}

#[tokio::test]
async fn master_gallery_heading_links_to_the_source_tree() {
    let project = TempDir::new().unwrap();
    let deploy = TempDir::new().unwrap();

    let script = write_project(
        project.path(),
        r#"
[[example]]
description = "working example"
command = "mkdir -p out1"
output-dir = "out1"
"#,
    );

    build_gallery(&script, deploy.path(), DeployTarget::Master, TREE_URL)
        .await
        .unwrap();

    let index = fs::read_to_string(deploy.path().join("make_emperor/index.html")).unwrap();
    assert!(index.contains(
        "<h1>Examples built from <a href=\"https://github.com/qiime/emperor/tree/master\">master</a></h1>"
    ));
}

#[tokio::test]
async fn stale_example_output_is_deleted_before_the_run() {
    let project = TempDir::new().unwrap();
    let deploy = TempDir::new().unwrap();

    let script = write_project(
        project.path(),
        r#"
[[example]]
description = "rebuilds out1"
command = "mkdir -p out1 && touch out1/fresh.txt"
output-dir = "out1"
"#,
    );

    // Leftovers from a previous build of the same target.
    let stale = deploy.path().join("make_emperor/out1");
    fs::create_dir_all(&stale).unwrap();
    fs::write(stale.join("stale.txt"), "old").unwrap();

    build_gallery(&script, deploy.path(), DeployTarget::Master, TREE_URL)
        .await
        .unwrap();

    assert!(!stale.join("stale.txt").exists());
    assert!(stale.join("fresh.txt").is_file());
}

#[tokio::test]
async fn substitutes_the_program_name_into_commands() {
    let project = TempDir::new().unwrap();
    let deploy = TempDir::new().unwrap();

    let script = write_project(
        project.path(),
        r#"
[[example]]
description = "records the program name"
command = "mkdir -p out1 && echo %prog > out1/prog.txt"
output-dir = "out1"
"#,
    );

    build_gallery(&script, deploy.path(), DeployTarget::Master, TREE_URL)
        .await
        .unwrap();

    let recorded =
        fs::read_to_string(deploy.path().join("make_emperor/out1/prog.txt")).unwrap();
    assert_eq!(recorded.trim(), "make_emperor.py");
}

#[tokio::test]
async fn failed_commands_still_get_a_link() {
    let project = TempDir::new().unwrap();
    let deploy = TempDir::new().unwrap();

    let script = write_project(
        project.path(),
        r#"
[[example]]
description = "always fails"
command = "exit 1"
output-dir = "out1"
"#,
    );

    let report = build_gallery(&script, deploy.path(), DeployTarget::Master, TREE_URL)
        .await
        .unwrap();

    assert_eq!(report.examples_attempted, 1);
    assert_eq!(report.command_failures, 1);

    let index = fs::read_to_string(deploy.path().join("make_emperor/index.html")).unwrap();
    assert!(index.contains("<br><a href=\"out1/index.html\">out1</a>"));
}
