mod support;

use predicates::str::contains;

use support::{stdout_json, TestHome};

#[test]
fn init_creates_project_store() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;

    home.togo()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialized project store"));
    assert!(home.project_store().is_file());

    home.togo()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Project store already exists"));

    home.togo().args(["add", "Project task"]).assert().success();
    let stored = home.read_json(&home.project_store())?;
    assert_eq!(stored["todos"][0]["title"], "Project task");
    assert!(!home.global_store().exists());
    Ok(())
}

#[test]
fn source_reports_kind_and_path() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;

    let output = home.togo().args(["--json", "source"]).output()?;
    let value = stdout_json(&output)?;
    assert_eq!(value["data"]["kind"], "global");
    assert_eq!(value["data"]["exists"], false);
    assert_eq!(value["data"]["tasks"], 0);

    home.togo().arg("init").assert().success();
    home.togo()
        .arg("source")
        .assert()
        .success()
        .stdout(contains("Using project store"));
    Ok(())
}

#[test]
fn nested_directory_finds_parent_marker() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().arg("init").assert().success();
    let nested = home.work().join("src/deep");
    std::fs::create_dir_all(&nested)?;

    home.togo_in(&nested)
        .args(["add", "From below"])
        .assert()
        .success()
        .stdout(contains("- Store: project"));
    let stored = home.read_json(&home.project_store())?;
    assert_eq!(stored["todos"][0]["title"], "From below");
    Ok(())
}

#[test]
fn global_flag_bypasses_project() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().arg("init").assert().success();

    home.togo()
        .args(["--global", "add", "Global task"])
        .assert()
        .success()
        .stdout(contains("- Store: global"));
    let stored = home.read_json(&home.global_store())?;
    assert_eq!(stored["todos"][0]["title"], "Global task");
    let project = home.read_json(&home.project_store())?;
    assert_eq!(project["todos"].as_array().map(|t| t.len()), Some(0));
    Ok(())
}

#[test]
fn project_flag_requires_marker() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo()
        .args(["--project", "list"])
        .assert()
        .code(2)
        .stderr(contains("No .togo project store found"))
        .stderr(contains("hint: togo init"));
    Ok(())
}

#[test]
fn explicit_file_wins() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().arg("init").assert().success();

    home.togo()
        .args(["--file", "lists/errands.json", "add", "Buy milk"])
        .assert()
        .success()
        .stdout(contains("- Store: file"));
    let path = home.work().join("lists/errands.json");
    let stored = home.read_json(&path)?;
    assert_eq!(stored["todos"][0]["title"], "Buy milk");
    assert!(home.root().join("work/lists").is_dir());
    Ok(())
}
