mod support;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

use support::{stdout_json, TestHome};

#[test]
fn add_persists_to_global_store() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;

    home.togo()
        .args(["add", "Buy", "milk"])
        .assert()
        .success()
        .stdout(contains("Task added: Buy milk"))
        .stdout(contains("- ID: 1"));
    home.togo().args(["add", "Walk dog"]).assert().success();

    let stored = home.read_json(&home.global_store())?;
    assert_eq!(stored["next_id"], 3);
    let todos = stored["todos"].as_array().expect("todos array");
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0]["title"], "Buy milk");
    assert_eq!(todos[0]["completed"], false);
    assert_eq!(todos[0]["archived"], false);
    assert!(todos[0]["created_at"].is_string());
    Ok(())
}

#[test]
fn blank_title_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo()
        .args(["add", "   "])
        .assert()
        .code(2)
        .stderr(contains("title cannot be empty"));
    assert!(!home.global_store().exists());
    Ok(())
}

#[test]
fn write_report_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;

    home.togo().args(["add", "Write report"]).assert().success();
    home.togo()
        .args(["toggle", "Write report"])
        .assert()
        .success()
        .stdout(contains("Task completed: Write report"));
    home.togo()
        .args(["archive", "write REPORT"])
        .assert()
        .success()
        .stdout(contains("Task archived"));

    home.togo()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("No active tasks"));
    home.togo()
        .args(["list", "--archived"])
        .assert()
        .success()
        .stdout(contains("[x] Write report  (archived)"));

    home.togo().args(["unarchive", "1"]).assert().success();
    let stored = home.read_json(&home.global_store())?;
    assert_eq!(stored["todos"][0]["archived"], false);
    assert_eq!(stored["todos"][0]["completed"], true);

    home.togo()
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Task deleted: Write report"));
    let stored = home.read_json(&home.global_store())?;
    assert_eq!(stored["todos"].as_array().map(|t| t.len()), Some(0));
    assert_eq!(stored["next_id"], 2);
    Ok(())
}

#[test]
fn list_json_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Buy milk"]).assert().success();
    home.togo().args(["add", "Walk dog"]).assert().success();
    home.togo().args(["archive", "Walk dog"]).assert().success();

    let output = home.togo().args(["--json", "list", "--all"]).output()?;
    assert!(output.status.success());
    let value = stdout_json(&output)?;
    assert_eq!(value["schema_version"], "togo.v1");
    assert_eq!(value["command"], "list");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["view"], "all");
    assert_eq!(value["data"]["source"]["kind"], "global");
    let tasks = value["data"]["tasks"].as_array().expect("tasks");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1]["archived"], true);

    let output = home.togo().args(["--json", "list"]).output()?;
    let value = stdout_json(&output)?;
    assert_eq!(value["data"]["view"], "active");
    assert_eq!(value["data"]["tasks"].as_array().map(|t| t.len()), Some(1));
    Ok(())
}

#[test]
fn ambiguous_input_fails_without_terminal() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Buy milk"]).assert().success();
    home.togo().args(["add", "Buy bread"]).assert().success();

    home.togo()
        .args(["toggle", "buy"])
        .assert()
        .code(2)
        .stderr(contains("multiple tasks match \"buy\""))
        .stderr(contains("Buy milk (1)"))
        .stderr(contains("Buy bread (2)"));

    let output = home.togo().args(["--json", "toggle", "buy"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["kind"], "user_error");
    assert_eq!(
        value["error"]["details"]["candidates"]
            .as_array()
            .map(|c| c.len()),
        Some(2)
    );

    // Nothing changed.
    let stored = home.read_json(&home.global_store())?;
    assert_eq!(stored["todos"][0]["completed"], false);
    assert_eq!(stored["todos"][1]["completed"], false);
    Ok(())
}

#[test]
fn unique_substring_resolves() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Buy milk"]).assert().success();
    home.togo().args(["add", "Buy bread"]).assert().success();

    home.togo()
        .args(["toggle", "milk"])
        .assert()
        .success()
        .stdout(contains("Task completed: Buy milk"));
    Ok(())
}

#[test]
fn numeric_title_beats_id() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "2"]).assert().success();
    home.togo().args(["add", "second"]).assert().success();

    home.togo().args(["toggle", "2"]).assert().success();
    let stored = home.read_json(&home.global_store())?;
    assert_eq!(stored["todos"][0]["completed"], true);
    assert_eq!(stored["todos"][1]["completed"], false);
    Ok(())
}

#[test]
fn unknown_input_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Buy milk"]).assert().success();

    home.togo()
        .args(["show", "zebra"])
        .assert()
        .code(2)
        .stderr(contains("no tasks matched \"zebra\""));
    Ok(())
}

#[test]
fn archive_pool_excludes_archived_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Report"]).assert().success();
    home.togo().args(["archive", "Report"]).assert().success();

    home.togo()
        .args(["archive", "Report"])
        .assert()
        .code(2)
        .stderr(contains("no active tasks"));
    home.togo()
        .args(["unarchive", "Report"])
        .assert()
        .success()
        .stdout(contains("Task unarchived: Report"));
    home.togo()
        .args(["unarchive", "Report"])
        .assert()
        .code(2)
        .stderr(contains("no archived tasks"));
    Ok(())
}

#[test]
fn empty_store_reports_no_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo()
        .args(["toggle", "anything"])
        .assert()
        .code(2)
        .stderr(contains("error: no tasks"))
        .stderr(contains("hint: togo add <title>"));
    Ok(())
}

#[test]
fn missing_input_without_terminal_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Buy milk"]).assert().success();
    home.togo()
        .arg("toggle")
        .assert()
        .code(2)
        .stderr(contains("a task title or id is required to toggle"));
    Ok(())
}

#[test]
fn delete_requires_confirmation_flag() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Buy milk"]).assert().success();

    home.togo()
        .args(["delete", "Buy milk"])
        .assert()
        .code(2)
        .stderr(contains("pass --yes"));
    let stored = home.read_json(&home.global_store())?;
    assert_eq!(stored["todos"].as_array().map(|t| t.len()), Some(1));

    home.write_config("confirm_delete = false\n")?;
    home.togo().args(["delete", "Buy milk"]).assert().success();
    let stored = home.read_json(&home.global_store())?;
    assert_eq!(stored["todos"].as_array().map(|t| t.len()), Some(0));
    Ok(())
}

#[test]
fn show_reports_details() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Write report"]).assert().success();

    home.togo()
        .args(["show", "report"])
        .assert()
        .success()
        .stdout(contains("Write report"))
        .stdout(contains("- Status: Pending"))
        .stdout(contains("- Age: now"));

    let output = home.togo().args(["--json", "show", "1"]).output()?;
    let value = stdout_json(&output)?;
    assert_eq!(value["data"]["task"]["id"], 1);
    assert_eq!(value["data"]["task"]["title"], "Write report");
    Ok(())
}

#[test]
fn titles_feed_one_per_line() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Buy milk"]).assert().success();
    home.togo().args(["add", "Walk dog"]).assert().success();
    home.togo().args(["archive", "Walk dog"]).assert().success();

    home.togo()
        .arg("titles")
        .assert()
        .success()
        .stdout("Buy milk\nWalk dog\n");
    home.togo()
        .args(["titles", "--active"])
        .assert()
        .success()
        .stdout("Buy milk\n");
    home.togo()
        .args(["titles", "--archived"])
        .assert()
        .success()
        .stdout("Walk dog\n");
    Ok(())
}

#[test]
fn bare_invocation_lists_without_terminal() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.togo().args(["add", "Buy milk"]).assert().success();

    home.togo()
        .assert()
        .success()
        .stdout(contains("   1  [ ] Buy milk  now"));
    Ok(())
}

#[test]
fn legacy_store_is_backfilled() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.write_global_store(
        r#"{"todos":[{"id":4,"title":"Old task","completed":false,"archived":false}]}"#,
    )?;

    home.togo().args(["add", "New task"]).assert().success();
    let stored = home.read_json(&home.global_store())?;
    assert!(stored["todos"][0]["created_at"].is_string());
    assert_eq!(stored["todos"][1]["id"], 5);
    assert_eq!(stored["next_id"], 6);
    Ok(())
}

#[test]
fn corrupt_store_is_a_storage_fault() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.write_global_store("{ this is not json")?;

    home.togo()
        .args(["add", "Buy milk"])
        .assert()
        .code(4)
        .stderr(contains("Corrupt task store"));
    // The broken file is left alone.
    assert_eq!(
        std::fs::read_to_string(home.global_store())?,
        "{ this is not json"
    );
    Ok(())
}

#[test]
fn verbose_logs_stay_off_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    let output = home.togo().args(["-v", "--json", "add", "Buy milk"]).output()?;
    assert!(output.status.success());
    let value = stdout_json(&output)?;
    assert_eq!(value["data"]["task"]["title"], "Buy milk");
    Ok(())
}

#[test]
fn invalid_config_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.write_config("file_name = [")?;

    home.togo()
        .args(["add", "Buy milk"])
        .assert()
        .success()
        .stderr(contains("error").not());
    assert!(home.global_store().exists());
    Ok(())
}

#[test]
fn configured_file_name_is_used() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    home.write_config("file_name = \"work.json\"\n")?;

    home.togo().args(["add", "Buy milk"]).assert().success();
    assert!(home.home().join("work.json").exists());
    assert!(!home.global_store().exists());
    Ok(())
}

#[test]
fn foreign_json_is_not_overwritten() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new()?;
    let foreign = r#"{"items":[{"name":"keep me"}]}"#;
    home.write_global_store(foreign)?;

    home.togo()
        .args(["add", "Buy milk"])
        .assert()
        .code(4)
        .stderr(contains("Corrupt task store"));
    assert_eq!(std::fs::read_to_string(home.global_store())?, foreign);
    Ok(())
}
