use assert_cmd::Command;
use predicates::prelude::*;

fn devlens() -> Command {
    Command::cargo_bin("devlens").unwrap()
}

fn seeded_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    std::fs::write(
        root.join("Cargo.lock"),
        r#"
version = 4

[[package]]
name = "anyhow"
version = "1.0.100"
source = "registry+https://github.com/rust-lang/crates.io-index"

[[package]]
name = "demo-app"
version = "0.1.0"
dependencies = ["anyhow"]
"#,
    )
    .unwrap();

    let db = devlens_index::Database::open(&root.join("app.db")).unwrap();
    db.execute_batch(
        "CREATE TABLE widgets (id INTEGER PRIMARY KEY, label TEXT);\
         CREATE TABLE schema_migrations (version TEXT PRIMARY KEY);",
    )
    .unwrap();
    for i in 1..=7 {
        db.execute_batch(&format!(
            "INSERT INTO widgets (id, label) VALUES ({i}, 'widget {i}')"
        ))
        .unwrap();
    }

    dir
}

#[test]
fn help_names_every_section() {
    devlens()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("tables"))
        .stdout(predicate::str::contains("trace"))
        .stdout(predicate::str::contains("crates"));
}

#[test]
fn tables_lists_catalog_without_bookkeeping() {
    let dir = seeded_project();
    devlens()
        .arg("--project-root")
        .arg(dir.path())
        .arg("--db")
        .arg(dir.path().join("app.db"))
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("widgets"))
        .stdout(predicate::str::contains("schema_migrations").not());
}

#[test]
fn tables_pages_rows_as_json() {
    let dir = seeded_project();
    let output = devlens()
        .arg("--project-root")
        .arg(dir.path())
        .arg("--db")
        .arg(dir.path().join("app.db"))
        .arg("--format")
        .arg("json")
        .arg("tables")
        .arg("widgets")
        .arg("--page")
        .arg("2")
        .arg("--per-page")
        .arg("5")
        .output()
        .unwrap();

    assert!(output.status.success());
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total"], 7);
    assert_eq!(page["rows"].as_array().unwrap().len(), 2);
    assert_eq!(page["rows"][0][0], 6);
}

#[test]
fn tables_unknown_table_fails() {
    let dir = seeded_project();
    devlens()
        .arg("--project-root")
        .arg(dir.path())
        .arg("--db")
        .arg(dir.path().join("app.db"))
        .arg("tables")
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table not found"));
}

#[test]
fn tables_without_database_explains_itself() {
    let dir = tempfile::tempdir().unwrap();
    devlens()
        .arg("--project-root")
        .arg(dir.path())
        .arg("tables")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database configured"));
}

#[test]
fn trace_groups_frames_from_stdin() {
    let dir = seeded_project();
    let input = format!(
        "{root}/src/main.rs:3:in 'main'\n/rustc/0000/library/std/src/rt.rs:1\n",
        root = dir.path().display()
    );

    let output = devlens()
        .arg("--project-root")
        .arg(dir.path())
        .arg("--format")
        .arg("json")
        .arg("trace")
        .write_stdin(input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let trace: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let groups = trace["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["category"], "application");
    assert_eq!(groups[1]["category"], "runtime");
}

#[test]
fn crates_reads_the_lock_file() {
    let dir = seeded_project();
    devlens()
        .arg("--project-root")
        .arg(dir.path())
        .arg("crates")
        .assert()
        .success()
        .stdout(predicate::str::contains("anyhow 1.0.100"))
        .stdout(predicate::str::contains("demo-app 0.1.0"));
}

#[test]
fn crates_lookup_unknown_name_fails() {
    let dir = seeded_project();
    devlens()
        .arg("--project-root")
        .arg(dir.path())
        .arg("crates")
        .arg("left-pad")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Crate not found"));
}
