use assert_cmd::Command;
use predicates::prelude::*;

fn scrawl(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("scrawl").unwrap();
    cmd.arg("--dir").arg(dir);
    cmd
}

#[test]
fn create_and_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .args(["create", "Shopping", "- milk\n- eggs"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Created note: Shopping"));

    scrawl(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("Shopping"));
}

#[test]
fn view_shows_content() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .args(["create", "Ideas", "remember the milk"])
        .assert()
        .success();

    scrawl(temp_dir.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("remember the milk"));
}

#[test]
fn pin_moves_note_to_pinned_bucket() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .args(["create", "Important"])
        .assert()
        .success();

    scrawl(temp_dir.path())
        .args(["pin", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("pinned"));

    scrawl(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("p1"));
}

#[test]
fn archive_hides_from_default_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .args(["create", "Old stuff"])
        .assert()
        .success();
    scrawl(temp_dir.path())
        .args(["archive", "1"])
        .assert()
        .success();

    scrawl(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("Old stuff").not());

    scrawl(temp_dir.path())
        .args(["list", "--archived"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Old stuff"));
}

#[test]
fn render_emits_html() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .args(["create", "Doc", "# Heading\n\nSome **bold** text."])
        .assert()
        .success();

    scrawl(temp_dir.path())
        .args(["render", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("<h1>Heading</h1>"))
        .stdout(predicates::str::contains("<strong>bold</strong>"));
}

#[test]
fn inspect_dumps_attribute_runs() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .args(["create", "Styled", "**bold** text"])
        .assert()
        .success();

    scrawl(temp_dir.path())
        .args(["inspect", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("hidden"))
        .stdout(predicates::str::contains("bold"));
}

#[test]
fn config_set_then_expiry_sweep() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .args(["config", "expiry-days", "0"])
        .assert()
        .success()
        .stdout(predicates::str::contains("expiry-days      0"));

    // With a zero-day horizon the note expires immediately.
    scrawl(temp_dir.path())
        .args(["create", "Ephemeral"])
        .assert()
        .success();

    scrawl(temp_dir.path())
        .arg("housekeep")
        .assert()
        .success()
        .stdout(predicates::str::contains("Expired note archived: Ephemeral"));

    scrawl(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("Ephemeral").not());
}

#[test]
fn housekeep_reports_when_idle() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .arg("housekeep")
        .assert()
        .success()
        .stdout(predicates::str::contains("Nothing to expire."));
}

#[test]
fn delete_by_title_term() {
    let temp_dir = tempfile::tempdir().unwrap();

    scrawl(temp_dir.path())
        .args(["create", "Disposable"])
        .assert()
        .success();

    scrawl(temp_dir.path())
        .args(["delete", "disposable"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Deleted note"));

    scrawl(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::contains("No notes."));
}
