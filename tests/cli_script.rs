mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use regex::Regex;

fn shell(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("move_planner_cli").unwrap();
    cmd.env("MOVE_PLANNER_CLI_SCRIPT", "1")
        .env("MOVE_PLANNER_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_plans_and_submits_an_estimate() {
    let home = common::temp_base();
    let input = "\
config set customer.user_name jdoe
step 6
set Bedroom yes
set Kitchen yes
step 7
set Bed 2
set Table 1
step 3
set date 2026-09-01
set time 08:00
request \"Call on arrival\"
submit
outbox
exit
";

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("=== Step 7/9: Items ==="))
        .stdout(contains("Dresser"))
        .stdout(contains("Special request #1 saved."))
        .stdout(contains("(2 rooms, 3 items)"))
        .stdout(contains("jdoe"));

    let outbox: Vec<_> = std::fs::read_dir(home.join("outbox"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(outbox.len(), 1);
    let json = std::fs::read_to_string(&outbox[0]).unwrap();
    assert!(json.contains("\"Call on arrival\""));
    assert!(json.contains("\"start_time\": \"2026-09-01 08:00\""));
}

#[test]
fn receipt_id_names_the_outbox_file() {
    let home = common::temp_base();
    let output = shell(&home)
        .write_stdin("step 3\nset date 2026-10-05\nset time 13:30\nsubmit\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let pattern = Regex::new(r"Estimate request ([0-9a-f-]{36}) submitted").unwrap();
    let id = &pattern.captures(&stdout).expect("receipt line")[1];

    let file_name = std::fs::read_dir(home.join("outbox"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .next()
        .unwrap();
    assert!(file_name.starts_with("estimate_"));
    assert!(file_name.ends_with(&format!("_{}.json", id)));
}

#[test]
fn incomplete_submission_is_reported_and_shell_continues() {
    let home = common::temp_base();
    shell(&home)
        .write_stdin("submit\nsteps\n")
        .assert()
        .success()
        .stdout(contains("missing Date & time: Move date"))
        .stdout(contains("3. Date & time (2 required missing)"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = common::temp_base();
    shell(&home)
        .write_stdin("stpes\n")
        .assert()
        .success()
        .stdout(contains("Did you mean `steps`?"));
}

#[test]
fn crew_member_joins_a_job_from_the_shell() {
    let home = common::temp_base();
    let input = "\
hire alex Alex Stone 1 driver
hire cal Cal Reed 5
config set default_crew_size 1
schedule Doe 2026-06-02 08:00
config set acting_employee alex
job 1
assign
config set acting_employee cal
job 1
tab workers
back
jobs
";

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Alex Stone joined the crew."))
        .stdout(contains("Joining would displace Alex Stone"))
        .stdout(contains("Doe on 2026-06-02 08:00 (1/1 crew)"));

    let data = std::fs::read_to_string(home.join("dispatch.json")).unwrap();
    assert!(data.contains("\"alex\""));
}

#[test]
fn fill_is_refused_in_script_mode() {
    let home = common::temp_base();
    shell(&home)
        .write_stdin("fill\n")
        .assert()
        .success()
        .stdout(contains("needs an interactive terminal"))
        .stdout(contains("Traceback").not());
}

#[test]
fn help_groups_commands_and_version_reports_catalog() {
    let home = common::temp_base();
    shell(&home)
        .write_stdin("step 6\nhelp\nversion\n")
        .assert()
        .success()
        .stdout(contains("Estimate wizard"))
        .stdout(contains("Crew dashboard"))
        .stdout(contains("Current step: Rooms."))
        .stdout(contains("11 rooms, 11 specialty items"))
        .stdout(contains(home.display().to_string()));
}
