mod common;

use chrono::NaiveDate;
use move_planner::{
    dispatch::{DispatchData, DispatchError, JobBoard, JobTab, Roster, ScheduleSession},
    domain::{AssignmentConflict, Availability, Employee, Job},
};

fn start(day: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 6, day)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn crew() -> (Employee, Employee, Employee) {
    (
        Employee::new("alex", "Alex", "Stone", 1).with_tags(["driver"]),
        Employee::new("bea", "Bea", "Hart", 3).with_tags(["packer"]),
        Employee::new("cal", "Cal", "Reed", 5),
    )
}

#[test]
fn senior_employee_boots_least_senior_from_full_job() {
    let (alex, bea, cal) = crew();
    let mut board = JobBoard::default();
    let job_id = board.add_job(Job::new("Doe", "12 Elm St.", start(2), 2));
    board.self_assign(job_id, &alex).unwrap();
    board.self_assign(job_id, &bea).unwrap();

    let mut session = ScheduleSession::default();
    session.open_job(job_id);
    board.sync_session(&mut session, &cal).unwrap();
    assert!(session.job.assignment_available);
    assert_eq!(
        session.job.employee_to_boot.as_ref().map(|e| e.employee_id),
        Some(alex.id)
    );

    let booted = board.self_assign(job_id, &cal).unwrap();
    assert_eq!(booted.map(|e| e.employee_id), Some(alex.id));
    let job = board.job(job_id).unwrap();
    assert!(job.is_assigned(cal.id) && job.is_assigned(bea.id));
    assert!(!job.is_assigned(alex.id));

    board.sync_session(&mut session, &cal).unwrap();
    assert!(session.job.already_assigned);
    assert!(!session.job.assignment_available);
    assert!(session.job.employee_to_boot.is_none());
}

#[test]
fn junior_employee_cannot_join_full_job() {
    let (alex, bea, cal) = crew();
    let mut board = JobBoard::default();
    let job_id = board.add_job(Job::new("Doe", "", start(2), 2));
    board.self_assign(job_id, &bea).unwrap();
    board.self_assign(job_id, &cal).unwrap();

    assert_eq!(
        board.check_assignment(job_id, &alex).unwrap(),
        Availability::Conflict(AssignmentConflict::JobFull)
    );
    assert_eq!(
        board.self_assign(job_id, &alex),
        Err(DispatchError::Conflict(AssignmentConflict::JobFull))
    );
}

#[test]
fn self_remove_requires_assignment() {
    let (alex, _, _) = crew();
    let mut board = JobBoard::default();
    let job_id = board.add_job(Job::new("Doe", "", start(2), 3));

    assert_eq!(
        board.self_remove(job_id, alex.id),
        Err(DispatchError::NotAssigned(job_id))
    );
    board.self_assign(job_id, &alex).unwrap();
    board.self_remove(job_id, alex.id).unwrap();
    assert!(board.job(job_id).unwrap().assigned.is_empty());
}

#[test]
fn back_clears_the_open_job() {
    let mut session = ScheduleSession::default();
    let job = Job::new("Doe", "", start(2), 2);
    session.open_job(job.id);
    session.set_tab(JobTab::Workers);
    session.back();

    assert_eq!(session, ScheduleSession::default());
}

#[test]
fn roster_filter_matches_names_and_tags() {
    let (alex, bea, cal) = crew();
    let mut roster = Roster::default();
    roster.add(alex).unwrap();
    roster.add(bea).unwrap();
    roster.add(cal).unwrap();

    let names = |query: &str| -> Vec<String> {
        roster
            .filter(query)
            .into_iter()
            .map(|e| e.user_name.clone())
            .collect()
    };
    assert_eq!(names("ST"), ["alex"]);
    assert_eq!(names("packer"), ["bea"]);
    assert_eq!(names(""), ["alex", "bea", "cal"]);
    assert!(names("pack").is_empty());
}

#[test]
fn dispatch_data_round_trips_through_disk() {
    let base = common::temp_base();
    let path = base.join("dispatch.json");
    assert_eq!(DispatchData::load(&path).unwrap(), DispatchData::default());

    let (alex, _, _) = crew();
    let mut roster = Roster::default();
    roster.add(alex.clone()).unwrap();
    let mut board = JobBoard::default();
    let job_id = board.add_job(Job::new("Doe", "", start(3), 2));
    board.self_assign(job_id, &alex).unwrap();

    DispatchData::join(&roster, &board).save(&path).unwrap();
    let (roster, board) = DispatchData::load(&path).unwrap().split();
    assert_eq!(roster.by_user_name("ALEX").unwrap().id, alex.id);
    assert!(board.job(job_id).unwrap().is_assigned(alex.id));
}
