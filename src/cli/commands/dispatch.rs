use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::dispatch::JobTab;
use crate::domain::{Displayable, Employee, Job};
use crate::planner::fields::{DATE_FORMAT, TIME_FORMAT};

use super::parse_position;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "employees",
            "List crew members, optionally filtered by name or tag",
            "employees [query]",
            cmd_employees,
        ),
        CommandEntry::new(
            "hire",
            "Add a crew member to the roster",
            "hire <user> <first> <last> <seniority> [tag...]",
            cmd_hire,
        ),
        CommandEntry::new("jobs", "List scheduled jobs", "jobs", cmd_jobs),
        CommandEntry::new(
            "schedule",
            "Schedule a job",
            "schedule <customer> <YYYY-MM-DD> <HH:MM> [crew] [address...]",
            cmd_schedule,
        ),
        CommandEntry::new("job", "Open a job from the list", "job <number>", cmd_job),
        CommandEntry::new(
            "tab",
            "Switch the open job's tab",
            "tab <info|workers>",
            cmd_tab,
        ),
        CommandEntry::new(
            "assign",
            "Join the open job's crew",
            "assign [user]",
            cmd_assign,
        ),
        CommandEntry::new(
            "unassign",
            "Leave the open job's crew",
            "unassign [user]",
            cmd_unassign,
        ),
        CommandEntry::new("back", "Close the open job", "back", cmd_back),
    ]
}

fn cmd_employees(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let matches = context.roster.filter(&query);
    output::section("Employees");
    if matches.is_empty() {
        output::info("No employees found.");
        return Ok(());
    }
    for employee in matches {
        let tags = if employee.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", employee.tags.join(", "))
        };
        output::info(format!(
            "  {:<12} {} (seniority {}){}",
            employee.user_name,
            employee.full_name(),
            employee.seniority,
            tags
        ));
    }
    Ok(())
}

fn cmd_hire(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 4 {
        return Err(CommandError::InvalidArguments(
            "usage: hire <user> <first> <last> <seniority> [tag...]".into(),
        ));
    }
    let seniority: u32 = args[3].parse().map_err(|_| {
        CommandError::InvalidArguments("seniority must be a whole number".into())
    })?;
    let employee =
        Employee::new(args[0], args[1], args[2], seniority).with_tags(args[4..].iter().copied());
    let label = employee.display_label();
    context.roster.add(employee)?;
    context.persist_dispatch()?;
    output::success(format!("Hired {}.", label));
    Ok(())
}

fn cmd_jobs(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Jobs");
    let jobs = context.board.jobs();
    if jobs.is_empty() {
        output::info("No jobs scheduled.");
        return Ok(());
    }
    for (index, job) in jobs.iter().enumerate() {
        let marker = if context.schedule.job.job_id == Some(job.id) {
            ">"
        } else {
            " "
        };
        output::info(format!("{} {}. {}", marker, index + 1, job.display_label()));
    }
    Ok(())
}

fn cmd_schedule(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: schedule <customer> <YYYY-MM-DD> <HH:MM> [crew] [address...]".into(),
        ));
    }
    let date = NaiveDate::parse_from_str(args[1], DATE_FORMAT)
        .map_err(|_| CommandError::InvalidArguments("date must use YYYY-MM-DD".into()))?;
    let time = NaiveTime::parse_from_str(args[2], TIME_FORMAT)
        .map_err(|_| CommandError::InvalidArguments("time must use HH:MM".into()))?;
    let crew = match args.get(3) {
        Some(raw) => raw.parse::<u32>().ok().filter(|size| *size > 0).ok_or_else(|| {
            CommandError::InvalidArguments("crew must be a whole number of 1 or more".into())
        })?,
        None => context.config.default_crew_size,
    };
    let address = args.get(4..).map(|rest| rest.join(" ")).unwrap_or_default();

    let job = Job::new(args[0], address, date.and_time(time), crew);
    let label = job.display_label();
    context.board.add_job(job);
    context.persist_dispatch()?;
    output::success(format!("Scheduled {}.", label));
    Ok(())
}

fn cmd_job(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: job <number>".into()));
    };
    let index = parse_position(raw, "job", context.board.jobs().len())?;
    let job_id = context.board.jobs()[index].id;
    context.schedule.open_job(job_id);
    refresh_session(context)?;
    show_open_job(context)
}

fn cmd_tab(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tab = args.first().and_then(|raw| JobTab::parse(raw)).ok_or_else(|| {
        CommandError::InvalidArguments("usage: tab <info|workers>".into())
    })?;
    open_job_id(context)?;
    context.schedule.set_tab(tab);
    show_open_job(context)
}

fn cmd_assign(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let job_id = open_job_id(context)?;
    let employee = resolve_employee(context, args)?;
    let booted = context.board.self_assign(job_id, &employee)?;
    context.persist_dispatch()?;
    output::success(format!("{} joined the crew.", employee.full_name()));
    if let Some(booted) = booted {
        output::warning(format!(
            "{} was removed to make room.",
            booted.display_label()
        ));
    }
    refresh_session(context)
}

fn cmd_unassign(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let job_id = open_job_id(context)?;
    let employee = resolve_employee(context, args)?;
    context.board.self_remove(job_id, employee.id)?;
    context.persist_dispatch()?;
    output::success(format!("{} left the crew.", employee.full_name()));
    refresh_session(context)
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.schedule.back();
    output::info("Job closed.");
    Ok(())
}

fn open_job_id(context: &ShellContext) -> Result<Uuid, CommandError> {
    context
        .schedule
        .job
        .job_id
        .ok_or_else(|| CommandError::Message("No job open. Use `job <number>` first.".into()))
}

fn resolve_employee(context: &ShellContext, args: &[&str]) -> Result<Employee, CommandError> {
    match args.first() {
        Some(user_name) => Ok(context.roster.by_user_name(user_name)?.clone()),
        None => context.acting_employee(),
    }
}

/// Re-checks the acting employee's availability for the open job.
fn refresh_session(context: &mut ShellContext) -> CommandResult {
    if context.config.acting_employee.is_none() {
        return Ok(());
    }
    let employee = context.acting_employee()?;
    context.board.sync_session(&mut context.schedule, &employee)?;
    Ok(())
}

fn show_open_job(context: &ShellContext) -> CommandResult {
    let job = context.board.job(open_job_id(context)?)?;
    let state = &context.schedule.job;
    output::section(format!("{} ({})", job.customer_name, context.schedule.tab));
    match context.schedule.tab {
        JobTab::Info => {
            output::info(format!("  Start   : {}", job.start.format("%Y-%m-%d %H:%M")));
            if !job.load_address.is_empty() {
                output::info(format!("  Address : {}", job.load_address));
            }
            output::info(format!(
                "  Crew    : {}/{}",
                job.assigned.len(),
                job.number_workers
            ));
            if context.config.acting_employee.is_some() {
                let status = if state.already_assigned {
                    "you are on this crew"
                } else if state.assignment_available {
                    "you can join"
                } else {
                    "crew is full"
                };
                output::info(format!("  Status  : {}", status));
                if let Some(boot) = &state.employee_to_boot {
                    output::info(format!(
                        "  Joining would displace {}",
                        boot.display_label()
                    ));
                }
            }
        }
        JobTab::Workers => {
            if job.assigned.is_empty() {
                output::info("  Nobody assigned yet.");
            }
            for member in &job.assigned {
                output::info(format!("  {}", member.display_label()));
            }
        }
    }
    Ok(())
}
