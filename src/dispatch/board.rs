use uuid::Uuid;

use crate::domain::{AssignedEmployee, AssignmentConflict, Availability, Employee, Job};

use super::{session::ScheduleSession, DispatchError, DispatchResult};

/// Scheduled jobs and their crews.
#[derive(Debug, Clone, Default)]
pub struct JobBoard {
    jobs: Vec<Job>,
}

impl JobBoard {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    pub fn add_job(&mut self, job: Job) -> Uuid {
        let id = job.id;
        self.jobs.push(job);
        self.jobs.sort_by_key(|job| job.start);
        id
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: Uuid) -> DispatchResult<&Job> {
        self.jobs
            .iter()
            .find(|job| job.id == id)
            .ok_or(DispatchError::JobNotFound(id))
    }

    fn job_mut(&mut self, id: Uuid) -> DispatchResult<&mut Job> {
        self.jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or(DispatchError::JobNotFound(id))
    }

    /// Decides whether `employee` may join the job, and whom they would
    /// displace. A full job can only be joined by outranking its least
    /// senior crew member.
    pub fn check_assignment(
        &self,
        job_id: Uuid,
        employee: &Employee,
    ) -> DispatchResult<Availability> {
        let job = self.job(job_id)?;
        if job.is_assigned(employee.id) {
            return Ok(Availability::Conflict(AssignmentConflict::AlreadyAssigned));
        }
        if !job.is_full() {
            return Ok(Availability::Available {
                employee_to_boot: None,
            });
        }
        match job.least_senior() {
            Some(weakest) if weakest.seniority < employee.seniority => {
                Ok(Availability::Available {
                    employee_to_boot: Some(weakest.clone()),
                })
            }
            _ => Ok(Availability::Conflict(AssignmentConflict::JobFull)),
        }
    }

    /// Puts `employee` on the job, booting the displaced crew member if any.
    /// Returns the booted member.
    pub fn self_assign(
        &mut self,
        job_id: Uuid,
        employee: &Employee,
    ) -> DispatchResult<Option<AssignedEmployee>> {
        let availability = self.check_assignment(job_id, employee)?;
        let booted = match availability {
            Availability::Conflict(conflict) => return Err(DispatchError::Conflict(conflict)),
            Availability::Available { employee_to_boot } => employee_to_boot,
        };

        let job = self.job_mut(job_id)?;
        if let Some(booted) = &booted {
            job.assigned.retain(|member| member.employee_id != booted.employee_id);
            tracing::info!(
                job = %job_id,
                booted = %booted.employee_id,
                "crew member displaced by a more senior employee"
            );
        }
        job.assigned.push(AssignedEmployee::from(employee));
        tracing::info!(job = %job_id, employee = %employee.user_name, "employee self-assigned");
        Ok(booted)
    }

    pub fn self_remove(&mut self, job_id: Uuid, employee_id: Uuid) -> DispatchResult<()> {
        let job = self.job_mut(job_id)?;
        let before = job.assigned.len();
        job.assigned.retain(|member| member.employee_id != employee_id);
        if job.assigned.len() == before {
            return Err(DispatchError::NotAssigned(job_id));
        }
        tracing::info!(job = %job_id, employee = %employee_id, "employee self-removed");
        Ok(())
    }

    /// Refreshes the session's assignment flags for the job it has open.
    pub fn sync_session(
        &self,
        session: &mut ScheduleSession,
        employee: &Employee,
    ) -> DispatchResult<()> {
        let Some(job_id) = session.job.job_id else {
            return Ok(());
        };
        let availability = self.check_assignment(job_id, employee)?;
        session.job.sync(&availability);
        Ok(())
    }
}
