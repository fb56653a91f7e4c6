pub mod common;
pub mod customer;
pub mod employee;
pub mod estimate;
pub mod job;
pub mod room;

pub use common::{Displayable, NamedEntity};
pub use customer::Customer;
pub use employee::{AssignedEmployee, Employee, EmployeeStatus};
pub use estimate::{BoxCounts, EstimateRequest, ServiceFlags};
pub use job::{AssignmentConflict, Availability, Job};
pub use room::{ItemCount, ItemCounts, Room};
