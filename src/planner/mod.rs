//! The move-planner wizard: step field sets, dynamic item schema and the
//! assembly of the final estimate request.

pub mod assembler;
pub mod fields;
pub mod schema;
pub mod steps;
pub mod wizard;

pub use assembler::EstimateAssembler;
pub use fields::{Field, FieldError, FieldKind, FieldSet, FieldValue};
pub use schema::{CheckedRoomSet, DynamicFormSchema, SchemaDiff};
pub use steps::{keys, StepFieldSets, WizardStep};
pub use wizard::WizardController;
