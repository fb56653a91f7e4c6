//! Step sequencing and per-step state of the move-planner wizard.

use crate::catalog::RoomCatalog;
use crate::domain::{Customer, EstimateRequest};
use crate::errors::{PlannerError, PlannerResult};
use crate::planner::assembler::EstimateAssembler;
use crate::planner::fields::{Field, FieldError, FieldSet, FieldValue};
use crate::planner::schema::{CheckedRoomSet, DynamicFormSchema, SchemaDiff};
use crate::planner::steps::{keys, StepFieldSets, WizardStep};
use crate::submission::{EstimateSubmitter, SubmissionReceipt};

/// Owns every step's field set for the lifetime of one planning session.
///
/// Navigation is explicit: callers pick the step with [`go_to_step`]. Arriving
/// at [`WizardStep::Items`] rebuilds the item fields from the current room
/// selection before the step is handed back. Field sets survive navigation;
/// only [`reset`] discards them.
///
/// [`go_to_step`]: WizardController::go_to_step
/// [`reset`]: WizardController::reset
pub struct WizardController<'a> {
    catalog: &'a RoomCatalog,
    steps: Option<StepFieldSets>,
    active: WizardStep,
    special_request_saved: bool,
}

impl<'a> WizardController<'a> {
    /// Creates an uninitialized wizard; call [`build_form`] before use.
    ///
    /// [`build_form`]: WizardController::build_form
    pub fn new(catalog: &'a RoomCatalog) -> Self {
        Self {
            catalog,
            steps: None,
            active: WizardStep::Services,
            special_request_saved: false,
        }
    }

    /// Creates a wizard with its form already built.
    pub fn initialized(catalog: &'a RoomCatalog) -> Self {
        let mut wizard = Self::new(catalog);
        wizard.build_form();
        wizard
    }

    pub fn build_form(&mut self) {
        self.steps = Some(StepFieldSets::blank(self.catalog));
        self.active = WizardStep::Services;
        self.special_request_saved = false;
        tracing::debug!("wizard form built");
    }

    pub fn is_initialized(&self) -> bool {
        self.steps.is_some()
    }

    /// Discards all entered data and starts over on the first step.
    pub fn reset(&mut self) {
        self.build_form();
        tracing::info!("wizard reset");
    }

    pub fn catalog(&self) -> &'a RoomCatalog {
        self.catalog
    }

    pub fn active_step(&self) -> WizardStep {
        self.active
    }

    /// Makes step `index` active and returns its field set.
    pub fn go_to_step(&mut self, index: usize) -> PlannerResult<&FieldSet> {
        let step = WizardStep::from_index(index).ok_or(PlannerError::InvalidStep(index))?;
        self.ensure_initialized()?;

        self.active = step;
        self.special_request_saved = false;
        if step == WizardStep::Items {
            let diff = self.refresh_items()?;
            tracing::debug!(added = ?diff.added, removed = ?diff.removed, "items step refreshed");
        }
        tracing::info!(step = %step, index, "wizard step changed");
        self.field_set(step)
    }

    pub fn field_set(&self, step: WizardStep) -> PlannerResult<&FieldSet> {
        self.steps()?
            .get(step)
            .ok_or(PlannerError::NotInitialized)
    }

    pub fn current_field_set(&self) -> PlannerResult<&FieldSet> {
        self.field_set(self.active)
    }

    pub fn step_field_sets(&self) -> PlannerResult<&StepFieldSets> {
        self.steps()
    }

    /// Parses `raw` for field `key` of `step` and stores it.
    pub fn set_value(&mut self, step: WizardStep, key: &str, raw: &str) -> PlannerResult<()> {
        let fields = self.field_set_mut(step)?;
        fields.set_raw(key, raw).map_err(|err| field_error(step, err))?;
        self.after_change(step)
    }

    pub fn set_typed(
        &mut self,
        step: WizardStep,
        key: &str,
        value: FieldValue,
    ) -> PlannerResult<()> {
        let fields = self.field_set_mut(step)?;
        fields.set(key, value).map_err(|err| field_error(step, err))?;
        self.after_change(step)
    }

    pub fn clear_value(&mut self, step: WizardStep, key: &str) -> PlannerResult<()> {
        let fields = self.field_set_mut(step)?;
        fields.clear(key).map_err(|err| field_error(step, err))?;
        self.after_change(step)
    }

    /// Rooms currently ticked on the Rooms step.
    pub fn checked_rooms(&self) -> PlannerResult<CheckedRoomSet> {
        let rooms = self.field_set(WizardStep::Rooms)?;
        Ok(CheckedRoomSet::from_field_set(self.catalog, rooms))
    }

    /// Appends a free-text request, returning how many are stored.
    pub fn add_special_request(&mut self, text: &str) -> PlannerResult<usize> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PlannerError::InvalidValue {
                field: "special request".into(),
                reason: "request text cannot be empty".into(),
            });
        }
        let requests = self.field_set_mut(WizardStep::SpecialRequests)?;
        let number = requests.len() + 1;
        requests.insert(
            Field::text(
                format!("{}{}", keys::REQUEST_PREFIX, number),
                format!("Request {number}"),
            )
            .with_value(FieldValue::Text(text.to_string())),
        );
        self.special_request_saved = true;
        Ok(number)
    }

    /// True right after a special request was stored, until the next
    /// navigation.
    pub fn special_request_saved(&self) -> bool {
        self.special_request_saved
    }

    /// Labels of required fields that are still empty, as `Step: Field`.
    pub fn missing_required(&self) -> PlannerResult<Vec<String>> {
        let steps = self.steps()?;
        Ok(steps
            .iter()
            .flat_map(|(step, fields)| {
                fields
                    .iter()
                    .filter(|field| field.required && field.is_missing())
                    .map(move |field| format!("{}: {}", step, field.label))
            })
            .collect())
    }

    pub fn is_ready(&self) -> PlannerResult<bool> {
        Ok(self.missing_required()?.is_empty())
    }

    /// Assembles the estimate request from the current state without
    /// checking readiness.
    pub fn preview(&self, customer: &Customer) -> PlannerResult<EstimateRequest> {
        let steps = self.steps()?;
        Ok(EstimateAssembler::new(self.catalog).assemble(steps, customer))
    }

    /// Assembles the request and hands it to `submitter`. Fails without side
    /// effects while required fields are missing.
    pub fn submit(
        &self,
        customer: &Customer,
        submitter: &dyn EstimateSubmitter,
    ) -> PlannerResult<(EstimateRequest, SubmissionReceipt)> {
        let missing = self.missing_required()?;
        if !missing.is_empty() {
            return Err(PlannerError::Incomplete(missing.join(", ")));
        }
        let request = self.preview(customer)?;
        let receipt = submitter.submit(&request)?;
        tracing::info!(
            id = %receipt.id,
            rooms = request.rooms.len(),
            items = request.total_items(),
            "estimate request submitted"
        );
        Ok((request, receipt))
    }

    /// Keeps the Items fields equal to the checked rooms' items after any
    /// room is ticked or unticked.
    fn after_change(&mut self, step: WizardStep) -> PlannerResult<()> {
        if step == WizardStep::Rooms {
            let diff = self.refresh_items()?;
            if !diff.is_empty() {
                tracing::debug!(
                    added = ?diff.added,
                    removed = ?diff.removed,
                    "room selection changed"
                );
            }
        }
        Ok(())
    }

    fn refresh_items(&mut self) -> PlannerResult<SchemaDiff> {
        let checked = self.checked_rooms()?;
        let schema = DynamicFormSchema::new(self.catalog);
        let items = self.field_set_mut(WizardStep::Items)?;
        Ok(schema.regenerate(items, &checked))
    }

    fn ensure_initialized(&self) -> PlannerResult<()> {
        self.steps().map(|_| ())
    }

    fn steps(&self) -> PlannerResult<&StepFieldSets> {
        self.steps.as_ref().ok_or(PlannerError::NotInitialized)
    }

    fn field_set_mut(&mut self, step: WizardStep) -> PlannerResult<&mut FieldSet> {
        self.steps
            .as_mut()
            .ok_or(PlannerError::NotInitialized)?
            .get_mut(step)
            .ok_or(PlannerError::NotInitialized)
    }
}

fn field_error(step: WizardStep, err: FieldError) -> PlannerError {
    match err {
        FieldError::Unknown(field) => PlannerError::UnknownField { step, field },
        FieldError::Invalid { field, reason } => PlannerError::InvalidValue { field, reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> WizardController<'static> {
        WizardController::initialized(RoomCatalog::standard())
    }

    #[test]
    fn reading_before_build_form_is_a_precondition_error() {
        let mut wizard = WizardController::new(RoomCatalog::standard());
        assert!(matches!(
            wizard.field_set(WizardStep::Services),
            Err(PlannerError::NotInitialized)
        ));
        assert!(matches!(wizard.go_to_step(0), Err(PlannerError::NotInitialized)));
    }

    #[test]
    fn out_of_range_step_is_rejected() {
        let mut wizard = wizard();
        assert!(matches!(wizard.go_to_step(9), Err(PlannerError::InvalidStep(9))));
        assert_eq!(wizard.active_step(), WizardStep::Services);
    }

    #[test]
    fn arriving_at_items_regenerates_from_rooms() {
        let mut wizard = wizard();
        wizard.set_value(WizardStep::Rooms, "Laundry", "yes").unwrap();

        let items = wizard.go_to_step(WizardStep::Items.index()).unwrap();
        let keys: Vec<&str> = items.keys().collect();
        assert_eq!(
            keys,
            vec!["Washer", "Dryer", "Ironing Board", "Laundry Sink", "Cleaning Supplies"]
        );
    }

    #[test]
    fn field_sets_survive_navigation() {
        let mut wizard = wizard();
        wizard.set_value(WizardStep::Truck, "needTruck", "yes").unwrap();
        wizard.go_to_step(5).unwrap();
        let truck = wizard.go_to_step(1).unwrap();
        assert!(truck.bool("needTruck"));
    }

    #[test]
    fn unknown_field_names_the_step() {
        let mut wizard = wizard();
        let err = wizard
            .set_value(WizardStep::Services, "cleaning", "yes")
            .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::UnknownField { step: WizardStep::Services, .. }
        ));
    }

    #[test]
    fn special_request_flag_clears_on_navigation() {
        let mut wizard = wizard();
        assert_eq!(wizard.add_special_request("  Park on Elm St. ").unwrap(), 1);
        assert!(wizard.special_request_saved());
        wizard.go_to_step(8).unwrap();
        assert!(!wizard.special_request_saved());
        assert!(wizard.add_special_request("   ").is_err());
    }

    #[test]
    fn date_and_time_are_required() {
        let mut wizard = wizard();
        assert_eq!(
            wizard.missing_required().unwrap(),
            vec!["Date & time: Move date", "Date & time: Start time"]
        );
        wizard.set_value(WizardStep::DateTime, "date", "2025-07-04").unwrap();
        wizard.set_value(WizardStep::DateTime, "time", "08:30").unwrap();
        assert!(wizard.is_ready().unwrap());
    }

    #[test]
    fn reset_discards_entered_values() {
        let mut wizard = wizard();
        wizard.set_value(WizardStep::Rooms, "Attic", "yes").unwrap();
        wizard.go_to_step(6).unwrap();
        wizard.reset();
        assert!(wizard.checked_rooms().unwrap().is_empty());
        assert!(wizard.field_set(WizardStep::Items).unwrap().is_empty());
        assert_eq!(wizard.active_step(), WizardStep::Services);
    }

    #[test]
    fn swapping_rooms_without_revisiting_items_drops_stale_counts() {
        let mut wizard = wizard();
        wizard.set_value(WizardStep::Rooms, "Kitchen", "yes").unwrap();
        wizard.go_to_step(WizardStep::Items.index()).unwrap();
        wizard.set_value(WizardStep::Items, "Chairs", "4").unwrap();
        wizard.go_to_step(WizardStep::Rooms.index()).unwrap();

        wizard.set_value(WizardStep::Rooms, "Kitchen", "no").unwrap();
        wizard.set_value(WizardStep::Rooms, "Dining", "yes").unwrap();

        let items = wizard.field_set(WizardStep::Items).unwrap();
        assert!(items.contains("China"));
        assert!(!items.contains("Refrigerator"));
        assert_eq!(items.integer("Chairs"), 0);

        let request = wizard.preview(&Customer::default()).unwrap();
        assert_eq!(request.room_names, ["Dining"]);
        assert_eq!(request.room("Dining").unwrap().items.get("Chairs"), Some(0));
    }

    #[test]
    fn large_counts_total_without_overflow() {
        let mut wizard = wizard();
        wizard.set_value(WizardStep::Rooms, "Bedroom", "yes").unwrap();
        wizard.set_value(WizardStep::Items, "Bed", "4000000000").unwrap();
        wizard.set_value(WizardStep::Items, "Dresser", "4000000000").unwrap();

        let request = wizard.preview(&Customer::default()).unwrap();
        assert_eq!(request.total_items(), 8_000_000_000);
    }
}
