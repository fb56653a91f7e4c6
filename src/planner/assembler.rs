//! Folds the wizard's step data into one [`EstimateRequest`].

use crate::catalog::RoomCatalog;
use crate::domain::{BoxCounts, Customer, EstimateRequest, ItemCounts, Room, ServiceFlags};
use crate::planner::fields::FieldSet;
use crate::planner::schema::CheckedRoomSet;
use crate::planner::steps::{keys, StepFieldSets, WizardStep};

static EMPTY: FieldSet = FieldSet::EMPTY;

pub struct EstimateAssembler<'a> {
    catalog: &'a RoomCatalog,
}

impl<'a> EstimateAssembler<'a> {
    pub fn new(catalog: &'a RoomCatalog) -> Self {
        Self { catalog }
    }

    /// Pure and infallible: absent steps or fields read as `0`, `""` or
    /// `false`.
    pub fn assemble(&self, steps: &StepFieldSets, customer: &Customer) -> EstimateRequest {
        let step = |which: WizardStep| steps.get(which).unwrap_or(&EMPTY);

        let services = step(WizardStep::Services);
        let schedule = step(WizardStep::DateTime);
        let rooms_step = step(WizardStep::Rooms);
        let specialty_step = step(WizardStep::Specialty);

        let checked = CheckedRoomSet::from_field_set(self.catalog, rooms_step);

        EstimateRequest {
            customer: customer.clone(),
            load_address: concatenate_address(step(WizardStep::FromAddress)),
            unload_address: concatenate_address(step(WizardStep::ToAddress)),
            start_time: format!("{} {}", schedule.text(keys::DATE), schedule.text(keys::TIME))
                .trim()
                .to_string(),
            end_time: String::new(),
            rooms: self.rooms(&checked, step(WizardStep::Items)),
            room_names: room_names(rooms_step),
            specialty: self
                .catalog
                .specialty_items()
                .iter()
                .map(|item| (item.key.to_string(), specialty_step.bool(item.key)))
                .collect(),
            boxes: BoxCounts {
                small: specialty_step.integer(keys::SMALL_BOXES),
                medium: specialty_step.integer(keys::MEDIUM_BOXES),
                large: specialty_step.integer(keys::LARGE_BOXES),
            },
            services: ServiceFlags {
                pack: services.bool(keys::PACKING),
                unpack: services.bool(keys::UNPACK),
                load: services.bool(keys::LOAD),
                unload: services.bool(keys::UNLOAD),
                clean: false,
            },
            need_truck: step(WizardStep::Truck).bool(keys::NEED_TRUCK),
            special_requests: step(WizardStep::SpecialRequests)
                .iter()
                .map(|field| field.display_value())
                .filter(|text| !text.is_empty())
                .collect(),
            distance_to_job: 0,
            distance_total: 0,
        }
    }

    /// Re-expands the flat item fields into per-room breakdowns. An item
    /// name shared by two rooms carries the same count into both.
    fn rooms(&self, checked: &CheckedRoomSet, items: &FieldSet) -> Vec<Room> {
        checked
            .iter()
            .map(|name| {
                let mut counts = ItemCounts::new();
                for item in self.catalog.items_for(name).names() {
                    counts.set(item, items.integer(item));
                }
                Room::new(name, counts)
            })
            .collect()
    }
}

/// Joins the set address parts with single spaces, in declaration order.
pub fn concatenate_address(fields: &FieldSet) -> String {
    fields
        .iter()
        .map(|field| field.display_value())
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns each checked room box into the room's own name.
fn room_names(rooms: &FieldSet) -> Vec<String> {
    rooms
        .iter()
        .filter(|field| rooms.bool(&field.key))
        .map(|field| field.key.clone())
        .collect()
}
