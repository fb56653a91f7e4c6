//! Wizard step enumeration and the blank field sets each step starts with.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::RoomCatalog;
use crate::planner::fields::{Field, FieldSet};

/// Field keys shared by the wizard, the assembler and the CLI.
pub mod keys {
    pub const PACKING: &str = "packing";
    pub const UNPACK: &str = "unpack";
    pub const LOAD: &str = "load";
    pub const UNLOAD: &str = "unload";
    pub const NEED_TRUCK: &str = "needTruck";
    pub const DATE: &str = "date";
    pub const TIME: &str = "time";
    pub const SMALL_BOXES: &str = "smBox";
    pub const MEDIUM_BOXES: &str = "mdBox";
    pub const LARGE_BOXES: &str = "lgBox";
    pub const REQUEST_PREFIX: &str = "request-";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Services,
    Truck,
    DateTime,
    FromAddress,
    ToAddress,
    Rooms,
    Items,
    Specialty,
    SpecialRequests,
}

impl WizardStep {
    pub const ALL: [WizardStep; 9] = [
        WizardStep::Services,
        WizardStep::Truck,
        WizardStep::DateTime,
        WizardStep::FromAddress,
        WizardStep::ToAddress,
        WizardStep::Rooms,
        WizardStep::Items,
        WizardStep::Specialty,
        WizardStep::SpecialRequests,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Services => "Services",
            WizardStep::Truck => "Truck",
            WizardStep::DateTime => "Date & time",
            WizardStep::FromAddress => "From address",
            WizardStep::ToAddress => "To address",
            WizardStep::Rooms => "Rooms",
            WizardStep::Items => "Items",
            WizardStep::Specialty => "Specialty items & boxes",
            WizardStep::SpecialRequests => "Special requests",
        }
    }

    /// Builds the field set a freshly initialized wizard shows for this step.
    ///
    /// Items starts empty; it is populated from the room selection on arrival.
    pub fn blank_fields(self, catalog: &RoomCatalog) -> FieldSet {
        match self {
            WizardStep::Services => FieldSet::new()
                .with(Field::boolean(keys::PACKING, "Packing"))
                .with(Field::boolean(keys::UNPACK, "Unpacking"))
                .with(Field::boolean(keys::LOAD, "Loading"))
                .with(Field::boolean(keys::UNLOAD, "Unloading")),
            WizardStep::Truck => {
                FieldSet::new().with(Field::boolean(keys::NEED_TRUCK, "Need a truck"))
            }
            WizardStep::DateTime => FieldSet::new()
                .with(Field::date(keys::DATE, "Move date").with_required())
                .with(Field::time(keys::TIME, "Start time").with_required()),
            WizardStep::FromAddress => address_fields("from"),
            WizardStep::ToAddress => address_fields("to"),
            WizardStep::Rooms => catalog
                .room_names()
                .fold(FieldSet::new(), |set, name| {
                    set.with(Field::boolean(name, name))
                }),
            WizardStep::Items | WizardStep::SpecialRequests => FieldSet::new(),
            WizardStep::Specialty => {
                let specialty = catalog
                    .specialty_items()
                    .iter()
                    .fold(FieldSet::new(), |set, item| {
                        set.with(Field::boolean(item.key, item.label))
                    });
                specialty
                    .with(Field::integer(keys::SMALL_BOXES, "Small boxes"))
                    .with(Field::integer(keys::MEDIUM_BOXES, "Medium boxes"))
                    .with(Field::integer(keys::LARGE_BOXES, "Large boxes"))
            }
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Address field order is significant: it is the concatenation order.
fn address_fields(prefix: &str) -> FieldSet {
    FieldSet::new()
        .with(Field::text(format!("{prefix}Address"), "Street"))
        .with(Field::text(format!("{prefix}City"), "City"))
        .with(Field::text(format!("{prefix}State"), "State"))
        .with(Field::text(format!("{prefix}Zip"), "Zip"))
        .with(Field::text(format!("{prefix}ResidenceType"), "Residence type"))
        .with(Field::integer(format!("{prefix}Flights"), "Flights of stairs"))
        .with(Field::text(format!("{prefix}ApartmentNumber"), "Unit"))
}

/// Field sets of every step, keyed by step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepFieldSets {
    sets: BTreeMap<WizardStep, FieldSet>,
}

impl StepFieldSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blank(catalog: &RoomCatalog) -> Self {
        let sets = WizardStep::ALL
            .iter()
            .map(|step| (*step, step.blank_fields(catalog)))
            .collect();
        Self { sets }
    }

    pub fn insert(&mut self, step: WizardStep, fields: FieldSet) {
        self.sets.insert(step, fields);
    }

    pub fn get(&self, step: WizardStep) -> Option<&FieldSet> {
        self.sets.get(&step)
    }

    pub fn get_mut(&mut self, step: WizardStep) -> Option<&mut FieldSet> {
        self.sets.get_mut(&step)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WizardStep, &FieldSet)> + '_ {
        self.sets.iter().map(|(step, fields)| (*step, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_round_trip_through_all() {
        for (index, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), index);
            assert_eq!(WizardStep::from_index(index), Some(*step));
        }
        assert_eq!(WizardStep::from_index(9), None);
    }

    #[test]
    fn rooms_step_has_one_checkbox_per_catalog_room() {
        let catalog = RoomCatalog::standard();
        let rooms = WizardStep::Rooms.blank_fields(catalog);
        let keys: Vec<&str> = rooms.keys().collect();
        let names: Vec<&str> = catalog.room_names().collect();
        assert_eq!(keys, names);
        assert!(rooms.iter().all(|field| !rooms.bool(&field.key)));
    }

    #[test]
    fn address_fields_keep_declaration_order() {
        let from = WizardStep::FromAddress.blank_fields(RoomCatalog::standard());
        let keys: Vec<&str> = from.keys().collect();
        assert_eq!(
            keys,
            vec![
                "fromAddress",
                "fromCity",
                "fromState",
                "fromZip",
                "fromResidenceType",
                "fromFlights",
                "fromApartmentNumber",
            ]
        );
    }
}
