//! Rebuilds the Items field set from the current room selection.
//!
//! The item fields are keyed by item name only, so an item listed under two
//! selected rooms (Kitchen and Dining both have "Chairs") gets a single
//! field. Regeneration is a diff: retained fields keep whatever the user
//! already typed.

use std::collections::HashSet;

use crate::catalog::RoomCatalog;
use crate::planner::fields::{Field, FieldSet, FieldValue};

/// Room names selected on the Rooms step, kept in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckedRoomSet {
    names: Vec<String>,
}

impl CheckedRoomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from arbitrary names, dropping ones the catalog lacks.
    pub fn from_names<I, S>(catalog: &RoomCatalog, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: HashSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        for name in &requested {
            if !catalog.contains(name) {
                tracing::debug!(room = %name, "ignoring room missing from catalog");
            }
        }
        let names = catalog
            .room_names()
            .filter(|name| requested.contains(*name))
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Derives the selection from the Rooms step's checkbox fields.
    pub fn from_field_set(catalog: &RoomCatalog, rooms: &FieldSet) -> Self {
        let checked = rooms
            .iter()
            .filter(|field| rooms.bool(&field.key))
            .map(|field| field.key.as_str());
        Self::from_names(catalog, checked)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| candidate == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Fields added and removed by one regeneration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

pub struct DynamicFormSchema<'a> {
    catalog: &'a RoomCatalog,
}

impl<'a> DynamicFormSchema<'a> {
    pub fn new(catalog: &'a RoomCatalog) -> Self {
        Self { catalog }
    }

    /// Item names wanted for `checked`: catalog room order, then each room's
    /// item order, first occurrence wins.
    pub fn wanted_items(&self, checked: &CheckedRoomSet) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut wanted = Vec::new();
        for room in checked.iter() {
            for item in self.catalog.items_for(room).names() {
                if seen.insert(item) {
                    wanted.push(item.to_string());
                }
            }
        }
        wanted
    }

    /// Builds a fresh item field set for `checked`.
    pub fn build(&self, checked: &CheckedRoomSet) -> FieldSet {
        let mut fields = FieldSet::new();
        self.regenerate(&mut fields, checked);
        fields
    }

    /// Brings `fields` in line with `checked`: drops fields of rooms no longer
    /// selected, adds zeroed fields for new items, leaves the rest untouched.
    pub fn regenerate(&self, fields: &mut FieldSet, checked: &CheckedRoomSet) -> SchemaDiff {
        let wanted = self.wanted_items(checked);
        let wanted_set: HashSet<&str> = wanted.iter().map(String::as_str).collect();

        let removed: Vec<String> = fields
            .keys()
            .filter(|key| !wanted_set.contains(key))
            .map(str::to_string)
            .collect();
        for key in &removed {
            fields.remove(key);
        }

        let mut added = Vec::new();
        for item in &wanted {
            if !fields.contains(item) {
                let field = Field::integer(item.as_str(), item.as_str())
                    .with_value(FieldValue::Integer(0));
                fields.insert(field);
                added.push(item.clone());
            }
        }

        fields.sort_by_order(&wanted);

        let diff = SchemaDiff { added, removed };
        tracing::debug!(
            rooms = checked.len(),
            added = diff.added.len(),
            removed = diff.removed.len(),
            "item fields regenerated"
        );
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked(names: &[&str]) -> CheckedRoomSet {
        CheckedRoomSet::from_names(RoomCatalog::standard(), names)
    }

    #[test]
    fn selection_follows_catalog_order_and_drops_unknown_rooms() {
        let set = checked(&["Kitchen", "Ballroom", "Bedroom"]);
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(names, vec!["Bedroom", "Kitchen"]);
    }

    #[test]
    fn diff_reports_added_and_removed_items() {
        let schema = DynamicFormSchema::new(RoomCatalog::standard());
        let mut fields = schema.build(&checked(&["Laundry"]));

        let diff = schema.regenerate(&mut fields, &checked(&["Attic"]));
        assert!(diff.removed.contains(&"Washer".to_string()));
        assert!(diff.added.contains(&"Boxed Items".to_string()));
        assert!(!fields.contains("Washer"));
    }

    #[test]
    fn shared_items_keep_first_occurrence_order() {
        let schema = DynamicFormSchema::new(RoomCatalog::standard());
        let wanted = schema.wanted_items(&checked(&["Dining", "Kitchen"]));
        assert_eq!(&wanted[..3], &["Table", "Chairs", "Refrigerator"]);
        assert_eq!(wanted.iter().filter(|name| *name == "Chairs").count(), 1);
    }
}
