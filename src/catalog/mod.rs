//! Static reference data: which rooms a home can have, what typically lives
//! in them, and the specialty items that need extra crew or equipment.

use once_cell::sync::Lazy;

use crate::domain::{ItemCounts, Room};

static STANDARD: Lazy<RoomCatalog> = Lazy::new(|| RoomCatalog::new(standard_rooms()));

static EMPTY_ITEMS: Lazy<ItemCounts> = Lazy::new(ItemCounts::new);

/// A specialty item the customer can flag (pianos, safes, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialtyItem {
    /// Stable field key used by the wizard and in the estimate payload.
    pub key: &'static str,
    pub label: &'static str,
}

pub const SPECIALTY_ITEMS: &[SpecialtyItem] = &[
    SpecialtyItem { key: "keyboard", label: "Keyboard" },
    SpecialtyItem { key: "spinetPiano", label: "Spinet Piano" },
    SpecialtyItem { key: "consolePiano", label: "Console Piano" },
    SpecialtyItem { key: "studioPiano", label: "Studio Piano" },
    SpecialtyItem { key: "organ", label: "Organ" },
    SpecialtyItem { key: "safe300lb", label: "Safe > 300lb" },
    SpecialtyItem { key: "safe400lb", label: "Safe > 400lb" },
    SpecialtyItem { key: "poolTable", label: "Pool Table" },
    SpecialtyItem { key: "arcadeGames", label: "Arcade Games" },
    SpecialtyItem { key: "weightEquipment", label: "Weight Equipment" },
    SpecialtyItem { key: "machinery", label: "Machinery" },
];

/// Immutable list of room templates in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Process-wide catalog used by the planner.
    pub fn standard() -> &'static RoomCatalog {
        &STANDARD
    }

    pub fn list_rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rooms.iter().map(|room| room.name.as_str())
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.room(name).is_some()
    }

    /// Default items of `name`; unknown rooms yield an empty mapping.
    pub fn items_for(&self, name: &str) -> &ItemCounts {
        match self.room(name) {
            Some(room) => &room.items,
            None => {
                tracing::debug!(room = name, "room not in catalog");
                &EMPTY_ITEMS
            }
        }
    }

    /// Position of `name` in catalog order, used to keep selections sorted.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rooms.iter().position(|room| room.name == name)
    }

    pub fn specialty_items(&self) -> &'static [SpecialtyItem] {
        SPECIALTY_ITEMS
    }
}

fn standard_rooms() -> Vec<Room> {
    vec![
        Room::with_items(
            "Bedroom",
            ["Bed", "Bed Frame", "Lighting", "Arm Chair", "TV", "Dresser"],
        ),
        Room::with_items(
            "Kitchen",
            [
                "Table",
                "Chairs",
                "Refrigerator",
                "Stove",
                "Microwave",
                "Dishwasher",
                "Pots and Pans",
                "Dishes",
                "Trash Can",
            ],
        ),
        Room::with_items(
            "Dining",
            [
                "Table",
                "Chairs",
                "Lighting",
                "China",
                "Art",
                "Chandelier",
                "Centerpieces",
                "Tablecloths",
                "Cabinets",
                "Shelving",
            ],
        ),
        Room::with_items("Family", lounge_items()),
        Room::with_items("Living", lounge_items()),
        Room::with_items(
            "Laundry",
            [
                "Washer",
                "Dryer",
                "Ironing Board",
                "Laundry Sink",
                "Cleaning Supplies",
            ],
        ),
        Room::with_items(
            "Bathroom",
            [
                "Bath rugs and mats",
                "Shower Curtains",
                "Shower Curtain Rod",
                "Trash Can",
                "Scale",
                "Toilet Brush",
                "Plunger",
                "Bathroom Accessories",
            ],
        ),
        Room::with_items(
            "Office",
            [
                "Computer",
                "Desk",
                "Lighting",
                "Arm Chair",
                "TV",
                "Cabinets",
                "Bookshelves",
                "Printer",
                "Keyboard and Mouse",
                "Cables and Wiring",
                "Office Chair",
            ],
        ),
        Room::with_items(
            "Patio",
            [
                "Outdoor Tables",
                "Chairs",
                "Umbrella",
                "Grill",
                "Grill Accessories",
                "Outdoor Furniture",
                "Storage Containers",
                "Gardening Tools",
            ],
        ),
        Room::with_items(
            "Garage",
            [
                "Tools",
                "Toolbox",
                "Gardening Equipment",
                "Workbench",
                "Sports Equipment",
                "Outdoor Furniture",
                "Lawn Care Equipment",
                "Automotive Supplies",
            ],
        ),
        Room::with_items(
            "Attic",
            [
                "Seasonal Decorations",
                "Stored Clothing",
                "Furniture",
                "Lighting",
                "Boxed Items",
                "Miscellaneous Items",
            ],
        ),
    ]
}

fn lounge_items() -> [&'static str; 12] {
    [
        "Couch",
        "Rugs",
        "Lighting",
        "Pillows",
        "Blankets",
        "Bookshelves",
        "Entertainment Center",
        "Consoles",
        "DVD or Blu-ray Player",
        "TV",
        "Armchairs",
        "Recliners",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_lists_rooms_in_order() {
        let names: Vec<&str> = RoomCatalog::standard().room_names().collect();
        assert_eq!(names.first(), Some(&"Bedroom"));
        assert_eq!(names.last(), Some(&"Attic"));
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn unknown_room_yields_empty_items() {
        let catalog = RoomCatalog::standard();
        assert!(catalog.items_for("Ballroom").is_empty());
        assert!(!catalog.contains("Ballroom"));
    }

    #[test]
    fn catalog_items_default_to_zero() {
        let kitchen = RoomCatalog::standard().items_for("Kitchen");
        assert_eq!(kitchen.get("Chairs"), Some(0));
        assert_eq!(kitchen.total(), 0);
    }

    #[test]
    fn specialty_keys_are_unique() {
        let mut keys: Vec<&str> = SPECIALTY_ITEMS.iter().map(|item| item.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), SPECIALTY_ITEMS.len());
    }
}
