#![allow(dead_code)]

use std::sync::Mutex;

use move_planner::{
    catalog::RoomCatalog,
    planner::{WizardController, WizardStep},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// A built wizard with `rooms` ticked on the Rooms step.
pub fn wizard_with_rooms(rooms: &[&str]) -> WizardController<'static> {
    let mut wizard = WizardController::initialized(RoomCatalog::standard());
    for room in rooms {
        wizard
            .set_value(WizardStep::Rooms, room, "yes")
            .expect("room exists in catalog");
    }
    wizard
}

pub fn untick(wizard: &mut WizardController<'_>, room: &str) {
    wizard
        .set_value(WizardStep::Rooms, room, "no")
        .expect("room exists in catalog");
}

pub fn item_keys(wizard: &mut WizardController<'_>) -> Vec<String> {
    wizard
        .go_to_step(WizardStep::Items.index())
        .expect("items step")
        .keys()
        .map(str::to_string)
        .collect()
}
