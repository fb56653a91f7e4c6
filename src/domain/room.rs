//! Rooms and the per-item counts a customer moves out of them.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A single item line inside a room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemCount {
    pub name: String,
    pub count: u32,
}

/// Ordered mapping from item name to requested count.
///
/// Insertion order is kept so catalog rooms list their items the same way
/// every time. Names are unique within one mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ItemCounts(Vec<ItemCount>);

impl ItemCounts {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a mapping where every item starts at zero.
    pub fn zeroed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = Self::new();
        for name in names {
            counts.set(name, 0);
        }
        counts
    }

    /// Inserts or overwrites the count for `name`.
    pub fn set(&mut self, name: impl Into<String>, count: u32) {
        let name = name.into();
        match self.0.iter_mut().find(|item| item.name == name) {
            Some(existing) => existing.count = count,
            None => self.0.push(ItemCount { name, count }),
        }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.count)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|item| item.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|item| item.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemCount> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts; widened so large per-item counts cannot overflow.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|item| u64::from(item.count)).sum()
    }
}

/// A room of the home being moved together with its item counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub items: ItemCounts,
}

impl Room {
    pub fn new(name: impl Into<String>, items: ItemCounts) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Creates a room whose listed items all start at zero.
    pub fn with_items<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, ItemCounts::zeroed(items))
    }

    pub fn set_items(&mut self, items: ItemCounts) {
        self.items = items;
    }
}

impl NamedEntity for Room {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Room {
    fn display_label(&self) -> String {
        format!("{} ({} items)", self.name, self.items.total())
    }
}
