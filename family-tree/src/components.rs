//! ECS Components for family tree entities
//!
//! Every person is one entity in the arena. Relationships are stored as
//! entity handles, never as owning links.

use hecs::Entity;
use serde::{Deserialize, Serialize};

// ============================================================================
// Person Components
// ============================================================================

/// Identity of a person. Both fields are fixed once spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: i32,
}

/// Up to two parent handles, filled left to right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parents {
    pub first: Option<Entity>,
    pub second: Option<Entity>,
}

impl Parents {
    pub fn new(first: Option<Entity>, second: Option<Entity>) -> Self {
        Self { first, second }
    }

    pub fn is_full(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// Put `parent` into the first empty slot. Returns false when both are taken.
    pub fn attach(&mut self, parent: Entity) -> bool {
        if self.first.is_none() {
            self.first = Some(parent);
        } else if self.second.is_none() {
            self.second = Some(parent);
        } else {
            return false;
        }
        true
    }

    /// Parent handles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> {
        self.first.into_iter().chain(self.second)
    }
}

/// Children in attachment order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(pub Vec<Entity>);

// ============================================================================
// Requests
// ============================================================================

/// Input for adding a person: the person itself plus the names of existing
/// relatives to link it to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    /// `None` is rejected as out of range.
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent2: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age: Some(age),
            ..Self::default()
        }
    }

    pub fn parent1(mut self, name: impl Into<String>) -> Self {
        self.parent1 = Some(name.into());
        self
    }

    pub fn parent2(mut self, name: impl Into<String>) -> Self {
        self.parent2 = Some(name.into());
        self
    }

    pub fn parents(self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.parent1(first).parent2(second)
    }

    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.children.push(name.into());
        self
    }

    pub fn children<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children.extend(names.into_iter().map(Into::into));
        self
    }
}
