//! Family World - the unsynchronized store behind a `FamilyTree`
//!
//! Holds the person arena, the name map and the age index, and knows how to
//! validate and apply an add. Locking and persistence live one level up.

use hecs::{Entity, World};
use std::collections::HashMap;

use crate::age_index::{AgeIndex, AgeIndexError};
use crate::components::*;
use crate::error::ValidationError;
use crate::order::Order;
use crate::persistence::PersonRecord;
use crate::systems::{self, AncestorEntry};

/// Existing relatives an add request resolved to.
#[derive(Debug, Clone)]
struct Resolved {
    age: i32,
    parents: Parents,
    children: Vec<Entity>,
}

/// A validated add, not yet applied. Holds the records every touched
/// person will have once it is committed.
#[derive(Debug, Clone)]
pub struct PendingAdd {
    name: String,
    resolved: Resolved,
    pub created: PersonRecord,
    /// Parents first (slot order), then children (request order).
    pub updated: Vec<PersonRecord>,
}

/// Entities touched by one committed add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub created: Entity,
    /// Parents first (slot order), then children (request order).
    pub updated: Vec<Entity>,
}

pub struct FamilyWorld {
    world: World,
    by_name: HashMap<String, Entity>,
    by_age: AgeIndex<Entity>,
    max_age: i32,
}

impl FamilyWorld {
    pub fn new(max_age: i32) -> Result<Self, AgeIndexError> {
        Ok(Self {
            world: World::new(),
            by_name: HashMap::new(),
            by_age: AgeIndex::new(max_age)?,
            max_age,
        })
    }

    pub fn max_age(&self) -> i32 {
        self.max_age
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Number of entries in the age index. Always equal to `len()`.
    pub fn indexed_len(&self) -> usize {
        self.by_age.len()
    }

    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn record(&self, entity: Entity) -> Option<PersonRecord> {
        let person = self.world.get::<&Person>(entity).ok()?;
        let parents = self
            .world
            .get::<&Parents>(entity)
            .map(|p| *p)
            .unwrap_or_default();
        let children = self.world.get::<&Children>(entity).ok()?;

        Some(PersonRecord {
            name: person.name.clone(),
            age: person.age,
            parent1: parents.first.and_then(|p| self.name_of(p)),
            parent2: parents.second.and_then(|p| self.name_of(p)),
            children: children.0.iter().filter_map(|&c| self.name_of(c)).collect(),
        })
    }

    pub fn person(&self, name: &str) -> Option<PersonRecord> {
        self.record(self.entity(name)?)
    }

    /// Everyone, by age. Ties come out most recently added first.
    pub fn ordered(&self, order: Order) -> Vec<PersonRecord> {
        self.by_age
            .iter(order)
            .filter_map(|&entity| self.record(entity))
            .collect()
    }

    pub fn ancestors(&self, name: &str) -> Option<Vec<AncestorEntry>> {
        let entity = self.entity(name)?;
        Some(systems::ancestor_walk(&self.world, entity))
    }

    /// One human-readable line per person, by age.
    pub fn report(&self, order: Order) -> Vec<String> {
        self.ordered(order).iter().map(report_line).collect()
    }

    fn name_of(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&Person>(entity)
            .ok()
            .map(|p| p.name.clone())
    }

    fn lookup(&self, name: &str) -> Option<(Entity, i32)> {
        let entity = self.entity(name)?;
        let age = self.world.get::<&Person>(entity).ok()?.age;
        Some((entity, age))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Validate `request` and link the new person into the graph.
    /// Nothing changes unless every check passes.
    pub fn insert(&mut self, request: NewPerson) -> Result<Commit, crate::error::TreeError> {
        let pending = self.prepare(request)?;
        Ok(self.commit(pending)?)
    }

    /// Validate `request` without touching the store. The returned records
    /// are exactly what `record` reports after `commit`.
    pub fn prepare(&self, request: NewPerson) -> Result<PendingAdd, ValidationError> {
        let resolved = self.validate(&request)?;
        let NewPerson {
            name,
            parent1,
            parent2,
            children,
            ..
        } = request;

        let mut updated = Vec::with_capacity(2 + resolved.children.len());
        for parent in resolved.parents.iter() {
            if let Some(mut record) = self.record(parent) {
                record.children.push(name.clone());
                updated.push(record);
            }
        }
        for &child in &resolved.children {
            if let Some(mut record) = self.record(child) {
                // Mirrors Parents::attach
                let slot = if record.parent1.is_none() {
                    &mut record.parent1
                } else {
                    &mut record.parent2
                };
                *slot = Some(name.clone());
                updated.push(record);
            }
        }

        let created = PersonRecord {
            name: name.clone(),
            age: resolved.age,
            parent1,
            parent2,
            children,
        };
        Ok(PendingAdd {
            name,
            resolved,
            created,
            updated,
        })
    }

    fn validate(&self, request: &NewPerson) -> Result<Resolved, ValidationError> {
        if self.by_name.contains_key(&request.name) {
            return Err(ValidationError::DuplicateName {
                name: request.name.clone(),
            });
        }

        let age = match request.age {
            Some(age) if (0..=self.max_age).contains(&age) => age,
            age => {
                return Err(ValidationError::AgeOutOfRange {
                    age,
                    max_age: self.max_age,
                })
            }
        };

        let parent1 = request
            .parent1
            .as_deref()
            .map(|name| self.validate_parent(name, age))
            .transpose()?;
        let parent2 = request
            .parent2
            .as_deref()
            .map(|name| self.validate_parent(name, age))
            .transpose()?;

        if let (Some(first), Some(second)) = (parent1, parent2) {
            if systems::has_ancestor_cycle(&self.world, first, second) {
                return Err(ValidationError::AncestorCycle);
            }
        }

        let children = request
            .children
            .iter()
            .map(|name| self.validate_child(name, age))
            .collect::<Result<Vec<_>, _>>()?;

        if systems::has_descendant_cycle(&self.world, &children) {
            return Err(ValidationError::DescendantCycle);
        }

        Ok(Resolved {
            age,
            parents: Parents::new(parent1, parent2),
            children,
        })
    }

    fn validate_parent(&self, name: &str, age: i32) -> Result<Entity, ValidationError> {
        let (entity, parent_age) =
            self.lookup(name)
                .ok_or_else(|| ValidationError::ParentNotFound {
                    name: name.to_string(),
                })?;
        if age >= parent_age {
            return Err(ValidationError::NotYoungerThanParent {
                age,
                parent: name.to_string(),
                parent_age,
            });
        }
        Ok(entity)
    }

    fn validate_child(&self, name: &str, age: i32) -> Result<Entity, ValidationError> {
        let (entity, child_age) =
            self.lookup(name)
                .ok_or_else(|| ValidationError::ChildNotFound {
                    name: name.to_string(),
                })?;
        if age <= child_age {
            return Err(ValidationError::NotOlderThanChild {
                age,
                child: name.to_string(),
                child_age,
            });
        }
        let full = self
            .world
            .get::<&Parents>(entity)
            .map(|p| p.is_full())
            .unwrap_or(false);
        if full {
            return Err(ValidationError::ChildHasBothParents {
                name: name.to_string(),
            });
        }
        Ok(entity)
    }

    /// Apply an add produced by `prepare` on this world with no write in
    /// between.
    pub fn commit(&mut self, pending: PendingAdd) -> Result<Commit, AgeIndexError> {
        let PendingAdd {
            name,
            resolved:
                Resolved {
                    age,
                    parents,
                    children,
                },
            ..
        } = pending;

        // `age` was range-checked by `prepare`; indexing first means a rejected
        // key never spawns a person
        let created = self.world.reserve_entity();
        self.by_age.insert(age, created)?;
        self.world.spawn_at(
            created,
            (
                Person {
                    name: name.clone(),
                    age,
                },
                parents,
                Children(children.clone()),
            ),
        );
        self.by_name.insert(name, created);

        let mut updated = Vec::with_capacity(2 + children.len());
        for parent in parents.iter() {
            if let Ok(mut kids) = self.world.get::<&mut Children>(parent) {
                kids.0.push(created);
            }
            updated.push(parent);
        }
        for child in children {
            if let Ok(mut slots) = self.world.get::<&mut Parents>(child) {
                slots.attach(created);
            }
            updated.push(child);
        }

        Ok(Commit { created, updated })
    }
}

fn report_line(person: &PersonRecord) -> String {
    let mut line = format!("Person: {}, age: {}", person.name, person.age);

    let parents: Vec<&str> = person.parents().collect();
    match parents.as_slice() {
        [] => {}
        [only] => line.push_str(&format!(", parent: {only}")),
        all => line.push_str(&format!(", parents: {}", all.join(", "))),
    }

    if !person.children.is_empty() {
        line.push_str(&format!(", children: {}", person.children.join(", ")));
    }
    line
}
