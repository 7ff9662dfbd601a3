//! Family Tree - thread-safe front of the store
//!
//! One `RwLock` guards the whole `FamilyWorld`. Adds hold the write lock for
//! validation, linking and every sink call, so concurrent adds are fully
//! serialized and readers never see a half-applied add. Reads share the lock.
//!
//! The sink sees an add before it is applied in memory, and the add is applied
//! only if every sink call succeeds. A sink that fails or panics leaves the
//! graph as it was, so a poisoned lock is recovered rather than reported.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

use crate::components::NewPerson;
use crate::config::TreeConfig;
use crate::error::{Result, TreeError};
use crate::order::Order;
use crate::persistence::{PersistenceSink, PersonRecord, SinkError};
use crate::systems::AncestorEntry;
use crate::world::{FamilyWorld, PendingAdd};

pub struct FamilyTree {
    state: RwLock<FamilyWorld>,
    sink: Arc<dyn PersistenceSink>,
}

impl FamilyTree {
    pub fn new(sink: Arc<dyn PersistenceSink>, max_age: i32) -> Result<Self> {
        Ok(Self {
            state: RwLock::new(FamilyWorld::new(max_age)?),
            sink,
        })
    }

    pub fn with_config(sink: Arc<dyn PersistenceSink>, config: &TreeConfig) -> Result<Self> {
        Self::new(sink, config.max_age)
    }

    pub fn max_age(&self) -> i32 {
        self.read().max_age()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Add a person and link it to the named relatives.
    ///
    /// The sink receives `create` for the new person, then `update` for each
    /// parent and each child, with the records they will have after the add.
    /// Only then is the add applied, all before the write lock is released.
    /// A validation or sink failure leaves the store untouched.
    ///
    /// O(n) in the size of the graph reachable from the named relatives.
    pub fn add_person(&self, request: NewPerson) -> Result<()> {
        let mut state = self.write();

        let name = request.name.clone();
        let pending = match state.prepare(request) {
            Ok(pending) => pending,
            Err(err) => {
                debug!(%name, error = %err, "rejected person");
                return Err(err.into());
            }
        };

        if let Err(err) = self.persist(&pending) {
            debug!(%name, error = %err, "sink refused person");
            return Err(err.into());
        }

        let commit = state.commit(pending)?;
        debug!(%name, relatives = commit.updated.len(), "added person");
        Ok(())
    }

    fn persist(&self, pending: &PendingAdd) -> std::result::Result<(), SinkError> {
        self.sink.create(&pending.created)?;
        for record in &pending.updated {
            self.sink.update(record)?;
        }
        Ok(())
    }

    /// O(1)
    pub fn get_person(&self, name: &str) -> Option<PersonRecord> {
        self.read().person(name)
    }

    /// Everyone ordered by age. O(n)
    pub fn get_ordered_list(&self, order: Order) -> Vec<PersonRecord> {
        self.read().ordered(order)
    }

    /// Names met on a breadth-first walk up from `name`, starting with
    /// `name` itself. O(n)
    pub fn print_ancestors(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .ancestors(name)?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    /// Like [`print_ancestors`](Self::print_ancestors), keeping the generation
    /// of every entry.
    pub fn ancestors(&self, name: &str) -> Result<Vec<AncestorEntry>> {
        let entries = self
            .read()
            .ancestors(name)
            .ok_or_else(|| TreeError::NotFound(name.to_string()))?;
        for entry in &entries {
            trace!("{}: {}", entry.label(), entry.name);
        }
        Ok(entries)
    }

    pub fn family_report(&self, order: Order) -> Vec<String> {
        self.read().report(order)
    }

    fn read(&self) -> RwLockReadGuard<'_, FamilyWorld> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FamilyWorld> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
