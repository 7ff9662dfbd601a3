//! Persistence sink - the collaborator notified of every change
//!
//! The tree calls the sink synchronously while it still holds the write lock,
//! so a slow sink stalls every reader and writer. Calls arrive before the
//! change is applied in memory; a sink error fails the `add_person` call that
//! triggered it and the change is dropped.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// Records
// ============================================================================

/// Full current state of one person, relationships rendered as names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub age: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent2: Option<String>,
    pub children: Vec<String>,
}

impl PersonRecord {
    /// Parent names in slot order.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.parent1.iter().chain(&self.parent2).map(String::as_str)
    }
}

// ============================================================================
// Sink
// ============================================================================

#[derive(Debug, Error)]
#[error("{message}")]
pub struct SinkError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub trait PersistenceSink: Send + Sync {
    /// Called exactly once for each newly added person.
    fn create(&self, person: &PersonRecord) -> Result<(), SinkError>;

    /// Called once for each existing relative whose links changed.
    fn update(&self, person: &PersonRecord) -> Result<(), SinkError>;
}

/// Sink that only reports changes to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl PersistenceSink for TracingSink {
    fn create(&self, person: &PersonRecord) -> Result<(), SinkError> {
        debug!(name = %person.name, age = person.age, "stored person");
        Ok(())
    }

    fn update(&self, person: &PersonRecord) -> Result<(), SinkError> {
        debug!(
            name = %person.name,
            children = person.children.len(),
            "updated person"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalOp {
    Create,
    Update,
}

/// One line of a [`JsonLinesSink`] journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub op: JournalOp,
    pub person: PersonRecord,
}

/// Sink that appends one JSON object per change to a writer.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn append(&self, op: JournalOp, person: &PersonRecord) -> Result<(), SinkError> {
        let entry = JournalEntry {
            op,
            person: person.clone(),
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SinkError::new("journal writer poisoned"))?;
        serde_json::to_writer(&mut *writer, &entry)
            .map_err(|e| SinkError::with_source("failed to encode journal entry", e))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|e| SinkError::with_source("failed to write journal entry", e))
    }
}

impl<W: Write + Send> PersistenceSink for JsonLinesSink<W> {
    fn create(&self, person: &PersonRecord) -> Result<(), SinkError> {
        self.append(JournalOp::Create, person)
    }

    fn update(&self, person: &PersonRecord) -> Result<(), SinkError> {
        self.append(JournalOp::Update, person)
    }
}
