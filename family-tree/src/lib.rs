//! Family Tree Store
//!
//! Concurrent in-memory genealogy graph. People live in an ECS arena and link
//! to each other by entity handle; an age-bucketed index gives O(1) inserts
//! and O(n) ordered listings.

pub mod age_index;
pub mod components;
pub mod config;
pub mod error;
pub mod names;
pub mod order;
pub mod persistence;
pub mod systems;
pub mod tree;
pub mod world;

pub use age_index::{AgeIndex, AgeIndexError};
pub use components::NewPerson;
pub use config::{ConfigError, TreeConfig};
pub use error::{TreeError, ValidationError};
pub use order::Order;
pub use persistence::{JsonLinesSink, PersistenceSink, PersonRecord, SinkError, TracingSink};
pub use systems::AncestorEntry;
pub use tree::FamilyTree;
