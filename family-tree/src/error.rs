//! Error types for the family tree store

use thiserror::Error;

use crate::age_index::AgeIndexError;
use crate::persistence::SinkError;

/// Why `add_person` refused a request. The store is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name {name} is already defined")]
    DuplicateName { name: String },

    #[error("age {} must be within the range [0, {max_age}]", display_age(.age))]
    AgeOutOfRange { age: Option<i32>, max_age: i32 },

    #[error("parent {name} doesn't exist")]
    ParentNotFound { name: String },

    #[error("age {age} cannot be greater than or equal to parent {parent}'s age {parent_age}")]
    NotYoungerThanParent {
        age: i32,
        parent: String,
        parent_age: i32,
    },

    #[error("child {name} doesn't exist")]
    ChildNotFound { name: String },

    #[error("age {age} cannot be less than or equal to child {child}'s age {child_age}")]
    NotOlderThanChild {
        age: i32,
        child: String,
        child_age: i32,
    },

    #[error("person {name} already has both parents")]
    ChildHasBothParents { name: String },

    #[error("cycle detected when adding a child node")]
    AncestorCycle,

    #[error("cycle detected when adding a parent node")]
    DescendantCycle,
}

fn display_age(age: &Option<i32>) -> String {
    age.map_or_else(|| "<missing>".to_string(), |a| a.to_string())
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("name {0} doesn't exist")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Index(#[from] AgeIndexError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl TreeError {
    /// The validation reason, if this is an invalid-argument failure.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            TreeError::Invalid(reason) => Some(reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;
