//! Graph walks over the person arena
//!
//! Plain functions over `&World`; the caller holds whatever lock guards it.

pub mod ancestry;
pub mod cycles;

pub use ancestry::{ancestor_walk, AncestorEntry};
pub use cycles::{has_ancestor_cycle, has_descendant_cycle};
