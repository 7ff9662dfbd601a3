//! Ancestry System
//!
//! Breadth-first walk from a person up through parent links. Reporting only;
//! validation never uses it.

use hecs::{Entity, World};
use std::collections::VecDeque;

use crate::components::{Parents, Person};

/// One visited node of an ancestor walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorEntry {
    pub name: String,
    /// 0 for the starting person, 1 for parents, 2 for grandparents, ...
    pub generation: u32,
}

impl AncestorEntry {
    /// "person", "parent", "grand parent", "grand grand parent", ...
    pub fn label(&self) -> String {
        match self.generation {
            0 => "person".to_string(),
            n => format!("{}parent", "grand ".repeat(n as usize - 1)),
        }
    }
}

/// Visit `start`, then every parent level by level, parent1 before parent2.
/// An ancestor reachable along several paths is reported once per path.
pub fn ancestor_walk(world: &World, start: Entity) -> Vec<AncestorEntry> {
    let mut entries = Vec::new();
    let mut queue = VecDeque::from([(start, 0u32)]);

    while let Some((entity, generation)) = queue.pop_front() {
        if let Ok(person) = world.get::<&Person>(entity) {
            entries.push(AncestorEntry {
                name: person.name.clone(),
                generation,
            });
        }
        if let Ok(parents) = world.get::<&Parents>(entity) {
            queue.extend(parents.iter().map(|parent| (parent, generation + 1)));
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Children;

    fn spawn(world: &mut World, name: &str, parents: Parents) -> Entity {
        world.spawn((
            Person {
                name: name.to_string(),
                age: 0,
            },
            parents,
            Children::default(),
        ))
    }

    #[test]
    fn test_labels() {
        let entry = |generation| AncestorEntry {
            name: String::new(),
            generation,
        };
        assert_eq!(entry(0).label(), "person");
        assert_eq!(entry(1).label(), "parent");
        assert_eq!(entry(3).label(), "grand grand parent");
    }

    #[test]
    fn test_walk_keeps_duplicate_paths() {
        let mut world = World::new();
        let root = spawn(&mut world, "root", Parents::default());
        let left = spawn(&mut world, "left", Parents::new(Some(root), None));
        let right = spawn(&mut world, "right", Parents::new(Some(root), None));
        let leaf = spawn(&mut world, "leaf", Parents::new(Some(left), Some(right)));

        let walk = ancestor_walk(&world, leaf);
        let names: Vec<_> = walk.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["leaf", "left", "right", "root", "root"]);
        let generations: Vec<_> = walk.iter().map(|e| e.generation).collect();
        assert_eq!(generations, vec![0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_orphan_walk_is_just_the_person() {
        let mut world = World::new();
        let alone = spawn(&mut world, "alone", Parents::default());
        assert_eq!(
            ancestor_walk(&world, alone),
            vec![AncestorEntry {
                name: "alone".into(),
                generation: 0
            }]
        );
    }
}
