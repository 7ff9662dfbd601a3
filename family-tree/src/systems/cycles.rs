//! Cycle Checks
//!
//! Depth-first walks run while validating an add. Each walk keeps one visited
//! set for all of its starting points, so any node reached twice counts as a
//! cycle. That also rejects two parents who share an ancestor and two
//! children who share a descendant.

use hecs::{Entity, World};
use std::collections::HashSet;

use crate::components::{Children, Parents};

/// Walk parent links upward from both candidate parents at once.
pub fn has_ancestor_cycle(world: &World, parent1: Entity, parent2: Entity) -> bool {
    let mut stack = vec![parent2, parent1];
    let mut visited = HashSet::new();

    while let Some(entity) = stack.pop() {
        if !visited.insert(entity) {
            return true;
        }
        if let Ok(parents) = world.get::<&Parents>(entity) {
            stack.extend(parents.iter());
        }
    }
    false
}

/// Walk child links downward from every candidate child.
pub fn has_descendant_cycle(world: &World, children: &[Entity]) -> bool {
    let mut stack: Vec<Entity> = children.iter().rev().copied().collect();
    let mut visited = HashSet::new();

    while let Some(entity) = stack.pop() {
        if !visited.insert(entity) {
            return true;
        }
        if let Ok(kids) = world.get::<&Children>(entity) {
            stack.extend(kids.0.iter().copied());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(world: &mut World, parents: Parents) -> Entity {
        world.spawn((parents, Children::default()))
    }

    fn link(world: &mut World, parent: Entity, child: Entity) {
        world.get::<&mut Children>(parent).unwrap().0.push(child);
        world.get::<&mut Parents>(child).unwrap().attach(parent);
    }

    #[test]
    fn test_unrelated_parents_pass() {
        let mut world = World::new();
        let a = spawn(&mut world, Parents::default());
        let b = spawn(&mut world, Parents::default());
        let c = spawn(&mut world, Parents::default());
        link(&mut world, c, a);

        assert!(!has_ancestor_cycle(&world, a, b));
    }

    #[test]
    fn test_parent_that_is_ancestor_of_other_parent() {
        let mut world = World::new();
        let grand = spawn(&mut world, Parents::default());
        let parent = spawn(&mut world, Parents::default());
        link(&mut world, grand, parent);

        assert!(has_ancestor_cycle(&world, grand, parent));
        assert!(has_ancestor_cycle(&world, parent, grand));
    }

    #[test]
    fn test_same_parent_twice() {
        let mut world = World::new();
        let a = spawn(&mut world, Parents::default());
        assert!(has_ancestor_cycle(&world, a, a));
    }

    #[test]
    fn test_children_sharing_a_descendant() {
        let mut world = World::new();
        let a = spawn(&mut world, Parents::default());
        let b = spawn(&mut world, Parents::default());
        let c = spawn(&mut world, Parents::default());
        link(&mut world, a, c);
        link(&mut world, b, c);

        assert!(has_descendant_cycle(&world, &[a, b]));
        assert!(!has_descendant_cycle(&world, &[a]));
        assert!(!has_descendant_cycle(&world, &[]));
    }

    #[test]
    fn test_deep_chain_without_cycle() {
        let mut world = World::new();
        let mut people = vec![spawn(&mut world, Parents::default())];
        for _ in 0..50 {
            let child = spawn(&mut world, Parents::default());
            let parent = *people.last().unwrap();
            link(&mut world, parent, child);
            people.push(child);
        }
        let stranger = spawn(&mut world, Parents::default());
        assert!(!has_descendant_cycle(&world, &people[..1]));
        assert!(!has_ancestor_cycle(&world, people[50], stranger));
    }
}
