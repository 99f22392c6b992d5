//! Cleanup system: detaches every entity scheduled for removal this tick.
//!
//! Removal requests accumulate during the action and collision phases and
//! are drained exactly once, at the end of the same tick. No phase ever
//! sees an entity disappear underneath it.

use hecs::{Entity, World};
use log::debug;

/// De-duplicated set of entities waiting to be despawned.
#[derive(Debug, Default)]
pub struct PendingRemoval {
    entities: Vec<Entity>,
}

impl PendingRemoval {
    /// Schedule `entity` for removal. Scheduling twice is a no-op.
    pub fn schedule(&mut self, entity: Entity) {
        if !self.entities.contains(&entity) {
            self.entities.push(entity);
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Despawn all scheduled entities, recording them in `removed`.
pub fn run(world: &mut World, pending: &mut PendingRemoval, removed: &mut Vec<Entity>) {
    for entity in pending.entities.drain(..) {
        let despawned = world.despawn(entity);
        debug_assert!(
            despawned.is_ok(),
            "{:?} scheduled for removal but not alive",
            entity
        );
        debug!("removed {:?}", entity);
        removed.push(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_idempotent() {
        let mut world = World::new();
        let entity = world.spawn((1u8,));

        let mut pending = PendingRemoval::default();
        pending.schedule(entity);
        pending.schedule(entity);
        assert_eq!(pending.len(), 1);

        let mut removed = Vec::new();
        run(&mut world, &mut pending, &mut removed);

        assert!(pending.is_empty());
        assert!(!world.contains(entity));
        assert_eq!(removed, vec![entity]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not alive")]
    fn test_removing_dead_entity_asserts() {
        let mut world = World::new();
        let entity = world.spawn((1u8,));
        world.despawn(entity).unwrap();

        let mut pending = PendingRemoval::default();
        pending.schedule(entity);
        run(&mut world, &mut pending, &mut Vec::new());
    }
}
