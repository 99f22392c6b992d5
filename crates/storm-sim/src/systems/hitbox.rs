//! Hitbox table: one (rectangle, entity) pair per mover, rebuilt every tick
//! after firing and cleared at the end of the tick.

use hecs::{Entity, World};

use storm_core::components::{Body, HitboxInset};
use storm_core::types::{Position, Rect};

/// A collision rectangle paired with the entity it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Hitbox {
    pub rect: Rect,
    pub entity: Entity,
}

/// Per-tick set of hitboxes used for overlap queries.
#[derive(Debug, Default)]
pub struct HitboxTable {
    entries: Vec<Hitbox>,
}

impl HitboxTable {
    /// Replace the table contents with the current rectangle of every mover.
    pub fn rebuild(&mut self, world: &World) {
        self.entries.clear();
        let mut query = world.query::<(&Position, &Body, Option<&HitboxInset>)>();
        for (entity, (pos, body, inset)) in query.iter() {
            self.entries.push(Hitbox {
                rect: collision_rect(pos, body, inset),
                entity,
            });
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Hitbox] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry, in table order, that overlaps `rect` and does not belong
    /// to `exclude`. Identity is the entity handle, never the rectangle.
    pub fn first_overlap(&self, rect: &Rect, exclude: Entity) -> Option<&Hitbox> {
        self.entries
            .iter()
            .find(|hitbox| hitbox.entity != exclude && rect.intersects(&hitbox.rect))
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, hitbox: Hitbox) {
        self.entries.push(hitbox);
    }
}

/// Collision rectangle of an entity: its body at its position, shrunk by
/// the inset when it has one.
pub fn collision_rect(pos: &Position, body: &Body, inset: Option<&HitboxInset>) -> Rect {
    match inset {
        Some(inset) => Rect::new(
            pos.x + inset.left,
            pos.y + inset.top,
            body.width - inset.left - inset.right,
            body.height - inset.top - inset.bottom,
        ),
        None => Rect::new(pos.x, pos.y, body.width, body.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_shrinks_rect() {
        let pos = Position::new(100.0, 200.0);
        let body = Body {
            width: 48.0,
            height: 45.0,
        };
        let inset = HitboxInset {
            left: 10.0,
            top: 10.0,
            right: 10.0,
            bottom: 15.0,
        };
        let rect = collision_rect(&pos, &body, Some(&inset));
        assert_eq!(rect, Rect::new(110.0, 210.0, 28.0, 20.0));
    }

    #[test]
    fn test_same_rect_different_entity_is_not_excluded() {
        let mut world = World::new();
        let a = world.spawn(());
        let b = world.spawn(());
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let mut table = HitboxTable::default();
        table.push(Hitbox { rect, entity: a });
        table.push(Hitbox { rect, entity: b });

        let hit = table.first_overlap(&rect, a).unwrap();
        assert_eq!(hit.entity, b, "Identical rectangle on another entity must still hit");
        assert!(table.first_overlap(&rect, a).is_some());

        table.clear();
        assert!(table.first_overlap(&rect, a).is_none());
    }
}
