use crate::shapes::EntityId;

/// Hands out entity ids.
///
/// Ids are never given back: a stale id held by a caller can never alias a
/// newer entity. The counter is owned by whatever spawns entities and is
/// passed around explicitly.
#[derive(Debug, Default, Clone)]
pub struct EntityIds {
    next: EntityId,
}

impl EntityIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting at `first`, e.g. when resuming after a snapshot.
    pub fn starting_at(first: EntityId) -> Self {
        Self { next: first }
    }

    pub fn next(&mut self) -> EntityId {
        let id = self.next;
        self.next = self
            .next
            .checked_add(1)
            .expect("entity id space exhausted");
        id
    }

    /// Number of ids issued since construction at zero.
    pub fn issued(&self) -> EntityId {
        self.next
    }
}
