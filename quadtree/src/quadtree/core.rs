use super::*;
use tracing::warn;

impl QuadTree {
    pub fn new(
        world: RectExtent,
        buffer: f32,
        min_points: usize,
        max_points: usize,
    ) -> QuadtreeResult<Self> {
        Self::new_with_config(
            world,
            Config {
                buffer,
                min_points,
                max_points,
                ..Config::default()
            },
        )
    }

    pub fn new_with_config(world: RectExtent, config: Config) -> QuadtreeResult<Self> {
        if !world.is_valid() {
            return Err(QuadtreeError::InvalidWorldBounds {
                min_x: world.min_x,
                min_y: world.min_y,
                max_x: world.max_x,
                max_y: world.max_y,
            });
        }
        config.validate()?;

        let mut arena = RegionArena::with_capacity(config.region_capacity);
        let root = arena.alloc(Region::new_leaf(world, config.buffer, 0, None));
        Ok(Self {
            world,
            config,
            arena,
            root,
            owners: FxHashMap::default(),
        })
    }

    /// Tracks `entity` in the leaf whose core contains its position.
    ///
    /// Inserting an id that is already tracked moves it. Positions outside the
    /// world are rejected and the index is left untouched.
    pub fn insert(&mut self, entity: Entity) -> QuadtreeResult<RegionHandle> {
        let leaf = match self.find_leaf(entity.position) {
            Some(leaf) => leaf,
            None => {
                warn!(
                    id = entity.id,
                    x = entity.position.x,
                    y = entity.position.y,
                    "entity is out of bounds, not tracked"
                );
                return Err(QuadtreeError::OutOfBounds {
                    id: entity.id,
                    x: entity.position.x,
                    y: entity.position.y,
                });
            }
        };

        if let Some(previous) = self.owners.get(&entity.id).copied() {
            if previous != leaf {
                self.detach(entity.id, previous);
            }
        }
        self.attach(leaf, entity);
        Ok(leaf)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let handle = self.owners.remove(&id)?;
        self.arena.get_mut(handle)?.points_mut()?.remove(&id)
    }

    /// Walks down from the root, picking the child quadrant at each branch.
    /// Children tile their parent, so this finds the single leaf whose core
    /// contains `point`.
    pub(crate) fn find_leaf(&self, point: Point) -> Option<RegionHandle> {
        let mut handle = self.root;
        loop {
            let region = self.arena.get(handle)?;
            if !region.core.contains_point(point) {
                return None;
            }
            match &region.state {
                RegionState::Leaf { .. } => return Some(handle),
                RegionState::Branch { children } => {
                    handle = children[region.core.quadrant_of(point)];
                }
            }
        }
    }

    pub(crate) fn attach(&mut self, leaf: RegionHandle, entity: Entity) {
        if let Some(points) = self.arena.get_mut(leaf).and_then(Region::points_mut) {
            points.insert(entity.id, entity);
            self.owners.insert(entity.id, leaf);
        }
    }

    pub(crate) fn detach(&mut self, id: EntityId, leaf: RegionHandle) {
        if let Some(points) = self.arena.get_mut(leaf).and_then(Region::points_mut) {
            points.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> RectExtent {
        RectExtent::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn new_creates_single_root_leaf() {
        let qt = QuadTree::new(world(), 5.0, 2, 4).unwrap();
        let root = qt.arena.get(qt.root).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.core, world());
        assert_eq!(root.buffer, 5.0);
        assert_eq!(root.parent, None);
        assert_eq!(qt.arena.live_len(), 1);
    }

    #[test]
    fn new_rejects_degenerate_world() {
        let err = QuadTree::new(RectExtent::new(0.0, 0.0, 0.0, 100.0), 0.0, 2, 4).unwrap_err();
        assert!(err.is_config_error());
        assert!(matches!(err, QuadtreeError::InvalidWorldBounds { .. }));
        let err = QuadTree::new(RectExtent::new(10.0, 0.0, 0.0, 100.0), 0.0, 2, 4).unwrap_err();
        assert!(matches!(err, QuadtreeError::InvalidWorldBounds { .. }));
    }

    #[test]
    fn new_rejects_min_not_below_max() {
        let err = QuadTree::new(world(), 0.0, 5, 4).unwrap_err();
        assert_eq!(
            err,
            QuadtreeError::InvalidPointBounds {
                min_points: 5,
                max_points: 4
            }
        );
    }

    #[test]
    fn insert_records_owner() {
        let mut qt = QuadTree::new(world(), 0.0, 2, 4).unwrap();
        let leaf = qt.insert(Entity::new(1, 10.0, 10.0)).unwrap();
        assert_eq!(leaf, qt.root);
        assert_eq!(qt.owners.get(&1), Some(&leaf));
        assert_eq!(qt.arena.get(leaf).unwrap().point_count(), 1);
    }

    #[test]
    fn insert_out_of_bounds_leaves_index_untouched() {
        let mut qt = QuadTree::new(world(), 0.0, 2, 4).unwrap();
        qt.insert(Entity::new(1, 10.0, 10.0)).unwrap();
        let err = qt.insert(Entity::new(1, 100.0, 10.0)).unwrap_err();
        assert_eq!(
            err,
            QuadtreeError::OutOfBounds {
                id: 1,
                x: 100.0,
                y: 10.0
            }
        );
        // The earlier assignment survives the failed re-insert.
        let root = qt.arena.get(qt.root).unwrap();
        assert_eq!(root.points().unwrap().get(&1).map(|e| e.x()), Some(10.0));
    }

    #[test]
    fn insert_rejects_nan_position() {
        let mut qt = QuadTree::new(world(), 0.0, 2, 4).unwrap();
        assert!(qt.insert(Entity::new(1, f32::NAN, 10.0)).is_err());
        assert!(qt.owners.is_empty());
    }

    #[test]
    fn find_leaf_descends_into_children() {
        let mut qt = QuadTree::new(world(), 0.0, 2, 4).unwrap();
        assert!(qt.split(qt.root));
        let children = qt.arena.get(qt.root).unwrap().children().unwrap();
        assert_eq!(qt.find_leaf(Point::new(10.0, 10.0)), Some(children[0]));
        assert_eq!(qt.find_leaf(Point::new(60.0, 10.0)), Some(children[1]));
        assert_eq!(qt.find_leaf(Point::new(10.0, 60.0)), Some(children[2]));
        assert_eq!(qt.find_leaf(Point::new(50.0, 50.0)), Some(children[3]));
        assert_eq!(qt.find_leaf(Point::new(-1.0, 50.0)), None);
    }

    #[test]
    fn remove_untracks_entity() {
        let mut qt = QuadTree::new(world(), 0.0, 2, 4).unwrap();
        qt.insert(Entity::new(3, 20.0, 30.0)).unwrap();
        assert_eq!(qt.remove(3), Some(Entity::new(3, 20.0, 30.0)));
        assert_eq!(qt.remove(3), None);
        assert_eq!(qt.arena.get(qt.root).unwrap().point_count(), 0);
    }
}
