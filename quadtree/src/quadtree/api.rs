use super::*;
use smallvec::SmallVec;

pub(crate) type RegionStack = SmallVec<[RegionHandle; 64]>;

impl QuadTree {
    pub fn world(&self) -> RectExtent {
        self.world
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> RegionHandle {
        self.root
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.owners.contains_key(&id)
    }

    /// Leaf the entity is currently assigned to.
    pub fn region_of(&self, id: EntityId) -> Option<RegionHandle> {
        self.owners.get(&id).copied()
    }

    /// Last position pushed into the index for `id`.
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        let handle = self.region_of(id)?;
        self.arena.get(handle)?.points()?.get(&id).copied()
    }

    pub fn region(&self, handle: RegionHandle) -> Option<RegionInfo> {
        self.arena.get(handle).map(|region| region.info(handle))
    }

    /// Entities held by a live leaf, in no particular order. `None` for
    /// branches and dead handles.
    pub fn leaf_entities(
        &self,
        handle: RegionHandle,
    ) -> Option<impl Iterator<Item = &Entity> + '_> {
        self.arena
            .get(handle)
            .and_then(Region::points)
            .map(|points| points.values())
    }

    /// (arena slots ever allocated, live regions, tracked entities)
    pub fn storage_counts(&self) -> (usize, usize, usize) {
        (
            self.arena.slot_len(),
            self.arena.live_len(),
            self.owners.len(),
        )
    }

    /// Every region reachable from the root, depth first, children in
    /// top-left, top-right, bottom-left, bottom-right order.
    pub fn all_regions(&self, regions: &mut Vec<RegionInfo>) {
        self.walk(|handle, region| regions.push(region.info(handle)));
    }

    pub fn all_leaf_extents(&self, extents: &mut Vec<RectExtent>) {
        self.walk(|_, region| {
            if region.is_leaf() {
                extents.push(region.core);
            }
        });
    }

    pub fn all_entities(&self, entities: &mut Vec<Entity>) {
        self.walk(|_, region| {
            if let Some(points) = region.points() {
                entities.extend(points.values().copied());
            }
        });
    }

    fn walk<F>(&self, mut f: F)
    where
        F: FnMut(RegionHandle, &Region),
    {
        let mut stack = RegionStack::new();
        stack.push(self.root);
        while let Some(handle) = stack.pop() {
            let region = match self.arena.get(handle) {
                Some(region) => region,
                None => continue,
            };
            f(handle, region);
            if let Some(children) = region.children() {
                stack.extend(children.into_iter().rev());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_tree() -> QuadTree {
        let mut qt = QuadTree::new(RectExtent::new(0.0, 0.0, 100.0, 100.0), 0.0, 1, 2).unwrap();
        qt.insert(Entity::new(1, 10.0, 10.0)).unwrap();
        qt.insert(Entity::new(2, 20.0, 20.0)).unwrap();
        qt.insert(Entity::new(3, 80.0, 80.0)).unwrap();
        qt.converge();
        qt
    }

    #[test]
    fn all_regions_is_preorder_in_child_order() {
        let qt = split_tree();
        let mut regions = Vec::new();
        qt.all_regions(&mut regions);
        assert_eq!(regions.len(), 5);
        assert_eq!(regions[0].handle, qt.root());
        assert_eq!(regions[0].kind, RegionKind::Branch);
        let cores: Vec<_> = regions[1..].iter().map(|r| r.core).collect();
        assert_eq!(cores, qt.world().quadrants().to_vec());
        assert_eq!(regions[1].point_count, 2);
        assert_eq!(regions[4].point_count, 1);
    }

    #[test]
    fn all_leaf_extents_skips_branches() {
        let qt = split_tree();
        let mut extents = Vec::new();
        qt.all_leaf_extents(&mut extents);
        assert_eq!(extents.len(), 4);
        assert!(!extents.contains(&qt.world()));
    }

    #[test]
    fn all_entities_collects_every_leaf() {
        let qt = split_tree();
        let mut entities = Vec::new();
        qt.all_entities(&mut entities);
        let mut ids: Vec<_> = entities.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn accessors_report_assignment() {
        let qt = split_tree();
        assert_eq!(qt.len(), 3);
        assert!(!qt.is_empty());
        assert!(qt.contains(2));
        assert!(!qt.contains(9));
        assert_eq!(qt.entity(3), Some(Entity::new(3, 80.0, 80.0)));

        let leaf = qt.region_of(1).unwrap();
        let info = qt.region(leaf).unwrap();
        assert_eq!(info.kind, RegionKind::Leaf);
        assert_eq!(info.parent, Some(qt.root()));
        assert_eq!(qt.leaf_entities(leaf).map(|it| it.count()), Some(2));
        assert!(qt.leaf_entities(qt.root()).is_none());
        assert_eq!(qt.storage_counts(), (5, 5, 3));
    }
}
