use super::*;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rebalance {
    Split(RegionHandle),
    Merge(RegionHandle),
}

impl QuadTree {
    /// One rebalancing pass over the live regions in ascending handle order.
    ///
    /// Applies at most one structural change (the first split or merge found)
    /// and reports whether it did. Whatever else needs fixing is picked up by
    /// the next pass.
    pub fn rebalance(&mut self) -> bool {
        match self.next_rebalance() {
            Some(Rebalance::Merge(handle)) => self.merge(handle),
            Some(Rebalance::Split(handle)) => self.split(handle),
            None => false,
        }
    }

    /// Runs [`QuadTree::rebalance`] until a pass changes nothing and returns the
    /// number of passes that did change something.
    ///
    /// Termination depends on the configuration: with fixed positions a split
    /// leaf holds more than `max_points` and a merged one fewer than
    /// `min_points`, so a valid `min_points < max_points` never oscillates.
    pub fn converge(&mut self) -> usize {
        let mut passes = 0;
        while self.rebalance() {
            passes += 1;
        }
        if passes > 0 {
            debug!(
                passes,
                regions = self.arena.live_len(),
                entities = self.owners.len(),
                "rebalance converged"
            );
        }
        passes
    }

    /// One simulation step: apply every relocation, then converge.
    pub fn tick(&mut self, relocation_requests: &[RelocationRequest]) -> QuadtreeResult<usize> {
        self.relocate_batch(relocation_requests)?;
        Ok(self.converge())
    }

    fn next_rebalance(&self) -> Option<Rebalance> {
        for (handle, region) in self.arena.iter() {
            match &region.state {
                RegionState::Branch { children } => {
                    if let Some(total) = self.leaf_children_total(children) {
                        if total < self.config.min_points {
                            return Some(Rebalance::Merge(handle));
                        }
                    }
                }
                RegionState::Leaf { points } => {
                    if points.len() > self.config.max_points
                        && region.can_split(self.config.max_depth)
                    {
                        return Some(Rebalance::Split(handle));
                    }
                }
            }
        }
        None
    }

    /// Combined point count of `children`, or `None` unless all four are live
    /// leaves.
    fn leaf_children_total(&self, children: &[RegionHandle; 4]) -> Option<usize> {
        let mut total = 0;
        for child in children {
            let region = self.arena.get(*child)?;
            if !region.is_leaf() {
                return None;
            }
            total += region.point_count();
        }
        Some(total)
    }

    /// Turns a leaf into a branch with four fresh leaf children, moving every
    /// point into the child quadrant it falls in.
    pub(crate) fn split(&mut self, handle: RegionHandle) -> bool {
        let (core, buffer, depth, points) = match self.arena.get_mut(handle) {
            Some(region) => match &mut region.state {
                RegionState::Leaf { points } => (
                    region.core,
                    region.buffer,
                    region.depth,
                    std::mem::take(points),
                ),
                RegionState::Branch { .. } => return false,
            },
            None => return false,
        };

        debug!(
            region = %handle,
            depth,
            points = points.len(),
            "splitting region"
        );

        // Points kept here by hysteresis or the nearest-center fallback may
        // lie outside `core`; quadrant_of still puts them in the nearest child.
        let mut buckets: [FxHashMap<EntityId, Entity>; 4] = Default::default();
        for (id, entity) in points {
            buckets[core.quadrant_of(entity.position)].insert(id, entity);
        }

        let child_buffer = buffer / self.config.buffer_divisor;
        let mut children = [handle; 4];
        for (slot, (quadrant, bucket)) in core.quadrants().into_iter().zip(buckets).enumerate() {
            let mut child = Region::new_leaf(quadrant, child_buffer, depth + 1, Some(handle));
            child.state = RegionState::Leaf { points: bucket };
            let child_handle = self.arena.alloc(child);
            if let Some(points) = self.arena.get(child_handle).and_then(Region::points) {
                for id in points.keys() {
                    self.owners.insert(*id, child_handle);
                }
            }
            children[slot] = child_handle;
        }

        if let Some(region) = self.arena.get_mut(handle) {
            region.state = RegionState::Branch { children };
        }
        true
    }

    /// Folds a branch whose children are all leaves back into a single leaf
    /// holding their union, and tombstones the children.
    pub(crate) fn merge(&mut self, handle: RegionHandle) -> bool {
        let children = match self.arena.get(handle).and_then(Region::children) {
            Some(children) => children,
            None => return false,
        };
        if self.leaf_children_total(&children).is_none() {
            return false;
        }

        let mut points = FxHashMap::default();
        for child in children {
            if let Some(Region {
                state: RegionState::Leaf {
                    points: child_points,
                },
                ..
            }) = self.arena.tombstone(child)
            {
                points.extend(child_points);
            }
        }
        for id in points.keys() {
            self.owners.insert(*id, handle);
        }

        debug!(region = %handle, points = points.len(), "merging region");

        if let Some(region) = self.arena.get_mut(handle) {
            region.state = RegionState::Leaf { points };
        }
        true
    }
}
