use super::*;
use tracing::trace;

impl QuadTree {
    pub fn relocate_batch(&mut self, relocation_requests: &[RelocationRequest]) -> QuadtreeResult<()> {
        for request in relocation_requests {
            self.relocate(request.id, request.position)?;
        }
        Ok(())
    }

    /// Pushes a new position for `id` into the index.
    ///
    /// An entity stays in its current leaf while the position is inside that
    /// leaf's core or its elastic buffer. Once it leaves both, it moves to
    /// the leaf whose center is closest. That fallback is approximate: the
    /// chosen leaf need not contain the point, and a point that drifted out
    /// of the world still lands in some leaf.
    ///
    /// An untracked `id` goes straight to the fallback and becomes tracked.
    pub fn relocate(&mut self, id: EntityId, position: Point) -> QuadtreeResult<RegionHandle> {
        let entity = Entity { id, position };
        let current = self.owners.get(&id).copied();

        if let Some(current) = current {
            if let Some(region) = self.arena.get_mut(current) {
                let keep = region.core.contains_point(position) || region.contains_buffered(position);
                if keep {
                    if let Some(points) = region.points_mut() {
                        points.insert(id, entity);
                        return Ok(current);
                    }
                }
            }
        }

        let nearest = self
            .nearest_leaf(position)
            .ok_or(QuadtreeError::NoRegionAvailable { id })?;
        trace!(
            id,
            x = position.x,
            y = position.y,
            from = ?current,
            to = %nearest,
            "reassigning entity to nearest region"
        );
        if let Some(current) = current {
            if current != nearest {
                self.detach(id, current);
            }
        }
        self.attach(nearest, entity);
        Ok(nearest)
    }

    /// Live leaf whose geometric center is closest to `point`; ties go to the
    /// lowest handle.
    pub(crate) fn nearest_leaf(&self, point: Point) -> Option<RegionHandle> {
        self.arena
            .leaves()
            .map(|(handle, region)| (handle, region.center_distance_sq(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _)| handle)
    }
}
