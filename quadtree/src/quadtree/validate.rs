use super::api::RegionStack;
use super::*;

impl QuadTree {
    /// Checks the structural invariants of the whole tree: the root spans the
    /// world, branch children tile their parent and link back to it, every
    /// live region is reachable from the root, and every tracked entity sits
    /// in exactly one live leaf.
    pub fn validate(&self) -> QuadtreeResult<()> {
        let root = self
            .arena
            .get(self.root)
            .ok_or_else(|| violation(self.root, "root is tombstoned"))?;
        if root.core != self.world {
            return Err(violation(self.root, "root does not span the world"));
        }
        if root.parent.is_some() {
            return Err(violation(self.root, "root has a parent"));
        }

        let mut visited = vec![false; self.arena.slot_len()];
        let mut assigned = 0usize;
        let mut stack = RegionStack::new();
        stack.push(self.root);
        while let Some(handle) = stack.pop() {
            let seen = &mut visited[handle.0 as usize];
            if *seen {
                return Err(violation(handle, "region reachable twice"));
            }
            *seen = true;

            let region = self
                .arena
                .get(handle)
                .ok_or_else(|| violation(handle, "branch child is tombstoned"))?;
            match &region.state {
                RegionState::Leaf { points } => {
                    for (id, entity) in points {
                        if *id != entity.id {
                            return Err(violation(handle, "point stored under wrong id"));
                        }
                        if self.owners.get(id) != Some(&handle) {
                            return Err(violation(handle, "point not owned by its leaf"));
                        }
                    }
                    assigned += points.len();
                }
                RegionState::Branch { children } => {
                    self.check_tiling(handle, region, children)?;
                    stack.extend(children.iter().copied());
                }
            }
        }

        if visited.iter().filter(|seen| **seen).count() != self.arena.live_len() {
            return Err(violation(self.root, "live region unreachable from root"));
        }
        // Each owner entry points at a leaf that holds the id, so equal
        // totals mean no entity is held twice.
        if assigned != self.owners.len() {
            return Err(violation(self.root, "entity assigned to more than one leaf"));
        }
        Ok(())
    }

    fn check_tiling(
        &self,
        handle: RegionHandle,
        region: &Region,
        children: &[RegionHandle; 4],
    ) -> QuadtreeResult<()> {
        let quadrants = region.core.quadrants();
        let mut area = 0.0;
        for (child, quadrant) in children.iter().zip(quadrants.iter()) {
            let child_region = self
                .arena
                .get(*child)
                .ok_or_else(|| violation(*child, "branch child is tombstoned"))?;
            if child_region.parent != Some(handle) {
                return Err(violation(*child, "child does not link back to parent"));
            }
            if child_region.depth != region.depth + 1 {
                return Err(violation(*child, "child depth is not parent depth + 1"));
            }
            if child_region.core != *quadrant {
                return Err(violation(*child, "child core is not its parent quadrant"));
            }
            area += child_region.core.area();
        }
        for i in 0..4 {
            for j in (i + 1)..4 {
                if quadrants[i].overlap_area(&quadrants[j]) > 0.0 {
                    return Err(violation(handle, "children overlap"));
                }
            }
        }
        let expected = region.core.area();
        if (area - expected).abs() > expected * 1e-5 {
            return Err(violation(handle, "children do not cover parent"));
        }
        Ok(())
    }
}

fn violation(region: RegionHandle, reason: &'static str) -> QuadtreeError {
    QuadtreeError::InvariantViolation {
        region: region.0,
        reason,
    }
}
