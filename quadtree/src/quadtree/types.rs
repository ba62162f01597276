use super::*;
use std::fmt;

/// Stable index of a region in the arena. Handles are never reused, so a
/// stale handle can only ever resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionHandle(pub(crate) u32);

impl RegionHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Leaf,
    Branch,
}

#[derive(Debug, Clone)]
pub(crate) enum RegionState {
    Leaf {
        points: FxHashMap<EntityId, Entity>,
    },
    /// Top-left, top-right, bottom-left, bottom-right.
    Branch { children: [RegionHandle; 4] },
}

#[derive(Debug, Clone)]
pub(crate) struct Region {
    pub(crate) core: RectExtent,
    pub(crate) buffer: f32,
    pub(crate) depth: u32,
    pub(crate) parent: Option<RegionHandle>,
    pub(crate) state: RegionState,
}

impl Region {
    pub(crate) fn new_leaf(
        core: RectExtent,
        buffer: f32,
        depth: u32,
        parent: Option<RegionHandle>,
    ) -> Self {
        Self {
            core,
            buffer,
            depth,
            parent,
            state: RegionState::Leaf {
                points: FxHashMap::default(),
            },
        }
    }

    #[inline(always)]
    pub(crate) fn kind(&self) -> RegionKind {
        match self.state {
            RegionState::Leaf { .. } => RegionKind::Leaf,
            RegionState::Branch { .. } => RegionKind::Branch,
        }
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.state, RegionState::Leaf { .. })
    }

    #[inline(always)]
    pub(crate) fn point_count(&self) -> usize {
        match &self.state {
            RegionState::Leaf { points } => points.len(),
            RegionState::Branch { .. } => 0,
        }
    }

    pub(crate) fn points(&self) -> Option<&FxHashMap<EntityId, Entity>> {
        match &self.state {
            RegionState::Leaf { points } => Some(points),
            RegionState::Branch { .. } => None,
        }
    }

    pub(crate) fn points_mut(&mut self) -> Option<&mut FxHashMap<EntityId, Entity>> {
        match &mut self.state {
            RegionState::Leaf { points } => Some(points),
            RegionState::Branch { .. } => None,
        }
    }

    pub(crate) fn children(&self) -> Option<[RegionHandle; 4]> {
        match self.state {
            RegionState::Branch { children } => Some(children),
            RegionState::Leaf { .. } => None,
        }
    }

    /// Core rectangle grown by the elastic buffer on every side.
    #[inline(always)]
    pub(crate) fn contains_buffered(&self, point: Point) -> bool {
        self.core.expanded(self.buffer).contains_point(point)
    }

    #[inline(always)]
    pub(crate) fn center_distance_sq(&self, point: Point) -> f32 {
        self.core.center().distance_sq(point)
    }

    /// A split needs room to subdivide: below the depth limit and with a
    /// midpoint strictly inside the core on both axes.
    pub(crate) fn can_split(&self, max_depth: u32) -> bool {
        self.depth < max_depth && self.core.quadrants().iter().all(RectExtent::is_valid)
    }

    pub(crate) fn info(&self, handle: RegionHandle) -> RegionInfo {
        RegionInfo {
            handle,
            core: self.core,
            buffer: self.buffer,
            depth: self.depth,
            kind: self.kind(),
            point_count: self.point_count(),
            parent: self.parent,
        }
    }
}

/// Read-only snapshot of a region, for visualization and debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionInfo {
    pub handle: RegionHandle,
    pub core: RectExtent,
    pub buffer: f32,
    pub depth: u32,
    pub kind: RegionKind,
    pub point_count: usize,
    pub parent: Option<RegionHandle>,
}

#[derive(Debug, Clone, Copy)]
pub struct RelocationRequest {
    pub id: EntityId,
    pub position: Point,
}

impl RelocationRequest {
    pub fn new(id: EntityId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(core: RectExtent, buffer: f32) -> Region {
        Region::new_leaf(core, buffer, 0, None)
    }

    #[test]
    fn new_leaf_is_empty_leaf() {
        let region = leaf(RectExtent::new(0.0, 0.0, 10.0, 10.0), 1.0);
        assert_eq!(region.kind(), RegionKind::Leaf);
        assert_eq!(region.point_count(), 0);
        assert!(region.children().is_none());
        assert!(region.points().is_some());
    }

    #[test]
    fn buffered_containment_extends_core() {
        let region = leaf(RectExtent::new(0.0, 0.0, 10.0, 10.0), 2.0);
        assert!(!region.core.contains_point(Point::new(11.0, 5.0)));
        assert!(region.contains_buffered(Point::new(11.0, 5.0)));
        assert!(region.contains_buffered(Point::new(-2.0, -2.0)));
        assert!(!region.contains_buffered(Point::new(12.0, 5.0)));
    }

    #[test]
    fn zero_buffer_matches_core() {
        let region = leaf(RectExtent::new(0.0, 0.0, 10.0, 10.0), 0.0);
        for p in [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(9.5, 9.5),
            Point::new(-0.1, 3.0),
        ] {
            assert_eq!(region.core.contains_point(p), region.contains_buffered(p));
        }
    }

    #[test]
    fn center_distance_uses_geometric_center() {
        let region = leaf(RectExtent::new(0.0, 0.0, 10.0, 20.0), 0.0);
        assert_eq!(region.center_distance_sq(Point::new(5.0, 10.0)), 0.0);
        assert_eq!(region.center_distance_sq(Point::new(8.0, 14.0)), 25.0);
    }

    #[test]
    fn can_split_respects_depth_limit() {
        let mut region = leaf(RectExtent::new(0.0, 0.0, 10.0, 10.0), 0.0);
        assert!(region.can_split(4));
        region.depth = 4;
        assert!(!region.can_split(4));
    }

    #[test]
    fn branch_reports_no_points() {
        let mut region = leaf(RectExtent::new(0.0, 0.0, 10.0, 10.0), 0.0);
        region.state = RegionState::Branch {
            children: [
                RegionHandle(1),
                RegionHandle(2),
                RegionHandle(3),
                RegionHandle(4),
            ],
        };
        assert_eq!(region.kind(), RegionKind::Branch);
        assert_eq!(region.point_count(), 0);
        assert!(region.points_mut().is_none());
        assert_eq!(region.children().map(|c| c[2]), Some(RegionHandle(3)));
    }
}
