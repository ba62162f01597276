pub mod error;
pub mod quadtree;

pub use common::shapes;
pub use common::shapes::{Entity, EntityId, Point, RectExtent};
pub use error::{QuadtreeError, QuadtreeResult};
pub use quadtree::{Config, QuadTree, RegionHandle, RegionInfo, RegionKind, RelocationRequest};
