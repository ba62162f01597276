pub mod ids;
pub mod shapes;

pub use ids::EntityIds;
pub use shapes::{Entity, EntityId, Point, RectExtent};
