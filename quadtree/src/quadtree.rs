//! Adaptive quadtree with elastic region boundaries.
//!
//! Regions live in an arena and refer to each other by [`RegionHandle`].
//! Leaves hold entities; branches hold exactly four children that tile the
//! branch's core rectangle. Leaves split when they grow past
//! `max_points` and sibling leaves merge back when their combined count
//! drops below `min_points`.
//!
//! A simulation tick is: relocate every moved entity, then [`QuadTree::converge`].
//! Nothing here is thread-safe; callers serialize all mutation for a tick.

use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::{Entity, EntityId, Point, RectExtent};
use fxhash::FxHashMap;

mod api;
mod config;
mod core;
mod maintenance;
mod storage;
mod types;
mod update_entities;
mod validate;

pub use config::Config;
pub use types::{RegionHandle, RegionInfo, RegionKind, RelocationRequest};

use storage::RegionArena;
use types::{Region, RegionState};

pub struct QuadTree {
    world: RectExtent,
    config: Config,
    arena: RegionArena,
    root: RegionHandle,
    owners: FxHashMap<EntityId, RegionHandle>,
}

impl std::fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadTree")
            .field("world", &self.world)
            .field("config", &self.config)
            .field("root", &self.root)
            .field("regions", &self.arena.live_len())
            .field("entities", &self.owners.len())
            .finish()
    }
}
