use super::*;

/// Owns every region. Deleting a region leaves a tombstone in its slot so
/// that all other handles keep pointing at the same region; slots are never
/// recycled.
#[derive(Debug, Default)]
pub(crate) struct RegionArena {
    slots: Vec<Option<Region>>,
    live: usize,
}

impl RegionArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    pub(crate) fn alloc(&mut self, region: Region) -> RegionHandle {
        let handle = RegionHandle(self.slots.len() as u32);
        self.slots.push(Some(region));
        self.live += 1;
        handle
    }

    #[inline(always)]
    pub(crate) fn get(&self, handle: RegionHandle) -> Option<&Region> {
        self.slots.get(handle.0 as usize).and_then(Option::as_ref)
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, handle: RegionHandle) -> Option<&mut Region> {
        self.slots.get_mut(handle.0 as usize).and_then(Option::as_mut)
    }

    #[cfg(test)]
    pub(crate) fn is_live(&self, handle: RegionHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Marks the slot dead and hands back what it held.
    pub(crate) fn tombstone(&mut self, handle: RegionHandle) -> Option<Region> {
        let region = self.slots.get_mut(handle.0 as usize)?.take()?;
        self.live -= 1;
        Some(region)
    }

    pub(crate) fn live_len(&self) -> usize {
        self.live
    }

    pub(crate) fn slot_len(&self) -> usize {
        self.slots.len()
    }

    /// Live regions in ascending handle order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (RegionHandle, &Region)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|region| (RegionHandle(idx as u32), region)))
    }

    pub(crate) fn leaves(&self) -> impl Iterator<Item = (RegionHandle, &Region)> + '_ {
        self.iter().filter(|(_, region)| region.is_leaf())
    }
}
