use crate::gesture::{DragSurface, Slot, Subscription};
use std::collections::{HashMap, HashSet};

/// Terminal implementation of [`DragSurface`].
///
/// Each render pass publishes which screen row shows which slot. A row only
/// accepts drops while its slot holds a live subscription, so handlers from a
/// previous layout can never be hit.
#[derive(Debug, Default)]
pub struct TermSurface {
    rows: Vec<(u16, Slot)>,
    live: HashMap<u64, Slot>,
    hover: HashSet<Slot>,
    next_id: u64,
}

impl TermSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_layout(&mut self, rows: Vec<(u16, Slot)>) {
        self.rows = rows;
    }

    pub fn layout(&self) -> &[(u16, Slot)] {
        &self.rows
    }

    pub fn row_of(&self, slot: Slot) -> Option<u16> {
        self.rows.iter().find(|(_, s)| *s == slot).map(|(r, _)| *r)
    }

    /// Slot rendered on `row`, regardless of drag registration.
    pub fn slot_at(&self, row: u16) -> Option<Slot> {
        self.rows.iter().find(|(r, _)| *r == row).map(|(_, s)| *s)
    }

    /// Slot on `row` that currently accepts a drop.
    pub fn drop_target_at(&self, row: u16) -> Option<Slot> {
        let slot = self.slot_at(row)?;
        self.live.values().any(|s| *s == slot).then_some(slot)
    }

    pub fn is_hovered(&self, slot: Slot) -> bool {
        self.hover.contains(&slot)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl DragSurface for TermSurface {
    fn subscribe(&mut self, slot: Slot) -> Subscription {
        self.next_id += 1;
        self.live.insert(self.next_id, slot);
        Subscription {
            id: self.next_id,
            slot,
        }
    }

    fn unsubscribe(&mut self, sub: Subscription) {
        self.live.remove(&sub.id);
    }

    fn set_hover(&mut self, slot: Slot, hovering: bool) {
        if hovering {
            self.hover.insert(slot);
        } else {
            self.hover.remove(&slot);
        }
    }
}
