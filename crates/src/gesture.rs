//! Toolkit-neutral drag-and-drop plumbing.
//!
//! A toolkit renders one slot per item plus a trailing drop zone and reports
//! gestures against those slots. The list adapter only talks to the toolkit
//! through [`DragSurface`].

use crate::order::Placement;

/// One rendered, interactive position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Item(usize),
    /// Virtual drop zone after the last item.
    End,
}

impl Slot {
    pub fn placement(self) -> Placement {
        match self {
            Slot::Item(i) => Placement::Before(i),
            Slot::End => Placement::End,
        }
    }

    pub fn item_index(self) -> Option<usize> {
        match self {
            Slot::Item(i) => Some(i),
            Slot::End => None,
        }
    }
}

/// Handle for one live gesture registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub id: u64,
    pub slot: Slot,
}

pub trait DragSurface {
    /// Attach drag-start/drop/drag-end handling to `slot`.
    fn subscribe(&mut self, slot: Slot) -> Subscription;

    fn unsubscribe(&mut self, sub: Subscription);

    /// Visual "a drag is hovering here" feedback. No effect on move logic.
    fn set_hover(&mut self, slot: Slot, hovering: bool);
}

/// The set of registrations acquired for the current render pass.
///
/// `replace` releases every prior registration before acquiring the new ones,
/// so a slot never has two live registrations at once.
#[derive(Debug, Default)]
pub struct Subscriptions {
    live: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace<S, I>(&mut self, surface: &mut S, slots: I)
    where
        S: DragSurface + ?Sized,
        I: IntoIterator<Item = Slot>,
    {
        self.release(surface);
        self.live = slots.into_iter().map(|s| surface.subscribe(s)).collect();
    }

    pub fn release<S: DragSurface + ?Sized>(&mut self, surface: &mut S) {
        // release newest first, mirroring acquisition order
        while let Some(sub) = self.live.pop() {
            surface.unsubscribe(sub);
        }
    }

    pub fn is_live(&self, slot: Slot) -> bool {
        self.live.iter().any(|s| s.slot == slot)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Single-slot drag state: at most one item is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState<T> {
    Idle,
    Dragging { source: usize, item: T },
}

impl<T> Default for DragState<T> {
    fn default() -> Self {
        DragState::Idle
    }
}

impl<T> DragState<T> {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn source(&self) -> Option<usize> {
        match self {
            DragState::Dragging { source, .. } => Some(*source),
            DragState::Idle => None,
        }
    }

    /// Leave the dragging state, returning what was in flight.
    pub fn take(&mut self) -> Option<(usize, T)> {
        match std::mem::replace(self, DragState::Idle) {
            DragState::Dragging { source, item } => Some((source, item)),
            DragState::Idle => None,
        }
    }
}
