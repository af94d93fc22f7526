//! The reorderable list: local sequence, drag state machine and the single
//! change notification handed back to the host.

use crate::gesture::{DragState, DragSurface, Slot, Subscriptions};
use crate::order::Move;
use std::fmt;
use tracing::{debug, info};

pub const DEFAULT_MOVE_UP_ICON: &str = "▲";
pub const DEFAULT_MOVE_DOWN_ICON: &str = "▼";

/// Called with the full reordered sequence, once per accepted move.
pub type ChangeCallback<T> = Box<dyn FnMut(&[T]) + Send>;

/// How an item becomes display text.
pub enum Labeler<T> {
    /// `Display` of the item.
    Display,
    /// Per-item text field; falls back to `Display` when the field is absent.
    Field(Box<dyn Fn(&T) -> Option<String> + Send>),
    /// Host-supplied renderer taking the item and its index.
    Custom(Box<dyn Fn(&T, usize) -> String + Send>),
}

impl<T> Default for Labeler<T> {
    fn default() -> Self {
        Labeler::Display
    }
}

impl<T> fmt::Debug for Labeler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Labeler::Display => f.write_str("Display"),
            Labeler::Field(_) => f.write_str("Field(..)"),
            Labeler::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<T: fmt::Display> Labeler<T> {
    pub fn label(&self, item: &T, index: usize) -> String {
        match self {
            Labeler::Display => item.to_string(),
            Labeler::Field(select) => select(item).unwrap_or_else(|| item.to_string()),
            Labeler::Custom(render) => render(item, index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProps {
    pub label: Option<String>,
    /// Maximum number of item rows shown at once.
    pub max_height: Option<u16>,
    pub disabled: bool,
    pub disable_drag_and_drop: bool,
    pub remove_arrows: bool,
    pub move_up_icon: String,
    pub move_down_icon: String,
}

impl Default for ListProps {
    fn default() -> Self {
        ListProps {
            label: None,
            max_height: None,
            disabled: false,
            disable_drag_and_drop: false,
            remove_arrows: false,
            move_up_icon: DEFAULT_MOVE_UP_ICON.to_string(),
            move_down_icon: DEFAULT_MOVE_DOWN_ICON.to_string(),
        }
    }
}

impl ListProps {
    pub fn drag_enabled(&self) -> bool {
        !self.disabled && !self.disable_drag_and_drop
    }

    pub fn buttons_enabled(&self) -> bool {
        !self.disabled && !self.remove_arrows
    }
}

pub struct ReorderList<T, S: DragSurface> {
    items: Vec<T>,
    props: ListProps,
    labeler: Labeler<T>,
    drag: DragState<T>,
    // one flag per item slot, plus the end drop zone in the last position
    hover: Vec<bool>,
    surface: S,
    subs: Subscriptions,
    on_value_changed: Option<ChangeCallback<T>>,
}

impl<T, S> ReorderList<T, S>
where
    T: Clone + PartialEq + fmt::Display,
    S: DragSurface,
{
    /// A missing sequence is treated as empty.
    pub fn new(items: Option<Vec<T>>, props: ListProps, surface: S) -> Self {
        let items = items.unwrap_or_default();
        let hover = vec![false; items.len() + 1];
        ReorderList {
            items,
            props,
            labeler: Labeler::default(),
            drag: DragState::Idle,
            hover,
            surface,
            subs: Subscriptions::new(),
            on_value_changed: None,
        }
    }

    pub fn with_labeler(mut self, labeler: Labeler<T>) -> Self {
        self.labeler = labeler;
        self
    }

    pub fn on_value_changed(mut self, cb: impl FnMut(&[T]) + Send + 'static) -> Self {
        self.on_value_changed = Some(Box::new(cb));
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn props(&self) -> &ListProps {
        &self.props
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn drag_state(&self) -> &DragState<T> {
        &self.drag
    }

    pub fn label_for(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|it| self.labeler.label(it, index))
    }

    pub fn is_hovered(&self, slot: Slot) -> bool {
        self.hover_index(slot)
            .and_then(|i| self.hover.get(i).copied())
            .unwrap_or(false)
    }

    pub fn is_subscribed(&self, slot: Slot) -> bool {
        self.subs.is_live(slot)
    }

    /// Accept a host-supplied sequence.
    ///
    /// The local copy is only replaced when the host copy differs, so feeding
    /// back what was just reported keeps local state intact. Returns whether
    /// the local copy was replaced.
    pub fn set_items(&mut self, items: Option<Vec<T>>) -> bool {
        let items = items.unwrap_or_default();
        if items == self.items {
            return false;
        }
        debug!(old_len = self.items.len(), new_len = items.len(), "host replaced sequence");
        self.clear_hover();
        self.items = items;
        self.hover.resize(self.items.len() + 1, false);
        true
    }

    pub fn set_props(&mut self, props: ListProps) {
        if !props.drag_enabled() {
            if self.drag.take().is_some() {
                debug!("drag cancelled by props change");
            }
            self.clear_hover();
        }
        self.props = props;
    }

    /// Release every gesture registration, then register one per item slot
    /// plus the end drop zone. Run after every render pass that may have
    /// changed the slot set.
    pub fn resubscribe(&mut self) {
        self.hover.resize(self.items.len() + 1, false);
        if !self.props.drag_enabled() {
            self.subs.release(&mut self.surface);
            return;
        }
        let len = self.items.len();
        let end = (len > 0).then_some(Slot::End);
        let slots = (0..len).map(Slot::Item).chain(end);
        self.subs.replace(&mut self.surface, slots);
    }

    pub fn drag_start(&mut self, slot: Slot) -> bool {
        let Some(index) = slot.item_index() else {
            return false;
        };
        if !self.props.drag_enabled() || !self.subs.is_live(slot) {
            return false;
        }
        let Some(item) = self.items.get(index).cloned() else {
            return false;
        };
        if let Some(prev) = self.drag.source() {
            debug!(prev, "drag restarted without drag end");
        }
        debug!(index, "drag start");
        self.drag = DragState::Dragging {
            source: index,
            item,
        };
        true
    }

    pub fn drag_over(&mut self, slot: Slot, hovering: bool) {
        if !self.subs.is_live(slot) {
            return;
        }
        let Some(i) = self.hover_index(slot) else {
            return;
        };
        if self.hover[i] != hovering {
            self.hover[i] = hovering;
            self.surface.set_hover(slot, hovering);
        }
    }

    /// Drag ended without a drop.
    pub fn drag_end(&mut self) {
        if let Some((source, _)) = self.drag.take() {
            debug!(source, "drag cancelled");
        }
        self.clear_hover();
    }

    /// Complete the drag on `slot`. Returns the applied move, if any.
    pub fn drop_on(&mut self, slot: Slot) -> Option<Move> {
        let in_flight = self.drag.take();
        self.clear_hover();
        let (recorded, item) = in_flight?;
        if !self.subs.is_live(slot) {
            debug!(?slot, "drop on unregistered slot ignored");
            return None;
        }
        let Some(source) = self.locate(recorded, &item) else {
            debug!(recorded, "dragged item no longer present");
            return None;
        };
        let mv = Move::resolve(source, slot.placement(), self.items.len());
        self.apply(mv)
    }

    pub fn move_up(&mut self, index: usize) -> Option<Move> {
        if !self.props.buttons_enabled() {
            return None;
        }
        Move::up(index).and_then(|mv| self.apply(mv))
    }

    pub fn move_down(&mut self, index: usize) -> Option<Move> {
        if !self.props.buttons_enabled() {
            return None;
        }
        Move::down(index, self.items.len()).and_then(|mv| self.apply(mv))
    }

    fn apply(&mut self, mv: Move) -> Option<Move> {
        let Some(next) = mv.apply(&self.items) else {
            debug!(source = mv.source, target = mv.target, "move rejected");
            return None;
        };
        self.items = next;
        info!(source = mv.source, target = mv.target, "item moved");
        if let Some(cb) = self.on_value_changed.as_mut() {
            cb(&self.items);
        }
        Some(mv)
    }

    // Prefer the recorded slot; the sequence may have changed under the drag.
    fn locate(&self, recorded: usize, item: &T) -> Option<usize> {
        if self.items.get(recorded) == Some(item) {
            return Some(recorded);
        }
        self.items.iter().position(|it| it == item)
    }

    fn hover_index(&self, slot: Slot) -> Option<usize> {
        match slot {
            Slot::Item(i) if i < self.items.len() => Some(i),
            Slot::Item(_) => None,
            Slot::End => Some(self.items.len()),
        }
    }

    fn clear_hover(&mut self) {
        let len = self.items.len();
        for (i, flag) in self.hover.iter_mut().enumerate() {
            if *flag {
                *flag = false;
                let slot = if i < len { Slot::Item(i) } else { Slot::End };
                self.surface.set_hover(slot, false);
            }
        }
    }
}

impl<T, S: DragSurface> Drop for ReorderList<T, S> {
    fn drop(&mut self) {
        self.subs.release(&mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::tests::RecordingSurface;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<Vec<char>>>>;

    fn list(items: &[char], props: ListProps) -> (ReorderList<char, RecordingSurface>, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let mut l = ReorderList::new(Some(items.to_vec()), props, RecordingSurface::default())
            .on_value_changed(move |items: &[char]| sink.lock().unwrap().push(items.to_vec()));
        l.resubscribe();
        (l, log)
    }

    fn calls(log: &Log) -> usize {
        log.lock().unwrap().len()
    }

    #[test]
    fn drag_a_before_c() {
        let (mut l, log) = list(&['A', 'B', 'C', 'D'], ListProps::default());
        assert!(l.drag_start(Slot::Item(0)));
        l.drag_over(Slot::Item(2), true);
        assert!(l.is_hovered(Slot::Item(2)));
        assert_eq!(l.drop_on(Slot::Item(2)), Some(Move::new(0, 1)));
        assert_eq!(l.items(), &['B', 'A', 'C', 'D']);
        assert!(!l.is_hovered(Slot::Item(2)));
        assert!(!l.drag_state().is_dragging());
        assert_eq!(log.lock().unwrap().as_slice(), &[vec!['B', 'A', 'C', 'D']]);
    }

    #[test]
    fn drag_a_to_end_zone() {
        let (mut l, log) = list(&['A', 'B', 'C'], ListProps::default());
        l.drag_start(Slot::Item(0));
        l.drag_over(Slot::End, true);
        assert!(l.is_hovered(Slot::End));
        l.drop_on(Slot::End);
        assert_eq!(l.items(), &['B', 'C', 'A']);
        assert_eq!(calls(&log), 1);
    }

    #[test]
    fn drop_on_self_does_not_notify() {
        let (mut l, log) = list(&['A', 'B', 'C'], ListProps::default());
        l.drag_start(Slot::Item(1));
        assert_eq!(l.drop_on(Slot::Item(1)), None);
        // directly before its successor
        l.drag_start(Slot::Item(1));
        assert_eq!(l.drop_on(Slot::Item(2)), None);
        assert_eq!(calls(&log), 0);
    }

    #[test]
    fn drag_end_without_drop_cancels_silently() {
        let (mut l, log) = list(&['A', 'B'], ListProps::default());
        l.drag_start(Slot::Item(0));
        l.drag_over(Slot::Item(1), true);
        l.drag_end();
        assert!(!l.drag_state().is_dragging());
        assert!(!l.is_hovered(Slot::Item(1)));
        // a drop after cancellation has nothing in flight
        assert_eq!(l.drop_on(Slot::End), None);
        assert_eq!(calls(&log), 0);
        assert_eq!(l.surface().hover.last(), Some(&(Slot::Item(1), false)));
    }

    #[test]
    fn drag_end_after_drop_is_noop() {
        let (mut l, log) = list(&['A', 'B', 'C'], ListProps::default());
        l.drag_start(Slot::Item(2));
        l.drop_on(Slot::Item(0));
        l.drag_end();
        assert_eq!(l.items(), &['C', 'A', 'B']);
        assert_eq!(calls(&log), 1);
    }

    #[test]
    fn button_moves_and_boundaries() {
        let (mut l, log) = list(&['A', 'B', 'C'], ListProps::default());
        assert_eq!(l.move_up(0), None);
        assert_eq!(l.move_down(2), None);
        assert_eq!(l.move_down(7), None);
        assert_eq!(calls(&log), 0);

        l.move_up(2);
        assert_eq!(l.items(), &['A', 'C', 'B']);
        l.move_down(1);
        assert_eq!(l.items(), &['A', 'B', 'C']);
        assert_eq!(calls(&log), 2);
    }

    #[test]
    fn stale_drop_after_host_update_tracks_item_by_value() {
        let (mut l, log) = list(&['A', 'B', 'C', 'D'], ListProps::default());
        l.drag_start(Slot::Item(0));
        // host reorders underneath the drag
        assert!(l.set_items(Some(vec!['B', 'C', 'A', 'D'])));
        l.resubscribe();
        l.drop_on(Slot::End);
        assert_eq!(l.items(), &['B', 'C', 'D', 'A']);
        assert_eq!(calls(&log), 1);
    }

    #[test]
    fn drop_of_removed_item_is_ignored() {
        let (mut l, log) = list(&['A', 'B', 'C'], ListProps::default());
        l.drag_start(Slot::Item(0));
        l.set_items(Some(vec!['B', 'C']));
        l.resubscribe();
        assert_eq!(l.drop_on(Slot::Item(1)), None);
        assert_eq!(l.items(), &['B', 'C']);
        assert_eq!(calls(&log), 0);
    }

    #[test]
    fn drop_on_slot_out_of_range_is_ignored() {
        let (mut l, log) = list(&['A', 'B'], ListProps::default());
        l.drag_start(Slot::Item(0));
        assert_eq!(l.drop_on(Slot::Item(9)), None);
        assert_eq!(calls(&log), 0);
    }

    #[test]
    fn equal_host_update_keeps_local_order() {
        let (mut l, _log) = list(&['A', 'B', 'C'], ListProps::default());
        l.move_down(0);
        let local = l.items().to_vec();
        assert!(!l.set_items(Some(local.clone())));
        assert_eq!(l.items(), local.as_slice());
        assert!(l.set_items(Some(vec!['A', 'B', 'C'])));
        assert_eq!(l.items(), &['A', 'B', 'C']);
    }

    #[test]
    fn absent_sequence_is_empty() {
        let (mut l, log) = list(&['A'], ListProps::default());
        assert!(l.set_items(None));
        assert!(l.is_empty());
        l.resubscribe();
        assert!(l.surface().live.is_empty());
        assert_eq!(l.move_up(0), None);
        assert_eq!(calls(&log), 0);
    }

    #[test]
    fn resubscribe_covers_items_and_end_zone() {
        let (mut l, _log) = list(&['A', 'B'], ListProps::default());
        assert_eq!(l.surface().live.len(), 3);
        l.move_up(1);
        l.resubscribe();
        assert_eq!(l.surface().live.len(), 3);
        assert_eq!(l.surface().released.len(), 3);
        assert!(l.is_subscribed(Slot::End));
    }

    #[test]
    fn disabled_list_ignores_everything() {
        let props = ListProps {
            disabled: true,
            ..ListProps::default()
        };
        let (mut l, log) = list(&['A', 'B', 'C'], props);
        assert!(l.surface().live.is_empty());
        assert!(!l.drag_start(Slot::Item(0)));
        assert_eq!(l.drop_on(Slot::End), None);
        assert_eq!(l.move_down(0), None);
        assert_eq!(calls(&log), 0);
    }

    #[test]
    fn drag_disabled_keeps_buttons() {
        let props = ListProps {
            disable_drag_and_drop: true,
            ..ListProps::default()
        };
        let (mut l, log) = list(&['A', 'B'], props);
        assert!(!l.drag_start(Slot::Item(0)));
        assert!(l.move_down(0).is_some());
        assert_eq!(calls(&log), 1);
    }

    #[test]
    fn removed_arrows_disable_button_moves() {
        let props = ListProps {
            remove_arrows: true,
            ..ListProps::default()
        };
        let (mut l, log) = list(&['A', 'B'], props);
        assert_eq!(l.move_down(0), None);
        assert!(l.drag_start(Slot::Item(0)));
        assert!(l.drop_on(Slot::End).is_some());
        assert_eq!(calls(&log), 1);
    }

    #[test]
    fn disabling_drag_cancels_in_flight_drag() {
        let (mut l, _log) = list(&['A', 'B'], ListProps::default());
        l.drag_start(Slot::Item(0));
        l.set_props(ListProps {
            disable_drag_and_drop: true,
            ..ListProps::default()
        });
        l.resubscribe();
        assert!(!l.drag_state().is_dragging());
        assert!(l.surface().live.is_empty());
    }

    #[test]
    fn dropping_list_releases_registrations() {
        let released = Arc::new(Mutex::new(0usize));

        struct Counting(Arc<Mutex<usize>>, u64);
        impl DragSurface for Counting {
            fn subscribe(&mut self, slot: Slot) -> crate::gesture::Subscription {
                self.1 += 1;
                crate::gesture::Subscription { id: self.1, slot }
            }
            fn unsubscribe(&mut self, _sub: crate::gesture::Subscription) {
                *self.0.lock().unwrap() += 1;
            }
            fn set_hover(&mut self, _slot: Slot, _hovering: bool) {}
        }

        {
            let mut l = ReorderList::new(
                Some(vec!['A', 'B']),
                ListProps::default(),
                Counting(released.clone(), 0),
            );
            l.resubscribe();
        }
        assert_eq!(*released.lock().unwrap(), 3);
    }

    #[test]
    fn labeler_precedence() {
        #[derive(Clone, PartialEq)]
        struct Row {
            name: Option<&'static str>,
            id: u32,
        }
        impl fmt::Display for Row {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "row-{}", self.id)
            }
        }
        let rows = vec![Row { name: Some("alpha"), id: 1 }, Row { name: None, id: 2 }];

        let l = ReorderList::new(Some(rows.clone()), ListProps::default(), RecordingSurface::default());
        assert_eq!(l.label_for(0).as_deref(), Some("row-1"));

        let l = ReorderList::new(Some(rows.clone()), ListProps::default(), RecordingSurface::default())
            .with_labeler(Labeler::Field(Box::new(|r: &Row| r.name.map(str::to_string))));
        assert_eq!(l.label_for(0).as_deref(), Some("alpha"));
        assert_eq!(l.label_for(1).as_deref(), Some("row-2"));

        let l = ReorderList::new(Some(rows), ListProps::default(), RecordingSurface::default())
            .with_labeler(Labeler::Custom(Box::new(|r: &Row, i: usize| format!("{i}:{}", r.id))));
        assert_eq!(l.label_for(1).as_deref(), Some("1:2"));
        assert_eq!(l.label_for(5), None);
    }
}
