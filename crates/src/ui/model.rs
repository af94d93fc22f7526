use crate::gesture::Slot;
use crate::list::{Labeler, ListProps, ReorderList};
use crate::source::Entry;
use crate::ui::surface::TermSurface;
use std::ops::Range;
use std::sync::{Arc, Mutex};

// small constants reused by rendering code
pub const MODELINE_LINES: usize = 1;
pub const DROP_ZONE_LINES: usize = 1;
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;

pub type EntryList = ReorderList<Entry, TermSurface>;

pub struct Model {
    pub list: EntryList,
    // host-side copy, written by the change callback and fed back after each update
    pub host: Arc<Mutex<Vec<Entry>>>,
    pub cursor: usize,
    // index of the first visible item
    pub offset: usize,
    pub screen_width: usize,
    pub screen_height: usize,
    // slot currently hovered by an active drag
    pub pointer: Option<Slot>,
    pub changes: usize,
    pub confirmed: bool,
    pub quit: bool,
}

pub fn initial_model(items: Vec<Entry>, props: ListProps, text_field: Option<String>) -> Model {
    let host = Arc::new(Mutex::new(items.clone()));
    let sink = host.clone();
    let labeler = match text_field {
        Some(name) => Labeler::Field(Box::new(move |e: &Entry| e.field(&name))),
        None => Labeler::Display,
    };
    let list = ReorderList::new(Some(items), props, TermSurface::new())
        .with_labeler(labeler)
        .on_value_changed(move |items: &[Entry]| match sink.lock() {
            Ok(mut h) => *h = items.to_vec(),
            Err(poisoned) => *poisoned.into_inner() = items.to_vec(),
        });
    let mut m = Model {
        list,
        host,
        cursor: 0,
        offset: 0,
        screen_width: DEFAULT_WIDTH,
        screen_height: DEFAULT_HEIGHT,
        pointer: None,
        changes: 0,
        confirmed: false,
        quit: false,
    };
    m.relayout();
    m
}

impl Model {
    // wrapper update that delegates to the update module
    pub fn update(&mut self, msg: crate::ui::Msg) {
        crate::ui::update::handle_update(self, msg);
    }

    pub fn mode(&self) -> String {
        if self.list.props().disabled {
            return "disabled".to_string();
        }
        if self.is_dragging() {
            return "dragging".to_string();
        }
        "rearrange".to_string()
    }

    pub fn is_dragging(&self) -> bool {
        self.list.drag_state().is_dragging()
    }

    pub fn total_width(&self) -> usize {
        if self.screen_width > 0 {
            self.screen_width
        } else {
            DEFAULT_WIDTH
        }
    }

    pub fn header_lines(&self) -> usize {
        usize::from(self.list.props().label.is_some())
    }

    /// Lines between the header and the modeline.
    pub fn body_lines(&self) -> usize {
        self.screen_height
            .saturating_sub(self.header_lines() + MODELINE_LINES)
    }

    /// Item rows that fit, honoring `max_height`. Never zero.
    pub fn list_rows(&self) -> usize {
        let avail = self.body_lines().saturating_sub(DROP_ZONE_LINES).max(1);
        match self.list.props().max_height {
            Some(max) => avail.min(usize::from(max).max(1)),
            None => avail,
        }
    }

    pub fn visible_range(&self) -> Range<usize> {
        let end = usize::min(self.offset + self.list_rows(), self.list.len());
        self.offset.min(end)..end
    }

    /// The slot the cursor points at. Past the last item only while dragging.
    pub fn cursor_slot(&self) -> Slot {
        if self.cursor >= self.list.len() {
            Slot::End
        } else {
            Slot::Item(self.cursor)
        }
    }

    pub fn max_cursor(&self) -> usize {
        let len = self.list.len();
        if self.is_dragging() {
            len
        } else {
            len.saturating_sub(1)
        }
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.max_cursor());
    }

    fn scroll_to_cursor(&mut self) {
        let len = self.list.len();
        let rows = self.list_rows();
        let target = self.cursor.min(len.saturating_sub(1));
        if target < self.offset {
            self.offset = target;
        } else if target >= self.offset + rows {
            self.offset = target + 1 - rows;
        }
        // never leave blank rows above the tail
        self.offset = self.offset.min(len.saturating_sub(rows));
    }

    /// Screen rows for every rendered slot in this pass.
    pub fn layout(&self) -> Vec<(u16, Slot)> {
        let top = self.header_lines();
        let range = self.visible_range();
        let shown = range.len();
        let mut rows: Vec<(u16, Slot)> = range
            .enumerate()
            .map(|(pos, idx)| (to_row(top + pos), Slot::Item(idx)))
            .collect();
        if !self.list.is_empty() {
            rows.push((to_row(top + shown), Slot::End));
        }
        rows
    }

    /// Recompute the slot layout and swap gesture registrations over to it.
    pub fn relayout(&mut self) {
        self.clamp_cursor();
        self.scroll_to_cursor();
        let rows = self.layout();
        self.list.surface_mut().set_layout(rows);
        self.list.resubscribe();
    }

    /// Feed the host copy back in, as a host re-rendering with its state would.
    pub fn sync_from_host(&mut self) {
        let host = match self.host.lock() {
            Ok(h) => h.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if self.list.set_items(Some(host)) {
            self.pointer = None;
        }
    }

    /// Move the hover highlight to `slot`, leaving the previous one.
    pub fn hover_to(&mut self, slot: Option<Slot>) {
        if self.pointer == slot {
            return;
        }
        if let Some(prev) = self.pointer.take() {
            self.list.drag_over(prev, false);
        }
        if let Some(next) = slot {
            self.list.drag_over(next, true);
            self.pointer = Some(next);
        }
    }

    pub fn result(&self) -> Vec<Entry> {
        self.list.items().to_vec()
    }

    // Render helper wrappers that forward to the render module to keep this file focused on state.
    pub fn render_header(&self) -> Vec<String> {
        crate::ui::render::render_header(self)
    }
    pub fn render_list_content(&self) -> String {
        crate::ui::render::render_list_content(self)
    }
    pub fn render_main_content(&self) -> String {
        crate::ui::render::render_main_content(self)
    }
    pub fn render_full(&self) -> String {
        crate::ui::render::render_full(self)
    }
}

fn to_row(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
