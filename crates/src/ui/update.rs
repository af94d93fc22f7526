use crate::gesture::Slot;
use crate::order::Move;
use crate::ui::model::Model;
use crate::ui::render::arrow_columns;
use tracing::trace;

pub fn handle_update(m: &mut Model, msg: crate::ui::Msg) {
    trace!(?msg, "update");
    match msg {
        crate::ui::Msg::WindowSize { width, height } => handle_window_size(m, width, height),
        crate::ui::Msg::KeyUp => handle_key_up(m),
        crate::ui::Msg::KeyDown => handle_key_down(m),
        crate::ui::Msg::MoveUp => handle_move_up(m),
        crate::ui::Msg::MoveDown => handle_move_down(m),
        crate::ui::Msg::KeySpace => handle_key_space(m),
        crate::ui::Msg::KeyEnter => handle_key_enter(m),
        crate::ui::Msg::KeyEsc => handle_key_esc(m),
        crate::ui::Msg::MouseDown { x, y } => handle_mouse_down(m, x, y),
        crate::ui::Msg::MouseDrag { y, .. } => handle_mouse_drag(m, y),
        crate::ui::Msg::MouseUp { y, .. } => handle_mouse_up(m, y),
    }
    m.sync_from_host();
    m.relayout();
}

fn handle_window_size(m: &mut Model, width: usize, height: usize) {
    m.screen_width = width;
    m.screen_height = height;
}

fn handle_key_up(m: &mut Model) {
    if m.cursor > 0 {
        m.cursor -= 1;
    }
    follow_cursor(m);
}

fn handle_key_down(m: &mut Model) {
    if m.cursor < m.max_cursor() {
        m.cursor += 1;
    }
    follow_cursor(m);
}

// keyboard drags hover whatever the cursor points at
fn follow_cursor(m: &mut Model) {
    if m.is_dragging() {
        let slot = m.cursor_slot();
        m.hover_to(Some(slot));
    }
}

fn handle_move_up(m: &mut Model) {
    if m.is_dragging() {
        return;
    }
    let moved = m.list.move_up(m.cursor);
    record(m, moved);
}

fn handle_move_down(m: &mut Model) {
    if m.is_dragging() {
        return;
    }
    let moved = m.list.move_down(m.cursor);
    record(m, moved);
}

fn handle_key_space(m: &mut Model) {
    if m.is_dragging() {
        let slot = m.cursor_slot();
        drop_at(m, Some(slot));
        return;
    }
    if m.list.drag_start(Slot::Item(m.cursor)) {
        m.hover_to(Some(Slot::Item(m.cursor)));
    }
}

fn handle_key_enter(m: &mut Model) {
    if m.is_dragging() {
        handle_key_space(m);
        return;
    }
    m.confirmed = true;
}

fn handle_key_esc(m: &mut Model) {
    if m.is_dragging() {
        cancel_drag(m);
        return;
    }
    m.quit = true;
}

fn handle_mouse_down(m: &mut Model, x: u16, y: u16) {
    let Some(Slot::Item(idx)) = m.list.surface().slot_at(y) else {
        return;
    };
    m.cursor = idx;
    if let Some(cols) = arrow_columns(m.list.props(), m.total_width()) {
        let col = usize::from(x);
        if cols.up.contains(&col) {
            let moved = m.list.move_up(idx);
            record(m, moved);
            return;
        }
        if cols.down.contains(&col) {
            let moved = m.list.move_down(idx);
            record(m, moved);
            return;
        }
    }
    if m.list.drag_start(Slot::Item(idx)) {
        m.hover_to(Some(Slot::Item(idx)));
    }
}

fn handle_mouse_drag(m: &mut Model, y: u16) {
    if !m.is_dragging() {
        return;
    }
    let target = m.list.surface().drop_target_at(y);
    m.hover_to(target);
    if let Some(slot) = target {
        m.cursor = slot.item_index().unwrap_or(m.list.len());
    }
}

fn handle_mouse_up(m: &mut Model, y: u16) {
    if !m.is_dragging() {
        return;
    }
    let target = m.list.surface().drop_target_at(y);
    drop_at(m, target);
}

fn drop_at(m: &mut Model, target: Option<Slot>) {
    m.pointer = None;
    match target {
        Some(slot) => {
            let source = m.list.drag_state().source();
            let moved = m.list.drop_on(slot);
            if moved.is_none() {
                // dropped in place: keep the selection on the item
                m.cursor = source.unwrap_or(m.cursor);
            }
            record(m, moved);
        }
        None => cancel_drag(m),
    }
}

fn cancel_drag(m: &mut Model) {
    let source = m.list.drag_state().source();
    m.pointer = None;
    m.list.drag_end();
    if let Some(src) = source {
        m.cursor = src;
    }
}

fn record(m: &mut Model, moved: Option<Move>) {
    if let Some(mv) = moved {
        m.cursor = mv.target;
        m.changes += 1;
    }
}
