use crate::gesture::Slot;
use crate::list::ListProps;
use crate::ui::model::Model;
use crate::ui::render::styles::{
    STYLE_ARROW, STYLE_ARROW_OFF, STYLE_CURSOR, STYLE_DISABLED, STYLE_DRAGGED, STYLE_DROP,
    STYLE_LABEL, STYLE_LINENUM,
};
use crate::ui::render::util::{display_width, fit, normalize_and_pad, single_line};
use std::ops::Range;

const GRIP_WIDTH: usize = 2;

/// Screen columns of the move-up / move-down buttons on every item row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowColumns {
    pub up: Range<usize>,
    pub down: Range<usize>,
}

impl ArrowColumns {
    pub fn width(&self) -> usize {
        // leading, middle and trailing space
        self.up.len() + self.down.len() + 3
    }
}

// Arrows sit flush right as " ▲ ▼ ".
pub fn arrow_columns(props: &ListProps, total_width: usize) -> Option<ArrowColumns> {
    if props.remove_arrows {
        return None;
    }
    let up_w = display_width(&props.move_up_icon);
    let down_w = display_width(&props.move_down_icon);
    let width = up_w + down_w + 3;
    if total_width < width {
        return None;
    }
    let start = total_width - width;
    let up = start + 1..start + 1 + up_w;
    let down = up.end + 1..up.end + 1 + down_w;
    Some(ArrowColumns { up, down })
}

fn compute_gutter_width(total: usize) -> usize {
    if total == 0 {
        return 1;
    }
    let gw = ((total as f64).log10().floor() as usize) + 1;
    usize::max(gw, 3)
}

// "  3 │ " normally, "  3 ▶ " when a drag would insert before this row
fn render_gutter(num: usize, gutter_width: usize, drop_here: bool) -> String {
    if drop_here {
        let num_str = format!("{:>1$} ", num, gutter_width);
        format!("{}{}", STYLE_LINENUM.render(&num_str), STYLE_DROP.render("▶ "))
    } else {
        STYLE_LINENUM.render(&format!("{:>1$} │ ", num, gutter_width))
    }
}

fn render_grip(m: &Model, idx: usize) -> String {
    if idx == m.cursor {
        STYLE_CURSOR.render("› ")
    } else if m.list.props().drag_enabled() {
        STYLE_LINENUM.render("≡ ")
    } else {
        "  ".to_string()
    }
}

fn render_arrows(props: &ListProps, idx: usize, len: usize) -> String {
    let up_off = props.disabled || idx == 0;
    let down_off = props.disabled || idx + 1 >= len;
    let style = |off: bool| if off { &*STYLE_ARROW_OFF } else { &*STYLE_ARROW };
    format!(
        " {} {} ",
        style(up_off).render(&single_line(&props.move_up_icon)),
        style(down_off).render(&single_line(&props.move_down_icon))
    )
}

// Render a single item row at exactly `total_width` plain columns.
fn render_item_line(m: &Model, idx: usize, gutter_width: usize, total_width: usize) -> String {
    let props = m.list.props();
    let arrows = arrow_columns(props, total_width);
    let arrows_w = arrows.as_ref().map_or(0, ArrowColumns::width);
    let label_width = total_width.saturating_sub(gutter_width + 3 + GRIP_WIDTH + arrows_w);

    let label = m.list.label_for(idx).unwrap_or_default();
    let label = fit(&label, label_width);
    let label_style = if props.disabled {
        &*STYLE_DISABLED
    } else if m.list.drag_state().source() == Some(idx) {
        &*STYLE_DRAGGED
    } else if idx == m.cursor {
        &*STYLE_CURSOR
    } else {
        &*STYLE_LABEL
    };

    let drop_here = m.list.surface().is_hovered(Slot::Item(idx));
    let mut line = render_gutter(idx + 1, gutter_width, drop_here);
    line.push_str(&render_grip(m, idx));
    line.push_str(&label_style.render(&label));
    if arrows.is_some() {
        line.push_str(&render_arrows(props, idx, m.list.len()));
    }
    line
}

// The virtual row after the last item; only labelled while a drag is active.
fn render_drop_zone(m: &Model, gutter_width: usize, total_width: usize) -> String {
    if !m.is_dragging() {
        return String::new();
    }
    let indent = " ".repeat(gutter_width + 3);
    let text = fit("⤓ move to end", total_width.saturating_sub(indent.len()));
    let style = if m.list.surface().is_hovered(Slot::End) {
        &*STYLE_DROP
    } else {
        &*STYLE_DISABLED
    };
    format!("{indent}{}", style.render(&text))
}

pub fn render_list_content(m: &Model) -> String {
    let total_width = m.total_width();
    if m.list.is_empty() {
        return STYLE_DISABLED.render("(no items)");
    }
    let gutter_width = compute_gutter_width(m.list.len());
    let mut lines: Vec<String> = m
        .visible_range()
        .map(|idx| render_item_line(m, idx, gutter_width, total_width))
        .collect();
    lines.push(render_drop_zone(m, gutter_width, total_width));
    lines.join("\n")
}

pub fn render_main_content(m: &Model) -> String {
    let block = m.render_list_content();
    let lines: Vec<String> = block.split('\n').map(|s| s.to_string()).collect();
    // Ensure we return exactly `body_lines` lines each normalized to the terminal width.
    normalize_and_pad(lines, m.total_width(), m.body_lines())
}
