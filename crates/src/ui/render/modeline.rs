use crate::ui::model::Model;
use crate::ui::render::styles::STYLE_MODELINE;
use crate::ui::render::util::display_width;
use lipgloss::Color;

const IDLE_KEYS: [(&str, &str); 5] = [
    ("↑↓", "select"),
    ("␣", "grab"),
    ("K/J", "move"),
    ("⏎", "done"),
    ("⎋", "quit"),
];
const DRAG_KEYS: [(&str, &str); 3] = [("↑↓", "target"), ("␣", "drop"), ("⎋", "cancel")];

fn position(m: &Model) -> String {
    let len = m.list.len();
    if len == 0 {
        return "empty".to_string();
    }
    if m.cursor >= len {
        return format!("End/{len}");
    }
    format!("Item {}/{}", m.cursor + 1, len)
}

/// One modeline row of exactly `width` columns when the mode block fits.
pub fn render_modeline(m: &Model, width: usize, mode: &str) -> String {
    // prepare inner styles without padding so spacing is under our control
    let inner_style = STYLE_MODELINE.clone().padding(0, 0, 0, 0);
    let key_style = STYLE_MODELINE
        .clone()
        .foreground(Color::from_rgb(238, 0, 238))
        .bold(true)
        .padding(0, 0, 0, 0);
    let desc_style = STYLE_MODELINE.clone().padding(0, 0, 0, 0);
    let pos_style = STYLE_MODELINE.clone().faint(true).padding(0, 0, 0, 0);

    let pairs_def: &[(&str, &str)] = if m.list.props().disabled {
        &IDLE_KEYS[..1]
    } else if m.is_dragging() {
        &DRAG_KEYS
    } else {
        &IDLE_KEYS
    };

    // rendered pair and its plain width
    let pairs: Vec<(String, usize)> = pairs_def
        .iter()
        .map(|(k, d)| {
            let plain_len = display_width(d) + 1 + display_width(k);
            let rendered = format!(
                "{}{}{}",
                desc_style.render(d),
                inner_style.render(":"),
                key_style.render(k)
            );
            (rendered, plain_len)
        })
        .collect();
    let pair_sep_rendered = inner_style.render("  ");
    let pair_sep_width = 2usize;

    let pos_plain = position(m);
    let pos_width = display_width(&pos_plain);

    // mode block, " | ", pairs, filler, position, one trailing space
    let mode_w = display_width(mode) + 2;
    let sep_w = display_width(" | ");
    let avail = width.saturating_sub(mode_w + sep_w + 1);

    let width_of = |n: usize| -> usize {
        if n == 0 {
            return 0;
        }
        pairs.iter().take(n).map(|(_, w)| *w).sum::<usize>() + pair_sep_width * (n - 1)
    };

    // one blank column between the last pair and the position
    let gap = |n: usize| usize::from(n > 0);

    // drop rightmost pairs until they fit next to the position
    let mut pairs_count = pairs.len();
    while pairs_count > 0 && width_of(pairs_count) + gap(pairs_count) + pos_width > avail {
        pairs_count -= 1;
    }
    let left_width = width_of(pairs_count);
    let left_joined_rendered = pairs
        .iter()
        .take(pairs_count)
        .map(|(r, _)| r.clone())
        .collect::<Vec<_>>()
        .join(&pair_sep_rendered);

    let (pos_rendered, shown_pos) = if left_width + gap(pairs_count) + pos_width > avail {
        (String::new(), 0)
    } else {
        (pos_style.render(&pos_plain), pos_width)
    };

    // the filler carries the gap
    let pad = avail.saturating_sub(left_width + shown_pos);
    let filler = if pad > 0 {
        inner_style.render(&" ".repeat(pad))
    } else {
        String::new()
    };

    let mode_style = STYLE_MODELINE
        .clone()
        .background(Color::from_rgb(101, 101, 101))
        .padding(0, 1, 0, 1)
        .bold(true);
    let mode_styled = mode_style.render(mode);
    let sep_styled = inner_style.render(" | ");
    let trailing_pad = inner_style.render(" ");

    format!("{mode_styled}{sep_styled}{left_joined_rendered}{filler}{pos_rendered}{trailing_pad}")
}

pub fn render_modeline_padded(m: &Model) -> String {
    let total_width = m.total_width();
    let mode = m.mode();
    let modeline = render_modeline(m, total_width, &mode);
    // very narrow terminals can wrap; keep the first row
    modeline.lines().next().unwrap_or("").to_string()
}
