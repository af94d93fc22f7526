use lipgloss::{Color, Style};
use once_cell::sync::Lazy;

// Styles kept local to render module
pub static STYLE_LABEL: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(200, 200, 200)));
pub static STYLE_CURSOR: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from_rgb(0, 238, 238))
        .bold(true)
});
pub static STYLE_DRAGGED: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(238, 0, 238)));
pub static STYLE_DROP: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from_rgb(238, 238, 0))
        .bold(true)
});
pub static STYLE_DISABLED: Lazy<Style> = Lazy::new(|| Style::new().faint(true));
pub static STYLE_ARROW: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from_rgb(238, 0, 238))
        .bold(true)
});
pub static STYLE_ARROW_OFF: Lazy<Style> = Lazy::new(|| Style::new().faint(true));
pub static STYLE_HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold(true));
pub static STYLE_MODELINE: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .background(Color::from_rgb(95, 95, 95))
        .foreground(Color::from_rgb(255, 255, 255))
        .padding(0, 1, 0, 1)
});
pub static STYLE_LINENUM: Lazy<Style> = Lazy::new(|| Style::new().faint(true));
