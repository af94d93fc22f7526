// Terminal front end: bubbletea-rs model/update/view around the list adapter.

pub mod model;
pub mod render;
pub mod run;
pub mod surface;
pub mod update;

pub use model::{Model, initial_model};
pub use render::{
    render_full, render_header, render_list_content, render_main_content, render_modeline,
    render_modeline_padded,
};
pub use run::{run, Outcome};
pub use surface::TermSurface;
pub use update::handle_update;

// Messages used by the update logic
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    WindowSize { width: usize, height: usize },
    KeyUp,
    KeyDown,
    // shift the selected item itself
    MoveUp,
    MoveDown,
    KeySpace,
    KeyEnter,
    KeyEsc,
    MouseDown { x: u16, y: u16 },
    MouseDrag { x: u16, y: u16 },
    MouseUp { x: u16, y: u16 },
}
