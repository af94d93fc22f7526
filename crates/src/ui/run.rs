use crate::error::{Error, Result};
use crate::list::ListProps;
use crate::source::Entry;
use crate::ui::model::{initial_model, Model, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::ui::Msg;
use bubbletea_rs::{
    command::Cmd, event::KeyMsg, event::MouseMsg, event::WindowSizeMsg, model::Model as TeaModel,
    window_size, MouseMotion, Program,
};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

// `TeaModel::init` takes no arguments, so the launch state is parked here.
struct Launch {
    items: Vec<Entry>,
    props: ListProps,
    text_field: Option<String>,
}

static LAUNCH: OnceCell<Launch> = OnceCell::new();

/// How the interactive session ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub items: Vec<Entry>,
    /// Enter was pressed; false when the user quit.
    pub confirmed: bool,
    pub changes: usize,
}

struct TeaAdapter {
    inner: Model,
}

impl TeaAdapter {
    fn finished(&self) -> Option<Cmd> {
        if self.inner.confirmed || self.inner.quit {
            return Some(bubbletea_rs::quit());
        }
        None
    }
}

// Key bindings; None for keys the list ignores.
fn key_to_msg(key: &KeyCode, modifiers: KeyModifiers) -> Option<Msg> {
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    match key {
        KeyCode::Up if shift => Some(Msg::MoveUp),
        KeyCode::Down if shift => Some(Msg::MoveDown),
        KeyCode::Up => Some(Msg::KeyUp),
        KeyCode::Down => Some(Msg::KeyDown),
        KeyCode::Enter => Some(Msg::KeyEnter),
        KeyCode::Esc => Some(Msg::KeyEsc),
        KeyCode::Char(ch) if modifiers.contains(KeyModifiers::CONTROL) => match ch {
            'n' | 'N' => Some(Msg::KeyDown),
            'p' | 'P' => Some(Msg::KeyUp),
            _ => None,
        },
        KeyCode::Char(' ') => Some(Msg::KeySpace),
        KeyCode::Char('k') => Some(Msg::KeyUp),
        KeyCode::Char('j') => Some(Msg::KeyDown),
        KeyCode::Char('K') => Some(Msg::MoveUp),
        KeyCode::Char('J') => Some(Msg::MoveDown),
        _ => None,
    }
}

fn is_interrupt(key: &KeyCode, modifiers: KeyModifiers) -> bool {
    match key {
        // Ctrl-C delivered as ETX
        KeyCode::Char('\u{03}') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn mouse_to_msg(kind: MouseEventKind, x: u16, y: u16) -> Option<Msg> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Msg::MouseDown { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Msg::MouseDrag { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(Msg::MouseUp { x, y }),
        MouseEventKind::ScrollUp => Some(Msg::KeyUp),
        MouseEventKind::ScrollDown => Some(Msg::KeyDown),
        _ => None,
    }
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let mut inner = match LAUNCH.get() {
            Some(l) => initial_model(l.items.clone(), l.props.clone(), l.text_field.clone()),
            None => initial_model(Vec::new(), ListProps::default(), None),
        };
        let (width, height) = crossterm::terminal::size()
            .map(|(w, h)| (usize::from(w), usize::from(h)))
            .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
        inner.update(Msg::WindowSize { width, height });
        (TeaAdapter { inner }, Some(window_size()))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            if is_interrupt(&km.key, km.modifiers) {
                self.inner.quit = true;
                return self.finished();
            }
            if let Some(m) = key_to_msg(&km.key, km.modifiers) {
                self.inner.update(m);
            }
            return self.finished();
        }
        if let Some(mm) = msg.downcast_ref::<MouseMsg>() {
            if let Some(m) = mouse_to_msg(mm.button, mm.x, mm.y) {
                self.inner.update(m);
            }
            return None;
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            self.inner.update(Msg::WindowSize {
                width: usize::from(ws.width),
                height: usize::from(ws.height),
            });
            return None;
        }
        None
    }

    fn view(&self) -> String {
        self.inner.render_full()
    }
}

// `Error::Program` already says "program error"; only add what failed.
fn program_error(context: &str, e: impl std::fmt::Debug) -> Error {
    Error::Program(format!("{context}: {e:?}"))
}

/// Run the interactive list until the user confirms or quits.
pub async fn run(
    items: Vec<Entry>,
    props: ListProps,
    text_field: Option<String>,
) -> Result<Outcome> {
    let count = items.len();
    LAUNCH
        .set(Launch {
            items,
            props,
            text_field,
        })
        .map_err(|_| Error::Program("interactive session already started".to_string()))?;
    info!(items = count, "starting interactive session");

    let program = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .mouse_motion(MouseMotion::Cell)
        .build()
        .map_err(|e| program_error("failed to build", e))?;
    let final_adapter = program
        .run()
        .await
        .map_err(|e| program_error("terminal session failed", e))?;

    let m = final_adapter.inner;
    debug!(confirmed = m.confirmed, changes = m.changes, "session ended");
    Ok(Outcome {
        items: m.result(),
        confirmed: m.confirmed,
        changes: m.changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_list_messages() {
        let none = KeyModifiers::NONE;
        assert_eq!(key_to_msg(&KeyCode::Up, none), Some(Msg::KeyUp));
        assert_eq!(key_to_msg(&KeyCode::Down, KeyModifiers::SHIFT), Some(Msg::MoveDown));
        assert_eq!(key_to_msg(&KeyCode::Char('K'), KeyModifiers::SHIFT), Some(Msg::MoveUp));
        assert_eq!(key_to_msg(&KeyCode::Char('j'), none), Some(Msg::KeyDown));
        assert_eq!(key_to_msg(&KeyCode::Char(' '), none), Some(Msg::KeySpace));
        assert_eq!(key_to_msg(&KeyCode::Char('n'), KeyModifiers::CONTROL), Some(Msg::KeyDown));
        assert_eq!(key_to_msg(&KeyCode::Char('x'), none), None);
        assert_eq!(key_to_msg(&KeyCode::Tab, none), None);
    }

    #[test]
    fn program_errors_name_the_failure_once() {
        let msg = program_error("failed to build", "no tty").to_string();
        assert_eq!(msg, "program error: failed to build: \"no tty\"");
        assert_eq!(msg.matches("program error").count(), 1);
    }

    #[test]
    fn interrupt_detection() {
        assert!(is_interrupt(&KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(is_interrupt(&KeyCode::Char('\u{03}'), KeyModifiers::NONE));
        assert!(!is_interrupt(&KeyCode::Char('c'), KeyModifiers::NONE));
    }

    #[test]
    fn left_button_drives_drag_messages() {
        assert_eq!(
            mouse_to_msg(MouseEventKind::Down(MouseButton::Left), 3, 4),
            Some(Msg::MouseDown { x: 3, y: 4 })
        );
        assert_eq!(
            mouse_to_msg(MouseEventKind::Drag(MouseButton::Left), 3, 5),
            Some(Msg::MouseDrag { x: 3, y: 5 })
        );
        assert_eq!(
            mouse_to_msg(MouseEventKind::Up(MouseButton::Left), 3, 6),
            Some(Msg::MouseUp { x: 3, y: 6 })
        );
        assert_eq!(mouse_to_msg(MouseEventKind::ScrollDown, 0, 0), Some(Msg::KeyDown));
        assert_eq!(mouse_to_msg(MouseEventKind::Down(MouseButton::Right), 0, 0), None);
    }
}
