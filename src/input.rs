/// Translate raw terminal key events into logical `InputEvent`s.
///
/// Only key presses count.  Auto-repeat and release events are ignored so a
/// held Space behaves like a single KEYDOWN.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::InputEvent;

pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char(' ') | KeyCode::Up => Some(InputEvent::Jump),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Reset),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        _ => None,
    }
}
