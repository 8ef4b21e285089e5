use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::app::Action;

pub async fn run_event_loop(tx: mpsc::UnboundedSender<Action>) {
    let mut reader = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_secs(2));

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if tx.send(Action::Tick).is_err() {
                    break;
                }
            }
            maybe_event = reader.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(action) = key_to_action(key) {
                            if tx.send(action).is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        // Terminal will re-render on next frame
                    }
                    Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}

fn key_to_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            // Ctrl+C always quits
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Key(KeyAction::SwitchForm)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(Action::Key(KeyAction::Up)),
        KeyCode::Down => Some(Action::Key(KeyAction::Down)),
        KeyCode::Left => Some(Action::Key(KeyAction::Left)),
        KeyCode::Right => Some(Action::Key(KeyAction::Right)),
        KeyCode::Tab => Some(Action::Key(KeyAction::Tab)),
        KeyCode::BackTab => Some(Action::Key(KeyAction::BackTab)),
        KeyCode::Enter => Some(Action::Key(KeyAction::Select)),
        KeyCode::Esc => Some(Action::Key(KeyAction::Escape)),
        KeyCode::Backspace => Some(Action::Key(KeyAction::Backspace)),
        KeyCode::Char(c) => Some(Action::Key(KeyAction::Char(c))),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Tab,
    BackTab,
    Select,
    Escape,
    SwitchForm,
    Char(char),
    Backspace,
}
