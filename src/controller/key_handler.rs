use crate::controller::command_types::{Command, Mode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn parse_key(mode: &Mode, key_event: &KeyEvent) -> Option<Command> {
        let key = key_event.code;
        let modifiers = key_event.modifiers;

        match mode {
            Mode::Closed => Self::parse_closed_mode_key(key),
            Mode::Browse => Self::parse_browse_mode_key(key, modifiers),
            Mode::Edit => Self::parse_edit_mode_key(key),
            Mode::Filter => None, // Filter input is handled directly by its controller
        }
    }

    fn parse_closed_mode_key(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Char('o') | KeyCode::Enter => Some(Command::OpenOverlay),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('s') => Some(Command::ToggleSystemVariables),
            _ => None,
        }
    }

    fn parse_browse_mode_key(key: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        match key {
            KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Redraw),

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Command::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Command::SelectPrevious),
            KeyCode::Tab | KeyCode::BackTab => Some(Command::SwitchFocus),
            KeyCode::Char(']') => Some(Command::NextEnvironment),
            KeyCode::Char('[') => Some(Command::PreviousEnvironment),

            // Row actions
            KeyCode::Char('a') => Some(Command::AddVariable),
            KeyCode::Char('e') | KeyCode::Enter => Some(Command::EditVariable),
            KeyCode::Char('d') | KeyCode::Delete => Some(Command::DeleteVariable),
            KeyCode::Char(' ') => Some(Command::ToggleEnabled),
            KeyCode::Char('y') => Some(Command::CopyValue),

            // List and overlay toggles
            KeyCode::Char('v') => Some(Command::ToggleValues),
            KeyCode::Char('s') => Some(Command::ToggleSystemVariables),
            KeyCode::Char('/') => Some(Command::EnterFilter),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::CloseOverlay),

            _ => None,
        }
    }

    fn parse_edit_mode_key(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Esc => Some(Command::CloseEditor),
            KeyCode::Enter => Some(Command::CommitField),
            KeyCode::Tab | KeyCode::Down => Some(Command::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Command::PreviousField),
            KeyCode::Backspace => Some(Command::DeleteChar),
            KeyCode::Char(c) => Some(Command::InsertChar(c)),
            _ => None,
        }
    }
}
