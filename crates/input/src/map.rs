//! Key mapping from terminal events to game intents.

use crate::types::{Intent, MIN_TICK_MS, TICK_STEP_MS};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Forward to the controller as-is
    Game(Intent),
    /// Switch between multi-colour and single-colour pieces
    ToggleColorMode,
}

/// Map keyboard input to a command.
///
/// `tick_ms` is the current fall interval; `+` and `-` produce a
/// `SetTickInterval` relative to it.
pub fn handle_key_event(key: KeyEvent, tick_ms: u32) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let intent = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Intent::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Intent::MoveRight,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char(' ') => {
            Intent::Drop
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Intent::RotateCw,
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Intent::RotateCcw,

        // Session
        KeyCode::Char('p') | KeyCode::Char('P') => Intent::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => Intent::Restart,

        // Options
        KeyCode::Char('+') | KeyCode::Char('=') => Intent::SetTickInterval(faster(tick_ms)),
        KeyCode::Char('-') | KeyCode::Char('_') => Intent::SetTickInterval(slower(tick_ms)),
        KeyCode::Char('m') | KeyCode::Char('M') => return Some(KeyCommand::ToggleColorMode),

        _ => return None,
    };
    Some(KeyCommand::Game(intent))
}

/// Shorter interval, never below [`MIN_TICK_MS`]
fn faster(tick_ms: u32) -> u32 {
    tick_ms.saturating_sub(TICK_STEP_MS).max(MIN_TICK_MS)
}

fn slower(tick_ms: u32) -> u32 {
    tick_ms.saturating_add(TICK_STEP_MS)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn map(code: KeyCode) -> Option<KeyCommand> {
        handle_key_event(KeyEvent::from(code), 500)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map(KeyCode::Left), Some(KeyCommand::Game(Intent::MoveLeft)));
        assert_eq!(map(KeyCode::Right), Some(KeyCommand::Game(Intent::MoveRight)));
        assert_eq!(map(KeyCode::Char('A')), Some(KeyCommand::Game(Intent::MoveLeft)));
        assert_eq!(map(KeyCode::Char('d')), Some(KeyCommand::Game(Intent::MoveRight)));
    }

    #[test]
    fn test_drop_keys() {
        for code in [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char(' ')] {
            assert_eq!(map(code), Some(KeyCommand::Game(Intent::Drop)));
        }
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map(KeyCode::Up), Some(KeyCommand::Game(Intent::RotateCw)));
        assert_eq!(map(KeyCode::Char('x')), Some(KeyCommand::Game(Intent::RotateCw)));
        assert_eq!(map(KeyCode::Char('z')), Some(KeyCommand::Game(Intent::RotateCcw)));
        assert_eq!(map(KeyCode::Char('Y')), Some(KeyCommand::Game(Intent::RotateCcw)));
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(map(KeyCode::Char('p')), Some(KeyCommand::Game(Intent::TogglePause)));
        assert_eq!(map(KeyCode::Char('R')), Some(KeyCommand::Game(Intent::Restart)));
        assert_eq!(map(KeyCode::Char('m')), Some(KeyCommand::ToggleColorMode));
        assert_eq!(map(KeyCode::Char('c')), None);
    }

    #[test]
    fn test_speed_keys() {
        assert_eq!(
            map(KeyCode::Char('+')),
            Some(KeyCommand::Game(Intent::SetTickInterval(450)))
        );
        assert_eq!(
            map(KeyCode::Char('-')),
            Some(KeyCommand::Game(Intent::SetTickInterval(550)))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('+')), MIN_TICK_MS),
            Some(KeyCommand::Game(Intent::SetTickInterval(MIN_TICK_MS)))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('+')), 70),
            Some(KeyCommand::Game(Intent::SetTickInterval(MIN_TICK_MS)))
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = KeyEvent::from(KeyCode::Left);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(key, 500), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
