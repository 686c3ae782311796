//! Input handling for the Home and Game screens.
//!
//! Keys and mouse drags are mapped to UI-agnostic inputs first, then
//! dispatched. Swipes come from either arrow keys or a mouse drag across
//! the play field.

use crate::ui::home_scene::{HomeScreen, MenuItem};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use lane_runner::runner::{Gesture, Session, Swipe, SwipeOutcome};

/// Approximate size of one terminal cell, in the units the swipe threshold
/// is expressed in.
const CELL_WIDTH_UNITS: f64 = 8.0;
const CELL_HEIGHT_UNITS: f64 = 16.0;

/// Game-screen input, independent of the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Swipe(Swipe),
    Restart,
    Home,
    Other,
}

pub fn map_game_key(key: KeyEvent) -> GameInput {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => GameInput::Swipe(Swipe::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => GameInput::Swipe(Swipe::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => {
            GameInput::Swipe(Swipe::Up)
        }
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => GameInput::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Home,
        _ => GameInput::Other,
    }
}

/// Result of handling a game input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    /// A fresh run was started.
    Restarted,
    /// Leave the run and return to the home screen.
    QuitToHome,
}

/// Dispatch one game input. Restart is only honored once the run is over;
/// swipes are ignored by the session after game over.
pub fn handle_game_input(input: GameInput, session: &mut Session) -> InputResult {
    match input {
        GameInput::Swipe(swipe) => {
            if let Some(SwipeOutcome::Moved { from, to }) = session.handle_swipe(swipe) {
                tracing::trace!(?from, ?to, "lane change");
            }
            InputResult::Continue
        }
        GameInput::Restart if session.is_over() => {
            session.restart();
            InputResult::Restarted
        }
        GameInput::Restart | GameInput::Other => InputResult::Continue,
        GameInput::Home => InputResult::QuitToHome,
    }
}

/// Tracks a mouse drag from press to release and turns it into a swipe.
#[derive(Debug, Default)]
pub struct DragTracker {
    origin: Option<(u16, u16)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a mouse event. Returns a swipe when a left-button drag ends far
    /// enough from where it started.
    pub fn handle(&mut self, event: MouseEvent, threshold: f64) -> Option<Swipe> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (col, row) = self.origin.take()?;
                let gesture = Gesture::new(
                    (event.column as f64 - col as f64) * CELL_WIDTH_UNITS,
                    (event.row as f64 - row as f64) * CELL_HEIGHT_UNITS,
                );
                gesture.classify(threshold)
            }
            _ => None,
        }
    }
}

/// What the home screen asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    None,
    Play,
    Quit,
}

pub fn handle_home_input(key: KeyEvent, home: &mut HomeScreen) -> HomeAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            home.move_up();
            HomeAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            home.move_down();
            HomeAction::None
        }
        KeyCode::Enter | KeyCode::Char(' ') => match home.selected() {
            MenuItem::Play => HomeAction::Play,
            MenuItem::Quit => HomeAction::Quit,
        },
        KeyCode::Char('p') | KeyCode::Char('P') => HomeAction::Play,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => HomeAction::Quit,
        _ => HomeAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use lane_runner::runner::{Lane, ObstacleKind, RunnerConfig};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_game_key(key(KeyCode::Left)), GameInput::Swipe(Swipe::Left));
        assert_eq!(map_game_key(key(KeyCode::Char('d'))), GameInput::Swipe(Swipe::Right));
        assert_eq!(map_game_key(key(KeyCode::Char(' '))), GameInput::Swipe(Swipe::Up));
        assert_eq!(map_game_key(key(KeyCode::Enter)), GameInput::Restart);
        assert_eq!(map_game_key(key(KeyCode::Esc)), GameInput::Home);
        assert_eq!(map_game_key(key(KeyCode::Tab)), GameInput::Other);
    }

    #[test]
    fn test_drag_right_is_swipe() {
        let mut drag = DragTracker::new();
        assert_eq!(drag.handle(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), 30.0), None);
        let swipe = drag.handle(mouse(MouseEventKind::Up(MouseButton::Left), 16, 10), 30.0);
        assert_eq!(swipe, Some(Swipe::Right));
    }

    #[test]
    fn test_drag_up_is_jump() {
        let mut drag = DragTracker::new();
        drag.handle(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), 30.0);
        let swipe = drag.handle(mouse(MouseEventKind::Up(MouseButton::Left), 10, 7), 30.0);
        assert_eq!(swipe, Some(Swipe::Up));
    }

    #[test]
    fn test_short_drag_ignored() {
        let mut drag = DragTracker::new();
        drag.handle(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), 30.0);
        // 2 cells = 16 units, under the threshold
        let swipe = drag.handle(mouse(MouseEventKind::Up(MouseButton::Left), 12, 10), 30.0);
        assert_eq!(swipe, None);
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut drag = DragTracker::new();
        let swipe = drag.handle(mouse(MouseEventKind::Up(MouseButton::Left), 40, 10), 30.0);
        assert_eq!(swipe, None);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut session = Session::new(RunnerConfig::default(), 7);
        assert_eq!(
            handle_game_input(GameInput::Restart, &mut session),
            InputResult::Continue
        );
        assert_eq!(session.run(), 0);

        session.spawn_obstacle_in(Lane::Center, ObstacleKind::Train);
        session.run_for(2000);
        assert!(session.is_over());
        assert_eq!(
            handle_game_input(GameInput::Restart, &mut session),
            InputResult::Restarted
        );
        assert_eq!(session.run(), 1);
        assert!(!session.is_over());
    }

    #[test]
    fn test_swipe_moves_player() {
        let mut session = Session::new(RunnerConfig::default(), 7);
        handle_game_input(GameInput::Swipe(Swipe::Left), &mut session);
        assert_eq!(session.player().lane, Lane::Left);
    }

    #[test]
    fn test_home_menu_selects_quit() {
        let mut home = HomeScreen::new();
        assert_eq!(handle_home_input(key(KeyCode::Enter), &mut home), HomeAction::Play);
        handle_home_input(key(KeyCode::Down), &mut home);
        assert_eq!(handle_home_input(key(KeyCode::Enter), &mut home), HomeAction::Quit);
    }
}
