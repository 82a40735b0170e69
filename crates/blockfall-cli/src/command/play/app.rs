use std::time::Duration;

use blockfall_engine::{Command, Commands, GameSession, InputMapper, Key, TouchPoint};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::{
    tui::{App, Tui},
    view::widgets::{SessionDisplay, style},
};

/// Without key release events, the down key counts as released once no press or
/// auto-repeat has arrived for this long.
const KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// Host pixels per terminal column and row. One board block (two columns, one row) is
/// 12x12 pixels, just over the default swipe threshold.
const PIXELS_PER_COLUMN: f32 = 6.0;
const PIXELS_PER_ROW: f32 = 12.0;

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    input: InputMapper,
    fps: u32,
    clock: Duration,
    key_release_events: bool,
    down_key_idle: Duration,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, fps: u32) -> Self {
        let input = InputMapper::new(session.config().touch.clone());
        Self {
            session,
            input,
            fps,
            clock: Duration::ZERO,
            key_release_events: false,
            down_key_idle: Duration::ZERO,
            is_exiting: false,
        }
    }

    fn send(&mut self, commands: Commands) {
        for command in commands {
            _ = self.session.apply(command);
        }
    }

    fn handle_key(&mut self, event: KeyEvent) {
        let commands = match (event.kind, event.code) {
            (KeyEventKind::Release, code) => match key_from_code(code) {
                Some(key) => self.input.key_up(key),
                None => return,
            },
            (_, KeyCode::Char('q') | KeyCode::Esc) => {
                self.is_exiting = true;
                return;
            }
            (_, KeyCode::Char('r')) => [Command::Restart].into_iter().collect(),
            (_, code) => match key_from_code(code) {
                Some(key) => {
                    if key == Key::Down {
                        self.down_key_idle = Duration::ZERO;
                    }
                    self.input.key_down(key)
                }
                None => return,
            },
        };
        self.send(commands);
    }

    fn handle_mouse(&mut self, event: MouseEvent) {
        let point = touch_point(event.column, event.row);
        let time = self.clock;
        let commands = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.input.touch_start(point, time),
            MouseEventKind::Drag(MouseButton::Left) => self.input.touch_move(point, time),
            MouseEventKind::Up(MouseButton::Left) => self.input.touch_end(point, time),
            _ => return,
        };
        self.send(commands);
    }

    fn release_stale_down_key(&mut self, elapsed: Duration) {
        if self.key_release_events
            || !self.input.is_fast_drop_held()
            || self.input.touch().is_holding()
        {
            return;
        }
        self.down_key_idle += elapsed;
        if self.down_key_idle > KEY_RELEASE_TIMEOUT {
            let commands = self.input.key_up(Key::Down);
            self.send(commands);
        }
    }
}

fn key_from_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Space),
        _ => None,
    }
}

fn touch_point(column: u16, row: u16) -> TouchPoint {
    TouchPoint::new(
        f32::from(column) * PIXELS_PER_COLUMN,
        f32::from(row) * PIXELS_PER_ROW,
    )
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(f64::from(self.fps));
        tui.enable_mouse_capture();
        self.key_release_events = tui.enable_key_release_events();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        match event {
            Event::Key(event) => self.handle_key(event),
            Event::Mouse(event) => self.handle_mouse(event),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = if self.session.is_game_over() {
            "Controls: R (Restart) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↑ Space (Rotate) | ↓ (Fast Drop) | Mouse drag / click | R (Restart) | Q (Quit)"
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let session_display = SessionDisplay::new(&self.session);
        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        self.clock += elapsed;
        self.release_stale_down_key(elapsed);
        _ = self.session.tick(elapsed);
    }
}
