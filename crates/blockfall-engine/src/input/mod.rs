//! Translation of host input into engine [`Command`]s.
//!
//! Hosts report raw events (a key went down, a touch moved) and receive zero, one or
//! two commands to forward to [`GameSession::apply`](crate::GameSession::apply).
//! Nothing here touches game state; a mapper only remembers what it needs to recognise
//! gestures.
//!
//! - [`Key`] - host-neutral key identifiers and their fixed bindings
//! - [`TouchMapper`] - swipe, tap and hold recognition for a single touch
//! - [`InputMapper`] - both of the above behind one interface

pub use self::{command::*, keyboard::*, touch::*};

mod command;
mod keyboard;
mod touch;

use std::time::Duration;

use crate::engine::TouchConfig;

/// Combined key and touch mapper.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Command, GameSession, InputMapper, Key, TouchConfig, TouchPoint};
///
/// let mut session = GameSession::new();
/// let mut input = InputMapper::new(TouchConfig::default());
///
/// for command in input.key_down(Key::Down) {
///     _ = session.apply(command);
/// }
/// assert!(session.scheduler().is_fast_drop());
/// assert!(input.is_fast_drop_held());
///
/// let start = Duration::from_millis(1000);
/// _ = input.touch_start(TouchPoint::new(50.0, 50.0), start);
/// let commands = input.touch_end(TouchPoint::new(50.0, 50.0), start + Duration::from_millis(80));
/// assert_eq!(commands.as_slice(), &[Command::Rotate]);
/// ```
#[derive(Debug, Clone)]
pub struct InputMapper {
    touch: TouchMapper,
    down_key_held: bool,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(TouchConfig::default())
    }
}

impl InputMapper {
    #[must_use]
    pub fn new(touch_config: TouchConfig) -> Self {
        Self {
            touch: TouchMapper::new(touch_config),
            down_key_held: false,
        }
    }

    #[must_use]
    pub fn touch(&self) -> &TouchMapper {
        &self.touch
    }

    /// Whether a fast drop requested by the down key or a touch hold is still active.
    #[must_use]
    pub fn is_fast_drop_held(&self) -> bool {
        self.down_key_held || self.touch.is_holding()
    }

    pub fn key_down(&mut self, key: Key) -> Commands {
        if key == Key::Down {
            self.down_key_held = true;
        }
        key.press_commands()
    }

    pub fn key_up(&mut self, key: Key) -> Commands {
        if key == Key::Down {
            self.down_key_held = false;
        }
        self.keep_held_fast_drop(key.release_commands())
    }

    pub fn touch_start(&mut self, point: TouchPoint, time: Duration) -> Commands {
        let commands = self.touch.start(point, time);
        self.keep_held_fast_drop(commands)
    }

    pub fn touch_move(&mut self, point: TouchPoint, time: Duration) -> Commands {
        self.touch.move_to(point, time)
    }

    pub fn touch_end(&mut self, point: TouchPoint, time: Duration) -> Commands {
        let commands = self.touch.end(point, time);
        self.keep_held_fast_drop(commands)
    }

    pub fn touch_cancel(&mut self) -> Commands {
        let commands = self.touch.cancel();
        self.keep_held_fast_drop(commands)
    }

    /// Drops a fast-drop release while the other source still holds it.
    fn keep_held_fast_drop(&self, mut commands: Commands) -> Commands {
        if self.is_fast_drop_held() {
            commands.retain(|command| *command != Command::SetFastDrop(false));
        }
        commands
    }
}
