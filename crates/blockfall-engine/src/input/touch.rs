use std::time::Duration;

use crate::engine::TouchConfig;

use super::command::{Command, Commands, commands};

/// Position of a touch in host pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
struct TouchTrack {
    anchor: TouchPoint,
    start_time: Duration,
    last_action: Option<Duration>,
    moved: bool,
    holding: bool,
}

/// Gesture recognizer for a single touch.
///
/// - A drag that travels more than `min_distance` mostly sideways moves the piece one
///   column; the reference point then follows the finger, so a long drag moves several
///   columns.
/// - A drag mostly downward starts a fast-drop hold, once per touch. The hold lasts
///   until the touch ends or is cancelled.
/// - A touch that never travels past the threshold and ends quickly is a tap, which
///   rotates.
///
/// Commands from the same touch are at least `action_cooldown` apart. Timestamps are
/// durations since any fixed host epoch.
#[derive(Debug, Clone)]
pub struct TouchMapper {
    config: TouchConfig,
    track: Option<TouchTrack>,
}

impl TouchMapper {
    #[must_use]
    pub fn new(config: TouchConfig) -> Self {
        Self {
            config,
            track: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.track.is_some()
    }

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.track.as_ref().is_some_and(|track| track.holding)
    }

    /// Begins tracking a touch. A touch still being tracked is released first.
    pub fn start(&mut self, point: TouchPoint, time: Duration) -> Commands {
        let released = self.cancel();
        self.track = Some(TouchTrack {
            anchor: point,
            start_time: time,
            last_action: None,
            moved: false,
            holding: false,
        });
        released
    }

    pub fn move_to(&mut self, point: TouchPoint, time: Duration) -> Commands {
        let min_distance = self.config.min_distance;
        let cooldown = self.config.action_cooldown;
        let Some(track) = &mut self.track else {
            return Commands::new();
        };

        let dx = point.x - track.anchor.x;
        let dy = point.y - track.anchor.y;
        if dx.abs() <= min_distance && dy.abs() <= min_distance {
            return Commands::new();
        }
        track.moved = true;

        if track
            .last_action
            .is_some_and(|last| time.saturating_sub(last) < cooldown)
        {
            return Commands::new();
        }

        let emitted = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                commands([Command::MoveRight])
            } else {
                commands([Command::MoveLeft])
            }
        } else if dy > min_distance && !track.holding {
            track.holding = true;
            commands([Command::SetFastDrop(true), Command::ManualStep])
        } else {
            Commands::new()
        };

        track.anchor = point;
        if !emitted.is_empty() {
            track.last_action = Some(time);
        }
        emitted
    }

    /// Finishes the touch, releasing a hold or recognising a tap.
    pub fn end(&mut self, point: TouchPoint, time: Duration) -> Commands {
        let Some(track) = self.track.take() else {
            return Commands::new();
        };
        if track.holding {
            return commands([Command::SetFastDrop(false)]);
        }

        let min_distance = self.config.min_distance;
        let stayed = (point.x - track.anchor.x).abs() <= min_distance
            && (point.y - track.anchor.y).abs() <= min_distance;
        let quick = time.saturating_sub(track.start_time) <= self.config.tap_max_duration;
        if !track.moved && stayed && quick {
            return commands([Command::Rotate]);
        }
        Commands::new()
    }

    /// Abandons the touch. A hold is released; a cancelled touch never rotates.
    pub fn cancel(&mut self) -> Commands {
        match self.track.take() {
            Some(track) if track.holding => commands([Command::SetFastDrop(false)]),
            _ => Commands::new(),
        }
    }
}
