use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, core::Board};

/// Tunable parameters of a game session.
///
/// Every field has a default, so a partial JSON document only needs the values it
/// overrides. Durations are written as integer milliseconds.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "fast_drop_interval_ms": 30 }"#).unwrap();
/// assert_eq!(config.fast_drop_interval, Duration::from_millis(30));
/// assert_eq!(config.board_width, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub board_width: usize,
    pub board_height: usize,
    /// Column of the top-left cell of every newly spawned piece.
    pub spawn_column: i32,
    #[serde(rename = "normal_drop_interval_ms", with = "millis")]
    pub normal_drop_interval: Duration,
    #[serde(rename = "fast_drop_interval_ms", with = "millis")]
    pub fast_drop_interval: Duration,
    pub touch: TouchConfig,
}

/// Thresholds used to turn touch movement into commands.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TouchConfig {
    /// Distance (in host pixels) a touch must travel before it counts as a swipe.
    pub min_distance: f32,
    /// Minimum time between two commands produced by the same touch.
    #[serde(rename = "action_cooldown_ms", with = "millis")]
    pub action_cooldown: Duration,
    /// Longest touch that is still read as a tap.
    #[serde(rename = "tap_max_duration_ms", with = "millis")]
    pub tap_max_duration: Duration,
}

impl EngineConfig {
    /// Smallest board that fits every piece in every orientation.
    pub const MIN_BOARD_WIDTH: usize = 4;
    pub const MIN_BOARD_HEIGHT: usize = 4;

    pub const DEFAULT_SPAWN_COLUMN: i32 = 3;
    pub const DEFAULT_NORMAL_DROP_INTERVAL: Duration = Duration::from_millis(500);
    pub const DEFAULT_FAST_DROP_INTERVAL: Duration = Duration::from_millis(50);

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width < Self::MIN_BOARD_WIDTH || self.board_height < Self::MIN_BOARD_HEIGHT
        {
            return Err(ConfigError::BoardTooSmall {
                width: self.board_width,
                height: self.board_height,
                min_width: Self::MIN_BOARD_WIDTH,
                min_height: Self::MIN_BOARD_HEIGHT,
            });
        }
        // The widest spawn shape (the bar) must fit at the spawn column.
        let spawn_fits = usize::try_from(self.spawn_column)
            .is_ok_and(|column| column + Self::MIN_BOARD_WIDTH <= self.board_width);
        if !spawn_fits {
            return Err(ConfigError::SpawnColumnOutOfRange {
                column: self.spawn_column,
                width: self.board_width,
            });
        }
        if self.normal_drop_interval.is_zero() {
            return Err(ConfigError::ZeroInterval {
                name: "normal drop interval",
            });
        }
        if self.fast_drop_interval.is_zero() {
            return Err(ConfigError::ZeroInterval {
                name: "fast drop interval",
            });
        }
        if self.fast_drop_interval > self.normal_drop_interval {
            return Err(ConfigError::FastSlowerThanNormal {
                fast_ms: millis::as_u64(self.fast_drop_interval),
                normal_ms: millis::as_u64(self.normal_drop_interval),
            });
        }
        self.touch.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: Board::DEFAULT_WIDTH,
            board_height: Board::DEFAULT_HEIGHT,
            spawn_column: Self::DEFAULT_SPAWN_COLUMN,
            normal_drop_interval: Self::DEFAULT_NORMAL_DROP_INTERVAL,
            fast_drop_interval: Self::DEFAULT_FAST_DROP_INTERVAL,
            touch: TouchConfig::default(),
        }
    }
}

impl TouchConfig {
    pub const DEFAULT_MIN_DISTANCE: f32 = 10.0;
    pub const DEFAULT_ACTION_COOLDOWN: Duration = Duration::from_millis(50);
    pub const DEFAULT_TAP_MAX_DURATION: Duration = Duration::from_millis(250);

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(ConfigError::InvalidTouchDistance(self.min_distance));
        }
        Ok(())
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            min_distance: Self::DEFAULT_MIN_DISTANCE,
            action_cooldown: Self::DEFAULT_ACTION_COOLDOWN,
            tap_max_duration: Self::DEFAULT_TAP_MAX_DURATION,
        }
    }
}

/// Serializes a [`Duration`] as integer milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn as_u64(value: Duration) -> u64 {
        u64::try_from(value.as_millis()).unwrap_or(u64::MAX)
    }

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(as_u64(*value))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
