use super::command::{Command, Commands, commands};

/// Keys the engine has bindings for.
///
/// | key | press | release |
/// |---|---|---|
/// | `Left` | `MoveLeft` | - |
/// | `Right` | `MoveRight` | - |
/// | `Up`, `Space` | `Rotate` | - |
/// | `Down` | `SetFastDrop(true)`, `ManualStep` | `SetFastDrop(false)` |
///
/// Auto-repeated presses map exactly like the first press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
}

impl Key {
    #[must_use]
    pub fn press_commands(self) -> Commands {
        match self {
            Key::Left => commands([Command::MoveLeft]),
            Key::Right => commands([Command::MoveRight]),
            Key::Up | Key::Space => commands([Command::Rotate]),
            Key::Down => commands([Command::SetFastDrop(true), Command::ManualStep]),
        }
    }

    #[must_use]
    pub fn release_commands(self) -> Commands {
        match self {
            Key::Down => commands([Command::SetFastDrop(false)]),
            Key::Left | Key::Right | Key::Up | Key::Space => Commands::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_bindings() {
        assert_eq!(Key::Left.press_commands().as_slice(), &[Command::MoveLeft]);
        assert_eq!(
            Key::Right.press_commands().as_slice(),
            &[Command::MoveRight]
        );
        assert_eq!(Key::Up.press_commands().as_slice(), &[Command::Rotate]);
        assert_eq!(Key::Space.press_commands().as_slice(), &[Command::Rotate]);
        assert_eq!(
            Key::Down.press_commands().as_slice(),
            &[Command::SetFastDrop(true), Command::ManualStep]
        );
    }

    #[test]
    fn test_only_down_has_release_binding() {
        assert_eq!(
            Key::Down.release_commands().as_slice(),
            &[Command::SetFastDrop(false)]
        );
        for key in [Key::Left, Key::Right, Key::Up, Key::Space] {
            assert!(key.release_commands().is_empty(), "{key:?}");
        }
    }
}
