use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// A player intent understood by [`GameSession::apply`](crate::GameSession::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    /// Switches the drop scheduler between the fast and normal interval.
    SetFastDrop(bool),
    /// Moves the piece down one row now, locking it if it cannot move.
    ManualStep,
    Restart,
}

/// Commands produced by one input event. A single event yields at most two.
pub type Commands = ArrayVec<Command, 2>;

pub(crate) fn commands<const N: usize>(list: [Command; N]) -> Commands {
    list.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_names() {
        assert_eq!(
            serde_json::to_string(&Command::MoveLeft).unwrap(),
            "\"MoveLeft\""
        );
        assert_eq!(
            serde_json::to_string(&Command::SetFastDrop(true)).unwrap(),
            "{\"SetFastDrop\":true}"
        );
        let parsed: Command = serde_json::from_str("\"ManualStep\"").unwrap();
        assert_eq!(parsed, Command::ManualStep);
    }

    #[test]
    fn test_commands_helper_keeps_order() {
        let list = commands([Command::SetFastDrop(true), Command::ManualStep]);
        assert_eq!(
            list.as_slice(),
            &[Command::SetFastDrop(true), Command::ManualStep]
        );
        assert!(commands([]).is_empty());
    }
}
