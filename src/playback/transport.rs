//! J-K-L keyboard transport.
//!
//! Keys map to a [`TransportAction`] given the current clock state. The
//! mapping is pure; the editor applies the action to its clock.

use std::str::FromStr;

use crate::core::time::{frame_duration, Seconds};
use crate::playback::state::Direction;

/// Keys the transport responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKey {
    J,
    K,
    L,
    Space,
    Home,
    End,
    ArrowLeft,
    ArrowRight,
}

/// A key name the transport does not bind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport key {0:?}")]
pub struct UnknownKey(pub String);

impl FromStr for TransportKey {
    type Err = UnknownKey;

    /// Parse a browser-style key name (`"j"`, `" "`, `"ArrowLeft"`, ...)
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "j" | "J" => Ok(TransportKey::J),
            "k" | "K" => Ok(TransportKey::K),
            "l" | "L" => Ok(TransportKey::L),
            " " | "Space" | "Spacebar" => Ok(TransportKey::Space),
            "Home" => Ok(TransportKey::Home),
            "End" => Ok(TransportKey::End),
            "ArrowLeft" | "Left" => Ok(TransportKey::ArrowLeft),
            "ArrowRight" | "Right" => Ok(TransportKey::ArrowRight),
            other => Err(UnknownKey(other.to_string())),
        }
    }
}

/// What a key press asks the clock to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportAction {
    SetDirection(Direction),
    /// Unclamped target; the clock clamps on seek
    Seek(Seconds),
}

/// Where keyboard focus is when the key arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyContext {
    pub text_input_focused: bool,
}

/// Result of offering a key to the transport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyOutcome {
    pub action: Option<TransportAction>,
    /// The host should suppress the key's default behaviour (page scroll)
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub const IGNORED: KeyOutcome = KeyOutcome {
        action: None,
        prevent_default: false,
    };

    fn handled(action: TransportAction) -> Self {
        Self {
            action: Some(action),
            prevent_default: true,
        }
    }
}

/// Map a key to a transport action for the current clock state.
pub fn transport_action(
    key: TransportKey,
    direction: Direction,
    current_time: Seconds,
    fps: u32,
    total_duration: Seconds,
) -> TransportAction {
    use TransportAction::*;

    match key {
        TransportKey::J => SetDirection(if direction == Direction::Reverse {
            Direction::Stopped
        } else {
            Direction::Reverse
        }),
        TransportKey::K => SetDirection(Direction::Stopped),
        TransportKey::L => SetDirection(if direction == Direction::Forward {
            Direction::Stopped
        } else {
            Direction::Forward
        }),
        // Space never plays in reverse; it stops whatever is playing
        TransportKey::Space => SetDirection(if direction.is_stopped() {
            Direction::Forward
        } else {
            Direction::Stopped
        }),
        TransportKey::Home => Seek(0.0),
        TransportKey::End => Seek(total_duration),
        TransportKey::ArrowLeft => Seek(current_time - frame_duration(fps)),
        TransportKey::ArrowRight => Seek(current_time + frame_duration(fps)),
    }
}

/// Offer a key to the transport. Keys typed into text inputs are ignored.
pub fn handle_key(
    key: TransportKey,
    context: KeyContext,
    direction: Direction,
    current_time: Seconds,
    fps: u32,
    total_duration: Seconds,
) -> KeyOutcome {
    if context.text_input_focused {
        return KeyOutcome::IGNORED;
    }
    KeyOutcome::handled(transport_action(
        key,
        direction,
        current_time,
        fps,
        total_duration,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(key: TransportKey, direction: Direction) -> TransportAction {
        transport_action(key, direction, 5.0, 24, 13.0)
    }

    #[test]
    fn test_j_toggles_reverse() {
        assert_eq!(
            action(TransportKey::J, Direction::Stopped),
            TransportAction::SetDirection(Direction::Reverse)
        );
        assert_eq!(
            action(TransportKey::J, Direction::Forward),
            TransportAction::SetDirection(Direction::Reverse)
        );
        assert_eq!(
            action(TransportKey::J, Direction::Reverse),
            TransportAction::SetDirection(Direction::Stopped)
        );
    }

    #[test]
    fn test_k_always_stops() {
        for direction in [Direction::Reverse, Direction::Stopped, Direction::Forward] {
            assert_eq!(
                action(TransportKey::K, direction),
                TransportAction::SetDirection(Direction::Stopped)
            );
        }
    }

    #[test]
    fn test_l_toggles_forward() {
        assert_eq!(
            action(TransportKey::L, Direction::Reverse),
            TransportAction::SetDirection(Direction::Forward)
        );
        assert_eq!(
            action(TransportKey::L, Direction::Forward),
            TransportAction::SetDirection(Direction::Stopped)
        );
    }

    #[test]
    fn test_space_toggles_between_stop_and_forward() {
        assert_eq!(
            action(TransportKey::Space, Direction::Stopped),
            TransportAction::SetDirection(Direction::Forward)
        );
        assert_eq!(
            action(TransportKey::Space, Direction::Forward),
            TransportAction::SetDirection(Direction::Stopped)
        );
        assert_eq!(
            action(TransportKey::Space, Direction::Reverse),
            TransportAction::SetDirection(Direction::Stopped)
        );
    }

    #[test]
    fn test_seek_keys() {
        assert_eq!(
            action(TransportKey::Home, Direction::Forward),
            TransportAction::Seek(0.0)
        );
        assert_eq!(
            action(TransportKey::End, Direction::Stopped),
            TransportAction::Seek(13.0)
        );
        assert_eq!(
            action(TransportKey::ArrowLeft, Direction::Forward),
            TransportAction::Seek(5.0 - 1.0 / 24.0)
        );
        assert_eq!(
            action(TransportKey::ArrowRight, Direction::Reverse),
            TransportAction::Seek(5.0 + 1.0 / 24.0)
        );
    }

    #[test]
    fn test_text_input_focus_ignores_keys() {
        let focused = KeyContext {
            text_input_focused: true,
        };
        let outcome = handle_key(TransportKey::Space, focused, Direction::Stopped, 0.0, 24, 10.0);
        assert_eq!(outcome, KeyOutcome::IGNORED);

        let outcome = handle_key(
            TransportKey::Space,
            KeyContext::default(),
            Direction::Stopped,
            0.0,
            24,
            10.0,
        );
        assert!(outcome.prevent_default);
        assert_eq!(
            outcome.action,
            Some(TransportAction::SetDirection(Direction::Forward))
        );
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!("j".parse::<TransportKey>(), Ok(TransportKey::J));
        assert_eq!(" ".parse::<TransportKey>(), Ok(TransportKey::Space));
        assert_eq!("ArrowRight".parse::<TransportKey>(), Ok(TransportKey::ArrowRight));
        assert_eq!(
            "x".parse::<TransportKey>(),
            Err(UnknownKey("x".to_string()))
        );
        let err = "Escape".parse::<TransportKey>().unwrap_err();
        assert_eq!(err.to_string(), r#"unknown transport key "Escape""#);
    }
}
