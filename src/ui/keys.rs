//! egui keyboard adapter for the transport.
//!
//! Transport keys are consumed from egui's input queue so that widgets
//! further down the frame don't also react to them (Space on a focused
//! button, arrows in a scroll area).

use egui::{Context, Event, Key, Modifiers};

use crate::core::clip::TimelineClip;
use crate::editor::TimelineEditor;
use crate::host::TimelineHost;
use crate::playback::transport::{KeyContext, KeyOutcome, TransportKey};

/// Transport key bound to an egui key, if any
pub fn transport_key(key: Key) -> Option<TransportKey> {
    match key {
        Key::J => Some(TransportKey::J),
        Key::K => Some(TransportKey::K),
        Key::L => Some(TransportKey::L),
        Key::Space => Some(TransportKey::Space),
        Key::Home => Some(TransportKey::Home),
        Key::End => Some(TransportKey::End),
        Key::ArrowLeft => Some(TransportKey::ArrowLeft),
        Key::ArrowRight => Some(TransportKey::ArrowRight),
        _ => None,
    }
}

/// Consume this frame's unmodified transport key presses, in arrival order.
///
/// Every press counts, key repeats included, so two arrow presses in one
/// frame step two frames. Returns nothing while a text widget has keyboard
/// focus; those keys belong to the text edit.
pub fn take_transport_keys(ctx: &Context) -> Vec<TransportKey> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input_mut(|input| {
        let mut keys = Vec::new();
        input.events.retain(|event| match event {
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } if *modifiers == Modifiers::NONE => match transport_key(*key) {
                Some(transport) => {
                    keys.push(transport);
                    false
                }
                None => true,
            },
            _ => true,
        });
        keys
    })
}

/// Feed this frame's transport keys to `editor`
pub fn apply_egui_transport<H: TimelineHost>(
    ctx: &Context,
    editor: &mut TimelineEditor<H>,
    clips: &[TimelineClip],
) -> Vec<KeyOutcome> {
    take_transport_keys(ctx)
        .into_iter()
        .map(|key| editor.handle_key(clips, key, KeyContext::default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::host::ChannelHost;
    use crate::playback::state::Direction;
    use crossbeam::channel;
    use egui::RawInput;

    fn key_event(key: Key, modifiers: Modifiers) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn key_press(key: Key) -> Event {
        key_event(key, Modifiers::NONE)
    }

    fn editor() -> TimelineEditor<ChannelHost> {
        let (tx, _rx) = channel::unbounded();
        TimelineEditor::new(&EngineConfig::default(), ChannelHost::new(tx))
    }

    /// Run one frame with `events` and feed its transport keys to `editor`
    fn run_frame(
        editor: &mut TimelineEditor<ChannelHost>,
        clips: &[TimelineClip],
        events: Vec<Event>,
    ) -> Vec<KeyOutcome> {
        let ctx = Context::default();
        let input = RawInput {
            events,
            ..RawInput::default()
        };
        let mut outcomes = Vec::new();
        let _ = ctx.run(input, |ctx| {
            outcomes = apply_egui_transport(ctx, editor, clips);
        });
        outcomes
    }

    #[test]
    fn test_key_mapping() {
        let bound = [
            Key::J,
            Key::K,
            Key::L,
            Key::Space,
            Key::Home,
            Key::End,
            Key::ArrowLeft,
            Key::ArrowRight,
        ];
        for key in bound {
            assert!(transport_key(key).is_some());
        }
        assert_eq!(transport_key(Key::ArrowLeft), Some(TransportKey::ArrowLeft));
        assert_eq!(transport_key(Key::A), None);
        assert_eq!(transport_key(Key::Enter), None);
    }

    #[test]
    fn test_no_input_no_keys() {
        let ctx = Context::default();
        let _ = ctx.run(RawInput::default(), |ctx| {
            assert!(take_transport_keys(ctx).is_empty());
        });
    }

    #[test]
    fn test_l_press_plays_editor() {
        let mut editor = editor();
        let clips = vec![TimelineClip::new("a", 5.0)];

        let outcomes = run_frame(&mut editor, &clips, vec![key_press(Key::L), key_press(Key::A)]);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].prevent_default);
        assert_eq!(editor.direction(), Direction::Forward);
    }

    #[test]
    fn test_keys_applied_in_press_order() {
        let mut editor = editor();
        let clips = vec![TimelineClip::new("a", 5.0)];

        run_frame(&mut editor, &clips, vec![key_press(Key::L), key_press(Key::K)]);
        assert_eq!(editor.direction(), Direction::Stopped);

        run_frame(&mut editor, &clips, vec![key_press(Key::K), key_press(Key::L)]);
        assert_eq!(editor.direction(), Direction::Forward);
    }

    #[test]
    fn test_repeated_presses_each_count() {
        let mut editor = editor();
        let clips = vec![TimelineClip::new("a", 5.0)];

        let outcomes = run_frame(
            &mut editor,
            &clips,
            vec![key_press(Key::ArrowRight), key_press(Key::ArrowRight)],
        );
        assert_eq!(outcomes.len(), 2);
        assert!((editor.clock().current_time() - 2.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_modified_and_unbound_keys_left_in_queue() {
        let ctx = Context::default();
        let input = RawInput {
            events: vec![
                key_event(Key::L, Modifiers::COMMAND),
                key_press(Key::A),
                key_press(Key::Space),
            ],
            ..RawInput::default()
        };
        let _ = ctx.run(input, |ctx| {
            assert_eq!(take_transport_keys(ctx), vec![TransportKey::Space]);
            assert_eq!(ctx.input(|i| i.events.len()), 2);
        });
    }
}
