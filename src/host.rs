//! Callbacks from the engine to its host.
//!
//! Every outbound effect is a fire-and-forget call on [`TimelineHost`] with
//! last-write-wins semantics. The optional callbacks fall back to
//! `on_clip_update` with the equivalent partial update, so a host that only
//! implements `on_clip_update` still sees audio edits.

use crossbeam::channel::Sender;
use serde::{Deserialize, Serialize};

use crate::core::clip::{ClipId, ClipUpdate};
use crate::core::time::Seconds;
use crate::playback::sync::MediaSyncTarget;

/// Receiver of engine output
pub trait TimelineHost {
    /// Apply a partial update to a clip
    fn on_clip_update(&mut self, clip_id: &str, update: ClipUpdate);

    fn on_audio_trim_update(&mut self, clip_id: &str, audio_trim_start: Seconds, audio_trim_end: Seconds) {
        self.on_clip_update(clip_id, ClipUpdate::audio_trim(audio_trim_start, audio_trim_end));
    }

    fn on_audio_gain_change(&mut self, clip_id: &str, gain: f64) {
        self.on_clip_update(clip_id, ClipUpdate::audio_gain(gain));
    }

    fn on_clip_remove(&mut self, _clip_id: &str) {}

    fn on_clip_reorder(&mut self, _clip_id: &str, _new_index: usize) {}

    /// `None` clears the selection
    fn on_clip_select(&mut self, _clip_id: Option<&str>) {}

    /// Fired on every tick, explicit seek, and direction change
    fn on_playback_change(&mut self, _is_playing: bool, _current_time: Seconds) {}

    /// Where the host's media element should seek for the current time
    fn on_media_sync(&mut self, _target: &MediaSyncTarget) {}
}

/// Engine output as data, for hosts that prefer a queue to callbacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    #[serde(rename_all = "camelCase")]
    ClipUpdate { clip_id: ClipId, update: ClipUpdate },
    #[serde(rename_all = "camelCase")]
    AudioTrimUpdate {
        clip_id: ClipId,
        audio_trim_start: Seconds,
        audio_trim_end: Seconds,
    },
    #[serde(rename_all = "camelCase")]
    AudioGainChange { clip_id: ClipId, gain: f64 },
    #[serde(rename_all = "camelCase")]
    ClipRemove { clip_id: ClipId },
    #[serde(rename_all = "camelCase")]
    ClipReorder { clip_id: ClipId, new_index: usize },
    #[serde(rename_all = "camelCase")]
    ClipSelect { clip_id: Option<ClipId> },
    #[serde(rename_all = "camelCase")]
    PlaybackChange { is_playing: bool, current_time: Seconds },
    MediaSync(MediaSyncTarget),
}

/// Host adapter that forwards every callback into a crossbeam channel.
///
/// Sends to a disconnected receiver are dropped; the engine never blocks
/// on its host.
#[derive(Debug, Clone)]
pub struct ChannelHost {
    tx: Sender<HostEvent>,
}

impl ChannelHost {
    pub fn new(tx: Sender<HostEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: HostEvent) {
        if self.tx.send(event).is_err() {
            log::trace!("host event receiver disconnected, dropping event");
        }
    }
}

impl TimelineHost for ChannelHost {
    fn on_clip_update(&mut self, clip_id: &str, update: ClipUpdate) {
        self.send(HostEvent::ClipUpdate {
            clip_id: clip_id.to_string(),
            update,
        });
    }

    fn on_audio_trim_update(&mut self, clip_id: &str, audio_trim_start: Seconds, audio_trim_end: Seconds) {
        self.send(HostEvent::AudioTrimUpdate {
            clip_id: clip_id.to_string(),
            audio_trim_start,
            audio_trim_end,
        });
    }

    fn on_audio_gain_change(&mut self, clip_id: &str, gain: f64) {
        self.send(HostEvent::AudioGainChange {
            clip_id: clip_id.to_string(),
            gain,
        });
    }

    fn on_clip_remove(&mut self, clip_id: &str) {
        self.send(HostEvent::ClipRemove {
            clip_id: clip_id.to_string(),
        });
    }

    fn on_clip_reorder(&mut self, clip_id: &str, new_index: usize) {
        self.send(HostEvent::ClipReorder {
            clip_id: clip_id.to_string(),
            new_index,
        });
    }

    fn on_clip_select(&mut self, clip_id: Option<&str>) {
        self.send(HostEvent::ClipSelect {
            clip_id: clip_id.map(str::to_string),
        });
    }

    fn on_playback_change(&mut self, is_playing: bool, current_time: Seconds) {
        self.send(HostEvent::PlaybackChange {
            is_playing,
            current_time,
        });
    }

    fn on_media_sync(&mut self, target: &MediaSyncTarget) {
        self.send(HostEvent::MediaSync(target.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;

    /// Host implementing only the required callback
    #[derive(Default)]
    struct MinimalHost {
        updates: Vec<(String, ClipUpdate)>,
    }

    impl TimelineHost for MinimalHost {
        fn on_clip_update(&mut self, clip_id: &str, update: ClipUpdate) {
            self.updates.push((clip_id.to_string(), update));
        }
    }

    #[test]
    fn test_audio_callbacks_fall_back_to_clip_update() {
        let mut host = MinimalHost::default();
        host.on_audio_trim_update("a", 1.2, 0.0);
        host.on_audio_gain_change("a", 1.5);
        host.on_clip_remove("a");

        assert_eq!(
            host.updates,
            vec![
                ("a".to_string(), ClipUpdate::audio_trim(1.2, 0.0)),
                ("a".to_string(), ClipUpdate::audio_gain(1.5)),
            ]
        );
    }

    #[test]
    fn test_channel_host_forwards_events() {
        let (tx, rx) = channel::unbounded();
        let mut host = ChannelHost::new(tx);
        host.on_audio_trim_update("a", 0.5, 0.25);
        host.on_playback_change(true, 1.0);
        host.on_clip_select(None);

        let events: Vec<HostEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                HostEvent::AudioTrimUpdate {
                    clip_id: "a".to_string(),
                    audio_trim_start: 0.5,
                    audio_trim_end: 0.25,
                },
                HostEvent::PlaybackChange {
                    is_playing: true,
                    current_time: 1.0,
                },
                HostEvent::ClipSelect { clip_id: None },
            ]
        );
    }

    #[test]
    fn test_disconnected_channel_does_not_panic() {
        let (tx, rx) = channel::unbounded();
        drop(rx);
        let mut host = ChannelHost::new(tx);
        host.on_clip_remove("a");
    }

    #[test]
    fn test_event_json_shape() {
        let event = HostEvent::ClipReorder {
            clip_id: "a".to_string(),
            new_index: 2,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"clipReorder","clipId":"a","newIndex":2}"#);
    }
}
