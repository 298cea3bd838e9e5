//! Timeline editor controller.
//!
//! Owns the only mutable engine state: the playback clock, zoom and scroll,
//! selection, and the in-progress drag. Clip data is supplied by the host
//! on every call that needs it and is never mutated here; edits leave as
//! [`TimelineHost`] callbacks.

use crate::audio::gain::clamp_gain;
use crate::audio::waveform::WaveformShape;
use crate::config::EngineConfig;
use crate::core::clip::{ClipId, TimelineClip};
use crate::core::time::{format_timecode, Seconds};
use crate::host::TimelineHost;
use crate::interaction::drag::{DragEndReason, DragOutcome, DragSession, DragTarget, ListenerLease};
use crate::interaction::scrub::{ScrubController, ScrubResult};
use crate::playback::clock::{PlaybackClock, TickOutcome};
use crate::playback::state::Direction;
use crate::playback::sync::media_target_at;
use crate::playback::ticker::{tick_period, ManualTicker, TickSource};
use crate::playback::transport::{self, KeyContext, KeyOutcome, TransportAction, TransportKey};
use crate::timeline::av_offset::audio_lane_placement;
use crate::timeline::sequence::SequenceLayout;
use crate::timeline::trim::{apply_trim, TrimHandle, TrimLane};

/// Host-held playback handle
pub trait PlaybackControl {
    /// Jump to `time`, clamped to the sequence. Direction is unchanged.
    fn seek(&mut self, time: Seconds);
    /// Play forwards
    fn play(&mut self);
    /// Stop playback
    fn pause(&mut self);
    fn current_time(&self) -> Seconds;
    /// Clips are supplied per call, so there is nothing to reload
    fn refresh_clips(&mut self);
}

/// Non-linear timeline editor over a host-owned clip array
pub struct TimelineEditor<H: TimelineHost> {
    host: H,
    clock: PlaybackClock,
    scrub: ScrubController,
    waveform: WaveformShape,
    ticker: Box<dyn TickSource>,
    /// Derived from the clips most recently supplied by the host
    layout: SequenceLayout,
    selection: Option<ClipId>,
    drag: Option<DragSession>,
}

impl<H: TimelineHost> TimelineEditor<H> {
    /// Create an editor with a [`ManualTicker`]
    pub fn new(config: &EngineConfig, host: H) -> Self {
        Self {
            host,
            clock: PlaybackClock::new(config.fps),
            scrub: config.scrub_controller(),
            waveform: config.waveform_shape(),
            ticker: Box::new(ManualTicker::new()),
            layout: SequenceLayout::default(),
            selection: None,
            drag: None,
        }
    }

    /// Replace the tick source. Any running ticker is stopped first.
    pub fn with_ticker(mut self, ticker: impl TickSource + 'static) -> Self {
        self.ticker.stop();
        self.ticker = Box::new(ticker);
        self.sync_ticker();
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn direction(&self) -> Direction {
        self.clock.direction()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn scrub(&self) -> &ScrubController {
        &self.scrub
    }

    pub fn layout(&self) -> &SequenceLayout {
        &self.layout
    }

    pub fn total_duration(&self) -> Seconds {
        self.layout.total_duration()
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn ticker_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Playhead as SMPTE timecode
    pub fn timecode(&self) -> String {
        format_timecode(self.clock.current_time(), self.clock.fps())
    }

    /// Take in the host's current clip array.
    ///
    /// If the sequence shrank under a parked playhead, the playhead is
    /// pulled back onto the new end.
    pub fn observe_clips(&mut self, clips: &[TimelineClip]) {
        self.layout = SequenceLayout::from_clips(clips);
        let total = self.layout.total_duration();
        if self.clock.current_time() > total {
            self.clock.seek(total, total);
            self.notify_playback();
        }
    }

    // ── Playback ─────────────────────────────────────────────────────

    /// Advance the clock by one frame. Call once per tick while playing.
    pub fn tick(&mut self, clips: &[TimelineClip]) -> TickOutcome {
        self.observe_clips(clips);
        let outcome = self.clock.tick(self.layout.total_duration());
        if outcome == TickOutcome::Idle {
            return outcome;
        }

        self.notify_playback();
        self.sync_media(clips);
        if outcome.stopped_at_boundary() {
            self.sync_ticker();
        }
        outcome
    }

    /// Seek with the current clips, notifying the host and syncing media
    pub fn seek_to(&mut self, clips: &[TimelineClip], time: Seconds) -> Seconds {
        self.observe_clips(clips);
        let applied = self.clock.seek(time, self.layout.total_duration());
        self.notify_playback();
        self.sync_media(clips);
        applied
    }

    /// Change direction, starting or stopping the ticker to match
    pub fn set_direction(&mut self, direction: Direction) {
        if self.clock.set_direction(direction) {
            self.notify_playback();
        }
        self.sync_ticker();
    }

    /// Ask the host to seek its media element to the playhead
    pub fn sync_media(&mut self, clips: &[TimelineClip]) {
        if let Some(target) = media_target_at(clips, self.clock.current_time()) {
            self.host.on_media_sync(&target);
        }
    }

    /// Offer a key press to the transport
    pub fn handle_key(
        &mut self,
        clips: &[TimelineClip],
        key: TransportKey,
        context: KeyContext,
    ) -> KeyOutcome {
        self.observe_clips(clips);
        let outcome = transport::handle_key(
            key,
            context,
            self.clock.direction(),
            self.clock.current_time(),
            self.clock.fps(),
            self.layout.total_duration(),
        );

        match outcome.action {
            Some(TransportAction::SetDirection(direction)) => self.set_direction(direction),
            Some(TransportAction::Seek(time)) => {
                self.seek_to(clips, time);
            }
            None => {}
        }
        outcome
    }

    fn notify_playback(&mut self) {
        self.host
            .on_playback_change(self.clock.is_playing(), self.clock.current_time());
    }

    fn sync_ticker(&mut self) {
        let playing = self.clock.is_playing();
        if playing && !self.ticker.is_running() {
            self.ticker.start(tick_period(self.clock.fps()));
        } else if !playing && self.ticker.is_running() {
            self.ticker.stop();
        }
    }

    // ── View ─────────────────────────────────────────────────────────

    /// Set zoom in pixels per second. Returns the clamped zoom.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.scrub.set_zoom(zoom)
    }

    /// Set horizontal scroll in pixels. Returns the clamped offset.
    pub fn set_scroll_offset(&mut self, offset: f64) -> f64 {
        self.scrub.set_scroll_offset(offset)
    }

    /// Ruler click: seek to the unsnapped time under the pointer
    pub fn ruler_click(&mut self, clips: &[TimelineClip], viewport_x: f64) -> Seconds {
        self.observe_clips(clips);
        let time = self.scrub.ruler_time(viewport_x, self.layout.total_duration());
        self.seek_to(clips, time)
    }

    /// Waveform peaks for a clip rendered at `width` pixels
    pub fn waveform_peaks(&self, clip: &TimelineClip, real: Option<&[f32]>, width: f32) -> Vec<f32> {
        self.waveform.peaks_or_synthetic(real, &clip.id, width)
    }

    // ── Drags ────────────────────────────────────────────────────────

    /// Start dragging the playhead. Seeks immediately to the snapped time.
    pub fn begin_playhead_drag(
        &mut self,
        clips: &[TimelineClip],
        viewport_x: f64,
        lease: ListenerLease,
    ) -> ScrubResult {
        self.cancel_drag();
        self.observe_clips(clips);

        let result = self.scrub.drag_time(
            viewport_x,
            self.layout.edges(),
            self.layout.total_duration(),
        );
        let mut session = DragSession::begin(DragTarget::Playhead, result.time, None, lease);
        session.record(result);
        self.drag = Some(session);
        self.seek_to(clips, result.time);
        result
    }

    /// Start dragging a trim handle of `clip_id`.
    ///
    /// Returns false (releasing the lease) if the clip is not in `clips`.
    pub fn begin_trim_drag(
        &mut self,
        clips: &[TimelineClip],
        clip_id: &str,
        lane: TrimLane,
        handle: TrimHandle,
        viewport_x: f64,
        lease: ListenerLease,
    ) -> bool {
        self.cancel_drag();
        self.observe_clips(clips);

        let Some(index) = clips.iter().position(|c| c.id == clip_id) else {
            log::warn!("trim drag on unknown clip {}", clip_id);
            return false;
        };
        let clip = &clips[index];
        let clip_start = self.layout.start_of(index).unwrap_or(0.0);

        let handle_origin = match (lane, handle) {
            (TrimLane::Video, TrimHandle::Start) => clip_start,
            (TrimLane::Video, TrimHandle::End) => clip_start + clip.effective_duration(),
            (TrimLane::Audio, TrimHandle::Start) => audio_lane_placement(clip, clip_start).start,
            (TrimLane::Audio, TrimHandle::End) => audio_lane_placement(clip, clip_start).end(),
        };

        // A video handle carries its clip's own edges along with it. An audio
        // handle may snap back onto its clip's video edges.
        let snap_edges: Vec<Seconds> = self
            .layout
            .edges()
            .iter()
            .enumerate()
            .filter(|(i, _)| lane == TrimLane::Audio || (*i != index && *i != index + 1))
            .map(|(_, e)| *e)
            .collect();

        let origin = self.scrub.raw_time(self.scrub.content_x(viewport_x));
        let target = DragTarget::Trim {
            clip_id: clip.id.clone(),
            lane,
            handle,
        };
        let session = DragSession::begin(target, origin, Some(clip.clone()), lease)
            .with_handle(handle_origin, snap_edges);
        self.drag = Some(session);
        true
    }

    /// Pointer moved during a drag. Returns where the playhead or handle resolved.
    pub fn drag_move(&mut self, clips: &[TimelineClip], viewport_x: f64) -> Option<ScrubResult> {
        self.observe_clips(clips);
        let target = self.drag.as_ref()?.target().clone();

        match target {
            DragTarget::Playhead => {
                let result = self.scrub.drag_time(
                    viewport_x,
                    self.layout.edges(),
                    self.layout.total_duration(),
                );
                if let Some(session) = self.drag.as_mut() {
                    session.record(result);
                }
                self.seek_to(clips, result.time);
                Some(result)
            }
            DragTarget::Trim {
                clip_id,
                lane,
                handle,
            } => {
                let session = self.drag.as_mut()?;
                let pointer = self.scrub.raw_time(self.scrub.content_x(viewport_x));
                let candidate = session.handle_candidate(pointer);
                let result = self
                    .scrub
                    .snap(self.scrub.pixel_x(candidate), session.snap_edges());
                let delta = session.record(result);
                let anchor = session.anchor()?.clone();

                let trim = apply_trim(&anchor, lane, handle, delta);
                match lane {
                    TrimLane::Video => self.host.on_clip_update(&clip_id, trim.to_update()),
                    TrimLane::Audio => {
                        self.host
                            .on_audio_trim_update(&clip_id, trim.trim_start, trim.trim_end)
                    }
                }
                Some(result)
            }
        }
    }

    /// Pointer released: finish the drag
    pub fn end_drag(&mut self) -> Option<DragOutcome> {
        self.drag
            .take()
            .map(|session| session.end(DragEndReason::Released))
    }

    /// Escape or focus loss: abandon the drag without further updates
    pub fn cancel_drag(&mut self) -> Option<DragOutcome> {
        self.drag
            .take()
            .map(|session| session.end(DragEndReason::Cancelled))
    }

    // ── Clip requests ────────────────────────────────────────────────

    /// Select a clip, or clear the selection with `None`
    pub fn select_clip(&mut self, clip_id: Option<&str>) {
        if self.selection.as_deref() == clip_id {
            return;
        }
        self.selection = clip_id.map(str::to_string);
        self.host.on_clip_select(clip_id);
    }

    /// Request removal of a clip. Returns false if it is not in `clips`.
    pub fn remove_clip(&mut self, clips: &[TimelineClip], clip_id: &str) -> bool {
        if !clips.iter().any(|c| c.id == clip_id) {
            return false;
        }

        let dragging_it = matches!(
            self.drag.as_ref().map(DragSession::target),
            Some(DragTarget::Trim { clip_id: id, .. }) if id == clip_id
        );
        if dragging_it {
            self.cancel_drag();
        }

        self.host.on_clip_remove(clip_id);
        if self.selection.as_deref() == Some(clip_id) {
            self.select_clip(None);
        }
        true
    }

    /// Request moving a clip to `new_index`, clamped to the sequence.
    ///
    /// Returns false if the clip is unknown or already at that index.
    pub fn reorder_clip(&mut self, clips: &[TimelineClip], clip_id: &str, new_index: usize) -> bool {
        let Some(current) = clips.iter().position(|c| c.id == clip_id) else {
            return false;
        };
        let new_index = new_index.min(clips.len() - 1);
        if new_index == current {
            return false;
        }
        self.host.on_clip_reorder(clip_id, new_index);
        true
    }

    /// Request a gain change, clamped to `[0, 2]`. Returns the applied gain.
    pub fn set_audio_gain(&mut self, clips: &[TimelineClip], clip_id: &str, gain: f64) -> Option<f64> {
        if !clips.iter().any(|c| c.id == clip_id) {
            return None;
        }
        let gain = clamp_gain(gain);
        self.host.on_audio_gain_change(clip_id, gain);
        Some(gain)
    }
}

impl<H: TimelineHost> PlaybackControl for TimelineEditor<H> {
    fn seek(&mut self, time: Seconds) {
        self.clock.seek(time, self.layout.total_duration());
        self.notify_playback();
    }

    fn play(&mut self) {
        self.set_direction(Direction::Forward);
    }

    fn pause(&mut self) {
        self.set_direction(Direction::Stopped);
    }

    fn current_time(&self) -> Seconds {
        self.clock.current_time()
    }

    fn refresh_clips(&mut self) {
        log::trace!("refresh_clips: clips are supplied per call");
    }
}

impl<H: TimelineHost> Drop for TimelineEditor<H> {
    fn drop(&mut self) {
        self.cancel_drag();
        self.ticker.stop();
    }
}
