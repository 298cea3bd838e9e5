//! Cutline: a non-linear editing timeline engine.
//!
//! The host owns the clip array and hands it to the engine on every call.
//! The engine owns playback, zoom, selection and drag state, and reports
//! edits back through [`TimelineHost`] callbacks.

pub mod audio;
pub mod config;
pub mod core;
pub mod editor;
pub mod error;
pub mod host;
pub mod interaction;
pub mod playback;
pub mod timeline;
pub mod ui;

pub use crate::config::{load_clips, EngineConfig};
pub use crate::core::{ClipId, ClipStatus, ClipUpdate, Seconds, TimelineClip};
pub use crate::editor::{PlaybackControl, TimelineEditor};
pub use crate::error::{EngineError, Result};
pub use crate::host::{ChannelHost, HostEvent, TimelineHost};
