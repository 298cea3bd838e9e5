//! egui integration.

pub mod keys;

pub use keys::{apply_egui_transport, take_transport_keys, transport_key};
