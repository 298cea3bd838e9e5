pub mod clock;
pub mod state;
pub mod sync;
pub mod ticker;
pub mod transport;

pub use clock::{PlaybackClock, TickOutcome};
pub use state::Direction;
pub use sync::{media_target_at, MediaSyncTarget};
pub use ticker::{tick_period, ClockTick, ManualTicker, TickSource, TokioTicker};
pub use transport::{handle_key, KeyContext, KeyOutcome, TransportAction, TransportKey, UnknownKey};
