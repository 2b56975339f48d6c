//! Match and serve state machine for a wrist-worn racquet-sport scoring aid.

pub mod clock;
pub mod config;
pub mod debounce;
pub mod machine;
pub mod serve;
pub mod session;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load_settings_from, Settings};
pub use debounce::{PendingTap, TapDebouncer, TapOutcome, DEFAULT_TAP_WINDOW};
pub use machine::MatchStateMachine;
pub use serve::derive_serve_court;
pub use session::MatchSession;
pub use state::MatchState;

/// A run of points only counts as a streak from this many in a row.
pub const STREAK_THRESHOLD: u32 = 2;
