//! Round scoring and state-transition engine for the koshtina burn ledger.
//!
//! Everything in this module is synchronous, pure in-memory computation. The
//! engine owns no I/O and no ambient state: callers hold a [`Session`] and
//! issue commands against it. Derived data (totals, burn flags, hero) is fully
//! recomputed from the entry list after every mutation rather than updated
//! incrementally.

pub mod entry;
pub mod error;
pub mod player;
pub mod round;
pub mod session;

use uuid::Uuid;

pub use self::entry::{EntryKind, ScoreEntry};
pub use self::error::EngineError;
pub use self::player::{Player, PlayerRegistry, UNKNOWN_PLAYER};
pub use self::round::{ArchivedRound, PlayerStatus, Round, compute_statuses};
pub use self::session::{RoundEvent, Session};

/// Identifier referencing a registered player.
pub type PlayerId = Uuid;

/// Burn threshold used when no configuration overrides it.
pub const DEFAULT_BURN_LIMIT: i32 = 31;
