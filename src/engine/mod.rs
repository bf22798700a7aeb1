//! The multi-file scan/operate engine
//!
//! This module family implements the resumable iteration core: a pull-based
//! [`FileSequence`], live content bindings with a stale-refresh
//! [`RevertPolicy`], the [`Session`] configuration bundle, and the
//! [`Controller`] state machine that alternates between locating the next
//! interesting position and running the operate action there. The
//! [`search_session`] and [`replace_session`] constructors are thin
//! convenience wrappers over the same machinery.

pub mod buffer;
pub mod controller;
pub mod error;
pub mod replace;
pub mod revert;
pub mod search;
pub mod sequence;
pub mod session;

pub use buffer::{Buffer, BufferSet, ContentStore, FsStore};
pub use controller::Controller;
pub use error::EngineError;
pub use replace::{ReplaceCandidate, ReplaceSpec, ReplaceSummary, replace_session};
pub use revert::{RevertAction, RevertMode, RevertPolicy};
pub use search::{MatchLocation, search_session};
pub use sequence::FileSequence;
pub use session::{OperateFn, ScanFn, Session, SessionBuilder, Visit};
