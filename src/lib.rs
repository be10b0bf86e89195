#![warn(missing_docs)]

//! # `flowline`
//!
//! The path-drawing engine behind [Numberlink](https://en.wikipedia.org/wiki/Numberlink) puzzles as played in the mobile game Flow Free.
//! Load levels from a pack with [`load_levels`] or put one together with a [`LevelBuilder`](builder::LevelBuilder),
//! then draw on it through a [`DragSession`]: [`pick`](DragSession::pick) where the pointer goes down,
//! [`drag_to`](DragSession::drag_to) wherever it moves and [`release`](DragSession::release) when it comes up.
//!
//! Every flow is a chain of cells from its first terminus to its last.
//! Drawing never searches for a path; a drag extends the held flow along one straight run from its tip,
//! evicting any other flow it runs over (see [`Level::reclaim`]) and stopping short of termini.
//! A flow reaching its other terminus is completed; a level whose flows are all completed is solved,
//! and starred if they cover the whole board.
//!
//! ```
//! use flowline::{load_levels, DragSession, LevelState, Location};
//!
//! let mut levels = load_levels("{{1,1,3,1},3,0,0}").unwrap();
//! let level = &mut levels[0];
//! let mut session = DragSession::new();
//!
//! session.pick(level, Location(0, 0));
//! let progress = session.drag_to(level, Location(2, 0)).unwrap();
//! assert!(progress.is_solved());
//! assert_eq!(level.rating(), LevelState::Completed);
//! assert_eq!(format!("{}", level), "AaA
//! ...
//! ...
//! ");
//! ```
//!
//! Levels, ratings and time-trial scores persist through a [`Library`](library::Library).

pub use affiliation::{Color, FlowId, PALETTE};
pub use cell::{FrozenCell, FrozenCellType};
pub use config::{StoreConfig, TimeRecordPolicy};
pub use error::{AllocationFailure, LoadError};
pub use flow::{ChainPosition, Flow, GrowthEnd};
pub use level::{Level, LevelState};
pub use location::{Coord, Dimension, Location};
pub use progress::Progress;
pub use reclaim::{Reclaim, ReclaimMode};
pub use session::DragSession;
pub use store::{load_levels, save_levels};

mod tests;
pub(crate) mod affiliation;
pub(crate) mod cell;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod flow;
pub(crate) mod level;
pub(crate) mod location;
pub(crate) mod progress;
pub(crate) mod reclaim;
pub(crate) mod router;
pub(crate) mod session;
pub mod builder;
pub mod library;
pub mod score;
pub mod shape;
pub mod store;
