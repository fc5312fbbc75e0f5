//! **sidenav-core**: the grid-based rendering and event-loop layer of the
//! *sidenav* workspace.
//!
//! It provides geometry primitives, styled cells, a shared-buffer grid with
//! frame diffing, input messages, the observer [`Subject`] used for change
//! notification, and the Elm-architecture application loop with its
//! single-threaded timer scheduler.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod observe;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Mailbox, Model, TimerId};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use messages::*;
pub use observe::{ListenerId, Subject, Topic};
pub use style::{AttrMask, Color, Style};
