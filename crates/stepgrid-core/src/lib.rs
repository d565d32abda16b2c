//! **stepgrid-core** — Grid visualization framework (core types).
//!
//! This crate provides the foundational types shared across the *stepgrid*
//! workspace: geometry primitives, input events, styled render cells, a
//! diffable render grid, and the Elm-architecture application loop with a
//! fixed-cadence tick.

pub mod app;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use geom::{Point, Range};
pub use grid::{Cell, Frame, FrameCell, Grid, compute_frame};
pub use messages::{Key, Mods, MouseAction, Msg};
pub use style::{Color, Style};
