//! Immediate-mode widgets. Every widget is a method on [`Ui`], drawn and
//! hit-tested in the same call.

pub mod button;
pub mod container;
pub mod context;
pub mod row;
pub mod style;
pub mod text;

pub use context::{InputState, Response, ScrollState, Ui, UiContext};
pub use row::row_action;
pub use style::{Color, Theme};
