//! Adapters between the engine and the outside world: CSV input/output and
//! the terminal presenter.

pub mod csv;
pub mod presenter;
pub mod text;
