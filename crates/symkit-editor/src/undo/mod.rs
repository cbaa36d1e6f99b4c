//! Undo/redo infrastructure.
//!
//! Every document mutation is wrapped in an [`UndoCommand`]. Commands are
//! composed with [`UndoCommandGroup`] and recorded on the [`UndoStack`].

mod command;
mod group;
mod stack;

pub use command::{CommandState, UndoCommand};
pub use group::UndoCommandGroup;
pub use stack::UndoStack;
