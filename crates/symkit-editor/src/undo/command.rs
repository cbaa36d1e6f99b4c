//! The undo command trait.

use symkit_core::{LogicError, Result};

/// Execution bookkeeping shared by all commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandState {
    text: String,
    was_ever_executed: bool,
    is_executed: bool,
}

impl CommandState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            was_ever_executed: false,
            is_executed: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn was_ever_executed(&self) -> bool {
        self.was_ever_executed
    }

    pub fn is_executed(&self) -> bool {
        self.is_executed
    }
}

/// A reversible document mutation
///
/// Implementors provide the `perform_*` hooks; the provided `execute`,
/// `undo` and `redo` methods enforce the life cycle:
///
/// - `execute` runs at most once and reports whether anything changed
/// - `undo` requires the executed state
/// - `redo` requires a previously executed, currently undone command
pub trait UndoCommand {
    /// Execution bookkeeping
    fn state(&self) -> &CommandState;

    /// Mutable execution bookkeeping
    fn state_mut(&mut self) -> &mut CommandState;

    /// Apply the mutation for the first time, returning whether the document
    /// changed. On error nothing must be left modified.
    fn perform_execute(&mut self) -> Result<bool>;

    /// Revert the mutation
    fn perform_undo(&mut self) -> Result<()>;

    /// Re-apply the mutation after an undo
    fn perform_redo(&mut self) -> Result<()>;

    /// Display text, e.g. for "Undo: Move Pin"
    fn text(&self) -> &str {
        self.state().text()
    }

    fn was_ever_executed(&self) -> bool {
        self.state().was_ever_executed()
    }

    fn is_currently_executed(&self) -> bool {
        self.state().is_executed()
    }

    /// Execute the command
    fn execute(&mut self) -> Result<bool> {
        if self.was_ever_executed() {
            return Err(LogicError::AlreadyExecuted(self.text().to_string()).into());
        }
        tracing::debug!(command = self.text(), "execute");
        let changed = self.perform_execute()?;
        let state = self.state_mut();
        state.was_ever_executed = true;
        state.is_executed = true;
        Ok(changed)
    }

    /// Undo the command
    fn undo(&mut self) -> Result<()> {
        if !self.is_currently_executed() {
            return Err(LogicError::NotExecuted(self.text().to_string()).into());
        }
        tracing::debug!(command = self.text(), "undo");
        self.perform_undo()?;
        self.state_mut().is_executed = false;
        Ok(())
    }

    /// Redo the command
    fn redo(&mut self) -> Result<()> {
        if !self.was_ever_executed() {
            return Err(LogicError::NotExecuted(self.text().to_string()).into());
        }
        if self.is_currently_executed() {
            return Err(LogicError::AlreadyInExecutedState(self.text().to_string()).into());
        }
        tracing::debug!(command = self.text(), "redo");
        self.perform_redo()?;
        self.state_mut().is_executed = true;
        Ok(())
    }
}
