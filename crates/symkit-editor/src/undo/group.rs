//! Composite commands.

use super::{CommandState, UndoCommand};
use symkit_core::{LogicError, Result};

/// An ordered group of commands executed as one undo step
///
/// Children run in insertion order on execute and redo, and in reverse
/// order on undo. Once the group itself was executed, appended children are
/// executed immediately.
pub struct UndoCommandGroup {
    state: CommandState,
    children: Vec<Box<dyn UndoCommand>>,
}

impl UndoCommandGroup {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: CommandState::new(text),
            children: Vec::new(),
        }
    }

    /// Append a child command
    ///
    /// If the group is executed already, the child is executed right away
    /// and kept only if it changed something; the return value tells
    /// whether it did. Before execution the child is queued and `false` is
    /// returned.
    pub fn append_child(&mut self, mut cmd: Box<dyn UndoCommand>) -> Result<bool> {
        if !self.was_ever_executed() {
            self.children.push(cmd);
            return Ok(false);
        }
        if !self.is_currently_executed() {
            return Err(LogicError::NotExecuted(self.text().to_string()).into());
        }
        let changed = cmd.execute()?;
        if changed {
            self.children.push(cmd);
        }
        Ok(changed)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl UndoCommand for UndoCommandGroup {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn perform_execute(&mut self) -> Result<bool> {
        let mut changed = false;
        for i in 0..self.children.len() {
            match self.children[i].execute() {
                Ok(child_changed) => changed |= child_changed,
                Err(e) => {
                    // Roll back the children which already ran
                    for child in self.children[..i].iter_mut().rev() {
                        if let Err(undo_err) = child.undo() {
                            tracing::error!(
                                group = self.state.text(),
                                error = %undo_err,
                                "failed to roll back child command"
                            );
                        }
                    }
                    return Err(e);
                }
            }
        }
        Ok(changed)
    }

    fn perform_undo(&mut self) -> Result<()> {
        for child in self.children.iter_mut().rev() {
            child.undo()?;
        }
        Ok(())
    }

    fn perform_redo(&mut self) -> Result<()> {
        for child in self.children.iter_mut() {
            child.redo()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for UndoCommandGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoCommandGroup")
            .field("text", &self.state.text())
            .field("children", &self.children.len())
            .field("executed", &self.state.is_executed())
            .finish()
    }
}
