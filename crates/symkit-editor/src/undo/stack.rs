//! The undo stack.

use super::{UndoCommand, UndoCommandGroup};
use symkit_core::{LogicError, Result};

/// Linear undo history with an optional open command group
///
/// `current` is the number of commands in the executed state; commands
/// behind it can be redone until a new command is recorded.
pub struct UndoStack {
    commands: Vec<Box<dyn UndoCommand>>,
    current: usize,
    clean_index: Option<usize>,
    active_group: Option<UndoCommandGroup>,
    limit: Option<usize>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            current: 0,
            clean_index: Some(0),
            active_group: None,
            limit: None,
        }
    }

    /// Stack keeping at most `limit` undo steps
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0),
            ..Self::new()
        }
    }

    /// Execute `cmd` and record it if it changed something
    pub fn execute(&mut self, mut cmd: Box<dyn UndoCommand>) -> Result<bool> {
        if self.active_group.is_some() {
            return Err(LogicError::GroupAlreadyActive.into());
        }
        let changed = cmd.execute()?;
        if changed {
            self.push(cmd);
        } else {
            tracing::debug!(command = cmd.text(), "discarding command without changes");
        }
        Ok(changed)
    }

    /// Open a new command group
    pub fn begin_group(&mut self, text: impl Into<String>) -> Result<()> {
        if self.active_group.is_some() {
            return Err(LogicError::GroupAlreadyActive.into());
        }
        let mut group = UndoCommandGroup::new(text);
        group.execute()?;
        tracing::debug!(group = group.text(), "begin command group");
        self.active_group = Some(group);
        Ok(())
    }

    /// Execute `cmd` as part of the open group
    pub fn append_to_group(&mut self, cmd: Box<dyn UndoCommand>) -> Result<bool> {
        let group = self
            .active_group
            .as_mut()
            .ok_or(LogicError::NoActiveGroup)?;
        group.append_child(cmd)
    }

    /// Close the open group; a group without changes is discarded
    ///
    /// Returns whether the group was recorded.
    pub fn commit_group(&mut self) -> Result<bool> {
        let group = self.active_group.take().ok_or(LogicError::NoActiveGroup)?;
        if group.is_empty() {
            tracing::debug!(group = group.text(), "discarding empty command group");
            return Ok(false);
        }
        tracing::debug!(group = group.text(), children = group.child_count(), "commit command group");
        self.push(Box::new(group));
        Ok(true)
    }

    /// Close the open group and revert everything it did
    pub fn abort_group(&mut self) -> Result<()> {
        let mut group = self.active_group.take().ok_or(LogicError::NoActiveGroup)?;
        tracing::debug!(group = group.text(), "abort command group");
        group.undo()
    }

    pub fn is_group_active(&self) -> bool {
        self.active_group.is_some()
    }

    /// Undo the last executed command; no-op if there is none
    pub fn undo(&mut self) -> Result<()> {
        if self.active_group.is_some() {
            return Err(LogicError::GroupAlreadyActive.into());
        }
        if self.current == 0 {
            return Ok(());
        }
        self.commands[self.current - 1].undo()?;
        self.current -= 1;
        Ok(())
    }

    /// Redo the next undone command; no-op if there is none
    pub fn redo(&mut self) -> Result<()> {
        if self.active_group.is_some() {
            return Err(LogicError::GroupAlreadyActive.into());
        }
        if self.current >= self.commands.len() {
            return Ok(());
        }
        self.commands[self.current].redo()?;
        self.current += 1;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.active_group.is_none() && self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.active_group.is_none() && self.current < self.commands.len()
    }

    /// Whether the document equals the state marked by [`set_clean`](Self::set_clean)
    pub fn is_clean(&self) -> bool {
        self.active_group.is_none() && self.clean_index == Some(self.current)
    }

    /// Mark the current state as clean, e.g. after saving
    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.current);
    }

    /// Text of the command [`undo`](Self::undo) would revert
    pub fn undo_text(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.commands.get(self.current - 1).map(|cmd| cmd.text())
    }

    /// Text of the command [`redo`](Self::redo) would re-apply
    pub fn redo_text(&self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.commands.get(self.current).map(|cmd| cmd.text())
    }

    /// Number of recorded commands, including undone ones
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands currently in the executed state
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Abort any open group and forget the whole history
    pub fn clear(&mut self) -> Result<()> {
        if self.active_group.is_some() {
            self.abort_group()?;
        }
        let was_clean = self.clean_index == Some(self.current);
        self.commands.clear();
        self.current = 0;
        self.clean_index = was_clean.then_some(0);
        Ok(())
    }

    fn push(&mut self, cmd: Box<dyn UndoCommand>) {
        self.commands.truncate(self.current);
        if self.clean_index.is_some_and(|i| i > self.current) {
            self.clean_index = None;
        }
        self.commands.push(cmd);
        self.current += 1;

        if let Some(limit) = self.limit {
            while self.commands.len() > limit {
                self.commands.remove(0);
                self.current -= 1;
                self.clean_index = match self.clean_index {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
            }
        }
    }
}

impl std::fmt::Debug for UndoStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoStack")
            .field("len", &self.commands.len())
            .field("current", &self.current)
            .field("clean_index", &self.clean_index)
            .field("active_group", &self.active_group)
            .finish()
    }
}
