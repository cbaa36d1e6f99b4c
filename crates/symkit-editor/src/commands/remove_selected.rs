//! Removing the selection.

use super::{CmdListElementRemove, SelectedItems};
use crate::model::{Circle, Pin, Polygon, Symbol, Text};
use crate::undo::{CommandState, UndoCommand, UndoCommandGroup};
use symkit_core::{Result, Shared};

/// Remove all selected symbol elements as one undo step
pub struct CmdRemoveSelectedSymbolItems {
    state: CommandState,
    symbol: Shared<Symbol>,
    selection: SelectedItems,
    group: Option<UndoCommandGroup>,
}

impl CmdRemoveSelectedSymbolItems {
    pub fn new(symbol: Shared<Symbol>, selection: SelectedItems) -> Self {
        Self {
            state: CommandState::new("Remove Symbol Elements"),
            symbol,
            selection,
            group: None,
        }
    }
}

impl UndoCommand for CmdRemoveSelectedSymbolItems {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn perform_execute(&mut self) -> Result<bool> {
        if self.selection.is_empty() {
            return Ok(false);
        }
        let mut group = UndoCommandGroup::new(self.state.text());
        for uuid in &self.selection.pins {
            group.append_child(Box::new(CmdListElementRemove::<Symbol, Pin>::new(
                self.symbol.clone(),
                *uuid,
            )))?;
        }
        for uuid in &self.selection.circles {
            group.append_child(Box::new(CmdListElementRemove::<Symbol, Circle>::new(
                self.symbol.clone(),
                *uuid,
            )))?;
        }
        for uuid in &self.selection.polygons {
            group.append_child(Box::new(CmdListElementRemove::<Symbol, Polygon>::new(
                self.symbol.clone(),
                *uuid,
            )))?;
        }
        for uuid in &self.selection.texts {
            group.append_child(Box::new(CmdListElementRemove::<Symbol, Text>::new(
                self.symbol.clone(),
                *uuid,
            )))?;
        }
        let changed = group.execute()?;
        self.group = Some(group);
        Ok(changed)
    }

    fn perform_undo(&mut self) -> Result<()> {
        match self.group.as_mut() {
            Some(group) => group.undo(),
            None => Ok(()),
        }
    }

    fn perform_redo(&mut self) -> Result<()> {
        match self.group.as_mut() {
            Some(group) => group.redo(),
            None => Ok(()),
        }
    }
}
