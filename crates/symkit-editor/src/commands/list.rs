//! Structural commands on element lists.

use crate::model::{Entity, HasElementList};
use crate::undo::{CommandState, UndoCommand};
use std::marker::PhantomData;
use symkit_core::{LogicError, Result, Shared};
use uuid::Uuid;

/// Insert an element into a list
///
/// Redo re-inserts at the index used by the first execution.
pub struct CmdListElementInsert<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    state: CommandState,
    document: Shared<D>,
    element: T,
    index: Option<usize>,
}

impl<D, T> CmdListElementInsert<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    /// Insert `element` before `index`, or append if `index` is `None`
    pub fn new(document: Shared<D>, element: T, index: Option<usize>) -> Self {
        Self {
            state: CommandState::new(format!("Add {}", T::KIND)),
            document,
            element,
            index,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.element.uuid()
    }
}

impl<D, T> UndoCommand for CmdListElementInsert<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn perform_execute(&mut self) -> Result<bool> {
        let mut document = self.document.borrow_mut();
        document.validate_element(&self.element)?;
        let list = document.element_list_mut();
        let index = self.index.unwrap_or(list.len());
        list.insert(index, self.element.clone())?;
        self.index = Some(index);
        Ok(true)
    }

    fn perform_undo(&mut self) -> Result<()> {
        self.document
            .borrow_mut()
            .element_list_mut()
            .remove(&self.element.uuid())?;
        Ok(())
    }

    fn perform_redo(&mut self) -> Result<()> {
        let mut document = self.document.borrow_mut();
        let list = document.element_list_mut();
        let index = self.index.unwrap_or(list.len()).min(list.len());
        list.insert(index, self.element.clone())
    }
}

/// Remove an element from a list
pub struct CmdListElementRemove<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    state: CommandState,
    document: Shared<D>,
    uuid: Uuid,
    removed: Option<(usize, T)>,
}

impl<D, T> CmdListElementRemove<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    pub fn new(document: Shared<D>, uuid: Uuid) -> Self {
        Self {
            state: CommandState::new(format!("Remove {}", T::KIND)),
            document,
            uuid,
            removed: None,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl<D, T> UndoCommand for CmdListElementRemove<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn perform_execute(&mut self) -> Result<bool> {
        self.perform_redo()?;
        Ok(true)
    }

    fn perform_undo(&mut self) -> Result<()> {
        let (index, element) = self
            .removed
            .take()
            .ok_or_else(|| LogicError::NotExecuted(self.state.text().to_string()))?;
        self.document
            .borrow_mut()
            .element_list_mut()
            .insert(index, element)
    }

    fn perform_redo(&mut self) -> Result<()> {
        let removed = self
            .document
            .borrow_mut()
            .element_list_mut()
            .remove(&self.uuid)?;
        self.removed = Some(removed);
        Ok(())
    }
}

/// Exchange two elements of a list
pub struct CmdListElementSwap<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    state: CommandState,
    document: Shared<D>,
    first: usize,
    second: usize,
    _kind: PhantomData<T>,
}

impl<D, T> CmdListElementSwap<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    pub fn new(document: Shared<D>, first: usize, second: usize) -> Self {
        Self {
            state: CommandState::new(format!("Move {}", T::KIND)),
            document,
            first,
            second,
            _kind: PhantomData,
        }
    }
}

impl<D, T> UndoCommand for CmdListElementSwap<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn perform_execute(&mut self) -> Result<bool> {
        self.perform_redo()?;
        Ok(true)
    }

    fn perform_undo(&mut self) -> Result<()> {
        self.perform_redo()
    }

    fn perform_redo(&mut self) -> Result<()> {
        self.document
            .borrow_mut()
            .element_list_mut()
            .swap(self.first, self.second)
    }
}
