//! Ordered, UUID-keyed element lists.
//!
//! An [`ElementList`] owns the entities of one kind. Every structural or
//! property change is recorded as a [`ListEvent`] which the graphics layer
//! drains with [`ElementList::take_events`].

use crate::model::{Entity, EventList};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use symkit_core::{LogicError, Result, ValidationError};
use uuid::Uuid;

/// Change notification of an [`ElementList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent<E> {
    /// An element was inserted at `index`
    ElementAdded { index: usize, uuid: Uuid },
    /// The element formerly at `index` was removed
    ElementRemoved { index: usize, uuid: Uuid },
    /// Two elements exchanged their positions
    ElementsSwapped { first: usize, second: usize },
    /// A property of the element at `index` changed
    ElementEdited { index: usize, uuid: Uuid, event: E },
}

impl<E> ListEvent<E> {
    /// Whether the event changes list membership
    pub fn is_structural(&self) -> bool {
        !matches!(self, ListEvent::ElementEdited { .. })
    }
}

/// Ordered sequence of entities with unique UUIDs
#[derive(Debug, Clone)]
pub struct ElementList<T: Entity> {
    elements: Vec<T>,
    events: Vec<ListEvent<T::Event>>,
}

impl<T: Entity> Default for ElementList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> ElementList<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Build a list, rejecting duplicate UUIDs
    pub fn from_elements(elements: Vec<T>) -> Result<Self> {
        let mut list = Self::new();
        for element in elements {
            list.append(element)?;
        }
        list.events.clear();
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, uuid: &Uuid) -> bool {
        self.index_of(uuid).is_some()
    }

    pub fn index_of(&self, uuid: &Uuid) -> Option<usize> {
        self.elements.iter().position(|e| e.uuid() == *uuid)
    }

    pub fn get(&self, uuid: &Uuid) -> Option<&T> {
        self.elements.iter().find(|e| e.uuid() == *uuid)
    }

    /// Like [`get`](Self::get) but a missing element is a logic error
    pub fn get_or_err(&self, uuid: &Uuid) -> std::result::Result<&T, LogicError> {
        self.get(uuid).ok_or(LogicError::ElementNotFound {
            kind: T::KIND,
            uuid: *uuid,
        })
    }

    pub fn at(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn values(&self) -> &[T] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn uuids(&self) -> Vec<Uuid> {
        self.elements.iter().map(Entity::uuid).collect()
    }

    /// Insert `element` before `index`
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        let uuid = element.uuid();
        if self.contains(&uuid) {
            return Err(ValidationError::DuplicateUuid {
                kind: T::KIND,
                uuid,
            }
            .into());
        }
        if index > self.elements.len() {
            return Err(LogicError::IndexOutOfBounds {
                kind: T::KIND,
                index,
                len: self.elements.len(),
            }
            .into());
        }
        self.elements.insert(index, element);
        self.events.push(ListEvent::ElementAdded { index, uuid });
        Ok(())
    }

    /// Append `element`, returning its index
    pub fn append(&mut self, element: T) -> Result<usize> {
        let index = self.elements.len();
        self.insert(index, element)?;
        Ok(index)
    }

    /// Remove the element with `uuid`, returning its former index
    pub fn remove(&mut self, uuid: &Uuid) -> Result<(usize, T)> {
        let index = self.index_of(uuid).ok_or(LogicError::ElementNotFound {
            kind: T::KIND,
            uuid: *uuid,
        })?;
        let element = self.elements.remove(index);
        self.events.push(ListEvent::ElementRemoved {
            index,
            uuid: *uuid,
        });
        Ok((index, element))
    }

    /// Exchange the elements at two indices
    pub fn swap(&mut self, first: usize, second: usize) -> Result<()> {
        let len = self.elements.len();
        for index in [first, second] {
            if index >= len {
                return Err(LogicError::IndexOutOfBounds {
                    kind: T::KIND,
                    index,
                    len,
                }
                .into());
            }
        }
        if first != second {
            self.elements.swap(first, second);
            self.events
                .push(ListEvent::ElementsSwapped { first, second });
        }
        Ok(())
    }

    /// Replace the properties of the element with the UUID of `value`
    pub fn assign(&mut self, value: &T) -> Result<EventList<T::Event>> {
        let uuid = value.uuid();
        let index = self.index_of(&uuid).ok_or(LogicError::ElementNotFound {
            kind: T::KIND,
            uuid,
        })?;
        let events = self.elements[index].assign(value);
        self.events.extend(
            events
                .iter()
                .map(|&event| ListEvent::ElementEdited { index, uuid, event }),
        );
        Ok(events)
    }

    /// Whether change events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Drain all recorded change events
    pub fn take_events(&mut self) -> Vec<ListEvent<T::Event>> {
        std::mem::take(&mut self.events)
    }
}

impl<T: Entity> PartialEq for ElementList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<'a, T: Entity> IntoIterator for &'a ElementList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Entity + Serialize> Serialize for ElementList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.elements.serialize(serializer)
    }
}

impl<'de, T: Entity + Deserialize<'de>> Deserialize<'de> for ElementList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Self::from_elements(elements).map_err(D::Error::custom)
    }
}
