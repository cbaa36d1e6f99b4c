//! Type aliases for shared editor state.
//!
//! The editor is strictly single-threaded: the document is shared between
//! the editor context, the undo history and in-progress tool commands, all
//! living on the UI thread. `Rc<RefCell<T>>` is the building block for that.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use symkit_core::types::*;
//!
//! // Instead of: Rc<RefCell<Symbol>>
//! let symbol: Shared<Symbol> = shared(Symbol::new("Resistor"));
//! symbol.borrow_mut().set_name("R");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Use when the same document must be reachable from several owners, e.g. the
/// editor context and the commands sitting in the undo history.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a value into a [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
