//! Property edit commands.

use crate::model::{Circle, Entity, HasElementList, Pin, Polygon, Symbol, Text, Transform};
use crate::undo::{CommandState, UndoCommand};
use symkit_core::{
    Alignment, Angle, Layer, LogicError, Orientation, Path, Point, PositiveLength, Result,
    Shared, UnsignedLength,
};
use uuid::Uuid;

/// Edit the properties of one entity
///
/// The command snapshots the entity at construction (`old`) and accumulates
/// the requested changes in `new`. Setters with `immediate = true` also
/// write `new` into the document right away for live previews; if such a
/// command is dropped without being executed, the document is restored.
pub struct CmdEntityEdit<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    state: CommandState,
    document: Shared<D>,
    old: T,
    new: T,
    applied_immediately: bool,
}

/// Edit command for symbol pins
pub type CmdPinEdit = CmdEntityEdit<Symbol, Pin>;
/// Edit command for symbol circles
pub type CmdCircleEdit = CmdEntityEdit<Symbol, Circle>;
/// Edit command for symbol polygons
pub type CmdPolygonEdit = CmdEntityEdit<Symbol, Polygon>;
/// Edit command for symbol texts
pub type CmdTextEdit = CmdEntityEdit<Symbol, Text>;

impl<D, T> CmdEntityEdit<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    /// Create an edit command for the element `uuid` of `document`
    pub fn new(document: Shared<D>, uuid: Uuid) -> Result<Self> {
        let old = document
            .borrow()
            .element_list()
            .get_or_err(&uuid)?
            .clone();
        Ok(Self {
            state: CommandState::new(format!("Edit {}", T::KIND)),
            new: old.clone(),
            old,
            document,
            applied_immediately: false,
        })
    }

    pub fn uuid(&self) -> Uuid {
        self.old.uuid()
    }

    /// Entity as it was when the command was created
    pub fn old_value(&self) -> &T {
        &self.old
    }

    /// Entity as it will be after execution
    pub fn new_value(&self) -> &T {
        &self.new
    }

    /// Whether the accumulated changes differ from the snapshot
    pub fn has_changes(&self) -> bool {
        self.new != self.old
    }

    /// Modify the new value with `f`, optionally writing it through
    ///
    /// # Panics
    ///
    /// Panics if the command was executed already.
    pub fn update(&mut self, immediate: bool, f: impl FnOnce(&mut T)) {
        assert!(
            !self.was_ever_executed(),
            "{} modified after execution",
            self.text()
        );
        f(&mut self.new);
        if immediate {
            self.applied_immediately = true;
            if let Err(e) = self.apply(&self.new) {
                tracing::warn!(command = self.text(), error = %e, "immediate edit failed");
            }
        }
    }

    fn apply(&self, value: &T) -> Result<()> {
        self.document
            .borrow_mut()
            .element_list_mut()
            .assign(value)
            .map(|_| ())
    }
}

impl<D, T> CmdEntityEdit<D, T>
where
    D: HasElementList<T>,
    T: Entity + Transform,
{
    pub fn translate(&mut self, offset: Point, immediate: bool) {
        self.update(immediate, |e| e.translate(offset));
    }

    pub fn rotate(&mut self, angle: Angle, center: Point, immediate: bool) {
        self.update(immediate, |e| e.rotate(angle, center));
    }

    pub fn mirror(&mut self, orientation: Orientation, center: Point, immediate: bool) {
        self.update(immediate, |e| e.mirror(orientation, center));
    }

    pub fn snap_to_grid(&mut self, grid: PositiveLength, immediate: bool) {
        self.update(immediate, |e| e.snap_to_grid(grid));
    }
}

impl<D: HasElementList<Pin>> CmdEntityEdit<D, Pin> {
    pub fn set_name(&mut self, name: impl Into<String>, immediate: bool) {
        let name = name.into();
        self.update(immediate, |p| {
            p.set_name(name);
        });
    }

    pub fn set_position(&mut self, position: Point, immediate: bool) {
        self.update(immediate, |p| {
            p.set_position(position);
        });
    }

    pub fn set_rotation(&mut self, rotation: Angle, immediate: bool) {
        self.update(immediate, |p| {
            p.set_rotation(rotation);
        });
    }

    pub fn set_length(&mut self, length: UnsignedLength, immediate: bool) {
        self.update(immediate, |p| {
            p.set_length(length);
        });
    }

    pub fn set_name_position(&mut self, position: Point, immediate: bool) {
        self.update(immediate, |p| {
            p.set_name_position(position);
        });
    }

    pub fn set_name_height(&mut self, height: PositiveLength, immediate: bool) {
        self.update(immediate, |p| {
            p.set_name_height(height);
        });
    }

    pub fn set_name_rotation(&mut self, rotation: Angle, immediate: bool) {
        self.update(immediate, |p| {
            p.set_name_rotation(rotation);
        });
    }

    pub fn set_name_alignment(&mut self, alignment: Alignment, immediate: bool) {
        self.update(immediate, |p| {
            p.set_name_alignment(alignment);
        });
    }
}

impl<D: HasElementList<Circle>> CmdEntityEdit<D, Circle> {
    pub fn set_layer(&mut self, layer: Layer, immediate: bool) {
        self.update(immediate, |c| {
            c.set_layer(layer);
        });
    }

    pub fn set_line_width(&mut self, width: UnsignedLength, immediate: bool) {
        self.update(immediate, |c| {
            c.set_line_width(width);
        });
    }

    pub fn set_filled(&mut self, filled: bool, immediate: bool) {
        self.update(immediate, |c| {
            c.set_filled(filled);
        });
    }

    pub fn set_grab_area(&mut self, grab_area: bool, immediate: bool) {
        self.update(immediate, |c| {
            c.set_grab_area(grab_area);
        });
    }

    pub fn set_center(&mut self, center: Point, immediate: bool) {
        self.update(immediate, |c| {
            c.set_center(center);
        });
    }

    pub fn set_diameter(&mut self, diameter: PositiveLength, immediate: bool) {
        self.update(immediate, |c| {
            c.set_diameter(diameter);
        });
    }
}

impl<D: HasElementList<Polygon>> CmdEntityEdit<D, Polygon> {
    pub fn set_layer(&mut self, layer: Layer, immediate: bool) {
        self.update(immediate, |p| {
            p.set_layer(layer);
        });
    }

    pub fn set_line_width(&mut self, width: UnsignedLength, immediate: bool) {
        self.update(immediate, |p| {
            p.set_line_width(width);
        });
    }

    pub fn set_filled(&mut self, filled: bool, immediate: bool) {
        self.update(immediate, |p| {
            p.set_filled(filled);
        });
    }

    pub fn set_grab_area(&mut self, grab_area: bool, immediate: bool) {
        self.update(immediate, |p| {
            p.set_grab_area(grab_area);
        });
    }

    pub fn set_path(&mut self, path: Path, immediate: bool) {
        self.update(immediate, |p| {
            p.set_path(path);
        });
    }
}

impl<D: HasElementList<Text>> CmdEntityEdit<D, Text> {
    pub fn set_layer(&mut self, layer: Layer, immediate: bool) {
        self.update(immediate, |t| {
            t.set_layer(layer);
        });
    }

    pub fn set_text(&mut self, text: impl Into<String>, immediate: bool) {
        let text = text.into();
        self.update(immediate, |t| {
            t.set_text(text);
        });
    }

    pub fn set_position(&mut self, position: Point, immediate: bool) {
        self.update(immediate, |t| {
            t.set_position(position);
        });
    }

    pub fn set_rotation(&mut self, rotation: Angle, immediate: bool) {
        self.update(immediate, |t| {
            t.set_rotation(rotation);
        });
    }

    pub fn set_height(&mut self, height: PositiveLength, immediate: bool) {
        self.update(immediate, |t| {
            t.set_height(height);
        });
    }

    pub fn set_align(&mut self, align: Alignment, immediate: bool) {
        self.update(immediate, |t| {
            t.set_align(align);
        });
    }
}

impl<D, T> UndoCommand for CmdEntityEdit<D, T>
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
        let validation = self.document.borrow().validate_element(&self.new);
        if let Err(e) = validation {
            if self.applied_immediately {
                self.apply(&self.old)?;
            }
            return Err(e);
        }
        self.perform_redo()?;
        Ok(self.has_changes())
    }

    fn perform_undo(&mut self) -> Result<()> {
        self.apply(&self.old)
    }

    fn perform_redo(&mut self) -> Result<()> {
        self.apply(&self.new)
    }
}

impl<D, T> Drop for CmdEntityEdit<D, T>
where
    D: HasElementList<T>,
    T: Entity,
{
    fn drop(&mut self) {
        if self.state.was_ever_executed() || !self.applied_immediately {
            return;
        }
        let Ok(mut document) = self.document.try_borrow_mut() else {
            tracing::error!(
                error = %LogicError::Other(format!("document busy while reverting '{}'", self.state.text())),
                "failed to revert immediate edit"
            );
            return;
        };
        // The element may have been removed by a command executed later.
        if document.element_list().contains(&self.old.uuid()) {
            if let Err(e) = document.element_list_mut().assign(&self.old) {
                tracing::warn!(error = %e, "failed to revert immediate edit");
            }
        }
    }
}
