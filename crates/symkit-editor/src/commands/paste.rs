//! Pasting clipboard content into a symbol.

use super::{CmdListElementInsert, SelectedItems};
use crate::clipboard::SymbolClipboardData;
use crate::model::{Circle, Entity, Pin, Polygon, Symbol, Text, Transform};
use crate::naming::increment_number_in_string;
use crate::undo::{CommandState, UndoCommand, UndoCommandGroup};
use std::collections::HashSet;
use symkit_core::{Point, Result, Shared, ValidationError};
use uuid::Uuid;

/// Insert copies of clipboard elements, translated by an offset
///
/// UUIDs and pin names are resolved at construction: an element keeps its
/// UUID only when pasted into the symbol it was copied from and the UUID is
/// free; colliding pin names get their trailing number incremented.
pub struct CmdPasteSymbolItems {
    state: CommandState,
    symbol: Shared<Symbol>,
    pins: Vec<Pin>,
    circles: Vec<Circle>,
    polygons: Vec<Polygon>,
    texts: Vec<Text>,
    group: Option<UndoCommandGroup>,
}

impl CmdPasteSymbolItems {
    pub fn new(
        symbol: Shared<Symbol>,
        data: &SymbolClipboardData,
        offset: Point,
        name_retry_limit: u32,
    ) -> Result<Self> {
        let (pins, circles, polygons, texts) = {
            let sym = symbol.borrow();
            let same_symbol = sym.uuid() == data.symbol_uuid;

            let mut used_names: HashSet<String> =
                sym.pins().iter().map(|p| p.name().to_string()).collect();
            let mut pins = Vec::with_capacity(data.pins.len());
            for pin in &data.pins {
                let in_use = sym.pins().contains(&pin.uuid());
                let uuid = resolve_uuid(pin.uuid(), same_symbol, in_use);
                let mut copy = pin.with_uuid(uuid);
                let name = unique_name(pin.name(), &used_names, name_retry_limit)?;
                used_names.insert(name.clone());
                copy.set_name(name);
                copy.translate(offset);
                pins.push(copy);
            }

            let circles = paste_copies(&data.circles, offset, |c| {
                let in_use = sym.circles().contains(&c.uuid());
                let uuid = resolve_uuid(c.uuid(), same_symbol, in_use);
                c.with_uuid(uuid)
            });
            let polygons = paste_copies(&data.polygons, offset, |p| {
                let in_use = sym.polygons().contains(&p.uuid());
                let uuid = resolve_uuid(p.uuid(), same_symbol, in_use);
                p.with_uuid(uuid)
            });
            let texts = paste_copies(&data.texts, offset, |t| {
                let in_use = sym.texts().contains(&t.uuid());
                let uuid = resolve_uuid(t.uuid(), same_symbol, in_use);
                t.with_uuid(uuid)
            });
            (pins, circles, polygons, texts)
        };

        Ok(Self {
            state: CommandState::new("Paste Symbol Elements"),
            symbol,
            pins,
            circles,
            polygons,
            texts,
            group: None,
        })
    }

    /// UUIDs the pasted elements will have in the symbol
    pub fn pasted_items(&self) -> SelectedItems {
        SelectedItems {
            pins: self.pins.iter().map(Entity::uuid).collect(),
            circles: self.circles.iter().map(Entity::uuid).collect(),
            polygons: self.polygons.iter().map(Entity::uuid).collect(),
            texts: self.texts.iter().map(Entity::uuid).collect(),
        }
    }
}

impl UndoCommand for CmdPasteSymbolItems {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn perform_execute(&mut self) -> Result<bool> {
        let mut group = UndoCommandGroup::new(self.state.text());
        for pin in &self.pins {
            group.append_child(Box::new(CmdListElementInsert::new(
                self.symbol.clone(),
                pin.clone(),
                None,
            )))?;
        }
        for circle in &self.circles {
            group.append_child(Box::new(CmdListElementInsert::new(
                self.symbol.clone(),
                circle.clone(),
                None,
            )))?;
        }
        for polygon in &self.polygons {
            group.append_child(Box::new(CmdListElementInsert::new(
                self.symbol.clone(),
                polygon.clone(),
                None,
            )))?;
        }
        for text in &self.texts {
            group.append_child(Box::new(CmdListElementInsert::new(
                self.symbol.clone(),
                text.clone(),
                None,
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

fn resolve_uuid(original: Uuid, same_symbol: bool, in_use: bool) -> Uuid {
    if same_symbol && !in_use {
        original
    } else {
        Uuid::new_v4()
    }
}

fn paste_copies<T: Transform>(
    items: &[T],
    offset: Point,
    mut with_resolved_uuid: impl FnMut(&T) -> T,
) -> Vec<T> {
    items
        .iter()
        .map(|item| {
            let mut copy = with_resolved_uuid(item);
            copy.translate(offset);
            copy
        })
        .collect()
}

fn unique_name(name: &str, used: &HashSet<String>, retry_limit: u32) -> Result<String> {
    let mut candidate = name.to_string();
    for _ in 0..retry_limit {
        if !used.contains(&candidate) {
            return Ok(candidate);
        }
        candidate = increment_number_in_string(&candidate);
    }
    if used.contains(&candidate) {
        return Err(ValidationError::NameInUse { name: candidate }.into());
    }
    Ok(candidate)
}
