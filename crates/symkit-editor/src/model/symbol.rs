//! The symbol document.

use super::{
    Circle, CircleEvent, Entity, HasElementList, Pin, PinEvent, Polygon, PolygonEvent, Text,
    TextEvent,
};
use crate::element_list::{ElementList, ListEvent};
use serde::{Deserialize, Serialize};
use symkit_core::{Result, ValidationError};
use uuid::Uuid;

/// Change events drained from all element lists of a [`Symbol`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolEvents {
    pub pins: Vec<ListEvent<PinEvent>>,
    pub circles: Vec<ListEvent<CircleEvent>>,
    pub polygons: Vec<ListEvent<PolygonEvent>>,
    pub texts: Vec<ListEvent<TextEvent>>,
}

impl SymbolEvents {
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
            && self.circles.is_empty()
            && self.polygons.is_empty()
            && self.texts.is_empty()
    }
}

/// A schematic symbol: the document edited by the symbol editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    uuid: Uuid,
    name: String,
    #[serde(default)]
    pins: ElementList<Pin>,
    #[serde(default)]
    circles: ElementList<Circle>,
    #[serde(default)]
    polygons: ElementList<Polygon>,
    #[serde(default)]
    texts: ElementList<Text>,
}

impl Symbol {
    /// Create an empty symbol with a fresh UUID
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_uuid(Uuid::new_v4(), name)
    }

    /// Create an empty symbol with the given UUID
    pub fn with_uuid(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            pins: ElementList::new(),
            circles: ElementList::new(),
            polygons: ElementList::new(),
            texts: ElementList::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn pins(&self) -> &ElementList<Pin> {
        &self.pins
    }

    pub fn circles(&self) -> &ElementList<Circle> {
        &self.circles
    }

    pub fn polygons(&self) -> &ElementList<Polygon> {
        &self.polygons
    }

    pub fn texts(&self) -> &ElementList<Text> {
        &self.texts
    }

    /// Whether a pin other than `except` already uses `name`
    pub fn is_pin_name_used(&self, name: &str, except: Option<Uuid>) -> bool {
        self.pins
            .iter()
            .any(|p| p.name() == name && Some(p.uuid()) != except)
    }

    /// Whether the symbol contains no elements at all
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
            && self.circles.is_empty()
            && self.polygons.is_empty()
            && self.texts.is_empty()
    }

    /// Whether any element list recorded changes since the last drain
    pub fn has_pending_events(&self) -> bool {
        self.pins.has_pending_events()
            || self.circles.has_pending_events()
            || self.polygons.has_pending_events()
            || self.texts.has_pending_events()
    }

    /// Drain the change events of all element lists
    pub fn take_events(&mut self) -> SymbolEvents {
        SymbolEvents {
            pins: self.pins.take_events(),
            circles: self.circles.take_events(),
            polygons: self.polygons.take_events(),
            texts: self.texts.take_events(),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a symbol from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let symbol: Self = serde_json::from_str(json)?;
        symbol.validate()?;
        Ok(symbol)
    }

    /// Check the rules deserialization cannot enforce, i.e. unique valid
    /// pin names
    pub fn validate(&self) -> Result<()> {
        for pin in self.pins.iter() {
            self.validate_element(pin)?;
        }
        Ok(())
    }
}

impl HasElementList<Pin> for Symbol {
    fn element_list(&self) -> &ElementList<Pin> {
        &self.pins
    }

    fn element_list_mut(&mut self) -> &mut ElementList<Pin> {
        &mut self.pins
    }

    fn validate_element(&self, pin: &Pin) -> Result<()> {
        super::validate_pin_name(pin.name())?;
        if self.is_pin_name_used(pin.name(), Some(pin.uuid())) {
            return Err(ValidationError::NameInUse {
                name: pin.name().to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl HasElementList<Circle> for Symbol {
    fn element_list(&self) -> &ElementList<Circle> {
        &self.circles
    }

    fn element_list_mut(&mut self) -> &mut ElementList<Circle> {
        &mut self.circles
    }
}

impl HasElementList<Polygon> for Symbol {
    fn element_list(&self) -> &ElementList<Polygon> {
        &self.polygons
    }

    fn element_list_mut(&mut self) -> &mut ElementList<Polygon> {
        &mut self.polygons
    }
}

impl HasElementList<Text> for Symbol {
    fn element_list(&self) -> &ElementList<Text> {
        &self.texts
    }

    fn element_list_mut(&mut self) -> &mut ElementList<Text> {
        &mut self.texts
    }
}
