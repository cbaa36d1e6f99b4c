//! Graphics items of a whole symbol.

use super::{CircleGraphicsItem, GrabArea, PinGraphicsItem, PolygonGraphicsItem, TextGraphicsItem};
use crate::commands::SelectedItems;
use crate::element_list::{ElementList, ListEvent};
use crate::model::{Entity, Symbol};
use std::collections::BTreeMap;
use symkit_core::{Length, Point, Rect};
use uuid::Uuid;

/// Priority of pins in hit results (lower is preferred)
const PRIORITY_PINS: i32 = 0;
/// Priority of texts in hit results
const PRIORITY_TEXTS: i32 = 10;
/// Priority of circles and polygons, adjusted by their stacking order
const PRIORITY_SHAPES: i32 = 20;
/// Added to the priority of items only close to the cursor
const PRIORITY_NEAR_PENALTY: i32 = 1000;

/// Kind of a symbol element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Pin,
    Circle,
    Polygon,
    Text,
}

/// Reference to one graphics item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub uuid: Uuid,
}

impl ItemRef {
    pub fn new(kind: ItemKind, uuid: Uuid) -> Self {
        Self { kind, uuid }
    }
}

/// Behaviour shared by all per-element items
trait SceneItem {
    type Entity: Entity;
    fn new(entity: &Self::Entity) -> Self;
    fn on_edited(&mut self, entity: &Self::Entity, event: <Self::Entity as Entity>::Event);
}

macro_rules! impl_scene_item {
    ($item:ty, $entity:ty) => {
        impl SceneItem for $item {
            type Entity = $entity;
            fn new(entity: &$entity) -> Self {
                <$item>::new(entity)
            }
            fn on_edited(&mut self, entity: &$entity, event: <$entity as Entity>::Event) {
                <$item>::on_edited(self, entity, event)
            }
        }
    };
}

impl_scene_item!(PinGraphicsItem, crate::model::Pin);
impl_scene_item!(CircleGraphicsItem, crate::model::Circle);
impl_scene_item!(PolygonGraphicsItem, crate::model::Polygon);
impl_scene_item!(TextGraphicsItem, crate::model::Text);

/// Remove items of vanished elements and create items for new ones;
/// existing items are kept.
fn sync_items<I: SceneItem>(items: &mut BTreeMap<Uuid, I>, list: &ElementList<I::Entity>) {
    items.retain(|uuid, _| list.contains(uuid));
    for element in list.iter() {
        items
            .entry(element.uuid())
            .or_insert_with(|| I::new(element));
    }
}

fn apply_events<I: SceneItem>(
    items: &mut BTreeMap<Uuid, I>,
    list: &ElementList<I::Entity>,
    events: &[ListEvent<<I::Entity as Entity>::Event>],
) {
    if events.iter().any(ListEvent::is_structural) {
        sync_items(items, list);
    }
    for event in events {
        if let ListEvent::ElementEdited { uuid, event, .. } = event {
            if let (Some(item), Some(entity)) = (items.get_mut(uuid), list.get(uuid)) {
                item.on_edited(entity, *event);
            }
        }
    }
}

/// All graphics items of a symbol plus the transient selection rectangle
#[derive(Debug, Clone, Default)]
pub struct SymbolGraphicsItem {
    pins: BTreeMap<Uuid, PinGraphicsItem>,
    circles: BTreeMap<Uuid, CircleGraphicsItem>,
    polygons: BTreeMap<Uuid, PolygonGraphicsItem>,
    texts: BTreeMap<Uuid, TextGraphicsItem>,
    selection_rect: Option<Rect>,
}

impl SymbolGraphicsItem {
    /// Build items for every element of `symbol`
    pub fn new(symbol: &Symbol) -> Self {
        let mut scene = Self::default();
        scene.sync(symbol);
        scene
    }

    /// Bring item membership in line with the symbol
    pub fn sync(&mut self, symbol: &Symbol) {
        sync_items(&mut self.pins, symbol.pins());
        sync_items(&mut self.circles, symbol.circles());
        sync_items(&mut self.polygons, symbol.polygons());
        sync_items(&mut self.texts, symbol.texts());
    }

    /// Drain the symbol's change events and apply them to the items
    pub fn update(&mut self, symbol: &mut Symbol) {
        let events = symbol.take_events();
        if events.is_empty() {
            return;
        }
        apply_events(&mut self.pins, symbol.pins(), &events.pins);
        apply_events(&mut self.circles, symbol.circles(), &events.circles);
        apply_events(&mut self.polygons, symbol.polygons(), &events.polygons);
        apply_events(&mut self.texts, symbol.texts(), &events.texts);
    }

    pub fn pin(&self, uuid: &Uuid) -> Option<&PinGraphicsItem> {
        self.pins.get(uuid)
    }

    pub fn circle(&self, uuid: &Uuid) -> Option<&CircleGraphicsItem> {
        self.circles.get(uuid)
    }

    pub fn polygon(&self, uuid: &Uuid) -> Option<&PolygonGraphicsItem> {
        self.polygons.get(uuid)
    }

    pub fn text(&self, uuid: &Uuid) -> Option<&TextGraphicsItem> {
        self.texts.get(uuid)
    }

    pub fn pins(&self) -> impl Iterator<Item = &PinGraphicsItem> {
        self.pins.values()
    }

    pub fn circles(&self) -> impl Iterator<Item = &CircleGraphicsItem> {
        self.circles.values()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &PolygonGraphicsItem> {
        self.polygons.values()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextGraphicsItem> {
        self.texts.values()
    }

    /// Total number of items
    pub fn item_count(&self) -> usize {
        self.pins.len() + self.circles.len() + self.polygons.len() + self.texts.len()
    }

    pub fn contains(&self, item: &ItemRef) -> bool {
        self.grab_area(item).is_some()
    }

    pub fn grab_area(&self, item: &ItemRef) -> Option<&GrabArea> {
        match item.kind {
            ItemKind::Pin => self.pins.get(&item.uuid).map(|i| i.grab_area()),
            ItemKind::Circle => self.circles.get(&item.uuid).map(|i| i.grab_area()),
            ItemKind::Polygon => self.polygons.get(&item.uuid).map(|i| i.grab_area()),
            ItemKind::Text => self.texts.get(&item.uuid).map(|i| i.grab_area()),
        }
    }

    /// Items at `pos`, best match first
    ///
    /// Items whose grab area contains `pos` come first, ordered by kind
    /// priority (pins, texts, then circles and polygons by stacking order).
    /// Items closer than `tolerance_small` (pins, texts) or
    /// `tolerance_large` (circles, polygons) follow. Ties are broken by
    /// the distance of the item's center to `pos`.
    pub fn find_items_at_pos(
        &self,
        pos: Point,
        tolerance_small: Length,
        tolerance_large: Length,
    ) -> Vec<ItemRef> {
        let small = tolerance_small.to_nm() as f64;
        let large = tolerance_large.to_nm() as f64;
        let mut hits: Vec<(i32, f64, ItemRef)> = Vec::new();
        let mut process = |item: ItemRef, area: &GrabArea, priority: i32, tolerance: f64| {
            let center_distance = area.bounding_rect().center().distance_squared(&pos);
            let distance = area.distance_to(pos);
            if distance <= 0.0 {
                hits.push((priority, center_distance, item));
            } else if distance <= tolerance {
                hits.push((priority + PRIORITY_NEAR_PENALTY, center_distance, item));
            }
        };

        for (uuid, item) in &self.pins {
            let r = ItemRef::new(ItemKind::Pin, *uuid);
            process(r, item.grab_area(), PRIORITY_PINS, small);
        }
        for (uuid, item) in &self.texts {
            let r = ItemRef::new(ItemKind::Text, *uuid);
            process(r, item.grab_area(), PRIORITY_TEXTS, small);
        }
        for (uuid, item) in &self.circles {
            let r = ItemRef::new(ItemKind::Circle, *uuid);
            process(r, item.grab_area(), shape_priority(item.z_value()), large);
        }
        for (uuid, item) in &self.polygons {
            let r = ItemRef::new(ItemKind::Polygon, *uuid);
            process(r, item.grab_area(), shape_priority(item.z_value()), large);
        }

        hits.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        hits.into_iter().map(|(_, _, item)| item).collect()
    }

    /// Set or clear the selection rectangle
    ///
    /// Every item intersecting the rectangle becomes selected, all others
    /// are deselected.
    pub fn set_selection_rect(&mut self, rect: Option<Rect>) {
        self.selection_rect = rect;
        let Some(rect) = rect else {
            return;
        };
        for item in self.pins.values_mut() {
            let hit = item.grab_area().intersects_rect(&rect);
            item.set_selected(hit);
        }
        for item in self.circles.values_mut() {
            let hit = item.grab_area().intersects_rect(&rect);
            item.set_selected(hit);
        }
        for item in self.polygons.values_mut() {
            let hit = item.grab_area().intersects_rect(&rect);
            item.set_selected(hit);
        }
        for item in self.texts.values_mut() {
            let hit = item.grab_area().intersects_rect(&rect);
            item.set_selected(hit);
        }
    }

    pub fn selection_rect(&self) -> Option<Rect> {
        self.selection_rect
    }

    pub fn is_selected(&self, item: &ItemRef) -> bool {
        match item.kind {
            ItemKind::Pin => self.pins.get(&item.uuid).is_some_and(|i| i.is_selected()),
            ItemKind::Circle => self.circles.get(&item.uuid).is_some_and(|i| i.is_selected()),
            ItemKind::Polygon => self.polygons.get(&item.uuid).is_some_and(|i| i.is_selected()),
            ItemKind::Text => self.texts.get(&item.uuid).is_some_and(|i| i.is_selected()),
        }
    }

    pub fn set_selected(&mut self, item: &ItemRef, selected: bool) {
        match item.kind {
            ItemKind::Pin => {
                if let Some(i) = self.pins.get_mut(&item.uuid) {
                    i.set_selected(selected);
                }
            }
            ItemKind::Circle => {
                if let Some(i) = self.circles.get_mut(&item.uuid) {
                    i.set_selected(selected);
                }
            }
            ItemKind::Polygon => {
                if let Some(i) = self.polygons.get_mut(&item.uuid) {
                    i.set_selected(selected);
                }
            }
            ItemKind::Text => {
                if let Some(i) = self.texts.get_mut(&item.uuid) {
                    i.set_selected(selected);
                }
            }
        }
    }

    /// Select exactly the given elements
    pub fn select_only(&mut self, items: &SelectedItems) {
        self.clear_selection();
        self.set_items_selected(items, true);
    }

    /// Change the selection flag of the given elements
    pub fn set_items_selected(&mut self, items: &SelectedItems, selected: bool) {
        let refs = items
            .pins
            .iter()
            .map(|u| ItemRef::new(ItemKind::Pin, *u))
            .chain(items.circles.iter().map(|u| ItemRef::new(ItemKind::Circle, *u)))
            .chain(items.polygons.iter().map(|u| ItemRef::new(ItemKind::Polygon, *u)))
            .chain(items.texts.iter().map(|u| ItemRef::new(ItemKind::Text, *u)))
            .collect::<Vec<_>>();
        for r in &refs {
            self.set_selected(r, selected);
        }
    }

    pub fn clear_selection(&mut self) {
        self.set_all_selected(false);
    }

    pub fn select_all(&mut self) {
        self.set_all_selected(true);
    }

    fn set_all_selected(&mut self, selected: bool) {
        self.pins.values_mut().for_each(|i| i.set_selected(selected));
        self.circles.values_mut().for_each(|i| i.set_selected(selected));
        self.polygons.values_mut().for_each(|i| i.set_selected(selected));
        self.texts.values_mut().for_each(|i| i.set_selected(selected));
    }

    /// Selected elements in document order
    pub fn selected_items(&self, symbol: &Symbol) -> SelectedItems {
        SelectedItems {
            pins: selected_in(symbol.pins(), |u| self.pins.get(u).is_some_and(|i| i.is_selected())),
            circles: selected_in(symbol.circles(), |u| {
                self.circles.get(u).is_some_and(|i| i.is_selected())
            }),
            polygons: selected_in(symbol.polygons(), |u| {
                self.polygons.get(u).is_some_and(|i| i.is_selected())
            }),
            texts: selected_in(symbol.texts(), |u| self.texts.get(u).is_some_and(|i| i.is_selected())),
        }
    }

    /// Number of selected items
    pub fn selected_count(&self) -> usize {
        self.pins.values().filter(|i| i.is_selected()).count()
            + self.circles.values().filter(|i| i.is_selected()).count()
            + self.polygons.values().filter(|i| i.is_selected()).count()
            + self.texts.values().filter(|i| i.is_selected()).count()
    }

    /// Selected polygons
    pub fn selected_polygons(&self) -> impl Iterator<Item = &PolygonGraphicsItem> {
        self.polygons.values().filter(|i| i.is_selected())
    }
}

fn shape_priority(z_value: i32) -> i32 {
    match z_value.cmp(&0) {
        std::cmp::Ordering::Greater => PRIORITY_SHAPES - 2,
        std::cmp::Ordering::Less => PRIORITY_SHAPES + 2,
        std::cmp::Ordering::Equal => PRIORITY_SHAPES,
    }
}

fn selected_in<T: Entity>(list: &ElementList<T>, is_selected: impl Fn(&Uuid) -> bool) -> Vec<Uuid> {
    list.iter()
        .map(Entity::uuid)
        .filter(|uuid| is_selected(uuid))
        .collect()
}
