use symkit_core::{shared, Angle, Layer, Path, Point, PositiveLength, Shared, UnsignedLength};
use symkit_editor::fsm::{EditorContext, HeadlessUi, MouseEvent, SymbolEditorFsm};
use symkit_editor::{Circle, HasElementList, InMemoryClipboard, Pin, Polygon, Symbol};
use symkit_settings::Config;
use uuid::Uuid;

pub struct Editor {
    pub fsm: SymbolEditorFsm,
    pub symbol: Shared<Symbol>,
    pub ui: Shared<HeadlessUi>,
    pub clipboard: Shared<InMemoryClipboard>,
}

pub fn config() -> Config {
    let mut config = Config::default();
    config.editor.grid_interval = PositiveLength::saturating(100_000);
    config
}

pub fn editor_with(symbol: Symbol) -> Editor {
    editor_with_config(symbol, &config())
}

pub fn editor_with_config(symbol: Symbol, config: &Config) -> Editor {
    let symbol = shared(symbol);
    let ui = shared(HeadlessUi::new());
    let clipboard = shared(InMemoryClipboard::new());
    let ctx = EditorContext::new(
        symbol.clone(),
        config,
        Box::new(clipboard.clone()),
        Box::new(ui.clone()),
    );
    Editor {
        fsm: SymbolEditorFsm::new(ctx),
        symbol,
        ui,
        clipboard,
    }
}

pub fn editor() -> Editor {
    editor_with(Symbol::new("Test"))
}

pub fn mm(x: f64, y: f64) -> Point {
    Point::from_mm(x, y)
}

pub fn at(pos: Point) -> MouseEvent {
    MouseEvent::new(pos)
}

pub fn click(fsm: &mut SymbolEditorFsm, pos: Point) {
    fsm.process_mouse_moved(&at(pos));
    fsm.process_left_button_pressed(&at(pos));
    fsm.process_left_button_released(&at(pos));
}

pub fn drag(fsm: &mut SymbolEditorFsm, from: Point, to: Point) {
    fsm.process_mouse_moved(&at(from));
    fsm.process_left_button_pressed(&at(from));
    fsm.process_mouse_moved(&at(to));
    fsm.process_left_button_released(&at(to));
}

pub fn pin(name: &str, pos: Point) -> Pin {
    Pin::new(
        Uuid::new_v4(),
        name,
        pos,
        Angle::DEG_0,
        UnsignedLength::saturating(2_540_000),
    )
}

pub fn square(origin: Point, size: f64) -> Polygon {
    Polygon::new(
        Uuid::new_v4(),
        Layer::SymbolOutlines,
        UnsignedLength::saturating(200_000),
        false,
        false,
        Path::rect(origin, origin + mm(size, size)),
    )
}

pub fn circle(center: Point, diameter_mm: f64) -> Circle {
    Circle::new(
        Uuid::new_v4(),
        Layer::SymbolOutlines,
        UnsignedLength::saturating(200_000),
        false,
        false,
        center,
        PositiveLength::saturating((diameter_mm * 1_000_000.0) as i64),
    )
}

pub fn symbol_with_pins(pins: &[Pin]) -> Symbol {
    let mut symbol = Symbol::new("Test");
    for pin in pins {
        HasElementList::<Pin>::element_list_mut(&mut symbol)
            .append(pin.clone())
            .unwrap();
    }
    symbol
}

pub fn add_polygon(symbol: &mut Symbol, polygon: Polygon) {
    HasElementList::<Polygon>::element_list_mut(symbol)
        .append(polygon)
        .unwrap();
}

pub fn add_circle(symbol: &mut Symbol, circle: Circle) {
    HasElementList::<Circle>::element_list_mut(symbol)
        .append(circle)
        .unwrap();
}
