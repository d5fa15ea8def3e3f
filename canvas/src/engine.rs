//! Engine: turns pointer and drop input into board actions.
//!
//! `EngineCore` holds every decision and is testable without a browser.
//! `Engine` binds it to an `<svg>` element, applies cursor, capture and
//! render actions itself, and forwards item-level actions to the host.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Document, DragEvent, Element, PointerEvent};

use crate::consts::{DROP_EFFECT, DROP_MEDIA_TYPE, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::doc::{AssetId, ItemId, PlacedItem};
use crate::drag::{self, DragController};
use crate::geometry::{self, GeometryError, Point, ScreenRect, Size};
use crate::hit::{self, HitPart};
use crate::input::{self, Button, UiState};
use crate::registry::HandleRegistry;
use crate::resize::ResizeController;
use crate::surface::{self, SceneItem};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// An existing item changed geometry; the host replaces its record.
    ItemUpdated(PlacedItem),
    /// An asset was dropped on the canvas; the host creates the item.
    ItemPlaced { asset_id: AssetId, x: f64, y: f64 },
    /// The user asked to remove an item.
    ItemDeleted { id: ItemId },
    /// A user-visible message (rejected drop, unusable geometry).
    Notify(String),
    SetCursor(String),
    /// Route pointer events to the engine until `ReleasePointer`, wherever the pointer goes.
    CapturePointer,
    ReleasePointer,
    RenderNeeded,
}

/// Core engine state: all logic that does not depend on the DOM.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// The item list is owned by the host; the core keeps the last copy it was
/// given and reports every change as an [`Action`].
pub struct EngineCore {
    items: Vec<PlacedItem>,
    pub registry: HandleRegistry,
    pub ui: UiState,
    pub resize: ResizeController,
    pub drag: DragController,
    pub canvas_rect: ScreenRect,
    pub logical: Size,
    capturing: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            registry: HandleRegistry::new(),
            ui: UiState::default(),
            resize: ResizeController::new(),
            drag: DragController::new(),
            canvas_rect: ScreenRect::new(0.0, 0.0, 0.0, 0.0),
            logical: Size::new(LOGICAL_WIDTH, LOGICAL_HEIGHT),
            capturing: false,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the item list with the host's current one.
    ///
    /// A gesture whose item has disappeared is abandoned and capture released.
    pub fn set_items(&mut self, items: Vec<PlacedItem>) -> Vec<Action> {
        self.items = items;
        let changes = self.registry.reconcile(&self.items);
        if !changes.removed.is_empty() {
            log::debug!("items removed: {}", changes.removed.len());
        }

        let mut actions = Vec::new();
        if let Some(id) = self.active_item() {
            if !self.registry.contains(&id) {
                log::info!("item {id} vanished mid-gesture; abandoning");
                actions.extend(self.abort_gesture());
            }
        }
        if self.ui.hovered.is_some_and(|id| !self.registry.contains(&id)) {
            self.ui.hovered = None;
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record where the surface currently sits on screen.
    pub fn set_canvas_rect(&mut self, rect: ScreenRect) {
        self.canvas_rect = rect;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.active_item().is_some() {
            return Vec::new();
        }
        let pt = match self.to_canvas(screen_pt) {
            Ok(pt) => pt,
            Err(e) => return vec![Action::Notify(e.to_string())],
        };
        let Some(hit) = hit::hit_test(pt, &self.items) else {
            return Vec::new();
        };
        let Some(item) = self.item(&hit.item_id).cloned() else {
            return Vec::new();
        };

        match hit.part {
            HitPart::DeleteButton => self.delete_item(&item.id),
            HitPart::ResizeHandle(corner) => {
                self.resize.begin(&item, corner, pt);
                self.capturing = true;
                let mut actions = vec![Action::CapturePointer];
                actions.extend(self.set_cursor(corner.cursor()));
                actions.push(Action::RenderNeeded);
                actions
            }
            HitPart::Body => {
                self.drag.begin(&item, pt);
                self.capturing = true;
                let mut actions = vec![Action::CapturePointer];
                actions.extend(self.set_cursor(input::cursor::MOVE));
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let pt = match self.to_canvas(screen_pt) {
            Ok(pt) => pt,
            Err(e) => {
                log::debug!("pointer move ignored: {e}");
                return Vec::new();
            }
        };

        if let Some(updated) = self.resize.update(pt) {
            return vec![Action::ItemUpdated(updated)];
        }
        if self.drag.update(pt) {
            return vec![Action::RenderNeeded];
        }

        // Idle: track hover.
        let hit = hit::hit_test(pt, &self.items);
        let mut actions = Vec::new();
        let hovered = hit.map(|h| h.item_id);
        if hovered != self.ui.hovered {
            self.ui.hovered = hovered;
            actions.push(Action::RenderNeeded);
        }
        actions.extend(self.set_cursor(input::cursor_for(hit)));
        actions
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.resize.end().is_some() {
            actions.push(Action::RenderNeeded);
        }
        if self.drag.is_active() {
            match self.to_canvas(screen_pt) {
                Ok(pt) => {
                    self.drag.update(pt);
                }
                Err(e) => log::debug!("pointer up position ignored: {e}"),
            }
            if let Some(moved) = self.drag.end() {
                actions.push(Action::ItemUpdated(moved));
            }
            actions.push(Action::RenderNeeded);
        }
        if self.capturing {
            self.capturing = false;
            actions.push(Action::ReleasePointer);
        }
        actions
    }

    /// Handle an external drop carrying `raw` as its payload.
    pub fn on_drop(&mut self, screen_pt: Point, raw: Option<&str>) -> Vec<Action> {
        match drag::placement_from_drop(raw, screen_pt, self.canvas_rect, self.logical) {
            Ok(req) => {
                log::debug!("drop: asset={} at ({}, {})", req.asset_id, req.x, req.y);
                vec![Action::ItemPlaced { asset_id: req.asset_id, x: req.x, y: req.y }]
            }
            Err(e) => {
                log::warn!("drop rejected: {e}");
                vec![Action::Notify(e.to_string())]
            }
        }
    }

    /// Ask the host to delete item `id`. Unknown ids produce nothing.
    pub fn delete_item(&mut self, id: &ItemId) -> Vec<Action> {
        if self.item(id).is_none() {
            return Vec::new();
        }
        if self.ui.hovered.as_ref() == Some(id) {
            self.ui.hovered = None;
        }
        vec![Action::ItemDeleted { id: *id }]
    }

    // --- Queries ---

    #[must_use]
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Whether pointer events are currently routed to the engine globally.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Item under an active resize or move.
    #[must_use]
    pub fn active_item(&self) -> Option<ItemId> {
        self.resize.active_item().or_else(|| self.drag.active_item())
    }

    /// Markup for the surface's children, with any move preview applied.
    #[must_use]
    pub fn scene_markup(&mut self) -> String {
        let preview = self.drag.preview();
        let active = self.active_item();
        let hovered = self.ui.hovered;
        let drawn: Vec<PlacedItem> = self
            .items
            .iter()
            .map(|item| match &preview {
                Some(p) if p.id == item.id => p.clone(),
                _ => item.clone(),
            })
            .collect();
        let entries: Vec<SceneItem<'_>> = drawn
            .iter()
            .map(|item| SceneItem {
                item,
                handle: self.registry.handle_for(item.id),
                decorated: Some(item.id) == active || (active.is_none() && Some(item.id) == hovered),
            })
            .collect();
        surface::scene_markup(&entries)
    }

    // --- Internals ---

    fn to_canvas(&self, screen_pt: Point) -> Result<Point, GeometryError> {
        geometry::map_screen_to_canvas(screen_pt, self.canvas_rect, self.logical)
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Option<Action> {
        if self.ui.cursor == cursor {
            return None;
        }
        self.ui.cursor = cursor;
        Some(Action::SetCursor(cursor.to_string()))
    }

    fn abort_gesture(&mut self) -> Vec<Action> {
        self.resize.end();
        self.drag.cancel();
        let mut actions = Vec::new();
        actions.extend(self.set_cursor(input::cursor::DEFAULT));
        if self.capturing {
            self.capturing = false;
            actions.push(Action::ReleasePointer);
        }
        actions
    }
}

// =============================================================
// Browser surface
// =============================================================

type PointerClosure = Closure<dyn FnMut(PointerEvent)>;

/// Somewhere pointer listeners can be registered.
trait ListenerTarget<L> {
    fn listen(&self, event: &str, listener: &L);
    fn unlisten(&self, event: &str, listener: &L);
}

impl ListenerTarget<PointerClosure> for Document {
    fn listen(&self, event: &str, listener: &PointerClosure) {
        if let Err(e) = self.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref()) {
            log::error!("failed to capture {event}: {e:?}");
        }
    }

    fn unlisten(&self, event: &str, listener: &PointerClosure) {
        if let Err(e) = self.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref()) {
            log::error!("failed to release {event}: {e:?}");
        }
    }
}

/// Listeners installed while a gesture holds the pointer.
struct CaptureListeners<L> {
    on_move: L,
    on_up: L,
}

/// Global pointer capture. Released listeners are parked in `retired` rather
/// than dropped, since release usually happens inside one of them.
struct GlobalCapture<L> {
    attached: Option<CaptureListeners<L>>,
    retired: Option<CaptureListeners<L>>,
}

impl<L> Default for GlobalCapture<L> {
    fn default() -> Self {
        Self { attached: None, retired: None }
    }
}

impl<L> GlobalCapture<L> {
    /// Follow a capture action: fresh listeners on `CapturePointer`, release on `ReleasePointer`.
    fn apply<T: ListenerTarget<L>>(
        &mut self,
        target: &T,
        action: &Action,
        listeners: impl FnOnce() -> CaptureListeners<L>,
    ) {
        match action {
            Action::CapturePointer => self.attach(target, listeners()),
            Action::ReleasePointer => self.detach(target),
            _ => {}
        }
    }

    fn attach<T: ListenerTarget<L>>(&mut self, target: &T, listeners: CaptureListeners<L>) {
        self.detach(target);
        target.listen("pointermove", &listeners.on_move);
        target.listen("pointerup", &listeners.on_up);
        // Anything retired earlier has finished running by now.
        self.retired = None;
        self.attached = Some(listeners);
    }

    fn detach<T: ListenerTarget<L>>(&mut self, target: &T) {
        let Some(listeners) = self.attached.take() else {
            return;
        };
        target.unlisten("pointermove", &listeners.on_move);
        target.unlisten("pointerup", &listeners.on_up);
        self.retired = Some(listeners);
    }
}

struct Shared {
    svg: Element,
    document: Option<Document>,
    core: RefCell<EngineCore>,
    capture: RefCell<GlobalCapture<PointerClosure>>,
    sink: Box<dyn Fn(Action)>,
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser `<svg>` element.
///
/// Item-level actions (`ItemUpdated`, `ItemPlaced`, `ItemDeleted`, `Notify`)
/// go to the host's sink; cursor, capture and rendering are handled here.
pub struct Engine {
    shared: Rc<Shared>,
}

impl Engine {
    /// Create a new engine bound to the given `<svg>` element.
    #[must_use]
    pub fn new(svg: Element, sink: impl Fn(Action) + 'static) -> Self {
        for (name, value) in surface::root_attributes() {
            if name == "xmlns" {
                continue;
            }
            if let Err(e) = svg.set_attribute(name, &value) {
                log::error!("failed to set surface {name}: {e:?}");
            }
        }
        let document = svg.owner_document();
        let shared = Rc::new(Shared {
            svg,
            document,
            core: RefCell::new(EngineCore::new()),
            capture: RefCell::new(GlobalCapture::default()),
            sink: Box::new(sink),
        });
        Self { shared }
    }

    // --- Data inputs ---

    pub fn set_items(&self, items: Vec<PlacedItem>) {
        let actions = self.shared.core.borrow_mut().set_items(items);
        dispatch(&self.shared, actions);
    }

    pub fn delete_item(&self, id: &ItemId) {
        let actions = self.shared.core.borrow_mut().delete_item(id);
        dispatch(&self.shared, actions);
    }

    // --- Layout ---

    /// Size the surface to the largest 4:3 box inside a container of the given CSS size.
    pub fn fit_to(&self, container_width: f64, container_height: f64) {
        let logical = self.shared.core.borrow().logical;
        let fitted = geometry::fit_within(ScreenRect::new(0.0, 0.0, container_width, container_height), logical);
        for (name, value) in [("width", fitted.width), ("height", fitted.height)] {
            if let Err(e) = self.shared.svg.set_attribute(name, &value.to_string()) {
                log::error!("failed to set surface {name}: {e:?}");
            }
        }
        sync_rect(&self.shared);
    }

    // --- Input events ---

    pub fn on_pointer_down(&self, ev: &PointerEvent) {
        sync_rect(&self.shared);
        let actions = self.shared.core.borrow_mut().on_pointer_down(client_point(ev), Button::from_dom(ev.button()));
        if actions.iter().any(|a| matches!(a, Action::CapturePointer | Action::ItemDeleted { .. })) {
            ev.prevent_default();
            ev.stop_propagation();
        }
        dispatch(&self.shared, actions);
    }

    /// Hover tracking. Ignored while captured; the document listeners see those moves.
    pub fn on_pointer_move(&self, ev: &PointerEvent) {
        if self.shared.core.borrow().is_capturing() {
            return;
        }
        let actions = self.shared.core.borrow_mut().on_pointer_move(client_point(ev));
        dispatch(&self.shared, actions);
    }

    pub fn on_drag_over(&self, ev: &DragEvent) {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect(DROP_EFFECT);
        }
    }

    pub fn on_drop(&self, ev: &DragEvent) {
        ev.prevent_default();
        sync_rect(&self.shared);
        let raw = match ev.data_transfer().map(|dt| dt.get_data(DROP_MEDIA_TYPE)) {
            Some(Ok(raw)) => Some(raw),
            Some(Err(e)) => {
                log::warn!("drop data unreadable: {e:?}");
                None
            }
            None => None,
        };
        let pt = Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()));
        let actions = self.shared.core.borrow_mut().on_drop(pt, raw.as_deref());
        dispatch(&self.shared, actions);
    }

    // --- Render ---

    pub fn render(&self) {
        render(&self.shared);
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.shared.core.borrow().is_capturing()
    }

    #[must_use]
    pub fn items(&self) -> Vec<PlacedItem> {
        self.shared.core.borrow().items().to_vec()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(document) = &self.shared.document {
            self.shared.capture.borrow_mut().detach(document);
        }
    }
}

fn client_point(ev: &PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn sync_rect(shared: &Shared) {
    let r = shared.svg.get_bounding_client_rect();
    shared.core.borrow_mut().set_canvas_rect(ScreenRect::new(r.x(), r.y(), r.width(), r.height()));
}

fn render(shared: &Shared) {
    let markup = shared.core.borrow_mut().scene_markup();
    shared.svg.set_inner_html(&markup);
}

fn dispatch(shared: &Rc<Shared>, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::CapturePointer | Action::ReleasePointer => {
                let Some(document) = &shared.document else {
                    log::warn!("surface is detached; pointer capture unavailable");
                    continue;
                };
                shared.capture.borrow_mut().apply(document, &action, || capture_listeners(shared));
            }
            Action::RenderNeeded => render(shared),
            Action::SetCursor(cursor) => {
                if let Err(e) = shared.svg.set_attribute("style", &format!("cursor:{cursor}")) {
                    log::warn!("failed to set cursor: {e:?}");
                }
            }
            other => (shared.sink)(other),
        }
    }
}

fn capture_listeners(shared: &Rc<Shared>) -> CaptureListeners<PointerClosure> {
    let weak: Weak<Shared> = Rc::downgrade(shared);
    let on_move = Closure::wrap(Box::new(move |ev: PointerEvent| {
        if let Some(shared) = weak.upgrade() {
            let actions = shared.core.borrow_mut().on_pointer_move(client_point(&ev));
            dispatch(&shared, actions);
        }
    }) as Box<dyn FnMut(PointerEvent)>);

    let weak: Weak<Shared> = Rc::downgrade(shared);
    let on_up = Closure::wrap(Box::new(move |ev: PointerEvent| {
        if let Some(shared) = weak.upgrade() {
            let actions = shared.core.borrow_mut().on_pointer_up(client_point(&ev));
            dispatch(&shared, actions);
        }
    }) as Box<dyn FnMut(PointerEvent)>);

    CaptureListeners { on_move, on_up }
}
