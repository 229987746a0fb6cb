//! Front-end input state.
//!
//! [`InputState`] is owned by the front end, not the simulation. It holds the
//! currently selected facility kind and any marked route endpoints, and turns
//! raw pointer and key events into [`Command`]s.

use crate::catalog::FacilityCatalog;
use crate::command::Command;
use crate::grid::GridPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    F,
    D,
    V,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Pointer press at a pixel position relative to the grid origin.
    PointerDown { button: PointerButton, x: i32, y: i32 },
}

/// Cell under a pixel position. Floors, so pixels left of or above the grid
/// land on negative cells.
pub fn pointer_to_cell(x: i32, y: i32, tile_size: u32) -> GridPosition {
    let tile = tile_size.max(1) as i32;
    GridPosition::new(x.div_euclid(tile), y.div_euclid(tile))
}

#[derive(Debug, Clone)]
pub struct InputState {
    known_kinds: Vec<String>,
    bindings: Vec<(Key, String)>,
    selected: Option<String>,
    source: Option<GridPosition>,
    destination: Option<GridPosition>,
}

impl InputState {
    /// Input state for `catalog`, with W/F/D bound to warehouse/factory/depot.
    pub fn new(catalog: &FacilityCatalog) -> Self {
        Self {
            known_kinds: catalog.kinds().map(|(_, def)| def.name.clone()).collect(),
            bindings: vec![
                (Key::W, "warehouse".to_string()),
                (Key::F, "factory".to_string()),
                (Key::D, "depot".to_string()),
            ],
            selected: None,
            source: None,
            destination: None,
        }
    }

    /// Rebind a selection key. Returns false if `kind` is not in the catalog.
    pub fn bind(&mut self, key: Key, kind: &str) -> bool {
        if !self.is_known(kind) {
            return false;
        }
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, kind.to_string()));
        true
    }

    fn is_known(&self, kind: &str) -> bool {
        self.known_kinds.iter().any(|k| k == kind)
    }

    /// Select the kind used by the next primary click. Unknown names leave
    /// the selection unchanged.
    pub fn select_kind(&mut self, name: &str) -> bool {
        if !self.is_known(name) {
            log::debug!("ignoring selection of unknown facility kind '{name}'");
            return false;
        }
        self.selected = Some(name.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn source(&self) -> Option<GridPosition> {
        self.source
    }

    pub fn destination(&self) -> Option<GridPosition> {
        self.destination
    }

    /// Mark a route endpoint: the first mark is the source, the second the
    /// destination, and a third starts over with a new source.
    pub fn mark(&mut self, cell: GridPosition) {
        match (self.source, self.destination) {
            (Some(_), None) => self.destination = Some(cell),
            _ => {
                self.source = Some(cell);
                self.destination = None;
            }
        }
    }

    pub fn handle(&mut self, event: &InputEvent, tile_size: u32) -> Option<Command> {
        match *event {
            InputEvent::KeyDown(Key::Escape) => {
                self.clear_selection();
                None
            }
            InputEvent::KeyDown(Key::V) => {
                let (source, destination) = (self.source?, self.destination?);
                self.source = None;
                self.destination = None;
                Some(Command::assign(source, destination))
            }
            InputEvent::KeyDown(key) => {
                let kind = self
                    .bindings
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, kind)| kind.clone())?;
                self.select_kind(&kind);
                None
            }
            InputEvent::PointerDown { button, x, y } => {
                let cell = pointer_to_cell(x, y, tile_size);
                match button {
                    PointerButton::Primary => {
                        let kind = self.selected.as_deref()?;
                        Some(Command::place(kind, cell))
                    }
                    PointerButton::Secondary => Some(Command::upgrade(cell)),
                    PointerButton::Middle => {
                        self.mark(cell);
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::new(&FacilityCatalog::classic())
    }

    fn click(button: PointerButton, x: i32, y: i32) -> InputEvent {
        InputEvent::PointerDown { button, x, y }
    }

    // -----------------------------------------------------------------------
    // Coordinates
    // -----------------------------------------------------------------------

    #[test]
    fn pointer_to_cell_floors() {
        assert_eq!(pointer_to_cell(0, 0, 32), GridPosition::new(0, 0));
        assert_eq!(pointer_to_cell(31, 63, 32), GridPosition::new(0, 1));
        assert_eq!(pointer_to_cell(64, 32, 32), GridPosition::new(2, 1));
        assert_eq!(pointer_to_cell(-1, -33, 32), GridPosition::new(-1, -2));
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    #[test]
    fn keys_select_kinds() {
        let mut input = input();
        assert_eq!(input.handle(&InputEvent::KeyDown(Key::F), 32), None);
        assert_eq!(input.selected(), Some("factory"));
        input.handle(&InputEvent::KeyDown(Key::D), 32);
        assert_eq!(input.selected(), Some("depot"));
        input.handle(&InputEvent::KeyDown(Key::Escape), 32);
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn unknown_kind_keeps_selection() {
        let mut input = input();
        assert!(input.select_kind("warehouse"));
        assert!(!input.select_kind("castle"));
        assert_eq!(input.selected(), Some("warehouse"));
    }

    #[test]
    fn rebinding_requires_known_kind() {
        let mut input = input();
        assert!(!input.bind(Key::W, "castle"));
        assert!(input.bind(Key::W, "depot"));
        input.handle(&InputEvent::KeyDown(Key::W), 32);
        assert_eq!(input.selected(), Some("depot"));
    }

    // -----------------------------------------------------------------------
    // Clicks
    // -----------------------------------------------------------------------

    #[test]
    fn primary_click_without_selection_does_nothing() {
        let mut input = input();
        assert_eq!(input.handle(&click(PointerButton::Primary, 40, 40), 32), None);
    }

    #[test]
    fn primary_click_places_selected_kind() {
        let mut input = input();
        input.select_kind("factory");
        assert_eq!(
            input.handle(&click(PointerButton::Primary, 70, 40), 32),
            Some(Command::place("factory", GridPosition::new(2, 1)))
        );
    }

    #[test]
    fn secondary_click_upgrades_regardless_of_selection() {
        let mut input = input();
        assert_eq!(
            input.handle(&click(PointerButton::Secondary, 5, 100), 32),
            Some(Command::upgrade(GridPosition::new(0, 3)))
        );
    }

    // -----------------------------------------------------------------------
    // Routes
    // -----------------------------------------------------------------------

    #[test]
    fn v_without_endpoints_does_nothing() {
        let mut input = input();
        assert_eq!(input.handle(&InputEvent::KeyDown(Key::V), 32), None);
        input.handle(&click(PointerButton::Middle, 0, 0), 32);
        assert_eq!(input.handle(&InputEvent::KeyDown(Key::V), 32), None);
        assert_eq!(input.source(), Some(GridPosition::new(0, 0)));
    }

    #[test]
    fn marking_then_v_assigns_and_clears() {
        let mut input = input();
        input.handle(&click(PointerButton::Middle, 0, 0), 32);
        input.handle(&click(PointerButton::Middle, 96, 64), 32);

        assert_eq!(
            input.handle(&InputEvent::KeyDown(Key::V), 32),
            Some(Command::assign(GridPosition::new(0, 0), GridPosition::new(3, 2)))
        );
        assert_eq!(input.source(), None);
        assert_eq!(input.destination(), None);
    }

    #[test]
    fn third_mark_starts_new_route() {
        let mut input = input();
        input.mark(GridPosition::new(0, 0));
        input.mark(GridPosition::new(1, 1));
        input.mark(GridPosition::new(2, 2));
        assert_eq!(input.source(), Some(GridPosition::new(2, 2)));
        assert_eq!(input.destination(), None);
    }
}
