// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the drag-and-drop demos.
//!
//! A [`Board`] is a row of columns, each stacking fixed-size cards. Cards and
//! column bodies are registered as droppable regions whose bounds are computed
//! from the board on every hit test, so a reorder moves the regions with it.
//!
//! Run:
//! - `cargo run -p understory_drag_drop_demos --example two_columns`
//! - `cargo run -p understory_drag_drop_demos --example reorder_list`
//!
//! Set `RUST_LOG=understory_drag_drop=debug` to see session transitions.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use understory_drag_drop::{
    Axis, DragEnd, DragHandler, DragOver, DragStart, DraggableBinding, DropSide, ElementHandle,
    RegionRegistry, ReorderError, bind_draggable, drop_side, reorder_to_side, transfer,
};

/// Card edge length.
pub const CARD_SIZE: f64 = 192.0;
/// Gap around each card.
pub const MARGIN: f64 = 4.0;
/// Width of a column.
pub const COLUMN_WIDTH: f64 = 400.0;
/// Height of every column.
pub const COLUMN_HEIGHT: f64 = 800.0;

/// Region and draggable identifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A card, by card id.
    Card(u32),
    /// The body of a column, by column index.
    Column(usize),
}

/// Position of a card on the board. A column body uses `index == column length`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Column index.
    pub column: usize,
    /// Index within the column.
    pub index: usize,
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// Stable card id.
    pub id: u32,
    /// Display name.
    pub name: String,
}

impl Card {
    /// Creates a card.
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
        }
    }
}

/// Columns of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    /// Cards per column, top to bottom.
    pub columns: Vec<Vec<Card>>,
}

/// A board shared between the demo loop, bounds providers, and the drop handler.
pub type SharedBoard = Rc<RefCell<Board>>;

impl Board {
    /// Creates a board from its columns.
    pub fn new(columns: Vec<Vec<Card>>) -> Self {
        Self { columns }
    }

    /// Bounds of a column body.
    pub fn column_rect(&self, column: usize) -> Option<Rect> {
        (column < self.columns.len()).then(|| {
            let x = column as f64 * COLUMN_WIDTH;
            Rect::new(x, 0.0, x + COLUMN_WIDTH, COLUMN_HEIGHT)
        })
    }

    /// Where card `id` currently sits.
    pub fn slot_of(&self, id: u32) -> Option<Slot> {
        self.columns.iter().enumerate().find_map(|(column, cards)| {
            let index = cards.iter().position(|card| card.id == id)?;
            Some(Slot { column, index })
        })
    }

    /// Bounds of card `id`, or `None` if it is no longer on the board.
    pub fn card_rect(&self, id: u32) -> Option<Rect> {
        let slot = self.slot_of(id)?;
        let x = slot.column as f64 * COLUMN_WIDTH + MARGIN;
        let y = slot.index as f64 * (CARD_SIZE + 2.0 * MARGIN) + MARGIN;
        Some(Rect::new(x, y, x + CARD_SIZE, y + CARD_SIZE))
    }

    /// The card under `point`, if any.
    pub fn card_at(&self, point: Point) -> Option<u32> {
        self.columns
            .iter()
            .flatten()
            .map(|card| card.id)
            .find(|&id| self.card_rect(id).is_some_and(|r| r.contains(point)))
    }

    /// Card names per column, for printing.
    pub fn names(&self) -> Vec<Vec<&str>> {
        self.columns
            .iter()
            .map(|cards| cards.iter().map(|card| card.name.as_str()).collect())
            .collect()
    }

    /// Moves the card at `from` onto `to`, on `side` of the target card.
    pub fn apply_drop(&mut self, from: Slot, to: Slot, side: DropSide) -> Result<(), ReorderError> {
        if from.column == to.column {
            let cards = &self.columns[from.column];
            // A drop on the column body moves the card to the end.
            let (target, side) = if to.index >= cards.len() {
                (cards.len() - 1, DropSide::After)
            } else {
                (to.index, side)
            };
            self.columns[from.column] = reorder_to_side(cards, from.index, target, side)?;
        } else {
            let (source, target) = transfer(
                &self.columns[from.column],
                &self.columns[to.column],
                from.index,
                to.index,
                side,
            )?;
            self.columns[from.column] = source;
            self.columns[to.column] = target;
        }
        Ok(())
    }
}

/// Registers every card, then every column body, as droppable regions.
///
/// Cards come first so they win over the column body they sit in.
pub fn mount(board: &SharedBoard, registry: &RegionRegistry<Key, Slot>) {
    registry.clear();
    let current = board.borrow();
    for (column, cards) in current.columns.iter().enumerate() {
        for (index, card) in cards.iter().enumerate() {
            let id = card.id;
            let live = Rc::clone(board);
            registry.register(
                Key::Card(id),
                move || live.borrow().card_rect(id),
                Slot { column, index },
            );
        }
    }
    for (column, cards) in current.columns.iter().enumerate() {
        let live = Rc::clone(board);
        registry.register(
            Key::Column(column),
            move || live.borrow().column_rect(column),
            Slot {
                column,
                index: cards.len(),
            },
        );
    }
}

/// Binds the card under `point` as a draggable, if there is one.
pub fn grab_card(
    board: &SharedBoard,
    point: Point,
) -> Option<DraggableBinding<Key, Slot, impl ElementHandle + use<>>> {
    let current = board.borrow();
    let id = current.card_at(point)?;
    let slot = current.slot_of(id)?;
    let live = Rc::clone(board);
    Some(bind_draggable(Key::Card(id), slot, move || live.borrow().card_rect(id)))
}

/// Applies drops to the board and remounts its regions.
#[derive(Debug)]
pub struct BoardHandler {
    board: SharedBoard,
    registry: RegionRegistry<Key, Slot>,
}

impl BoardHandler {
    /// Creates a handler for `board` whose regions live in `registry`.
    pub fn new(board: SharedBoard, registry: RegionRegistry<Key, Slot>) -> Self {
        Self { board, registry }
    }
}

impl DragHandler<Key, Slot, Slot> for BoardHandler {
    type Error = ReorderError;

    fn on_drag_start(&mut self, e: DragStart<'_, Key, Slot>) -> Result<(), ReorderError> {
        tracing::info!(active = ?e.active.id, "picked up");
        Ok(())
    }

    fn on_drag_over(&mut self, e: DragOver<'_, Key, Slot, Slot>) -> Result<(), ReorderError> {
        tracing::info!(over = ?e.over.map(|o| o.id), "hovering");
        Ok(())
    }

    fn on_drag_end(&mut self, e: DragEnd<'_, Key, Slot, Slot>) -> Result<(), ReorderError> {
        let side = match e.over.id {
            Key::Column(_) => DropSide::Before,
            Key::Card(_) => drop_side(e.over.bounds, e.pointer, Axis::Vertical),
        };
        self.board
            .borrow_mut()
            .apply_drop(e.active.payload, e.over.payload, side)?;
        mount(&self.board, &self.registry);
        Ok(())
    }
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(vec![
            vec![Card::new(1, "one"), Card::new(2, "two")],
            vec![Card::new(3, "three")],
            vec![],
        ])
    }

    #[test]
    fn card_rects_follow_slots() {
        let board = board();
        assert_eq!(board.card_rect(2), Some(Rect::new(4.0, 204.0, 196.0, 396.0)));
        assert_eq!(board.card_at(Point::new(405.0, 10.0)), Some(3));
        assert_eq!(board.card_rect(99), None);
    }

    #[test]
    fn drop_on_empty_column_appends() {
        let mut board = board();
        board
            .apply_drop(
                Slot { column: 0, index: 0 },
                Slot { column: 2, index: 0 },
                DropSide::Before,
            )
            .unwrap();
        assert_eq!(board.names(), [vec!["two"], vec!["three"], vec!["one"]]);
    }

    #[test]
    fn drop_on_own_column_body_moves_to_end() {
        let mut board = board();
        board
            .apply_drop(
                Slot { column: 0, index: 0 },
                Slot { column: 0, index: 2 },
                DropSide::Before,
            )
            .unwrap();
        assert_eq!(board.names()[0], ["two", "one"]);
    }

    #[test]
    fn mount_registers_cards_before_columns() {
        let board: SharedBoard = Rc::new(RefCell::new(board()));
        let registry = RegionRegistry::new();
        mount(&board, &registry);
        let keys: Vec<Key> = registry.snapshot().iter().map(|r| *r.id()).collect();
        assert_eq!(
            keys,
            [
                Key::Card(1),
                Key::Card(2),
                Key::Card(3),
                Key::Column(0),
                Key::Column(1),
                Key::Column(2),
            ]
        );
        // A point on card 1 is also inside column 0; the card wins.
        assert_eq!(
            registry.hit_test(Point::new(10.0, 10.0)).map(|o| o.id),
            Some(Key::Card(1))
        );
    }
}
