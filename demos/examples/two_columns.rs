// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two columns of cards; cards move within and between columns.
//!
//! Run:
//! - `cargo run -p understory_drag_drop_demos --example two_columns`
//! - `RUST_LOG=understory_drag_drop=trace cargo run -p understory_drag_drop_demos --example two_columns`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use understory_drag_drop::{CountingSurface, DragOptions, DragSession, RegionRegistry};
use understory_drag_drop_demos::{
    Board, BoardHandler, Card, Key, SharedBoard, Slot, grab_card, init_logging, mount,
};

type Session = DragSession<Key, Slot, Slot, CountingSurface>;

fn drag(
    board: &SharedBoard,
    session: &mut Session,
    handler: &mut BoardHandler,
    press: Point,
    path: &[Point],
) {
    let Some(mut card) = grab_card(board, press) else {
        println!("nothing to grab at {press:?}");
        return;
    };
    if let Err(err) = card.press(session, press, handler) {
        println!("press failed: {err}");
        return;
    }
    println!(
        "grabbed {:?}, listening: {}",
        card.id(),
        session.surface().is_listening()
    );

    let mut last = press;
    for &point in path {
        last = point;
        match card.pointer_move(session, point, handler) {
            Ok(_) => println!(
                "  pointer {point:?} overlay at {:?} over {:?}",
                session.overlay_origin(),
                session.over().map(|o| o.id),
            ),
            Err(err) => println!("  move failed: {err}"),
        }
    }

    match card.release(session, last, handler) {
        Ok(Some(outcome)) if outcome.is_dropped() => {
            println!("dropped on {:?}", outcome.over().map(|o| o.id));
        }
        Ok(Some(_)) => println!("canceled"),
        Ok(None) => println!("click"),
        Err(err) => println!("drop failed: {err}"),
    }
    println!(
        "listening: {}, board: {:?}\n",
        session.surface().is_listening(),
        board.borrow().names()
    );
}

fn main() {
    init_logging();

    let board: SharedBoard = Rc::new(RefCell::new(Board::new(vec![
        vec![Card::new(1, "item 1"), Card::new(3, "item 3")],
        vec![Card::new(2, "item 2")],
    ])));
    let registry = RegionRegistry::new();
    mount(&board, &registry);

    let mut session = DragSession::with_surface(
        registry.clone(),
        CountingSurface::new(),
        DragOptions::default(),
    );
    let mut handler = BoardHandler::new(Rc::clone(&board), registry);
    println!("board: {:?}\n", board.borrow().names());

    // "item 1" onto the lower half of "item 2".
    drag(
        &board,
        &mut session,
        &mut handler,
        Point::new(100.0, 100.0),
        &[Point::new(300.0, 120.0), Point::new(500.0, 150.0)],
    );

    // "item 3" (now first in the left column) onto the upper half of "item 2".
    drag(
        &board,
        &mut session,
        &mut handler,
        Point::new(50.0, 50.0),
        &[Point::new(450.0, 30.0)],
    );

    // "item 2" into the empty space of the left column.
    drag(
        &board,
        &mut session,
        &mut handler,
        Point::new(450.0, 250.0),
        &[Point::new(100.0, 600.0)],
    );

    // Released outside both columns: canceled, nothing moves.
    drag(
        &board,
        &mut session,
        &mut handler,
        Point::new(450.0, 50.0),
        &[Point::new(900.0, 50.0)],
    );
}
