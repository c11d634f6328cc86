// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A horizontal strip of tiles reordered by dragging, with a small activation
//! distance so a short press stays a click.
//!
//! Run:
//! - `cargo run -p understory_drag_drop_demos --example reorder_list`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_drag_drop::{
    Activation, Axis, Callbacks, DragError, DragHandler, DragOptions, DragOutcome, DragSession,
    DraggableBinding, DroppableBinding, ElementHandle, NoSurface, RegionRegistry, ReorderError,
    bind_draggable, bind_droppable, reorder,
};
use understory_drag_drop_demos::init_logging;

const TILE: f64 = 60.0;

type Order = Rc<RefCell<Vec<&'static str>>>;

fn tile_rect(order: &Order, name: &str) -> Option<Rect> {
    let index = order.borrow().iter().position(|n| *n == name)?;
    let x = index as f64 * TILE;
    Some(Rect::new(x, 0.0, x + TILE, TILE))
}

type Session = DragSession<&'static str, usize, usize, NoSurface>;

fn gesture<E, H>(
    tile: &mut DraggableBinding<&'static str, usize, E>,
    session: &mut Session,
    handler: &mut H,
    press: Point,
    release: Point,
) -> Result<Option<DragOutcome<&'static str, usize, usize>>, DragError<H::Error>>
where
    E: ElementHandle,
    H: DragHandler<&'static str, usize, usize>,
{
    tile.press(session, press, handler)?;
    tile.pointer_move(session, release, handler)?;
    tile.release(session, release, handler)
}

fn main() {
    init_logging();

    let order: Order = Rc::new(RefCell::new(vec!["A", "B", "C", "D", "E"]));
    let registry = RegionRegistry::<&'static str, usize>::new();
    let mut slots: Vec<DroppableBinding<&'static str, usize>> = order
        .borrow()
        .iter()
        .enumerate()
        .map(|(index, &name)| {
            let live = Rc::clone(&order);
            bind_droppable(&registry, name, index, move || tile_rect(&live, name))
        })
        .collect();

    let mut session = Session::with_surface(
        registry,
        NoSurface,
        DragOptions {
            activation: Activation::Distance(4.0),
            axis: Axis::Horizontal,
        },
    );

    let target = Rc::clone(&order);
    let mut handler = Callbacks::<&'static str, usize, usize, ReorderError>::new()
        .on_start(|start| {
            println!("drag {} from index {}", start.active.id, start.active.payload);
            Ok(())
        })
        .on_end(move |end| {
            let next = reorder(
                target.borrow().as_slice(),
                end.active.payload,
                end.over.payload,
                end.over.bounds,
                end.pointer,
                Axis::Horizontal,
            )?;
            *target.borrow_mut() = next;
            Ok(())
        })
        .on_cancel(|cancel| {
            println!("drag {} canceled", cancel.active.id);
            Ok(())
        });

    // (tile, press, release): a click, a drop right of "D", a drop left of "A", and a miss.
    let gestures = [
        ("B", Point::new(90.0, 30.0), Point::new(92.0, 31.0)),
        ("B", Point::new(90.0, 30.0), Point::new(230.0, 30.0)),
        ("E", Point::new(270.0, 30.0), Point::new(10.0, 30.0)),
        ("C", Point::new(150.0, 30.0), Point::new(150.0, 200.0)),
    ];

    for (name, press, release) in gestures {
        let Some(index) = order.borrow().iter().position(|n| *n == name) else {
            continue;
        };
        let live = Rc::clone(&order);
        let mut tile = bind_draggable(name, index, move || tile_rect(&live, name));

        let result = gesture(&mut tile, &mut session, &mut handler, press, release);
        match result {
            Ok(None) => println!("click on {name}"),
            Ok(Some(outcome)) => println!(
                "{name} released over {:?}",
                outcome.over().map(|over| over.id)
            ),
            Err(err) => println!("{name}: {err}"),
        }

        // Droppable payloads are indexes, so refresh them after every reorder.
        for slot in &mut slots {
            if let Some(index) = order.borrow().iter().position(|n| n == slot.id()) {
                slot.set_payload(index);
            }
        }
        println!("order: {:?}\n", order.borrow());
    }
}
