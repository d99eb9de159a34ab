use pk_core::{CarId, Tick};
use pk_grid::Position;
use pk_reservation::TimedPosition;

use crate::car::Car;
use crate::intent::Intent;

fn car_at(x: u32, y: u32) -> Car {
    Car::new(CarId(0), Position::new(x, y), Intent::Park, Tick(0), false)
}

#[test]
fn peek_next_with_future_waypoint() {
    let mut c = car_at(0, 0);
    c.set_path(vec![
        TimedPosition::new(Position::new(0, 0), 0),
        TimedPosition::new(Position::new(1, 0), 1),
    ]);
    assert_eq!(c.peek_next(Tick(0)), Position::new(1, 0));
}

#[test]
fn peek_next_holds_when_no_matching_entry() {
    let c = car_at(2, 2);
    // No path at all: intends to stay.
    assert_eq!(c.peek_next(Tick(0)), Position::new(2, 2));
}

#[test]
fn consume_to_advances_cursor_past_stale_entries() {
    let mut c = car_at(0, 0);
    c.set_path(vec![
        TimedPosition::new(Position::new(0, 0), 0),
        TimedPosition::new(Position::new(1, 0), 1),
        TimedPosition::new(Position::new(2, 0), 2),
    ]);
    c.consume_to(Tick(0));
    assert_eq!(c.path_cursor, 2);
    c.current_position = Position::new(1, 0);
    c.consume_to(Tick(1));
    assert_eq!(c.path_cursor, 3);
}

#[test]
fn has_arrived_requires_both_exhausted_and_at_goal() {
    let mut c = car_at(0, 0);
    c.goal = Some(Position::new(0, 0));
    assert!(c.has_arrived(), "empty path already at goal counts as arrived");

    c.goal = Some(Position::new(5, 5));
    assert!(!c.has_arrived());
}

#[test]
fn clear_path_resets_cursor() {
    let mut c = car_at(0, 0);
    c.set_path(vec![TimedPosition::new(Position::new(0, 0), 0)]);
    c.path_cursor = 1;
    c.clear_path();
    assert!(!c.has_path());
    assert_eq!(c.path_cursor, 0);
}
