use pk_core::{SimRng, Tick};
use pk_grid::{CellKind, GridBuilder, Position};

use pk_agent::Intent;

use crate::manager::ParkingManager;

fn test_grid() -> pk_grid::Grid {
    let mut b = GridBuilder::new(4, 4);
    for x in 0..4 {
        for y in 0..4 {
            b.set(x, y, CellKind::Road);
        }
    }
    b.set(0, 0, CellKind::Entry);
    b.set(3, 3, CellKind::Exit);
    b.set(1, 1, CellKind::Parking);
    b.set(2, 1, CellKind::Parking);
    b.build().unwrap()
}

#[test]
fn create_active_car_does_not_touch_slots() {
    let grid = test_grid();
    let mut mgr = ParkingManager::new(&grid);
    let free_before = mgr.free_spot_count();
    let _car = mgr.create_active_car(Position::new(0, 0), Intent::Exit, Tick(0), true);
    assert_eq!(mgr.free_spot_count(), free_before);
}

#[test]
fn assign_goal_parks_nearest_spot() {
    let grid = test_grid();
    let mut mgr = ParkingManager::new(&grid);
    let car = mgr.create_active_car(Position::new(0, 1), Intent::Park, Tick(0), false);
    let goal = mgr.assign_goal(&car).unwrap();
    assert_eq!(goal, Position::new(1, 1));
    assert_eq!(mgr.free_spot_count(), 1);
}

#[test]
fn release_assigned_spot_returns_it_to_free_pool() {
    let grid = test_grid();
    let mut mgr = ParkingManager::new(&grid);
    let car = mgr.create_active_car(Position::new(0, 1), Intent::Park, Tick(0), false);
    let before = mgr.free_spot_count();
    let _goal = mgr.assign_goal(&car).unwrap();
    assert_eq!(mgr.free_spot_count(), before - 1);
    mgr.release_assigned_spot(car.id);
    assert_eq!(mgr.free_spot_count(), before);
}

#[test]
fn release_on_car_without_assignment_is_noop() {
    let grid = test_grid();
    let mut mgr = ParkingManager::new(&grid);
    let before = mgr.free_spot_count();
    mgr.release_assigned_spot(pk_core::CarId(999));
    assert_eq!(mgr.free_spot_count(), before);
}

#[test]
fn create_parked_car_occupies_a_slot() {
    let grid = test_grid();
    let mut mgr = ParkingManager::new(&grid);
    let before = mgr.free_spot_count();
    let mut rng = SimRng::new(7);
    let car = mgr.create_parked_car(&mut rng, Tick(0)).unwrap();
    assert_eq!(mgr.free_spot_count(), before - 1);
    assert_eq!(car.goal, Some(car.current_position));
}

#[test]
fn create_parked_car_none_when_no_free_spots() {
    let grid = test_grid();
    let mut mgr = ParkingManager::new(&grid);
    let mut rng = SimRng::new(1);
    while mgr.create_parked_car(&mut rng, Tick(0)).is_some() {}
    assert_eq!(mgr.free_spot_count(), 0);
}

#[test]
fn choose_exit_cell_does_not_consume_exit() {
    let grid = test_grid();
    let mut mgr = ParkingManager::new(&grid);
    let car = mgr.create_active_car(Position::new(3, 0), Intent::Exit, Tick(0), false);
    let e1 = mgr.assign_goal(&car).unwrap();
    let e2 = mgr.assign_goal(&car).unwrap();
    assert_eq!(e1, e2);
    assert_eq!(e1, Position::new(3, 3));
}

#[test]
fn parking_conservation_invariant() {
    let grid = test_grid();
    let mut mgr = ParkingManager::new(&grid);
    let total_before = mgr.total_parking_cells();
    let car = mgr.create_active_car(Position::new(0, 1), Intent::Park, Tick(0), false);
    let spot = mgr.assign_goal(&car).unwrap();
    mgr.mark_occupied(car.id, spot);
    assert_eq!(mgr.total_parking_cells(), total_before);
}
