use pk_grid::Position;

use crate::path::TimedPosition;
use crate::table::ReservationTable;

fn p(x: u32, y: u32) -> Position {
    Position::new(x, y)
}

#[test]
fn cell_free_by_default() {
    let t = ReservationTable::new();
    assert!(t.is_cell_free(p(1, 1), 0));
}

#[test]
fn vertex_reservation_blocks_cell() {
    let mut t = ReservationTable::new();
    let path = vec![TimedPosition::new(p(0, 0), 0), TimedPosition::new(p(1, 0), 1)];
    t.reserve_path(&path);
    assert!(!t.is_cell_free(p(0, 0), 0));
    assert!(!t.is_cell_free(p(1, 0), 1));
    assert!(t.is_cell_free(p(1, 0), 0));
}

#[test]
fn edge_reservation_blocks_head_on_swap() {
    let mut t = ReservationTable::new();
    let path = vec![TimedPosition::new(p(0, 0), 0), TimedPosition::new(p(1, 0), 1)];
    t.reserve_path(&path);
    // A->B at t=0 reserved; B->A at t=0 must also read as blocked.
    assert!(!t.is_edge_free(p(0, 0), p(1, 0), 0));
    assert!(!t.is_edge_free(p(1, 0), p(0, 0), 0));
}

#[test]
fn unreserve_path_is_inverse_of_reserve() {
    let mut t = ReservationTable::new();
    let path = vec![
        TimedPosition::new(p(0, 0), 0),
        TimedPosition::new(p(1, 0), 1),
        TimedPosition::new(p(2, 0), 2),
    ];
    t.reserve_path(&path);
    t.unreserve_path(&path);
    assert!(t.is_cell_free(p(0, 0), 0));
    assert!(t.is_cell_free(p(1, 0), 1));
    assert!(t.is_edge_free(p(0, 0), p(1, 0), 0));
}

#[test]
fn unreserve_goal_on_unreserved_cell_is_noop() {
    let mut t = ReservationTable::new();
    t.unreserve_goal(p(3, 3));
    assert!(t.is_cell_free(p(3, 3), 0));
}

#[test]
fn static_reservation_blocks_all_times() {
    let mut t = ReservationTable::new();
    t.reserve_goal(p(5, 5));
    assert!(!t.is_cell_free(p(5, 5), 0));
    assert!(!t.is_cell_free(p(5, 5), 1_000_000));
    t.unreserve_goal(p(5, 5));
    assert!(t.is_cell_free(p(5, 5), 0));
}
