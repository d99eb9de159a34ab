#[cfg(test)]
mod cell {
    use crate::{CellKind, Position};

    #[test]
    fn drivability() {
        assert!(CellKind::Road.is_drivable());
        assert!(CellKind::Parking.is_drivable());
        assert!(CellKind::Entry.is_drivable());
        assert!(CellKind::Exit.is_drivable());
        assert!(!CellKind::Wall.is_drivable());
    }

    #[test]
    fn default_is_wall() {
        assert_eq!(CellKind::default(), CellKind::Wall);
    }

    #[test]
    fn manhattan_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.manhattan(b), 7);
    }
}

#[cfg(test)]
mod grid {
    use crate::{CellKind, GridBuilder, GridError};

    fn small_grid() -> crate::Grid {
        let mut b = GridBuilder::new(4, 3);
        for x in 0..4 {
            for y in 0..3 {
                b.set(x, y, CellKind::Road);
            }
        }
        b.set(0, 1, CellKind::Entry);
        b.set(3, 1, CellKind::Exit);
        b.set(2, 2, CellKind::Parking);
        b.build().unwrap()
    }

    #[test]
    fn dimensions_and_bounds() {
        let g = small_grid();
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert!(g.in_bounds(0, 0));
        assert!(g.in_bounds(3, 2));
        assert!(!g.in_bounds(4, 0));
        assert!(!g.in_bounds(-1, 0));
    }

    #[test]
    fn derived_cell_sets() {
        let g = small_grid();
        assert_eq!(g.entry_cells().len(), 1);
        assert_eq!(g.exit_cells().len(), 1);
        assert_eq!(g.parking_cells().len(), 1);
    }

    #[test]
    fn boundary_non_corner() {
        let g = small_grid();
        assert!(g.is_boundary_non_corner(0, 1));
        assert!(!g.is_boundary_non_corner(0, 0)); // corner
        assert!(!g.is_boundary_non_corner(1, 1)); // interior
    }

    #[test]
    fn empty_grid_rejected() {
        let err = GridBuilder::new(0, 5).build().unwrap_err();
        assert!(matches!(err, GridError::EmptyGrid { .. }));
    }

    #[test]
    fn all_wall_grid_rejected() {
        let err = GridBuilder::new(3, 3).build().unwrap_err();
        assert!(matches!(err, GridError::NoDrivableCells));
    }

    #[test]
    fn from_cells_size_mismatch() {
        let err = GridBuilder::from_cells(2, 2, vec![CellKind::Road; 3]).unwrap_err();
        assert!(matches!(err, GridError::SizeMismatch { .. }));
    }
}
