//! Index mapping between (i,j,k) triples and the linear cell ordering.

use eclgrid::{Dims, ErrorKind, Grid};

#[test]
fn zero_extents_are_rejected() {
    assert!(Dims::new(0, 10, 10).is_err());
    assert!(Dims::new(10, 0, 10).is_err());
    assert!(Dims::new(10, 10, 0).is_err());
    assert!(Grid::new(0, 1, 1).is_err());
}

#[test]
fn i_varies_fastest() {
    let dims = Dims::new(17, 19, 41).unwrap();
    assert_eq!(dims.global_index(0, 0, 0).unwrap(), 0);
    assert_eq!(dims.global_index(1, 0, 0).unwrap(), 1);
    assert_eq!(dims.global_index(0, 1, 0).unwrap(), 17);
    assert_eq!(dims.global_index(0, 0, 1).unwrap(), 17 * 19);
    assert_eq!(dims.global_index(16, 18, 40).unwrap(), 17 * 19 * 41 - 1);
}

#[test]
fn known_linear_indices_decompose() {
    let dims = Dims::new(17, 19, 41).unwrap();
    assert_eq!(dims.ijk(167).unwrap(), [14, 9, 0]);
    assert_eq!(dims.ijk(5723).unwrap(), [11, 13, 17]);
    assert_eq!(dims.global_index(14, 9, 0).unwrap(), 167);
    assert_eq!(dims.global_index(11, 13, 17).unwrap(), 5723);
}

#[test]
fn index_round_trip_covers_every_cell() {
    let dims = Dims::new(17, 19, 41).unwrap();
    for g in 0..dims.cartesian_size() {
        let [i, j, k] = dims.ijk(g).unwrap();
        assert_eq!(dims.global_index(i, j, k).unwrap(), g);
    }
}

#[test]
fn out_of_range_lookups_are_invalid_argument() {
    let dims = Dims::new(17, 19, 41).unwrap();
    for (i, j, k) in [(17, 0, 0), (0, 19, 0), (0, 0, 41)] {
        let err = dims.global_index(i, j, k).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    let err = dims.ijk(17 * 19 * 41).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn grid_exposes_the_same_mapping() {
    let grid = Grid::new(17, 19, 41).unwrap();
    assert_eq!(grid.cartesian_size(), 17 * 19 * 41);
    assert_eq!(grid.global_index(11, 13, 17).unwrap(), 5723);
    assert_eq!(grid.ijk(167).unwrap(), [14, 9, 0]);
    assert!(grid.global_index(17, 0, 0).is_err());
}
