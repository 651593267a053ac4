//! Binary grid file round trips and failure modes.

use eclgrid::{Deck, ErrorKind, Grid, GridError, Keyword};

fn fill(n: usize, x: f64) -> Vec<f64> {
    vec![x; n]
}

fn cartesian_deck() -> Deck {
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]))
        .push(Keyword::data("DXV", fill(10, 0.25)))
        .push(Keyword::data("DYV", fill(10, 0.25)))
        .push(Keyword::data("DZV", fill(10, 0.25)))
        .push(Keyword::data("TOPS", fill(100, 0.25)));
    deck
}

fn corner_deck() -> Deck {
    let (nx, ny, nz, dz) = (4, 3, 2, 0.5);
    let mut coord = Vec::new();
    for j in 0..=ny {
        for i in 0..=nx {
            let (x, y) = (i as f64, j as f64);
            coord.extend([x, y, 0.0, x, y, nz as f64 * dz]);
        }
    }
    let mut zcorn = Vec::new();
    for k in 0..nz {
        for k2 in 0..2 {
            let z = (k + k2) as f64 * dz;
            zcorn.extend(std::iter::repeat(z).take(4 * nx * ny));
        }
    }
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![nx as i64, ny as i64, nz as i64]))
        .push(Keyword::data("COORD", coord))
        .push(Keyword::data("ZCORN", zcorn));
    deck
}

#[test]
fn cartesian_grid_round_trips() {
    let mut deck = cartesian_deck();
    deck.push(Keyword::data("PINCH", vec![0.2]))
        .push(Keyword::data("MINPV", vec![10.0]));
    let mut grid = Grid::from_deck_strict(&deck).unwrap();
    let mut mask = vec![1; 1000];
    mask[167] = 0;
    mask[500] = 0;
    grid.reset_actnum(Some(&mask)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.egrid");
    grid.save_egrid(&path).unwrap();

    let loaded = Grid::load_egrid(&path).unwrap();
    assert_eq!(loaded, grid);
    assert_eq!(loaded.num_active(), 998);
    assert!((loaded.pinch_threshold_thickness().unwrap() - 0.2).abs() < 1e-12);
    assert!((loaded.cell_volume_global(0).unwrap() - 0.25_f64.powi(3)).abs() < 1e-12);
}

#[test]
fn corner_point_grid_round_trips() {
    let grid = Grid::from_deck_strict(&corner_deck()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cp.egrid");
    grid.save_egrid(&path).unwrap();

    let loaded = Grid::load_egrid(&path).unwrap();
    assert_eq!(loaded, grid);
    assert!((loaded.cell_volume(1, 1, 1).unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn dimensions_only_grid_round_trips() {
    let grid = Grid::dimensions_only(7, 5, 3).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dims.egrid");
    grid.save_egrid(&path).unwrap();

    let loaded = Grid::load_egrid(&path).unwrap();
    assert_eq!(loaded, grid);
    assert!(!loaded.has_cell_info());
    assert_eq!(loaded.cell_volume(0, 0, 0).unwrap_err().kind(), ErrorKind::Logic);
}

#[test]
fn save_leaves_no_temporary_file_behind() {
    let grid = Grid::new(2, 2, 2).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.egrid");
    grid.save_egrid(&path).unwrap();
    assert!(path.exists());
    assert!(!dir.path().join("clean.egrid.tmp").exists());
}

#[test]
fn loading_a_missing_file_is_invalid_argument() {
    let dir = tempfile::tempdir().unwrap();
    let err = Grid::load_egrid(dir.path().join("missing.egrid")).unwrap_err();
    assert!(matches!(err, GridError::Io(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn a_foreign_file_fails_the_header_check() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foreign.egrid");
    std::fs::write(&path, b"this is not a grid file").unwrap();
    let err = Grid::load_egrid(&path).unwrap_err();
    assert!(matches!(err, GridError::BadHeader));
}

#[test]
fn truncated_files_fail_to_load() {
    let grid = Grid::new(3, 3, 3).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trunc.egrid");
    grid.save_egrid(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    assert!(Grid::load_egrid(&path).is_err());
}

#[test]
fn trailing_bytes_fail_to_load() {
    let grid = Grid::new(3, 3, 3).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extra.egrid");
    grid.save_egrid(&path).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes.push(0);
    std::fs::write(&path, &bytes).unwrap();
    let err = Grid::load_egrid(&path).unwrap_err();
    assert!(matches!(err, GridError::BadLength));
}
