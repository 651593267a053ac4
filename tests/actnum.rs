//! Active-mask resolution with box scoping and layered overrides.

use eclgrid::{Deck, GridError, Item, Keyword, Record, ReservoirState};

fn ints(n: usize, v: i64) -> Vec<i64> {
    vec![v; n]
}

fn equals_record(name: &str, value: i64, ijk: [i64; 6]) -> Record {
    let mut items = vec![Item::Str(name.to_string()), Item::Int(value)];
    items.extend(ijk.into_iter().map(Item::Int));
    Record(items)
}

/// 10x10x10 deck that deactivates the top layer through EQUALS and two
/// overlapping 3x3x3 boxes through scoped ACTNUM data.
fn layered_actnum_deck() -> Deck {
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]))
        .push(Keyword::flag("GRID"))
        .push(Keyword::with_records(
            "EQUALS",
            vec![equals_record("ACTNUM", 0, [1, 10, 1, 10, 1, 1])],
        ))
        .push(Keyword::int_data("BOX", vec![5, 7, 5, 7, 5, 7]))
        .push(Keyword::int_data("ACTNUM", ints(27, 0)))
        .push(Keyword::int_data("BOX", vec![6, 8, 6, 8, 6, 8]))
        .push(Keyword::int_data("ACTNUM", ints(27, 0)))
        .push(Keyword::flag("ENDBOX"))
        .push(Keyword::int_data("FLUXNUM", ints(1000, 3)));
    deck
}

fn in_box(v: usize, lo: usize, hi: usize) -> bool {
    v >= lo && v <= hi
}

#[test]
fn overlapping_overrides_resolve_per_cell() {
    let state = ReservoirState::from_deck_strict(&layered_actnum_deck()).unwrap();
    let grid = state.input_grid();

    // 1000 - 100 (top layer) - 27 - 27 + 8 (overlap counted once).
    assert_eq!(grid.num_active(), 854);

    for k in 0..10 {
        for j in 0..10 {
            for i in 0..10 {
                let in_first = in_box(i, 4, 6) && in_box(j, 4, 6) && in_box(k, 4, 6);
                let in_second = in_box(i, 5, 7) && in_box(j, 5, 7) && in_box(k, 5, 7);
                let expect_active = k != 0 && !in_first && !in_second;
                assert_eq!(
                    grid.cell_active(i, j, k).unwrap(),
                    expect_active,
                    "cell ({i},{j},{k})"
                );
            }
        }
    }
}

#[test]
fn actnum_property_agrees_with_the_mask() {
    let state = ReservoirState::from_deck_strict(&layered_actnum_deck()).unwrap();
    let grid = state.input_grid();
    let prop = state.properties().get_int_grid_property("ACTNUM").unwrap();
    for g in 0..grid.cartesian_size() {
        let [i, j, k] = grid.ijk(g).unwrap();
        assert_eq!(prop.iget(g).unwrap() != 0, grid.cell_active(i, j, k).unwrap());
    }
}

#[test]
fn absent_actnum_means_all_active() {
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]));
    let state = ReservoirState::from_deck_strict(&deck).unwrap();
    assert_eq!(state.input_grid().num_active(), 1000);

    let mut exported = Vec::new();
    state.input_grid().export_actnum(&mut exported);
    assert!(exported.is_empty());
}

#[test]
fn full_grid_actnum_without_a_box() {
    let mut values = ints(1000, 1);
    values[0] = 0;
    values[999] = 0;
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]))
        .push(Keyword::int_data("ACTNUM", values));
    let state = ReservoirState::from_deck_strict(&deck).unwrap();
    let grid = state.input_grid();
    assert_eq!(grid.num_active(), 998);
    assert!(!grid.cell_active(0, 0, 0).unwrap());
    assert!(!grid.cell_active(9, 9, 9).unwrap());
    assert!(grid.cell_active(1, 0, 0).unwrap());
}

#[test]
fn scoped_actnum_with_the_wrong_count_is_rejected() {
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]))
        .push(Keyword::int_data("BOX", vec![5, 7, 5, 7, 5, 7]))
        .push(Keyword::int_data("ACTNUM", ints(26, 0)));
    let err = ReservoirState::from_deck_strict(&deck).unwrap_err();
    assert!(matches!(err, GridError::SizeMismatch { .. }));
}

#[test]
fn inverted_or_oversized_boxes_are_rejected() {
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]))
        .push(Keyword::int_data("BOX", vec![7, 5, 1, 1, 1, 1]))
        .push(Keyword::int_data("ACTNUM", ints(3, 0)));
    assert!(ReservoirState::from_deck_strict(&deck).is_err());

    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]))
        .push(Keyword::int_data("BOX", vec![1, 11, 1, 1, 1, 1]))
        .push(Keyword::int_data("ACTNUM", ints(11, 0)));
    assert!(ReservoirState::from_deck_strict(&deck).is_err());
}

#[test]
fn endbox_restores_full_grid_scope() {
    let mut values = ints(1000, 1);
    values[500] = 0;
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]))
        .push(Keyword::int_data("BOX", vec![1, 1, 1, 1, 1, 1]))
        .push(Keyword::flag("ENDBOX"))
        .push(Keyword::int_data("ACTNUM", values));
    let state = ReservoirState::from_deck_strict(&deck).unwrap();
    assert_eq!(state.input_grid().num_active(), 999);
}

#[test]
fn equals_without_an_explicit_box_uses_the_ambient_one() {
    let mut deck = Deck::new();
    deck.push(Keyword::int_data("DIMENS", vec![10, 10, 10]))
        .push(Keyword::int_data("BOX", vec![1, 2, 1, 2, 1, 2]))
        .push(Keyword::with_records(
            "EQUALS",
            vec![Record(vec![Item::Str("ACTNUM".to_string()), Item::Int(0)])],
        ))
        .push(Keyword::flag("ENDBOX"));
    let state = ReservoirState::from_deck_strict(&deck).unwrap();
    assert_eq!(state.input_grid().num_active(), 992);
    assert!(!state.input_grid().cell_active(0, 0, 0).unwrap());
    assert!(state.input_grid().cell_active(2, 0, 0).unwrap());
}
