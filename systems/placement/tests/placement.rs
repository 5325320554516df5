use room_planner_core::{
    CellCoord, CellRect, CellRectSize, FlankAxis, FlankSide, PlacementPreferences, WeightView,
};
use room_planner_system_placement::Placement;

fn uniform(columns: u32, rows: u32) -> Vec<f64> {
    vec![1.0; (columns * rows) as usize]
}

fn set(cells: &mut [f64], columns: u32, cell: CellCoord, weight: f64) {
    cells[(cell.row() * columns + cell.column()) as usize] = weight;
}

#[test]
fn free_keeps_first_anchor_on_uniform_grid() {
    let cells = uniform(6, 6);
    let placement = Placement::default();

    let region = placement.free(
        WeightView::new(&cells, 6, 6),
        &[],
        CellRectSize::new(2, 2),
        PlacementPreferences::none(),
    );

    assert_eq!(region, Some(CellRect::new(0, 0, 2, 2)));
}

#[test]
fn free_considers_last_row_and_column() {
    let mut cells = uniform(3, 3);
    set(&mut cells, 3, CellCoord::new(2, 2), 5.0);
    let placement = Placement::default();

    let region = placement.free(
        WeightView::new(&cells, 3, 3),
        &[],
        CellRectSize::new(1, 1),
        PlacementPreferences::none(),
    );

    assert_eq!(
        region,
        Some(CellRect::new(2, 2, 1, 1)),
        "the bottom-right anchor must be scanned",
    );
}

#[test]
fn free_accepts_item_filling_the_whole_grid() {
    let cells = uniform(4, 3);
    let placement = Placement::default();

    let region = placement.free(
        WeightView::new(&cells, 4, 3),
        &[],
        CellRectSize::new(4, 3),
        PlacementPreferences::none(),
    );

    assert_eq!(region, Some(CellRect::new(0, 0, 4, 3)));
}

#[test]
fn free_rejects_oversized_items() {
    let cells = uniform(4, 3);
    let placement = Placement::default();
    let weights = WeightView::new(&cells, 4, 3);

    for size in [CellRectSize::new(5, 1), CellRectSize::new(1, 4)] {
        assert_eq!(
            placement.free(weights, &[], size, PlacementPreferences::none().near_wall()),
            None,
            "{size:?} cannot fit a 4x3 grid",
        );
    }
}

#[test]
fn free_window_preference_pulls_towards_window() {
    let cells = uniform(5, 5);
    let placement = Placement::default();
    let windows = [CellRect::new(4, 4, 1, 1)];

    let region = placement.free(
        WeightView::new(&cells, 5, 5),
        &windows,
        CellRectSize::new(1, 1),
        PlacementPreferences::none().near_window(),
    );

    assert_eq!(region, Some(CellRect::new(4, 4, 1, 1)));
}

#[test]
fn free_wall_preference_beats_slightly_heavier_centre() {
    let mut cells = uniform(5, 5);
    set(&mut cells, 5, CellCoord::new(2, 2), 2.0);
    let placement = Placement::default();
    let weights = WeightView::new(&cells, 5, 5);

    let plain = placement.free(weights, &[], CellRectSize::new(1, 1), PlacementPreferences::none());
    assert_eq!(plain, Some(CellRect::new(2, 2, 1, 1)));

    let hugging = placement.free(
        weights,
        &[],
        CellRectSize::new(1, 1),
        PlacementPreferences::none().near_wall(),
    );
    assert_eq!(hugging, Some(CellRect::new(0, 0, 1, 1)));
}

#[test]
fn near_prefers_band_below_on_ties() {
    let cells = uniform(10, 10);
    let placement = Placement::default();
    let anchor = CellRect::new(4, 4, 2, 2);

    let region = placement.near(WeightView::new(&cells, 10, 10), anchor, CellRectSize::new(1, 1));

    assert_eq!(region, Some(CellRect::new(4, 6, 1, 1)));
}

#[test]
fn near_picks_heaviest_band() {
    let mut cells = uniform(10, 10);
    set(&mut cells, 10, CellCoord::new(6, 5), 3.0);
    let placement = Placement::default();
    let anchor = CellRect::new(4, 4, 2, 2);

    let region = placement
        .near(WeightView::new(&cells, 10, 10), anchor, CellRectSize::new(1, 1))
        .expect("a band position exists");

    assert_eq!(region, CellRect::new(6, 5, 1, 1));
    let close_columns =
        anchor.column().abs_diff(region.column()) <= anchor.width() + region.width();
    let close_rows = anchor.row().abs_diff(region.row()) <= anchor.height() + region.height();
    assert!(close_columns || close_rows);
}

#[test]
fn near_requires_item_to_fit_anchor_span() {
    let cells = uniform(10, 10);
    let placement = Placement::default();

    let region = placement.near(
        WeightView::new(&cells, 10, 10),
        CellRect::new(4, 4, 1, 1),
        CellRectSize::new(2, 2),
    );

    assert_eq!(region, None);
}

#[test]
fn near_skips_bands_outside_the_grid() {
    let cells = uniform(4, 4);
    let placement = Placement::default();
    let weights = WeightView::new(&cells, 4, 4);

    let region = placement.near(weights, CellRect::new(0, 3, 4, 1), CellRectSize::new(1, 1));
    assert_eq!(region, Some(CellRect::new(0, 2, 1, 1)), "only the band above remains");

    let region = placement.near(weights, CellRect::new(0, 0, 4, 4), CellRectSize::new(1, 1));
    assert_eq!(region, None);
}

#[test]
fn flank_places_pair_on_opposite_rows() {
    let cells = uniform(10, 10);
    let placement = Placement::default();
    let weights = WeightView::new(&cells, 10, 10);
    let target = CellRect::new(2, 4, 4, 2);
    let size = CellRectSize::new(1, 1);

    let first = placement
        .flank(weights, target, size, FlankAxis::Vertical, FlankSide::First)
        .expect("room above the target");
    let second = placement
        .flank(weights, target, size, FlankAxis::Vertical, FlankSide::Second)
        .expect("room below the target");

    assert_eq!(first, CellRect::new(2, 3, 1, 1));
    assert_eq!(second, CellRect::new(2, 6, 1, 1));
    assert!(first.bottom() <= u64::from(target.row()));
    assert!(u64::from(second.row()) >= target.bottom());
}

#[test]
fn flank_rewards_wall_proximity() {
    let cells = uniform(10, 10);
    let placement = Placement::default();
    let target = CellRect::new(5, 4, 5, 2);

    let first = placement.flank(
        WeightView::new(&cells, 10, 10),
        target,
        CellRectSize::new(1, 1),
        FlankAxis::Vertical,
        FlankSide::First,
    );

    assert_eq!(first, Some(CellRect::new(9, 3, 1, 1)));
}

#[test]
fn flank_side_off_grid_fails_alone() {
    let cells = uniform(10, 10);
    let placement = Placement::default();
    let weights = WeightView::new(&cells, 10, 10);
    let target = CellRect::new(3, 0, 3, 2);
    let size = CellRectSize::new(2, 1);

    assert_eq!(
        placement.flank(weights, target, size, FlankAxis::Vertical, FlankSide::First),
        None
    );
    assert!(placement
        .flank(weights, target, size, FlankAxis::Vertical, FlankSide::Second)
        .is_some());
}

#[test]
fn flank_horizontal_places_pair_on_opposite_columns() {
    let cells = uniform(10, 10);
    let placement = Placement::default();
    let weights = WeightView::new(&cells, 10, 10);
    let target = CellRect::new(4, 2, 2, 4);
    let size = CellRectSize::new(1, 1);

    let first = placement
        .flank(weights, target, size, FlankAxis::Horizontal, FlankSide::First)
        .expect("room left of the target");
    let second = placement
        .flank(weights, target, size, FlankAxis::Horizontal, FlankSide::Second)
        .expect("room right of the target");

    assert_eq!(first.column(), 3);
    assert_eq!(second.column(), 6);
    assert!(first.row() >= target.row() && u64::from(first.row()) < target.bottom());
}

#[test]
fn wardrobe_hugs_wall_in_empty_room() {
    let cells = uniform(6, 6);
    let placement = Placement::default();

    let region = placement.wardrobe(WeightView::new(&cells, 6, 6), &[], CellRectSize::new(2, 1));

    assert_eq!(region, Some(CellRect::new(0, 0, 2, 1)));
}

#[test]
fn wardrobe_keeps_door_clearance_free_of_furniture() {
    let cells = uniform(10, 4);
    let placement = Placement::default();
    let furniture = [CellRect::new(0, 0, 2, 4)];

    let region = placement
        .wardrobe(WeightView::new(&cells, 10, 4), &furniture, CellRectSize::new(2, 1))
        .expect("space remains on the right");

    assert!(region.column() >= 3, "clearance overlaps furniture at {region:?}");
    assert!(!region.intersects(&furniture[0]));
}

#[test]
fn wardrobe_moves_away_from_furniture() {
    let cells = uniform(12, 3);
    let placement = Placement::default();
    let furniture = [CellRect::new(0, 0, 1, 1)];

    let region = placement.wardrobe(
        WeightView::new(&cells, 12, 3),
        &furniture,
        CellRectSize::new(2, 1),
    );

    assert_eq!(region, Some(CellRect::new(10, 2, 2, 1)));
}

#[test]
fn wardrobe_fails_when_every_clearance_is_blocked() {
    let cells = uniform(4, 4);
    let placement = Placement::default();
    let furniture = [CellRect::new(1, 1, 2, 2)];

    let region = placement.wardrobe(
        WeightView::new(&cells, 4, 4),
        &furniture,
        CellRectSize::new(4, 1),
    );

    assert_eq!(region, None);
}
