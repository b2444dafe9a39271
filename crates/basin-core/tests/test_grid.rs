use basin_core::extract::{extract_dams, extract_labels};
use basin_core::grid::{CellState, FloodGrid};
use basin_core::queue::{Candidate, FloodQueue};
use basin_core::BasinError;
use ndarray::{array, Array3};

fn volume() -> Array3<f32> {
    Array3::from_shape_fn((1, 2, 3), |(_, r, c)| (r * 3 + c) as f32)
}

// ---------------------------------------------------------------------------
// CellState
// ---------------------------------------------------------------------------

#[test]
fn test_cell_state_labels() {
    assert_eq!(CellState::default(), CellState::Unvisited);
    assert_eq!(CellState::Unvisited.label(), 0);
    assert_eq!(CellState::Queued.label(), 0);
    assert_eq!(CellState::Watershed.label(), 0);
    assert_eq!(CellState::Labeled(7).label(), 7);
}

// ---------------------------------------------------------------------------
// FloodGrid access
// ---------------------------------------------------------------------------

#[test]
fn test_grid_reads_values_and_mask() {
    let intensity = volume();
    let mask = array![[[true, false, true], [true, true, false]]];
    let grid = FloodGrid::new(
        intensity.view(),
        Some(mask.view()),
        Array3::from_elem((1, 2, 3), CellState::Unvisited),
    )
    .unwrap();

    assert_eq!(grid.shape(), [1, 2, 3]);
    assert_eq!(grid.value_at([0, 1, 2]).unwrap(), 5.0);
    assert!(!grid.in_mask([0, 0, 1]).unwrap());
    assert!(grid.in_mask([0, 1, 1]).unwrap());
    assert_eq!(grid.label_at([0, 0, 0]).unwrap(), 0);
}

#[test]
fn test_grid_out_of_bounds() {
    let intensity = volume();
    let grid = FloodGrid::new(intensity.view(), None, Array3::default((1, 2, 3))).unwrap();
    for coord in [[1, 0, 0], [0, 2, 0], [0, 0, 3]] {
        assert!(matches!(
            grid.value_at(coord),
            Err(BasinError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.state_at(coord),
            Err(BasinError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.in_mask(coord),
            Err(BasinError::OutOfBounds { .. })
        ));
    }
}

#[test]
fn test_grid_rejects_mismatched_state_grid() {
    let intensity = volume();
    let result = FloodGrid::new(intensity.view(), None, Array3::default((1, 3, 2)));
    assert!(matches!(
        result,
        Err(BasinError::DimensionMismatch {
            what: "state grid",
            ..
        })
    ));
}

// ---------------------------------------------------------------------------
// State transitions
// ---------------------------------------------------------------------------

#[test]
fn test_legal_transitions() {
    let intensity = volume();
    let mut grid = FloodGrid::new(intensity.view(), None, Array3::default((1, 2, 3))).unwrap();

    grid.mark_queued([0, 0, 0]).unwrap();
    grid.set_label([0, 0, 0], 4).unwrap();
    grid.mark_queued([0, 0, 1]).unwrap();
    grid.set_watershed([0, 0, 1]).unwrap();
    // Marker cells go straight from Unvisited to Labeled.
    grid.set_label([0, 0, 2], 9).unwrap();

    assert_eq!(grid.state_at([0, 0, 0]).unwrap(), CellState::Labeled(4));
    assert_eq!(grid.state_at([0, 0, 1]).unwrap(), CellState::Watershed);
    assert_eq!(grid.label_at([0, 0, 2]).unwrap(), 9);
}

#[test]
fn test_illegal_transitions() {
    let intensity = volume();
    let mut grid = FloodGrid::new(intensity.view(), None, Array3::default((1, 2, 3))).unwrap();

    grid.mark_queued([0, 1, 0]).unwrap();
    assert!(matches!(
        grid.mark_queued([0, 1, 0]),
        Err(BasinError::InvariantViolation(_))
    ));

    grid.set_label([0, 1, 0], 1).unwrap();
    assert!(matches!(
        grid.set_label([0, 1, 0], 2),
        Err(BasinError::InvariantViolation(_))
    ));
    assert!(matches!(
        grid.set_watershed([0, 1, 0]),
        Err(BasinError::InvariantViolation(_))
    ));

    // Dams are only decided for queued cells.
    assert!(matches!(
        grid.set_watershed([0, 1, 1]),
        Err(BasinError::InvariantViolation(_))
    ));
}

#[test]
fn test_label_zero_is_rejected() {
    let intensity = volume();
    let mut grid = FloodGrid::new(intensity.view(), None, Array3::default((1, 2, 3))).unwrap();
    assert!(matches!(
        grid.set_label([0, 0, 0], 0),
        Err(BasinError::InvariantViolation(_))
    ));
    assert_eq!(grid.state_at([0, 0, 0]).unwrap(), CellState::Unvisited);
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[test]
fn test_extract_labels_and_dams() {
    let states = array![[
        [CellState::Labeled(2), CellState::Watershed],
        [CellState::Unvisited, CellState::Labeled(5)]
    ]];
    assert_eq!(extract_labels(&states), array![[[2, 0], [0, 5]]]);
    assert_eq!(extract_dams(&states), array![[[false, true], [false, false]]]);
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

#[test]
fn test_queue_keeps_candidate_provenance() {
    let mut queue = FloodQueue::with_capacity(4);
    assert!(queue.is_empty());

    queue.push(Candidate::new([0, 0, 1], 0.7, 0.7, 0.0, 1, [0, 0, 0]));
    queue.push(Candidate::new([0, 0, 2], 0.9, 0.2, 0.5, 2, [0, 0, 3]));
    assert_eq!(queue.pushed(), 2);

    let first = queue.pop_min().unwrap();
    assert_eq!(first.coord, [0, 0, 1]);
    let second = queue.pop_min().unwrap();
    assert_eq!(second.coord, [0, 0, 2]);
    assert_eq!(second.raw, 0.2);
    assert_eq!(second.increment, 0.5);
    assert_eq!(second.label, 2);
    assert_eq!(second.origin, [0, 0, 3]);
    assert!(queue.is_empty());
}

#[test]
fn test_queue_orders_nan_last() {
    let mut queue = FloodQueue::new();
    queue.push(Candidate::new([0, 0, 0], f64::NAN, f64::NAN, 0.0, 1, [0, 0, 0]));
    queue.push(Candidate::new([0, 0, 1], 1.0e9, 1.0e9, 0.0, 1, [0, 0, 0]));
    assert_eq!(queue.pop_min().map(|c| c.coord), Some([0, 0, 1]));
}
