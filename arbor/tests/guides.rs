mod common;

use arbor::{GuideMetrics, IndentGuide, TreeController, TreeError};
use kurbo::{PathEl, Point};

use common::Model;

/// root -> [A -> [B -> [C], D]], fully expanded.
///
/// A is the last child of root, B has a next sibling (D).
fn nested() -> TreeController<Model> {
    let model = Model::new()
        .root("root")
        .child("root", "A")
        .child("A", "B")
        .child("A", "D")
        .child("B", "C")
        .expanded(&["root", "A", "B"]);
    TreeController::new(model)
}

fn metrics() -> GuideMetrics {
    GuideMetrics {
        indent: 16.0,
        row_height: 24.0,
        corner_radius: 6.0,
    }
}

// =============================================================================
// Skip levels
// =============================================================================

#[test]
fn test_skip_levels_follow_ancestor_siblings() {
    let tree = nested();
    let c = tree.index_of("C").unwrap();
    assert_eq!(c, 3);

    let skips = tree.skip_levels(c).unwrap();
    assert_eq!(skips.len(), 3);
    assert_eq!(&skips[1..], &[true, false]);
}

#[test]
fn test_skip_levels_empty_for_roots() {
    let tree = nested();
    assert!(tree.skip_levels(0).unwrap().is_empty());
    assert_eq!(
        tree.skip_levels(10).unwrap_err(),
        TreeError::IndexOutOfRange { index: 10, len: 5 }
    );
}

#[test]
fn test_skip_levels_cached_value_is_stable() {
    let tree = nested();
    let first = tree.skip_levels(4).unwrap().to_vec();
    let second = tree.skip_levels(4).unwrap().to_vec();
    assert_eq!(first, second);
    // D is a child of A, which is a last child.
    assert_eq!(first, vec![true, true]);
}

// =============================================================================
// Paths
// =============================================================================

#[test]
fn test_blank_guide_draws_nothing() {
    let tree = nested();
    let path = tree.guide_path(3, IndentGuide::Blank, &metrics()).unwrap();
    assert!(path.elements().is_empty());
}

#[test]
fn test_root_rows_have_no_guides() {
    let tree = nested();
    let path = tree.guide_path(0, IndentGuide::Scoping, &metrics()).unwrap();
    assert!(path.elements().is_empty());
}

#[test]
fn test_scoping_guide_draws_every_level() {
    let tree = nested();
    let path = tree.guide_path(3, IndentGuide::Scoping, &metrics()).unwrap();
    assert_eq!(
        path.elements(),
        &[
            PathEl::MoveTo(Point::new(8.0, 0.0)),
            PathEl::LineTo(Point::new(8.0, 24.0)),
            PathEl::MoveTo(Point::new(24.0, 0.0)),
            PathEl::LineTo(Point::new(24.0, 24.0)),
            PathEl::MoveTo(Point::new(40.0, 0.0)),
            PathEl::LineTo(Point::new(40.0, 24.0)),
        ]
    );
}

#[test]
fn test_connecting_guide_skips_finished_ancestors() {
    let tree = nested();
    let path = tree
        .guide_path(3, IndentGuide::default(), &metrics())
        .unwrap();
    assert_eq!(
        path.elements(),
        &[
            // Level 2 (B) still has a sibling below.
            PathEl::MoveTo(Point::new(24.0, 0.0)),
            PathEl::LineTo(Point::new(24.0, 24.0)),
            // C is a last child: elbow into the row.
            PathEl::MoveTo(Point::new(40.0, 0.0)),
            PathEl::LineTo(Point::new(40.0, 12.0)),
            PathEl::LineTo(Point::new(48.0, 12.0)),
        ]
    );
}

#[test]
fn test_connecting_guide_rounds_last_child_corner() {
    let tree = nested();
    let guide = IndentGuide::Connecting {
        rounded: true,
        last_child_only: false,
    };
    let path = tree.guide_path(3, guide, &metrics()).unwrap();
    assert_eq!(
        &path.elements()[2..],
        &[
            PathEl::MoveTo(Point::new(40.0, 0.0)),
            PathEl::LineTo(Point::new(40.0, 6.0)),
            PathEl::QuadTo(Point::new(40.0, 12.0), Point::new(46.0, 12.0)),
            PathEl::LineTo(Point::new(48.0, 12.0)),
        ]
    );
}

#[test]
fn test_connecting_guide_for_middle_child() {
    let tree = nested();
    // B: level 2, has a next sibling.
    let path = tree
        .guide_path(2, IndentGuide::default(), &metrics())
        .unwrap();
    assert_eq!(
        path.elements(),
        &[
            PathEl::MoveTo(Point::new(24.0, 0.0)),
            PathEl::LineTo(Point::new(24.0, 24.0)),
            PathEl::MoveTo(Point::new(24.0, 12.0)),
            PathEl::LineTo(Point::new(32.0, 12.0)),
        ]
    );

    let guide = IndentGuide::Connecting {
        rounded: false,
        last_child_only: true,
    };
    let path = tree.guide_path(2, guide, &metrics()).unwrap();
    assert_eq!(path.elements().len(), 2);
}

#[test]
fn test_guide_path_out_of_range() {
    let tree = nested();
    assert!(tree.guide_path(9, IndentGuide::Blank, &metrics()).is_err());
}
