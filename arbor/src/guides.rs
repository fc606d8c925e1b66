//! Indentation guide geometry.
//!
//! Guides are computed per row in row-local coordinates: `x` grows with the
//! indentation, `y` runs from the top of the row (0) to `row_height`. The
//! column of level `l` sits at `(l - 0.5) * indent`, i.e. centered in the
//! indentation slot that precedes a level-`l` row's content.

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

use crate::node::FlatTree;

/// Which lines to draw in the indentation area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentGuide {
    /// No lines.
    Blank,
    /// A full-height line at every level, whether or not anything below
    /// connects to it.
    Scoping,
    /// Tree connectors: ancestor lines that still lead somewhere, plus a
    /// stub into each row.
    Connecting {
        /// Round the corner of a last child's connector.
        rounded: bool,
        /// Only draw the horizontal stub for last children.
        last_child_only: bool,
    },
}

impl Default for IndentGuide {
    fn default() -> Self {
        IndentGuide::Connecting {
            rounded: false,
            last_child_only: false,
        }
    }
}

/// Row geometry used to place guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideMetrics {
    /// Width of one indentation level.
    pub indent: f64,
    /// Height of one row.
    pub row_height: f64,
    /// Radius of rounded connector corners.
    pub corner_radius: f64,
}

impl Default for GuideMetrics {
    fn default() -> Self {
        Self {
            indent: 16.0,
            row_height: 24.0,
            corner_radius: 6.0,
        }
    }
}

impl GuideMetrics {
    fn column(&self, level: usize) -> f64 {
        (level as f64 - 0.5) * self.indent
    }
}

impl IndentGuide {
    /// Guide path for the row at `index`. Empty for roots and unknown rows.
    pub fn path<T>(&self, tree: &FlatTree<T>, index: usize, metrics: &GuideMetrics) -> BezPath {
        let mut path = BezPath::new();
        let (Some(node), Some(skips)) = (tree.get(index), tree.skip_levels(index)) else {
            return path;
        };
        if node.level == 0 {
            return path;
        }

        match *self {
            IndentGuide::Blank => {}
            IndentGuide::Scoping => {
                for level in 1..=node.level {
                    vertical(&mut path, metrics.column(level), 0.0, metrics.row_height);
                }
            }
            IndentGuide::Connecting {
                rounded,
                last_child_only,
            } => {
                for (level, skip) in skips.iter().enumerate().skip(1) {
                    if !skip {
                        vertical(&mut path, metrics.column(level), 0.0, metrics.row_height);
                    }
                }
                connector(
                    &mut path,
                    node.level,
                    node.has_next_sibling,
                    rounded,
                    last_child_only,
                    metrics,
                );
            }
        }
        path
    }
}

fn vertical(path: &mut BezPath, x: f64, top: f64, bottom: f64) {
    path.move_to(Point::new(x, top));
    path.line_to(Point::new(x, bottom));
}

fn connector(
    path: &mut BezPath,
    level: usize,
    has_next_sibling: bool,
    rounded: bool,
    last_child_only: bool,
    metrics: &GuideMetrics,
) {
    let x = metrics.column(level);
    let middle = metrics.row_height / 2.0;
    let end = level as f64 * metrics.indent;

    if has_next_sibling {
        vertical(path, x, 0.0, metrics.row_height);
        if !last_child_only {
            path.move_to(Point::new(x, middle));
            path.line_to(Point::new(end, middle));
        }
        return;
    }

    let radius = metrics
        .corner_radius
        .min(middle)
        .min(end - x)
        .max(0.0);
    path.move_to(Point::new(x, 0.0));
    if rounded && radius > 0.0 {
        path.line_to(Point::new(x, middle - radius));
        path.quad_to(Point::new(x, middle), Point::new(x + radius, middle));
    } else {
        path.line_to(Point::new(x, middle));
    }
    path.line_to(Point::new(end, middle));
}
