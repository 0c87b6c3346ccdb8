use std::{cmp::Ordering, collections::BTreeMap};

use crate::{
    LayoutConfig,
    model::{NodeId, Position},
};

/// Saved node positions of one workflow, keyed by node id.
pub type PositionMap = BTreeMap<NodeId, Position>;

/// Grid slot for the node at `index`, filled row by row.
pub fn grid_position(
    index: usize,
    layout: &LayoutConfig,
) -> Position {
    let columns = layout.columns.max(1);
    let column = index % columns;
    let row = index / columns;

    Position::new(layout.origin_x + column as f64 * layout.column_spacing, layout.origin_y + row as f64 * layout.row_spacing)
}

/// Reading order of two positions: top to bottom, then left to right.
pub fn layout_order(
    a: &Position,
    b: &Position,
) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

/// Slot of the start anchor, one row above the first grid row.
pub fn anchor_position(layout: &LayoutConfig) -> Position {
    Position::new(layout.origin_x, layout.origin_y - layout.row_spacing)
}

/// Saved position for `id` if there is one, otherwise `fallback`.
pub fn resolve_position(
    id: &str,
    saved: Option<&PositionMap>,
    fallback: Position,
) -> Position {
    saved.and_then(|positions| positions.get(id)).copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{PositionMap, grid_position, layout_order, resolve_position};
    use crate::{LayoutConfig, model::Position};

    #[test]
    fn test_grid_fills_rows() {
        let layout = LayoutConfig::default();

        assert_eq!(grid_position(0, &layout), Position::new(100.0, 100.0));
        assert_eq!(grid_position(2, &layout), Position::new(700.0, 100.0));
        assert_eq!(grid_position(3, &layout), Position::new(100.0, 250.0));
        assert_eq!(grid_position(7, &layout), Position::new(400.0, 400.0));
    }

    #[test]
    fn test_grid_zero_columns_is_single_column() {
        let layout = LayoutConfig {
            columns: 0,
            ..Default::default()
        };
        assert_eq!(grid_position(2, &layout), Position::new(100.0, 400.0));
    }

    #[test]
    fn test_layout_order() {
        assert_eq!(layout_order(&Position::new(500.0, 10.0), &Position::new(0.0, 20.0)), Ordering::Less);
        assert_eq!(layout_order(&Position::new(0.0, 20.0), &Position::new(10.0, 20.0)), Ordering::Less);
        assert_eq!(layout_order(&Position::new(3.0, 3.0), &Position::new(3.0, 3.0)), Ordering::Equal);
    }

    #[test]
    fn test_resolve_prefers_saved() {
        let mut saved = PositionMap::new();
        saved.insert("a".to_string(), Position::new(5.0, 6.0));

        assert_eq!(resolve_position("a", Some(&saved), Position::default()), Position::new(5.0, 6.0));
        assert_eq!(resolve_position("b", Some(&saved), Position::new(1.0, 1.0)), Position::new(1.0, 1.0));
        assert_eq!(resolve_position("a", None, Position::new(1.0, 1.0)), Position::new(1.0, 1.0));
    }
}
