use super::region::Region;
use crate::geometry::{BoundingBox, Point};

const DEFAULT_GRID_COLS: usize = 32;
const DEFAULT_GRID_ROWS: usize = 32;

/// Uniform grid over region bounding boxes for narrowing click candidates.
///
/// Built once from the store's regions; entries are store positions, so
/// candidates come back in store order.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cells: Vec<Vec<usize>>,
    boxes: Vec<BoundingBox>,
    bounds: Option<BoundingBox>,
    cols: usize,
    rows: usize,
    cell_w: f64,
    cell_h: f64,
}

impl SpatialIndex {
    pub fn build(regions: &[Region]) -> Self {
        Self::with_grid(regions, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS)
    }

    pub fn with_grid(regions: &[Region], cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let boxes: Vec<BoundingBox> = regions.iter().map(Region::bounding_box).collect();
        let bounds = boxes.iter().copied().reduce(|acc, b| acc.union(&b));

        let Some(world) = bounds else {
            return Self {
                cells: Vec::new(),
                boxes,
                bounds: None,
                cols,
                rows,
                cell_w: 1.0,
                cell_h: 1.0,
            };
        };

        // Zero extent (a map that is a single line) still needs a usable divisor
        let cell_w = match world.width() / cols as f64 {
            w if w > 0.0 => w,
            _ => 1.0,
        };
        let cell_h = match world.height() / rows as f64 {
            h if h > 0.0 => h,
            _ => 1.0,
        };

        let mut index = Self {
            cells: vec![Vec::new(); cols * rows],
            boxes: Vec::new(),
            bounds,
            cols,
            rows,
            cell_w,
            cell_h,
        };

        for (idx, bbox) in boxes.iter().enumerate() {
            let (col_start, col_end) = (index.col(bbox.min_x), index.col(bbox.max_x));
            let (row_start, row_end) = (index.row(bbox.min_y), index.row(bbox.max_y));
            for row in row_start..=row_end {
                for col in col_start..=col_end {
                    index.cells[row * cols + col].push(idx);
                }
            }
        }
        index.boxes = boxes;
        index
    }

    /// Store positions of regions whose bounding box contains `p`, ascending.
    ///
    /// Empty means no region can contain the point. A non-empty result still
    /// needs an exact geometric test.
    pub fn candidates(&self, p: Point) -> Vec<usize> {
        let Some(world) = self.bounds else {
            return Vec::new();
        };
        if !world.contains(p) {
            return Vec::new();
        }
        let cell = &self.cells[self.row(p.y) * self.cols + self.col(p.x)];
        cell.iter()
            .copied()
            .filter(|&idx| self.boxes[idx].contains(p))
            .collect()
    }

    /// Extent of every indexed region.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    // Both insertion and lookup go through these, so a coordinate on a box
    // edge always lands in a cell that box was inserted into.
    fn col(&self, x: f64) -> usize {
        let min_x = self.bounds.map_or(0.0, |b| b.min_x);
        (((x - min_x) / self.cell_w).floor().max(0.0) as usize).min(self.cols - 1)
    }

    fn row(&self, y: f64) -> usize {
        let min_y = self.bounds.map_or(0.0, |b| b.min_y);
        (((y - min_y) / self.cell_h).floor().max(0.0) as usize).min(self.rows - 1)
    }
}
