//! Region clusterer
//!
//! Groups changed cells into 8-connected clusters. Cells are visited in
//! row-major order; each unvisited changed cell seeds a breadth-first
//! traversal over its eight neighbours. Region ids are assigned in the
//! order clusters are discovered.
//!
//! Connectivity is on the cell grid, not the pixel grid: two single-pixel
//! edits whose cells touch diagonally end up in the same region.

use crate::grid::CellGrid;
use pagediff_core::{BoundingBox, Region};
use std::collections::VecDeque;

/// Neighbour offsets, orthogonal first then diagonal
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Inclusive cell-space bounds of one connected cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCluster {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
    /// Number of changed cells in the cluster
    pub cell_count: usize,
}

impl CellCluster {
    fn seed(row: u32, col: u32) -> Self {
        Self {
            min_row: row,
            max_row: row,
            min_col: col,
            max_col: col,
            cell_count: 0,
        }
    }

    fn include(&mut self, row: u32, col: u32) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
        self.cell_count += 1;
    }

    /// Normalized bounding box for a `width` x `height` page
    pub fn bounding_box(&self, cell_size: u32, width: u32, height: u32) -> BoundingBox {
        BoundingBox::from_cell_bounds(
            self.min_row,
            self.max_row,
            self.min_col,
            self.max_col,
            cell_size,
            width,
            height,
        )
    }
}

/// Find the 8-connected clusters of changed cells, in discovery order.
pub fn cluster_cells(grid: &CellGrid) -> Vec<CellCluster> {
    let rows = grid.rows();
    let cols = grid.cols();
    let flags = grid.flags();
    let mut visited = vec![false; flags.len()];
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for row in 0..rows {
        for col in 0..cols {
            let idx = grid.index(row, col);
            if !flags[idx] || visited[idx] {
                continue;
            }

            let mut cluster = CellCluster::seed(row, col);
            visited[idx] = true;
            queue.push_back((row, col));

            while let Some((r, c)) = queue.pop_front() {
                cluster.include(r, c);

                for (dr, dc) in NEIGHBOURS {
                    let nr = r as i64 + dr;
                    let nc = c as i64 + dc;
                    if nr < 0 || nc < 0 || nr >= rows as i64 || nc >= cols as i64 {
                        continue;
                    }
                    let (nr, nc) = (nr as u32, nc as u32);
                    let nidx = grid.index(nr, nc);
                    if flags[nidx] && !visited[nidx] {
                        visited[nidx] = true;
                        queue.push_back((nr, nc));
                    }
                }
            }

            clusters.push(cluster);
        }
    }

    clusters
}

/// Cluster changed cells into regions with sequential ids `"1"`, `"2"`, ...
///
/// `width` and `height` are the page size the grid was built from.
pub fn cluster(grid: &CellGrid, width: u32, height: u32) -> Vec<Region> {
    cluster_cells(grid)
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Region::new(
                (i + 1).to_string(),
                c.bounding_box(grid.cell_size(), width, height),
            )
        })
        .collect()
}
