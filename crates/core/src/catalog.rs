//! Catalog module - lighting-fixture block definitions
//!
//! Every [`BlockKind`] resolves to exactly one [`BlockSpec`]: a shape matrix,
//! a display color and an artwork size class. The catalog is a process-wide
//! static table; lookups are total and never fail.
//!
//! Shapes are stored as bit matrices with a fixed row stride of 8, which caps
//! the bounding box at 8x8 cells (see [`MAX_SHAPE_SIDE`]).

use crate::types::{AspectRatio, BlockKind, Rgb, MAX_BLOCK_CELLS, MAX_SHAPE_SIDE};

const STRIDE: usize = MAX_SHAPE_SIDE as usize;

/// Immutable rectangular boolean matrix describing a block's filled cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Row-major bits, `r * STRIDE + c`
    bits: u64,
}

impl Shape {
    /// Build a shape from a literal 0/1 matrix
    ///
    /// Panics (at compile time when used in a const) if the matrix is empty
    /// or larger than 8x8.
    pub const fn from_rows<const R: usize, const C: usize>(matrix: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0, "shape must not be empty");
        assert!(R <= STRIDE && C <= STRIDE, "shape exceeds 8x8");

        let mut bits = 0u64;
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                if matrix[r][c] != 0 {
                    bits |= 1u64 << (r * STRIDE + c);
                }
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: R as u8,
            cols: C as u8,
            bits,
        }
    }

    /// Number of rows in the bounding box
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns in the bounding box
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Check if the cell at (row, col) is filled; out-of-box cells are empty
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows
            && col < self.cols
            && (self.bits >> (row as usize * STRIDE + col as usize)) & 1 == 1
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Filled cells as `(dx, dy)` offsets from the top-left corner, row-major
    pub fn cells(self) -> impl Iterator<Item = (i8, i8)> {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.is_filled(r, c))
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° clockwise (transpose, then reverse each row)
    pub fn rotate_cw(&self) -> Self {
        let rows = self.cols;
        let cols = self.rows;
        let mut bits = 0u64;
        for r in 0..rows {
            for c in 0..cols {
                // New row r is old column r read bottom-to-top.
                if self.is_filled(self.rows - 1 - c, r) {
                    bits |= 1u64 << (r as usize * STRIDE + c as usize);
                }
            }
        }
        Self { rows, cols, bits }
    }

    /// Apply `times` clockwise quarter turns (taken modulo 4)
    pub fn rotated(&self, times: u8) -> Self {
        let mut shape = *self;
        for _ in 0..(times % 4) {
            shape = shape.rotate_cw();
        }
        shape
    }
}

/// Static definition of a block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub kind: BlockKind,
    pub shape: Shape,
    pub color: Rgb,
    pub aspect: AspectRatio,
}

static CATALOG: [BlockSpec; 4] = [
    BlockSpec {
        kind: BlockKind::BaseLed,
        shape: Shape::from_rows([[1, 1], [1, 1]]),
        color: Rgb::new(0xFF, 0x6B, 0x6B),
        aspect: AspectRatio::OneToOne,
    },
    BlockSpec {
        kind: BlockKind::Downlight,
        shape: Shape::from_rows([[1], [1]]),
        color: Rgb::new(0x4E, 0xCD, 0xC4),
        aspect: AspectRatio::OneToTwo,
    },
    BlockSpec {
        kind: BlockKind::SquareLight,
        shape: Shape::from_rows([[1]]),
        color: Rgb::new(0x45, 0xB7, 0xD1),
        aspect: AspectRatio::OneToOne,
    },
    BlockSpec {
        kind: BlockKind::FactoryLight,
        shape: Shape::from_rows([[1], [1], [1], [1], [1], [1], [1], [1]]),
        color: Rgb::new(0x96, 0xCE, 0xB4),
        aspect: AspectRatio::OneToEight,
    },
];

/// Look up the definition of a block kind
pub fn lookup(kind: BlockKind) -> &'static BlockSpec {
    let spec = match kind {
        BlockKind::BaseLed => &CATALOG[0],
        BlockKind::Downlight => &CATALOG[1],
        BlockKind::SquareLight => &CATALOG[2],
        BlockKind::FactoryLight => &CATALOG[3],
    };
    assert_eq!(spec.kind, kind, "catalog table out of order");
    spec
}

/// Shape of a kind after `rotation` clockwise quarter turns
pub fn get_shape(kind: BlockKind, rotation: u8) -> Shape {
    lookup(kind).shape.rotated(rotation)
}

/// The whole catalog, in [`BlockKind::ALL`] order
pub fn entries() -> &'static [BlockSpec] {
    debug_assert!(CATALOG
        .iter()
        .all(|spec| spec.shape.filled_count() <= MAX_BLOCK_CELLS));
    &CATALOG
}
