/// Default lattice size of the desktop demo.
pub const DEFAULT_SIZE: usize = 120;

/// Which quantity a field holds, and so which walls flip its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Dye or pressure: mirrored on every wall.
    Scalar,
    /// Horizontal velocity: negated on the left and right walls.
    VelocityX,
    /// Vertical velocity: negated on the top and bottom walls.
    VelocityY,
}

/// Row-major offset of cell `(x, y)` on a `size`×`size` lattice.
///
/// Coordinates saturate to the nearest edge cell, so every caller can index
/// without bounds checks of its own.
#[inline]
pub fn index(size: usize, x: i32, y: i32) -> usize {
    let max = size as i32 - 1;
    let x = x.max(0).min(max);
    let y = y.max(0).min(max);
    (x + y * size as i32) as usize
}
