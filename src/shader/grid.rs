//! Grid functions.

/// Integer cell coordinates of a pixel.
#[inline]
pub fn grid_cell(x: u32, y: u32, cell_size: u32) -> (u32, u32) {
    let size = cell_size.max(1);
    (x / size, y / size)
}

/// Checkerboard parity for cell coordinates.
///
/// Returns true for "even" cells (where x+y is even).
#[inline]
pub fn checkerboard(cell_x: u32, cell_y: u32) -> bool {
    (cell_x + cell_y) % 2 == 0
}

/// Checkerboard parity for a pixel.
#[inline]
pub fn checkerboard_xy(x: u32, y: u32, cell_size: u32) -> bool {
    let (cx, cy) = grid_cell(x, y, cell_size);
    checkerboard(cx, cy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard() {
        assert!(checkerboard(0, 0));
        assert!(!checkerboard(1, 0));
        assert!(checkerboard(1, 1));
    }

    #[test]
    fn test_checkerboard_xy() {
        assert!(checkerboard_xy(3, 3, 8));
        assert!(!checkerboard_xy(9, 3, 8));
        // Zero cell size treated as 1
        assert!(!checkerboard_xy(1, 0, 0));
    }
}
