use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::TerrainError;

/// Grid of non-negative cell heights, row-major, `y_size` rows of `x_size`
/// cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    x_size: usize,
    y_size: usize,
    heights: Vec<f64>,
}

impl Heightmap {
    /// Parse comma-separated rows. Each token reads its leading number, so
    /// `2.5m` is 2.5 and `abc` is zero; negative heights are clamped to zero.
    /// A single trailing comma ends a row without adding a cell. The width
    /// is taken from the last row; shorter rows are padded with zeros and
    /// longer ones cut. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, TerrainError> {
        let rows: Vec<Vec<f64>> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let line = line.strip_suffix(',').unwrap_or(line);
                line.split(',').map(parse_height).collect()
            })
            .collect();

        let x_size = rows.last().map_or(0, Vec::len);
        let y_size = rows.len();
        if x_size == 0 || y_size == 0 {
            return Err(TerrainError::Empty);
        }

        let mut heights = Vec::with_capacity(x_size * y_size);
        for (j, row) in rows.iter().enumerate() {
            if row.len() != x_size {
                warn!(row = j, len = row.len(), width = x_size, "ragged heightmap row");
            }
            heights.extend((0..x_size).map(|i| row.get(i).copied().unwrap_or(0.0)));
        }
        debug!(x_size, y_size, "heightmap parsed");
        Ok(Self { x_size, y_size, heights })
    }

    pub fn read(path: &Path) -> Result<Self, TerrainError> {
        let text = fs::read_to_string(path).map_err(|source| TerrainError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn x_size(&self) -> usize {
        self.x_size
    }

    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Height of cell `(x, y)`; row `y`, column `x`.
    pub fn height(&self, x: usize, y: usize) -> f64 {
        self.heights[y * self.x_size + x]
    }
}

fn parse_height(token: &str) -> f64 {
    let h = leading_number(token);
    if h.is_finite() {
        h.max(0.0)
    } else {
        0.0
    }
}

/// The longest decimal number at the start of `token` (after leading
/// whitespace), or zero when there is none.
fn leading_number(token: &str) -> f64 {
    let s = token.trim_start();
    let bytes = s.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int = digits(end);
    end += int;
    let mut frac = 0;
    if bytes.get(end) == Some(&b'.') {
        frac = digits(end + 1);
        end += 1 + frac;
    }
    if int + frac == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut k = end + 1;
        if matches!(bytes.get(k), Some(b'+' | b'-')) {
            k += 1;
        }
        let exp = digits(k);
        if exp > 0 {
            end = k + exp;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_negative_and_garbage_tokens() {
        let map = Heightmap::parse("1,-2,abc\n0.5, 3 ,4\n").expect("parse");
        assert_eq!((map.x_size(), map.y_size()), (3, 2));
        assert_eq!(map.height(0, 0), 1.0);
        assert_eq!(map.height(1, 0), 0.0);
        assert_eq!(map.height(2, 0), 0.0);
        assert_eq!(map.height(1, 1), 3.0);
    }

    #[test]
    fn width_comes_from_the_last_row() {
        let map = Heightmap::parse("1,2,3,4\n5,6\n").expect("parse");
        assert_eq!((map.x_size(), map.y_size()), (2, 2));
        assert_eq!(map.height(1, 0), 2.0);

        let padded = Heightmap::parse("1\n2,3,4\n").expect("parse");
        assert_eq!(padded.x_size(), 3);
        assert_eq!(padded.height(2, 0), 0.0);
    }

    #[test]
    fn trailing_comma_does_not_add_a_column() {
        let map = Heightmap::parse("1,2,3,\n4,5,6,\n").expect("parse");
        assert_eq!((map.x_size(), map.y_size()), (3, 2));
        assert_eq!(map.height(2, 1), 6.0);

        // Only one trailing separator is dropped; an empty cell before it stays.
        let gap = Heightmap::parse("1,,\n").expect("parse");
        assert_eq!(gap.x_size(), 2);
        assert_eq!(gap.height(1, 0), 0.0);
    }

    #[test]
    fn tokens_read_their_leading_number() {
        let map = Heightmap::parse("2.5m, 1e1x,+.5,-3cm,.,7.\n").expect("parse");
        assert_eq!(map.x_size(), 6);
        assert_eq!(map.height(0, 0), 2.5);
        assert_eq!(map.height(1, 0), 10.0);
        assert_eq!(map.height(2, 0), 0.5);
        assert_eq!(map.height(3, 0), 0.0);
        assert_eq!(map.height(4, 0), 0.0);
        assert_eq!(map.height(5, 0), 7.0);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(Heightmap::parse(""), Err(TerrainError::Empty)));
        assert!(matches!(Heightmap::parse("\n\n"), Err(TerrainError::Empty)));
    }
}
