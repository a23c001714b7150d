use bevy_math::DVec3;

use crate::{Heightmap, TerrainError};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;
pub const DEFAULT_SCALE: f64 = 1.0;

/// Edge length of one cell at scale 1, in meters.
const CELL_SIZE: f64 = 0.1;

/// Corners of a cell, in the order their vertices are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// `(i, j)`
    NearLeft = 0,
    /// `(i, j + 1)`
    FarLeft = 1,
    /// `(i + 1, j + 1)`
    FarRight = 2,
    /// `(i + 1, j)`
    NearRight = 3,
}

const CORNER_OFFSETS: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];

/// Indexed face set for a heightmap: four top vertices per cell at the
/// cell's height, four bottom vertices per cell at zero, and quads for the
/// tops, bottoms and the walls between neighbouring columns.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxTerrain {
    x_size: usize,
    y_size: usize,
    /// Top vertices (`4 * cells`), then bottom vertices (`4 * cells`).
    pub vertices: Vec<DVec3>,
    /// Quads, each listed in the winding the body file expects.
    pub faces: Vec<[usize; 4]>,
}

impl BoxTerrain {
    pub fn build(map: &Heightmap, scale: f64) -> Result<Self, TerrainError> {
        if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            return Err(TerrainError::ScaleOutOfRange(scale));
        }
        let s = CELL_SIZE * scale;
        let (xs, ys) = (map.x_size(), map.y_size());
        let half_x = xs as f64 / 2.0;
        let half_y = ys as f64 / 2.0;

        let mut vertices = Vec::with_capacity(8 * xs * ys);
        for top in [true, false] {
            for j in 0..ys {
                for i in 0..xs {
                    let h = if top { map.height(i, j) } else { 0.0 };
                    for (di, dj) in CORNER_OFFSETS {
                        vertices.push(DVec3::new(
                            s * (i as f64 + di - half_x),
                            s * (j as f64 + dj - half_y) * -1.0,
                            s * h,
                        ));
                    }
                }
            }
        }

        let mut terrain = Self { x_size: xs, y_size: ys, vertices, faces: Vec::new() };
        terrain.faces = terrain.build_faces();
        Ok(terrain)
    }

    pub fn x_size(&self) -> usize {
        self.x_size
    }

    pub fn y_size(&self) -> usize {
        self.y_size
    }

    pub fn cell_count(&self) -> usize {
        self.x_size * self.y_size
    }

    /// Vertex id of a top corner.
    pub fn top(&self, i: usize, j: usize, c: Corner) -> usize {
        (j * self.x_size + i) * 4 + c as usize
    }

    /// Vertex id of a bottom corner.
    pub fn bottom(&self, i: usize, j: usize, c: Corner) -> usize {
        self.cell_count() * 4 + self.top(i, j, c)
    }

    fn build_faces(&self) -> Vec<[usize; 4]> {
        use Corner::*;
        let (a, b) = (|i, j, c| self.top(i, j, c), |i, j, c| self.bottom(i, j, c));

        let mut faces = Vec::new();
        for j in 0..self.y_size {
            for i in 0..self.x_size {
                faces.push([a(i, j, NearLeft), a(i, j, FarLeft), a(i, j, FarRight), a(i, j, NearRight)]);
                faces.push([b(i, j, NearLeft), b(i, j, NearRight), b(i, j, FarRight), b(i, j, FarLeft)]);
                // Left wall: against the neighbouring column, or down to the floor at the edge.
                if i != 0 {
                    faces.push([a(i - 1, j, NearRight), a(i - 1, j, FarRight), a(i, j, FarLeft), a(i, j, NearLeft)]);
                } else {
                    faces.push([b(i, j, FarLeft), a(i, j, FarLeft), a(i, j, NearLeft), b(i, j, NearLeft)]);
                }
                // Near wall.
                if j != 0 {
                    faces.push([a(i, j - 1, FarLeft), a(i, j, NearLeft), a(i, j, NearRight), a(i, j - 1, FarRight)]);
                } else {
                    faces.push([b(i, j, NearLeft), a(i, j, NearLeft), a(i, j, NearRight), b(i, j, NearRight)]);
                }
                if j == self.y_size - 1 {
                    faces.push([a(i, j, FarLeft), b(i, j, FarLeft), b(i, j, FarRight), a(i, j, FarRight)]);
                }
                if i == self.x_size - 1 {
                    faces.push([b(i, j, FarRight), b(i, j, NearRight), a(i, j, NearRight), a(i, j, FarRight)]);
                }
            }
        }
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_scale_outside_range() {
        let map = Heightmap::parse("1").expect("parse");
        assert!(matches!(BoxTerrain::build(&map, 0.05), Err(TerrainError::ScaleOutOfRange(_))));
        assert!(matches!(BoxTerrain::build(&map, 10.5), Err(TerrainError::ScaleOutOfRange(_))));
        assert!(BoxTerrain::build(&map, MAX_SCALE).is_ok());
    }

    #[test]
    fn single_cell_is_a_closed_box() {
        let map = Heightmap::parse("2").expect("parse");
        let t = BoxTerrain::build(&map, DEFAULT_SCALE).expect("build");
        assert_eq!(t.vertices.len(), 8);
        // top, bottom, left, near, far, right
        assert_eq!(t.faces.len(), 6);
        assert_eq!(t.faces[0], [0, 1, 2, 3]);
        assert_eq!(t.faces[1], [4, 7, 6, 5]);
        assert_eq!(t.faces[2], [5, 1, 0, 4]);
        assert_eq!(t.faces[3], [4, 0, 3, 7]);
        assert_eq!(t.faces[4], [1, 5, 6, 2]);
        assert_eq!(t.faces[5], [6, 7, 3, 2]);

        // Centered on the origin, 0.1 m wide, 0.2 m tall.
        assert_eq!(t.vertices[0], DVec3::new(-0.05, 0.05, 0.2));
        assert_eq!(t.vertices[2], DVec3::new(0.05, -0.05, 0.2));
        assert_eq!(t.vertices[6].z, 0.0);
    }
}
