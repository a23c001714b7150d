use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("failed to read heightmap {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write body file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("heightmap has no cells")]
    Empty,
    #[error("scale {0} outside [{min}, {max}]", min = crate::MIN_SCALE, max = crate::MAX_SCALE)]
    ScaleOutOfRange(f64),
}
