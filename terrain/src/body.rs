use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::{BoxTerrain, Heightmap, TerrainError};

/// Append `.body` unless the path already ends with it.
pub fn body_path(output: &Path) -> PathBuf {
    match output.extension() {
        Some(ext) if ext == "body" => output.to_path_buf(),
        _ => {
            let mut s = output.as_os_str().to_owned();
            s.push(".body");
            PathBuf::from(s)
        }
    }
}

/// Write `terrain` as a body file with one fixed `STEPFIELD` link.
pub fn write_body<W: Write>(terrain: &BoxTerrain, name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "format: ChoreonoidBody")?;
    writeln!(out, "formatVersion: 1.0")?;
    writeln!(out, "name: {name}")?;
    writeln!(out, "links:")?;
    writeln!(out, "  -")?;
    writeln!(out, "    name: STEPFIELD")?;
    writeln!(out, "#    parent: ")?;
    writeln!(out, "    translation: [ 0, 0, 0 ]")?;
    writeln!(out, "    rotation: [ [ 1, 0, 0, 0 ], [ 0, 1, 0, 0 ], [ 0, 0, 1, 0 ] ]")?;
    writeln!(out, "    jointType: fixed")?;
    writeln!(out, "    material: Ground")?;
    writeln!(out, "    elements:")?;
    writeln!(out, "      Shape:")?;
    writeln!(out, "        geometry:")?;
    writeln!(out, "          type: IndexedFaceSet")?;
    writeln!(out, "          coordinate: [")?;
    for v in &terrain.vertices {
        writeln!(out, "            {:4.2}, {:4.2}, {:4.2},", v.x, v.y, v.z)?;
    }
    writeln!(out, "          ]")?;
    writeln!(out, "          coordIndex: [")?;
    for [p, q, r, s] in &terrain.faces {
        writeln!(out, "            {p}, {q}, {r}, {s}, -1,")?;
    }
    writeln!(out, "          ]")?;
    writeln!(out, "        appearance:")?;
    writeln!(out, "          material:")?;
    writeln!(out, "            diffuseColor: [ 1, 1, 1 ]")?;
    writeln!(out, "#          texture:")?;
    writeln!(out, "#            url: \"texture/oak.png\"")?;
    Ok(())
}

/// Read a heightmap CSV, build its box terrain and write the body file.
/// The body is named after the output file stem. Returns the path written.
pub fn export(input: &Path, output: &Path, scale: f64) -> Result<PathBuf, TerrainError> {
    let map = Heightmap::read(input)?;
    let terrain = BoxTerrain::build(&map, scale)?;
    let path = body_path(output);
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let write_err = |source| TerrainError::Write { path: path.clone(), source };
    let file = File::create(&path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    write_body(&terrain, &name, &mut out).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    info!(
        path = %path.display(),
        cells = terrain.cell_count(),
        faces = terrain.faces.len(),
        "box terrain written"
    );
    Ok(path)
}
