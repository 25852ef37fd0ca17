//! Serialization of pruned point sets.
//!
//! OBJ output holds vertices only:
//! ```text
//! v 2.0 0.0 0.0
//! v 2.0 1.0 0.0
//! v 1.0 0.0 -3.0
//! ```
//! JSON output holds one [`Point`] record per line.

use std::{
    fs::File,
    io::{ BufWriter, Write },
    path::Path,
};
use serde::{ Deserialize, Serialize };
use crate::{
    error::OrbitalResult,
    hybrid::Hybrid,
    physics::QuantumNumbers,
    probability::{ Point, ProfilePoint },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Obj,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Obj => "obj",
            OutputFormat::Json => "json",
        }
    }
}

/// `orbital_n_{n}_l_{l}_m_{m}.{ext}`
pub fn orbital_file_name(qn: QuantumNumbers, format: OutputFormat) -> String {
    format!(
        "orbital_n_{}_l_{}_m_{}.{}",
        qn.n(), qn.l(), qn.m_l(), format.extension(),
    )
}

/// `hybrid_orbital_{kind}_{index}.{ext}`, e.g. `hybrid_orbital_sp^2_1.obj`
pub fn hybrid_file_name(hybrid: &Hybrid, format: OutputFormat) -> String {
    format!(
        "hybrid_orbital_{}_{}.{}",
        hybrid.kind.as_str(), hybrid.index, format.extension(),
    )
}

pub fn write_obj<W: Write>(writer: W, points: &[Point]) -> OrbitalResult<()> {
    let mut bw = BufWriter::new(writer);
    for p in points {
        writeln!(bw, "v {:.1} {:.1} {:.1}", p.x as f64, p.y as f64, p.z as f64)?;
    }
    bw.flush()?;
    Ok(())
}

pub fn write_json_lines<W: Write>(writer: W, points: &[Point]) -> OrbitalResult<()> {
    let mut bw = BufWriter::new(writer);
    for p in points {
        serde_json::to_writer(&mut bw, p)?;
        bw.write_all(b"\n")?;
    }
    bw.flush()?;
    Ok(())
}

pub fn write_points<W: Write>(writer: W, points: &[Point], format: OutputFormat)
    -> OrbitalResult<()>
{
    match format {
        OutputFormat::Obj => write_obj(writer, points),
        OutputFormat::Json => write_json_lines(writer, points),
    }
}

/// Create (or truncate) `path` and write `points` to it.
pub fn write_points_file(path: &Path, points: &[Point], format: OutputFormat)
    -> OrbitalResult<()>
{
    let file = File::create(path)?;
    write_points(file, points, format)
}

pub fn write_profile<W: Write>(writer: W, profile: &[ProfilePoint]) -> OrbitalResult<()> {
    let mut bw = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut bw, profile)?;
    bw.write_all(b"\n")?;
    bw.flush()?;
    Ok(())
}
