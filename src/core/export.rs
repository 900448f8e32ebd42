//! Headless export of one simulation instant.
//!
//! The scene is written straight from its [`Surface`](crate::core::surface::Surface);
//! the two charts are redrawn with plotters so they carry proper axis meshes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use plotters::prelude::*;

use crate::core::error::ExportError;
use crate::core::graph::{GraphKind, GraphView};
use crate::core::playback::Playback;

const CHART_SIZE: (u32, u32) = (880, 600);

/// Files produced by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub scene: PathBuf,
    pub velocity_chart: PathBuf,
    pub height_chart: PathBuf,
}

/// `throw-YYYYmmdd-HHMMSS`, so repeated exports never overwrite each other within a second.
pub fn export_stem() -> String {
    format!("throw-{}", Local::now().format("%Y%m%d-%H%M%S"))
}

pub fn write_scene_svg(playback: &Playback, path: &Path) -> Result<(), ExportError> {
    fs::write(path, playback.scene().surface.to_svg()).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn write_chart_svg(
    playback: &Playback,
    kind: GraphKind,
    path: &Path,
) -> Result<(), ExportError> {
    let graph = match kind {
        GraphKind::Velocity => playback.velocity_graph(),
        GraphKind::Height => playback.height_graph(),
    };
    draw_chart(playback, graph, path).map_err(|message| ExportError::Plot {
        path: path.display().to_string(),
        message,
    })
}

fn draw_chart(playback: &Playback, graph: &GraphView, path: &Path) -> Result<(), String> {
    let params = playback.params();
    let t_end = playback.milestones().time_to_impact_s;
    let now = playback.time_s();
    let color = graph.kind.color();
    let line_color = RGBColor(color.r, color.g, color.b);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let caption = match graph.kind {
        GraphKind::Velocity => "Velocity vs time",
        GraphKind::Height => "Height vs time",
    };
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(
            graph.scale.time.min..graph.scale.time.max,
            graph.scale.value.min..graph.scale.value.max,
        )
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc("t (s)")
        .y_desc(graph.kind.axis_label())
        .draw()
        .map_err(|e| e.to_string())?;

    let steps = graph.samples.len().saturating_sub(1).max(1);
    let full = (0..=steps).map(|i| {
        let t = t_end * i as f64 / steps as f64;
        (t, graph.kind.value_at(params, t))
    });
    chart
        .draw_series(LineSeries::new(full, line_color.mix(0.25).stroke_width(2)))
        .map_err(|e| e.to_string())?;

    let traced = graph
        .samples
        .iter()
        .take_while(|s| s.time_s <= now)
        .map(|s| (s.time_s, graph.kind.value_at(params, s.time_s)));
    chart
        .draw_series(LineSeries::new(traced, line_color.stroke_width(3)))
        .map_err(|e| e.to_string())?;

    let value_now = match graph.kind {
        GraphKind::Velocity => graph.kind.value_at(params, now),
        GraphKind::Height => graph.kind.value_at(params, now).max(0.0),
    };
    chart
        .draw_series(std::iter::once(Circle::new(
            (now, value_now),
            5,
            line_color.filled(),
        )))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

/// Writes scene, velocity chart and height chart into `dir`, creating it if needed.
pub fn export_all(playback: &Playback, dir: &Path) -> Result<ExportedFiles, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let stem = export_stem();
    let files = ExportedFiles {
        scene: dir.join(format!("{stem}-scene.svg")),
        velocity_chart: dir.join(format!("{stem}-velocity.svg")),
        height_chart: dir.join(format!("{stem}-height.svg")),
    };
    write_scene_svg(playback, &files.scene)?;
    write_chart_svg(playback, GraphKind::Velocity, &files.velocity_chart)?;
    write_chart_svg(playback, GraphKind::Height, &files.height_chart)?;
    log::info!("exported snapshot to {}", dir.display());
    Ok(files)
}
