//! tessel-inspect — build a scene's render list and report its buffers.
//!
//! ```text
//! tessel-inspect                  # built-in desk scene
//! tessel-inspect scene.json       # scene from a file
//! tessel-inspect --dump-scene     # print the built-in scene as JSON
//! ```
//!
//! Logging goes to stderr through env_logger (`RUST_LOG`, default `info`);
//! the JSON report goes to stdout.

use std::process::ExitCode;

use serde::Serialize;
use tessel::geometry::{INDEX_SIZE, VERTEX_STRIDE};
use tessel::scene::{RenderList, SceneDescription};
use tessel::SceneError;

// ── Report types ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MeshReport {
    id: usize,
    shape: String,
    vertex_count: usize,
    index_count: usize,
    triangle_count: usize,
    vertex_buffer_bytes: usize,
    index_buffer_bytes: usize,
    users: usize,
}

#[derive(Serialize)]
struct ItemReport {
    name: String,
    mesh: usize,
    texture: Option<String>,
}

#[derive(Serialize)]
struct Report {
    vertex_stride: usize,
    index_size: usize,
    meshes: Vec<MeshReport>,
    items: Vec<ItemReport>,
    point_lights: usize,
    total_bytes: usize,
}

impl Report {
    fn from_render_list(list: &RenderList) -> Self {
        let meshes: Vec<MeshReport> = list
            .meshes()
            .iter()
            .enumerate()
            .map(|(id, mesh)| {
                let geometry = &mesh.geometry;
                MeshReport {
                    id,
                    shape: mesh.shape.to_string(),
                    vertex_count: geometry.vertex_count(),
                    index_count: geometry.index_count(),
                    triangle_count: geometry.triangle_count(),
                    vertex_buffer_bytes: geometry.vertex_buffer_size_bytes(),
                    index_buffer_bytes: geometry.index_buffer_size_bytes(),
                    users: list.items().iter().filter(|item| item.mesh.0 == id).count(),
                }
            })
            .collect();

        let total_bytes = meshes.iter().map(|m| m.vertex_buffer_bytes + m.index_buffer_bytes).sum();

        let items = list
            .items()
            .iter()
            .map(|item| ItemReport {
                name: item.name.clone(),
                mesh: item.mesh.0,
                texture: item.material.texture.clone(),
            })
            .collect();

        Self {
            vertex_stride: VERTEX_STRIDE,
            index_size: INDEX_SIZE,
            meshes,
            items,
            point_lights: list.lighting().point_lights.len(),
            total_bytes,
        }
    }
}

// ── Entry point ─────────────────────────────────────────────────────────

enum Command {
    Inspect(Option<String>),
    DumpScene,
}

fn parse_args() -> Result<Command, String> {
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--dump-scene" {
            return Ok(Command::DumpScene);
        } else if arg.starts_with("--") {
            return Err(format!("unknown flag '{arg}'"));
        } else if path.is_some() {
            return Err("expected at most one scene path".to_string());
        }
        path = Some(arg);
    }
    Ok(Command::Inspect(path))
}

fn run(command: Command) -> Result<String, SceneError> {
    match command {
        Command::DumpScene => SceneDescription::desk().to_json_string(),
        Command::Inspect(path) => {
            let scene = match path {
                Some(path) => SceneDescription::from_file(path)?,
                None => {
                    log::info!("no scene path given, using the built-in desk scene");
                    SceneDescription::desk()
                }
            };
            let list = RenderList::build(&scene)?;
            let report = Report::from_render_list(&list);
            log::info!(
                "{} meshes, {} items, {} bytes of geometry",
                report.meshes.len(),
                report.items.len(),
                report.total_bytes
            );
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let command = match parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("usage: tessel-inspect [--dump-scene] [scene.json]");
            return ExitCode::from(2);
        }
    };

    match run(command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
