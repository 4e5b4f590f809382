// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flowgrid CLI entrypoint.
//!
//! Renders a JSON input through headless views and prints a JSON snapshot of the grid to stdout.
//! Logs go to stderr.

use std::error::Error;
use std::io::Write;

use flowgrid::collab::Collaborators;
use flowgrid::config::{ConfigError, GridConfig};
use flowgrid::geometry::PathShape;
use flowgrid::grid::{CellAddr, ViewGrid, MAPS_PER_ROW};
use flowgrid::input::{GridInput, KeepSegregationIndex};
use flowgrid::render::RowRenderer;
use flowgrid::view::{HeadlessHost, MapView, ViewEvent};
use tracing::{info, warn};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <input.json> [--config <path>] [--shape line|arc] [--zoom <z>] [--verbose]\n\n--config loads a grid config (JSON); defaults apply otherwise.\n--zoom zooms the first view after rendering and propagates it to every view.\n--verbose logs at debug level."
    );
}

#[derive(Debug, Default, Clone, PartialEq)]
struct CliOptions {
    input: Option<String>,
    config: Option<String>,
    shape: Option<PathShape>,
    zoom: Option<f64>,
    verbose: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--shape" => {
                if options.shape.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.shape = Some(raw.parse().map_err(|_| ())?);
            }
            "--zoom" => {
                if options.zoom.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let zoom: f64 = raw.parse().map_err(|_| ())?;
                if !zoom.is_finite() || zoom < 0.0 {
                    return Err(());
                }
                options.zoom = Some(zoom);
            }
            "--verbose" => {
                if options.verbose {
                    return Err(());
                }
                options.verbose = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.input.is_some() {
                    return Err(());
                }
                options.input = Some(arg);
            }
        }
    }

    if options.input.is_none() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "flowgrid".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(if options.verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            })
            .init();

        let mut config = match &options.config {
            Some(path) => GridConfig::load(path)?,
            None => GridConfig::default(),
        };
        config.apply_env_overrides()?;
        match config.validate() {
            // Headless views never fetch tiles.
            Err(ConfigError::MissingAccessToken) => warn!("no tile access token configured"),
            other => other?,
        }

        let input = GridInput::load(options.input.as_deref().unwrap_or_default())?;
        let (mut slices, boundaries, clusters, labels) = input.into_parts();

        let host = HeadlessHost::new(config.viewport.width, config.viewport.height);
        let shape = options.shape.unwrap_or_default();
        let mut grid = ViewGrid::new(host, &config).with_shape(shape);

        let renderer =
            RowRenderer::new(Collaborators::new(&clusters, &KeepSegregationIndex, &labels))
                .with_shape(shape);
        let summary = renderer.render_all_rows(&mut grid, &mut slices, &boundaries)?;

        if let Some(zoom) = options.zoom {
            if !grid.is_empty() {
                let origin = CellAddr::new(0, 0);
                let center = grid.view_state().center;
                grid.cell_mut(origin)?.view_mut().set_view(center, zoom);
                // The first zoom end propagates the state; the rest re-project each view.
                for row in 0..grid.len() {
                    for cell in 0..MAPS_PER_ROW {
                        grid.handle_view_event(CellAddr::new(row, cell), ViewEvent::ZoomEnd)?;
                    }
                }
            }
        }

        info!(rows = summary.rows, zoom = grid.view_state().zoom, "writing snapshot");
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &grid.snapshot())?;
        writeln!(out)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("flowgrid: {err}");
        std::process::exit(1);
    }
}
