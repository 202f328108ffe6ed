//! CLI utility for baking voxel navigation grids and querying paths

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use voxnav::{load_grid_header, save_grid_header, BakeContext, LogLevel, VoxelGrid};
use voxnav_dynamic::{ColliderSet, SceneFile};
use voxnav_query::NavMesh3d;

/// Bake voxel navigation grids and find paths through them
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bake a scene and write its grid header
    Bake {
        /// Scene file (JSON)
        #[clap(long, value_parser)]
        scene: PathBuf,

        /// Output grid header file
        #[clap(long, value_parser)]
        output: PathBuf,

        /// Print per-stage bake timings
        #[clap(long)]
        timings: bool,

        /// Print debug-level bake messages
        #[clap(long)]
        verbose: bool,
    },

    /// Find a path through a baked grid
    FindPath {
        /// Grid header file
        #[clap(long, value_parser)]
        grid: PathBuf,

        /// Scene file providing the colliders to re-sample
        #[clap(long, value_parser)]
        scene: Option<PathBuf>,

        /// Start position (x,y,z)
        #[clap(long, value_parser = parse_vector)]
        start: Vec3,

        /// End position (x,y,z)
        #[clap(long, value_parser = parse_vector)]
        end: Vec3,

        /// Maximum number of nodes the search may grow
        #[clap(long)]
        max_corners: Option<usize>,

        /// Output path file
        #[clap(long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Print the contents of a grid header
    Inspect {
        /// Grid header file
        #[clap(long, value_parser)]
        grid: PathBuf,
    },
}

/// Parse a comma-separated vector
fn parse_vector(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').collect();

    if parts.len() != 3 {
        return Err(format!(
            "Vector must have 3 components, got {}",
            parts.len()
        ));
    }

    let x = parts[0].trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = parts[1].trim().parse::<f32>().map_err(|e| e.to_string())?;
    let z = parts[2].trim().parse::<f32>().map_err(|e| e.to_string())?;

    Ok(Vec3::new(x, y, z))
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Bake {
            scene,
            output,
            timings,
            verbose,
        } => bake(&scene, &output, timings, verbose),
        Commands::FindPath {
            grid,
            scene,
            start,
            end,
            max_corners,
            output,
        } => {
            let corners = find_path(&grid, scene.as_deref(), start, end, max_corners)?;
            write_path(start, end, &corners, output.as_deref())
        }
        Commands::Inspect { grid } => inspect(&grid),
    }
}

/// Bake a scene and save its grid header
fn bake(scene_path: &Path, output: &Path, timings: bool, verbose: bool) -> Result<()> {
    println!("Loading scene from {}...", scene_path.display());
    let scene = SceneFile::load(scene_path)
        .map_err(|e| anyhow!("Failed to load scene: {}", e))?;
    println!("Scene loaded: {} collider(s)", scene.colliders.len());

    let mut context = BakeContext::new();
    if verbose {
        context.set_log_level(LogLevel::Debug);
    }
    let result = scene.bake_with_context(&mut context);

    if verbose {
        for entry in context.get_logs() {
            println!("[{:?}] {}", entry.level, entry.message);
        }
    }
    if let Some(progress) = context.get_progress() {
        println!(
            "Reached stage {}/{}: {}",
            progress.current, progress.total, progress.description
        );
    }

    let grid = result.map_err(|e| anyhow!("Failed to bake grid: {}", e))?;
    print_grid_summary(&grid);

    if timings {
        print!("{}", context.timer_summary());
    }

    println!("Saving grid header to {}...", output.display());
    save_grid_header(grid.config(), output)
        .map_err(|e| anyhow!("Failed to save grid header: {}", e))?;

    Ok(())
}

/// Re-bake a grid from its header and find a path through it
fn find_path(
    grid_path: &Path,
    scene_path: Option<&Path>,
    start: Vec3,
    end: Vec3,
    max_corners: Option<usize>,
) -> Result<Vec<Vec3>> {
    println!("Loading grid header from {}...", grid_path.display());
    let config =
        load_grid_header(grid_path).map_err(|e| anyhow!("Failed to load grid header: {}", e))?;

    let scene = scene_path
        .map(SceneFile::load)
        .transpose()
        .map_err(|e| anyhow!("Failed to load scene: {}", e))?;
    let colliders = scene
        .as_ref()
        .map(SceneFile::collider_set)
        .unwrap_or_default();

    let mut nav = NavMesh3d::new();
    nav.bake(config, &colliders)
        .map_err(|e| anyhow!("Failed to bake grid: {}", e))?;
    if let Some(grid) = nav.grid() {
        print_grid_summary(grid);
    }

    if let Some(budget) = max_corners.or(scene.and_then(|s| s.max_corners)) {
        if budget == 0 {
            return Err(anyhow!("--max-corners must be at least 1"));
        }
        nav.set_max_corners(budget);
    }

    println!("Finding path from {} to {}...", start, end);
    let corners = nav
        .get_path(start, end)
        .map_err(|e| anyhow!("Failed to find path: {}", e))?;
    println!("Found path with {} corners", corners.len());

    Ok(corners)
}

fn write_path(start: Vec3, end: Vec3, corners: &[Vec3], output: Option<&Path>) -> Result<()> {
    if let Some(output_path) = output {
        println!("Saving path to {}...", output_path.display());

        let mut file = File::create(output_path)
            .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;

        writeln!(file, "# Path from {} to {}", start, end)?;
        writeln!(file, "# {} corners", corners.len())?;

        for corner in corners {
            writeln!(file, "{},{},{}", corner.x, corner.y, corner.z)?;
        }
    } else {
        println!("Path:");
        for (i, corner) in corners.iter().enumerate() {
            println!("{}: {},{},{}", i, corner.x, corner.y, corner.z);
        }
    }

    Ok(())
}

/// Print a grid header without baking it
fn inspect(grid_path: &Path) -> Result<()> {
    let config =
        load_grid_header(grid_path).map_err(|e| anyhow!("Failed to load grid header: {}", e))?;
    let [nx, ny, nz] = config.grid_dims();

    println!("Grid header {}", grid_path.display());
    println!("  size:      {}", config.size);
    println!("  origin:    {}", config.origin);
    println!("  cell size: {}", config.cell_size);
    println!("  cells:     {}x{}x{} = {}", nx, ny, nz, config.cell_count());

    Ok(())
}

fn print_grid_summary(grid: &VoxelGrid) {
    let [nx, ny, nz] = grid.dims();
    println!(
        "Grid baked: {}x{}x{} cells, {} blocked",
        nx,
        ny,
        nz,
        grid.blocked_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};
    use voxnav::BakeConfig;
    use voxnav_dynamic::{BoxCollider, SerializableCollider};

    fn walled_scene() -> SceneFile {
        SceneFile::new(BakeConfig::new(Vec3::new(6.0, 3.0, 3.0), Vec3::ZERO, 1.0))
            .with_collider(SerializableCollider::Box(BoxCollider::from_bounds(
                Vec3::new(3.0, 0.0, 0.0),
                Vec3::new(4.0, 2.0, 3.0),
            )))
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("1,2.5,-3").unwrap(), Vec3::new(1.0, 2.5, -3.0));
        assert_eq!(parse_vector(" 1, 2, 3 ").unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert!(parse_vector("1,2").is_err());
        assert!(parse_vector("1,2,x").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "voxnav",
            "find-path",
            "--grid",
            "grid.bin",
            "--start",
            "0,0,0",
            "--end",
            "1,2,3",
            "--max-corners",
            "50",
        ])
        .unwrap();
        match args.command {
            Commands::FindPath {
                end,
                max_corners,
                scene,
                ..
            } => {
                assert_eq!(end, Vec3::new(1.0, 2.0, 3.0));
                assert_eq!(max_corners, Some(50));
                assert!(scene.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bake_flags_parse() {
        let args = Args::try_parse_from([
            "voxnav",
            "bake",
            "--scene",
            "scene.json",
            "--output",
            "grid.bin",
            "--verbose",
        ])
        .unwrap();
        match args.command {
            Commands::Bake {
                timings, verbose, ..
            } => {
                assert!(!timings);
                assert!(verbose);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bake_then_find_path() {
        let dir = tempdir().unwrap();
        let scene_path = dir.path().join("scene.json");
        let grid_path = dir.path().join("grid.bin");
        walled_scene().save(&scene_path).unwrap();

        bake(&scene_path, &grid_path, true, true).unwrap();
        inspect(&grid_path).unwrap();

        let start = Vec3::new(0.0, 0.0, 1.0);
        let end = Vec3::new(5.0, 0.0, 1.0);
        let corners = find_path(&grid_path, Some(&scene_path), start, end, None).unwrap();
        // The wall only leaves the top layer open
        assert!(corners.iter().any(|c| c.x == 3.5 && c.y == 2.5));

        let open = find_path(&grid_path, None, start, end, None).unwrap();
        assert_eq!(open.len(), 6);
        assert!(open.iter().all(|c| c.y == 0.5));

        let output = NamedTempFile::new().unwrap();
        write_path(start, end, &corners, Some(output.path())).unwrap();
        let written = std::fs::read_to_string(output.path()).unwrap();
        assert_eq!(written.lines().count(), corners.len() + 2);
    }

    #[test]
    fn test_find_path_budget() {
        let dir = tempdir().unwrap();
        let grid_path = dir.path().join("grid.bin");
        save_grid_header(&walled_scene().bake, &grid_path).unwrap();

        let start = Vec3::ZERO;
        let end = Vec3::new(5.0, 0.0, 0.0);
        assert!(find_path(&grid_path, None, start, end, Some(1)).is_err());
        assert!(find_path(&grid_path, None, start, end, Some(0)).is_err());
        assert!(find_path(&grid_path, None, start, end, Some(100)).is_ok());
    }

    #[test]
    fn test_missing_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.bin");
        assert!(inspect(&missing).is_err());
        assert!(bake(&missing, &dir.path().join("out.bin"), false, false).is_err());
    }
}
