//! Geomark: point and area annotations on a web-mercator map.
//!
//! Geomark keeps labelled points and polygonal areas on top of an
//! OpenStreetMap-style view, and saves them together with the camera to a
//! JSON project file. The library is the annotation core a map GUI sits
//! on; the `geomark` binary drives the same core from the command line.
//!
//! # Modules
//!
//! - [`geo`]: geographic/projected/screen coordinates, mercator math, colours
//! - [`model`]: saved-project and settings records and their JSON I/O
//! - [`store`]: live points and areas plus selection
//! - [`map`]: the map adapter (features, viewport, hit-testing, framing)
//! - [`controller`]: the gesture state machine and dialog seam
//! - [`persistence`]: load/save with the recovery policy
//! - [`validation`]: project file checks and reports
//! - [`error`]: error types for geomark operations

pub mod controller;
pub mod error;
pub mod geo;
pub mod map;
pub mod model;
pub mod persistence;
pub mod store;
pub mod validation;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use controller::{
    Answer, AnnotationController, AreaEdits, ClickOutcome, FinishOutcome, PointEdits,
    ScriptedDialogs,
};
pub use error::GeomarkError;
use geo::{Argb, GeoCoord};
use map::MapAdapter;
use model::Theme;
use persistence::PersistenceService;

/// The geomark CLI application.
#[derive(Parser)]
#[command(name = "geomark")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Settings file (defaults to the user config directory).
    #[arg(long, global = true, env = "GEOMARK_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Check a project file for entries that would be skipped on load.
    Validate(ValidateArgs),
    /// Print the points, areas and camera of a project.
    Inspect(InspectArgs),
    /// Click on the map: adds a point, or deletes the point under the cursor.
    Click(ClickArgs),
    /// Draw an area through the given vertices.
    AddArea(AddAreaArgs),
    /// Delete a point by its index.
    RemovePoint(RemoveArgs),
    /// Delete an area by its index.
    RemoveArea(RemoveArgs),
    /// Move the saved camera onto a point or area.
    Frame(FrameArgs),
    /// Show or change the UI theme.
    Theme(ThemeArgs),
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Viewport size used for hit-testing and framing.
#[derive(clap::Args)]
struct ViewportArgs {
    /// View width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// View height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Project file to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Project file to inspect.
    input: PathBuf,
}

/// Arguments for the click subcommand.
#[derive(clap::Args)]
struct ClickArgs {
    /// Project file (created if missing).
    project: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    lon: f64,

    /// Name entered in the point editor.
    #[arg(long)]
    name: Option<String>,

    /// Colour entered in the point editor (#AARRGGBB).
    #[arg(long, value_parser = parse_color)]
    color: Option<Argb>,

    /// Size entered in the point editor.
    #[arg(long)]
    size: Option<f64>,

    /// Answer "cancel" to the dialog the click opens.
    #[arg(long)]
    decline: bool,

    /// Drop entries that cannot be loaded instead of refusing to save.
    #[arg(long)]
    force: bool,

    #[command(flatten)]
    viewport: ViewportArgs,
}

/// Arguments for the add-area subcommand.
#[derive(clap::Args)]
struct AddAreaArgs {
    /// Project file (created if missing).
    project: PathBuf,

    /// Vertex as LAT,LON; repeat in winding order.
    #[arg(long = "vertex", value_parser = parse_vertex, allow_hyphen_values = true, required = true)]
    vertices: Vec<GeoCoord>,

    #[arg(long)]
    name: Option<String>,

    /// Fill colour (#AARRGGBB).
    #[arg(long, value_parser = parse_color)]
    fill: Option<Argb>,

    /// Border colour (#AARRGGBB).
    #[arg(long, value_parser = parse_color)]
    border: Option<Argb>,

    /// Drop entries that cannot be loaded instead of refusing to save.
    #[arg(long)]
    force: bool,

    #[command(flatten)]
    viewport: ViewportArgs,
}

/// Arguments for the remove-point and remove-area subcommands.
#[derive(clap::Args)]
struct RemoveArgs {
    project: PathBuf,

    /// Zero-based position in the project's list.
    index: usize,

    /// Drop entries that cannot be loaded instead of refusing to save.
    #[arg(long)]
    force: bool,
}

/// Arguments for the frame subcommand.
#[derive(clap::Args)]
struct FrameArgs {
    project: PathBuf,

    /// Centre on the point at this index.
    #[arg(long, conflicts_with = "area", required_unless_present = "area")]
    point: Option<usize>,

    /// Centre on the area at this index.
    #[arg(long)]
    area: Option<usize>,

    /// Keep the current zoom when framing an area.
    #[arg(long)]
    keep_zoom: bool,

    /// Drop entries that cannot be loaded instead of refusing to save.
    #[arg(long)]
    force: bool,

    #[command(flatten)]
    viewport: ViewportArgs,
}

/// Theme selection.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

/// Arguments for the theme subcommand.
#[derive(clap::Args)]
struct ThemeArgs {
    /// New theme; omit to print the current one.
    #[arg(value_enum)]
    theme: Option<ThemeChoice>,
}

fn parse_color(s: &str) -> Result<Argb, String> {
    s.parse().map_err(|e: GeomarkError| e.to_string())
}

fn parse_vertex(s: &str) -> Result<GeoCoord, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{}'", s))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon))?;
    Ok(GeoCoord::new(lat, lon))
}

/// Run the geomark CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), GeomarkError> {
    let cli = Cli::parse();
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(persistence::default_settings_path);

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Click(args)) => run_click(args),
        Some(Commands::AddArea(args)) => run_add_area(args),
        Some(Commands::RemovePoint(args)) => run_remove(args, Kind::Point),
        Some(Commands::RemoveArea(args)) => run_remove(args, Kind::Area),
        Some(Commands::Frame(args)) => run_frame(args),
        Some(Commands::Theme(args)) => run_theme(args, &settings_path),
        None => {
            println!("geomark {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Point and area annotations on a web-mercator map.");
            println!();
            println!("Run 'geomark --help' for usage information.");
            Ok(())
        }
    }
}

/// Builds a controller over `project`, with the camera and annotations
/// from the file already applied.
///
/// Every subcommand using this writes the project back, so a file that
/// does not parse is an error, and so is a file with entries that would
/// be dropped, unless `force` is set. A missing file starts empty.
fn open_project(
    project: &Path,
    viewport: &ViewportArgs,
    dialogs: ScriptedDialogs,
    force: bool,
) -> Result<AnnotationController<ScriptedDialogs>, GeomarkError> {
    let file = match model::io_json::read_project_json(project) {
        Ok(file) => file,
        Err(GeomarkError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} does not exist, starting empty", project.display());
            model::ProjectFile::default()
        }
        Err(e) => return Err(e),
    };

    let mut controller = AnnotationController::new(
        MapAdapter::new(viewport.width, viewport.height),
        dialogs,
        PersistenceService::new(project),
        model::AppSettings::default(),
    );
    let summary = controller.apply_project(&file);
    if summary.skipped > 0 {
        if !force {
            return Err(GeomarkError::UnloadableEntries {
                path: project.to_path_buf(),
                skipped: summary.skipped,
            });
        }
        eprintln!(
            "warning: dropping {} invalid entr{} from {}",
            summary.skipped,
            if summary.skipped == 1 { "y" } else { "ies" },
            project.display()
        );
    }
    Ok(controller)
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), GeomarkError> {
    let project = model::io_json::read_project_json(&args.input)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_project(&project, &opts);

    match args.output {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": &report.issues,
            });
            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{}", json),
                Err(source) => {
                    return Err(GeomarkError::ProjectJsonWrite {
                        path: args.input.clone(),
                        source,
                    })
                }
            }
        }
        OutputFormat::Text => print!("{}", report),
    }

    if report.passes(args.strict) {
        Ok(())
    } else {
        Err(GeomarkError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    }
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), GeomarkError> {
    let project = model::io_json::read_project_json(&args.input)?;
    let camera = &project.camera;

    println!("Project: {}", args.input.display());
    println!(
        "Camera: centre ({:.2}, {:.2}), resolution {:.2}",
        camera.center_x,
        camera.center_y,
        camera.effective_resolution()
    );
    println!("Points: {}", project.points.len());
    for (i, p) in project.points.iter().enumerate() {
        let label = if p.name.is_empty() { "(unnamed)" } else { p.name.as_str() };
        println!(
            "  [{}] {} ({:.4}, {:.4}) {} size {}",
            i, label, p.latitude, p.longitude, p.color, p.size
        );
    }
    println!("Areas: {}", project.areas.len());
    for (i, a) in project.areas.iter().enumerate() {
        println!(
            "  [{}] {} ({} points) fill {} border {}",
            i,
            a.name,
            a.points.len(),
            a.fill_color,
            a.border_color
        );
    }
    Ok(())
}

/// Execute the click subcommand.
fn run_click(args: ClickArgs) -> Result<(), GeomarkError> {
    let dialogs = if args.decline {
        ScriptedDialogs::cancelling()
    } else {
        ScriptedDialogs::accepting().then(Answer::EditPoint(PointEdits {
            name: args.name.clone(),
            color: args.color,
            size: args.size,
        }))
    };
    let mut controller = open_project(&args.project, &args.viewport, dialogs, args.force)?;

    match controller.handle_geo_click(GeoCoord::new(args.lat, args.lon)) {
        ClickOutcome::Ignored => {
            return Err(GeomarkError::InvalidCoordinate {
                latitude: args.lat,
                longitude: args.lon,
            })
        }
        ClickOutcome::PointAdded(id) => {
            if let Some(point) = controller.store().point(id) {
                println!("Added point {}", point.display_text());
            }
        }
        ClickOutcome::PointRemoved(_) => println!("Removed point"),
        ClickOutcome::AddCancelled => println!("Cancelled, nothing added"),
        ClickOutcome::RemoveDeclined(_) => println!("Kept point"),
        ClickOutcome::VertexAdded { .. } => {}
    }
    controller.save_to(&args.project)
}

/// Execute the add-area subcommand.
fn run_add_area(args: AddAreaArgs) -> Result<(), GeomarkError> {
    let dialogs = ScriptedDialogs::accepting().then(Answer::EditArea(AreaEdits {
        name: args.name.clone(),
        fill: args.fill,
        border: args.border,
    }));
    let mut controller = open_project(&args.project, &args.viewport, dialogs, args.force)?;

    controller.start_area();
    for vertex in &args.vertices {
        if controller.handle_geo_click(*vertex) == ClickOutcome::Ignored {
            controller.cancel_area();
            return Err(GeomarkError::InvalidCoordinate {
                latitude: vertex.latitude,
                longitude: vertex.longitude,
            });
        }
    }

    match controller.finish_area() {
        FinishOutcome::Committed(id) => {
            if let Some(area) = controller.store().area(id) {
                println!("Added area {}", area.display_text());
            }
            controller.save_to(&args.project)
        }
        FinishOutcome::TooFewVertices(n) => {
            controller.cancel_area();
            Err(GeomarkError::TooFewVertices(n))
        }
        FinishOutcome::NotDrawing | FinishOutcome::Cancelled => {
            println!("Cancelled, nothing added");
            Ok(())
        }
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Point,
    Area,
}

/// Execute the remove-point and remove-area subcommands.
fn run_remove(args: RemoveArgs, kind: Kind) -> Result<(), GeomarkError> {
    let viewport = ViewportArgs {
        width: 800.0,
        height: 600.0,
    };
    let mut controller =
        open_project(&args.project, &viewport, ScriptedDialogs::accepting(), args.force)?;

    match kind {
        Kind::Point => {
            let points = controller.store().points();
            let id = points
                .get(args.index)
                .map(|p| p.id())
                .ok_or(GeomarkError::IndexOutOfRange {
                    kind: "point",
                    index: args.index,
                    len: points.len(),
                })?;
            if let Some(point) = controller.remove_point(id) {
                println!("Removed point {}", point.display_text());
            }
        }
        Kind::Area => {
            let areas = controller.store().areas();
            let id = areas
                .get(args.index)
                .map(|a| a.id())
                .ok_or(GeomarkError::IndexOutOfRange {
                    kind: "area",
                    index: args.index,
                    len: areas.len(),
                })?;
            if let Some(area) = controller.remove_area(id) {
                println!("Removed area {}", area.display_text());
            }
        }
    }
    controller.save_to(&args.project)
}

/// Execute the frame subcommand.
fn run_frame(args: FrameArgs) -> Result<(), GeomarkError> {
    let mut controller = open_project(
        &args.project,
        &args.viewport,
        ScriptedDialogs::accepting(),
        args.force,
    )?;

    if let Some(index) = args.point {
        let points = controller.store().points();
        let id = points
            .get(index)
            .map(|p| p.id())
            .ok_or(GeomarkError::IndexOutOfRange {
                kind: "point",
                index,
                len: points.len(),
            })?;
        controller.focus_point(id);
    } else if let Some(index) = args.area {
        let areas = controller.store().areas();
        let id = areas
            .get(index)
            .map(|a| a.id())
            .ok_or(GeomarkError::IndexOutOfRange {
                kind: "area",
                index,
                len: areas.len(),
            })?;
        controller.focus_area(id, !args.keep_zoom);
    }

    let camera = controller.map().camera_state();
    println!(
        "Camera: centre ({:.2}, {:.2}), resolution {:.2}",
        camera.center_x, camera.center_y, camera.resolution
    );
    controller.save_to(&args.project)
}

/// Execute the theme subcommand.
fn run_theme(args: ThemeArgs, settings_path: &Path) -> Result<(), GeomarkError> {
    let mut settings = persistence::load_settings(settings_path);

    if let Some(choice) = args.theme {
        settings.theme = match choice {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Toggle => settings.theme.toggled(),
        };
        persistence::save_settings(settings_path, &settings)?;
    }
    println!("Theme: {:?}", settings.theme);
    Ok(())
}
