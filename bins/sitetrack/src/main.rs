//! SiteTrack CLI
//!
//! Log in, manage projects, and draw, save and inspect site boundaries.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use sitetrack_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod exit;

use commands::{auth, projects, sites, wkt};
use context::{AppContext, OutputFormat};

/// Draw, save and inspect site boundaries
#[derive(Parser)]
#[command(name = "sitetrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and SITETRACK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "SITETRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "SITETRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Draw, list and inspect site boundaries
    Sites {
        #[command(subcommand)]
        action: SitesAction,
    },

    /// Convert between WKT polygons and coordinate lists (offline)
    Wkt {
        #[command(subcommand)]
        action: WktAction,
    },
}

#[derive(Subcommand)]
enum ProjectsAction {
    /// List projects
    List,

    /// Create a project
    Create {
        /// Project name
        name: String,
    },
}

#[derive(Subcommand)]
enum SitesAction {
    /// List saved site boundaries
    List {
        /// Only sites of this project (defaults to session.default_project)
        #[arg(short, long)]
        project: Option<i64>,
    },

    /// Draw a boundary and save it as a new site
    Draw {
        /// Owning project (defaults to session.default_project)
        #[arg(short, long)]
        project: Option<i64>,

        /// Ring as "lon lat, lon lat, ..."
        #[arg(long)]
        coords: String,

        /// Carbon stock estimate
        #[arg(long)]
        carbon: Option<f64>,

        /// Biodiversity index
        #[arg(long)]
        biodiversity: Option<f64>,

        /// Print the encoded polygon and its measures without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Show a site with its analytics
    Show {
        /// Site id
        id: i64,
    },
}

#[derive(Subcommand)]
enum WktAction {
    /// Decode a WKT polygon into coordinates
    Decode {
        /// WKT polygon, e.g. "POLYGON((0 0, 1 1, 1 0, 0 0))"
        wkt: String,
    },

    /// Encode "lon lat, lon lat, ..." as a WKT polygon
    Encode {
        /// Coordinate list
        coords: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(exit::code_for(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Offline commands need neither config nor logging setup
    if let Commands::Wkt { action } = &cli.command {
        return match action {
            WktAction::Decode { wkt: text } => wkt::decode(text, cli.format),
            WktAction::Encode { coords } => wkt::encode(coords, cli.format),
        };
    }

    let ctx = AppContext::load(cli.config.as_deref(), cli.api_url.as_deref(), cli.format)?;

    sitetrack_telemetry::init_with_config(
        TelemetryConfig::with_level(ctx.config.schema.logging.level.clone())
            .with_json(ctx.config.schema.logging.json)
            .with_verbosity(cli.verbose),
    )?;

    match cli.command {
        Commands::Login { username, password } => {
            auth::login(&ctx, &username, password).await
        }
        Commands::Register { username, password } => {
            auth::register(&ctx, &username, password).await
        }
        Commands::Logout => auth::logout(&ctx),

        Commands::Projects { action } => match action {
            ProjectsAction::List => projects::list(&ctx).await,
            ProjectsAction::Create { name } => projects::create(&ctx, &name).await,
        },

        Commands::Sites { action } => match action {
            SitesAction::List { project } => sites::list(&ctx, project).await,
            SitesAction::Draw {
                project,
                coords,
                carbon,
                biodiversity,
                dry_run,
            } => {
                let draw = sites::DrawArgs {
                    project,
                    coords,
                    carbon,
                    biodiversity,
                    dry_run,
                };
                sites::draw(&ctx, draw).await
            }
            SitesAction::Show { id } => sites::show(&ctx, id).await,
        },

        Commands::Wkt { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_draw() {
        let cli = Cli::try_parse_from([
            "sitetrack",
            "sites",
            "draw",
            "--project",
            "2",
            "--coords",
            "0 0, 1 0, 1 1",
            "--carbon",
            "100",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Sites {
                action:
                    SitesAction::Draw {
                        project,
                        coords,
                        carbon,
                        biodiversity,
                        dry_run,
                    },
            } => {
                assert_eq!(project, Some(2));
                assert_eq!(coords, "0 0, 1 0, 1 1");
                assert_eq!(carbon, Some(100.0));
                assert_eq!(biodiversity, None);
                assert!(dry_run);
            }
            _ => panic!("expected sites draw"),
        }
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::try_parse_from(["sitetrack", "sites", "list", "--format", "geojson"]).unwrap();
        assert_eq!(cli.format, OutputFormat::GeoJson);
    }
}
