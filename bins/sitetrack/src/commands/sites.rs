//! Site boundary commands: list, draw, show

use crate::commands::wkt::{parse_coords, print_measures};
use crate::context::{AppContext, OutputFormat};
use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use sitetrack_api_client::endpoints::sites::{MetricSummary, SiteMetrics};
use sitetrack_cli::output::{format_area, format_count, format_metric, Status};
use sitetrack_cli::progress;
use sitetrack_geo::geodesic_area_m2;
use sitetrack_session::{BoundarySession, SiteBoundary};

/// Arguments of `sites draw`
pub struct DrawArgs {
    pub project: Option<i64>,
    pub coords: String,
    pub carbon: Option<f64>,
    pub biodiversity: Option<f64>,
    pub dry_run: bool,
}

impl DrawArgs {
    fn metrics(&self) -> SiteMetrics {
        SiteMetrics {
            carbon: self.carbon,
            biodiversity: self.biodiversity,
        }
    }
}

#[derive(Serialize)]
struct SkippedSite {
    id: i64,
    error: String,
}

#[derive(Serialize)]
struct SiteListing<'a> {
    sites: &'a [SiteBoundary],
    skipped: Vec<SkippedSite>,
}

/// `sites list`
pub async fn list(ctx: &AppContext, project: Option<i64>) -> Result<()> {
    let credentials = ctx.credentials()?;
    let project = ctx.project(project);
    let session = BoundarySession::new(ctx.client()?);

    let pb = progress::spinner("Fetching sites...");
    let summary = match session.load_boundaries(credentials.as_ref(), project).await {
        Ok(summary) => summary,
        Err(e) => {
            progress::finish_error(&pb, "Failed to fetch sites");
            return Err(e.into());
        }
    };
    progress::finish_clear(&pb);

    match ctx.format {
        OutputFormat::GeoJson => {
            let collection = session.feature_collection().await;
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
        OutputFormat::Json => {
            let boundaries = session.boundaries().await;
            let listing = SiteListing {
                sites: &boundaries,
                skipped: summary
                    .skipped
                    .iter()
                    .map(|s| SkippedSite {
                        id: s.id,
                        error: s.error.to_string(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Text => {
            let boundaries = session.boundaries().await;
            let title = match project {
                Some(id) => format!(
                    "{} in project #{id}",
                    format_count(summary.rendered, "site", "sites")
                ),
                None => format_count(summary.rendered, "site", "sites"),
            };
            Status::header(&title);
            for boundary in &boundaries {
                print_boundary_row(boundary);
            }
        }
    }

    for skipped in &summary.skipped {
        Status::warning(&format!(
            "Site #{} not shown: {}",
            skipped.id, skipped.error
        ));
    }
    Ok(())
}

fn print_boundary_row(boundary: &SiteBoundary) {
    let metrics = boundary.metrics.unwrap_or_default();
    println!(
        "  {:<6} project {:<4} {:>4} vertices  {:>10}  carbon {:<6} biodiversity {}",
        format!("#{}", boundary.id).bold(),
        boundary.project_id,
        boundary.ring.len(),
        format_area(geodesic_area_m2(&boundary.ring)),
        format_metric(metrics.carbon),
        format_metric(metrics.biodiversity),
    );
}

/// `sites draw`
pub async fn draw(ctx: &AppContext, args: DrawArgs) -> Result<()> {
    let ring = parse_coords(&args.coords)?;
    let session = BoundarySession::new(ctx.client()?);
    let pending = session.on_shape_drawn(ring)?;

    if args.dry_run {
        if ctx.format == OutputFormat::Text {
            println!("{}", pending.wkt());
            print_measures(pending.ring());
        } else {
            println!("{}", serde_json::to_string_pretty(&pending)?);
        }
        return Ok(());
    }

    let project = ctx.project(args.project).ok_or_else(|| {
        anyhow!("No project given. Pass --project or set session.default_project in sitetrack.toml")
    })?;
    let credentials = ctx.credentials()?;

    let pb = progress::spinner("Saving polygon...");
    let boundary = match session
        .submit_pending(credentials.as_ref(), project, args.metrics())
        .await
    {
        Ok(boundary) => boundary,
        Err(e) => {
            progress::finish_error(&pb, "Failed to save polygon");
            return Err(e.into());
        }
    };
    progress::finish_clear(&pb);

    if ctx.format == OutputFormat::Text {
        Status::success(&format!(
            "Saved site #{} in project #{}",
            boundary.id, boundary.project_id
        ));
        Status::field("WKT", &boundary.wkt);
        print_measures(&boundary.ring);
    } else {
        println!("{}", serde_json::to_string_pretty(&boundary)?);
    }
    Ok(())
}

/// `sites show <id>`
pub async fn show(ctx: &AppContext, id: i64) -> Result<()> {
    let credentials = ctx.require_credentials()?;
    let client = ctx.client()?;

    let pb = progress::spinner("Fetching site...");
    let details = match client.sites().details(&credentials, id).await {
        Ok(details) => details,
        Err(e) => {
            progress::finish_error(&pb, "Failed to fetch site");
            return Err(e.into());
        }
    };
    progress::finish_clear(&pb);

    if ctx.format != OutputFormat::Text {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    let metrics = details.site.parsed_metrics().unwrap_or_default();

    Status::header(&format!("Site #{}", details.site.id));
    Status::field("Project", &format!("#{}", details.site.project_id));
    Status::field("Carbon", &format_metric(metrics.carbon));
    Status::field("Biodiversity", &format_metric(metrics.biodiversity));

    match SiteBoundary::from_record(details.site.clone()) {
        Ok(boundary) => print_measures(&boundary.ring),
        Err(e) => Status::warning(&format!("Boundary not decodable: {e}")),
    }

    if details.analytics.is_empty() {
        Status::info("No analytics yet");
        return Ok(());
    }

    Status::header("Analytics");
    for point in details.chronological() {
        println!(
            "  {:<12} carbon {:>10}  biodiversity {:>10}",
            point.date,
            point.carbon,
            point.biodiversity
        );
    }

    println!();
    if let Some(summary) = details.carbon_summary() {
        Status::field("Carbon stats", &summary_line(summary));
    }
    if let Some(summary) = details.biodiversity_summary() {
        Status::field("Biodiv. stats", &summary_line(summary));
    }
    if let Some(latest) = details.latest() {
        Status::field("Latest", &latest.date);
    }
    Ok(())
}

fn summary_line(summary: MetricSummary) -> String {
    format!(
        "min {:.2}  max {:.2}  mean {:.2}",
        summary.min, summary.max, summary.mean
    )
}
