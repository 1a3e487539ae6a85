//! Project listing and creation

use crate::context::{AppContext, OutputFormat};
use anyhow::Result;
use owo_colors::OwoColorize;
use sitetrack_cli::output::{format_count, Status};
use sitetrack_cli::progress;

/// `projects list`
pub async fn list(ctx: &AppContext) -> Result<()> {
    let credentials = ctx.require_credentials()?;
    let client = ctx.client()?;

    let pb = progress::spinner("Fetching projects...");
    let projects = match client.projects().list(&credentials).await {
        Ok(projects) => projects,
        Err(e) => {
            progress::finish_error(&pb, "Failed to fetch projects");
            return Err(e.into());
        }
    };
    progress::finish_clear(&pb);

    if ctx.format != OutputFormat::Text {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    Status::header(&format_count(projects.len(), "project", "projects"));
    for project in &projects {
        match project.id {
            Some(id) => println!("  {} {}", format!("#{id}").dimmed(), project.name),
            None => println!("  {}", project.name),
        }
    }
    Ok(())
}

/// `projects create <name>`
pub async fn create(ctx: &AppContext, name: &str) -> Result<()> {
    let credentials = ctx.require_credentials()?;
    let client = ctx.client()?;

    let pb = progress::spinner("Creating project...");
    let project = match client.projects().create(&credentials, name).await {
        Ok(project) => project,
        Err(e) => {
            progress::finish_error(&pb, "Failed to create project");
            return Err(e.into());
        }
    };
    progress::finish_clear(&pb);

    if ctx.format != OutputFormat::Text {
        println!("{}", serde_json::to_string_pretty(&project)?);
        return Ok(());
    }

    match project.id {
        Some(id) => Status::success(&format!("Created project {} (#{id})", project.name)),
        None => Status::success(&format!("Created project {}", project.name)),
    }
    Ok(())
}
