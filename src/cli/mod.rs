//! Command-line surface: run the HTTP API or diagnose a snapshot file.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::config;
use crate::handlers;
use crate::hierarchy::{build_entity_tree, hierarchy_path, Entity, EntityKind};
use crate::store::Registry;

#[derive(Parser)]
#[command(name = "church-admin-api")]
#[command(about = "Administrative API for unions, conferences, and churches")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API server")]
    Serve {
        #[arg(long, help = "Override the configured listen port")]
        port: Option<u16>,
    },

    #[command(about = "Diagnose a JSON snapshot file: dangling references, duplicates, orphans")]
    Check {
        #[arg(help = "Path to a JSON array of entities")]
        file: PathBuf,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => run_serve(port).await,
        Commands::Check { file } => run_check(&file),
    }
}

async fn run_serve(port_override: Option<u16>) -> Result<()> {
    let config = config::config();
    tracing::info!("Starting church-admin-api in {:?} mode", config.environment);

    let registry = Registry::new();
    let app = handlers::app(registry);

    let port = port_override.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", config.server.bind_address, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("church-admin-api listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server")?;
    Ok(())
}

/// Load a snapshot file and report every structural problem in it. Exits
/// non-zero (via the returned error) when any problem is found.
fn run_check(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let entities: Vec<Entity> =
        serde_json::from_str(&raw).context("snapshot is not a JSON array of entities")?;

    let mut problems: Vec<String> = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for entity in &entities {
        if !seen.insert(entity.id()) {
            problems.push(format!("duplicate id: {}", entity.id()));
        }
        if entity.name().trim().is_empty() {
            problems.push(format!("{} {} has an empty name", entity.kind(), entity.id()));
        }
    }

    let ids: HashSet<&str> = entities.iter().map(Entity::id).collect();
    for entity in &entities {
        if let Some(pid) = entity.parent_id() {
            if !ids.contains(pid) {
                problems.push(format!(
                    "{} {} references missing parent {}",
                    entity.kind(),
                    entity.id(),
                    pid
                ));
            }
        }
        // Redundant union_id on churches must agree with the parent conference
        if let Entity::Church(church) = entity {
            let parent_union = entities.iter().find_map(|e| match e {
                Entity::Conference(c) if c.id == church.conference_id => Some(&c.union_id),
                _ => None,
            });
            if let Some(parent_union) = parent_union {
                if *parent_union != church.union_id {
                    problems.push(format!(
                        "church {} carries union_id {} but its conference belongs to {}",
                        church.id, church.union_id, parent_union
                    ));
                }
            }
        }
    }

    // Shallow cycle guard: a resolvable parent whose own path already
    // contains this entity's id
    let by_id: HashMap<&str, &Entity> = entities.iter().map(|e| (e.id(), e)).collect();
    for entity in &entities {
        let parent = entity
            .parent_id()
            .and_then(|pid| by_id.get(pid).copied());
        if let Some(parent) = parent {
            if hierarchy_path(parent).contains(entity.id()) {
                problems.push(format!(
                    "{} {} is cyclically parented via {}",
                    entity.kind(),
                    entity.id(),
                    parent.id()
                ));
            }
        }
    }

    let forest = build_entity_tree(entities.clone());
    let orphans = forest.iter().filter(|n| n.level > 0).count();

    let count_of = |kind: EntityKind| entities.iter().filter(|e| e.kind() == kind).count();
    println!(
        "{}: {} unions, {} conferences, {} churches ({} roots, {} orphaned)",
        path.display(),
        count_of(EntityKind::Union),
        count_of(EntityKind::Conference),
        count_of(EntityKind::Church),
        forest.len(),
        orphans,
    );

    if problems.is_empty() {
        println!("snapshot is consistent");
        return Ok(());
    }
    for problem in &problems {
        println!("problem: {}", problem);
    }
    bail!("snapshot has {} problem(s)", problems.len())
}
