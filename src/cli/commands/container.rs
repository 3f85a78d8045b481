//! container command - Register and list containers

use anyhow::{Context as _, Result};

use super::workspace::Workspace;
use crate::core::model::Container;
use crate::core::types::{BlockName, ContainerId};
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Register a new container.
pub fn add(
    ctx: &Context,
    id: u64,
    alias: Option<&str>,
    parent: Option<u64>,
    blocks: &[String],
) -> Result<()> {
    let ws = Workspace::open(ctx)?;

    let blocks = blocks
        .iter()
        .map(|b| BlockName::new(b.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid metadata block")?;

    let id = ContainerId::new(id);
    let alias = alias.map_or_else(|| format!("container-{}", id), str::to_string);
    let mut container = Container::new(id, alias).with_blocks(blocks);
    if let Some(parent) = parent {
        container = container.with_owner(ContainerId::new(parent));
    }

    ws.store
        .add_container(container)
        .context("Failed to add container")?;

    output::print(
        format!("Added container {}", id),
        Verbosity::from_flags(ctx.quiet, ctx.debug),
    );
    Ok(())
}

/// List all containers.
pub fn list(ctx: &Context) -> Result<()> {
    let ws = Workspace::open(ctx)?;

    for container in ws.store.containers() {
        let parent = container
            .owner
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        let blocks: Vec<&str> = container.metadata_blocks.iter().map(|b| b.as_str()).collect();
        println!(
            "{:<6} {:<20} parent {:<6} inherit {:<5} templates {:<3} blocks [{}]",
            container.id,
            container.alias,
            parent,
            container.inherit_templates,
            container.templates.len(),
            blocks.join(", ")
        );
    }
    Ok(())
}
