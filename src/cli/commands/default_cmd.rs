//! default command - Set or clear a container's default template

use anyhow::Result;

use super::reported;
use super::workspace::{resolve_template, Workspace};
use crate::engine::Context;

/// Make a template the container's default.
pub fn set(ctx: &Context, container: u64, template: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let mut page = ws.page(ctx, container)?;
    let id = resolve_template(page.lineage(), template)?;
    reported(page.make_default(id))
}

/// Remove the container's default template.
pub fn clear(ctx: &Context, container: u64) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let mut page = ws.page(ctx, container)?;
    reported(page.unselect_default())
}
