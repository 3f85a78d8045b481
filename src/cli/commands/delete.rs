//! delete command - Delete one of a container's templates

use anyhow::{bail, Result};

use super::reported;
use super::workspace::{resolve_template, Workspace};
use crate::engine::Context;

/// Delete a template owned by the container.
pub fn delete(ctx: &Context, container: u64, template: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let mut page = ws.page(ctx, container)?;
    let id = resolve_template(page.lineage(), template)?;

    if !page.select_template(id) {
        bail!("Template {} is not visible in container {}", id, container);
    }
    reported(page.delete_selected())
}
