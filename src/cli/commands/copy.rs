//! copy command - Copy a template into a container

use anyhow::Result;

use super::reported;
use super::workspace::{resolve_template, Workspace};
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Copy a visible template (own or inherited) into the container.
pub fn copy(ctx: &Context, container: u64, template: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let mut page = ws.page(ctx, container)?;
    let id = resolve_template(page.lineage(), template)?;

    let Some(created) = page.clone_template(id) else {
        return reported(false);
    };
    output::print(
        format!("{} ({})", created.name, created.id.short()),
        Verbosity::from_flags(ctx.quiet, ctx.debug),
    );
    Ok(())
}
