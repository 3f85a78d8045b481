//! list command - Show a container's effective template list

use anyhow::Result;

use super::workspace::Workspace;
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Show the templates visible in a container.
///
/// An empty list is reported by the view itself when it opens.
pub fn list(ctx: &Context, container: u64) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let page = ws.page(ctx, container)?;
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);

    let current = page.container();
    output::print(
        output::format_container(current.id, &current.alias),
        verbosity,
    );
    if page.inherit_value() {
        output::print("  inherits templates from its parent", verbosity);
    } else if page.inherit_allowed() {
        output::print("  inheritance root (may inherit from its parent)", verbosity);
    }

    for view in page.templates() {
        println!(
            "{}",
            output::format_template_row(&view, view.is_default_of(current))
        );
    }
    Ok(())
}
