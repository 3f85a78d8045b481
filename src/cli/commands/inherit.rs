//! inherit command - Toggle template inheritance

use anyhow::Result;

use super::reported;
use super::workspace::Workspace;
use crate::engine::Context;

/// Turn template inheritance on (`enable`) or off for a container.
pub fn inherit(ctx: &Context, container: u64, enable: bool) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let mut page = ws.page(ctx, container)?;
    reported(page.update_templates_root(enable))
}
