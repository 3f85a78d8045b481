//! template command - Create templates

use anyhow::{bail, Context as _, Result};
use chrono::Utc;

use super::reported;
use super::workspace::Workspace;
use crate::core::model::Template;
use crate::core::types::{ContainerId, TemplateName};
use crate::engine::{Command, CommandExecutor, Context};
use crate::ui::output::{self, Verbosity};

/// Create a template in a container.
pub fn add(ctx: &Context, container: u64, name: &str, fields: &[String]) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let name = TemplateName::new(name).context("Invalid template name")?;
    let owner = ContainerId::new(container);

    let mut template = Template::new(name, owner, Utc::now());
    for field in fields {
        let (key, value) = parse_field(field)?;
        template = template.with_field(key, value);
    }

    let command = Command::CreateTemplate {
        container: owner,
        template,
    };
    match ws.store.submit(&ws.actor(ctx), command) {
        Ok(outcome) => {
            if let Some(created) = outcome.into_template() {
                output::print(
                    format!("Created template {} ({})", created.name, created.id.short()),
                    Verbosity::from_flags(ctx.quiet, ctx.debug),
                );
            }
            Ok(())
        }
        Err(e) => {
            output::error(&e);
            reported(false)
        }
    }
}

/// Split a `KEY=VALUE` argument.
fn parse_field(field: &str) -> Result<(&str, &str)> {
    match field.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("Invalid field '{}', expected KEY=VALUE", field),
    }
}
