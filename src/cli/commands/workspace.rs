//! Shared workspace plumbing for command handlers.

use anyhow::{bail, Context as _, Result};

use crate::core::config::Config;
use crate::core::model::Lineage;
use crate::core::paths::WorkspacePaths;
use crate::core::store::JsonStore;
use crate::core::types::{ContainerId, TemplateId};
use crate::engine::{Actor, Context};
use crate::manage::ManageTemplates;
use crate::ui::notify::ConsoleSink;
use crate::ui::output::Verbosity;

/// Template management view over the workspace store.
pub type Page<'a> = ManageTemplates<&'a JsonStore, &'a JsonStore, ConsoleSink>;

/// An opened, initialized workspace.
pub struct Workspace {
    pub paths: WorkspacePaths,
    pub config: Config,
    pub store: JsonStore,
}

impl Workspace {
    /// Load config and open the store.
    pub fn open(ctx: &Context) -> Result<Self> {
        let paths = workspace_paths(ctx)?;
        let config = Config::load(Some(&paths)).context("Failed to load config")?;
        let store = JsonStore::open(&paths, config.store_path(&paths))
            .context("Failed to open store")?;
        Ok(Self {
            paths,
            config,
            store,
        })
    }

    /// The user commands are submitted as.
    pub fn actor(&self, ctx: &Context) -> Actor {
        ctx.resolve_actor(self.config.actor())
    }

    /// Console notification sink honoring flags and config.
    pub fn sink(&self, ctx: &Context) -> ConsoleSink {
        ConsoleSink::new(Verbosity::from_flags(ctx.quiet, ctx.debug))
            .quiet_info(self.config.quiet_info())
    }

    /// Open the management view of a container.
    pub fn page(&self, ctx: &Context, container: u64) -> Result<Page<'_>> {
        let page = ManageTemplates::open(
            &self.store,
            &self.store,
            self.sink(ctx),
            self.actor(ctx),
            ContainerId::new(container),
        )?;
        Ok(page)
    }
}

/// Workspace paths for the context's root.
pub fn workspace_paths(ctx: &Context) -> Result<WorkspacePaths> {
    let root = ctx.root().context("Failed to determine workspace root")?;
    Ok(WorkspacePaths::new(root))
}

/// Resolve a full template id or a unique id prefix among the templates
/// visible through `lineage`.
pub fn resolve_template(lineage: &Lineage, query: &str) -> Result<TemplateId> {
    if let Ok(id) = query.parse::<TemplateId>() {
        return Ok(id);
    }

    let query = query.to_ascii_lowercase();
    let mut matches = lineage
        .container
        .templates
        .iter()
        .chain(lineage.parent_templates())
        .filter(|t| t.id.to_string().starts_with(&query))
        .map(|t| t.id);

    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => bail!("No template matches '{}'", query),
        (Some(_), Some(_)) => bail!("Template id prefix '{}' is ambiguous", query),
    }
}
