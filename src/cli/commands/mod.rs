//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Opens the workspace and a management view of the target container
//! 3. Invokes one view action and reports the outcome
//!
//! Handlers do NOT change container state directly. A failed action has
//! already been reported through the notification sink and is returned as
//! [`Reported`](crate::cli::Reported).

mod completion;
mod config_cmd;
mod container;
mod copy;
mod default_cmd;
mod delete;
mod inherit;
mod init;
mod list;
mod setting;
mod template;
mod workspace;

pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use container::{add as container_add, list as container_list};
pub use copy::copy;
pub use default_cmd::{clear as default_clear, set as default_set};
pub use delete::delete;
pub use inherit::inherit;
pub use init::init;
pub use list::list;
pub use setting::{
    check as setting_check, get as setting_get, guides as setting_guides, list as setting_list,
};
pub use template::add as template_add;

use anyhow::Result;

use crate::cli::args::{
    Command, ConfigAction, ContainerAction, DefaultAction, SettingAction, TemplateAction,
};
use crate::cli::Reported;
use crate::engine::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init { owner } => init::init(ctx, owner.as_deref()),
        Command::Container { action } => match action {
            ContainerAction::Add {
                id,
                alias,
                parent,
                blocks,
            } => container::add(ctx, id, alias.as_deref(), parent, &blocks),
            ContainerAction::List => container::list(ctx),
        },
        Command::Template { action } => match action {
            TemplateAction::Add {
                container,
                name,
                fields,
            } => template::add(ctx, container, &name, &fields),
        },
        Command::List { container } => list::list(ctx, container),
        Command::Default { action } => match action {
            DefaultAction::Set {
                container,
                template,
            } => default_cmd::set(ctx, container, &template),
            DefaultAction::Clear { container } => default_cmd::clear(ctx, container),
        },
        Command::Copy {
            container,
            template,
        } => copy::copy(ctx, container, &template),
        Command::Delete {
            container,
            template,
        } => delete::delete(ctx, container, &template),
        Command::Inherit {
            container,
            enable,
            disable: _,
        } => inherit::inherit(ctx, container, enable),
        Command::Setting { action } => match action {
            SettingAction::Get { key, default } => setting::get(ctx, &key, default.as_deref()),
            SettingAction::Check { key, default_true } => {
                setting::check(ctx, &key, default_true)
            }
            SettingAction::Guides => setting::guides(ctx),
            SettingAction::List => setting::list(ctx),
        },
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Turn a view action's success flag into a command result.
fn reported(succeeded: bool) -> Result<()> {
    if succeeded {
        Ok(())
    } else {
        Err(Reported.into())
    }
}
