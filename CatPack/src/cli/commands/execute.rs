//! Command execution implementations

use super::Commands;
use super::{config, create, export, info, list, locales, merge};
use crate::cli::CliContext;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, context: &CliContext) -> anyhow::Result<()> {
        match self {
            Commands::Info { library } => info::execute(library, context),
            Commands::List {
                library,
                sort,
                descending,
                filter,
                locale,
            } => list::execute(
                library,
                *sort,
                *descending,
                filter.as_deref(),
                locale.as_deref(),
                context,
            ),
            Commands::Create {
                source,
                destination,
                family,
                category,
                width,
                height,
                depth,
                creator,
                name,
            } => create::execute(
                source,
                destination,
                &create::CreateOptions {
                    family: family.unwrap_or(context.preferences.default_family),
                    category: category.clone(),
                    width: *width,
                    height: *height,
                    depth: *depth,
                    creator: creator
                        .clone()
                        .or_else(|| context.preferences.default_creator.clone()),
                    name: name.clone(),
                },
                context,
            ),
            Commands::Merge {
                destination,
                libraries,
            } => merge::execute(destination, libraries, context),
            Commands::Export {
                source,
                destination,
                offline,
                resources_dir,
                remote_base,
                match_names,
            } => export::execute(
                source,
                destination,
                &export::ExportOptions {
                    offline: *offline,
                    resources_dir: resources_dir.clone(),
                    remote_base: remote_base.clone(),
                    match_names: *match_names,
                },
                context,
            ),
            Commands::Locales => locales::execute(),
            Commands::Config {
                offline,
                match_names,
                resources_dir,
                remote_base,
                clear_external,
                creator,
                family,
            } => config::execute(
                &config::PreferenceChanges {
                    offline: *offline,
                    match_names: *match_names,
                    resources_dir: resources_dir.clone(),
                    remote_base: remote_base.clone(),
                    clear_external: *clear_external,
                    creator: creator.clone(),
                    family: *family,
                },
                context,
            ),
        }
    }
}
