//! Backups and editor access.

use sshconf_core::Inventory;

use crate::app::AppContext;
use crate::cli::{CleanArgs, OpenArgs, OpenTarget};
use crate::helpers::open_in_editor;
use crate::ui::{print, receipt};

pub fn handle_clean(ctx: &AppContext, args: &CleanArgs) -> anyhow::Result<()> {
    let inventory = Inventory::open(ctx.paths()?);
    let backups = inventory.backups()?;
    let ui = ctx.ui_context(false);

    if args.dry_run {
        for path in &backups {
            println!("{}", path.display());
        }
        return Ok(());
    }

    if backups.is_empty() {
        if !ctx.quiet() {
            eprintln!("No backups to remove");
        }
        return Ok(());
    }

    if !args.yes && ctx.interactive(false) && !ctx.quiet() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete {} backup file(s)?", backups.len()))
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Clean cancelled"));
        }
    }

    let removed = inventory.clean_backups()?;
    if !ctx.quiet() {
        let removed = removed.to_string();
        print(&ui, &receipt(&ui, "Removed backups", &[("Count", removed.as_str())]));
    }
    Ok(())
}

pub fn handle_open(ctx: &AppContext, args: &OpenArgs) -> anyhow::Result<()> {
    let inventory = Inventory::open(ctx.paths()?);
    let path = match args.target {
        OpenTarget::Store => {
            // creates the header-only table on first use
            inventory.records()?;
            inventory.paths().store.clone()
        }
        OpenTarget::Config => inventory.paths().ssh_config.clone(),
    };

    let editor = open_in_editor(&path, ctx.editor()?)?;
    tracing::info!(editor = %editor, path = %path.display(), "opened in editor");
    Ok(())
}
