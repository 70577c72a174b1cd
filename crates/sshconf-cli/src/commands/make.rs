//! Generating the SSH client config.

use std::path::PathBuf;

use sshconf_core::Inventory;

use crate::app::AppContext;
use crate::cli::MakeArgs;
use crate::ui::{print, receipt};

pub fn handle_make(ctx: &AppContext, args: &MakeArgs) -> anyhow::Result<()> {
    let inventory = ctx.open_unlocked(false)?;

    if args.stdout {
        print!("{}", inventory.render_ssh_config()?);
        return Ok(());
    }

    let path = inventory.write_ssh_config()?;
    if !ctx.quiet() {
        let ui = ctx.ui_context(false);
        let target = path.display().to_string();
        print(&ui, &receipt(&ui, "Wrote SSH config", &[("Path", target.as_str())]));
    }
    Ok(())
}

/// Rewrite the SSH config after a change to the host table, unless
/// `--no-make` was given.
pub fn regenerate(ctx: &AppContext, inventory: &Inventory) -> anyhow::Result<Option<PathBuf>> {
    if ctx.cli().no_make {
        tracing::debug!("skipping ssh config regeneration");
        return Ok(None);
    }
    Ok(Some(inventory.write_ssh_config()?))
}
