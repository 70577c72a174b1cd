//! Master password setup and rotation.

use secrecy::{ExposeSecret, SecretString};

use sshconf_core::{Inventory, SshconfError};

use crate::app::{supplied_password, AppContext};
use crate::cli::{InitArgs, PasswdArgs};
use crate::errors::CliError;
use crate::helpers::prompt_new_master_password;
use crate::ui::{print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let mut inventory = Inventory::open(ctx.paths()?);
    if inventory.gate().is_initialized()? {
        return Err(SshconfError::AlreadyInitialized.into());
    }

    let password = match supplied_password(ctx.cli()) {
        Some(password) => password,
        None if ctx.interactive(args.no_input) => prompt_new_master_password()?,
        None => {
            return Err(CliError::invalid_input(
                "No master password given; pass it with -p or set SSHCONFIG_PASSWORD",
            )
            .into())
        }
    };
    let sealed = inventory.initialize_password(password.expose_secret())?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false);
        let file = inventory.paths().password_file.display().to_string();
        let sealed = sealed.to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Master password set",
                &[("Password File", file.as_str()), ("Encrypted", sealed.as_str())],
            ),
        );
    }
    Ok(())
}

pub fn handle_passwd(ctx: &AppContext, args: &PasswdArgs) -> anyhow::Result<()> {
    let mut inventory = Inventory::open(ctx.paths()?);
    if !inventory.gate().is_initialized()? {
        return Err(SshconfError::NoMasterPassword.into());
    }
    let old = ctx.master_password(false)?;

    let new = match args.new_password.as_deref() {
        Some(value) => SecretString::from(value.to_string()),
        None if ctx.interactive(false) => prompt_new_master_password()?,
        None => return Err(CliError::invalid_input("NEW is required without a terminal").into()),
    };
    let resealed = inventory.rotate_password(new.expose_secret(), old.expose_secret())?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false);
        let resealed = resealed.to_string();
        print(
            &ui,
            &receipt(&ui, "Master password changed", &[("Re-encrypted", resealed.as_str())]),
        );
    }
    Ok(())
}
