//! sshconf CLI - keep SSH hosts in a table and generate ~/.ssh/config
//!
//! This is the command-line interface for sshconf. It provides a user-friendly
//! interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{hosts, maintenance, make, misc, password};
use crate::constants::LOG_ENV;
use crate::errors::classify;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false);
        let (code, hint) = classify(&e);
        print_error(&ui_ctx, &format!("{:#}", e), hint.as_deref());
        std::process::exit(code);
    }
}

/// Install the stderr subscriber. `SSHCONF_LOG` wins over `-v`.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::List(args)) => hosts::handle_list(ctx, args)?,
        Some(Commands::Get(args)) => hosts::handle_get(ctx, args)?,
        Some(Commands::Make(args)) => make::handle_make(ctx, args)?,
        Some(Commands::Open(args)) => maintenance::handle_open(ctx, args)?,
        Some(Commands::Add(args)) => hosts::handle_add(ctx, args)?,
        Some(Commands::Remove(args)) => hosts::handle_remove(ctx, args)?,
        Some(Commands::Update(args)) => hosts::handle_update(ctx, args)?,
        Some(Commands::Clean(args)) => maintenance::handle_clean(ctx, args)?,
        Some(Commands::Init(args)) => password::handle_init(ctx, args)?,
        Some(Commands::Passwd(args)) => password::handle_passwd(ctx, args)?,
        Some(Commands::Completions(args)) => misc::handle_completions(args)?,
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
