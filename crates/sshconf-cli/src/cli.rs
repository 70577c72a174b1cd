use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use sshconf_core::VERSION;

/// sshconf - keep SSH hosts in a table and generate ~/.ssh/config from it
#[derive(Parser)]
#[command(name = "sshconf")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the host table
    #[arg(short, long, global = true, env = "SSHCONF_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Master password
    #[arg(
        short,
        long,
        global = true,
        env = "SSHCONFIG_PASSWORD",
        hide_env_values = true,
        value_name = "PASSWORD"
    )]
    pub password: Option<String>,

    /// Path of the generated SSH client config
    #[arg(long, global = true, env = "SSHCONF_SSH_CONFIG", value_name = "PATH")]
    pub ssh_config: Option<PathBuf>,

    /// Do not regenerate the SSH config after add/remove/update
    #[arg(long, global = true)]
    pub no_make: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log output (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only hosts whose Host or Name contains this text
    #[arg(value_name = "KEYWORD")]
    pub keyword: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `get` command
#[derive(Args)]
pub struct GetArgs {
    /// Text to look for in Host and Name
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `make` command
#[derive(Args)]
pub struct MakeArgs {
    /// Print the rendered config instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

/// File opened by `open`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OpenTarget {
    /// The host table
    #[value(alias = "default")]
    Store,
    /// The generated SSH config
    Config,
}

/// Arguments for the `open` command
#[derive(Args)]
pub struct OpenArgs {
    /// Which file to open
    #[arg(short, long, value_enum, default_value_t = OpenTarget::Store)]
    pub target: OpenTarget,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Host alias (what you type after `ssh`)
    #[arg(value_name = "HOST")]
    pub host: Option<String>,

    /// Address or DNS name
    #[arg(value_name = "HOSTNAME")]
    pub host_name: Option<String>,

    /// SSH port
    #[arg(long)]
    pub port: Option<String>,

    /// Login user
    #[arg(long)]
    pub user: Option<String>,

    /// Password stored (encrypted) for this host
    #[arg(long, value_name = "PASSWORD")]
    pub host_password: Option<String>,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Description
    #[arg(long)]
    pub desc: Option<String>,

    /// Add the host commented out
    #[arg(long)]
    pub disabled: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    /// Exact Host of the entry to remove
    #[arg(value_name = "KEY")]
    pub key: String,
}

/// Arguments for the `update` command
#[derive(Args)]
pub struct UpdateArgs {
    /// Exact Host of the entries to update
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Column to change (Enabled, Name, Host, HostName, Port, User, Password, Desc)
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// New value
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for the `clean` command
#[derive(Args)]
pub struct CleanArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Only list the backups that would be removed
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `passwd` command
#[derive(Args)]
pub struct PasswdArgs {
    /// New master password (prompted for when omitted)
    #[arg(value_name = "NEW")]
    pub new_password: Option<String>,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print hosts
    #[command(visible_aliases = ["ls", "ps"])]
    List(ListArgs),

    /// Search Host and Name
    Get(GetArgs),

    /// Generate the SSH config from the host table
    Make(MakeArgs),

    /// Open the host table or SSH config in an editor
    Open(OpenArgs),

    /// Add a host
    #[command(visible_aliases = ["create", "new"])]
    Add(AddArgs),

    /// Remove a host
    #[command(visible_aliases = ["rm", "delete", "destroy"])]
    Remove(RemoveArgs),

    /// Change one column of a host
    Update(UpdateArgs),

    /// Delete all backups of the host table
    Clean(CleanArgs),

    /// Set the first master password
    Init(InitArgs),

    /// Change the master password
    #[command(visible_alias = "password")]
    Passwd(PasswdArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
