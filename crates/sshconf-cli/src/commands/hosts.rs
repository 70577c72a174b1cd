//! Listing and editing hosts.

use sshconf_core::{Column, Record};

use crate::app::AppContext;
use crate::cli::{AddArgs, GetArgs, ListArgs, RemoveArgs, UpdateArgs};
use crate::commands::make::regenerate;
use crate::helpers::{prompt_record, RecordDraft};
use crate::output::{hosts_table, records_json};
use crate::ui::{badge, hint, print, receipt, Badge};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    show_hosts(ctx, args.keyword.as_deref(), args.json)
}

pub fn handle_get(ctx: &AppContext, args: &GetArgs) -> anyhow::Result<()> {
    show_hosts(ctx, Some(&args.keyword), args.json)
}

fn show_hosts(ctx: &AppContext, keyword: Option<&str>, json: bool) -> anyhow::Result<()> {
    let inventory = ctx.open_for_read()?;
    let records = inventory.list(keyword)?;

    let ui = ctx.ui_context(json);
    if ui.mode.is_json() {
        println!("{}", records_json(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        if !ctx.quiet() {
            let message = match keyword {
                Some(k) => format!("No hosts match \"{}\"", k),
                None => "No hosts yet".to_string(),
            };
            eprintln!("{}", badge(&ui, Badge::Warn, &message));
            eprintln!("{}", hint(&ui, "sshconf add HOST HOSTNAME"));
        }
        return Ok(());
    }

    print(&ui, &hosts_table(&ui, &records));
    Ok(())
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let inventory = ctx.open_unlocked(args.no_input)?;

    let draft = RecordDraft {
        host: args.host.clone(),
        host_name: args.host_name.clone(),
        port: args.port.clone(),
        user: args.user.clone(),
        password: args.host_password.clone(),
        name: args.name.clone(),
        desc: args.desc.clone(),
        enabled: args.disabled.then_some(false),
    };
    let missing_required = draft.host.is_none() || draft.host_name.is_none();
    let record = if missing_required && ctx.interactive(args.no_input) {
        prompt_record(draft)?
    } else {
        draft.into_record()?
    };

    let summary = summary_of(&record);
    inventory.add(record)?;
    let config = regenerate(ctx, &inventory)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false);
        let config_path = config.map(|p| p.display().to_string());
        let mut items: Vec<(&str, &str)> = summary.iter().map(|(k, v)| (*k, v.as_str())).collect();
        if let Some(path) = config_path.as_deref() {
            items.push(("SSH Config", path));
        }
        print(&ui, &receipt(&ui, "Added host", &items));
    }
    Ok(())
}

fn summary_of(record: &Record) -> Vec<(&'static str, String)> {
    vec![
        ("Host", record.host.clone()),
        ("HostName", record.host_name.clone()),
        ("Port", record.port.clone()),
        ("User", record.user.clone()),
    ]
}

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let inventory = ctx.open_unlocked(false)?;
    let removed = inventory.remove(&args.key)?;
    regenerate(ctx, &inventory)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false);
        print(
            &ui,
            &receipt(
                &ui,
                "Removed host",
                &[
                    ("Host", removed.host.as_str()),
                    ("HostName", removed.host_name.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

pub fn handle_update(ctx: &AppContext, args: &UpdateArgs) -> anyhow::Result<()> {
    let column: Column = args.column.parse()?;
    let inventory = ctx.open_unlocked(false)?;
    let count = inventory.update(&args.key, column, &args.value)?;
    regenerate(ctx, &inventory)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false);
        let count = count.to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Updated host",
                &[
                    ("Host", args.key.as_str()),
                    ("Column", column.as_str()),
                    ("Matched", count.as_str()),
                ],
            ),
        );
    }
    Ok(())
}
