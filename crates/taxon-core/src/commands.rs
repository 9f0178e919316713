use std::io::{self, IsTerminal};

use anyhow::{Context, anyhow};
use chrono::Local;
use dialoguer::Confirm;
use taxon_model::{Category, CategoryKind, CategoryManager, KeyValueStore};
use tracing::{debug, info, instrument};

use crate::cli::Invocation;
use crate::config::Config;
use crate::render::Renderer;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "list", "add", "rename", "delete", "search", "show", "_commands", "help", "version",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

/// Per-run switches that do not live in the rc file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub assume_yes: bool,
}

#[instrument(skip(manager, cfg, renderer, inv))]
pub fn dispatch<S: KeyValueStore>(
    manager: &mut CategoryManager<S>,
    cfg: &Config,
    renderer: &mut Renderer,
    inv: Invocation,
    opts: RunOptions,
) -> anyhow::Result<()> {
    let command = inv.command.as_str();
    debug!(command, args = ?inv.command_args, "dispatching command");

    match command {
        "list" => cmd_list(manager, renderer, &inv.command_args),
        "add" => cmd_add(manager, renderer, &inv.command_args),
        "rename" => cmd_rename(manager, renderer, &inv.command_args),
        "delete" => cmd_delete(manager, cfg, renderer, &inv.command_args, opts),
        "search" => cmd_search(manager, renderer, &inv.command_args),
        "show" => cmd_show(cfg),
        "_commands" => cmd_commands(),
        "help" => cmd_help(),
        "version" => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}")),
    }
}

fn cmd_list<S: KeyValueStore>(
    manager: &CategoryManager<S>,
    renderer: &mut Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    let kinds = match args.first() {
        Some(raw) => vec![raw.parse::<CategoryKind>()?],
        None => CategoryKind::all().to_vec(),
    };

    renderer.print_date_header(Local::now())?;
    for kind in kinds {
        renderer.print_category_table(kind, &manager.rows(kind, ""))?;
    }
    Ok(())
}

fn cmd_search<S: KeyValueStore>(
    manager: &CategoryManager<S>,
    renderer: &mut Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    let query = args.join(" ");
    info!(query = %query, "command search");
    for kind in CategoryKind::all() {
        renderer.print_category_table(kind, &manager.rows(kind, &query))?;
    }
    Ok(())
}

fn cmd_add<S: KeyValueStore>(
    manager: &mut CategoryManager<S>,
    renderer: &mut Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command add");
    let (kind, rest) = split_kind(args, "add <status|priority> <name>")?;
    let notice = manager.add(kind, &rest.join(" "))?;
    renderer.print_notice(&notice)
}

/// Runs a full edit session in one step: begin, set the draft, save.
/// A rejected save abandons the edit so nothing is left half-done.
fn cmd_rename<S: KeyValueStore>(
    manager: &mut CategoryManager<S>,
    renderer: &mut Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command rename");
    let usage = "rename <status|priority> <id|name> <new name>";
    let (kind, rest) = split_kind(args, usage)?;
    let Some((target, new_name)) = rest.split_first() else {
        return Err(anyhow!("usage: {usage}"));
    };

    let id = resolve_id(manager, kind, target)?;
    manager.begin_edit(kind, &id)?;
    manager.update_draft(&new_name.join(" "))?;
    match manager.save_edit(kind, &id) {
        Ok(notice) => renderer.print_notice(&notice),
        Err(err) => {
            manager.cancel_all();
            Err(err.into())
        }
    }
}

fn cmd_delete<S: KeyValueStore>(
    manager: &mut CategoryManager<S>,
    cfg: &Config,
    renderer: &mut Renderer,
    args: &[String],
    opts: RunOptions,
) -> anyhow::Result<()> {
    info!("command delete");
    let (kind, rest) = split_kind(args, "delete <status|priority> <id|name>")?;
    let id = resolve_id(manager, kind, &rest.join(" "))?;

    let ask = !opts.assume_yes && cfg.get_bool("confirmation").unwrap_or(true);
    let mut prompt_error = None;
    let outcome = manager.delete(kind, &id, |category| {
        if !ask {
            return true;
        }
        match confirm_delete(category) {
            Ok(answer) => answer,
            Err(err) => {
                prompt_error = Some(err);
                false
            }
        }
    });

    if let Some(err) = prompt_error {
        return Err(err);
    }

    match outcome? {
        Some(notice) => renderer.print_notice(&notice),
        None => {
            println!("Nothing deleted.");
            Ok(())
        }
    }
}

fn cmd_show(cfg: &Config) -> anyhow::Result<()> {
    for (k, v) in cfg.iter() {
        println!("{k}={v}");
    }
    Ok(())
}

fn cmd_commands() -> anyhow::Result<()> {
    for command in known_command_names() {
        println!("{command}");
    }
    Ok(())
}

fn cmd_help() -> anyhow::Result<()> {
    println!("Commands:");
    println!("  list [status|priority]               show category tables");
    println!("  add <status|priority> <name>         add a category");
    println!("  rename <status|priority> <id|name> <new name>");
    println!("  delete <status|priority> <id|name>   delete after confirmation");
    println!("  search <text>                        filter both tables by name");
    println!("  show                                 print effective configuration");
    Ok(())
}

fn split_kind<'a>(args: &'a [String], usage: &str) -> anyhow::Result<(CategoryKind, &'a [String])> {
    let Some((kind, rest)) = args.split_first() else {
        return Err(anyhow!("usage: {usage}"));
    };
    if rest.is_empty() {
        return Err(anyhow!("usage: {usage}"));
    }
    Ok((kind.parse()?, rest))
}

fn resolve_id<S: KeyValueStore>(
    manager: &CategoryManager<S>,
    kind: CategoryKind,
    target: &str,
) -> anyhow::Result<String> {
    manager
        .resolve(kind, target)
        .map(|category| category.id.clone())
        .ok_or_else(|| anyhow!("no {kind} category matches {target:?}"))
}

fn confirm_delete(category: &Category) -> anyhow::Result<bool> {
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "refusing to delete without confirmation on a non-interactive stdin; \
             pass --yes or rc.confirmation=off"
        ));
    }

    Confirm::new()
        .with_prompt(format!(
            "Are you sure you want to delete the category \"{}\"?",
            category.name
        ))
        .default(false)
        .interact()
        .context("failed to read confirmation")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations_must_be_unique() {
        let known = known_command_names();
        assert_eq!(expand_command_abbrev("del", &known), Some("delete"));
        assert_eq!(expand_command_abbrev("list", &known), Some("list"));
        assert_eq!(expand_command_abbrev("s", &known), None);
        assert_eq!(expand_command_abbrev("se", &known), Some("search"));
        assert_eq!(expand_command_abbrev("zzz", &known), None);
    }

    #[test]
    fn split_kind_requires_a_value() {
        let args = vec!["prio".to_string()];
        assert!(split_kind(&args, "usage").is_err());

        let args = vec!["prio".to_string(), "Low".to_string()];
        let (kind, rest) = split_kind(&args, "usage").expect("split");
        assert_eq!(kind, CategoryKind::Priority);
        assert_eq!(rest, ["Low"]);
    }
}
