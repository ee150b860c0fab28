//! Resolve, select and show commands

use std::path::Path;

use choice_content::{ChoiceGroup, OptionKind, SelectionResolver};
use colored::Colorize;

use super::{open_document, parse_path, render_value};
use crate::error::Result;

/// Print the resolved selection chain of `group`
pub fn run_resolve(file: &Path, group: &str, json: bool) -> Result<()> {
    let document = open_document(file)?;
    let chain = SelectionResolver::new(&document).resolve(parse_path(group)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chain)?);
        return Ok(());
    }
    for value in &chain {
        println!("{}", render_value(value));
    }
    Ok(())
}

/// Select `option` in `group`
pub fn run_select(file: &Path, group: &str, option: &str) -> Result<()> {
    let document = open_document(file)?;
    let group_path = parse_path(group)?;

    SelectionResolver::new(&document).select(group_path.clone(), option)?;
    println!(
        "{} {} -> {}",
        "Selected".green().bold(),
        group_path.to_string().cyan(),
        option
    );
    Ok(())
}

/// Show one group, or every top-level group
pub fn run_show(file: &Path, group: Option<&str>, json: bool) -> Result<()> {
    let document = open_document(file)?;
    let groups = match group {
        Some(group) => vec![document.choice_group(parse_path(group)?)?],
        None => document.choice_groups()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }
    if groups.is_empty() {
        println!("{}", "No choice groups".dimmed());
        return Ok(());
    }
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_group(group);
    }
    Ok(())
}

fn print_group(group: &ChoiceGroup) {
    let selected = group.selection.as_deref();
    match selected {
        Some(selection) => println!(
            "{} {}",
            group.key.to_string().bold(),
            format!("(selected: {selection})").dimmed()
        ),
        None => println!(
            "{} {}",
            group.key.to_string().bold(),
            "(no selection)".yellow()
        ),
    }

    for option in &group.options {
        let is_selected = selected == Some(option.key.as_str());
        let marker = if is_selected { "*".green() } else { " ".normal() };
        let key = if is_selected {
            option.key.green()
        } else {
            option.key.normal()
        };

        match &option.kind {
            OptionKind::Terminal { value } => {
                println!("  {} {} = {}", marker, key, render_value(value));
            }
            OptionKind::Nested {
                value,
                selection,
                options,
            } => {
                let own = value
                    .as_ref()
                    .map(render_value)
                    .unwrap_or_else(|| "?".to_string());
                let inner = selection.as_deref().unwrap_or("-");
                println!(
                    "  {} {} = {} [{}] {}",
                    marker,
                    key,
                    own,
                    options.join(", "),
                    format!("(selected: {inner})").dimmed()
                );
            }
        }
    }

    if let Some(selection) = selected {
        if group.option(selection).is_none() {
            println!(
                "  {} selection '{}' names no option",
                "!".red().bold(),
                selection
            );
        }
    }
}
