//! Renamr CLI application entry point
//!
//! This is the main executable for the renamr batch rename engine. It wires
//! the command-line flags into the engine modules: scan, filter, transform,
//! preview, and the apply/undo executor.
//!
//! # Usage
//!
//! ```bash
//! # Preview only: strip digits, add a prefix, number the results
//! renamr run ~/photos --strip-digits -p IMG_ -n --pad 3 --dry-run
//!
//! # Apply a lowercase rename to all .JPG files, no confirmation prompt
//! renamr run ~/photos --ext ".jpg" --case lower -y
//!
//! # Move the matched files into a sorted folder
//! renamr run ~/inbox -m "*.pdf" --dest ~/docs
//!
//! # Reverse the last batch applied under a root
//! renamr undo ~/photos
//!
//! # Save the current flags as a reusable preset
//! renamr run ~/photos --strip-digits -n --save-preset camera
//! renamr run ~/photos --preset camera
//! ```
//!
//! Every applied batch leaves a CSV audit log and an undo script under
//! `<root>/.renamr/`.

use colored::Colorize;
use dialoguer::Confirm;

use renamr::cli::{
    snapshot_from_args, snapshot_to_run_config, AttributeArgs, Cli, Commands, FilterArgs,
    OutputArgs, PresetArgs, PresetCommands, ScanArgs, TransformArgs,
};
use renamr::exec::{self, ExecError};
use renamr::presets::{default_preset_path, PresetManager, PresetSnapshot};
use renamr::preview::{EntryStatus, Preview};
use renamr::session::Session;
use renamr::RenamrError;

use std::path::Path;

type Result<T> = std::result::Result<T, RenamrError>;

/// Prompt for yes/no confirmation, auto-confirming in quiet mode
fn confirm(prompt: &str, quiet: bool) -> Result<bool> {
    if quiet {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| RenamrError::InvalidInput(format!("Confirmation failed: {e}")))
}

/// Print one preview row with a colored status marker
fn print_entry(entry: &renamr::preview::PreviewEntry) {
    let old = entry.item.name.as_str();
    let new = entry.new_name.file_name();
    match entry.status {
        EntryStatus::Rename => {
            println!("  {} {old} -> {new}", "✓".green());
        }
        EntryStatus::Unchanged => {
            println!("  {} {old}", "=".dimmed());
        }
        EntryStatus::Conflict => {
            let note = entry.note.as_deref().unwrap_or("conflict");
            println!("  {} {old} -> {new}  ({note})", "✗".red());
        }
        EntryStatus::Error => {
            let note = entry.note.as_deref().unwrap_or("error");
            println!("  {} {old}  ({note})", "!".red());
        }
    }
}

/// Print the full preview with per-status counts
fn print_preview(preview: &Preview, quiet: bool) {
    if quiet {
        for entry in preview.renames() {
            println!(
                "{} -> {}",
                entry.item.full_path.display(),
                entry.target_path.display()
            );
        }
        return;
    }

    println!("{}", "=== Preview ===".bold());
    for entry in &preview.entries {
        print_entry(entry);
    }

    let renames = preview.count_with(EntryStatus::Rename);
    let unchanged = preview.count_with(EntryStatus::Unchanged);
    let conflicts = preview.count_with(EntryStatus::Conflict);
    let errors = preview.count_with(EntryStatus::Error);
    println!();
    println!("  {renames} to rename, {unchanged} unchanged");
    if conflicts > 0 {
        println!("  {} {conflicts}", "Conflicts:".red());
    }
    if errors > 0 {
        println!("  {} {errors}", "Errors:".red());
    }
}

/// Resolve the run configuration, from a preset or from the parsed flags
///
/// When `--preset` is given the saved snapshot replaces the scan, filter,
/// transform, and output flags entirely. `--save-preset` persists whichever
/// snapshot ends up being used.
fn resolve_snapshot(
    scan: &ScanArgs,
    filter: &FilterArgs,
    transform: &TransformArgs,
    output: &OutputArgs,
    preset: &PresetArgs,
    quiet: bool,
) -> Result<PresetSnapshot> {
    let snapshot = if let Some(name) = &preset.preset {
        let manager = PresetManager::new(default_preset_path()?);
        let loaded = manager.get(name)?;
        if !quiet {
            println!("Using preset '{name}'");
        }
        loaded.snapshot
    } else {
        snapshot_from_args(scan, filter, transform, output)
    };

    if let Some(name) = &preset.save_preset {
        let manager = PresetManager::new(default_preset_path()?);
        let description = preset.preset_desc.clone().unwrap_or_default();
        manager.save(name, description, snapshot.clone())?;
        if !quiet {
            println!("Saved preset '{name}'");
        }
    }

    Ok(snapshot)
}

/// Handle the run command - preview and apply one rename batch
///
/// Builds the preview, prints it, and (unless `--dry-run`) applies it after
/// confirmation. A blocked preview is never applied.
///
/// # Errors
///
/// Returns `RenamrError` if the root cannot be scanned, a named preset does
/// not exist, or the apply step fails outright.
#[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
fn handle_run(
    root: &Path,
    scan: &ScanArgs,
    filter: &FilterArgs,
    transform: &TransformArgs,
    output: &OutputArgs,
    attrs: &AttributeArgs,
    preset: &PresetArgs,
    dry_run: bool,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let snapshot = resolve_snapshot(scan, filter, transform, output, preset, quiet)?;
    let (scan_options, filter_spec, transform_config, preview_options) =
        snapshot_to_run_config(&snapshot);

    let build = renamr::filter::FilterConfig::build(&filter_spec);
    let mut session = Session::new(root);
    let (preview, mut warnings) = session.build_preview(
        &scan_options,
        &build.config,
        &transform_config,
        &preview_options,
    )?;
    warnings.extend(build.warnings);

    if !quiet {
        for warning in &warnings {
            eprintln!("{} {warning}", "⚠".yellow());
        }
    }

    if preview.entries.is_empty() {
        if !quiet {
            println!("No matching items under {}", root.display());
        }
        return Ok(());
    }

    print_preview(preview, quiet);

    if preview.is_blocked() {
        if !quiet {
            println!(
                "\n{}",
                "Batch blocked: resolve the conflicts above and run again.".red()
            );
        }
        return Err(RenamrError::Exec(ExecError::PreviewBlocked {
            conflicts: preview.count_with(EntryStatus::Conflict),
            errors: preview.count_with(EntryStatus::Error),
        }));
    }

    if dry_run {
        if !quiet {
            println!("\nDry run: nothing applied.");
        }
        return Ok(());
    }

    let to_apply = preview.count_with(EntryStatus::Rename);
    if to_apply == 0 {
        if !quiet {
            println!("Nothing to apply.");
        }
        return Ok(());
    }

    if !yes && !confirm(&format!("Apply {to_apply} operation(s)?"), quiet)? {
        if !quiet {
            println!("Cancelled.");
        }
        return Ok(());
    }

    let outcome = session.apply(&attrs.to_options())?;
    if !quiet {
        outcome.summary.print("Rename");
        if let Some(path) = &outcome.audit_path {
            println!("Audit log: {}", path.display());
        }
        if let Some(path) = &outcome.undo_script_path {
            println!("Undo script: {}", path.display());
        }
    }

    Ok(())
}

/// Handle the undo command - reverse the latest batch under a root
///
/// Loads the most recent unconsumed audit log, reverses its operations, and
/// marks the log consumed. Undo is single-shot per batch.
///
/// # Errors
///
/// Returns `RenamrError` if no audit log exists under the root or the log is
/// malformed.
fn handle_undo(root: &Path, yes: bool, quiet: bool) -> Result<()> {
    let (audit_path, records) = exec::read_latest_audit(root)?;

    if !quiet {
        println!(
            "Found batch of {} operation(s): {}",
            records.len(),
            audit_path.display()
        );
    }

    if !yes && !confirm("Undo this batch?", quiet)? {
        if !quiet {
            println!("Cancelled.");
        }
        return Ok(());
    }

    let summary = exec::undo(&records);
    exec::mark_consumed(&audit_path)?;

    if quiet {
        if summary.failed > 0 {
            eprintln!("{} of {} operations failed", summary.failed, summary.attempted);
        }
    } else {
        summary.print();
    }

    Ok(())
}

/// Handle the preset command - save, list, show, and delete presets
///
/// # Errors
///
/// Returns `RenamrError` if the preset storage cannot be read or the named
/// preset does not exist.
fn handle_preset(command: &PresetCommands, quiet: bool) -> Result<()> {
    let manager = PresetManager::new(default_preset_path()?);

    match command {
        PresetCommands::Save {
            name,
            description,
            scan,
            filter,
            transform,
            output,
        } => {
            let snapshot = snapshot_from_args(scan, filter, transform, output);
            manager.save(name, description.clone().unwrap_or_default(), snapshot)?;
            if !quiet {
                println!("Saved preset '{name}'");
            }
        }
        PresetCommands::List => {
            let presets = manager.list()?;
            if presets.is_empty() {
                if !quiet {
                    println!("No presets saved.");
                    println!("Save one with: renamr run ... --save-preset <name>");
                }
                return Ok(());
            }
            for preset in presets {
                if quiet {
                    println!("{}", preset.name);
                } else if preset.description.is_empty() {
                    println!("  {}", preset.name.bold());
                } else {
                    println!("  {} - {}", preset.name.bold(), preset.description);
                }
            }
        }
        PresetCommands::Show { name } => {
            let preset = manager.get(name)?;
            if !quiet {
                println!("{}", preset.name.bold());
                if !preset.description.is_empty() {
                    println!("{}", preset.description);
                }
                println!("Created: {}", preset.created.format("%Y-%m-%d %H:%M"));
                println!();
            }
            let rendered = toml::to_string_pretty(&preset.snapshot)
                .map_err(renamr::presets::PresetError::from)?;
            println!("{rendered}");
        }
        PresetCommands::Delete { name, force } => {
            // Fail before prompting when the name does not exist.
            manager.get(name)?;
            if !force && !confirm(&format!("Delete preset '{name}'?"), quiet)? {
                if !quiet {
                    println!("Cancelled.");
                }
                return Ok(());
            }
            manager.delete(name)?;
            if !quiet {
                println!("Deleted preset '{name}'");
            }
        }
    }

    Ok(())
}

/// Main entry point for the renamr application
///
/// Parses command-line arguments and dispatches to the appropriate command
/// handler.
///
/// # Errors
///
/// Returns `RenamrError` if any command handler fails.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let quiet = cli.quiet;

    match &cli.command {
        Commands::Run {
            root,
            scan,
            filter,
            transform,
            output,
            attrs,
            preset,
            dry_run,
            yes,
        } => handle_run(
            root, scan, filter, transform, output, attrs, preset, *dry_run, *yes, quiet,
        ),
        Commands::Undo { root, yes } => handle_undo(root, *yes, quiet),
        Commands::Preset { command } => handle_preset(command, quiet),
    }
}
