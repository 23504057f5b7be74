//! Hierarchy command - show, edit and validate the word hierarchy

use anyhow::{Context, Result};
use phrase_tagger_adapters::hierarchy::FilesystemHierarchyStore;
use phrase_tagger_domain::usecases::{HierarchyEditor, category_label};
use phrase_tagger_domain::{Hierarchy, HierarchyStore};
use std::path::PathBuf;

use crate::args::{HierarchyArgs, HierarchyCommands};
use crate::config::AppConfig;

pub async fn execute(
    args: HierarchyArgs,
    config_path: Option<PathBuf>,
    hierarchy_path: Option<PathBuf>,
) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let store = FilesystemHierarchyStore::new(config.hierarchy_path(hierarchy_path.as_deref()));

    match args.command {
        HierarchyCommands::Show { json } => show_hierarchy(&store, json).await,
        HierarchyCommands::Add { category, word } => {
            edit_hierarchy(&store, &config, |editor, hierarchy| {
                let key = editor.add(hierarchy, &category, &word)?;
                Ok(format!("Added '{}' to {}", key, category_label(&category)))
            })
            .await
        }
        HierarchyCommands::Edit { category, old, new } => {
            edit_hierarchy(&store, &config, |editor, hierarchy| {
                let key = editor.rename(hierarchy, &category, &old, &new)?;
                Ok(format!("Renamed '{}' to '{}' in {}", old, key, category_label(&category)))
            })
            .await
        }
        HierarchyCommands::Delete { category, word } => {
            edit_hierarchy(&store, &config, |editor, hierarchy| {
                let key = editor.remove(hierarchy, &category, &word)?;
                Ok(format!("Deleted '{}' from {}", key, category_label(&category)))
            })
            .await
        }
        HierarchyCommands::Validate => validate_hierarchy(&store).await,
    }
}

async fn show_hierarchy(store: &FilesystemHierarchyStore, json: bool) -> Result<()> {
    let hierarchy = store.load_or_empty().await;

    if json {
        println!(
            "{}",
            hierarchy
                .to_json_pretty()
                .context("Failed to serialize hierarchy")?
        );
        return Ok(());
    }

    let title = format!(
        "Hierarchy ({} categories, depth {})",
        hierarchy.category_count(),
        hierarchy.max_depth()
    );
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));
    println!();

    if hierarchy.is_empty() {
        println!("(empty)");
    } else {
        print_tree(&hierarchy);
    }

    println!();
    println!("Fingerprint: {}", hierarchy.fingerprint());

    Ok(())
}

fn print_tree(hierarchy: &Hierarchy) {
    for (depth, key) in hierarchy.walk() {
        println!("{}{}", "  ".repeat(depth - 1), key);
    }
}

/// Load (falling back to empty), apply one edit, then save
async fn edit_hierarchy<F>(store: &FilesystemHierarchyStore, config: &AppConfig, edit: F) -> Result<()>
where
    F: FnOnce(&HierarchyEditor<'_>, &mut Hierarchy) -> Result<String>,
{
    let mut hierarchy = store.load_or_empty().await;
    let normalizer = config.build_normalizer();
    let editor = HierarchyEditor::new(&normalizer);

    let message = edit(&editor, &mut hierarchy)?;

    store
        .save(&hierarchy)
        .await
        .with_context(|| format!("Failed to save hierarchy to {}", store.path().display()))?;

    println!("{}", message);
    Ok(())
}

async fn validate_hierarchy(store: &FilesystemHierarchyStore) -> Result<()> {
    println!("Validating hierarchy: {}", store.path().display());

    match store.load().await {
        Ok(loaded) if loaded.ignored_paths.is_empty() => {
            println!(
                "✓ Validation passed ({} categories, depth {})",
                loaded.hierarchy.category_count(),
                loaded.hierarchy.max_depth()
            );
            Ok(())
        }
        Ok(loaded) => {
            eprintln!("✗ Validation failed: values must be JSON objects");
            for path in &loaded.ignored_paths {
                eprintln!("  - {}", path);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("✗ Validation failed: {}", e);
            std::process::exit(1);
        }
    }
}
