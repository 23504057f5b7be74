//! Classify command - one-shot phrase classification

use anyhow::{Context, Result};
use phrase_tagger_adapters::hierarchy::FilesystemHierarchyStore;
use phrase_tagger_domain::HierarchyStore;
use phrase_tagger_domain::usecases::{PhraseClassifier, TimingReport, render_tally};
use std::path::PathBuf;
use std::time::Instant;

use crate::args::ClassifyArgs;
use crate::config::AppConfig;

pub async fn execute(
    args: ClassifyArgs,
    config_path: Option<PathBuf>,
    hierarchy_path: Option<PathBuf>,
) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let path = config.hierarchy_path(hierarchy_path.as_deref());

    // Load a fresh snapshot for this run
    let load_started = Instant::now();
    let store = FilesystemHierarchyStore::new(&path);
    let loaded = store
        .load()
        .await
        .with_context(|| format!("Failed to load hierarchy from {}", path.display()))?;
    let load_elapsed = load_started.elapsed();

    // Negative depths visit nothing
    let max_depth = usize::try_from(args.depth).unwrap_or(0);

    tracing::info!(
        categories = loaded.hierarchy.category_count(),
        max_depth,
        phrase_length = args.phrase.len(),
        "Classifying phrase"
    );

    let normalizer = config.build_normalizer();
    let classifier = PhraseClassifier::new(&normalizer);

    let verify_started = Instant::now();
    let tally = classifier.classify(&args.phrase, &loaded.hierarchy, max_depth);
    let verify_elapsed = verify_started.elapsed();

    if args.verbose {
        let timings = TimingReport {
            load: load_elapsed,
            verify: verify_elapsed,
        };
        for line in timings.lines() {
            println!("{}", line);
        }
    }

    if args.json {
        let json = serde_json::to_string(&tally).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        println!("{}", render_tally(&tally));
    }

    Ok(())
}
