//! Doctor command - validate configuration and show status

use anyhow::Result;
use phrase_tagger_adapters::hierarchy::FilesystemHierarchyStore;
use phrase_tagger_domain::HierarchyStore;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    hierarchy: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(
    args: DoctorArgs,
    config_path: Option<PathBuf>,
    hierarchy_path: Option<PathBuf>,
) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        hierarchy: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
            None
        }
    };

    if let Some(ref config) = config {
        let path = config.hierarchy_path(hierarchy_path.as_deref());
        report.hierarchy = check_hierarchy(&path).await;
    }

    // Determine overall status
    let checks = [&report.config, &report.hierarchy];

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

async fn check_hierarchy(path: &Path) -> CheckResult {
    let store = FilesystemHierarchyStore::new(path);

    match store.load().await {
        Ok(loaded) => {
            let hierarchy = &loaded.hierarchy;
            let details = serde_json::json!({
                "path": path.display().to_string(),
                "categories": hierarchy.category_count(),
                "depth": hierarchy.max_depth(),
                "fingerprint": hierarchy.fingerprint(),
                "ignored_paths": loaded.ignored_paths,
            });

            if !loaded.ignored_paths.is_empty() {
                CheckResult::warn(format!(
                    "{} categories loaded, {} non-object values ignored",
                    hierarchy.category_count(),
                    loaded.ignored_paths.len()
                ))
                .with_details(details)
            } else if hierarchy.is_empty() {
                CheckResult::warn("Hierarchy is empty; every phrase will classify as 0")
                    .with_details(details)
            } else {
                CheckResult::ok(format!(
                    "{} categories loaded (depth {})",
                    hierarchy.category_count(),
                    hierarchy.max_depth()
                ))
                .with_details(details)
            }
        }
        Err(e) => CheckResult::error(format!("Failed to load hierarchy: {}", e)),
    }
}

fn print_report(report: &DoctorReport) {
    println!("phrase-tagger Doctor Report");
    println!("===========================");
    println!();

    print_check("Config", &report.config);
    print_check("Hierarchy", &report.hierarchy);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall == "ok" {
        println!();
        println!("Ready to classify! Try: phrase-tagger classify --depth 3 --phrase \"...\"");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
