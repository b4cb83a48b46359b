use crate::config::ResolvedConfig;

use super::commands::FileReport;
use super::OutputFormat;

/// Summary for the rewrite command.
pub fn format_rewrite_summary(
    reports: &[FileReport],
    wrote: bool,
    format: &OutputFormat,
) -> String {
    let changed: Vec<&FileReport> = reports.iter().filter(|r| r.changed).collect();

    match format {
        OutputFormat::Json | OutputFormat::Compact => {
            let summary = serde_json::json!({
                "files_scanned": reports.len(),
                "files_changed": changed.len(),
                "wrote": wrote,
                "changed": changed.iter().map(|r| r.path.as_str()).collect::<Vec<_>>(),
            });
            if matches!(format, OutputFormat::Json) {
                serde_json::to_string_pretty(&summary).unwrap_or_default()
            } else {
                serde_json::to_string(&summary).unwrap_or_default()
            }
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for report in &changed {
                out.push_str(&format!(
                    "{} {}\n",
                    if wrote { "rewrote" } else { "would rewrite" },
                    report.path
                ));
            }
            out.push_str(&format!(
                "Scanned {} files, {} {}",
                reports.len(),
                changed.len(),
                if wrote { "rewritten" } else { "need rewriting" },
            ));
            out
        }
    }
}

/// Summary for the check command.
pub fn format_check_summary(reports: &[FileReport], format: &OutputFormat) -> String {
    let findings: Vec<&FileReport> = reports.iter().filter(|r| r.changed).collect();

    match format {
        OutputFormat::Json | OutputFormat::Compact => {
            let summary = serde_json::json!({
                "files_scanned": reports.len(),
                "files_with_aliases": findings.iter().map(|r| r.path.as_str()).collect::<Vec<_>>(),
            });
            if matches!(format, OutputFormat::Json) {
                serde_json::to_string_pretty(&summary).unwrap_or_default()
            } else {
                serde_json::to_string(&summary).unwrap_or_default()
            }
        }
        OutputFormat::Text => {
            if findings.is_empty() {
                format!("Scanned {} files, no aliased imports found", reports.len())
            } else {
                let mut out = String::new();
                for report in &findings {
                    out.push_str(&format!("{}\n", report.path));
                }
                out.push_str(&format!(
                    "{} of {} files contain aliased imports",
                    findings.len(),
                    reports.len()
                ));
                out
            }
        }
    }
}

/// The normalized alias table.
pub fn format_aliases(config: &ResolvedConfig, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Json | OutputFormat::Compact => {
            let entries: Vec<serde_json::Value> = config
                .aliases
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "prefix": entry.prefix,
                        "targets": entry.targets,
                    })
                })
                .collect();
            if matches!(format, OutputFormat::Json) {
                serde_json::to_string_pretty(&entries).unwrap_or_default()
            } else {
                serde_json::to_string(&entries).unwrap_or_default()
            }
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for entry in &config.aliases {
                out.push_str(&format!(
                    "{:<24} -> {}\n",
                    entry.prefix,
                    entry.targets.join(", ")
                ));
            }
            out.push_str(&format!("{} aliases", config.aliases.len()));
            out
        }
    }
}
