// SPDX-License-Identifier: MIT OR Apache-2.0
//! Event-surface scanner: regex-based detection of event-emission call
//! sites.

use std::path::Path;

use async_trait::async_trait;
use serde_json::json;
use wd_core::ScannerOutput;
use wd_error::{ErrorCode, WdError};
use wd_scanners_core::{Scanner, ScannerOptions};

const SCANNED_EXTENSIONS: &[&str] = &["py", "js", "ts", "go", "rs", "java"];
const DEFAULT_EXCLUDES: &[&str] = &["target", "node_modules", ".git", "dist", "build"];

/// A candidate event-emission call site within a single file.
struct Match {
    line: usize,
    pattern: String,
    line_content: String,
}

fn find_matches(content: &str, patterns: &[String]) -> Vec<Match> {
    let mut matches = Vec::new();
    for pattern in patterns {
        let mut search_from = 0;
        while let Some(pos) = content[search_from..].find(pattern.as_str()) {
            let abs_pos = search_from + pos;
            let line = content[..abs_pos].matches('\n').count() + 1;
            let line_start = content[..abs_pos].rfind('\n').map_or(0, |i| i + 1);
            let line_end = content[abs_pos..].find('\n').map_or(content.len(), |i| abs_pos + i);
            let line_content = content[line_start..line_end].trim().to_string();
            matches.push(Match {
                line,
                pattern: pattern.clone(),
                line_content,
            });
            search_from = abs_pos + pattern.len().max(1);
        }
    }
    matches
}

fn guess_transport(line: &str) -> &'static str {
    let lower = line.to_lowercase();
    if lower.contains("ws.") || lower.contains("websocket") || lower.contains("socket") {
        "websocket"
    } else if lower.contains("http") || lower.contains("post") || lower.contains("fetch") || lower.contains("axios") {
        "http"
    } else if lower.contains("redis") {
        "redis"
    } else if lower.contains("publish") || lower.contains("emit") {
        "inproc.publish"
    } else {
        "unknown"
    }
}

fn guess_lane(event_name: &str, transport: &str) -> &'static str {
    if event_name.starts_with("crown://") {
        "crown"
    } else if event_name.starts_with("core.") || event_name.starts_with("agent.") || event_name.starts_with("system.") {
        "federation"
    } else if transport == "websocket" || transport == "http" {
        "network"
    } else if event_name.contains('.') && !event_name.contains(' ') {
        "federation"
    } else {
        "local"
    }
}

/// Guess the event name a matched line refers to, and a confidence score,
/// using a three-tier heuristic: `crown://` URIs first, quoted string
/// literals next, a truncated dynamic-expression fallback last.
fn classify_event(line_content: &str) -> Option<(String, f64)> {
    if line_content.contains("crown://") {
        let start = line_content.find("crown://")?;
        let rest = &line_content[start..];
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || "/._-:".contains(c)))
            .unwrap_or(rest.len());
        return Some((rest[..end].to_string(), 0.95));
    }

    if let Some(literal) = first_strict_string_literal(line_content) {
        if literal.len() > 3 {
            return Some((literal, 0.85));
        }
    }

    let truncated: String = line_content.chars().take(30).collect();
    Some((format!("dynamic:{truncated}..."), 0.5))
}

/// Finds the first quoted literal containing only alphanumerics, dots,
/// colons, underscores, and dashes.
fn first_strict_string_literal(line: &str) -> Option<String> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let quote = bytes[i];
        if quote == b'"' || quote == b'\'' {
            if let Some(end_offset) = line[i + 1..].find(quote as char) {
                let candidate = &line[i + 1..i + 1 + end_offset];
                if !candidate.is_empty()
                    && candidate
                        .chars()
                        .all(|c| c.is_alphanumeric() || "_.:-".contains(c))
                {
                    return Some(candidate.to_string());
                }
                i += 1 + end_offset + 1;
                continue;
            }
        }
        i += 1;
    }
    None
}

/// Scans source files for string/URI patterns that look like event
/// emission call sites, classifying each by a confidence score and a
/// guessed transport/lane.
pub struct EventSurfaceScanner;

#[async_trait]
impl Scanner for EventSurfaceScanner {
    async fn scan(&self, target: &Path, options: &ScannerOptions) -> Result<ScannerOutput, WdError> {
        let patterns: Vec<String> = match options.get("patterns").and_then(|v| v.as_array()) {
            Some(values) => values.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
            None => Vec::new(),
        };
        if patterns.is_empty() {
            return Ok(ScannerOutput::new("static.events", Vec::new()));
        }

        let files = if target.is_file() {
            vec![target.to_path_buf()]
        } else if target.is_dir() {
            collect_source_files(target)
        } else {
            return Err(WdError::new(
                ErrorCode::IoTargetUnavailable,
                format!("target does not exist: {}", target.display()),
            )
            .with_context("target", target.display().to_string()));
        };

        let mut items = Vec::new();
        for file in files {
            let Ok(content) = std::fs::read_to_string(&file) else {
                continue;
            };
            for found in find_matches(&content, &patterns) {
                let Some((event_guess, confidence)) = classify_event(&found.line_content) else {
                    continue;
                };
                if event_guess.contains("\\w") || event_guess.contains("group(") || event_guess.contains('[') {
                    continue;
                }
                let transport = guess_transport(&found.line_content);
                let lane = guess_lane(&event_guess, transport);
                let file_name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                let project = file
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                items.push(json!({
                    "surface_id": format!("{file_name}:{}", found.line),
                    "file": file.display().to_string(),
                    "line": found.line,
                    "pattern": found.pattern,
                    "match": found.line_content,
                    "event_guess": event_guess,
                    "lane": lane,
                    "transport": transport,
                    "confidence": confidence,
                    "project": project,
                }));
            }
        }

        Ok(ScannerOutput::new("static.events", items))
    }
}

fn collect_source_files(root: &Path) -> Vec<std::path::PathBuf> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            !entry
                .file_name()
                .to_str()
                .is_some_and(|name| DEFAULT_EXCLUDES.contains(&name))
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SCANNED_EXTENSIONS.contains(&ext))
        })
        .map(|entry| entry.into_path())
        .collect()
}
