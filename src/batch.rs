//! 一括分類
//!
//! フォルダ内の認識結果JSONを並列に分類し、結果をレポートにまとめる。

use crate::error::{PartIdError, Result};
use crate::scanner::{self, InputFile};
use indicatif::{ProgressBar, ProgressStyle};
use part_id_common::{IdentificationResult, PartClassifier, PerceptionResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 1ファイル分の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub file_name: String,
    pub result: IdentificationResult,
    /// 信頼度が閾値未満
    pub uncertain: bool,
}

/// 一括分類レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub generated_at: String,
    pub total: usize,
    pub uncertain_count: usize,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn new(entries: Vec<BatchEntry>) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            total: entries.len(),
            uncertain_count: entries.iter().filter(|e| e.uncertain).count(),
            entries,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// 認識結果JSONを読み込む
pub fn read_perception(path: &Path) -> Result<PerceptionResult> {
    if !path.is_file() {
        return Err(PartIdError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| PartIdError::InputParse {
        path: path.display().to_string(),
        source,
    })
}

/// ファイル群を並列に分類（結果は入力順）
pub fn classify_files(
    files: &[InputFile],
    classifier: &PartClassifier,
    uncertain_threshold: f64,
    progress: Option<&ProgressBar>,
) -> Result<Vec<BatchEntry>> {
    files
        .par_iter()
        .map(|file| {
            let perception = read_perception(&file.path)?;
            let result = classifier.classify(&perception);

            if let Some(pb) = progress {
                pb.inc(1);
            }

            Ok(BatchEntry {
                file_name: file.file_name.clone(),
                uncertain: result.is_uncertain(uncertain_threshold),
                result,
            })
        })
        .collect()
}

/// フォルダを一括分類
pub fn run_batch(
    folder: &Path,
    recursive: bool,
    classifier: &PartClassifier,
    uncertain_threshold: f64,
    show_progress: bool,
) -> Result<BatchReport> {
    let files = scanner::scan_folder(folder, recursive)?;
    if files.is_empty() {
        return Err(PartIdError::NoInputsFound(folder.display().to_string()));
    }
    tracing::info!(count = files.len(), folder = %folder.display(), "classifying perception files");

    let progress = show_progress.then(|| progress_bar(files.len() as u64));
    let entries = classify_files(&files, classifier, uncertain_threshold, progress.as_ref())?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let report = BatchReport::new(entries);
    tracing::info!(
        total = report.total,
        uncertain = report.uncertain_count,
        "batch classification finished"
    );

    Ok(report)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}
