use crate::error::{PartIdError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// バッチ結果の既定ファイル名（スキャン対象から除外）
pub const REPORT_FILE_NAME: &str = "part-id-report.json";

#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: PathBuf,
    pub file_name: String,
}

const INPUT_EXTENSIONS: &[&str] = &["json", "JSON"];

/// フォルダ内の認識結果JSONを列挙（ファイル名順）
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<InputFile>> {
    if !folder.is_dir() {
        return Err(PartIdError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut inputs = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        // 隠しファイルと過去のバッチ結果は対象外
        if file_name.starts_with('.') || file_name == REPORT_FILE_NAME {
            continue;
        }

        if let Some(ext) = path.extension() {
            if is_input_extension(&ext.to_string_lossy()) {
                inputs.push(InputFile {
                    path: path.to_path_buf(),
                    file_name,
                });
            }
        }
    }

    inputs.sort_by(|a, b| a.file_name.cmp(&b.file_name).then_with(|| a.path.cmp(&b.path)));

    Ok(inputs)
}

fn is_input_extension(ext: &str) -> bool {
    INPUT_EXTENSIONS.contains(&ext)
}
