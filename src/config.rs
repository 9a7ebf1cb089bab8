use crate::error::{PartIdError, Result};
use part_id_common::{CalibrationConfig, CategoryTable, PartClassifier, CONFIDENCE_CEILING};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// カテゴリ表ファイルを上書きする環境変数
pub const CATEGORIES_ENV: &str = "PART_ID_CATEGORIES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// カスタムカテゴリ表（JSON）。未設定なら組み込み表
    pub categories_file: Option<PathBuf>,
    /// この信頼度未満の結果を「不確実」とする
    pub uncertain_threshold: f64,
    pub calibration: CalibrationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories_file: None,
            uncertain_threshold: 40.0,
            calibration: CalibrationConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PartIdError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("part-id").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        let max = self.calibration.max_confidence;
        if !(0.0..=CONFIDENCE_CEILING).contains(&max) {
            return Err(PartIdError::Config(format!(
                "maxConfidence は 0〜{} で指定してください: {}",
                CONFIDENCE_CEILING, max
            )));
        }
        if !self.uncertain_threshold.is_finite() || self.uncertain_threshold < 0.0 {
            return Err(PartIdError::Config(format!(
                "uncertainThreshold が不正です: {}",
                self.uncertain_threshold
            )));
        }
        Ok(())
    }

    /// 有効なカテゴリ表ファイル（環境変数を優先）
    pub fn categories_path(&self) -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CATEGORIES_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        self.categories_file.clone()
    }

    /// 有効なカテゴリ表を読み込む
    pub fn category_table(&self) -> Result<CategoryTable> {
        match self.categories_path() {
            Some(path) => {
                if !path.exists() {
                    return Err(PartIdError::FileNotFound(path.display().to_string()));
                }
                tracing::debug!(path = %path.display(), "loading category table");
                Ok(CategoryTable::from_file(&path)?)
            }
            None => Ok(CategoryTable::default()),
        }
    }

    pub fn build_classifier(&self) -> Result<PartClassifier> {
        Ok(PartClassifier::new(
            self.category_table()?,
            self.calibration.clone(),
        ))
    }

    pub fn set_categories_file(&mut self, path: PathBuf) -> Result<()> {
        // 保存前に読み込めることを確認
        CategoryTable::from_file(&path)?;
        self.categories_file = Some(path);
        self.save()
    }

    pub fn set_uncertain_threshold(&mut self, threshold: f64) -> Result<()> {
        self.uncertain_threshold = threshold;
        self.validate()?;
        self.save()
    }
}
