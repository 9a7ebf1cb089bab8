//! Part ID Common Library
//!
//! 画像認識結果（ラベル・物体・OCR）から部品を特定する分類エンジン。
//! CLIやサービス層から同一プロセス内で呼び出す。

pub mod types;
pub mod error;
pub mod features;
pub mod patterns;
pub mod category;
pub mod calibration;
pub mod strategy;
pub mod description;
pub mod classifier;

pub use types::{
    Candidate, ClassificationReport, DetectedObject, IdentificationResult, PerceptionResult,
    ScoredLabel, Strategy,
};
pub use error::{Error, Result};
pub use features::{extract_features, Features};
pub use category::{CategoryRule, CategoryTable};
pub use calibration::{CalibrationConfig, CONFIDENCE_CEILING};
pub use classifier::{classify, PartClassifier};
