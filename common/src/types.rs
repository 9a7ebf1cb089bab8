//! 部品特定の入出力型定義
//!
//! - PerceptionResult: 画像認識プロバイダの出力（ラベル・物体・OCR）
//! - IdentificationResult: 分類エンジンの最終出力
//! - Candidate: 各戦略が返す候補

use serde::{Deserialize, Serialize};

/// スコア付きラベル（画像全体の分類ラベル）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoredLabel {
    pub description: String,
    pub score: f64,
}

impl ScoredLabel {
    pub fn new(description: impl Into<String>, score: f64) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// 物体検出（バウンディングボックス）の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectedObject {
    pub name: String,
    pub score: f64,
}

impl DetectedObject {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// 画像認識プロバイダの出力
///
/// どのフィールドも省略可能。`labels` の順序は認識信頼度の順。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerceptionResult {
    pub labels: Vec<ScoredLabel>,

    #[serde(alias = "localizedObjects")]
    pub objects: Vec<DetectedObject>,

    #[serde(alias = "text", alias = "fullText")]
    pub ocr_text: String,
}

impl PerceptionResult {
    /// ラベル・物体・OCRがすべて空か
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.objects.is_empty() && self.ocr_text.trim().is_empty()
    }
}

/// 部品特定結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    pub part_type: String,    // 正規化スラッグ
    pub part_name: String,    // 表示名
    pub category: String,     // カテゴリ（先頭大文字）
    pub price_range: String,  // 価格帯（表示用の目安）
    pub confidence: f64,      // 0〜95
    pub description: String,  // 説明文
}

impl IdentificationResult {
    /// 信頼度が業務閾値を下回るか
    pub fn is_uncertain(&self, threshold: f64) -> bool {
        self.confidence < threshold
    }
}

/// 分類戦略（評価順 = 同点時の優先順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    LabelAnchored,
    TextPattern,
    CategoryKeyword,
    Fallback,
}

impl Strategy {
    pub const ORDER: [Strategy; 4] = [
        Strategy::LabelAnchored,
        Strategy::TextPattern,
        Strategy::CategoryKeyword,
        Strategy::Fallback,
    ];
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::LabelAnchored => write!(f, "label-anchored"),
            Strategy::TextPattern => write!(f, "text-pattern"),
            Strategy::CategoryKeyword => write!(f, "category-keyword"),
            Strategy::Fallback => write!(f, "fallback"),
        }
    }
}

/// 戦略が返す候補
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub strategy: Strategy,
    pub part_name: String,
    pub confidence: f64,
    /// 候補の根拠（一致したパターン階層・カテゴリ名など）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Candidate {
    pub fn new(strategy: Strategy, part_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            strategy,
            part_name: part_name.into(),
            confidence,
            evidence: None,
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}

/// 分類の内訳（最終結果と評価した全候補）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationReport {
    pub result: IdentificationResult,
    pub winner: Strategy,
    pub candidates: Vec<Candidate>,
}
