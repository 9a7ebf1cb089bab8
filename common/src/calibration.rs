//! 信頼度の較正パラメータ
//!
//! 値は実測精度から導いたものではなく手調整の値。設定ファイルで上書きできる。

use serde::{Deserialize, Serialize};

/// 設定に関わらず超えない信頼度の上限
pub const CONFIDENCE_CEILING: f64 = 95.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalibrationConfig {
    /// 最終的な信頼度の上限（`CONFIDENCE_CEILING` 以下）
    pub max_confidence: f64,
    /// ラベル起点戦略の結果をそのまま採用する閾値（超過で採用）
    pub label_accept_threshold: f64,
    /// テキスト由来の部品名の基礎信頼度
    pub text_base_confidence: f64,
    /// 部品名に数字を含む場合の加点
    pub digit_bonus: f64,
    /// 部品名が `length_bonus_min_chars` 文字を超える場合の加点
    pub length_bonus: f64,
    pub length_bonus_min_chars: usize,
    /// 部品名がラベルにも現れる場合の加点
    pub label_agreement_bonus: f64,
    /// ラベル採用時の加点（score × 100 に加算）
    pub label_score_bonus: f64,
    /// テキストパターン戦略の固定信頼度
    pub text_pattern_confidence: f64,
    /// カテゴリ推定に必要な最小スコア（超過で採用）
    pub category_min_score: f64,
    pub category_bonus: f64,
    /// カテゴリ推定のみで到達できる信頼度の上限
    pub category_max_confidence: f64,
    /// フォールバックの固定信頼度
    pub fallback_confidence: f64,
    /// 説明文に引用するコーパスの最大文字数
    pub excerpt_chars: usize,
    /// 引用を付ける最小文字数（超過で付与）
    pub excerpt_min_chars: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            max_confidence: CONFIDENCE_CEILING,
            label_accept_threshold: 40.0,
            text_base_confidence: 65.0,
            digit_bonus: 10.0,
            length_bonus: 5.0,
            length_bonus_min_chars: 5,
            label_agreement_bonus: 10.0,
            label_score_bonus: 10.0,
            text_pattern_confidence: 60.0,
            category_min_score: 20.0,
            category_bonus: 15.0,
            category_max_confidence: 85.0,
            fallback_confidence: 25.0,
            excerpt_chars: 100,
            excerpt_min_chars: 10,
        }
    }
}

impl CalibrationConfig {
    /// 実際に適用する上限（0〜`CONFIDENCE_CEILING`）
    pub fn effective_max(&self) -> f64 {
        self.max_confidence.min(CONFIDENCE_CEILING).max(0.0)
    }

    /// [0, effective_max] に収めて小数1桁に丸める
    pub fn clamp(&self, confidence: f64) -> f64 {
        if !confidence.is_finite() {
            return 0.0;
        }
        let clamped = confidence.clamp(0.0, self.effective_max());
        (clamped * 10.0).round() / 10.0
    }
}
