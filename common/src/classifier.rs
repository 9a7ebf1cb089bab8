//! カスケード分類器
//!
//! 戦略を優先順に評価し、信頼度が最も高い候補を採用する。
//! 採用した部品名からカテゴリ・価格帯・説明文を付与する。
//!
//! ## 採用ルール
//! - ラベル起点戦略が閾値を超えたら後続を評価しない
//! - それ以外は全候補のうち信頼度が厳密に最大のもの（同点は評価順）
//! - 最終的な信頼度は [0, 95] に収める

use crate::calibration::CalibrationConfig;
use crate::category::{CategoryTable, DEFAULT_PRICE_RANGE, GENERAL_CATEGORY};
use crate::description::describe;
use crate::features::{extract_features, Features};
use crate::strategy::{STRATEGIES, UNKNOWN_PART_NAME};
use crate::types::{
    Candidate, ClassificationReport, IdentificationResult, PerceptionResult, Strategy,
};

lazy_static::lazy_static! {
    static ref DEFAULT_CLASSIFIER: PartClassifier = PartClassifier::default();
}

/// 組み込みのカテゴリ表・較正値で分類
pub fn classify(perception: &PerceptionResult) -> IdentificationResult {
    DEFAULT_CLASSIFIER.classify(perception)
}

/// 部品分類器
///
/// 状態を持たないため、複数スレッドから同時に呼び出せる。
#[derive(Debug, Clone, Default)]
pub struct PartClassifier {
    table: CategoryTable,
    calibration: CalibrationConfig,
}

impl PartClassifier {
    pub fn new(table: CategoryTable, calibration: CalibrationConfig) -> Self {
        Self { table, calibration }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn calibration(&self) -> &CalibrationConfig {
        &self.calibration
    }

    /// 部品を特定する（入力が空でも必ず結果を返す）
    pub fn classify(&self, perception: &PerceptionResult) -> IdentificationResult {
        self.explain(perception).result
    }

    /// 部品を特定し、評価した候補の内訳も返す
    pub fn explain(&self, perception: &PerceptionResult) -> ClassificationReport {
        let features = extract_features(perception);
        let candidates = self.evaluate(&features);

        let winner = match pick_best(&candidates) {
            Some(candidate) => candidate.clone(),
            None => Candidate::new(
                Strategy::Fallback,
                UNKNOWN_PART_NAME,
                self.calibration.fallback_confidence,
            ),
        };
        let result = self.finalize(&winner, &features);

        tracing::debug!(
            strategy = %winner.strategy,
            part_name = %result.part_name,
            category = %result.category,
            confidence = result.confidence,
            "part identified"
        );

        ClassificationReport {
            result,
            winner: winner.strategy,
            candidates,
        }
    }

    /// 戦略を順に評価して候補を集める
    fn evaluate(&self, features: &Features) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (strategy, run) in STRATEGIES.iter() {
            let Some(candidate) = run(features, &self.table, &self.calibration) else {
                tracing::trace!(strategy = %strategy, "no candidate");
                continue;
            };

            tracing::debug!(
                strategy = %strategy,
                part_name = %candidate.part_name,
                confidence = candidate.confidence,
                "candidate"
            );

            let accepted = strategy
                .accept_threshold(&self.calibration)
                .is_some_and(|threshold| candidate.confidence > threshold);
            candidates.push(candidate);

            if accepted {
                break;
            }
        }

        candidates
    }

    /// 採用候補にカテゴリ・価格帯・説明文を付与
    fn finalize(&self, winner: &Candidate, features: &Features) -> IdentificationResult {
        let part_name = match winner.part_name.trim() {
            "" => UNKNOWN_PART_NAME.to_string(),
            name => name.to_string(),
        };

        // フォールバックは常に general
        let rule = match winner.strategy {
            Strategy::Fallback => None,
            _ => self.table.lookup(&part_name, &features.corpus),
        };

        let category = rule.map(|r| r.name.as_str()).unwrap_or(GENERAL_CATEGORY);
        let price_range = rule
            .map(|r| r.price_range.as_str())
            .unwrap_or(DEFAULT_PRICE_RANGE);
        let description = describe(
            rule.map(|r| r.description.as_str()),
            &part_name,
            &features.corpus,
            &self.calibration,
        );

        IdentificationResult {
            part_type: slugify(&part_name),
            category: title_case(category),
            price_range: price_range.to_string(),
            confidence: self.calibration.clamp(winner.confidence),
            description,
            part_name,
        }
    }
}

/// 信頼度が厳密に最大の候補（同点は先に評価したもの）
pub fn pick_best(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(b) if candidate.confidence <= b.confidence => Some(b),
        _ => Some(candidate),
    })
}

/// 小文字化し、空白の連続を `_` に置換
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// 各単語の先頭を大文字に
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
