//! 部品特定の4戦略
//!
//! 各戦略は特徴量から候補を1つ返すか、該当なしで `None` を返す純粋関数。
//! 評価順と採用ルールは `classifier` 側で扱う。

use crate::calibration::CalibrationConfig;
use crate::category::CategoryTable;
use crate::features::Features;
use crate::patterns::{self, PatternTier};
use crate::types::{Candidate, ScoredLabel, Strategy};

/// 何も抽出できなかった場合の部品名
pub const UNKNOWN_PART_NAME: &str = "Unknown Part";

/// 戦略関数の型
pub type StrategyFn = fn(&Features, &CategoryTable, &CalibrationConfig) -> Option<Candidate>;

/// 評価順の戦略一覧
pub const STRATEGIES: [(Strategy, StrategyFn); 4] = [
    (Strategy::LabelAnchored, label_anchored),
    (Strategy::TextPattern, text_pattern),
    (Strategy::CategoryKeyword, category_keyword),
    (Strategy::Fallback, fallback),
];

impl Strategy {
    /// この値を超えたら後続の戦略を評価せずに採用する
    pub fn accept_threshold(&self, calibration: &CalibrationConfig) -> Option<f64> {
        match self {
            Strategy::LabelAnchored => Some(calibration.label_accept_threshold),
            _ => None,
        }
    }
}

/// ラベル起点戦略
///
/// OCRテキストから部品名を抽出できればそれを使い、できなければ
/// 汎用語でない最上位ラベルを使う。
pub fn label_anchored(
    features: &Features,
    _table: &CategoryTable,
    calibration: &CalibrationConfig,
) -> Option<Candidate> {
    if let Some(found) = patterns::extract_part_name(&features.ocr_text) {
        let mut confidence = calibration.text_base_confidence;

        if found.text.chars().any(|c| c.is_ascii_digit()) {
            confidence += calibration.digit_bonus;
        }
        if found.text.chars().count() > calibration.length_bonus_min_chars {
            confidence += calibration.length_bonus;
        }
        let lower = found.text.to_lowercase();
        if features.label_texts().any(|label| label.contains(&lower)) {
            confidence += calibration.label_agreement_bonus;
        }

        let confidence = confidence.min(calibration.effective_max());
        return Some(
            Candidate::new(Strategy::LabelAnchored, found.text, confidence)
                .with_evidence(format!("ocr {}", found.tier)),
        );
    }

    let label = ranked_label(&features.labels)?;
    let confidence = sanitize_score(label.score) * 100.0 + calibration.label_score_bonus;

    Some(
        Candidate::new(Strategy::LabelAnchored, label.description.trim(), confidence)
            .with_evidence("label"),
    )
}

/// テキストパターン戦略（コーパス全体、固定信頼度）
pub fn text_pattern(
    features: &Features,
    _table: &CategoryTable,
    calibration: &CalibrationConfig,
) -> Option<Candidate> {
    let found = patterns::extract_part_name(&features.corpus)?;

    Some(
        Candidate::new(
            Strategy::TextPattern,
            found.text,
            calibration.text_pattern_confidence,
        )
        .with_evidence(found.tier.to_string()),
    )
}

/// カテゴリキーワード戦略
///
/// 正規化スコア最大のカテゴリが閾値を超えた場合のみ候補を返す。
/// カテゴリだけでは部品を特定できないため信頼度には上限がある。
pub fn category_keyword(
    features: &Features,
    table: &CategoryTable,
    calibration: &CalibrationConfig,
) -> Option<Candidate> {
    let label_text = features.label_texts().collect::<Vec<_>>().join(" ");
    let text = format!("{} {}", features.corpus, label_text);

    let (rule, score) = table.best_match(&text)?;
    if score <= calibration.category_min_score {
        return None;
    }

    let named_labels = || features.labels.iter().filter(|l| !l.description.trim().is_empty());
    let part_name = named_labels()
        .find(|l| rule.matches(&l.description.to_lowercase()))
        .or_else(|| ranked_label(&features.labels))
        .map(|l| l.description.trim().to_string())
        .or_else(|| rule.matched_keywords(&text).next().map(str::to_string))?;

    let confidence = (score + calibration.category_bonus).min(calibration.category_max_confidence);

    Some(
        Candidate::new(Strategy::CategoryKeyword, part_name, confidence)
            .with_evidence(format!("{} {:.1}", rule.name, score)),
    )
}

/// フォールバック（常に候補を返す）
pub fn fallback(
    features: &Features,
    _table: &CategoryTable,
    calibration: &CalibrationConfig,
) -> Option<Candidate> {
    let part_name = meaningful_label(&features.labels)
        .map(|l| l.description.trim().to_string())
        .or_else(|| {
            patterns::extract_with_tiers(&features.corpus, &[PatternTier::SingleWord])
                .map(|m| m.text)
        })
        .unwrap_or_else(|| UNKNOWN_PART_NAME.to_string());

    Some(Candidate::new(
        Strategy::Fallback,
        part_name,
        calibration.fallback_confidence,
    ))
}

/// 汎用語でない最上位ラベル
fn meaningful_label(labels: &[ScoredLabel]) -> Option<&ScoredLabel> {
    labels
        .iter()
        .filter(|l| !l.description.trim().is_empty())
        .find(|l| !patterns::is_generic_label(&l.description))
}

/// 汎用語でない最上位ラベル、すべて汎用語なら先頭ラベル
fn ranked_label(labels: &[ScoredLabel]) -> Option<&ScoredLabel> {
    meaningful_label(labels).or_else(|| labels.iter().find(|l| !l.description.trim().is_empty()))
}

/// 非有限・負のスコアは0として扱う
fn sanitize_score(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 {
        score
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract_features;
    use crate::types::PerceptionResult;

    fn features(labels: &[(&str, f64)], ocr: &str) -> Features {
        extract_features(&PerceptionResult {
            labels: labels.iter().map(|(d, s)| ScoredLabel::new(*d, *s)).collect(),
            objects: vec![],
            ocr_text: ocr.to_string(),
        })
    }

    fn run(f: StrategyFn, features: &Features) -> Option<Candidate> {
        f(features, CategoryTable::builtin(), &CalibrationConfig::default())
    }

    #[test]
    fn test_label_anchored_part_number_from_ocr() {
        let c = run(label_anchored, &features(&[], "BP12345")).unwrap();
        assert_eq!(c.part_name, "BP12345");
        // 65 + 数字10 + 長さ5
        assert_eq!(c.confidence, 80.0);
    }

    #[test]
    fn test_label_anchored_label_agreement_bonus() {
        let c = run(label_anchored, &features(&[("brake pad", 0.9)], "front brake pad")).unwrap();
        assert_eq!(c.part_name, "BRAKE PAD");
        // 65 + 長さ5 + ラベル一致10
        assert_eq!(c.confidence, 80.0);
    }

    #[test]
    fn test_label_anchored_text_capped() {
        let calibration = CalibrationConfig {
            text_base_confidence: 90.0,
            ..Default::default()
        };
        let f = features(&[("xk200b", 0.9)], "XK200B");
        let c = label_anchored(&f, CategoryTable::builtin(), &calibration).unwrap();
        assert_eq!(c.confidence, 95.0);
    }

    #[test]
    fn test_label_anchored_label_path() {
        let c = run(label_anchored, &features(&[("tire", 0.8)], "")).unwrap();
        assert_eq!(c.part_name, "tire");
        assert!((c.confidence - 90.0).abs() < 1e-9);
        assert_eq!(c.evidence.as_deref(), Some("label"));
    }

    #[test]
    fn test_label_anchored_skips_generic() {
        let f = features(&[("white", 0.95), ("rectangle", 0.9), ("hinge", 0.5)], "");
        let c = run(label_anchored, &f).unwrap();
        assert_eq!(c.part_name, "hinge");
        assert!((c.confidence - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_anchored_all_generic_uses_first() {
        let f = features(&[("white", 0.3), ("rectangle", 0.2)], "");
        let c = run(label_anchored, &f).unwrap();
        assert_eq!(c.part_name, "white");
        assert!((c.confidence - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_anchored_no_input() {
        assert!(run(label_anchored, &features(&[], "")).is_none());
    }

    #[test]
    fn test_label_anchored_bad_score() {
        let c = run(label_anchored, &features(&[("bolt", f64::NAN)], "")).unwrap();
        assert_eq!(c.confidence, 10.0);
    }

    #[test]
    fn test_text_pattern_fixed_confidence() {
        let c = run(text_pattern, &features(&[("tire", 0.8)], "")).unwrap();
        assert_eq!(c.part_name, "TIRE");
        assert_eq!(c.confidence, 60.0);
        assert_eq!(c.evidence.as_deref(), Some("single-word"));
    }

    #[test]
    fn test_text_pattern_none() {
        assert!(run(text_pattern, &features(&[], "")).is_none());
    }

    #[test]
    fn test_category_keyword() {
        let f = features(&[("chip", 0.6), ("circuit board", 0.5)], "");
        let c = run(category_keyword, &f).unwrap();
        assert_eq!(c.part_name, "chip");
        // 3/12 = 25 → 25 + 15
        assert!((c.confidence - 40.0).abs() < 1e-9);
        assert!(c.evidence.unwrap().starts_with("electronics"));
    }

    #[test]
    fn test_category_keyword_below_threshold() {
        assert!(run(category_keyword, &features(&[("tire", 0.8)], "")).is_none());
    }

    #[test]
    fn test_category_keyword_without_labels_uses_keyword() {
        let c = run(category_keyword, &features(&[], "circuit board chip")).unwrap();
        assert_eq!(c.part_name, "circuit");
    }

    #[test]
    fn test_category_keyword_name_skips_generic_label() {
        let f = extract_features(&PerceptionResult {
            labels: vec![ScoredLabel::new("white", 0.2), ScoredLabel::new("widget", 0.1)],
            objects: ["resistor", "capacitor", "transistor", "processor", "connector", "pcb", "usb"]
                .iter()
                .map(|n| crate::types::DetectedObject::new(*n, 0.5))
                .collect(),
            ocr_text: String::new(),
        });
        let c = run(category_keyword, &f).unwrap();
        assert_eq!(c.part_name, "widget");
        // 7/12 → 58.3 + 15
        assert!((c.confidence - 73.3).abs() < 0.1);
    }

    #[test]
    fn test_category_keyword_capped() {
        let f = features(
            &[("gear", 0.9)],
            "gear bearing spring screw bolt washer shaft pulley sprocket",
        );
        let c = run(category_keyword, &f).unwrap();
        assert_eq!(c.confidence, 85.0);
    }

    #[test]
    fn test_fallback_prefers_meaningful_label() {
        let c = run(fallback, &features(&[("white", 0.9), ("bracket", 0.1)], "")).unwrap();
        assert_eq!(c.part_name, "bracket");
        assert_eq!(c.confidence, 25.0);
    }

    #[test]
    fn test_fallback_single_word() {
        let c = run(fallback, &features(&[("white", 0.9)], "silver gasket")).unwrap();
        assert_eq!(c.part_name, "GASKET");
    }

    #[test]
    fn test_fallback_unknown() {
        let c = run(fallback, &features(&[], "")).unwrap();
        assert_eq!(c.part_name, UNKNOWN_PART_NAME);
        assert_eq!(c.strategy, Strategy::Fallback);
    }

    #[test]
    fn test_accept_threshold() {
        let calibration = CalibrationConfig::default();
        assert_eq!(Strategy::LabelAnchored.accept_threshold(&calibration), Some(40.0));
        assert_eq!(Strategy::TextPattern.accept_threshold(&calibration), None);
    }
}
