//! 説明文の生成
//!
//! カテゴリごとのテンプレート文に、検出テキストの抜粋を付け加える。

use crate::calibration::CalibrationConfig;
use crate::category::DEFAULT_DESCRIPTION;

/// 説明文を生成
///
/// # Arguments
/// * `template` - `{name}` / `{a_name}` を含むカテゴリの説明文（`None` なら汎用文）
/// * `part_name` - 部品名
/// * `corpus` - 特徴抽出後のコーパス
pub fn describe(
    template: Option<&str>,
    part_name: &str,
    corpus: &str,
    calibration: &CalibrationConfig,
) -> String {
    let template = template.unwrap_or(DEFAULT_DESCRIPTION);
    let mut description = template
        .replace("{a_name}", &with_article(part_name))
        .replace("{name}", part_name);

    let excerpt = excerpt(corpus, calibration.excerpt_chars);
    if excerpt.chars().count() > calibration.excerpt_min_chars {
        description.push_str(&format!(" Detected features: \"{}\".", excerpt));
    }

    description
}

/// 不定冠詞を付ける（母音字で始まれば an）
fn with_article(part_name: &str) -> String {
    let article = match part_name.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{} {}", article, part_name)
}

/// 先頭 `max_chars` 文字（文字境界で切る）
fn excerpt(corpus: &str, max_chars: usize) -> &str {
    let corpus = corpus.trim();
    match corpus.char_indices().nth(max_chars) {
        Some((idx, _)) => corpus[..idx].trim_end(),
        None => corpus,
    }
}
