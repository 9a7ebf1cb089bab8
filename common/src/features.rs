//! 特徴抽出
//!
//! ラベル・物体名・OCRテキストを1つの小文字コーパスにまとめる。

use crate::types::{PerceptionResult, ScoredLabel};

/// 分類器への入力特徴
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Features {
    /// ラベル→物体名→OCRの順に連結した小文字テキスト
    pub corpus: String,
    /// コーパスのうちOCR由来の部分（小文字）
    pub ocr_text: String,
    /// 元の順序のままのラベル
    pub labels: Vec<ScoredLabel>,
}

impl Features {
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// 小文字化したラベル文字列を順に返す
    pub fn label_texts(&self) -> impl Iterator<Item = String> + '_ {
        self.labels.iter().map(|l| l.description.trim().to_lowercase())
    }
}

/// 認識結果から特徴を抽出する
///
/// 全ソースが空でも失敗せず、空のコーパスを返す。
pub fn extract_features(perception: &PerceptionResult) -> Features {
    let ocr_text = collapse_whitespace(&perception.ocr_text.to_lowercase());

    let corpus = perception
        .labels
        .iter()
        .map(|l| l.description.as_str())
        .chain(perception.objects.iter().map(|o| o.name.as_str()))
        .map(|s| collapse_whitespace(&s.to_lowercase()))
        .chain(std::iter::once(ocr_text.clone()))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Features {
        corpus,
        ocr_text,
        labels: perception.labels.clone(),
    }
}

/// 連続する空白を単一スペースに
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
