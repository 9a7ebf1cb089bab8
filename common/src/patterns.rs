//! テキストパターン抽出
//!
//! OCRテキスト・コーパスから部品名らしき文字列を優先順に抽出する。
//! ラベル起点戦略・テキストパターン戦略・フォールバックで共有する。
//!
//! ## 優先順位
//! 1. 品番（英大文字2文字以上+数字、末尾英字1文字まで）
//! 2. 既知の部品名フレーズ（DOOR HANDLE など）
//! 3. 大文字3語
//! 4. 大文字2語
//! 5. 4文字以上の大文字1語（色・PART などの説明語を除く）

use regex::Regex;
use serde::{Deserialize, Serialize};

/// パターン階層
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternTier {
    PartNumber,
    KnownPhrase,
    ThreeWords,
    TwoWords,
    SingleWord,
}

impl PatternTier {
    pub const ALL: [PatternTier; 5] = [
        PatternTier::PartNumber,
        PatternTier::KnownPhrase,
        PatternTier::ThreeWords,
        PatternTier::TwoWords,
        PatternTier::SingleWord,
    ];

    /// 抽出優先度（小さいほど優先）
    pub fn priority(&self) -> u8 {
        match self {
            PatternTier::PartNumber => 0,
            PatternTier::KnownPhrase => 1,
            PatternTier::ThreeWords => 2,
            PatternTier::TwoWords => 3,
            PatternTier::SingleWord => 4,
        }
    }

    /// 語単位のパターンか（説明語フィルタの対象）
    fn is_word_sequence(&self) -> bool {
        matches!(
            self,
            PatternTier::ThreeWords | PatternTier::TwoWords | PatternTier::SingleWord
        )
    }
}

impl std::fmt::Display for PatternTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternTier::PartNumber => write!(f, "part-number"),
            PatternTier::KnownPhrase => write!(f, "known-phrase"),
            PatternTier::ThreeWords => write!(f, "three-words"),
            PatternTier::TwoWords => write!(f, "two-words"),
            PatternTier::SingleWord => write!(f, "single-word"),
        }
    }
}

/// 抽出結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub tier: PatternTier,
    /// 大文字化済みの一致文字列（空白は単一スペース）
    pub text: String,
}

/// 既知の複数語部品名
pub const KNOWN_PHRASES: &[&str] = &[
    "DOOR HANDLE",
    "DOOR HINGE",
    "CIRCUIT BOARD",
    "KEYBOARD KEY",
    "BRAKE PAD",
    "BRAKE DISC",
    "BRAKE CALIPER",
    "OIL FILTER",
    "AIR FILTER",
    "FUEL FILTER",
    "FUEL PUMP",
    "WATER PUMP",
    "SPARK PLUG",
    "WING MIRROR",
    "WIPER BLADE",
    "TIMING BELT",
    "HEAD GASKET",
    "POWER SUPPLY",
    "HARD DRIVE",
    "LIGHT BULB",
    "CABLE TIE",
];

/// 部品名にならない説明語（大文字）
const DESCRIPTIVE_WORDS: &[&str] = &[
    "WHITE", "BLACK", "GREY", "GRAY", "SILVER", "GOLD", "RED", "BLUE", "GREEN", "YELLOW",
    "ORANGE", "BROWN", "BEIGE", "PINK", "PURPLE", "PART", "PARTS", "COMPONENT", "COMPONENTS",
    "ITEM", "ITEMS",
];

/// 汎用ラベル（色・形状・一般名詞）
const GENERIC_LABELS: &[&str] = &[
    "white", "black", "grey", "gray", "silver", "gold", "red", "blue", "green", "yellow",
    "orange", "brown", "beige", "pink", "purple", "rectangle", "circle", "square", "triangle",
    "oval", "line", "parallel", "symmetry", "object", "material", "pattern", "metal", "plastic",
    "font", "text", "design", "product", "technology", "close-up", "composite material",
    "still life photography", "macro photography",
];

lazy_static::lazy_static! {
    static ref PATTERNS: Vec<(PatternTier, Regex)> = vec![
        (PatternTier::PartNumber, Regex::new(r"\b[A-Z]{2,}\d+[A-Z]?\b").unwrap()),
        (PatternTier::KnownPhrase, Regex::new(&known_phrase_pattern()).unwrap()),
        (PatternTier::ThreeWords, Regex::new(r"\b[A-Z]{2,}[ \t]+[A-Z]{2,}[ \t]+[A-Z]{2,}\b").unwrap()),
        (PatternTier::TwoWords, Regex::new(r"\b[A-Z]{2,}[ \t]+[A-Z]{2,}\b").unwrap()),
        (PatternTier::SingleWord, Regex::new(r"\b[A-Z]{4,}\b").unwrap()),
    ];
}

fn known_phrase_pattern() -> String {
    let alternatives: Vec<String> = KNOWN_PHRASES
        .iter()
        .map(|p| regex::escape(p).replace(' ', r"[ \t]+"))
        .collect();
    format!(r"\b(?:{})S?\b", alternatives.join("|"))
}

/// ラベルが汎用語（色・形状など）か
pub fn is_generic_label(label: &str) -> bool {
    let normalized = label.trim().to_lowercase();
    GENERIC_LABELS.contains(&normalized.as_str())
}

/// 大文字1語が説明語か
fn is_descriptive_word(word: &str) -> bool {
    DESCRIPTIVE_WORDS.contains(&word) || is_generic_label(word)
}

/// 全階層を優先順に試して部品名を抽出
pub fn extract_part_name(text: &str) -> Option<TextMatch> {
    extract_with_tiers(text, &PatternTier::ALL)
}

/// 指定した階層のみで抽出
///
/// 最初に一致した階層が採用され、階層内ではテキスト中で最初の一致を返す。
pub fn extract_with_tiers(text: &str, tiers: &[PatternTier]) -> Option<TextMatch> {
    if text.trim().is_empty() {
        return None;
    }
    let upper = text.to_uppercase();

    for (tier, re) in PATTERNS.iter() {
        if !tiers.contains(tier) {
            continue;
        }
        if let Some(found) = find_first_accepted(*tier, re, &upper) {
            tracing::trace!(tier = %tier, text = %found, "text pattern matched");
            return Some(TextMatch {
                tier: *tier,
                text: found,
            });
        }
    }

    None
}

/// 説明語フィルタを通過した最初の一致を探す
///
/// 語単位のパターンは単語の先頭ごとに再探索するため、
/// "WHITE OIL SEAL" のような重なった一致も拾える。
fn find_first_accepted(tier: PatternTier, re: &Regex, text: &str) -> Option<String> {
    let mut start = 0;

    while start < text.len() {
        let m = re.find_at(text, start)?;
        let candidate = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");

        if !tier.is_word_sequence() || !candidate.split(' ').any(is_descriptive_word) {
            return Some(candidate);
        }

        start = next_word_start(text, m.start())?;
    }

    None
}

/// `from` 以降で最初の空白の直後の位置
fn next_word_start(text: &str, from: usize) -> Option<usize> {
    text[from..]
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| from + i + c.len_utf8())
}
