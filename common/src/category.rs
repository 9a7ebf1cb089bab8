//! カテゴリ表
//!
//! カテゴリ名 → キーワード・価格帯・説明文テンプレートの対応。
//! 組み込み表はプロセス内で一度だけ構築し、以降は読み取り専用。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// どのカテゴリにも一致しない場合のカテゴリ名
pub const GENERAL_CATEGORY: &str = "general";

/// 一致しない場合の価格帯
pub const DEFAULT_PRICE_RANGE: &str = "£5 - £100";

/// 一致しない場合の説明文テンプレート
pub const DEFAULT_DESCRIPTION: &str = "This appears to be {a_name}.";

/// 表に一致しなかった部品名に対する語彙ベースの既定カテゴリ
const LEXICAL_CUES: &[(&str, &str)] = &[
    ("screw", "mechanical"),
    ("bolt", "mechanical"),
    ("nut", "mechanical"),
    ("washer", "mechanical"),
    ("wire", "electronics"),
    ("cable", "electronics"),
    ("pipe", "plumbing"),
];

/// カテゴリ定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
    pub price_range: String,
    /// 説明文テンプレート（`{name}` は部品名、`{a_name}` は冠詞付きの部品名）
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

impl CategoryRule {
    pub fn new(name: &str, keywords: &[&str], price_range: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            price_range: price_range.to_string(),
            description: description.to_string(),
        }
    }

    /// テキストに含まれるキーワードを表の順に返す
    pub fn matched_keywords<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.keywords
            .iter()
            .map(|k| k.as_str())
            .filter(move |k| !k.is_empty() && text.contains(k))
    }

    /// 一致キーワード数 / 全キーワード数 × 100
    pub fn score(&self, text: &str) -> f64 {
        if self.keywords.is_empty() {
            return 0.0;
        }
        let matched = self.matched_keywords(text).count();
        matched as f64 / self.keywords.len() as f64 * 100.0
    }

    pub fn matches(&self, text: &str) -> bool {
        self.matched_keywords(text).next().is_some()
    }
}

/// 順序付きカテゴリ表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

lazy_static::lazy_static! {
    static ref BUILTIN: CategoryTable = CategoryTable::builtin_table();
}

impl Default for CategoryTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl CategoryTable {
    /// ルール一覧から表を構築（キーワードは小文字化）
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::Config("category table is empty".into()));
        }

        let mut normalized = Vec::with_capacity(rules.len());
        for mut rule in rules {
            rule.name = rule.name.trim().to_lowercase();
            rule.keywords = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if rule.name.is_empty() {
                return Err(Error::Config("category rule without a name".into()));
            }
            if rule.keywords.is_empty() {
                return Err(Error::Config(format!(
                    "category '{}' has no keywords",
                    rule.name
                )));
            }
            normalized.push(rule);
        }

        Ok(Self { rules: normalized })
    }

    /// 組み込み表への参照
    pub fn builtin() -> &'static CategoryTable {
        &BUILTIN
    }

    /// JSON文字列から読み込み（`CategoryRule` の配列）
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<CategoryRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&CategoryRule> {
        let name = name.to_lowercase();
        self.rules.iter().find(|r| r.name == name)
    }

    /// 正規化スコアが最も高いカテゴリ（同点は表の順）
    pub fn best_match(&self, text: &str) -> Option<(&CategoryRule, f64)> {
        let mut best: Option<(&CategoryRule, f64)> = None;
        for rule in &self.rules {
            let score = rule.score(text);
            if score > best.map(|(_, s)| s).unwrap_or(0.0) {
                best = Some((rule, score));
            }
        }
        best
    }

    /// 部品名とコーパスからカテゴリを決定
    ///
    /// 1. キーワードが一致した最初のカテゴリ
    /// 2. 部品名の語彙による既定カテゴリ（表に存在する場合のみ）
    /// 3. general
    pub fn lookup(&self, part_name: &str, corpus: &str) -> Option<&CategoryRule> {
        let name = part_name.to_lowercase();
        let text = format!("{} {}", name, corpus.to_lowercase());

        if let Some(rule) = self.rules.iter().find(|r| r.matches(&text)) {
            return Some(rule);
        }

        LEXICAL_CUES
            .iter()
            .filter(|(cue, _)| name.contains(cue))
            .find_map(|(_, category)| self.get(category))
    }

    /// カテゴリの価格帯（未登録なら既定値）
    pub fn price_range(&self, category: &str) -> &str {
        self.get(category)
            .map(|r| r.price_range.as_str())
            .unwrap_or(DEFAULT_PRICE_RANGE)
    }

    fn builtin_table() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(
                    "automotive",
                    &[
                        "car", "vehicle", "automotive", "tire", "tyre", "wheel", "brake",
                        "engine", "exhaust", "bumper", "headlight", "radiator",
                    ],
                    "£20 - £500",
                    "This appears to be {a_name}, an automotive component used in vehicle systems.",
                ),
                CategoryRule::new(
                    "electronics",
                    &[
                        "circuit", "board", "chip", "electronic", "resistor", "capacitor",
                        "pcb", "transistor", "processor", "connector", "keyboard", "usb",
                    ],
                    "£5 - £200",
                    "This appears to be {a_name}, an electronic component typically found in devices and circuit assemblies.",
                ),
                CategoryRule::new(
                    "mechanical",
                    &[
                        "gear", "bearing", "spring", "screw", "bolt", "washer", "shaft",
                        "pulley", "sprocket", "fastener", "bracket", "gasket",
                    ],
                    "£2 - £150",
                    "This appears to be {a_name}, a mechanical component used to fasten parts or transfer motion.",
                ),
                CategoryRule::new(
                    "plumbing",
                    &[
                        "pipe", "plumbing", "faucet", "tap", "valve", "drain", "hose",
                        "fitting", "cistern", "sink",
                    ],
                    "£3 - £120",
                    "This appears to be {a_name}, a plumbing fitting used in water supply or drainage.",
                ),
                CategoryRule::new(
                    "furniture",
                    &[
                        "furniture", "handle", "knob", "drawer", "cabinet", "hinge", "door",
                        "latch", "shelf", "cupboard",
                    ],
                    "£5 - £80",
                    "This appears to be {a_name}, a piece of furniture or door hardware.",
                ),
                CategoryRule::new(
                    "appliance",
                    &[
                        "appliance", "washing machine", "dishwasher", "fridge", "oven",
                        "microwave", "kettle", "vacuum", "toaster", "dryer",
                    ],
                    "£10 - £250",
                    "This appears to be {a_name}, a replacement part for a household appliance.",
                ),
            ],
        }
    }
}
