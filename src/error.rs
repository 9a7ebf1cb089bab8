use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartIdError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("入力JSONの解析に失敗: {path}: {source}")]
    InputParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("認識結果ファイルが見つかりません: {0}")]
    NoInputsFound(String),

    #[error("カテゴリ表エラー: {0}")]
    Common(#[from] part_id_common::Error),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PartIdError>;
