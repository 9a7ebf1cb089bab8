use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "part-id")]
#[command(about = "画像認識結果から部品を特定するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 認識結果JSONを1件分類して結果を出力
    Identify {
        /// 認識結果JSONファイル（labels / objects / ocrText）
        #[arg(required = true)]
        input: PathBuf,

        /// 評価した全候補も出力
        #[arg(long)]
        explain: bool,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// フォルダ内の認識結果JSONを一括分類
    Batch {
        /// 認識結果JSONのフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力レポート（デフォルト: 入力フォルダ/part-id-report.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 有効なカテゴリ表を表示
    Categories {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// カスタムカテゴリ表（JSON）を設定
        #[arg(long)]
        set_categories: Option<PathBuf>,

        /// 不確実と見なす信頼度の閾値を設定
        #[arg(long)]
        set_threshold: Option<f64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
