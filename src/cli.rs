use clap::{Parser, Subcommand};
use pdf_extract_common::ExtractionMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-extract")]
#[command(
    about = "PDF抽出サービスのクライアント（アップロード・結果閲覧・削除）",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// サーバーURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// バックエンドの処理デバイスを表示
    Device,

    /// 処理済みPDFの一覧
    List,

    /// 処理結果の詳細を表示
    Show {
        /// 対象のstem
        #[arg(required = true)]
        stem: String,

        /// Markdownプレビューの表示行数
        #[arg(short, long, default_value = "20")]
        preview_lines: usize,
    },

    /// PDFをアップロードして処理
    Upload {
        /// PDFファイル
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// 抽出モード (fast/accurate)
        #[arg(short, long)]
        mode: Option<ExtractionMode>,
    },

    /// 処理結果を削除
    Delete {
        /// 対象のstem
        #[arg(required = true)]
        stem: String,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 対話モードで一覧・詳細・削除・アップロード
    Browse,

    /// 設定の表示・変更
    Config {
        /// サーバーURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
