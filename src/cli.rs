// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PreviewFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "notestat",
    version = crate::VERSION,
    about = "Markdown ノートの統計をフロントマターへ書き込むツール"
)]
pub struct Cli {
    /// ノートを格納したディレクトリ
    #[arg(long, global = true, default_value = ".")]
    pub vault: PathBuf,

    /// 設定ファイル (既定: <vault>/notestat.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// デバッグログを表示
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// 通知とログを抑制
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 1 つのノートを集計してプロパティを更新
    Calc {
        /// ノート (vault からの相対パスまたはファイルパス)
        document: String,

        /// 書き込まずに結果だけ表示
        #[arg(long)]
        dry_run: bool,
    },

    /// vault 内の全ノートを集計
    CalcAll,

    /// 書き込みなしで統計を表示
    Preview {
        document: String,

        #[arg(long, value_enum, default_value = "text")]
        format: PreviewFormat,
    },

    /// カウンタ種別と設定済みカウンタを一覧表示
    Counters,

    /// 設定ファイルを検証
    Check,

    /// 既定の設定ファイルを作成
    Init,

    /// 変更を監視して自動で再集計
    Watch,
}
