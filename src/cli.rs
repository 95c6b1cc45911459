use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use std::path::PathBuf;
use vistoria_common::{InspectionKind, Status};

#[derive(Parser)]
#[command(name = "vistoria")]
#[command(about = "不動産立会い点検（vistoria）記録・AI項目検出ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (claude/codex/gemini)。省略時は設定ファイルの値
    #[arg(long, global = true)]
    pub ai_provider: Option<AiProvider>,

    /// セッションファイル。省略時は設定ファイルの値、なければ ./.vistoria-session.json
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 点検セッションを開始
    Init {
        /// チェックリストテンプレート (apartamento/casa)
        #[arg(short, long, default_value = "apartamento")]
        template: String,

        /// カスタムテンプレート（JSON）
        #[arg(long, conflicts_with = "template")]
        template_file: Option<PathBuf>,

        /// テンプレートを使わず空の状態で開始
        #[arg(long, conflicts_with_all = ["template", "template_file"])]
        empty: bool,

        /// 物件住所
        #[arg(long, default_value = "")]
        address: String,

        /// 貸主
        #[arg(long, default_value = "")]
        landlord: String,

        /// 借主
        #[arg(long, default_value = "")]
        tenant: String,

        /// 点検種別 (entrada/saida)
        #[arg(short, long, default_value = "entrada")]
        kind: InspectionKind,

        /// 既存のセッションを上書き
        #[arg(long)]
        force: bool,
    },

    /// 項目の状態を設定（省略時は現在の状態を表示）
    Status {
        /// 部屋名
        room: String,

        /// 項目名
        item: String,

        /// 状態 (ok/damaged/dirty/missing、ポルトガル語も可)
        status: Option<Status>,

        /// 状態を未設定に戻す
        #[arg(long, conflicts_with = "status")]
        clear: bool,
    },

    /// 項目の所見を置き換え
    Notes {
        /// 部屋名
        room: String,

        /// 項目名
        item: String,

        /// 所見（そのまま保存）
        text: String,
    },

    /// 点検状態を表示
    Show {
        /// 部屋名（省略時は全部屋）
        room: Option<String>,
    },

    /// 写真を取り込み（AIで説明を付与）
    Photo {
        /// 部屋名
        room: String,

        /// 項目名
        item: String,

        /// 写真ファイルまたはフォルダ
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// 写っていた他の項目を確認なしで追加
        #[arg(short, long)]
        yes: bool,

        /// 写っていた他の項目を追加しない
        #[arg(long, conflicts_with = "yes")]
        no_candidates: bool,
    },

    /// 音声を取り込み（文字起こしを付与）
    Audio {
        /// 部屋名
        room: String,

        /// 項目名
        item: String,

        /// 音声ファイルまたはフォルダ
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// 音声コマンド（「marcar X como ...」など）を反映しない
        #[arg(long)]
        no_commands: bool,
    },

    /// 部屋の写真から項目を自動検出
    Detect {
        /// 部屋名
        room: String,

        /// 写真ファイルまたはフォルダ
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// 検出した項目を確認なしで追加
        #[arg(short, long)]
        yes: bool,
    },

    /// 写真1枚で項目全体のAI所見を更新
    Analyze {
        /// 部屋名
        room: String,

        /// 項目名
        item: String,

        /// 解析する写真（省略時は最後に取り込んだ写真）
        #[arg(short, long)]
        photo: Option<PathBuf>,
    },

    /// 修理費を見積り
    Costs {
        /// 地域コード（省略時は設定の値）
        #[arg(short, long)]
        region: Option<String>,

        /// 修理費テーブル（JSON）
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// 入居時と退去時の点検を比較
    Compare {
        /// 入居時（entrada）のセッションファイル
        #[arg(required = true)]
        entry: PathBuf,

        /// 退去時（saida）のセッションファイル（省略時は現在のセッション）
        exit: Option<PathBuf>,
    },

    /// 点検報告書（Excel）を出力
    Report {
        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 修理費見積りシートを追加
        #[arg(long)]
        costs: bool,
    },

    /// 点検状態をすべて消去
    Reset {
        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,

        /// セッションファイル自体を削除
        #[arg(long)]
        delete: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 既定のAIプロバイダ
        #[arg(long)]
        set_provider: Option<AiProvider>,

        /// 既定の地域コード
        #[arg(long)]
        set_region: Option<String>,

        /// 既定のセッションファイル
        #[arg(long)]
        set_session_path: Option<PathBuf>,

        /// AI呼び出しのタイムアウト（秒）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
