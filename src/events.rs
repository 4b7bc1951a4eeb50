use druid::Selector;

/// 完了時に UI へ渡す内容
pub struct CopyFinished {
    pub summary: String,
    pub target_dir: String,
    pub failures: Vec<String>,
}

// カスタムコマンド（バックグラウンド処理からの進捗更新用）
pub const COPY_PROGRESS: Selector<usize> = Selector::new("copy_progress");
pub const COPY_DONE: Selector<CopyFinished> = Selector::new("copy_done");
