use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// コピー処理（パイプライン）のエラー
#[derive(Debug, Error)]
pub enum CopyError {
    /// コピー元からコピー先への複製に失敗
    #[error("failed to copy {source_path} to {destination}")]
    Copy {
        source_path: String,
        destination: String,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    pub fn source_path(&self) -> &str {
        match self {
            CopyError::Copy { source_path, .. } => source_path,
        }
    }
}

/// ファイル選択・フォルダ展開時のエラー
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("failed to read {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("invalid exclude pattern `{pattern}`")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("{0} does not exist")]
    Missing(PathBuf),
}

/// バックグラウンドジョブのエラー
#[derive(Debug, Error)]
pub enum JobError {
    #[error("copy job thread panicked")]
    Panicked,
}
