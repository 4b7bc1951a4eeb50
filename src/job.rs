//! 保存操作 1 回分のコピーをバックグラウンドスレッドで実行する。
//!
//! スレッドは起動時に受け取った入力のスナップショットだけを所有する。
//! 呼び出し側は [`JobHandle`] で進捗を参照するか、`join` で結果を待つ。
//! キャンセルには対応しない。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::info;

use crate::error::JobError;
use crate::pipeline::{copy_with_generated_names, CopyOptions, CopyReport};

#[derive(Clone, Debug)]
pub struct CopyJob {
    sources: Vec<String>,
    target_dir: String,
    options: CopyOptions,
}

impl CopyJob {
    pub fn new(sources: Vec<String>, target_dir: impl Into<String>, options: CopyOptions) -> Self {
        Self {
            sources,
            target_dir: target_dir.into(),
            options,
        }
    }

    pub fn total(&self) -> usize {
        self.sources.len()
    }

    /// コールバックなしで起動する
    pub fn start(self) -> JobHandle {
        self.spawn(|_| {}, |_| {})
    }

    /// `on_progress` は 1 件ごとに処理済み件数で、`on_finish` は完了時に結果で呼ばれる。
    /// どちらもジョブのスレッド上で実行される。
    pub fn spawn<P, F>(self, mut on_progress: P, on_finish: F) -> JobHandle
    where
        P: FnMut(usize) + Send + 'static,
        F: FnOnce(&CopyReport) + Send + 'static,
    {
        let total = self.total();
        let processed = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicBool::new(false));
        let thread_processed = Arc::clone(&processed);
        let thread_finished = Arc::clone(&finished);

        info!(
            total,
            target_dir = %self.target_dir,
            scheme = %self.options.scheme,
            "copy_job_started"
        );
        let handle = thread::spawn(move || {
            let report = copy_with_generated_names(
                &self.sources,
                &self.target_dir,
                &self.options,
                |done| {
                    thread_processed.store(done, Ordering::Relaxed);
                    on_progress(done);
                },
            );
            info!(
                copied = report.copied.len(),
                failed = report.failures.len(),
                skipped = report.skipped,
                "copy_job_finished"
            );
            on_finish(&report);
            thread_finished.store(true, Ordering::Release);
            report
        });

        JobHandle {
            handle,
            total,
            processed,
            finished,
        }
    }
}

/// 実行中のコピージョブ。drop してもスレッドは最後まで走る。
pub struct JobHandle {
    handle: JoinHandle<CopyReport>,
    total: usize,
    processed: Arc<AtomicUsize>,
    finished: Arc<AtomicBool>,
}

impl JobHandle {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire) || self.handle.is_finished()
    }

    pub fn join(self) -> Result<CopyReport, JobError> {
        self.handle.join().map_err(|_| JobError::Panicked)
    }
}
