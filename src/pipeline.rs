use std::fs::{self, FileTimes};
use std::io;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::error::CopyError;
use crate::naming::{resolve_destination, ExtensionRule};
use crate::scheme::{UuidScheme, DEFAULT_NAME};

/// 名前ベース方式に渡す名前
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameSource {
    /// 常に "python.org"。同じバッチのファイルはすべて同じ UUID になる
    #[default]
    Fixed,
    /// コピー元のパス文字列
    SourcePath,
}

/// 1 件失敗したときの扱い
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// 残りのファイルは処理しない
    #[default]
    Abort,
    Continue,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyOptions {
    pub scheme: UuidScheme,
    pub name_source: NameSource,
    pub extension_rule: ExtensionRule,
    pub error_policy: ErrorPolicy,
}

impl CopyOptions {
    pub fn with_scheme(scheme: UuidScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopiedFile {
    pub source: String,
    pub destination: String,
    pub bytes: u64,
}

/// 1 回の保存操作の結果
#[derive(Debug, Default)]
pub struct CopyReport {
    pub copied: Vec<CopiedFile>,
    pub failures: Vec<CopyError>,
    /// Abort により処理されなかった件数
    pub skipped: usize,
}

impl CopyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.skipped == 0
    }

    pub fn processed(&self) -> usize {
        self.copied.len() + self.failures.len()
    }

    pub fn summary(&self) -> String {
        if self.is_success() {
            format!("Copied {} files", self.copied.len())
        } else {
            format!(
                "Copied {} files, {} errors, {} skipped",
                self.copied.len(),
                self.failures.len(),
                self.skipped
            )
        }
    }
}

/// 各ファイルを `<uuid>.<拡張子>` という名前で `target_dir` にコピーする。
///
/// 入力順に 1 件ずつ処理する。`on_progress` は 1 件処理するごとに処理済み件数で呼ばれる。
pub fn copy_with_generated_names<S, F>(
    sources: &[S],
    target_dir: &str,
    options: &CopyOptions,
    mut on_progress: F,
) -> CopyReport
where
    S: AsRef<str>,
    F: FnMut(usize),
{
    let mut report = CopyReport::default();
    for (index, source) in sources.iter().enumerate() {
        let source = source.as_ref();
        let name = match options.name_source {
            NameSource::Fixed => DEFAULT_NAME,
            NameSource::SourcePath => source,
        };
        let uuid = options.scheme.generate_with_name(name).to_string();
        let extension = options.extension_rule.extract(source);
        let resolved = resolve_destination(target_dir, &uuid, extension, source);
        let destination = resolved.path;
        if resolved.renamed {
            info!(source, %destination, "destination_matches_source_renamed");
        }

        match copy_with_metadata(Path::new(source), Path::new(&destination)) {
            Ok(bytes) => {
                debug!(source, %destination, bytes, "copied");
                report.copied.push(CopiedFile {
                    source: source.to_string(),
                    destination,
                    bytes,
                });
            }
            Err(err) => {
                error!(source, %destination, error = %err, "copy_failed");
                report.failures.push(CopyError::Copy {
                    source_path: source.to_string(),
                    destination,
                    source: err,
                });
                if options.error_policy == ErrorPolicy::Abort {
                    report.skipped = sources.len() - index - 1;
                    on_progress(index + 1);
                    break;
                }
            }
        }
        on_progress(index + 1);
    }
    report
}

/// 内容とパーミッションをコピーし、タイムスタンプもできる範囲で引き継ぐ。
/// 既存ファイルは確認なしで上書きするが、コピー元と同じ実体なら `AlreadyExists` で失敗する。
pub fn copy_with_metadata(source: &Path, destination: &Path) -> io::Result<u64> {
    if is_same_file(source, destination)? {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "source and destination are the same file",
        ));
    }
    let bytes = fs::copy(source, destination)?;
    if let Err(err) = preserve_timestamps(source, destination) {
        warn!(
            source = %source.display(),
            destination = %destination.display(),
            error = %err,
            "timestamps_not_preserved"
        );
    }
    Ok(bytes)
}

// 表記違い（`./` やシンボリックリンク）でも同じファイルかを判定する
fn is_same_file(source: &Path, destination: &Path) -> io::Result<bool> {
    if !destination.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(source)? == fs::canonicalize(destination)?)
}

fn preserve_timestamps(source: &Path, destination: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    // 読み取り専用でコピーされた場合は書き込みで開けないので読み取りで開き直す
    let file = fs::File::options()
        .write(true)
        .open(destination)
        .or_else(|_| fs::File::open(destination))?;
    file.set_times(times)
}
