//! ファイルを UUID 名で別フォルダにコピーするためのコア処理。
//!
//! UI（druid）は `gui` フィーチャーのバイナリ側にあり、ここには依存しない。

pub mod error;
pub mod job;
pub mod logging;
pub mod naming;
pub mod pipeline;
pub mod scheme;
pub mod selection;

pub use error::{CopyError, JobError, SelectionError};
pub use job::{CopyJob, JobHandle};
pub use naming::ExtensionRule;
pub use pipeline::{
    copy_with_generated_names, CopiedFile, CopyOptions, CopyReport, ErrorPolicy, NameSource,
};
pub use scheme::{generate, UuidScheme};
pub use selection::{expand_sources, ExcludeMatcher, SourceFilter, SourceList};
