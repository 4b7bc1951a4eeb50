use crate::events::{CopyFinished, COPY_DONE, COPY_PROGRESS};
use crate::state::AppState;
use druid::{EventCtx, Target};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use tracing::{error, info, warn};
use uuid_file_namer::{
    expand_sources, CopyJob, ExcludeMatcher, NameSource, SelectionError, SourceFilter,
};

/// 選択エラーはダイアログで知らせるだけで処理は続ける
pub fn show_error(message: &str) {
    MessageDialog::new()
        .set_title("Error")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .set_level(MessageLevel::Error)
        .show();
}

fn source_filter(data: &AppState) -> Result<SourceFilter, SelectionError> {
    Ok(SourceFilter {
        include_subdirectories: data.include_subdirectories,
        exclude: ExcludeMatcher::parse(&data.exclude_pattern)?,
    })
}

/// 起動引数やドロップされたパスを一覧の末尾に追加する
pub fn add_paths(data: &mut AppState, paths: &[PathBuf]) {
    let expanded = source_filter(data).and_then(|filter| expand_sources(paths, &filter));
    match expanded {
        Ok(sources) => {
            let mut list = data.source_list();
            list.extend(sources);
            data.set_sources(&list);
            data.status_message = format!("{} files selected", data.sources.len());
        }
        Err(err) => {
            error!(error = %err, "selection_failed");
            data.status_message = format!("An error occurred: {err}");
            show_error(&data.status_message);
        }
    }
}

/// ファイル選択ダイアログ：一覧を置き換える
pub fn select_files(data: &mut AppState) {
    let Some(paths) = rfd::FileDialog::new().set_title("Select Files").pick_files() else {
        return;
    };
    if paths.is_empty() {
        return;
    }
    let mut list = data.source_list();
    list.replace(paths.iter().map(|p| p.to_string_lossy().into_owned()));
    data.set_sources(&list);
    data.status_message = format!("{} files selected", data.sources.len());
}

/// フォルダ内のファイルを追加する
pub fn add_folder(data: &mut AppState) {
    if let Some(folder) = rfd::FileDialog::new().set_title("Add Folder").pick_folder() {
        add_paths(data, &[folder]);
    }
}

pub fn clear(data: &mut AppState) {
    if data.copy_in_progress {
        return;
    }
    data.sources.clear();
    data.status_message = "".to_string();
    data.copy_total = 0;
    data.copy_done = 0;
}

/// 保存先を選び、バックグラウンドでコピーを開始する
pub fn save_files(ctx: &mut EventCtx, data: &mut AppState) {
    if !data.can_save() {
        return;
    }
    let Some(directory) = rfd::FileDialog::new()
        .set_title("Select Directory to Save Files")
        .pick_folder()
    else {
        return;
    };
    let target_dir = directory.to_string_lossy().into_owned();
    let options = data.copy_options();
    let job = CopyJob::new(data.source_list().snapshot(), target_dir.clone(), options);

    data.target_dir = target_dir.clone();
    data.copy_total = job.total();
    data.copy_done = 0;
    data.copy_in_progress = true;
    data.status_message = format!("Saving with {} names...", options.scheme);
    if options.scheme.is_name_based()
        && options.name_source == NameSource::Fixed
        && data.copy_total > 1
    {
        // 固定名だと全ファイルが同じ UUID になり、後のコピーが前のものを上書きする
        warn!(total = data.copy_total, scheme = %options.scheme, "name_based_batch_shares_one_name");
        data.status_message = format!(
            "Saving with {} names... all {} files share one name, later copies overwrite earlier ones",
            options.scheme, data.copy_total
        );
    }
    info!(total = data.copy_total, %target_dir, scheme = %options.scheme, "save_requested");

    let progress_sink = ctx.get_external_handle();
    let done_sink = ctx.get_external_handle();
    // 結果は COPY_DONE で受け取るのでハンドルは保持しない
    let _handle = job.spawn(
        move |done| {
            let _ = progress_sink.submit_command(COPY_PROGRESS, done, Target::Global);
        },
        move |report| {
            let finished = CopyFinished {
                summary: report.summary(),
                target_dir,
                failures: report.failures.iter().map(|e| format!("{e}: {}", error_cause(e))).collect(),
            };
            let _ = done_sink.submit_command(COPY_DONE, finished, Target::Global);
        },
    );
}

fn error_cause(err: &uuid_file_namer::CopyError) -> String {
    std::error::Error::source(err)
        .map(|cause| cause.to_string())
        .unwrap_or_default()
}
