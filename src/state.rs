use druid::im::Vector;
use druid::{Data, Lens};
use uuid_file_namer::{
    CopyOptions, ErrorPolicy, ExtensionRule, NameSource, SourceList, UuidScheme,
};

/// アプリ全体の状態
#[derive(Clone, Data, Lens)]
pub struct AppState {
    pub sources: Vector<String>, // 選択順
    pub show_full_paths: bool,
    pub scheme: String, // "UUID1" など
    pub hash_source_path: bool,
    pub legacy_extension_split: bool,
    pub continue_on_error: bool,
    pub include_subdirectories: bool,
    pub exclude_pattern: String,
    pub target_dir: String,
    pub status_message: String,
    pub copy_in_progress: bool,
    pub copy_total: usize,
    pub copy_done: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sources: Vector::new(),
            show_full_paths: false,
            scheme: UuidScheme::Random.label().to_string(),
            hash_source_path: false,
            legacy_extension_split: false,
            continue_on_error: false,
            include_subdirectories: false,
            exclude_pattern: "".to_string(),
            target_dir: "".to_string(),
            status_message: "Drag and drop files onto the app icon or click Select Files".to_string(),
            copy_in_progress: false,
            copy_total: 0,
            copy_done: 0,
        }
    }

    pub fn source_list(&self) -> SourceList {
        let mut list = SourceList::new();
        list.extend(self.sources.iter().cloned());
        list
    }

    pub fn set_sources(&mut self, list: &SourceList) {
        self.sources = list.iter().map(str::to_string).collect();
    }

    pub fn can_save(&self) -> bool {
        !self.sources.is_empty() && !self.copy_in_progress
    }

    /// 画面の設定から保存オプションを作る
    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            scheme: UuidScheme::from_label(&self.scheme),
            name_source: if self.hash_source_path {
                NameSource::SourcePath
            } else {
                NameSource::Fixed
            },
            extension_rule: if self.legacy_extension_split {
                ExtensionRule::FullPath
            } else {
                ExtensionRule::FileName
            },
            error_policy: if self.continue_on_error {
                ErrorPolicy::Continue
            } else {
                ErrorPolicy::Abort
            },
        }
    }
}
