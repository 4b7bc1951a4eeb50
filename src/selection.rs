use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::SelectionError;

/// 選択済みファイルの一覧（選択順）
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceList {
    paths: Vec<String>,
}

impl SourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// ダイアログでの選択：一覧を置き換える
    pub fn replace<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
    }

    /// ドロップ・フォルダ追加：末尾に追加する
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// ジョブに渡すためのスナップショット
    pub fn snapshot(&self) -> Vec<String> {
        self.paths.clone()
    }
}

/// 一覧表示用の名前。`full_path` が false なら最後のパス要素だけ。
pub fn display_name(path: &str, full_path: bool) -> &str {
    if full_path {
        path
    } else {
        path.rsplit(['/', '\\']).next().unwrap_or(path)
    }
}

/// フォルダ展開時の除外パターン（カンマ区切り）
///
/// - `*` `?` `[` `{` を含む: フルパスに対する glob
/// - `/` か `\` を含む: フルパスの部分一致
/// - それ以外: ファイル名の部分一致
///
/// いずれも大文字小文字を区別しない。
#[derive(Clone, Debug, Default)]
pub struct ExcludeMatcher {
    globs: Option<GlobSet>,
    path_substrings: Vec<String>,
    filename_substrings: Vec<String>,
}

impl ExcludeMatcher {
    pub fn parse(pattern: &str) -> Result<Self, SelectionError> {
        let mut glob_builder = GlobSetBuilder::new();
        let mut glob_count = 0usize;
        let mut path_substrings = Vec::new();
        let mut filename_substrings = Vec::new();
        for raw in pattern.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let has_glob_meta = raw.contains(['*', '?', '[', '{']);
            let has_sep = raw.contains(['/', '\\']);
            if has_glob_meta {
                let glob = GlobBuilder::new(raw)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| SelectionError::Glob {
                        pattern: raw.to_string(),
                        source,
                    })?;
                glob_builder.add(glob);
                glob_count += 1;
            } else if has_sep {
                path_substrings.push(raw.to_lowercase());
            } else {
                filename_substrings.push(raw.to_lowercase());
            }
        }
        let globs = if glob_count > 0 {
            Some(glob_builder.build().map_err(|source| SelectionError::Glob {
                pattern: pattern.to_string(),
                source,
            })?)
        } else {
            None
        };
        Ok(Self {
            globs,
            path_substrings,
            filename_substrings,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_none() && self.path_substrings.is_empty() && self.filename_substrings.is_empty()
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.globs.as_ref().is_some_and(|gs| gs.is_match(path)) {
            debug!(target: "exclude", path = %path.display(), "excluded by glob");
            return true;
        }
        let path_lower = path.to_string_lossy().to_lowercase();
        if self.path_substrings.iter().any(|sub| path_lower.contains(sub)) {
            debug!(target: "exclude", path = %path.display(), reason = "substring");
            return true;
        }
        let file_name_lower = path
            .file_name()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if self
            .filename_substrings
            .iter()
            .any(|tok| file_name_lower.contains(tok))
        {
            debug!(target: "exclude", path = %path.display(), reason = "filename_substring");
            return true;
        }
        false
    }
}

#[derive(Clone, Debug, Default)]
pub struct SourceFilter {
    pub include_subdirectories: bool,
    pub exclude: ExcludeMatcher,
}

/// 選択されたパスをコピー元ファイルの一覧にする。
///
/// ファイルはそのまま（順序も維持）。フォルダは中のファイルに展開し、
/// 除外パターンに合うものを外す。
pub fn expand_sources<P: AsRef<Path>>(
    paths: &[P],
    filter: &SourceFilter,
) -> Result<Vec<String>, SelectionError> {
    let mut sources = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            sources.push(path.to_string_lossy().into_owned());
        } else if path.is_dir() {
            let walker = if filter.include_subdirectories {
                WalkDir::new(path)
            } else {
                WalkDir::new(path).max_depth(1)
            };
            for entry in walker.sort_by_file_name() {
                let entry = entry.map_err(|source| SelectionError::Walk {
                    path: path.to_path_buf(),
                    source,
                })?;
                if !entry.file_type().is_file() || filter.exclude.is_excluded(entry.path()) {
                    continue;
                }
                sources.push(entry.path().to_string_lossy().into_owned());
            }
        } else {
            return Err(SelectionError::Missing(path.to_path_buf()));
        }
    }
    debug!("expanded_sources: {}", sources.len());
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, b"x").expect("write");
    }

    fn names(sources: &[String]) -> Vec<&str> {
        sources.iter().map(|s| display_name(s, false)).collect()
    }

    #[test]
    fn source_list_replace_and_extend() {
        let mut list = SourceList::new();
        list.extend(["/a/one.png"]);
        list.replace(["/b/two.png", "/b/three.png"]);
        list.extend(vec!["/c/four.png".to_string()]);
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec!["/b/two.png", "/b/three.png", "/c/four.png"]
        );
        assert_eq!(list.len(), 3);
        let snapshot = list.snapshot();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn display_name_shows_last_segment() {
        assert_eq!(display_name("/a/b/cat.png", false), "cat.png");
        assert_eq!(display_name("/a/b/cat.png", true), "/a/b/cat.png");
        assert_eq!(display_name(r"C:\pics\dog.png", false), "dog.png");
        assert_eq!(display_name("plain.txt", false), "plain.txt");
    }

    #[test]
    fn files_keep_order_and_folders_expand() {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path();
        touch(&root.join("z.txt"));
        touch(&root.join("folder/b.txt"));
        touch(&root.join("folder/a.txt"));
        touch(&root.join("folder/nested/deep.txt"));

        let picked = vec![root.join("z.txt"), root.join("folder")];
        let shallow = expand_sources(&picked, &SourceFilter::default()).expect("expand");
        assert_eq!(names(&shallow), vec!["z.txt", "a.txt", "b.txt"]);

        let filter = SourceFilter {
            include_subdirectories: true,
            ..SourceFilter::default()
        };
        let deep = expand_sources(&picked, &filter).expect("expand");
        assert_eq!(names(&deep), vec!["z.txt", "a.txt", "b.txt", "deep.txt"]);
    }

    #[test]
    fn excludes_apply_to_folder_entries() {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path();
        touch(&root.join("keep.png"));
        touch(&root.join("skip.TMP"));
        touch(&root.join("Thumbs.db"));
        touch(&root.join("cache/inner.png"));

        let filter = SourceFilter {
            include_subdirectories: true,
            exclude: ExcludeMatcher::parse("*.tmp, thumbs, cache/").expect("parse"),
        };
        let sources = expand_sources(&[root], &filter).expect("expand");
        assert_eq!(names(&sources), vec!["keep.png"]);
    }

    #[test]
    fn empty_exclude_matches_nothing() {
        let matcher = ExcludeMatcher::parse(" , ").expect("parse");
        assert!(matcher.is_empty());
        assert!(!matcher.is_excluded(Path::new("/a/b.png")));
    }

    #[test]
    fn invalid_glob_is_a_selection_error() {
        let err = ExcludeMatcher::parse("[abc").expect_err("bad glob");
        assert!(matches!(err, SelectionError::Glob { .. }));
    }

    #[test]
    fn missing_path_is_reported() {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("nope.png");
        let err = expand_sources(&[missing.clone()], &SourceFilter::default()).expect_err("missing");
        assert!(matches!(err, SelectionError::Missing(p) if p == missing));
    }
}
