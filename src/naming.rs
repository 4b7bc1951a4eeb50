//! 生成した UUID から保存先のファイル名・パスを組み立てる。
//!
//! パスは文字列のまま扱い、`target_dir + "/" + name` で連結する。
//! 元パスとの衝突判定も文字列で行う（区切り文字 `\` と `/` は同一視する）。

/// 拡張子の取り出し方
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtensionRule {
    /// 最後のパス要素の中で、最後の `.` 以降
    #[default]
    FileName,
    /// パス文字列全体の最後の `.` 以降（旧来の挙動）。`.` が無ければパス全体。
    /// ディレクトリ名に `.` があり、ファイル名に無い場合は誤った値になる。
    FullPath,
}

impl ExtensionRule {
    /// FileName で `.` が無い場合は空文字列
    pub fn extract<'a>(self, source: &'a str) -> &'a str {
        match self {
            ExtensionRule::FileName => file_name(source)
                .rsplit_once('.')
                .map(|(_, ext)| ext)
                .unwrap_or(""),
            ExtensionRule::FullPath => source.rsplit('.').next().unwrap_or(source),
        }
    }
}

// 区切り文字は `/` と `\` の両方を見る
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// `<uuid>.<extension>`（拡張子が空でも `.` は付ける）
pub fn generated_name(uuid: &str, extension: &str) -> String {
    format!("{uuid}.{extension}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub path: String,
    /// 元パスとの一致を避けるために `_1` を付けた
    pub renamed: bool,
}

/// 保存先パスを決める。
///
/// 候補パスが元パスと文字列として一致する場合に限り `<uuid>_1.<extension>` に置き換える。
/// 同じバッチ内で生成名同士が重なるケースは扱わない。
pub fn resolve_destination(
    target_dir: &str,
    uuid: &str,
    extension: &str,
    source: &str,
) -> Destination {
    let candidate = format!("{target_dir}/{}", generated_name(uuid, extension));
    if same_path_text(&candidate, source) {
        Destination {
            path: format!("{target_dir}/{uuid}_1.{extension}"),
            renamed: true,
        }
    } else {
        Destination {
            path: candidate,
            renamed: false,
        }
    }
}

// `C:\out\x.png` と `C:\out/x.png` は同じものとして扱う
fn same_path_text(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            x == y || (matches!(x, '/' | '\\') && matches!(y, '/' | '\\'))
        })
}
