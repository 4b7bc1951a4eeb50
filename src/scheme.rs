use std::fmt;
use std::sync::OnceLock;

use tracing::warn;
use uuid::Uuid;

/// 名前ベース方式（UUID3/UUID5）で使う固定の名前
pub const DEFAULT_NAME: &str = "python.org";

/// UUID の生成方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UuidScheme {
    /// UUID1: 時刻 + ノード ID
    TimeBased,
    /// UUID3: DNS 名前空間 + MD5
    NameBasedMd5,
    /// UUID4: ランダム
    #[default]
    Random,
    /// UUID5: DNS 名前空間 + SHA-1
    NameBasedSha1,
}

impl UuidScheme {
    pub const ALL: [UuidScheme; 4] = [
        UuidScheme::TimeBased,
        UuidScheme::NameBasedMd5,
        UuidScheme::Random,
        UuidScheme::NameBasedSha1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UuidScheme::TimeBased => "UUID1",
            UuidScheme::NameBasedMd5 => "UUID3",
            UuidScheme::Random => "UUID4",
            UuidScheme::NameBasedSha1 => "UUID5",
        }
    }

    /// ラベル（"UUID1" など）または方式名から変換する。
    /// 未知の値は失敗させずに Random として扱う。
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "UUID1" | "TIME_BASED" => UuidScheme::TimeBased,
            "UUID3" | "NAME_BASED_MD5" => UuidScheme::NameBasedMd5,
            "UUID4" | "RANDOM" => UuidScheme::Random,
            "UUID5" | "NAME_BASED_SHA1" => UuidScheme::NameBasedSha1,
            _ => {
                warn!(label, "unknown_uuid_scheme_fallback_to_random");
                UuidScheme::Random
            }
        }
    }

    pub fn is_name_based(self) -> bool {
        matches!(self, UuidScheme::NameBasedMd5 | UuidScheme::NameBasedSha1)
    }

    /// `name` は名前ベース方式のときだけ使われる
    pub fn generate_with_name(self, name: &str) -> Uuid {
        match self {
            UuidScheme::TimeBased => Uuid::now_v1(node_id()),
            UuidScheme::NameBasedMd5 => Uuid::new_v3(&Uuid::NAMESPACE_DNS, name.as_bytes()),
            UuidScheme::Random => Uuid::new_v4(),
            UuidScheme::NameBasedSha1 => Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes()),
        }
    }
}

impl fmt::Display for UuidScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 既定の名前で UUID を生成し、ハイフン区切りの文字列で返す
pub fn generate(scheme: UuidScheme) -> String {
    scheme.generate_with_name(DEFAULT_NAME).to_string()
}

// プロセス内で共通のノード ID（MAC アドレスの代わりに乱数、マルチキャストビットを立てる）
fn node_id() -> &'static [u8; 6] {
    static NODE_ID: OnceLock<[u8; 6]> = OnceLock::new();
    NODE_ID.get_or_init(|| {
        let mut node: [u8; 6] = rand::random();
        node[0] |= 0x01;
        node
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn name_based_schemes_are_deterministic() {
        assert_eq!(
            generate(UuidScheme::NameBasedMd5),
            "6fa459ea-ee8a-3ca4-894e-db77e160355e"
        );
        assert_eq!(
            generate(UuidScheme::NameBasedSha1),
            "886313e1-3b8a-5372-9b90-0c9aee199e5d"
        );
        assert_eq!(
            generate(UuidScheme::NameBasedMd5),
            generate(UuidScheme::NameBasedMd5)
        );
        assert_eq!(
            generate(UuidScheme::NameBasedSha1),
            generate(UuidScheme::NameBasedSha1)
        );
    }

    #[test]
    fn random_and_time_based_do_not_repeat() {
        for scheme in [UuidScheme::Random, UuidScheme::TimeBased] {
            let seen: HashSet<String> = (0..1000).map(|_| generate(scheme)).collect();
            assert_eq!(seen.len(), 1000, "{scheme} repeated a value");
        }
    }

    #[test]
    fn generated_text_is_canonical() {
        for scheme in UuidScheme::ALL {
            let text = generate(scheme);
            assert_eq!(text.len(), 36);
            let groups: Vec<usize> = text.split('-').map(str::len).collect();
            assert_eq!(groups, vec![8, 4, 4, 4, 12]);
            assert!(text.chars().all(|c| c == '-' || c.is_ascii_hexdigit()));
            assert_eq!(text, text.to_ascii_lowercase());
        }
    }

    #[test]
    fn versions_match_schemes() {
        let version = |s: UuidScheme| s.generate_with_name(DEFAULT_NAME).get_version_num();
        assert_eq!(version(UuidScheme::TimeBased), 1);
        assert_eq!(version(UuidScheme::NameBasedMd5), 3);
        assert_eq!(version(UuidScheme::Random), 4);
        assert_eq!(version(UuidScheme::NameBasedSha1), 5);
    }

    #[test]
    fn time_based_shares_node_id() {
        let a = UuidScheme::TimeBased.generate_with_name(DEFAULT_NAME);
        let b = UuidScheme::TimeBased.generate_with_name(DEFAULT_NAME);
        assert_eq!(a.as_bytes()[10..], b.as_bytes()[10..]);
        assert_ne!(a, b);
    }

    #[test]
    fn labels_round_trip_and_unknown_falls_back() {
        for scheme in UuidScheme::ALL {
            assert_eq!(UuidScheme::from_label(scheme.label()), scheme);
        }
        assert_eq!(UuidScheme::from_label("time_based"), UuidScheme::TimeBased);
        assert_eq!(UuidScheme::from_label("UUID7"), UuidScheme::Random);
        assert_eq!(UuidScheme::from_label(""), UuidScheme::Random);
    }

    #[test]
    fn only_uuid3_and_uuid5_are_name_based() {
        let name_based: Vec<UuidScheme> =
            UuidScheme::ALL.into_iter().filter(|s| s.is_name_based()).collect();
        assert_eq!(name_based, vec![UuidScheme::NameBasedMd5, UuidScheme::NameBasedSha1]);
    }

    #[test]
    fn name_input_changes_name_based_output() {
        let a = UuidScheme::NameBasedSha1.generate_with_name("/a/cat.png");
        let b = UuidScheme::NameBasedSha1.generate_with_name("/a/dog.png");
        assert_ne!(a, b);
    }
}
