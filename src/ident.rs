/// 識別子を作る際に末尾から削られる文字。
///
/// 拡張子 ".bin" の除去ではなく文字クラスによる削除なので、"foo.inn" は "foo" になる。
const STRIP_CHARS: &[char] = &['.', 'b', 'i', 'n'];

/// パス文字列から配列名の元となる識別子を得る。
///
/// ディレクトリ部分はそのまま残る ("assets/logo.bin" -> "assets/logo")。
pub fn identifier(path: &str) -> &str {
    path.trim_end_matches(STRIP_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bin_extension() {
        assert_eq!(identifier("image.bin"), "image");
        assert_eq!(identifier("test.bin"), "test");
    }

    #[test]
    fn strips_by_character_class() {
        assert_eq!(identifier("data.bbin"), "data");
        assert_eq!(identifier("foo.inn"), "foo");
        assert_eq!(identifier("cabin.bin"), "ca");
        assert_eq!(identifier("bin"), "");
    }

    #[test]
    fn leaves_other_names_unchanged() {
        assert_eq!(identifier("readme.txt"), "readme.txt");
        assert_eq!(identifier("data"), "data");
        assert_eq!(identifier(""), "");
    }

    #[test]
    fn keeps_directory_prefix() {
        assert_eq!(identifier("assets/logo.bin"), "assets/logo");
    }
}
