use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ident::identifier;

/// 1 行あたりのバイト数。
pub const CHUNK_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("cannot read {path:?}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EmbedResult<T> = Result<T, EmbedError>;

/// `buf` を `<name>_data`, `<name>_size` の 2 つの宣言として書き出す。
///
/// 最後のチャンクが閉じているかどうかに関わらず、ループ後に必ず `"};` を出力する。
/// よってバイト数が 16 の倍数 (0 を含む) の場合、`"};` が単独の行になる。
pub fn embed<W: Write>(mut wtr: W, name: &str, buf: &[u8]) -> std::io::Result<()> {
    writeln!(wtr, "const unsigned char {}_data[] = {{", name)?;

    for (i, b) in buf.iter().enumerate() {
        if i % CHUNK_LEN == 0 {
            write!(wtr, "  \"")?;
        }
        write!(wtr, "\\x{:02x}", b)?;
        if i % CHUNK_LEN == CHUNK_LEN - 1 {
            writeln!(wtr, "\"")?;
        }
    }

    writeln!(wtr, "\"}};")?;
    writeln!(wtr, "const unsigned int {}_size = {};", name, buf.len())?;

    wtr.flush()
}

/// ファイル全体を読み込んでから `embed` する。読み込みに失敗した場合は何も出力しない。
///
/// 埋め込んだバイト数を返す。
pub fn embed_file<W: Write>(wtr: W, path: &Path) -> EmbedResult<usize> {
    let buf = std::fs::read(path).map_err(|e| EmbedError::FileAccess {
        path: path.to_owned(),
        source: e,
    })?;

    let path_str = path.to_string_lossy();
    embed(wtr, identifier(&path_str), &buf)?;

    Ok(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_to_string(name: &str, buf: &[u8]) -> String {
        let mut out = Vec::<u8>::new();
        embed(&mut out, name, buf).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn partial_last_chunk() {
        let buf: Vec<u8> = (0..18).collect();
        assert_eq!(
            embed_to_string("test", &buf),
            concat!(
                "const unsigned char test_data[] = {\n",
                "  \"\\x00\\x01\\x02\\x03\\x04\\x05\\x06\\x07\\x08\\x09\\x0a\\x0b\\x0c\\x0d\\x0e\\x0f\"\n",
                "  \"\\x10\\x11\"};\n",
                "const unsigned int test_size = 18;\n",
            )
        );
    }

    #[test]
    fn empty() {
        assert_eq!(
            embed_to_string("empty", &[]),
            concat!(
                "const unsigned char empty_data[] = {\n",
                "\"};\n",
                "const unsigned int empty_size = 0;\n",
            )
        );
    }

    #[test]
    fn exact_multiple_of_chunk_emits_trailing_line() {
        let buf = [0xFF_u8; 16];
        let out = embed_to_string("full", &buf);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], format!("  \"{}\"", "\\xff".repeat(16)));
        assert_eq!(lines[2], "\"};");
        assert_eq!(lines[3], "const unsigned int full_size = 16;");
    }

    #[test]
    fn chunk_line_count() {
        for &len in &[1_usize, 15, 16, 17, 31, 32, 33, 100] {
            let buf = vec![0xAB_u8; len];
            let out = embed_to_string("x", &buf);

            let closed = out.lines().filter(|l| l.ends_with('"')).count();
            assert_eq!(closed, len / CHUNK_LEN, "len={}", len);

            let escapes = out.matches("\\xab").count();
            assert_eq!(escapes, len, "len={}", len);

            assert!(out.ends_with(&format!("const unsigned int x_size = {};\n", len)));
        }
    }

    #[test]
    fn lowercase_hex() {
        let out = embed_to_string("h", &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(out.contains("  \"\\xde\\xad\\xbe\\xef\"};\n"));
    }

    #[test]
    fn deterministic() {
        let buf: Vec<u8> = (0..=255).collect();
        assert_eq!(embed_to_string("d", &buf), embed_to_string("d", &buf));
    }

    #[test]
    fn embed_file_uses_path_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.bin");
        std::fs::write(&path, [1_u8, 2, 3]).unwrap();

        let mut out = Vec::<u8>::new();
        let len = embed_file(&mut out, &path).unwrap();
        assert_eq!(len, 3);

        let out = String::from_utf8(out).unwrap();
        let name = path.to_string_lossy();
        let name = identifier(&name);
        assert!(name.ends_with("sprite"));
        assert!(out.starts_with(&format!("const unsigned char {}_data[] = {{\n", name)));
        assert!(out.ends_with(&format!("const unsigned int {}_size = 3;\n", name)));
    }

    #[test]
    fn embed_file_missing_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        let mut out = Vec::<u8>::new();
        let err = embed_file(&mut out, &path).unwrap_err();
        assert!(matches!(err, EmbedError::FileAccess { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn embed_file_directory_is_access_error() {
        let dir = tempfile::tempdir().unwrap();

        let mut out = Vec::<u8>::new();
        let err = embed_file(&mut out, dir.path()).unwrap_err();
        assert!(matches!(err, EmbedError::FileAccess { .. }));
        assert!(out.is_empty());
    }
}
