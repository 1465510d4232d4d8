use std::io::BufRead;

use logos::{Lexer, Logos};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnembedError {
    #[error("line {lineno}: parse error: {msg}")]
    Parse { lineno: usize, msg: String },

    #[error("name mismatch: {data}_data vs {size}_size")]
    NameMismatch { data: String, size: String },

    #[error("size mismatch: declared {declared}, but got {actual} bytes")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type UnembedResult<T> = Result<T, UnembedError>;

/// `embed` の出力から復元したデータ。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Embedded {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Logos)]
enum Token {
    #[regex(r#"[^\s\[\]={};"\\]+"#, |lex| lex.slice().to_owned())]
    Word(String),

    #[token("[]")]
    Brackets,

    #[token("=")]
    Equal,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(";")]
    Semicolon,

    #[token("\"")]
    Quote,

    #[regex(r"\\x[0-9A-Fa-f][0-9A-Fa-f]", |lex| u8::from_str_radix(&lex.slice()[2..], 16))]
    Escape(u8),

    #[error]
    #[regex(r"[[:space:]]+", logos::skip)]
    Error,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Header,
    Body,
    Size,
    Done,
}

/// `embed` が出力したテキストをパースし、元のバイト列と識別子を得る。
///
/// クォートはチャンクの区切りとしてのみ扱い、対応は検査しない
/// (バイト数が 16 の倍数のとき末尾の `"};` は C としては閉じていないため)。
pub fn unembed<R: BufRead>(rdr: R) -> UnembedResult<Embedded> {
    let mut state = State::Header;
    let mut name_data = String::new();
    let mut data = vec![];

    for (i, line) in rdr.lines().enumerate() {
        let lineno = i + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut lex = Token::lexer(&line);
        let lex = &mut lex;

        state = match state {
            State::Header => {
                name_data = parse_header(lineno, lex)?;
                State::Body
            }
            State::Body => {
                if parse_body_line(lineno, lex, &mut data)? {
                    State::Size
                } else {
                    State::Body
                }
            }
            State::Size => {
                let (name_size, declared) = parse_size(lineno, lex)?;
                if name_size != name_data {
                    return Err(UnembedError::NameMismatch {
                        data: name_data,
                        size: name_size,
                    });
                }
                if declared != data.len() {
                    return Err(UnembedError::SizeMismatch {
                        declared,
                        actual: data.len(),
                    });
                }
                State::Done
            }
            State::Done => {
                return Err(UnembedError::Parse {
                    lineno,
                    msg: format!("trailing garbage: {}", line.trim()),
                });
            }
        };
    }

    if state != State::Done {
        return Err(UnembedError::UnexpectedEof);
    }

    Ok(Embedded {
        name: name_data,
        data,
    })
}

// const unsigned char <name>_data[] = {
fn parse_header(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<String> {
    expect_keyword(lineno, lex, "const")?;
    expect_keyword(lineno, lex, "unsigned")?;
    expect_keyword(lineno, lex, "char")?;
    let name = expect_declarator(lineno, lex, "_data")?;
    expect_brackets(lineno, lex)?;
    expect_equal(lineno, lex)?;
    expect_brace_open(lineno, lex)?;
    expect_end(lineno, lex)?;

    Ok(name)
}

// 配列の終端 `};` を含む行なら true を返す。
fn parse_body_line(
    lineno: usize,
    lex: &mut Lexer<Token>,
    data: &mut Vec<u8>,
) -> UnembedResult<bool> {
    while let Some(token) = lex.next() {
        match token {
            Token::Quote => {}
            Token::Escape(b) => data.push(b),
            Token::BraceClose => {
                expect_semicolon(lineno, lex)?;
                expect_end(lineno, lex)?;
                return Ok(true);
            }
            _ => {
                return Err(UnembedError::Parse {
                    lineno,
                    msg: format!("unexpected token in array body: {}", lex.slice()),
                });
            }
        }
    }

    Ok(false)
}

// const unsigned int <name>_size = <N>;
fn parse_size(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<(String, usize)> {
    expect_keyword(lineno, lex, "const")?;
    expect_keyword(lineno, lex, "unsigned")?;
    expect_keyword(lineno, lex, "int")?;
    let name = expect_declarator(lineno, lex, "_size")?;
    expect_equal(lineno, lex)?;
    let size = expect_number(lineno, lex)?;
    expect_semicolon(lineno, lex)?;
    expect_end(lineno, lex)?;

    Ok((name, size))
}

fn expect_word(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<String> {
    if let Some(Token::Word(word)) = lex.next() {
        Ok(word)
    } else {
        Err(UnembedError::Parse {
            lineno,
            msg: format!("expected word, but got: {}", lex.slice()),
        })
    }
}

fn expect_keyword(lineno: usize, lex: &mut Lexer<Token>, keyword: &str) -> UnembedResult<()> {
    let word = expect_word(lineno, lex)?;

    if word != keyword {
        return Err(UnembedError::Parse {
            lineno,
            msg: format!("expected `{}`, but got: {}", keyword, word),
        });
    }

    Ok(())
}

// `<name><suffix>` の <name> 部分を返す。
fn expect_declarator(
    lineno: usize,
    lex: &mut Lexer<Token>,
    suffix: &str,
) -> UnembedResult<String> {
    let word = expect_word(lineno, lex)?;

    word.strip_suffix(suffix)
        .map(str::to_owned)
        .ok_or_else(|| UnembedError::Parse {
            lineno,
            msg: format!("declarator must end with {}: {}", suffix, word),
        })
}

fn expect_number(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<usize> {
    let word = expect_word(lineno, lex)?;

    word.parse().map_err(|_| UnembedError::Parse {
        lineno,
        msg: format!("expected number, but got: {}", word),
    })
}

fn expect_brackets(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<()> {
    if let Some(Token::Brackets) = lex.next() {
        Ok(())
    } else {
        Err(UnembedError::Parse {
            lineno,
            msg: format!("expected [], but got: {}", lex.slice()),
        })
    }
}

fn expect_equal(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<()> {
    if let Some(Token::Equal) = lex.next() {
        Ok(())
    } else {
        Err(UnembedError::Parse {
            lineno,
            msg: format!("expected =, but got: {}", lex.slice()),
        })
    }
}

fn expect_brace_open(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<()> {
    if let Some(Token::BraceOpen) = lex.next() {
        Ok(())
    } else {
        Err(UnembedError::Parse {
            lineno,
            msg: format!("expected {{, but got: {}", lex.slice()),
        })
    }
}

fn expect_semicolon(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<()> {
    if let Some(Token::Semicolon) = lex.next() {
        Ok(())
    } else {
        Err(UnembedError::Parse {
            lineno,
            msg: format!("expected semicolon, but got: {}", lex.slice()),
        })
    }
}

fn expect_end(lineno: usize, lex: &mut Lexer<Token>) -> UnembedResult<()> {
    if lex.next().is_none() {
        Ok(())
    } else {
        Err(UnembedError::Parse {
            lineno,
            msg: format!("expected end, but got: {}", lex.slice()),
        })
    }
}
