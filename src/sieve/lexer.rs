/// SIEVE script tokenizer (RFC 5228).

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A `:tag` like `:is`, `:contains`, `:over`, `:domain`, etc. Stored lower-case.
    Tag(String),
    /// An unquoted identifier like `if`, `header`, `allof`, `fileinto`, etc.
    Identifier(String),
    /// A double-quoted string, escapes already resolved.
    QuotedString(String),
    /// A multi-line string `text:\r\n...\r\n.\r\n`, dot-stuffing removed.
    MultiLineString(String),
    /// A numeric value with its K/M/G quantifier applied.
    Number(u64),
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

#[derive(Debug, Clone)]
pub struct Span {
    pub token: Token,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unterminated block comment at offset {0}")]
    UnterminatedComment(usize),
    #[error("Unterminated string at offset {0}")]
    UnterminatedString(usize),
    #[error("Unterminated multi-line string at offset {0}")]
    UnterminatedMultiLine(usize),
    #[error("Number out of range at offset {0}")]
    NumberOverflow(usize),
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("Unexpected {found} at offset {offset}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        offset: usize,
    },
    #[error("Unexpected end of script, expected {0}")]
    UnexpectedEnd(&'static str),
}

pub fn tokenize(input: &str) -> Result<Vec<Span>, ParseError> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        let punct = match bytes[i] {
            b';' => Some(Token::Semicolon),
            b',' => Some(Token::Comma),
            b'(' => Some(Token::LParen),
            b')' => Some(Token::RParen),
            b'{' => Some(Token::LBrace),
            b'}' => Some(Token::RBrace),
            b'[' => Some(Token::LBracket),
            b']' => Some(Token::RBracket),
            _ => None,
        };
        if let Some(token) = punct {
            tokens.push(Span { token, offset: start });
            i += 1;
            continue;
        }

        match bytes[i] {
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }

            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = input[i + 2..]
                    .find("*/")
                    .ok_or(ParseError::UnterminatedComment(start))?;
                i += 2 + end + 2;
            }

            b'"' => {
                let (value, end) = quoted_string(input, start)?;
                tokens.push(Span {
                    token: Token::QuotedString(value),
                    offset: start,
                });
                i = end;
            }

            b't' | b'T' if bytes.len() >= i + 5 && bytes[i..i + 5].eq_ignore_ascii_case(b"text:") => {
                let (value, end) = multi_line_string(input, start)?;
                tokens.push(Span {
                    token: Token::MultiLineString(value),
                    offset: start,
                });
                i = end;
            }

            b':' => {
                i += 1;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                if i == start + 1 {
                    return Err(ParseError::UnexpectedChar { ch: ':', offset: start });
                }
                tokens.push(Span {
                    token: Token::Tag(input[start..i].to_ascii_lowercase()),
                    offset: start,
                });
            }

            b'0'..=b'9' => {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let digits: u64 = input[start..i]
                    .parse()
                    .map_err(|_| ParseError::NumberOverflow(start))?;
                let multiplier: u64 = match bytes.get(i) {
                    Some(b'K' | b'k') => 1 << 10,
                    Some(b'M' | b'm') => 1 << 20,
                    Some(b'G' | b'g') => 1 << 30,
                    _ => 1,
                };
                if multiplier > 1 {
                    i += 1;
                }
                let value = digits
                    .checked_mul(multiplier)
                    .ok_or(ParseError::NumberOverflow(start))?;
                tokens.push(Span {
                    token: Token::Number(value),
                    offset: start,
                });
            }

            b if b.is_ascii_alphabetic() || b == b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push(Span {
                    token: Token::Identifier(input[start..i].to_string()),
                    offset: start,
                });
            }

            _ => {
                let ch = input[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::UnexpectedChar { ch, offset: start });
            }
        }
    }

    Ok(tokens)
}

/// Reads a quoted string starting at the opening quote. Returns the value and
/// the offset just past the closing quote.
fn quoted_string(input: &str, start: usize) -> Result<(String, usize), ParseError> {
    let mut value = String::new();
    let mut chars = input[start + 1..].char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Ok((value, start + 1 + idx + 1)),
            // RFC 5228 2.4.2: a backslash quotes the following character
            '\\' => match chars.next() {
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            _ => value.push(ch),
        }
    }

    Err(ParseError::UnterminatedString(start))
}

/// Reads a `text:` literal. Lines up to a lone `.` form the value; a leading
/// `..` on a line stands for a single dot.
fn multi_line_string(input: &str, start: usize) -> Result<(String, usize), ParseError> {
    let header_end = input[start..]
        .find('\n')
        .map(|n| start + n + 1)
        .ok_or(ParseError::UnterminatedMultiLine(start))?;

    let mut value = String::new();
    let mut pos = header_end;
    while pos < input.len() {
        let line_end = input[pos..].find('\n').map(|n| pos + n + 1).unwrap_or(input.len());
        let line = &input[pos..line_end];
        let content = line.trim_end_matches(['\r', '\n']);
        if content == "." {
            return Ok((value, line_end));
        }
        value.push_str(line.strip_prefix("..").map_or(line, |_| &line[1..]));
        pos = line_end;
    }

    Err(ParseError::UnterminatedMultiLine(start))
}
