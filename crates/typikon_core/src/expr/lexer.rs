//! Tokenizer for predicate expressions.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid number regex")
});
static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*").expect("valid identifier regex"));

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Question,
    Colon,
    LParen,
    RParen,
}

/// Token with its byte offset in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

/// Lexing failure at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub offset: usize,
    pub message: String,
}

// Longest operators first so `===` is not read as `==` + `=`.
const OPERATORS: &[(&str, Token)] = &[
    ("===", Token::StrictEq),
    ("!==", Token::StrictNotEq),
    ("==", Token::EqEq),
    ("!=", Token::NotEq),
    ("<=", Token::Le),
    (">=", Token::Ge),
    ("&&", Token::AndAnd),
    ("||", Token::OrOr),
    ("+", Token::Plus),
    ("-", Token::Minus),
    ("*", Token::Star),
    ("/", Token::Slash),
    ("%", Token::Percent),
    ("<", Token::Lt),
    (">", Token::Gt),
    ("!", Token::Bang),
    ("?", Token::Question),
    (":", Token::Colon),
    ("(", Token::LParen),
    (")", Token::RParen),
];

pub fn tokenize(source: &str) -> Result<Vec<Spanned>, LexError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < source.len() {
        let rest = &source[offset..];
        let Some(first) = rest.chars().next() else {
            break;
        };

        if first.is_whitespace() {
            offset += first.len_utf8();
            continue;
        }

        if let Some(found) = NUMBER_RE.find(rest) {
            let number = found.as_str().parse::<f64>().map_err(|err| LexError {
                offset,
                message: format!("invalid number `{}`: {err}", found.as_str()),
            })?;
            tokens.push(Spanned {
                token: Token::Number(number),
                offset,
            });
            offset += found.end();
            continue;
        }

        if let Some(found) = IDENT_RE.find(rest) {
            let token = match found.as_str() {
                "true" => Token::True,
                "false" => Token::False,
                name => Token::Ident(name.to_string()),
            };
            tokens.push(Spanned { token, offset });
            offset += found.end();
            continue;
        }

        if first == '"' || first == '\'' {
            let (text, consumed) = read_string(rest, first).ok_or_else(|| LexError {
                offset,
                message: "unterminated string literal".to_string(),
            })?;
            tokens.push(Spanned {
                token: Token::Str(text),
                offset,
            });
            offset += consumed;
            continue;
        }

        let Some((symbol, token)) = OPERATORS.iter().find(|(symbol, _)| rest.starts_with(symbol))
        else {
            return Err(LexError {
                offset,
                message: format!("unexpected character `{first}`"),
            });
        };
        tokens.push(Spanned {
            token: token.clone(),
            offset,
        });
        offset += symbol.len();
    }

    Ok(tokens)
}

/// Reads a quoted literal; returns the unescaped text and bytes consumed.
fn read_string(rest: &str, quote: char) -> Option<(String, usize)> {
    let mut text = String::new();
    let mut chars = rest.char_indices().skip(1);

    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' => {
                let (_, escaped) = chars.next()?;
                text.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            ch if ch == quote => return Some((text, index + ch.len_utf8())),
            ch => text.push(ch),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn strict_operators_win_over_loose_ones() {
        assert_eq!(
            kinds("a === 1"),
            vec![Token::Ident("a".into()), Token::StrictEq, Token::Number(1.0)]
        );
        assert_eq!(kinds("!=="), vec![Token::StrictNotEq]);
    }

    #[test]
    fn strings_support_both_quotes_and_escapes() {
        assert_eq!(
            kinds(r#"'it\'s' "x""#),
            vec![Token::Str("it's".into()), Token::Str("x".into())]
        );
    }

    #[test]
    fn reports_offset_of_unknown_character() {
        let err = tokenize("x = 1").unwrap_err();
        assert_eq!(err.offset, 2);
    }
}
