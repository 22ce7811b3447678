//! Trigger expression tokenizer implemented with nom.
//!
//! The tokenizer turns an expression such as
//! `(({server:log[app.log].regexp(error)})<>0)` into a flat list of typed
//! tokens. It checks that parentheses are balanced and that every character
//! belongs to a token, but does not validate operand/operator order.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, one_of, satisfy},
    combinator::{map, not, opt, recognize, verify},
    error::{Error as NomError, ErrorKind},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::{ExprError, ExprResult};
use crate::token::{FunctionMacroData, Token, TokenStream, TokenType};

/// Tokenize a trigger expression.
///
/// # Examples
///
/// ```rust
/// use trigger_expr::{parse, TokenType};
///
/// let stream = parse("(({server:log.regexp(error)})<>0)").unwrap();
/// let types: Vec<_> = stream.iter().map(|t| t.token_type).collect();
/// assert_eq!(
///     types,
///     vec![
///         TokenType::OpenBrace,
///         TokenType::OpenBrace,
///         TokenType::FunctionMacro,
///         TokenType::CloseBrace,
///         TokenType::Operator,
///         TokenType::Number,
///         TokenType::CloseBrace,
///     ]
/// );
///
/// let data = stream.tokens()[2].data.as_ref().unwrap();
/// assert_eq!(data.function, "regexp(error)");
/// ```
pub fn parse(input: &str) -> ExprResult<TokenStream> {
    if input.trim().is_empty() {
        return Err(ExprError::EmptyExpression);
    }

    let mut tokens = Vec::new();
    let mut open_braces: Vec<usize> = Vec::new();
    let mut rest = input;

    loop {
        let (remaining, _) = ws(rest).map_err(|_| unexpected(input, rest))?;
        if remaining.is_empty() {
            break;
        }
        let position = input.len() - remaining.len();

        let (remaining, raw) = match token(remaining) {
            Ok(parsed) => parsed,
            Err(_) => return Err(unexpected(input, remaining)),
        };

        match raw.token_type {
            TokenType::OpenBrace => open_braces.push(position),
            TokenType::CloseBrace => {
                if open_braces.pop().is_none() {
                    return Err(ExprError::UnbalancedParentheses { position });
                }
            }
            _ => {}
        }

        tokens.push(match raw.data {
            Some(data) => Token::function_macro(raw.text, position, data),
            None => Token::new(raw.token_type, raw.text, position),
        });
        rest = remaining;
    }

    if let Some(position) = open_braces.pop() {
        return Err(ExprError::UnbalancedParentheses { position });
    }

    tracing::trace!(tokens = tokens.len(), "tokenized trigger expression");
    Ok(TokenStream::new(input, tokens))
}

/// Tokenizer handle for callers that want an object rather than a free function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionTokenizer {
    _private: (),
}

impl ExpressionTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize an expression. Same as [`parse`].
    pub fn parse(&self, input: &str) -> ExprResult<TokenStream> {
        parse(input)
    }
}

fn unexpected(input: &str, rest: &str) -> ExprError {
    ExprError::ParseError {
        position: input.len() - rest.len(),
        message: format!("unexpected input at: '{}'", truncate(rest, 20)),
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn fail<T>(input: &str, kind: ErrorKind) -> IResult<&str, T> {
    Err(nom::Err::Error(NomError::new(input, kind)))
}

// ============================================================================
// Tokens
// ============================================================================

struct RawToken<'a> {
    token_type: TokenType,
    text: &'a str,
    data: Option<FunctionMacroData>,
}

impl<'a> RawToken<'a> {
    fn plain(token_type: TokenType, text: &'a str) -> Self {
        Self {
            token_type,
            text,
            data: None,
        }
    }
}

fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

fn token(input: &str) -> IResult<&str, RawToken<'_>> {
    alt((
        map(recognize(char('(')), |t| RawToken::plain(TokenType::OpenBrace, t)),
        map(recognize(char(')')), |t| RawToken::plain(TokenType::CloseBrace, t)),
        function_macro,
        map(user_macro, |t| RawToken::plain(TokenType::UserMacro, t)),
        map(lld_macro, |t| RawToken::plain(TokenType::LldMacro, t)),
        map(builtin_macro, |t| RawToken::plain(TokenType::Macro, t)),
        map(number, |t| RawToken::plain(TokenType::Number, t)),
        map(keyword_operator, |t| RawToken::plain(TokenType::Operator, t)),
        map(symbol_operator, |t| RawToken::plain(TokenType::Operator, t)),
    ))(input)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn keyword_operator(input: &str) -> IResult<&str, &str> {
    terminated(
        alt((tag("and"), tag("or"), tag("not"))),
        not(satisfy(is_word_char)),
    )(input)
}

fn symbol_operator(input: &str) -> IResult<&str, &str> {
    alt((
        tag("<>"),
        tag("<="),
        tag(">="),
        tag("="),
        tag("<"),
        tag(">"),
        tag("#"),
        tag("+"),
        tag("-"),
        tag("*"),
        tag("/"),
    ))(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    terminated(
        recognize(tuple((
            digit1,
            opt(pair(char('.'), digit1)),
            opt(one_of("KMGTsmhdw")),
        ))),
        not(satisfy(is_word_char)),
    )(input)
}

// ============================================================================
// Macros
// ============================================================================

fn is_macro_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '.'
}

fn user_macro(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        tag("{$"),
        pair(
            take_while1(is_macro_char),
            opt(preceded(char(':'), take_while1(|c| c != '}'))),
        ),
        char('}'),
    ))(input)
}

fn lld_macro(input: &str) -> IResult<&str, &str> {
    recognize(delimited(tag("{#"), take_while1(is_macro_char), char('}')))(input)
}

fn builtin_macro(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('{'),
        verify(take_while1(is_macro_char), |name: &str| {
            name.starts_with(|c: char| c.is_ascii_uppercase())
        }),
        char('}'),
    ))(input)
}

// ============================================================================
// Function macros: {host:key.function(params)}
// ============================================================================

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ' ')
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn function_macro(input: &str) -> IResult<&str, RawToken<'_>> {
    let (rest, _) = char('{')(input)?;
    let (rest, host) = take_while1(is_host_char)(rest)?;
    let (rest, _) = char(':')(rest)?;
    let (rest, (item, function_name)) = item_key_and_function(rest)?;
    let (rest, params) = balanced('(', ')')(rest)?;
    let (rest, _) = char('}')(rest)?;

    let text = &input[..input.len() - rest.len()];
    let data = FunctionMacroData {
        host: host.to_string(),
        item: item.to_string(),
        function: format!("{}{}", function_name, params),
        function_name: function_name.to_string(),
        function_param: params[1..params.len() - 1].to_string(),
    };

    Ok((
        rest,
        RawToken {
            token_type: TokenType::FunctionMacro,
            text,
            data: Some(data),
        },
    ))
}

/// Splits `key.function` or `key[params].function`, stopping before the
/// function's opening parenthesis.
fn item_key_and_function(input: &str) -> IResult<&str, (&str, &str)> {
    let (after_name, name) = take_while1(is_key_char)(input)?;

    if after_name.starts_with('[') {
        let (after_params, _) = balanced('[', ']')(after_name)?;
        let item = &input[..input.len() - after_params.len()];
        let (rest, function_name) = preceded(char('.'), take_while1(is_word_char))(after_params)?;
        return Ok((rest, (item, function_name)));
    }

    // Without bracketed parameters the function name is the last dotted segment.
    let Some(dot) = name.rfind('.') else {
        return fail(input, ErrorKind::Char);
    };
    let (item, function_name) = (&name[..dot], &name[dot + 1..]);
    if item.is_empty() || function_name.is_empty() || !function_name.chars().all(is_word_char) {
        return fail(input, ErrorKind::Verify);
    }
    if !after_name.starts_with('(') {
        return fail(after_name, ErrorKind::Char);
    }
    Ok((after_name, (item, function_name)))
}

/// Recognizes a bracketed run such as `(a,"b)")` or `[x,[y]]`, honouring
/// nesting and double-quoted strings with `\"` escapes.
fn balanced(open: char, close: char) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input: &str| {
        let mut chars = input.char_indices();
        match chars.next() {
            Some((_, c)) if c == open => {}
            _ => return fail(input, ErrorKind::Char),
        }

        let mut depth = 1usize;
        let mut in_quotes = false;
        let mut escaped = false;
        for (idx, c) in chars {
            if in_quotes {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_quotes = false;
                }
                continue;
            }
            if c == '"' {
                in_quotes = true;
            } else if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    let end = idx + c.len_utf8();
                    return Ok((&input[end..], &input[..end]));
                }
            }
        }

        fail(input, ErrorKind::Eof)
    }
}
