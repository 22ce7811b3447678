//! Token types produced by the trigger expression tokenizer.

/// Kind of a token in a trigger expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TokenType {
    /// Opening parenthesis: `(`
    OpenBrace,
    /// Closing parenthesis: `)`
    CloseBrace,
    /// Boolean, comparison or arithmetic operator: `and`, `<>`, `+`, ...
    Operator,
    /// Numeric constant, optionally with a unit suffix: `0`, `1.5`, `10K`
    Number,
    /// Item function reference: `{host:key.regexp(err)}`
    FunctionMacro,
    /// Built-in macro: `{TRIGGER.VALUE}`
    Macro,
    /// User macro: `{$THRESHOLD}`
    UserMacro,
    /// Low-level discovery macro: `{#FSNAME}`
    LldMacro,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenType::OpenBrace => "open brace",
            TokenType::CloseBrace => "close brace",
            TokenType::Operator => "operator",
            TokenType::Number => "number",
            TokenType::FunctionMacro => "function macro",
            TokenType::Macro => "macro",
            TokenType::UserMacro => "user macro",
            TokenType::LldMacro => "LLD macro",
        };
        f.write_str(name)
    }
}

/// Resolved parts of a function macro.
///
/// For `{server:log[/var/log/app.log].regexp(error)}`:
///
/// | Field | Value |
/// |-------|-------|
/// | `host` | `server` |
/// | `item` | `log[/var/log/app.log]` |
/// | `function` | `regexp(error)` |
/// | `function_name` | `regexp` |
/// | `function_param` | `error` |
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionMacroData {
    /// Host name (the part before `:`).
    pub host: String,
    /// Item key, including any bracketed parameters.
    pub item: String,
    /// Whole function call: name and parenthesized parameters.
    pub function: String,
    /// Function name as written.
    pub function_name: String,
    /// Raw text between the function's parentheses.
    pub function_param: String,
}

/// A single token of a trigger expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Token kind.
    pub token_type: TokenType,
    /// Literal source text of the token.
    pub value: String,
    /// Byte offset of the token in the source expression.
    pub position: usize,
    /// Byte length of the token in the source expression.
    pub length: usize,
    /// Function macro details, present only for [`TokenType::FunctionMacro`].
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub data: Option<FunctionMacroData>,
}

impl Token {
    /// Creates a token without function macro data.
    pub fn new(token_type: TokenType, value: impl Into<String>, position: usize) -> Self {
        let value = value.into();
        let length = value.len();
        Self {
            token_type,
            value,
            position,
            length,
            data: None,
        }
    }

    /// Creates a function macro token.
    pub fn function_macro(
        value: impl Into<String>,
        position: usize,
        data: FunctionMacroData,
    ) -> Self {
        Self {
            data: Some(data),
            ..Self::new(TokenType::FunctionMacro, value, position)
        }
    }

    /// Returns true for an operator token whose value is exactly `op`.
    pub fn is_operator(&self, op: &str) -> bool {
        self.token_type == TokenType::Operator && self.value == op
    }

    /// Returns true for an open brace token.
    pub fn is_open_brace(&self) -> bool {
        self.token_type == TokenType::OpenBrace
    }

    /// Returns true for a close brace token.
    pub fn is_close_brace(&self) -> bool {
        self.token_type == TokenType::CloseBrace
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Tokens of one parsed expression, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    source: String,
    tokens: Vec<Token>,
}

impl TokenStream {
    pub(crate) fn new(source: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            source: source.into(),
            tokens,
        }
    }

    /// The expression the tokens were produced from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All tokens in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Consumes the stream, returning the tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
