//! Trigger wizard constructor.

use tracing::debug;

use crate::config::ConstructorConfig;
use crate::decoder::decode;
use crate::encoder::encode_with_config;
use crate::error::ConstructorResult;
use crate::fragment::ConditionFragment;
use crate::traits::Tokenize;

/// Converts between wizard fragments and stored trigger expressions.
///
/// The constructor bridges the fragment encoder/decoder and any tokenizer
/// implementing [`Tokenize`].
///
/// # Example
///
/// ```rust
/// use trigger_constructor::{ConditionFragment, TriggerConstructor};
/// use trigger_expr::ExpressionTokenizer;
///
/// let tokenizer = ExpressionTokenizer::new();
/// let constructor = TriggerConstructor::new(&tokenizer);
///
/// let parts = vec![
///     ConditionFragment::matching("regexp(error)"),
///     ConditionFragment::not_matching("iregexp(debug)"),
/// ];
/// let expression = constructor
///     .expression_from_parts("server", "log[app.log]", &parts)
///     .unwrap();
///
/// assert_eq!(constructor.parts_from_expression(&expression).unwrap(), parts);
/// ```
pub struct TriggerConstructor<'a> {
    /// Tokenizer used when reading expressions back.
    tokenizer: &'a dyn Tokenize,
    /// Constructor configuration.
    config: ConstructorConfig,
}

impl<'a> TriggerConstructor<'a> {
    /// Creates a constructor with the default configuration.
    pub fn new(tokenizer: &'a dyn Tokenize) -> Self {
        Self::with_config(tokenizer, ConstructorConfig::default())
    }

    /// Creates a constructor with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trigger_constructor::{ConstructorConfig, TriggerConstructor};
    /// use trigger_expr::ExpressionTokenizer;
    ///
    /// let config = ConstructorConfig::builder().allow_function("str").build();
    /// let tokenizer = ExpressionTokenizer::new();
    /// let constructor = TriggerConstructor::with_config(&tokenizer, config);
    /// assert!(constructor.config().is_allowed("str"));
    /// ```
    pub fn with_config(tokenizer: &'a dyn Tokenize, config: ConstructorConfig) -> Self {
        Self { tokenizer, config }
    }

    /// Returns a reference to the constructor configuration.
    pub fn config(&self) -> &ConstructorConfig {
        &self.config
    }

    /// Builds the trigger expression for `host:key` from wizard fragments.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](crate::encode).
    pub fn expression_from_parts(
        &self,
        host: &str,
        key: &str,
        parts: &[ConditionFragment],
    ) -> ConstructorResult<String> {
        encode_with_config(host, key, parts, &self.config)
    }

    /// Breaks a stored trigger expression into wizard fragments.
    ///
    /// # Errors
    ///
    /// * [`ConstructorError::Tokenize`](crate::ConstructorError::Tokenize) if the tokenizer rejects the expression
    pub fn parts_from_expression(&self, expression: &str) -> ConstructorResult<Vec<ConditionFragment>> {
        let tokens = self.tokenizer.tokenize(expression).map_err(|err| {
            debug!(%expression, error = %err, "failed to tokenize trigger expression");
            err
        })?;
        Ok(decode(&tokens))
    }
}
