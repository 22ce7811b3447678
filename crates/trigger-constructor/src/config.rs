//! Configuration types for the trigger constructor.

/// Function names accepted in fragments by default.
pub const DEFAULT_FUNCTIONS: [&str; 2] = ["regexp", "iregexp"];

/// Configuration for the trigger constructor.
///
/// # Example
///
/// ```rust
/// use trigger_constructor::ConstructorConfig;
///
/// let config = ConstructorConfig::builder()
///     .allow_function("str")
///     .build();
///
/// assert!(config.is_allowed("regexp"));
/// assert!(config.is_allowed("STR"));
/// assert!(!config.is_allowed("last"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorConfig {
    allowed_functions: Vec<String>,
}

impl Default for ConstructorConfig {
    fn default() -> Self {
        Self {
            allowed_functions: DEFAULT_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl ConstructorConfig {
    /// Creates a new builder for ConstructorConfig.
    pub fn builder() -> ConstructorConfigBuilder {
        ConstructorConfigBuilder::default()
    }

    /// Lowercased names of the functions fragments may call.
    pub fn allowed_functions(&self) -> &[String] {
        &self.allowed_functions
    }

    /// Returns true if `name` is whitelisted, ignoring case.
    pub fn is_allowed(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.allowed_functions.iter().any(|f| *f == name)
    }
}

/// Builder for ConstructorConfig.
#[derive(Debug, Clone)]
pub struct ConstructorConfigBuilder {
    allowed_functions: Vec<String>,
}

impl Default for ConstructorConfigBuilder {
    fn default() -> Self {
        Self {
            allowed_functions: ConstructorConfig::default().allowed_functions,
        }
    }
}

impl ConstructorConfigBuilder {
    /// Replaces the whitelist.
    pub fn with_allowed_functions<I, S>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_functions = Vec::new();
        for function in functions {
            self = self.allow_function(function.as_ref());
        }
        self
    }

    /// Adds a function to the whitelist.
    pub fn allow_function(mut self, function: &str) -> Self {
        let function = function.to_lowercase();
        if !self.allowed_functions.contains(&function) {
            self.allowed_functions.push(function);
        }
        self
    }

    /// Builds the ConstructorConfig.
    pub fn build(self) -> ConstructorConfig {
        ConstructorConfig {
            allowed_functions: self.allowed_functions,
        }
    }
}
