/// Runtime mirror of a [`ParseConfig`].
///
/// The facade matches on these flags once at the top of
/// [`Parser::parse_into_with`](crate::Parser::parse_into_with) and forwards
/// to the matching compile-time [`Config`], so no per-token branch depends on
/// them.
///
/// # Examples
///
/// ```rust
/// use jsonfront::{ParseOptions, Parser, Value};
///
/// let options = ParseOptions {
///     validate_json: true,
///     ..Default::default()
/// };
/// let mut parser = Parser::new();
/// let mut value = Value::Null;
/// assert!(parser.parse_into_with(options, &mut value, b"[true]"));
/// ```
///
/// # Default
///
/// All options default to `false`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Run the [`Validate`](crate::Validate) collaborator over the whole
    /// buffer before structural decoding starts.
    ///
    /// # Default
    ///
    /// `false`
    pub validate_json: bool,

    /// Assume the input contains no insignificant whitespace.
    ///
    /// Decoding then never looks for whitespace between tokens; any
    /// whitespace that is present is reported as an unexpected character.
    ///
    /// # Default
    ///
    /// `false`
    pub minified: bool,
}

/// Compile-time parse configuration.
///
/// Every check of these constants is resolved during monomorphization, so a
/// disabled feature adds no code to the decode path.
pub trait ParseConfig {
    /// See [`ParseOptions::validate_json`].
    const VALIDATE_JSON: bool;
    /// See [`ParseOptions::minified`].
    const MINIFIED: bool;

    /// The same flags as a runtime value.
    const OPTIONS: ParseOptions = ParseOptions {
        validate_json: Self::VALIDATE_JSON,
        minified: Self::MINIFIED,
    };
}

/// Zero-sized carrier for a [`ParseConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config<const VALIDATE_JSON: bool = false, const MINIFIED: bool = false>;

impl<const VALIDATE_JSON: bool, const MINIFIED: bool> ParseConfig
    for Config<VALIDATE_JSON, MINIFIED>
{
    const VALIDATE_JSON: bool = VALIDATE_JSON;
    const MINIFIED: bool = MINIFIED;
}

/// No pre-validation, whitespace allowed.
pub type DefaultConfig = Config;
/// Pre-validate the buffer before decoding.
pub type Validated = Config<true, false>;
/// Input carries no insignificant whitespace.
pub type Minified = Config<false, true>;
/// Pre-validate, and assume minified input.
pub type ValidatedMinified = Config<true, true>;
