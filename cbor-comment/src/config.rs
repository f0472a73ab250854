/// Configuration for commented rendering
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// The depth at which inline integer comments stop being pushed right.
    /// Comments at depth `d` are preceded by `2 * (max_indent_depth - d - 2)` spaces,
    /// or none once that would be negative, and never more than
    /// [`MAX_PADDING`](crate::transcript::MAX_PADDING).
    pub max_indent_depth: usize,

    /// The deepest nesting of arrays, maps, tags and indefinite-length strings
    /// accepted before decoding fails.
    pub max_recursion: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_indent_depth: 10,
            max_recursion: 64,
        }
    }
}
