use thiserror::Error;

/// Construction-time failures.
///
/// Runtime absence (an unmapped action, a device key with no signal yet) is
/// never an error; those surface as `None` from the query methods.
#[derive(Debug, Error)]
pub enum InputError {
    /// A mapping table refers to an adapter that has no factory.
    #[error("{mapping} mapping references unknown adapter `{adapter}`")]
    UnknownAdapter {
        /// Which table held the reference (`"button"` or `"axis"`).
        mapping: &'static str,
        adapter: String,
    },

    /// Two adapters were registered under the same name.
    #[error("duplicate adapter name `{0}`")]
    DuplicateAdapter(String),

    /// A composite keyboard axis pattern did not match `Axis(<code>, <code>)`.
    #[error("invalid composite axis pattern `{0}`")]
    InvalidAxisPattern(String),
}
