//! Normalization configuration.

/// Environment variable that enables the debug dump when set to `1`.
pub const DUMP_ENV_VAR: &str = "GARNET_DUMP_SSA";

/// Normalization options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Print each normalized top-level tree to stderr.
    pub dump_tree: bool,
}

impl NormalizeConfig {
    /// Read options from the environment.
    pub fn from_env() -> Self {
        NormalizeConfig {
            dump_tree: std::env::var(DUMP_ENV_VAR).is_ok_and(|value| value == "1"),
        }
    }
}
