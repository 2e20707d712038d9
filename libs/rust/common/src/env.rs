//! Environment sources and permissive parsing.
//!
//! Configuration is read through [`EnvSource`] so that the same loading
//! code runs against the real process environment and against in-memory
//! maps in tests, without mutating process state.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::HarnessError;

/// A read-only source of environment variables.
pub trait EnvSource {
    /// Returns the value of `name`, or `None` when unset or not valid UTF-8.
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Build an in-memory environment from name/value pairs.
///
/// ```
/// use meugrind_common::{EnvSource, env_vars};
///
/// let env = env_vars([("FAST_CHECK_SEED", "7")]);
/// assert_eq!(env.var("FAST_CHECK_SEED").as_deref(), Some("7"));
/// ```
pub fn env_vars<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> HashMap<String, String>
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// Parse an environment variable, reporting malformed values.
///
/// Returns `Ok(None)` when the variable is unset. Surrounding whitespace
/// is ignored.
pub fn try_parse_env<T, E>(env: &E, name: &str) -> Result<Option<T>, HarnessError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    E: EnvSource + ?Sized,
{
    match env.var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| HarnessError::config_parse(name, raw.as_str(), e.to_string())),
        None => Ok(None),
    }
}

/// Parse an environment variable with a default value.
///
/// Unset and unparsable values both yield `default`; a malformed value is
/// logged at debug level and otherwise ignored.
pub fn parse_env_or<T, E>(env: &E, name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
    E: EnvSource + ?Sized,
{
    match try_parse_env(env, name) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(err) => {
            tracing::debug!(error = %err, "falling back to default");
            default
        }
    }
}

/// Returns true only when `name` is set to the literal `"true"`.
pub fn flag_enabled<E: EnvSource + ?Sized>(env: &E, name: &str) -> bool {
    env.var(name).as_deref() == Some("true")
}
