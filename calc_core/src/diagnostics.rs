//! # Degraded Results
//!
//! Some lookups fall back silently when a catalog reference cannot be
//! resolved: an unknown system is treated as having zero deductions and an
//! unpriced profile contributes nothing to the cost. Those results are
//! still returned, wrapped in [`Computed`] together with the list of
//! [`Fallback`]s that were applied, so a caller can tell a clean result
//! from one computed with substitutions.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A default that was substituted for an unresolved reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fallback {
    /// Profile has no entry in the price table; its cost was omitted
    MissingPrice { profile_code: String },
    /// Profile is priced by weight but has no weight per meter; weight taken as 0
    MissingWeight { profile_code: String },
    /// System id is not in the catalog; zero deductions were used
    UnknownSystem { system_id: String },
}

impl Fallback {
    pub fn message(&self) -> String {
        match self {
            Fallback::MissingPrice { profile_code } => {
                format!("No price for profile '{}', cost omitted", profile_code)
            }
            Fallback::MissingWeight { profile_code } => {
                format!(
                    "Profile '{}' is priced by weight but has no weight per meter",
                    profile_code
                )
            }
            Fallback::UnknownSystem { system_id } => {
                format!("Unknown system '{}', zero deductions used", system_id)
            }
        }
    }

    fn into_error(self) -> CalcError {
        match self {
            Fallback::MissingPrice { profile_code } => {
                CalcError::unresolved_reference("profile price", profile_code)
            }
            Fallback::MissingWeight { profile_code } => {
                CalcError::unresolved_reference("profile weight", profile_code)
            }
            Fallback::UnknownSystem { system_id } => {
                CalcError::unresolved_reference("system", system_id)
            }
        }
    }
}

impl std::fmt::Display for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// A computed value plus the fallbacks applied while computing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Computed<T> {
    pub value: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
}

impl<T> Computed<T> {
    /// A result computed without substitutions
    pub fn clean(value: T) -> Self {
        Computed {
            value,
            fallbacks: Vec::new(),
        }
    }

    pub fn with_fallbacks(value: T, fallbacks: Vec<Fallback>) -> Self {
        Computed { value, fallbacks }
    }

    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Computed<U> {
        Computed {
            value: f(self.value),
            fallbacks: self.fallbacks,
        }
    }

    /// Move the fallbacks of `other` into `self` and return its value
    pub fn absorb<U>(&mut self, other: Computed<U>) -> U {
        self.fallbacks.extend(other.fallbacks);
        other.value
    }

    /// Discard the diagnostics
    pub fn into_value(self) -> T {
        self.value
    }

    /// Fail on the first fallback, otherwise return the value
    pub fn into_strict(self) -> CalcResult<T> {
        match self.fallbacks.into_iter().next() {
            Some(fallback) => Err(fallback.into_error()),
            None => Ok(self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        let c = Computed::clean(5);
        assert!(c.is_clean());
        assert_eq!(c.into_strict().unwrap(), 5);
    }

    #[test]
    fn test_strict_rejects_fallback() {
        let c = Computed::with_fallbacks(
            1.0,
            vec![Fallback::UnknownSystem { system_id: "ghost".into() }],
        );
        let err = c.into_strict().unwrap_err();
        assert_eq!(err, CalcError::unresolved_reference("system", "ghost"));
    }

    #[test]
    fn test_absorb_and_map() {
        let mut outer = Computed::clean(());
        let inner = Computed::with_fallbacks(
            3,
            vec![Fallback::MissingPrice { profile_code: "X".into() }],
        );
        let v = outer.absorb(inner);
        assert_eq!(v, 3);
        assert_eq!(outer.fallbacks.len(), 1);

        let mapped = outer.map(|_| "done");
        assert_eq!(mapped.value, "done");
        assert!(!mapped.is_clean());
    }

    #[test]
    fn test_fallback_json() {
        let f = Fallback::MissingPrice { profile_code: "FRAME".into() };
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"kind":"missing_price","profile_code":"FRAME"}"#);
        assert!(f.to_string().contains("FRAME"));
    }
}
