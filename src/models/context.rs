use serde::{Deserialize, Serialize};

use super::error::{UtilResult, UtilityError};

/// Default value of the shared constant.
pub const DEFAULT_SHARED_CONSTANT: f64 = 3.0;

/// Caller-owned library state.
///
/// Holds the shared constant that the C surface exposes as the raw global
/// `My_variable`. Rust callers pass a context explicitly instead of touching
/// process-wide state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryContext {
    /// The shared floating-point constant. Always finite.
    shared_constant: f64,
}

impl LibraryContext {
    /// A context holding [`DEFAULT_SHARED_CONSTANT`], usable in `static`s.
    pub const DEFAULT: LibraryContext = LibraryContext {
        shared_constant: DEFAULT_SHARED_CONSTANT,
    };

    /// Creates a context holding the default constant.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Creates a context holding `value`, rejecting NaN and infinities.
    pub fn with_shared_constant(value: f64) -> UtilResult<Self> {
        let mut ctx = Self::new();
        ctx.set_shared_constant(value)?;
        Ok(ctx)
    }

    /// Loads a context from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> UtilResult<Self> {
        let ctx: LibraryContext = serde_json::from_str(json)?;
        if !ctx.shared_constant.is_finite() {
            return Err(UtilityError::InvalidConstant(ctx.shared_constant));
        }
        Ok(ctx)
    }

    pub fn shared_constant(&self) -> f64 {
        self.shared_constant
    }

    pub fn set_shared_constant(&mut self, value: f64) -> UtilResult<()> {
        if !value.is_finite() {
            tracing::warn!(value, "rejected non-finite shared constant");
            return Err(UtilityError::InvalidConstant(value));
        }
        self.shared_constant = value;
        Ok(())
    }
}

impl Default for LibraryContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constant_is_three() {
        assert_eq!(LibraryContext::new().shared_constant(), 3.0);
        assert_eq!(LibraryContext::default(), LibraryContext::new());
    }

    #[test]
    fn test_repeated_reads_are_stable() {
        let ctx = LibraryContext::with_shared_constant(2.5).unwrap();
        let first = ctx.shared_constant();
        for _ in 0..100 {
            assert_eq!(ctx.shared_constant(), first);
        }
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let mut ctx = LibraryContext::new();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ctx.set_shared_constant(bad).unwrap_err();
            assert!(matches!(err, UtilityError::InvalidConstant(_)), "{bad} should be rejected");
        }
        assert_eq!(
            ctx.shared_constant(),
            DEFAULT_SHARED_CONSTANT,
            "failed writes must not change the value"
        );
    }

    #[test]
    fn test_from_json_uses_defaults() {
        let ctx = LibraryContext::from_json("{}").unwrap();
        assert_eq!(ctx.shared_constant(), DEFAULT_SHARED_CONSTANT);

        let ctx = LibraryContext::from_json(r#"{"shared_constant": -1.25}"#).unwrap();
        assert_eq!(ctx.shared_constant(), -1.25);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = LibraryContext::from_json("not json").unwrap_err();
        assert!(matches!(err, UtilityError::InvalidRequest(_)));
    }

    #[test]
    fn test_serializes_round_trip() {
        let ctx = LibraryContext::with_shared_constant(9.75).unwrap();
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(json, r#"{"shared_constant":9.75}"#);
    }
}
