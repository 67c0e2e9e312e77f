use crate::{error::BindError, subscript::Keywords, value::Value};

/// A single declared parameter of a target operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParameterSpec {
    /// Declared name, used for duplicate detection and error messages.
    pub name: String,
    /// True for parameters filled purely by position (leading slots).
    pub accepts_positional: bool,
    /// Default value, cloned into the call when no entry supplies the
    /// parameter. `None` makes the parameter required.
    pub default: Option<Value>,
}

impl ParameterSpec {
    /// A leading parameter, filled purely by position.
    #[must_use]
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accepts_positional: true,
            default: None,
        }
    }

    /// A parameter fillable only by name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accepts_positional: false,
            default: None,
        }
    }

    /// Attaches a default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// The declared parameter list of one target operation.
///
/// Built once per target operation and reused across resolutions; a
/// signature is immutable plain data and individual binds never observe
/// each other. The layout is:
///
/// * `leading` — parameters consumed purely positionally: the index slot,
///   and for set operations the value slot right after it.
/// * `extra` — parameters fillable only by named entries, in declaration
///   order, each optionally carrying a default.
/// * `catch_all` — optional name of a trailing parameter absorbing any
///   named entries left unmatched after `extra` is resolved.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Signature {
    leading: Vec<ParameterSpec>,
    extra: Vec<ParameterSpec>,
    catch_all: Option<String>,
}

impl Signature {
    /// Creates a signature from leading and named-only parameters.
    ///
    /// Every leading parameter must accept positional binding.
    #[must_use]
    pub fn new(leading: Vec<ParameterSpec>, extra: Vec<ParameterSpec>) -> Self {
        debug_assert!(
            leading.iter().all(|p| p.accepts_positional),
            "leading parameters are consumed positionally"
        );
        Self {
            leading,
            extra,
            catch_all: None,
        }
    }

    /// Declares a trailing catch-all parameter.
    #[must_use]
    pub fn with_catch_all(mut self, name: impl Into<String>) -> Self {
        self.catch_all = Some(name.into());
        self
    }

    #[must_use]
    pub fn leading(&self) -> &[ParameterSpec] {
        &self.leading
    }

    #[must_use]
    pub fn extra(&self) -> &[ParameterSpec] {
        &self.extra
    }

    #[must_use]
    pub fn catch_all(&self) -> Option<&str> {
        self.catch_all.as_deref()
    }

    /// Binds a packed index and validated keyword entries to this signature.
    ///
    /// `assigned_value` is present exactly for set operations; it binds to
    /// the second leading slot, immediately after the index, and is never
    /// overridable from the bracket's named entries.
    ///
    /// Binding walks the declaration order, so two resolutions of the same
    /// entries against the same signature always bind identically:
    /// 1. the index (and, in set mode, the assigned value) fill the leading
    ///    slots;
    /// 2. a keyword naming a positionally filled slot fails with
    ///    [`BindError::DuplicateArgument`];
    /// 3. each `extra` parameter consumes its matching keyword, or falls
    ///    back to its default, or fails with
    ///    [`BindError::MissingRequiredKeyword`];
    /// 4. leftover keywords flow to the catch-all in collection order, or
    ///    fail with [`BindError::UnexpectedKeyword`] citing the first one.
    pub fn bind(
        &self,
        index: Value,
        assigned_value: Option<Value>,
        mut keywords: Keywords,
    ) -> Result<BoundCall, BindError> {
        let leading_bound = if assigned_value.is_some() { 2 } else { 1 };
        debug_assert!(
            self.leading.len() >= leading_bound,
            "signature declares too few leading slots for this operation"
        );

        for param in self.leading.iter().take(leading_bound) {
            if keywords.contains_key(&param.name) {
                return Err(BindError::DuplicateArgument(param.name.clone()));
            }
        }

        let mut bound = Keywords::with_capacity_and_hasher(self.extra.len(), Default::default());
        for param in &self.extra {
            if let Some(value) = keywords.shift_remove(&param.name) {
                bound.insert(param.name.clone(), value);
            } else if let Some(default) = &param.default {
                bound.insert(param.name.clone(), default.clone());
            } else {
                return Err(BindError::MissingRequiredKeyword(param.name.clone()));
            }
        }

        let overflow = match &self.catch_all {
            Some(_) => Some(keywords),
            None => {
                if let Some((name, _)) = keywords.iter().next() {
                    return Err(BindError::UnexpectedKeyword(name.clone()));
                }
                None
            }
        };

        Ok(BoundCall {
            index,
            assigned_value,
            keywords: bound,
            overflow,
        })
    }
}

/// A fully resolved call, ready for reshaping toward the target.
///
/// No partially filled `BoundCall` exists: binding either produces all
/// fields or fails. `overflow` is `Some` exactly when the signature
/// declares a catch-all parameter, even if no entries flowed into it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundCall {
    /// The packed positional index.
    pub index: Value,
    /// The value being assigned, present only for set operations.
    pub assigned_value: Option<Value>,
    /// Resolved named arguments, one per `extra` parameter, in declaration
    /// order.
    pub keywords: Keywords,
    /// Entries absorbed by the catch-all parameter, in collection order.
    pub overflow: Option<Keywords>,
}
