use crate::{
    error::BindError,
    signature::{BoundCall, Signature},
    subscript::{Keywords, RawSubscript},
    value::Value,
};

/// Which element-access operation the surrounding expression selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum AccessMode {
    Get,
    Set,
    Delete,
}

/// A bound call reshaped for its target operation.
///
/// Get and delete forward the index, keywords and overflow; set carries the
/// assigned value as an extra positional slot placed before the named
/// arguments. This is pure reshaping: all validation happened during
/// collection and binding.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ItemCall {
    Get {
        index: Value,
        keywords: Keywords,
        overflow: Option<Keywords>,
    },
    Set {
        index: Value,
        value: Value,
        keywords: Keywords,
        overflow: Option<Keywords>,
    },
    Delete {
        index: Value,
        keywords: Keywords,
        overflow: Option<Keywords>,
    },
}

impl ItemCall {
    #[must_use]
    pub fn mode(&self) -> AccessMode {
        match self {
            Self::Get { .. } => AccessMode::Get,
            Self::Set { .. } => AccessMode::Set,
            Self::Delete { .. } => AccessMode::Delete,
        }
    }

    /// Hands the call to the target's matching operation.
    ///
    /// Returns `Some(value)` for a get, `None` for set and delete. Target
    /// errors pass through untouched.
    pub fn invoke<T: ItemTarget>(self, target: &mut T) -> Result<Option<Value>, T::Error> {
        match self {
            Self::Get {
                index,
                keywords,
                overflow,
            } => target.get(index, keywords, overflow).map(Some),
            Self::Set {
                index,
                value,
                keywords,
                overflow,
            } => target.set(index, value, keywords, overflow).map(|()| None),
            Self::Delete {
                index,
                keywords,
                overflow,
            } => target.delete(index, keywords, overflow).map(|()| None),
        }
    }
}

impl BoundCall {
    /// Reshapes this bound call for the given operation.
    ///
    /// Set mode consumes the assigned value bound earlier; the other modes
    /// require that none was bound.
    #[must_use]
    pub fn into_item_call(self, mode: AccessMode) -> ItemCall {
        debug_assert_eq!(
            self.assigned_value.is_some(),
            mode == AccessMode::Set,
            "assigned value must be bound exactly for set operations"
        );
        let Self {
            index,
            assigned_value,
            keywords,
            overflow,
        } = self;
        match mode {
            AccessMode::Get => ItemCall::Get {
                index,
                keywords,
                overflow,
            },
            AccessMode::Set => ItemCall::Set {
                index,
                value: assigned_value.expect("assigned value bound for set operations"),
                keywords,
                overflow,
            },
            AccessMode::Delete => ItemCall::Delete {
                index,
                keywords,
                overflow,
            },
        }
    }
}

/// Capability interface of an addressable target.
///
/// The engine never looks up operations by name on the target; a target
/// simply implements the three entry points and the shaped call selects
/// one. `overflow` is `Some` exactly when the operation's signature
/// declares a catch-all parameter.
pub trait ItemTarget {
    /// Error type produced by the target's own operations.
    type Error;

    fn get(&mut self, index: Value, keywords: Keywords, overflow: Option<Keywords>) -> Result<Value, Self::Error>;

    fn set(
        &mut self,
        index: Value,
        value: Value,
        keywords: Keywords,
        overflow: Option<Keywords>,
    ) -> Result<(), Self::Error>;

    fn delete(&mut self, index: Value, keywords: Keywords, overflow: Option<Keywords>) -> Result<(), Self::Error>;
}

/// Resolves one element-access expression end to end.
///
/// Chains collection, index packing, signature binding and reshaping into
/// the call description the target's operation expects. `assigned_value`
/// must be `Some` exactly in set mode.
pub fn bind_item_call(
    raw: RawSubscript,
    signature: &Signature,
    mode: AccessMode,
    assigned_value: Option<Value>,
) -> Result<ItemCall, BindError> {
    debug_assert_eq!(
        assigned_value.is_some(),
        mode == AccessMode::Set,
        "assigned value must be supplied exactly for set operations"
    );
    let entries = raw.collect()?;
    let (index, keywords) = entries.into_parts();
    let bound = signature.bind(index, assigned_value, keywords)?;
    Ok(bound.into_item_call(mode))
}
