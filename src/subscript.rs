use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::{
    error::BindError,
    value::{Tuple, Value},
};

/// Storage type for the positional entries of a subscript.
///
/// Inline capacity mirrors the tuple inline size: almost every subscript
/// carries between one and three positional entries.
pub type Positionals = SmallVec<[Value; 3]>;

/// Ordered name-to-value mapping for keyword entries.
///
/// Insertion order is an externally observable guarantee: entries appear in
/// left-to-right evaluation order, and catch-all overflow is forwarded in
/// the same order.
pub type Keywords = IndexMap<String, Value, ahash::RandomState>;

/// A name-bound value within a subscript.
///
/// Produced directly from a `name=value` entry, or by expanding a
/// mapping-unpacking entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NamedEntry {
    pub name: String,
    pub value: Value,
}

impl NamedEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A key produced by expanding a `**mapping` entry.
///
/// The evaluator expands the mapping into pairs before handing them over;
/// keys it could not read as strings arrive as `NonString` and are rejected
/// by the collector.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnpackKey {
    Name(String),
    NonString(Value),
}

impl UnpackKey {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

/// One element of the named segment of a subscript, in textual order.
///
/// Unpacking sources ride inline in the sequence rather than in a parallel
/// list, so that expansion happens exactly at the source's textual position
/// and the left-to-right ordering of the flattened entries is preserved.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NamedItem {
    /// A literal `name=value` entry.
    Entry(NamedEntry),
    /// A `**mapping` entry, already expanded to pairs by the evaluator.
    Unpack(Vec<(UnpackKey, Value)>),
}

/// The parsed contents of a bracketed element-access expression.
///
/// All values are already evaluated by the caller, in left-to-right textual
/// order with positional entries before named entries. The engine preserves
/// that order; it never triggers evaluation itself.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawSubscript {
    /// Positional entries, in order.
    pub positionals: Positionals,
    /// Named segment, literal entries and unpacking sources interleaved in
    /// textual order.
    pub named: Vec<NamedItem>,
    /// True when the source ended the positional list with a separator,
    /// requesting tuple wrapping for a single element (`obj[x,]`).
    pub trailing_comma: bool,
}

impl RawSubscript {
    #[must_use]
    pub fn new(
        positionals: impl IntoIterator<Item = Value>,
        named: Vec<NamedItem>,
        trailing_comma: bool,
    ) -> Self {
        Self {
            positionals: positionals.into_iter().collect(),
            named,
            trailing_comma,
        }
    }

    /// The common case: a single positional index, nothing named.
    #[must_use]
    pub fn index_only(value: Value) -> Self {
        Self::new([value], Vec::new(), false)
    }

    /// Returns true if the named segment contains any unpacking source.
    #[must_use]
    pub fn has_unpacking(&self) -> bool {
        self.named.iter().any(|item| matches!(item, NamedItem::Unpack(_)))
    }

    /// Assembles and validates the subscript's entries.
    ///
    /// Expands unpacking sources in place, flattening the named segment into
    /// one ordered keyword collection. Fails with:
    /// * [`BindError::EmptySubscript`] if there are no entries at all,
    /// * [`BindError::InvalidUnpackKey`] if an unpacking source produced a
    ///   non-string key,
    /// * [`BindError::DuplicateKeyword`] if a name appears twice, whatever
    ///   the origins of the two entries.
    pub fn collect(self) -> Result<SubscriptEntries, BindError> {
        if self.positionals.is_empty() && self.named.is_empty() {
            return Err(BindError::EmptySubscript);
        }

        let mut keywords = Keywords::default();
        for item in self.named {
            match item {
                NamedItem::Entry(entry) => insert_keyword(&mut keywords, entry.name, entry.value)?,
                NamedItem::Unpack(pairs) => {
                    for (key, value) in pairs {
                        match key {
                            UnpackKey::Name(name) => insert_keyword(&mut keywords, name, value)?,
                            UnpackKey::NonString(_) => return Err(BindError::InvalidUnpackKey),
                        }
                    }
                }
            }
        }

        Ok(SubscriptEntries {
            positionals: self.positionals,
            trailing_comma: self.trailing_comma,
            keywords,
        })
    }
}

fn insert_keyword(keywords: &mut Keywords, name: String, value: Value) -> Result<(), BindError> {
    if keywords.contains_key(&name) {
        return Err(BindError::DuplicateKeyword(name));
    }
    keywords.insert(name, value);
    Ok(())
}

/// A validated subscript: positional entries plus a flattened,
/// duplicate-free keyword collection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubscriptEntries {
    positionals: Positionals,
    trailing_comma: bool,
    keywords: Keywords,
}

impl SubscriptEntries {
    /// Returns the flattened keyword entries in collection order.
    #[must_use]
    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Splits into the packed final index and the keyword collection.
    ///
    /// The packing rule reduces the positional entries to exactly one
    /// value, independent of the keyword entries:
    /// * zero entries pack to the empty tuple,
    /// * one entry passes through unchanged, unless the trailing separator
    ///   requested wrapping, in which case it packs to a 1-tuple,
    /// * two or more entries pack to a tuple preserving order.
    #[must_use]
    pub fn into_parts(self) -> (Value, Keywords) {
        (pack_index(self.positionals, self.trailing_comma), self.keywords)
    }
}

fn pack_index(positionals: Positionals, trailing_comma: bool) -> Value {
    match positionals.len() {
        0 => Value::empty_tuple(),
        1 => {
            let sole = positionals
                .into_iter()
                .next()
                .expect("length checked above");
            if trailing_comma {
                Value::Tuple(Tuple::from_iter([sole]))
            } else {
                sole
            }
        }
        _ => Value::Tuple(positionals.into_iter().collect()),
    }
}
