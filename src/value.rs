use std::fmt;

use smallvec::SmallVec;

/// Opaque handle to an evaluated expression result held by the external
/// evaluator.
///
/// The binding engine never inspects what a scalar is; it only moves the
/// handle into the right slot of the final call. The evaluator that owns
/// the actual objects resolves handles back to values after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ScalarId(u64);

impl ScalarId {
    /// Creates a handle from the evaluator's raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id for the evaluator to resolve.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScalarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<scalar {}>", self.0)
    }
}

/// Inline capacity for tuple items. Subscripts rarely carry more than three
/// positional entries, so packed tuples of that size avoid a second
/// allocation beyond the tuple box itself.
const TUPLE_INLINE_CAPACITY: usize = 3;

/// Storage type for tuple items.
pub(crate) type TupleItems = SmallVec<[Value; TUPLE_INLINE_CAPACITY]>;

/// Everything that can appear in a subscript slot.
///
/// Payloads are opaque from the engine's perspective except for their tag:
/// the binder packs, routes, and compares values but never looks inside a
/// scalar. Large payloads are boxed to keep `Value` itself small, since
/// values are moved around freely during packing and binding.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// An evaluated expression result, by handle.
    Scalar(ScalarId),
    /// A slice expression such as `a:b:c`, endpoints already normalized by
    /// the expression parser.
    Slice(Box<Slice>),
    /// The literal `...`.
    Ellipsis,
    /// An ordered sequence of values, notably the packed positional index.
    Tuple(Tuple),
}

impl Value {
    /// Creates a scalar value from the evaluator's raw handle id.
    #[must_use]
    pub const fn scalar(raw: u64) -> Self {
        Self::Scalar(ScalarId::new(raw))
    }

    /// Creates a slice value.
    #[must_use]
    pub fn slice(slice: Slice) -> Self {
        Self::Slice(Box::new(slice))
    }

    /// Creates an empty tuple value.
    #[must_use]
    pub fn empty_tuple() -> Self {
        Self::Tuple(Tuple::empty())
    }
}

impl From<Tuple> for Value {
    fn from(tuple: Tuple) -> Self {
        Self::Tuple(tuple)
    }
}

/// A slice with up to three endpoints.
///
/// A textually omitted endpoint is `SliceBound::Unspecified`, a sentinel
/// distinct from every value. Only the upstream slice-normalization step
/// produces the sentinel; mapping unpacking and literal entries cannot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Slice {
    pub start: SliceBound,
    pub stop: SliceBound,
    pub step: SliceBound,
}

impl Slice {
    #[must_use]
    pub fn new(start: SliceBound, stop: SliceBound, step: SliceBound) -> Self {
        Self { start, stop, step }
    }

    /// The full slice `[:]`, all endpoints unspecified.
    #[must_use]
    pub fn full() -> Self {
        Self::new(SliceBound::Unspecified, SliceBound::Unspecified, SliceBound::Unspecified)
    }
}

/// One endpoint of a [`Slice`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SliceBound {
    /// Endpoint textually omitted.
    Unspecified,
    /// Endpoint present.
    Bound(Value),
}

impl SliceBound {
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl From<Value> for SliceBound {
    fn from(value: Value) -> Self {
        Self::Bound(value)
    }
}

/// An ordered, immutable sequence of values.
///
/// Items live behind a single box so `Value::Tuple` stays pointer-sized;
/// up to three items share that one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Tuple {
    items: Box<TupleItems>,
}

impl Tuple {
    pub(crate) fn new(items: TupleItems) -> Self {
        Self { items: Box::new(items) }
    }

    /// Creates an empty tuple.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(items: Vec<Value>) -> Self {
        Self::new(TupleItems::from_vec(items))
    }
}
