#![doc = include_str!("../README.md")]

mod dispatch;
mod error;
mod signature;
mod subscript;
mod value;

pub use crate::{
    dispatch::{bind_item_call, AccessMode, ItemCall, ItemTarget},
    error::{BindError, BindErrorKind},
    signature::{BoundCall, ParameterSpec, Signature},
    subscript::{Keywords, NamedEntry, NamedItem, Positionals, RawSubscript, SubscriptEntries, UnpackKey},
    value::{ScalarId, Slice, SliceBound, Tuple, Value},
};
