//! Opaque references to the relations and columns a join plan talks about. They are resolved by
//! the catalog; the descriptor only compares, hashes, prints and ships them.

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use serde::{de::DeserializeOwned, Serialize};

pub trait TableRef:
    Eq + Hash + Clone + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

pub trait ColumnRef:
    Eq + Hash + Clone + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Bare names, for planners that do not carry catalog handles around.
impl TableRef for String {}

impl ColumnRef for String {}
