use std::{
    any::type_name,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use slotmap::new_key_type;

use crate::core::{tree::Tree, view::View};

new_key_type! {
    /// Generational identifier for a node stored in the view tree arena.
    pub struct NodeId;
}

/// A node identifier that remembers the concrete view type it was created with.
///
/// Returned by the typed insertion helpers so callers can downcast the view
/// back without naming the type again. Equality and hashing look only at the
/// node, so a `TypedId<V>` compares equal to the bare [`NodeId`] it wraps.
pub struct TypedId<V> {
    /// Untyped node identifier.
    id: NodeId,
    /// Marker for the view type.
    _marker: PhantomData<fn() -> V>,
}

impl<V> TypedId<V> {
    /// Wrap an untyped node identifier without checking the view type.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The untyped identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<V: View> TypedId<V> {
    /// Recover a typed id from a bare one, such as a hit-test result. `None`
    /// unless the node is live and its view is a `V`.
    pub fn resolve(tree: &Tree, id: NodeId) -> Option<Self> {
        tree.view::<V>(id).map(|_| Self::new(id))
    }
}

impl<V> Clone for TypedId<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for TypedId<V> {}

impl<V> PartialEq for TypedId<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<V> Eq for TypedId<V> {}

impl<V> PartialEq<NodeId> for TypedId<V> {
    fn eq(&self, other: &NodeId) -> bool {
        self.id == *other
    }
}

impl<V> Hash for TypedId<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<V> fmt::Debug for TypedId<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = type_name::<V>().rsplit("::").next().unwrap_or_default();
        write!(f, "{name}({:?})", self.id)
    }
}

impl<V> From<TypedId<V>> for NodeId {
    fn from(value: TypedId<V>) -> Self {
        value.id
    }
}
