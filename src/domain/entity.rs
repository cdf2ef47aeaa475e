//! Core entity trait.
//!
//! Every record owned by the local store carries a string identifier;
//! the trait lets collection handling stay generic over the record type.

/// Core trait for all stored records
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the record's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the record's unique identifier
    fn id(&self) -> Self::Id;
}
