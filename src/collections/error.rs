use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("{collection} is empty")]
    Empty { collection: &'static str },

    #[error("element not found in {collection}")]
    NotFound { collection: &'static str },
}

impl CollectionError {
    pub(crate) fn empty(collection: &'static str) -> Self {
        CollectionError::Empty { collection }
    }

    pub(crate) fn not_found(collection: &'static str) -> Self {
        CollectionError::NotFound { collection }
    }
}
