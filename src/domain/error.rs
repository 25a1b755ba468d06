use super::model::id::BookId;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Book with ID {0} not found")]
    BookNotFound(BookId),

    #[error("{0}")]
    InvalidInput(String),
}
