use crate::domain::model::book::{Book, CreateBookInput, UpdateBookInput};
use crate::domain::model::id::BookId;
use crate::domain::repository::BookRepository;

use super::error::AppError;

/// Book Collectionに対するユースケース。
/// 各操作はRepositoryの1回の read / write の中で完結する。
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 全Bookを挿入順で返す。件数は `len()` で得る。
    pub fn list_books(&self) -> Result<Vec<Book>, AppError> {
        self.repo
            .read(|c| c.books().to_vec())
            .map_err(Self::storage)
    }

    pub fn get_book(&self, id: BookId) -> Result<Book, AppError> {
        let book = self
            .repo
            .read(|c| c.get(id).cloned())
            .map_err(Self::storage)??;
        Ok(book)
    }

    /// Bookを作成する。IDはCollectionが採番する。
    pub fn create_book(&self, input: CreateBookInput) -> Result<Book, AppError> {
        self.repo
            .write(|c| c.create(input).clone())
            .map_err(Self::storage)
    }

    /// Bookを更新する。空文字のフィールドは無視される。
    pub fn update_book(&self, id: BookId, input: UpdateBookInput) -> Result<Book, AppError> {
        let book = self
            .repo
            .write(|c| c.update(id, input).cloned())
            .map_err(Self::storage)??;
        Ok(book)
    }

    /// Bookを削除し、削除したレコードを返す。
    pub fn delete_book(&self, id: BookId) -> Result<Book, AppError> {
        let book = self
            .repo
            .write(|c| c.delete(id))
            .map_err(Self::storage)??;
        Ok(book)
    }

    // --- private ---

    fn storage(e: R::Error) -> AppError {
        AppError::Storage(Box::new(e))
    }
}
