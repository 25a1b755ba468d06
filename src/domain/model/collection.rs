use super::book::{Book, CreateBookInput, UpdateBookInput};
use super::id::BookId;
use crate::domain::error::DomainError;

/// 起動時に投入される初期データ (title, author)。
const SEED: [(&str, &str); 3] = [
    ("The Great Gatsby", "F. Scott Fitzgerald"),
    ("To Kill a Mockingbird", "Harper Lee"),
    ("1984", "George Orwell"),
];

/// Book Collection。集約ルート。全Book操作はここを経由する。
///
/// 挿入順を保持し、IDは単調増加カウンタで採番する（削除後も再利用しない）。
#[derive(Debug, Clone)]
pub struct BookCollection {
    books: Vec<Book>,
    next_id: BookId,
}

impl Default for BookCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl BookCollection {
    /// 空のCollection。最初のIDは1。
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            next_id: BookId::FIRST,
        }
    }

    /// 初期データ3件入りのCollection。次のIDは4。
    pub fn seeded() -> Self {
        let mut collection = Self::new();
        for (title, author) in SEED {
            collection.create(CreateBookInput::trusted(title, author));
        }
        collection
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// 次に採番されるID
    pub fn next_id(&self) -> BookId {
        self.next_id
    }

    pub fn get(&self, id: BookId) -> Result<&Book, DomainError> {
        self.books
            .iter()
            .find(|b| b.id() == id)
            .ok_or(DomainError::BookNotFound(id))
    }

    /// Bookを末尾に追加する。検証は `CreateBookInput` 構築時に済んでいるため失敗しない。
    pub fn create(&mut self, input: CreateBookInput) -> &Book {
        let id = self.next_id;
        self.next_id = id.next();
        self.books.push(Book::new(id, input));
        &self.books[self.books.len() - 1]
    }

    pub fn update(&mut self, id: BookId, input: UpdateBookInput) -> Result<&Book, DomainError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(DomainError::BookNotFound(id))?;
        book.apply(input);
        Ok(book)
    }

    /// Bookを削除して返す。残りの順序は保持。
    pub fn delete(&mut self, id: BookId) -> Result<Book, DomainError> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id() == id)
            .ok_or(DomainError::BookNotFound(id))?;
        Ok(self.books.remove(pos))
    }
}
