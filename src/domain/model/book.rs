use serde::{Deserialize, Serialize};

use super::id::BookId;
use crate::domain::error::DomainError;

/// Book作成入力。title/authorともに非空であることを構築時に検証済み。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookInput {
    title: String,
    author: String,
}

impl CreateBookInput {
    /// 欠落・空文字のフィールドがあれば `InvalidInput`。
    pub fn new(title: Option<String>, author: Option<String>) -> Result<Self, DomainError> {
        match (non_empty(title), non_empty(author)) {
            (Some(title), Some(author)) => Ok(Self { title, author }),
            _ => Err(DomainError::InvalidInput(
                "Title and Author are required".to_string(),
            )),
        }
    }

    /// 検証済みの定数データ用
    pub(crate) fn trusted(title: &str, author: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

/// Book更新入力（Noneのフィールドは変更しない）。
///
/// 空文字は「未指定」と同じ扱いで、フィールドのクリアには使えない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBookInput {
    title: Option<String>,
    author: Option<String>,
}

impl UpdateBookInput {
    pub fn new(title: Option<String>, author: Option<String>) -> Self {
        Self {
            title: non_empty(title),
            author: non_empty(author),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// 書籍レコード。BookCollectionが所有し、Collectionを通じて操作する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
}

impl Book {
    pub(crate) fn new(id: BookId, input: CreateBookInput) -> Self {
        Self {
            id,
            title: input.title,
            author: input.author,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub(crate) fn apply(&mut self, input: UpdateBookInput) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(author) = input.author {
            self.author = author;
        }
    }
}
