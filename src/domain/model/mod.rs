pub mod book;
pub mod collection;
pub mod id;
