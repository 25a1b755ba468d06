use super::model::collection::BookCollection;

/// Collection保持の抽象。Infra層が実装する。
///
/// 1操作 = 1回の `read`/`write` 呼び出し。クロージャ実行中は他の操作と交錯しない。
pub trait BookRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    fn read<T>(&self, f: impl FnOnce(&BookCollection) -> T) -> Result<T, Self::Error>;
    fn write<T>(&self, f: impl FnOnce(&mut BookCollection) -> T) -> Result<T, Self::Error>;
}
