// Infrastructure: storage trait and its implementations

pub mod pg_store;
pub mod test_dependencies;
pub mod traits;

pub use pg_store::PgTvStore;
pub use test_dependencies::{FailingTvStore, InMemoryTvStore, StoreCall};
pub use traits::*;
