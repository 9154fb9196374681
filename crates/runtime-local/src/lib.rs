mod filter;
mod order;
mod storage;

pub use storage::InMemoryStorage;
