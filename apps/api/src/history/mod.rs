// Analysis history: storage port, record validation, and the record store.

pub mod handlers;
pub mod kv;
pub mod store;
pub mod validation;
