//! Cache backends
//!
//! Two implementations of the application's cache port:
//! - `MemoryCache`: in-process HashMap with lazy TTL eviction
//! - `RedbCache`: embedded Redb store that persists across restarts

mod memory_cache;
mod redb_cache;

pub use memory_cache::MemoryCache;
pub use redb_cache::RedbCache;
