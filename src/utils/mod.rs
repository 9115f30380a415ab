pub mod format;
pub mod roster_cache;
