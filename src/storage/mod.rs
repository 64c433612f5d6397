// All state lives in memory for the lifetime of the process; nothing is
// written to or read back from disk.
mod repository;

pub use repository::*;
