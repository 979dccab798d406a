//! File readers and writers the source/sink operators delegate to.

pub mod columnar;
pub mod csv;
pub mod jsonl;
pub mod media;
