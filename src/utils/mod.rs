//! Utilities shared by samplers and the collection pipeline.

mod time;

pub use time::timestamp_ns;
