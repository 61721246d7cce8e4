//! DNS Provider implementations

mod bunny;

pub use bunny::BunnyProvider;
