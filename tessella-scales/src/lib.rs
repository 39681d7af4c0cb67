pub mod breaks;
pub mod color;
pub mod error;
pub mod natural_breaks;
pub mod sample;
