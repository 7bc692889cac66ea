pub mod arrival;
pub mod candidate;
