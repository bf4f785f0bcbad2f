pub mod driver;
pub mod rng;
pub mod scheduler;
