pub mod connections;
pub mod palette;
pub mod rng;
