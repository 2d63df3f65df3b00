pub mod entity;
pub mod world;

// Re-export the data crate so hosts only need one dependency
pub mod simulation {
    pub use tessel_simulation::*;
}
