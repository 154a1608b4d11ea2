pub mod states;
pub mod params;
pub mod engine;
pub mod random;
pub mod step;
pub mod population;
pub mod scenario;
