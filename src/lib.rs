pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{normalize_angle, AnchorHandle, Motion, NVec2, Orbit, OrbitAnchor, Particle, Rgba, Trail};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::random::{RandomSource, WorkerRng};
pub use simulation::step::step_particle;
pub use simulation::population::{FrameReport, PopulationManager};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ConfigError, ExecutionConfig, SimulationConfig};
pub use configuration::prompt::prompt_config;

pub use visualization::sink::{FpsCounter, FrameTally, RenderSink};
pub use visualization::{headless::run_headless, pasim_vis2d::run_2d};

pub use benchmark::benchmark::{bench_update, bench_update_curve};
