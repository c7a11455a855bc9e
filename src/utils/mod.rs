pub mod distance;
pub mod experiments;
pub mod instance_gen;
pub mod instance_io;
pub mod plot;
