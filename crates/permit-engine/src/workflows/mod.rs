pub mod intake;
pub mod permits;
