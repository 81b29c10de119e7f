pub mod cabal;
pub mod config;
pub mod step;
pub mod version;
