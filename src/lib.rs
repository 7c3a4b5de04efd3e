pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod minifier;
pub mod packager;
pub mod pipelines;
pub mod reporter;
pub mod request;
pub mod staging;

pub use error::BuildError;
pub use interrupt::Interrupt;
pub use reporter::Reporter;
pub use request::BuildRequest;
