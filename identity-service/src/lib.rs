pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::session;
pub use domain::user;
