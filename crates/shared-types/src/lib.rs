pub mod config;
pub mod error;
pub mod models;

// Quintet domain modules
pub mod analytics;
pub mod course;
pub mod instructor;
pub mod student;

pub use config::*;
pub use error::*;
pub use models::*;

pub use analytics::*;
pub use course::*;
pub use instructor::*;
pub use student::*;
