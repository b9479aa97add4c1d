//! Static table definitions and process settings.

pub mod schema;
pub mod settings;

pub use settings::Settings;
