pub mod app;
pub mod format;
pub mod logging;
pub mod sweep;

pub use format::Locale;
