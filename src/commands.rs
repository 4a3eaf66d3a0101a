mod capture;
mod import;
mod serve;

pub use capture::run_capture;
pub use import::run_import;
pub use serve::run_serve;
