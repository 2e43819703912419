mod fetch;
mod interact;
mod strip;
mod update;

pub use fetch::run_fetch;
pub use interact::run_interact;
pub use strip::run_strip;
pub use update::run_update;
