/// Version stamped by `build.rs` (`GIT_VERSION` env var, `git describe`, or `dev`).
pub const GIT_VERSION: &str = env!("GIT_VERSION");
