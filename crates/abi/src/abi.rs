/// Function calls.
pub mod calls;

/// Events.
pub mod logs;

/// Custom errors.
pub mod errors;
