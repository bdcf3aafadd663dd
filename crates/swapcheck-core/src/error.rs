use thiserror::Error;

/// Errors from constructing a [`crate::Checker`].
///
/// Checking itself is infallible by design: a call site the engine
/// cannot judge yields no results rather than an error, and a model it
/// cannot read disables statistics-based checking rather than failing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A configuration knob is outside its documented range.
    #[error("configuration knob {knob} = {value} is out of range (expected {expected})")]
    InvalidConfiguration {
        knob: &'static str,
        value: f32,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
