use std::sync::LazyLock;

use crate::Logger;

// Built on first access, lives until process exit.
static LOGGER: LazyLock<Logger> = LazyLock::new(Logger::default);

/// The shared process-wide logger. Every call, from any thread, returns the
/// same instance.
///
/// Prefer passing an explicitly built [`Logger`] to the components that need
/// one; reach for this accessor only where a genuinely global instance is
/// required.
pub fn logger() -> &'static Logger {
    &LOGGER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_access_yields_the_same_instance() {
        let a = logger() as *const Logger;
        let b = logger() as *const Logger;
        assert_eq!(a, b);
    }
}
