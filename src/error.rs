//! Process-level error type.
//!
//! Data problems inside chart attributes never become an `AppError`; they are
//! resolved to defaults by the decoder. `AppError` covers the operational side:
//! unreadable pages, HTTP failures, terminal I/O and bad CLI input.

/// Exit code for unusable input (bad path, bad CLI JSON, HTTP errors).
pub const EXIT_INPUT: u8 = 2;
/// Exit code for runtime failures (terminal, export writes).
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(EXIT_RUNTIME, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_exit_codes() {
        assert_eq!(AppError::input("bad page").exit_code(), EXIT_INPUT);
        assert_eq!(AppError::runtime("tty gone").exit_code(), EXIT_RUNTIME);
        assert_eq!(AppError::input("bad page").to_string(), "bad page");
    }
}
