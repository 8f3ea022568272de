//! Exit codes for the voyager CLI.
//!
//! Scripts can tell a server that answered badly apart from one that could
//! not be reached at all.

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the endpoint answered with JSON
    Success = 0,
    /// The endpoint answered, but not with JSON, or with GraphQL errors
    ResponseError = 1,
    /// Configuration error (missing or invalid config file, bad endpoint or header)
    ConfigError = 2,
    /// The endpoint could not be reached
    NetworkError = 3,
    /// I/O error (file read/write failure)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ResponseError => write!(f, "response error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::NetworkError => write!(f, "network error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ExitCode::Success,
            ExitCode::ResponseError,
            ExitCode::ConfigError,
            ExitCode::NetworkError,
            ExitCode::IoError,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(*a as i32, *b as i32, "{a} and {b} share a code");
            }
        }
        assert_eq!(ExitCode::Success as i32, 0);
    }
}
