/// Exit codes for a realizer or producer binary, following the daemontools
/// convention §6 and §7 name: 100 for a permanent failure a supervisor
/// should not retry (bad arguments, an unsupported terminal), 111 for a
/// temporary one it should (a transient I/O error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    Permanent,
    Temporary,
}

impl ExitCode {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::Permanent => 100,
            ExitCode::Temporary => 111,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_daemontools_convention() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Permanent.code(), 100);
        assert_eq!(ExitCode::Temporary.code(), 111);
    }
}
