///
/// ExceptionInfo
///
/// Classification of a protocol exception constant.
/// `hard` errors close the connection, soft ones only the channel.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ExceptionInfo {
    pub hard: bool,
    pub code: u16,
    pub name: &'static str,
}

impl ExceptionInfo {
    #[must_use]
    pub const fn new(hard: bool, code: u16, name: &'static str) -> Self {
        Self { hard, code, name }
    }
}

/// Classify a code the generated table does not know.
///
/// A peer sending an unknown code must not bring the caller down, so the code
/// is reported and the designated fallback is returned in its place.
#[must_use]
pub fn unknown_exception(code: u16, fallback: ExceptionInfo) -> ExceptionInfo {
    tracing::warn!(
        code,
        fallback = fallback.name,
        "unknown exception code, classifying as fallback"
    );

    fallback
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const INTERNAL_ERROR: ExceptionInfo = ExceptionInfo::new(true, 541, "INTERNAL_ERROR");

    #[test]
    #[traced_test]
    fn unknown_code_falls_back_and_warns() {
        let info = unknown_exception(999, INTERNAL_ERROR);

        assert_eq!(info, INTERNAL_ERROR);
        assert!(logs_contain("unknown exception code"));
        assert!(logs_contain("999"));
    }
}
