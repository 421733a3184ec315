use crate::ErrorRecord;

/// One position of a [`CodeRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMatch {
    /// Wildcard, any code matches.
    Any,
    /// Exactly this code.
    Is(i32),
}

impl CodeMatch {
    #[inline]
    pub const fn accepts(self, code: i32) -> bool {
        match self {
            CodeMatch::Any => true,
            CodeMatch::Is(want) => want == code,
        }
    }
}

/// A `(library, function, reason)` pattern over [`ErrorRecord`]s.
///
/// Rules are plain `const` data so rule tables can live in statics.
/// Prefer the [`code_rule!`] macro, which accepts `_` for wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRule {
    pub library: CodeMatch,
    pub function: CodeMatch,
    pub reason: CodeMatch,
}

impl CodeRule {
    pub const fn new(library: CodeMatch, function: CodeMatch, reason: CodeMatch) -> Self {
        Self {
            library,
            function,
            reason,
        }
    }

    /// `true` if every position accepts the record's code.
    #[inline]
    pub fn matches(&self, record: &ErrorRecord) -> bool {
        self.library.accepts(record.library_code())
            && self.function.accepts(record.function_code())
            && self.reason.accepts(record.reason_code())
    }
}

/// Build a [`CodeRule`] from a `(library, function, reason)` triple.
///
/// ```ignore
/// code_rule!(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE)
/// code_rule!(ERR_LIB_DSO, _, DSO_R_LOAD_FAILED)
/// code_rule!(ERR_LIB_EVP, _, _)
/// ```
///
/// Each position is a single token: a constant name, a literal, or `_`
/// for a wildcard. The expansion is a `const` expression.
#[macro_export]
macro_rules! code_rule {
    ($lib:tt, $func:tt, $reason:tt) => {
        $crate::CodeRule::new(
            $crate::__code_match!($lib),
            $crate::__code_match!($func),
            $crate::__code_match!($reason),
        )
    };
}

/// Internal helper for code_rule! — maps `_` to a wildcard.
#[doc(hidden)]
#[macro_export]
macro_rules! __code_match {
    (_) => {
        $crate::CodeMatch::Any
    };
    ($code:expr) => {
        $crate::CodeMatch::Is($code)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::*;

    const EXACT: CodeRule =
        code_rule!(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE);
    const ANY_FUNC: CodeRule = code_rule!(ERR_LIB_DSO, _, DSO_R_LOAD_FAILED);
    const WHOLE_LIB: CodeRule = code_rule!(ERR_LIB_EVP, _, _);

    #[test]
    fn exact_rule() {
        let hit = ErrorRecord::new(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE);
        assert!(EXACT.matches(&hit));

        let other_func = ErrorRecord::new(ERR_LIB_ENGINE, ENGINE_F_ENGINE_ADD, ENGINE_R_NO_SUCH_ENGINE);
        assert!(!EXACT.matches(&other_func));
    }

    #[test]
    fn wildcard_function() {
        assert!(ANY_FUNC.matches(&ErrorRecord::new(ERR_LIB_DSO, 0, DSO_R_LOAD_FAILED)));
        assert!(ANY_FUNC.matches(&ErrorRecord::new(ERR_LIB_DSO, DSO_F_DLFCN_LOAD, DSO_R_LOAD_FAILED)));
        assert!(!ANY_FUNC.matches(&ErrorRecord::new(ERR_LIB_DSO, DSO_F_DLFCN_LOAD, 1)));
    }

    #[test]
    fn wildcard_function_and_reason() {
        assert!(WHOLE_LIB.matches(&ErrorRecord::new(ERR_LIB_EVP, 1, 2)));
        assert!(!WHOLE_LIB.matches(&ErrorRecord::new(ERR_LIB_PKCS12, 1, 2)));
    }

    #[test]
    fn literal_positions() {
        let rule = code_rule!(6, 127, _);
        assert_eq!(rule.library, CodeMatch::Is(6));
        assert_eq!(rule.function, CodeMatch::Is(127));
        assert_eq!(rule.reason, CodeMatch::Any);
    }
}
