use std::fmt;

/// One entry popped from the native error queue.
///
/// The three codes identify the raising subsystem, the raising function and
/// the specific failure. `reason_text` is whatever human-readable string the
/// native build knows for the reason; some builds carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    library: i32,
    function: i32,
    reason: i32,
    reason_text: Option<String>,
}

impl ErrorRecord {
    /// Record with codes only.
    pub const fn new(library: i32, function: i32, reason: i32) -> Self {
        Self {
            library,
            function,
            reason,
            reason_text: None,
        }
    }

    /// Attach reason text. Empty strings are stored as absent.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.reason_text = if text.is_empty() { None } else { Some(text) };
        self
    }

    #[inline]
    pub fn library_code(&self) -> i32 {
        self.library
    }

    #[inline]
    pub fn function_code(&self) -> i32 {
        self.function
    }

    #[inline]
    pub fn reason_code(&self) -> i32 {
        self.reason
    }

    #[inline]
    pub fn reason_text(&self) -> Option<&str> {
        self.reason_text.as_deref()
    }

    /// `true` when library and reason both match. The function code is
    /// ignored: OpenSSL 3 always reports it as zero.
    #[inline]
    pub fn lib_reason_match(&self, library: i32, reason: i32) -> bool {
        self.library == library && self.reason == reason
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lib={} func={} reason={}", self.library, self.function, self.reason)?;
        if let Some(text) = &self.reason_text {
            write!(f, " ({})", text)?;
        }
        Ok(())
    }
}

/// The ordered result of one drain, oldest error first.
///
/// Never mutated after creation; the drain that produced it already left
/// the native queue empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorQueue {
    records: Vec<ErrorRecord>,
}

impl ErrorQueue {
    /// An empty snapshot.
    pub const fn empty() -> Self {
        Self { records: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Oldest record, the one the failing call pushed first.
    #[inline]
    pub fn first(&self) -> Option<&ErrorRecord> {
        self.records.first()
    }

    #[inline]
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorRecord> {
        self.records.iter()
    }

    pub fn into_vec(self) -> Vec<ErrorRecord> {
        self.records
    }
}

impl From<Vec<ErrorRecord>> for ErrorQueue {
    fn from(records: Vec<ErrorRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<ErrorRecord> for ErrorQueue {
    fn from_iter<I: IntoIterator<Item = ErrorRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorQueue {
    type Item = ErrorRecord;
    type IntoIter = std::vec::IntoIter<ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorQueue {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_absent() {
        let rec = ErrorRecord::new(6, 127, 138).with_text("");
        assert_eq!(rec.reason_text(), None);

        let rec = ErrorRecord::new(6, 127, 138).with_text("data not multiple of block length");
        assert_eq!(rec.reason_text(), Some("data not multiple of block length"));
    }

    #[test]
    fn lib_reason_match_ignores_function() {
        let rec = ErrorRecord::new(6, 0, 138);
        assert!(rec.lib_reason_match(6, 138));
        assert!(!rec.lib_reason_match(6, 100));
        assert!(!rec.lib_reason_match(35, 138));
    }

    #[test]
    fn display_includes_text_when_present() {
        let rec = ErrorRecord::new(6, 127, 138);
        assert_eq!(rec.to_string(), "lib=6 func=127 reason=138");

        let rec = rec.with_text("bad");
        assert_eq!(rec.to_string(), "lib=6 func=127 reason=138 (bad)");
    }

    #[test]
    fn queue_preserves_order() {
        let queue: ErrorQueue = (1..=3).map(|r| ErrorRecord::new(6, 0, r)).collect();
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.first().map(|r| r.reason_code()), Some(1));
        let reasons: Vec<i32> = queue.iter().map(|r| r.reason_code()).collect();
        assert_eq!(reasons, vec![1, 2, 3]);
    }

    #[test]
    fn empty_queue() {
        let queue = ErrorQueue::empty();
        assert!(queue.is_empty());
        assert!(queue.first().is_none());
        assert_eq!(queue, ErrorQueue::default());
    }
}
