/// A byte cursor over inline text that reports absolute positions.
///
/// `base` is where `s` starts inside the full document body, so every
/// position handed out can be used to slice the body directly.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    base: usize,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Local distance to the next occurrence of `pat`, if any.
    pub fn find(&self, pat: &str) -> Option<usize> {
        self.rest().find(pat)
    }

    /// Advances past the current char (not byte), so the cursor never
    /// lands inside a multi-byte sequence.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes. Callers only pass lengths of matched ASCII
    /// sentinels or of text found with [`Cursor::find`].
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }
}
