/// Read position over one block's inline content.
///
/// `at` is local to `text`; `base` is where `text` starts in the source, so
/// spans can be reported in source offsets. The scanner only ever stops on
/// ASCII delimiter bytes, which keeps `at` on a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub text: &'a str,
    pub base: usize,
    pub at: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, base: usize) -> Self {
        Self { text, base, at: 0 }
    }

    /// Source offset of the local offset `local`.
    pub fn abs(&self, local: usize) -> usize {
        self.base + local
    }

    fn rest(&self) -> &'a [u8] {
        self.text.as_bytes().get(self.at..).unwrap_or_default()
    }

    pub fn peek(&self) -> Option<u8> {
        self.rest().first().copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().starts_with(pat)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.at += 1;
        Some(b)
    }

    pub fn skip(&mut self, n: usize) {
        self.at += n;
    }

    /// How many times `b` repeats from the cursor on.
    pub fn run_len(&self, b: u8) -> usize {
        self.rest().iter().take_while(|c| **c == b).count()
    }

    /// Flanking neighbours of a delimiter run are whole chars, not bytes.
    pub fn char_before(&self, local: usize) -> Option<char> {
        self.text.get(..local)?.chars().next_back()
    }

    pub fn char_at(&self, local: usize) -> Option<char> {
        self.text.get(local..)?.chars().next()
    }
}
