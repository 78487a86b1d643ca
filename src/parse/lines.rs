/// Cursor over input lines with a single line of pushback. Lines starting
/// with `#` are comments and never returned.
#[derive(Debug)]
pub(super) struct Lines<'a> {
    text: Vec<&'a str>,
    /// Index of the next line to scan.
    pos: usize,
    /// Index of the last returned line, `None` after the end of input.
    current: Option<usize>,
    unread: bool,
}

impl<'a> Lines<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            text: input.lines().collect(),
            pos: 0,
            current: None,
            unread: false,
        }
    }

    pub(super) fn next(&mut self) -> Option<&'a str> {
        if self.unread {
            self.unread = false;
            return self.current.map(|idx| self.text[idx]);
        }

        while let Some(&text) = self.text.get(self.pos) {
            let idx = self.pos;
            self.pos += 1;

            if !text.starts_with('#') {
                self.current = Some(idx);
                return Some(text);
            }
        }

        self.current = None;
        None
    }

    pub(super) fn next_non_empty(&mut self) -> Option<&'a str> {
        while let Some(text) = self.next() {
            if !text.is_empty() {
                return Some(text);
            }
        }

        None
    }

    /// Pushes back the last returned line. Does nothing after the end of
    /// input.
    pub(super) fn back(&mut self) {
        debug_assert!(!self.unread, "only one line of pushback");
        self.unread = self.current.is_some();
    }

    /// 1-based number of the last returned line, `None` after the end of
    /// input.
    pub(super) fn line_number(&self) -> Option<usize> {
        self.current.map(|idx| idx + 1)
    }
}
