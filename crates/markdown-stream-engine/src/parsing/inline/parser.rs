use super::{
    cursor::Cursor,
    kinds::{
        Autolink, CodeSpan, DelimiterRun, LinkSyntax, LinkTail,
        autolink::Angle,
    },
    types::{InlineKind, InlineScan, InlineSpan, PendingClose},
};

#[derive(Debug, Clone, Copy)]
struct Delim {
    ch: u8,
    /// Local offset of the run.
    pos: usize,
    orig: usize,
    /// Markers not yet matched. Openers lose markers from the end nearest
    /// the content.
    len: usize,
    can_open: bool,
    can_close: bool,
}

#[derive(Debug, Clone, Copy)]
struct Bracket {
    pos: usize,
    image: bool,
    /// Delimiter stack height when the bracket was pushed.
    delim_bottom: usize,
    active: bool,
}

/// The construct that runs to the end of the content, if any.
#[derive(Debug, Clone)]
enum Tail {
    Code { start: usize, closer: String },
    Link { start: usize, kind: InlineKind, closer: String },
    /// Something that renders literally until more text arrives.
    Literal,
}

enum Flow {
    Continue,
    Stop,
}

/// Analyses inline content and works out which closers it still needs.
///
/// # Arguments
/// - `base`: Byte offset in the source where `s` begins (for absolute positions)
/// - `s`: The content to scan (a paragraph's text, a heading's text, a cell)
///
/// Emphasis pairing follows the delimiter-stack rules: flanking, the
/// intraword `_` restriction and the multiple-of-three rule. Code spans,
/// autolinks and raw tags are skipped as raw zones. A construct that is
/// still open at the end of `s` either yields a [`PendingClose`] or stops
/// the scan and renders literally.
pub fn scan_inline(base: usize, s: &str) -> InlineScan {
    InlineScanner::new(base, s).run()
}

struct InlineScanner<'a> {
    cur: Cursor<'a>,
    delims: Vec<Delim>,
    brackets: Vec<Bracket>,
    spans: Vec<InlineSpan>,
    tail: Option<Tail>,
}

impl<'a> InlineScanner<'a> {
    fn new(base: usize, s: &'a str) -> Self {
        Self {
            cur: Cursor::new(s, base),
            delims: vec![],
            brackets: vec![],
            spans: vec![],
            tail: None,
        }
    }

    fn run(mut self) -> InlineScan {
        while let Some(b) = self.cur.peek() {
            let flow = match b {
                b'\\' => {
                    self.cur.bump();
                    if self.cur.peek().is_some_and(|c| c.is_ascii_punctuation()) {
                        self.cur.bump();
                    }
                    Flow::Continue
                }
                CodeSpan::TICK => self.code_span(),
                b if DelimiterRun::is_delimiter(b) => {
                    self.delimiter_run(b);
                    Flow::Continue
                }
                b'!' if self.cur.starts_with(LinkSyntax::IMAGE) => {
                    self.push_bracket(true);
                    Flow::Continue
                }
                LinkSyntax::OPEN => {
                    self.push_bracket(false);
                    Flow::Continue
                }
                LinkSyntax::CLOSE => self.close_bracket(),
                Autolink::OPEN => self.angle(),
                b'h' | b'w' if self.at_word_start() => self.bare_url(),
                _ => {
                    self.cur.bump();
                    Flow::Continue
                }
            };
            if let Flow::Stop = flow {
                break;
            }
        }
        self.process_emphasis(0);
        self.finish()
    }

    fn code_span(&mut self) -> Flow {
        let s = self.cur.text;
        let start = self.cur.at;
        let run = self.cur.run_len(CodeSpan::TICK);
        let ticks = &s[start..start + run];

        if let Some(close) = CodeSpan::find_closer(s, start + run, run) {
            self.spans.push(InlineSpan::closed(
                InlineKind::InlineCode,
                self.cur.abs(start),
                ticks,
                ticks,
            ));
            self.cur.at = close + run;
            return Flow::Continue;
        }

        let content = &s[start + run..];
        if content.trim().is_empty() {
            self.spans.push(InlineSpan::open(
                InlineKind::InlineCode,
                self.cur.abs(start),
                ticks,
                None,
            ));
            self.tail = Some(Tail::Literal);
        } else {
            let closer = CodeSpan::closer(content, run);
            self.spans.push(InlineSpan::open(
                InlineKind::InlineCode,
                self.cur.abs(start),
                ticks,
                Some(closer.clone()),
            ));
            self.tail = Some(Tail::Code { start, closer });
        }
        Flow::Stop
    }

    fn delimiter_run(&mut self, ch: u8) {
        let pos = self.cur.at;
        let len = self.cur.run_len(ch);
        let before = self.cur.char_before(pos);
        let after = self.cur.char_at(pos + len);
        let f = DelimiterRun::flanking(ch, len, before, after);
        self.cur.skip(len);
        if f.can_open || f.can_close {
            self.delims.push(Delim {
                ch,
                pos,
                orig: len,
                len,
                can_open: f.can_open,
                can_close: f.can_close,
            });
        }
    }

    fn push_bracket(&mut self, image: bool) {
        self.brackets.push(Bracket {
            pos: self.cur.at,
            image,
            delim_bottom: self.delims.len(),
            active: true,
        });
        self.cur.skip(if image { 2 } else { 1 });
    }

    fn close_bracket(&mut self) -> Flow {
        let close_at = self.cur.at;
        self.cur.bump();
        let Some(b) = self.brackets.pop() else {
            return Flow::Continue;
        };
        if !b.active || self.cur.peek() != Some(LinkSyntax::DEST_OPEN) {
            return Flow::Continue;
        }

        let s = self.cur.text;
        let (kind, marker) = if b.image {
            (InlineKind::Image, "![")
        } else {
            (InlineKind::Link, "[")
        };
        let start = self.cur.abs(b.pos);

        match LinkSyntax::tail(s, self.cur.at + 1) {
            LinkTail::Closed(end) => {
                self.form_link(b);
                self.spans
                    .push(InlineSpan::closed(kind, start, marker, &s[close_at..end]));
                self.cur.at = end;
                Flow::Continue
            }
            LinkTail::Invalid => Flow::Continue,
            LinkTail::Open { closer } => {
                self.form_link(b);
                self.spans
                    .push(InlineSpan::open(kind, start, marker, Some(closer.clone())));
                self.tail = Some(Tail::Link {
                    start: b.pos,
                    kind,
                    closer,
                });
                Flow::Stop
            }
            LinkTail::Uncompletable => {
                self.delims.truncate(b.delim_bottom);
                self.spans.push(InlineSpan::open(kind, start, marker, None));
                self.tail = Some(Tail::Literal);
                Flow::Stop
            }
        }
    }

    /// Resolves emphasis inside a link label and retires the label's
    /// delimiters. Links cannot contain links, so earlier `[` go inert.
    fn form_link(&mut self, b: Bracket) {
        self.process_emphasis(b.delim_bottom);
        self.delims.truncate(b.delim_bottom);
        if !b.image {
            for br in &mut self.brackets {
                br.active = false;
            }
        }
    }

    fn angle(&mut self) -> Flow {
        let at = self.cur.at;
        match Autolink::angle(self.cur.text, at) {
            Angle::Autolink { end } => {
                self.spans.push(InlineSpan::closed(
                    InlineKind::Autolink,
                    self.cur.abs(at),
                    "<",
                    ">",
                ));
                self.cur.at = end;
                Flow::Continue
            }
            Angle::Tag { end } => {
                self.cur.at = end;
                Flow::Continue
            }
            Angle::PartialAutolink => {
                self.spans.push(InlineSpan::open(
                    InlineKind::Autolink,
                    self.cur.abs(at),
                    "<",
                    None,
                ));
                self.tail = Some(Tail::Literal);
                Flow::Stop
            }
            Angle::PartialTag => {
                self.tail = Some(Tail::Literal);
                Flow::Stop
            }
            Angle::Text => {
                self.cur.bump();
                Flow::Continue
            }
        }
    }

    fn at_word_start(&self) -> bool {
        self.cur
            .char_before(self.cur.at)
            .is_none_or(|c| c.is_whitespace() || matches!(c, '*' | '_' | '~' | '('))
    }

    /// Bare URLs are only recognised once whitespace ends them; until then
    /// the token is left alone.
    fn bare_url(&mut self) -> Flow {
        let at = self.cur.at;
        let Some(len) = Autolink::bare_len(self.cur.text, at) else {
            self.cur.bump();
            return Flow::Continue;
        };
        let prefix = Autolink::BARE_PREFIXES
            .iter()
            .find(|p| self.cur.text[at..].starts_with(**p))
            .copied()
            .unwrap_or_default();
        if at + len == self.cur.text.len() {
            self.spans.push(InlineSpan::open(
                InlineKind::Autolink,
                self.cur.abs(at),
                prefix,
                None,
            ));
            self.tail = Some(Tail::Literal);
            return Flow::Stop;
        }
        self.spans.push(InlineSpan::closed(
            InlineKind::Autolink,
            self.cur.abs(at),
            prefix,
            "",
        ));
        self.cur.skip(len);
        Flow::Continue
    }

    /// Pairs closers with openers above `bottom` on the delimiter stack.
    fn process_emphasis(&mut self, bottom: usize) {
        let mut ci = bottom;
        while ci < self.delims.len() {
            let c = self.delims[ci];
            if c.len == 0 || !c.can_close {
                ci += 1;
                continue;
            }

            let opener = (bottom..ci).rev().find(|&j| {
                let o = &self.delims[j];
                if o.len == 0 || !o.can_open || o.ch != c.ch {
                    return false;
                }
                if c.ch == DelimiterRun::TILDE {
                    return o.len == c.len;
                }
                !DelimiterRun::rule_of_three_blocks(
                    (o.orig, o.can_close),
                    (c.orig, c.can_open),
                )
            });

            let Some(oi) = opener else {
                // Nothing to close; it can still open later unless it can't.
                if !c.can_open {
                    self.delims[ci].can_close = false;
                }
                ci += 1;
                continue;
            };

            let o = self.delims[oi];
            let used = if c.ch == DelimiterRun::TILDE {
                c.len
            } else if o.len >= 2 && c.len >= 2 {
                2
            } else {
                1
            };
            let kind = match (c.ch, used) {
                (DelimiterRun::TILDE, _) => InlineKind::Strikethrough,
                (_, 2) => InlineKind::Strong,
                _ => InlineKind::Emphasis,
            };
            let marker = &self.cur.text[o.pos + o.len - used..o.pos + o.len];
            self.spans.push(InlineSpan::closed(
                kind,
                self.cur.abs(o.pos + o.len - used),
                marker,
                marker,
            ));

            self.delims[oi].len -= used;
            self.delims[ci].len -= used;
            // Unmatched delimiters between the pair become text.
            self.delims.drain(oi + 1..ci);
            ci = oi + 1;
            if self.delims[ci].len == 0 {
                ci += 1;
            }
        }
    }

    fn finish(mut self) -> InlineScan {
        let s = self.cur.text;
        let base = self.cur.base;
        let trimmed = s.trim_end_matches([' ', '\t', '\r', '\n']);
        let insert_at = base + trimmed.len();

        // Nothing after the first `[` that may still become a link is
        // completed until that `[` resolves.
        let boundary = self.brackets.iter().find(|b| b.active).copied();
        let (delim_limit, pos_limit) = match boundary {
            Some(b) => (b.delim_bottom, b.pos),
            None => (self.delims.len(), usize::MAX),
        };
        for b in self.brackets.iter().filter(|b| b.active) {
            let (kind, marker) = if b.image {
                (InlineKind::Image, "![")
            } else {
                (InlineKind::Link, "[")
            };
            self.spans
                .push(InlineSpan::open(kind, base + b.pos, marker, None));
        }

        let escaped_end = trimmed
            .bytes()
            .rev()
            .take_while(|b| *b == b'\\')
            .count()
            % 2
            == 1;

        let mut pending = vec![];
        let mut tail_closed = false;
        match self.tail.take() {
            Some(Tail::Code { start, closer }) if start < pos_limit => {
                pending.push(PendingClose {
                    kind: InlineKind::InlineCode,
                    opener: base + start,
                    closer,
                });
                tail_closed = true;
            }
            Some(Tail::Link {
                start,
                kind,
                closer,
            }) if start < pos_limit => {
                pending.push(PendingClose {
                    kind,
                    opener: base + start,
                    closer,
                });
                tail_closed = true;
            }
            _ => {}
        }

        if !escaped_end || tail_closed {
            let last = trimmed.as_bytes().last().copied();
            let limit = delim_limit.min(self.delims.len());
            let trailing_run = self
                .delims
                .iter()
                .position(|t| t.pos + t.orig == trimmed.len());
            for (i, d) in self.delims[..limit].iter().enumerate().rev() {
                if d.len == 0 || !d.can_open || d.can_close || d.pos >= pos_limit {
                    continue;
                }
                // The run that closed part of this opener grows into its
                // full closer.
                let extends_own_closer = trailing_run.is_some_and(|t| {
                    let run = &self.delims[t];
                    t == i + 1 && run.ch == d.ch && run.can_close && run.len == 0
                });
                // Any other run of the same marker would absorb the closer
                // and stay literal.
                if !tail_closed && last == Some(d.ch) && !extends_own_closer {
                    continue;
                }
                let kind = match (d.ch, d.len) {
                    (DelimiterRun::TILDE, _) => InlineKind::Strikethrough,
                    (_, 1) => InlineKind::Emphasis,
                    (_, 2) => InlineKind::Strong,
                    _ => InlineKind::StrongEmphasis,
                };
                let marker = &s[d.pos..d.pos + d.len];
                self.spans.push(InlineSpan::open(
                    kind,
                    base + d.pos,
                    marker,
                    Some(marker.to_string()),
                ));
                pending.push(PendingClose {
                    kind,
                    opener: base + d.pos,
                    closer: marker.to_string(),
                });
            }
        }

        self.spans.sort_by_key(|sp| sp.start);
        InlineScan {
            spans: self.spans,
            pending,
            insert_at,
        }
    }
}
