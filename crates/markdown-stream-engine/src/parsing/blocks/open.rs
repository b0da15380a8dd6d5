use super::kinds::{
    AtxHeading, BlockQuote, CodeFence, Fence, ListItem, ListItemMarker, MathFence, ThematicBreak,
};

/// A block opener recognised on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOpen {
    FencedCode { fence: Fence },
    FencedMath { closed: bool },
    Heading { level: u8 },
    ThematicBreak,
    BlockQuote,
    ListItem(ListItemMarker),
    IndentedCode,
}

impl BlockOpen {
    /// Whether this opener may cut an open paragraph short.
    pub fn interrupts_paragraph(&self) -> bool {
        match self {
            BlockOpen::IndentedCode => false,
            BlockOpen::ListItem(m) => ListItem::can_interrupt_paragraph(m),
            _ => true,
        }
    }
}

pub fn try_open_leaf(line: &str, indent: usize) -> Option<BlockOpen> {
    if indent > 3 {
        return Some(BlockOpen::IndentedCode);
    }
    // Precedence: fence beats everything else.
    if let Some((fence, _info)) = CodeFence::open(line) {
        return Some(BlockOpen::FencedCode { fence });
    }
    if let Some(closed) = MathFence::open(line) {
        return Some(BlockOpen::FencedMath { closed });
    }
    if let Some(level) = AtxHeading::level(line) {
        return Some(BlockOpen::Heading { level });
    }
    // `* * *` is a break, not a list item.
    if ThematicBreak::matches(line) {
        return Some(BlockOpen::ThematicBreak);
    }
    if BlockQuote::strip_one(line).is_some() {
        return Some(BlockOpen::BlockQuote);
    }
    ListItem::marker(line).map(BlockOpen::ListItem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_beats_everything() {
        assert!(matches!(
            try_open_leaf("```", 0),
            Some(BlockOpen::FencedCode { .. })
        ));
    }

    #[test]
    fn thematic_break_beats_list_item() {
        assert_eq!(try_open_leaf("* * *", 0), Some(BlockOpen::ThematicBreak));
        assert!(matches!(
            try_open_leaf("* item", 0),
            Some(BlockOpen::ListItem(_))
        ));
    }

    #[test]
    fn indented_line_is_code() {
        assert_eq!(try_open_leaf("    # x", 4), Some(BlockOpen::IndentedCode));
    }

    #[test]
    fn plain_text_opens_nothing() {
        assert_eq!(try_open_leaf("hello", 0), None);
        assert_eq!(try_open_leaf("#hello", 0), None);
    }

    #[test]
    fn indented_code_does_not_interrupt() {
        assert!(!BlockOpen::IndentedCode.interrupts_paragraph());
        assert!(BlockOpen::Heading { level: 1 }.interrupts_paragraph());
    }
}
