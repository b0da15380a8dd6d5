use super::strip_marker_indent;

/// Thematic break (`***`, `---`, `___`, spaces allowed between).
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: [u8; 3] = [b'*', b'-', b'_'];
    pub const MIN_MARKERS: usize = 3;

    pub fn matches(line: &str) -> bool {
        let Some(t) = strip_marker_indent(line.trim_end_matches(['\r', '\n'])) else {
            return false;
        };
        let Some(first) = t.bytes().next() else {
            return false;
        };
        if !Self::MARKERS.contains(&first) {
            return false;
        }
        let mut count = 0;
        for b in t.bytes() {
            match b {
                b if b == first => count += 1,
                b' ' | b'\t' => {}
                _ => return false,
            }
        }
        count >= Self::MIN_MARKERS
    }
}
