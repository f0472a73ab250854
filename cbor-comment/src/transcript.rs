/*!
Line accumulation and indentation for commented output
*/

/// A line reserved by [`Transcript::reserve`], to be written by [`Transcript::fill`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineId(usize);

/// Alignment padding never exceeds this many spaces, whatever `max_indent_depth` is
pub const MAX_PADDING: usize = 1024;

/// The ordered output buffer of one commented rendering
///
/// Lines are indented by two spaces per level of depth.  Inline comments are
/// pushed right by `2 * (max_indent_depth - depth - 2)` spaces, so that the
/// comments of shallow items sit further out than those of deep ones.
#[derive(Debug, Clone)]
pub struct Transcript {
    lines: Vec<String>,
    max_indent_depth: usize,
}

fn indent(n: usize) -> String {
    " ".repeat(n)
}

impl Transcript {
    pub fn new(max_indent_depth: usize) -> Self {
        Self {
            lines: Vec::new(),
            max_indent_depth,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, depth: usize, fragment: &str) {
        self.lines.push(indent(2 * depth) + fragment);
    }

    pub fn reserve(&mut self) -> LineId {
        self.lines.push(String::new());
        LineId(self.lines.len() - 1)
    }

    pub fn fill(&mut self, id: LineId, depth: usize, fragment: &str) {
        if let Some(line) = self.lines.get_mut(id.0) {
            *line = indent(2 * depth) + fragment;
        }
    }

    /// The aligned inline comment for an item at `depth`, clamped to no padding once
    /// `depth` reaches `max_indent_depth - 2`, and capped at [`MAX_PADDING`]
    pub fn comment(&self, depth: usize, label: &str) -> String {
        let padding = self
            .max_indent_depth
            .saturating_sub(depth.saturating_add(2))
            .saturating_mul(2)
            .min(MAX_PADDING);
        format!("{}-- {label}", indent(padding))
    }

    /// Every line, then the lowercase hex of `input` prefixed with `0x`
    pub fn finish(self, input: &[u8]) -> String {
        let mut output = String::new();
        for line in self.lines {
            output.push_str(&line);
            output.push('\n');
        }
        output.push_str("0x");
        output.push_str(&hex::encode(input));
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_indents_by_depth() {
        let mut t = Transcript::new(10);
        t.push(0, "a");
        t.push(1, "b");
        t.push(3, "c");
        assert_eq!(t.finish(&[]), "a\n  b\n      c\n0x\n");
    }

    #[test]
    fn test_reserve_keeps_order() {
        let mut t = Transcript::new(10);
        let id = t.reserve();
        t.push(1, "01");
        t.push(1, "02");
        t.fill(id, 0, "[1, 2]");
        assert_eq!(t.len(), 3);
        assert_eq!(t.finish(&[0x82, 0x01, 0x02]), "[1, 2]\n  01\n  02\n0x820102\n");
    }

    #[test]
    fn test_comment_alignment() {
        let t = Transcript::new(10);
        assert_eq!(t.comment(0, "1"), format!("{}-- 1", " ".repeat(16)));
        assert_eq!(t.comment(3, "1"), format!("{}-- 1", " ".repeat(10)));
        assert_eq!(t.comment(7, "1"), "  -- 1");
        assert_eq!(t.comment(8, "1"), "-- 1");
        assert_eq!(t.comment(9, "1"), "-- 1");
        assert_eq!(t.comment(100, "1"), "-- 1");
    }

    #[test]
    fn test_comment_huge_max_depth() {
        let t = Transcript::new(usize::MAX / 2 + 10);
        assert_eq!(t.comment(0, "1"), format!("{}-- 1", " ".repeat(MAX_PADDING)));
        assert_eq!(t.comment(usize::MAX, "1"), "-- 1");
    }

    #[test]
    fn test_comment_small_max_depth() {
        let t = Transcript::new(0);
        assert_eq!(t.comment(0, "-5"), "-- -5");
    }
}
