/// Splits a byte stream into newline-terminated lines.
///
/// Bytes accumulate until a `\n` arrives; everything before it becomes one
/// line and the buffer resets. Line length is not bounded.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes and collect every line it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            self.buffer.extend_from_slice(&rest[..pos]);
            lines.push(std::mem::take(&mut self.buffer));
            rest = &rest[pos + 1..];
        }

        self.buffer.extend_from_slice(rest);
        lines
    }

    /// Bytes received since the last delimiter
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"hello\n"), vec![b"hello".to_vec()]);
        assert!(framer.pending().is_empty());
    }

    #[test]
    fn test_partial_line_is_buffered() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"tem").is_empty());
        assert_eq!(framer.pending(), b"tem");
        assert_eq!(framer.push(b"p=21\nx"), vec![b"temp=21".to_vec()]);
        assert_eq!(framer.pending(), b"x");
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut framer = LineFramer::new();
        let lines = framer.push(b"a\nb\n\nc");
        assert_eq!(lines, vec![b"a".to_vec(), b"b".to_vec(), Vec::new()]);
        assert_eq!(framer.pending(), b"c");
    }

    #[test]
    fn test_carriage_return_is_kept() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"ok\r\n"), vec![b"ok\r".to_vec()]);
    }
}
