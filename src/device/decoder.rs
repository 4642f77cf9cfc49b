/// Turns an arbitrary sequence of text chunks from the device connection
/// into complete, trimmed lines. Chunks may split a line anywhere; the
/// trailing partial line is buffered until its terminator arrives.
///
/// One decoder per connection; a reconnect gets a fresh instance.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: String,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and collect every line completed by it. Empty lines
    /// are dropped; emitted lines are whitespace-trimmed. Content is not
    /// interpreted here.
    pub fn push_chunk(&mut self, chunk: &str) -> Vec<String> {
        if chunk.is_empty() {
            return Vec::new();
        }

        self.buffer.push_str(chunk);
        if !self.buffer.contains('\n') {
            return Vec::new();
        }

        let mut pieces: Vec<&str> = self.buffer.split('\n').collect();
        // The piece after the last terminator is an incomplete line; keep it.
        let remainder = pieces.pop().unwrap_or("").to_string();

        let lines = pieces
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        self.buffer = remainder;
        lines
    }

    /// Close out the stream. A line without a terminator is not guaranteed
    /// well-formed, so any residual buffer is discarded rather than emitted.
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_one_line_per_terminator() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.push_chunk("T:4.5,W:450,S:1\n22.1,300,0\n");
        assert_eq!(lines, vec!["T:4.5,W:450,S:1", "22.1,300,0"]);
    }

    #[test]
    fn fragmented_chunks_produce_the_same_line_as_one_chunk() {
        let mut whole = LineDecoder::new();
        let expected = whole.push_chunk("T:4.5,W:450,S:1\n");

        let mut fragmented = LineDecoder::new();
        let mut lines = fragmented.push_chunk("T:4.5,W:4");
        assert!(lines.is_empty());
        lines.extend(fragmented.push_chunk("50,S:1\n"));

        assert_eq!(lines, expected);
        assert_eq!(lines, vec!["T:4.5,W:450,S:1"]);
    }

    #[test]
    fn tolerates_zero_length_chunks() {
        let mut decoder = LineDecoder::new();
        assert!(decoder.push_chunk("").is_empty());
        assert!(decoder.push_chunk("W:10").is_empty());
        assert!(decoder.push_chunk("").is_empty());
        assert_eq!(decoder.push_chunk("0\n"), vec!["W:100"]);
    }

    #[test]
    fn trims_whitespace_and_drops_blank_lines() {
        let mut decoder = LineDecoder::new();
        let lines = decoder.push_chunk("  T:1.0 \r\n\n   \nW:200\n");
        assert_eq!(lines, vec!["T:1.0", "W:200"]);
    }

    #[test]
    fn partial_line_survives_across_many_chunks() {
        let mut decoder = LineDecoder::new();
        for chunk in ["T", ":", "2", "5", ".", "5"] {
            assert!(decoder.push_chunk(chunk).is_empty());
        }
        assert_eq!(decoder.push_chunk("\n"), vec!["T:25.5"]);
    }

    #[test]
    fn finish_reports_unterminated_residue_without_emitting_it() {
        let mut decoder = LineDecoder::new();
        assert_eq!(decoder.push_chunk("S:1\nT:4."), vec!["S:1"]);
        assert_eq!(decoder.finish(), Some("T:4.".to_string()));

        let mut clean = LineDecoder::new();
        assert_eq!(clean.push_chunk("S:1\n"), vec!["S:1"]);
        assert_eq!(clean.finish(), None);
    }
}
