/// Split text into sections of at most `max_size` bytes, keeping line breaks.
///
/// Lines are accumulated greedily. The newline joining two lines counts
/// toward the section length. A single line longer than `max_size` becomes
/// its own over-limit section; it is never truncated or split further.
///
/// Sections are slices of `text`, so joining them with `"\n"` gives back
/// the original text exactly. Empty input yields no sections.
pub fn section(text: &str, max_size: usize) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut start = 0;
    // End offset of the open section, `None` until it holds a line
    let mut end: Option<usize> = None;
    let mut offset = 0;

    for line in text.split('\n') {
        let line_start = offset;
        let line_end = line_start + line.len();
        offset = line_end + 1;

        end = match end {
            Some(current_end) if current_end - start + 1 + line.len() > max_size => {
                sections.push(&text[start..current_end]);
                start = line_start;
                Some(line_end)
            }
            Some(_) => Some(line_end),
            None => {
                start = line_start;
                Some(line_end)
            }
        };
    }

    if let Some(current_end) = end {
        sections.push(&text[start..current_end]);
    }

    sections
}
