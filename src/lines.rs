use regex::Regex;
use std::borrow::Cow;

/// Counts the lines of `content` that carry more than `min_chars` non-whitespace
/// characters once every noise pattern has been stripped from the whole text.
///
/// Content that is not valid UTF-8 counts as zero lines. Patterns are applied in order
/// before the text is split, so multi-line patterns such as block comments work.
pub fn count_significant_lines<'a, I>(content: &[u8], noise: I, min_chars: usize) -> usize
where
    I: IntoIterator<Item = &'a Regex>,
{
    let Ok(text) = std::str::from_utf8(content) else {
        return 0;
    };

    let mut text = Cow::Borrowed(text);
    for pattern in noise {
        let stripped = match pattern.replace_all(&text, "") {
            Cow::Owned(stripped) => Some(stripped),
            Cow::Borrowed(_) => None,
        };
        if let Some(stripped) = stripped {
            text = Cow::Owned(stripped);
        }
    }

    text.split('\n')
        .filter(|line| significant_chars(line) > min_chars)
        .count()
}

fn significant_chars(line: &str) -> usize {
    line.chars().filter(|c| !c.is_whitespace()).count()
}

/// Heuristic used by git itself: a NUL byte near the start means binary.
pub fn looks_binary(content: &[u8]) -> bool {
    content.iter().take(8000).any(|&b| b == 0)
}
