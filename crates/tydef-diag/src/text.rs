//! Layout helpers. Widths are measured in chars.

#[inline]
pub fn width(s: &str) -> usize {
    s.chars().count()
}

/// `label` centred within the width of `s`, leaning left on odd padding.
pub fn center(label: &str, s: &str) -> String {
    let delta = width(s).saturating_sub(width(label));
    let left = delta / 2;
    let right = delta - left;
    format!("{}{label}{}", " ".repeat(left), " ".repeat(right))
}

pub fn trim_end(s: &str) -> &str {
    s.trim_end_matches(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_count_chars() {
        assert_eq!(width("‘f’"), 3);
        assert_eq!(width(""), 0);
    }

    #[test]
    fn centering() {
        assert_eq!(center("1", "Number"), "  1   ");
        assert_eq!(center("1", "a"), "1");
        assert_eq!(center("1", "abc"), " 1 ");
        assert_eq!(center("12", "a"), "12");
    }

    #[test]
    fn trimming() {
        assert_eq!(trim_end("  1   "), "  1");
        assert_eq!(trim_end("   "), "");
    }
}
