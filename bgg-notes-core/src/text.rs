/// Escape literal `*` so markdown does not read it as emphasis.
pub fn escape_emphasis(text: &str) -> String {
    text.replace('*', "\\*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_emphasis() {
        assert_eq!(escape_emphasis("A * B"), "A \\* B");
        assert_eq!(escape_emphasis("no stars"), "no stars");
        assert_eq!(escape_emphasis("**"), "\\*\\*");
        assert_eq!(escape_emphasis(""), "");
    }
}
