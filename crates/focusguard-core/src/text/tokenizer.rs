//! # Word Tokenizer
//!
//! Splits activity text (application name plus window title) into lowercase
//! word tokens. A token is a run of two or more word characters
//! (alphanumeric or `_`); everything else is a delimiter.

/// A token extracted from the input with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lowercased token text
    pub text: String,
    /// Start byte position in the original string
    pub start: usize,
    /// End byte position in the original string
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
}

/// Shortest run of word characters kept as a token.
const MIN_TOKEN_CHARS: usize = 2;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenizer for activity text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a string into a sequence of tokens.
    ///
    /// # Examples
    /// ```
    /// use focusguard_core::text::Tokenizer;
    ///
    /// let tokenizer = Tokenizer::new();
    /// let tokens = tokenizer.tokenize("Google Chrome YouTube - Lo-fi beats");
    /// assert_eq!(tokens[0].text, "google");
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current_start = 0;
        let mut token_index = 0;

        for (idx, c) in input.char_indices() {
            if !is_word_char(c) {
                if idx > current_start {
                    self.push_token(input, current_start, idx, &mut token_index, &mut tokens);
                }
                current_start = idx + c.len_utf8();
            }
        }

        if current_start < input.len() {
            self.push_token(
                input,
                current_start,
                input.len(),
                &mut token_index,
                &mut tokens,
            );
        }

        tokens
    }

    /// Tokenize and keep only the token texts.
    pub fn terms(&self, input: &str) -> Vec<String> {
        self.tokenize(input).into_iter().map(|t| t.text).collect()
    }

    fn push_token(
        &self,
        input: &str,
        start: usize,
        end: usize,
        token_index: &mut usize,
        tokens: &mut Vec<Token>,
    ) {
        let raw = &input[start..end];
        if raw.chars().count() < MIN_TOKEN_CHARS {
            return;
        }

        tokens.push(Token {
            text: raw.to_lowercase(),
            start,
            end,
            index: *token_index,
        });
        *token_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Slack #general - Acme Corp");

        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["slack", "general", "acme", "corp"]);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 5);
        assert_eq!(tokens[1].index, 1);
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        let tokenizer = Tokenizer::new();
        let terms = tokenizer.terms("a b cd e fgh");
        assert_eq!(terms, vec!["cd", "fgh"]);
    }

    #[test]
    fn test_tokenize_urls_and_underscores() {
        let tokenizer = Tokenizer::new();
        let terms = tokenizer.terms("chrome youtube.com/watch?v=abc my_file.rs");
        assert_eq!(
            terms,
            vec!["chrome", "youtube", "com", "watch", "abc", "my_file", "rs"]
        );
    }

    #[test]
    fn test_tokenize_unicode() {
        let tokenizer = Tokenizer::new();
        let terms = tokenizer.terms("Café Übersicht");
        assert_eq!(terms, vec!["café", "übersicht"]);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  -- ..  ").is_empty());
    }
}
