/// Flat stream of the whitespace separated tokens of a report. Line breaks carry no
/// meaning for the records, so the text is treated as a single sequence of words.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> From<&'a str> for TokenStream<'a> {
    fn from(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace().collect(),
        }
    }
}

impl<'a> TokenStream<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx).copied()
    }

    /// Returns up to `n` tokens starting at `start`. The slice is shorter if the stream ends.
    pub fn take(&self, start: usize, n: usize) -> &[&'a str] {
        let start: usize = start.min(self.tokens.len());
        let end: usize = start.saturating_add(n).min(self.tokens.len());
        &self.tokens[start..end]
    }

    /// Index of the first token after the first occurrence of `phrase`.
    pub fn find(&self, phrase: &str) -> Option<usize> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        (0..self.tokens.len())
            .find(|i| self.matches_at(*i, &words))
            .map(|i| i + words.len())
    }

    /// Indices of the first token after every occurrence of `phrase`, in order of appearance.
    pub fn find_all(&self, phrase: &str) -> Vec<usize> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        (0..self.tokens.len())
            .filter(|i| self.matches_at(*i, &words))
            .map(|i| i + words.len())
            .collect()
    }

    fn matches_at(&self, idx: usize, words: &[&str]) -> bool {
        !words.is_empty()
            && idx + words.len() <= self.tokens.len()
            && self.tokens[idx..idx + words.len()] == *words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_match_across_line_breaks() {
        let stream = TokenStream::from("Number of\n alpha electrons  I 5\nNumber of beta electrons I 4");
        assert_eq!(stream.len(), 12);
        assert_eq!(stream.find("Number of alpha electrons"), Some(4));
        assert_eq!(stream.find("Number of beta electrons"), Some(10));
        assert_eq!(stream.get(4), Some("I"));
    }

    #[test]
    fn only_whole_tokens_are_matched() {
        let stream = TokenStream::from("Charges I 1 Charge I 2");
        assert_eq!(stream.find("Charge"), Some(4));
        assert_eq!(stream.find("Spin"), None);
        assert_eq!(stream.find(""), None);
    }

    #[test]
    fn all_occurrences_are_found_in_order() {
        let stream = TokenStream::from("A B x A B y A z");
        assert_eq!(stream.find_all("A B"), vec![2, 5]);
        assert_eq!(stream.find_all("A"), vec![1, 4, 7]);
        assert_eq!(stream.take(6, 10), &["A", "z"]);
        assert!(stream.take(12, 2).is_empty());
    }
}
