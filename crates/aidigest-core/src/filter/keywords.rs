use regex::Regex;

use crate::config::DEFAULT_KEYWORDS;

/// Case-insensitive allow-list over title and feed summary.
///
/// Short ASCII terms such as "ai" only match as whole words, so "said" or
/// "email" do not count; every other term matches as a substring.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    substrings: Vec<String>,
    words: Vec<Regex>,
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut substrings = Vec::new();
        let mut words = Vec::new();

        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }
            if is_short_word(&keyword) {
                let pattern = format!(r"(?:^|[^a-z0-9]){}(?:[^a-z0-9]|$)", regex::escape(&keyword));
                match Regex::new(&pattern) {
                    Ok(re) => words.push(re),
                    Err(e) => tracing::warn!("Ignoring keyword '{}': {}", keyword, e),
                }
            } else {
                substrings.push(keyword);
            }
        }

        Self { substrings, words }
    }

    /// Accept when either text is empty or either mentions a keyword.
    /// Missing text is not evidence of irrelevance.
    pub fn matches(&self, title: &str, summary: &str) -> bool {
        if title.trim().is_empty() || summary.trim().is_empty() {
            return true;
        }
        self.contains_keyword(title) || self.contains_keyword(summary)
    }

    fn contains_keyword(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.substrings.iter().any(|k| text.contains(k.as_str()))
            || self.words.iter().any(|re| re.is_match(&text))
    }
}

fn is_short_word(keyword: &str) -> bool {
    keyword.len() <= 2 && keyword.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_title_or_summary() {
        let filter = KeywordFilter::default();
        assert!(filter.matches("OpenAI ships a new model", "Details inside"));
        assert!(filter.matches("Weekly roundup", "Advances in Machine Learning"));
        assert!(filter.matches("国产大模型发布", "详情"));
        assert!(filter.matches("人工智能周报", "本周要闻"));
    }

    #[test]
    fn test_rejects_unrelated() {
        let filter = KeywordFilter::default();
        assert!(!filter.matches("Local weather forecast", "Sunny with light winds"));
        assert!(!filter.matches("体育新闻", "足球比赛结果"));
    }

    #[test]
    fn test_short_terms_match_whole_words() {
        let filter = KeywordFilter::default();
        assert!(filter.matches(
            "Google announces new AI features for Search",
            "Today we are introducing new features."
        ));
        assert!(filter.matches("Weekly notes", "Chips built for AI."));
        assert!(filter.matches("AI芯片出货", "详情"));
        assert!(!filter.matches("He said the email was maintained", "nothing else"));
        assert!(!filter.matches("Train schedule", "Rail service resumes"));
    }

    #[test]
    fn test_empty_text_is_accepted() {
        let filter = KeywordFilter::default();
        assert!(filter.matches("Local weather forecast", ""));
        assert!(filter.matches("", "Sunny with light winds"));
        assert!(filter.matches("  ", "  "));
    }

    #[test]
    fn test_custom_keywords_are_case_insensitive() {
        let filter = KeywordFilter::new(["Robotics", " "]);
        assert!(filter.matches("ROBOTICS lab opens", "news"));
        assert!(!filter.matches("OpenAI news", "LLM"));
    }
}
