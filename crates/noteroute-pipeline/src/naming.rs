//! Shared folder-name derivation (§4.4 batch create_folder suggestions,
//! §4.8 single-candidate expansion opportunity): the top 3 non-stopword
//! tokens of a distilled title, lowercased and hyphen-joined.

use noteroute_core::model::FolderId;

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "of", "in", "on", "to", "for", "and", "or", "is", "are", "was", "were", "with", "by", "at",
    "from", "as", "it", "its", "this", "that", "be", "has", "have", "had", "into", "about",
];

/// Derive a folder name from a title's top 3 non-stopword tokens.
/// Falls back to `"new-topic"` when the title yields nothing usable.
pub fn name_from_title(title: &str) -> FolderId {
    let tokens: Vec<String> = title
        .split(|c: char| !c.is_alphanumeric())
        .map(|t| t.to_lowercase())
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(&t.as_str()))
        .take(3)
        .collect();

    if tokens.is_empty() {
        "new-topic".to_string()
    } else {
        tokens.join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_top_three_non_stopword_tokens() {
        assert_eq!(name_from_title("The Theory of Relativity and Spacetime"), "theory-relativity-spacetime");
    }

    #[test]
    fn falls_back_to_new_topic_when_only_stopwords() {
        assert_eq!(name_from_title("the of and"), "new-topic");
    }

    #[test]
    fn falls_back_on_empty_string() {
        assert_eq!(name_from_title(""), "new-topic");
    }

    #[test]
    fn caps_at_three_tokens() {
        assert_eq!(name_from_title("alpha beta gamma delta epsilon"), "alpha-beta-gamma");
    }
}
