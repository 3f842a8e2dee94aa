/**
 * Joke Data Structure
 *
 * The joke list served by `GET /api/jokes`. The list is static and
 * compiled into the binary.
 */
use serde::{Deserialize, Serialize};

/// A single joke entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Joke {
    /// Position in the list, starting at 1
    pub id: u32,
    /// Category title
    pub title: String,
    /// The joke itself
    pub content: String,
}

const TOMATO: &str =
    "What did one tomato say to the other tomato? You're the tomato on the tomato stand.";

/// The full joke list
pub fn all_jokes() -> Vec<Joke> {
    (1..=3)
        .map(|id| Joke {
            id,
            title: "Dad Jokes".to_string(),
            content: TOMATO.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_jokes_with_sequential_ids() {
        let jokes = all_jokes();
        assert_eq!(jokes.len(), 3);
        assert_eq!(jokes.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(jokes.iter().all(|j| !j.content.is_empty()));
    }

    #[test]
    fn test_joke_json_shape() {
        let json = serde_json::to_value(&all_jokes()[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Dad Jokes");
        assert!(json.get("content").is_some());
    }
}
