use anyhow::{Result, anyhow};
use rand::seq::SliceRandom;

/// Cartoon heroes used as words to guess when no custom list is configured.
pub const DEFAULT_HEROES: &[&str] = &[
    "superman",
    "spiderman",
    "batman",
    "catwoman",
    "jocker",
    "wolverine",
    "mickeymouse",
    "donaldduck",
    "wonderwoman",
    "capitanplanet",
    "rickandmorty",
    "ericcartman",
];

/// The fixed vocabulary secret words are drawn from.
#[derive(Debug, Clone)]
pub struct HeroVocabulary {
    heroes: Vec<String>,
}

impl HeroVocabulary {
    /// Create a vocabulary from a newline separated word list.
    ///
    /// Blank lines and `#` comments are skipped, words are lower-cased and
    /// anything that is not purely alphabetic is dropped.
    pub fn from_word_list(word_list: &str) -> Result<Self> {
        let heroes: Vec<String> = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .filter(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();

        if heroes.is_empty() {
            return Err(anyhow!("No usable heroes in word list"));
        }

        Ok(Self { heroes })
    }

    /// Load a word list from a file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read word list {}: {}", path.display(), e))?;
        Self::from_word_list(&contents)
    }

    pub fn random_word(&self) -> String {
        self.heroes
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_HEROES[0].to_string())
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        self.heroes.iter().any(|hero| *hero == word)
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

impl Default for HeroVocabulary {
    fn default() -> Self {
        Self {
            heroes: DEFAULT_HEROES.iter().map(|h| h.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let heroes = HeroVocabulary::default();
        assert_eq!(heroes.len(), 12);
        assert!(heroes.contains("batman"));
        assert!(heroes.contains("BATMAN")); // case insensitive
        assert!(!heroes.contains("robin"));
    }

    #[test]
    fn test_comments_and_whitespace() {
        let word_list = "# heroes\nBatman\n   \n\t# Another comment\n  robin  \n\n";
        let heroes = HeroVocabulary::from_word_list(word_list).unwrap();

        assert_eq!(heroes.len(), 2);
        assert!(heroes.contains("batman"));
        assert!(heroes.contains("robin"));
    }

    #[test]
    fn test_non_alphabetic_entries_are_dropped() {
        let heroes = HeroVocabulary::from_word_list("spider-man\nx23\nhulk").unwrap();
        assert_eq!(heroes.len(), 1);
        assert!(heroes.contains("hulk"));
    }

    #[test]
    fn test_empty_word_list() {
        let result = HeroVocabulary::from_word_list("# nothing here\n\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("No usable heroes"));
    }

    #[test]
    fn test_random_word_comes_from_vocabulary() {
        let heroes = HeroVocabulary::default();
        for _ in 0..20 {
            let word = heroes.random_word();
            assert!(heroes.contains(&word));
            assert!(word.chars().all(|c| c.is_ascii_lowercase()));
        }
    }
}
