//! Next-word selection.

use crate::model::archive::Archive;
use crate::repo::seed_source::SeedVocabulary;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Seed words that are not archived yet, in seed order.
pub fn available_words<'a>(seed: &'a SeedVocabulary, archive: &Archive) -> Vec<&'a str> {
    let archived = archive.words();
    seed.words()
        .iter()
        .map(String::as_str)
        .filter(|word| !archived.contains(word))
        .collect()
}

/// Picks one unarchived seed word uniformly at random.
///
/// Returns `None` when every seed word is archived; that is the normal
/// "fully learned" state, not an error.
pub fn select_next<'a, R>(
    seed: &'a SeedVocabulary,
    archive: &Archive,
    rng: &mut R,
) -> Option<&'a str>
where
    R: Rng + ?Sized,
{
    let available = available_words(seed, archive);
    available.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::{available_words, select_next};
    use crate::model::archive::Archive;
    use crate::model::record::ArchiveRecord;
    use crate::repo::seed_source::SeedVocabulary;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn archived(words: &[&str]) -> Archive {
        Archive::from_records(
            words
                .iter()
                .map(|word| ArchiveRecord {
                    word: word.to_string(),
                    reading: String::new(),
                    meaning: String::new(),
                    date: "2024-01-01".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn available_words_preserves_seed_order() {
        let seed = SeedVocabulary::from_words(["a", "b", "c", "d"]);
        let archive = archived(&["c", "a"]);
        assert_eq!(available_words(&seed, &archive), vec!["b", "d"]);
    }

    #[test]
    fn select_next_on_empty_seed_is_none() {
        let seed = SeedVocabulary::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_next(&seed, &Archive::new(), &mut rng), None);
    }

    #[test]
    fn select_next_is_reproducible_for_same_rng_seed() {
        let seed = SeedVocabulary::from_words(["a", "b", "c", "d", "e"]);
        let archive = Archive::new();

        let first = select_next(&seed, &archive, &mut StdRng::seed_from_u64(42));
        let second = select_next(&seed, &archive, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert!(first.is_some());
    }
}
