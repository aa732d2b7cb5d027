// Language Identifier
// Scores text against every profile and picks the best match

use crate::services::language_profiles::{LanguageProfile, ProfileRegistry};

const COMMON_WORD_WEIGHT: usize = 2;
const SPECIAL_CHAR_WEIGHT: usize = 3;
const ENDING_WEIGHT: usize = 2;
const PRONOUN_WEIGHT: usize = 1;

/// Weighted match count of `text` against one profile.
pub fn profile_score(text: &str, profile: &LanguageProfile) -> usize {
    COMMON_WORD_WEIGHT * profile.common_words.count(text)
        + SPECIAL_CHAR_WEIGHT * profile.special_characters.count(text)
        + ENDING_WEIGHT * profile.derivational_endings.count(text)
        + PRONOUN_WEIGHT * profile.pronouns.count(text)
}

/// Best-matching profile. Only a strictly greater score displaces an earlier
/// profile, so ties and pattern-free text resolve to registry order.
pub fn identify_language<'r>(text: &str, registry: &'r ProfileRegistry) -> &'r LanguageProfile {
    let mut best = registry.fallback();
    let mut best_score = 0usize;
    for profile in registry.profiles() {
        let score = profile_score(text, profile);
        if score > best_score {
            best = profile;
            best_score = score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::language_profiles::{ProfileSpec, ENGLISH, GERMAN};

    fn registry() -> ProfileRegistry {
        ProfileRegistry::builtin().unwrap()
    }

    #[test]
    fn test_identifies_english() {
        let text = "The report shows that the committee has not reached a decision, and we are waiting.";
        assert_eq!(identify_language(text, &registry()).code, "en");
    }

    #[test]
    fn test_identifies_danish() {
        let text = "Jeg har været på ferie med min familie, og det var en dejlig tid. Vi så også søen.";
        assert_eq!(identify_language(text, &registry()).code, "da");
    }

    #[test]
    fn test_identifies_french() {
        let text = "Le gouvernement a présenté une réforme qui est très discutée dans les médias et à l'école.";
        assert_eq!(identify_language(text, &registry()).code, "fr");
    }

    #[test]
    fn test_identifies_spanish() {
        let text = "El niño está en la escuela y su madre trabaja para una empresa muy grande en España.";
        assert_eq!(identify_language(text, &registry()).code, "es");
    }

    #[test]
    fn test_identifies_german() {
        let text = "Die Regierung hat die Änderung nicht für nötig gehalten, und das ist für uns schwierig.";
        assert_eq!(identify_language(text, &registry()).code, "de");
    }

    #[test]
    fn test_apostrophe_fragment_does_not_sway_identification() {
        let reg = registry();
        let text = "I think, y'know, it's just kinda weird";
        let es = reg.get("es").unwrap();
        assert_eq!(profile_score(text, es), 0);
        assert_eq!(identify_language(text, &reg).code, "en");
    }

    #[test]
    fn test_empty_text_falls_back_to_first_profile() {
        let reg = registry();
        assert_eq!(identify_language("", &reg).code, "en");
        assert_eq!(identify_language("12345 ###", &reg).code, "en");
    }

    #[test]
    fn test_ties_resolve_by_declaration_order() {
        let twin = ProfileSpec {
            code: "en2",
            name: "English Twin",
            ..ENGLISH
        };
        let reg = ProfileRegistry::from_specs(&[twin, ENGLISH, GERMAN]).unwrap();
        let text = "the cat and the dog";
        assert_eq!(identify_language(text, &reg).code, "en2");
    }

    #[test]
    fn test_deterministic() {
        let reg = registry();
        let text = "Die Katze und the dog sind friends.";
        let first = identify_language(text, &reg).code;
        for _ in 0..5 {
            assert_eq!(identify_language(text, &reg).code, first);
        }
    }
}
