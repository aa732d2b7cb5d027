// Language Profiles
// Per-language pattern bundles used by the identifier and the feature extractor.
// Profiles are compiled once at startup into a read-only registry.

use super::errors::MalformedProfileError;
use regex::Regex;

/// Static description of a language profile before compilation.
///
/// Word-list categories are matched as whole words, case-insensitively.
/// `derivational_endings` and `contractions` are raw regex fragments.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSpec {
    pub code: &'static str,
    pub name: &'static str,
    pub common_words: &'static [&'static str],
    /// May be empty; an empty set never matches.
    pub special_characters: &'static [char],
    pub derivational_endings: &'static [&'static str],
    pub pronouns: &'static [&'static str],
    pub contractions: &'static [&'static str],
    pub informal_markers: &'static [&'static str],
    pub transition_words: &'static [&'static str],
}

/// A compiled matcher for one pattern category.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Option<Regex>,
    /// Reject hits glued to a word by an apostrophe (`y` in `y'know`).
    whole_words: bool,
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// True when the match touches an apostrophe that continues into another word.
fn joined_by_apostrophe(text: &str, start: usize, end: usize) -> bool {
    let mut before = text[..start].chars().rev();
    let joined_before = matches!(
        (before.next(), before.next()),
        (Some(a), Some(w)) if is_apostrophe(a) && w.is_alphanumeric()
    );
    let mut after = text[end..].chars();
    let joined_after = matches!(
        (after.next(), after.next()),
        (Some(a), Some(w)) if is_apostrophe(a) && w.is_alphanumeric()
    );
    joined_before || joined_after
}

impl PatternMatcher {
    /// Count non-overlapping matches; no pattern means zero.
    pub fn count(&self, text: &str) -> usize {
        let Some(re) = self.regex.as_ref() else {
            return 0;
        };
        if !self.whole_words {
            return re.find_iter(text).count();
        }
        re.find_iter(text)
            .filter(|m| !joined_by_apostrophe(text, m.start(), m.end()))
            .count()
    }

    fn never() -> Self {
        Self {
            regex: None,
            whole_words: false,
        }
    }

    fn compile_words(
        profile: &str,
        category: &'static str,
        words: &[&str],
    ) -> Result<Self, MalformedProfileError> {
        let mut matcher = Self::compile(profile, category, word_list_pattern(words))?;
        matcher.whole_words = true;
        Ok(matcher)
    }

    fn compile(
        profile: &str,
        category: &'static str,
        pattern: String,
    ) -> Result<Self, MalformedProfileError> {
        Regex::new(&pattern)
            .map(|re| Self {
                regex: Some(re),
                whole_words: false,
            })
            .map_err(|e| MalformedProfileError::InvalidPattern {
                profile: profile.to_string(),
                category,
                message: e.to_string(),
            })
    }
}

#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub common_words: PatternMatcher,
    pub special_characters: PatternMatcher,
    pub derivational_endings: PatternMatcher,
    pub pronouns: PatternMatcher,
    pub contractions: PatternMatcher,
    pub informal_markers: PatternMatcher,
    pub transition_words: PatternMatcher,
}

fn require_entries<T>(
    spec: &ProfileSpec,
    category: &'static str,
    entries: &[T],
) -> Result<(), MalformedProfileError> {
    if entries.is_empty() {
        return Err(MalformedProfileError::EmptyCategory {
            profile: spec.code.to_string(),
            category,
        });
    }
    Ok(())
}

/// Whole-word alternation; longer entries first so phrases win over their prefixes.
fn word_list_pattern(words: &[&str]) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = sorted
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"(?i)\b(?:{})\b", alternation)
}

fn fragment_pattern(fragments: &[&str]) -> String {
    format!("(?i)(?:{})", fragments.join("|"))
}

fn char_class_pattern(chars: &[char]) -> String {
    let class: String = chars
        .iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    format!("(?i)[{}]", class)
}

impl LanguageProfile {
    pub fn compile(spec: &ProfileSpec) -> Result<Self, MalformedProfileError> {
        if spec.code.trim().is_empty() || spec.name.trim().is_empty() {
            return Err(MalformedProfileError::EmptyName);
        }
        require_entries(spec, "commonWords", spec.common_words)?;
        require_entries(spec, "derivationalEndings", spec.derivational_endings)?;
        require_entries(spec, "pronouns", spec.pronouns)?;
        require_entries(spec, "contractions", spec.contractions)?;
        require_entries(spec, "informalMarkers", spec.informal_markers)?;
        require_entries(spec, "transitionWords", spec.transition_words)?;

        let code = spec.code;
        let special_characters = if spec.special_characters.is_empty() {
            PatternMatcher::never()
        } else {
            PatternMatcher::compile(
                code,
                "specialCharacters",
                char_class_pattern(spec.special_characters),
            )?
        };

        Ok(Self {
            code,
            name: spec.name,
            common_words: PatternMatcher::compile_words(
                code,
                "commonWords",
                spec.common_words,
            )?,
            special_characters,
            derivational_endings: PatternMatcher::compile(
                code,
                "derivationalEndings",
                fragment_pattern(spec.derivational_endings),
            )?,
            pronouns: PatternMatcher::compile_words(code, "pronouns", spec.pronouns)?,
            contractions: PatternMatcher::compile(
                code,
                "contractions",
                fragment_pattern(spec.contractions),
            )?,
            informal_markers: PatternMatcher::compile_words(
                code,
                "informalMarkers",
                spec.informal_markers,
            )?,
            transition_words: PatternMatcher::compile_words(
                code,
                "transitionWords",
                spec.transition_words,
            )?,
        })
    }
}

// ============ Registry ============

/// Read-only set of compiled profiles. Declaration order is the tie-break priority.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<LanguageProfile>,
}

impl ProfileRegistry {
    pub fn from_specs(specs: &[ProfileSpec]) -> Result<Self, MalformedProfileError> {
        if specs.is_empty() {
            return Err(MalformedProfileError::EmptyRegistry);
        }
        let mut profiles: Vec<LanguageProfile> = Vec::with_capacity(specs.len());
        for spec in specs {
            if profiles.iter().any(|p| p.code == spec.code) {
                return Err(MalformedProfileError::DuplicateCode(spec.code.to_string()));
            }
            profiles.push(LanguageProfile::compile(spec)?);
        }
        Ok(Self { profiles })
    }

    /// English, Danish, French, Spanish, German, in that priority order.
    pub fn builtin() -> Result<Self, MalformedProfileError> {
        Self::from_specs(BUILTIN_PROFILES)
    }

    pub fn profiles(&self) -> &[LanguageProfile] {
        &self.profiles
    }

    /// Highest-priority profile; the registry is never empty.
    pub fn fallback(&self) -> &LanguageProfile {
        &self.profiles[0]
    }

    pub fn get(&self, code: &str) -> Option<&LanguageProfile> {
        self.profiles.iter().find(|p| p.code.eq_ignore_ascii_case(code))
    }
}

// ============ Built-in Profiles ============

pub const ENGLISH: ProfileSpec = ProfileSpec {
    code: "en",
    name: "English",
    common_words: &[
        "the", "and", "is", "are", "was", "were", "of", "to", "in", "that", "this", "with",
        "for", "on", "have", "has", "not", "but", "what", "which", "from", "be",
    ],
    special_characters: &[],
    derivational_endings: &[
        r"\b\w+(?:tion|sion|ness|ment|ity|ship)s?\b",
        r"\b\w{3,}(?:ly|ful|less|able|ible)\b",
    ],
    pronouns: &["i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "you", "your"],
    contractions: &[
        r"\b[a-z]+['’](?:t|s|re|ve|ll|d|m)\b",
        r"\by['’](?:know|all)\b",
    ],
    informal_markers: &[
        "i think", "i guess", "i mean", "you know", "kinda", "sorta", "gonna", "wanna",
        "gotta", "yeah", "nope", "yep", "lol", "btw", "tbh", "honestly", "basically",
        "just", "stuff", "anyway", "like", "ok", "okay", "weird", "pretty much",
    ],
    transition_words: &[
        "furthermore", "moreover", "additionally", "however", "therefore", "consequently",
        "thus", "hence", "nevertheless", "nonetheless", "in addition", "in conclusion",
        "overall", "firstly", "secondly", "finally", "notably", "ultimately", "importantly",
        "as a result", "on the other hand", "in summary", "to summarize",
    ],
};

pub const DANISH: ProfileSpec = ProfileSpec {
    code: "da",
    name: "Danish",
    common_words: &[
        "og", "det", "er", "en", "et", "til", "på", "med", "af", "ikke", "at", "som", "har",
        "der", "for", "var", "også", "men", "kan", "skal",
    ],
    special_characters: &['æ', 'ø', 'å'],
    derivational_endings: &[r"\b\w+(?:hed|heder|else|skab|ning|ninger|lig|lige|isk)\b"],
    pronouns: &["jeg", "mig", "min", "mit", "mine", "vi", "os", "vores", "du", "dig", "din"],
    contractions: &[r"\b(?:ik|ka|sku|vil|gi|ha|ta)['’]"],
    informal_markers: &[
        "altså", "sgu", "jo", "bare", "lidt", "ligesom", "nok", "vildt", "fedt", "okay",
        "ok", "hmm", "haha", "jeg tror", "jeg synes",
    ],
    transition_words: &[
        "derudover", "desuden", "endvidere", "imidlertid", "derfor", "således", "dog",
        "afslutningsvis", "sammenfattende", "for det første", "for det andet", "endelig",
        "herudover", "følgelig",
    ],
};

pub const FRENCH: ProfileSpec = ProfileSpec {
    code: "fr",
    name: "French",
    common_words: &[
        "le", "la", "les", "et", "est", "des", "une", "un", "du", "dans", "que", "qui", "pour",
        "pas", "sur", "avec", "sont", "mais", "ce", "au",
    ],
    special_characters: &['à', 'â', 'ç', 'é', 'è', 'ê', 'ë', 'î', 'ï', 'ô', 'û', 'ù', 'œ'],
    derivational_endings: &[r"\b\w+(?:tion|ment|ité|eux|euse|ique|isme|age)s?\b"],
    pronouns: &["je", "me", "moi", "mon", "ma", "mes", "nous", "notre", "tu", "toi", "vous"],
    contractions: &[r"\b(?:t['’]es|t['’]as|y['’]a|j['’]sais|chuis|p['’]tit)\b"],
    informal_markers: &[
        "bon", "bah", "ben", "genre", "truc", "trucs", "ouais", "bref", "quoi", "franchement",
        "carrément", "vachement", "je pense", "je crois",
    ],
    transition_words: &[
        "cependant", "toutefois", "néanmoins", "par conséquent", "ainsi", "de plus",
        "en outre", "en conclusion", "en effet", "donc", "premièrement", "deuxièmement",
        "enfin", "par ailleurs",
    ],
};

pub const SPANISH: ProfileSpec = ProfileSpec {
    code: "es",
    name: "Spanish",
    common_words: &[
        "el", "la", "los", "las", "y", "es", "en", "de", "que", "un", "una", "por", "con",
        "para", "se", "del", "al", "como", "pero", "muy",
    ],
    special_characters: &['ñ', 'á', 'é', 'í', 'ó', 'ú', '¿', '¡'],
    derivational_endings: &[r"\b\w+(?:ción|ciones|mente|dad|dades|oso|osa|ismo)\b"],
    pronouns: &["yo", "me", "mí", "mi", "mis", "nosotros", "nosotras", "nuestro", "tú", "te", "usted"],
    contractions: &[r"\b(?:pa|na|to)['’]"],
    informal_markers: &[
        "pues", "bueno", "vale", "tío", "tía", "o sea", "este", "guay", "jaja", "en plan",
        "creo que", "la verdad",
    ],
    transition_words: &[
        "además", "sin embargo", "por lo tanto", "por consiguiente", "no obstante", "asimismo",
        "en conclusión", "en resumen", "finalmente", "en primer lugar", "por otro lado", "así",
    ],
};

pub const GERMAN: ProfileSpec = ProfileSpec {
    code: "de",
    name: "German",
    common_words: &[
        "der", "die", "das", "und", "ist", "nicht", "mit", "ein", "eine", "zu", "von", "den",
        "auf", "für", "sich", "auch", "es", "sind", "dem", "wird",
    ],
    special_characters: &['ä', 'ö', 'ü', 'ß'],
    derivational_endings: &[r"\b\w+(?:ung|ungen|heit|keit|lich|schaft|isch)\b"],
    pronouns: &["ich", "mich", "mir", "mein", "meine", "wir", "uns", "unser", "du", "dich", "dir"],
    contractions: &[r"\b\w+['’]s\b", r"\b(?:hab|nich|is)['’]"],
    informal_markers: &[
        "halt", "eben", "mal", "naja", "echt", "krass", "quasi", "irgendwie", "ne", "nee",
        "ich glaube", "ich finde", "na ja",
    ],
    transition_words: &[
        "außerdem", "darüber hinaus", "jedoch", "dennoch", "deshalb", "daher", "folglich",
        "zusammenfassend", "schließlich", "zunächst", "erstens", "zweitens", "allerdings",
    ],
};

pub const BUILTIN_PROFILES: &[ProfileSpec] = &[ENGLISH, DANISH, FRENCH, SPANISH, GERMAN];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_compiles() {
        let registry = ProfileRegistry::builtin().unwrap();
        let codes: Vec<&str> = registry.profiles().iter().map(|p| p.code).collect();
        assert_eq!(codes, vec!["en", "da", "fr", "es", "de"]);
        assert_eq!(registry.fallback().code, "en");
        assert_eq!(registry.get("DA").map(|p| p.name), Some("Danish"));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProfileRegistry>();
    }

    #[test]
    fn test_empty_category_is_rejected() {
        let spec = ProfileSpec {
            transition_words: &[],
            ..ENGLISH
        };
        let err = ProfileRegistry::from_specs(&[spec]).unwrap_err();
        assert_eq!(
            err,
            MalformedProfileError::EmptyCategory {
                profile: "en".to_string(),
                category: "transitionWords",
            }
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let spec = ProfileSpec {
            contractions: &[r"(unclosed"],
            ..ENGLISH
        };
        let err = ProfileRegistry::from_specs(&[spec]).unwrap_err();
        assert!(matches!(err, MalformedProfileError::InvalidPattern { category: "contractions", .. }));
    }

    #[test]
    fn test_duplicate_codes_and_empty_registry() {
        let err = ProfileRegistry::from_specs(&[ENGLISH, ENGLISH]).unwrap_err();
        assert_eq!(err, MalformedProfileError::DuplicateCode("en".to_string()));
        let err = ProfileRegistry::from_specs(&[]).unwrap_err();
        assert_eq!(err, MalformedProfileError::EmptyRegistry);
    }

    #[test]
    fn test_word_patterns_match_whole_words_case_insensitively() {
        let registry = ProfileRegistry::builtin().unwrap();
        let en = registry.get("en").unwrap();
        assert_eq!(en.common_words.count("The theory and THE answer"), 3);
        assert_eq!(en.transition_words.count("However, in conclusion it works"), 2);
        assert_eq!(en.informal_markers.count("I think it's kinda weird"), 3);
    }

    #[test]
    fn test_empty_special_characters_never_match() {
        let registry = ProfileRegistry::builtin().unwrap();
        let en = registry.get("en").unwrap();
        assert_eq!(en.special_characters.count("æøå éè"), 0);
        let da = registry.get("da").unwrap();
        assert_eq!(da.special_characters.count("Blåbærgrød ØL"), 4);
    }

    #[test]
    fn test_contractions() {
        let registry = ProfileRegistry::builtin().unwrap();
        let en = registry.get("en").unwrap();
        assert_eq!(en.contractions.count("It's fine, y'know, we'll see and I don’t care"), 4);
    }

    #[test]
    fn test_word_lists_skip_fragments_joined_by_apostrophe() {
        let registry = ProfileRegistry::builtin().unwrap();
        let es = registry.get("es").unwrap();
        assert_eq!(es.common_words.count("y'know"), 0);
        assert_eq!(es.common_words.count("y’know"), 0);
        assert_eq!(es.common_words.count("pan y vino"), 1);

        let en = registry.get("en").unwrap();
        assert_eq!(en.common_words.count("he said 'the' twice"), 1);
        assert_eq!(en.pronouns.count("I'm sure I did"), 1);
        assert_eq!(en.pronouns.count("rock 'n' roll, you"), 1);
    }
}
