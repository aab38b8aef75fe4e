use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtymologyPart {
    pub part: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etymology {
    pub parts: Vec<EtymologyPart>,
    pub explanation: String,
}

/// A pre-authored catalog entry. Doubles as display data and as the base
/// that generated content is merged onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub pronunciation: String,
    pub level: Level,
    pub definition_en: String,
    pub definition_zh: String,
    pub etymology: Etymology,
    pub synonym_options: Vec<String>,
    pub synonyms: Vec<usize>,
    pub definition_options: Vec<String>,
    pub correct_definition: usize,
    pub memory_story: String,
    pub memory_phonetic: String,
    pub memory_visual: String,
}

/// Same shape as the catalog record; generator output overwrites a subset of
/// fields and leaves the rest at their catalog values.
pub type EnhancedWordRecord = WordRecord;

#[derive(Debug, Clone)]
pub struct WordCatalog {
    words: Vec<WordRecord>,
}

impl WordCatalog {
    pub fn new(words: Vec<WordRecord>) -> Self {
        Self { words }
    }

    pub fn gre() -> Self {
        Self::new(gre_words())
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    pub fn find(&self, word: &str) -> Option<&WordRecord> {
        self.words.iter().find(|w| w.word == word)
    }

    /// Candidates for the next word: same level and not yet learned, then any
    /// unlearned word, then the whole catalog once everything is learned.
    pub fn candidates(&self, level: Option<Level>, learned: &[String]) -> Vec<&WordRecord> {
        let unlearned = |w: &&WordRecord| !learned.iter().any(|l| l == &w.word);

        let at_level: Vec<&WordRecord> = self
            .words
            .iter()
            .filter(|w| Some(w.level) == level)
            .filter(unlearned)
            .collect();
        if !at_level.is_empty() {
            return at_level;
        }

        let any_unlearned: Vec<&WordRecord> = self.words.iter().filter(unlearned).collect();
        if !any_unlearned.is_empty() {
            return any_unlearned;
        }

        self.words.iter().collect()
    }

    pub fn pick_random(&self, level: Option<Level>, learned: &[String]) -> Option<&WordRecord> {
        self.candidates(level, learned)
            .choose(&mut rand::rng())
            .copied()
    }
}

struct Entry {
    word: &'static str,
    pronunciation: &'static str,
    level: Level,
    definition_en: &'static str,
    definition_zh: &'static str,
    parts: &'static [(&'static str, &'static str)],
    explanation: &'static str,
    synonym_options: [&'static str; 6],
    synonyms: [usize; 2],
    definition_options: [&'static str; 4],
    correct_definition: usize,
    memory_story: &'static str,
    memory_phonetic: &'static str,
    memory_visual: &'static str,
}

impl Entry {
    fn to_record(&self) -> WordRecord {
        WordRecord {
            word: self.word.to_string(),
            pronunciation: self.pronunciation.to_string(),
            level: self.level,
            definition_en: self.definition_en.to_string(),
            definition_zh: self.definition_zh.to_string(),
            etymology: Etymology {
                parts: self
                    .parts
                    .iter()
                    .map(|(part, meaning)| EtymologyPart {
                        part: part.to_string(),
                        meaning: meaning.to_string(),
                    })
                    .collect(),
                explanation: self.explanation.to_string(),
            },
            synonym_options: self.synonym_options.iter().map(|s| s.to_string()).collect(),
            synonyms: self.synonyms.to_vec(),
            definition_options: self.definition_options.iter().map(|s| s.to_string()).collect(),
            correct_definition: self.correct_definition,
            memory_story: self.memory_story.to_string(),
            memory_phonetic: self.memory_phonetic.to_string(),
            memory_visual: self.memory_visual.to_string(),
        }
    }
}

pub fn gre_words() -> Vec<WordRecord> {
    GRE_WORDS.iter().map(Entry::to_record).collect()
}

const GRE_WORDS: &[Entry] = &[
    Entry {
        word: "abstruse",
        pronunciation: "/æbˈstrus/",
        level: Level::Hard,
        definition_en: "Difficult to understand; obscure",
        definition_zh: "难以理解的；深奥的",
        parts: &[("ab-", "away from"), ("trus", "thrust"), ("-e", "adjective suffix")],
        explanation: "Originally meaning 'thrust away' or hidden from understanding",
        synonym_options: ["obscure", "clear", "complex", "transparent", "convoluted", "obvious"],
        synonyms: [0, 4],
        definition_options: [
            "Difficult to understand; obscure",
            "Easy to comprehend",
            "Relating to abstract art",
            "Simple and straightforward",
        ],
        correct_definition: 0,
        memory_story: "Imagine an 'abstract' painting that's so 'obtuse' (abstruse) that nobody can understand what it means!",
        memory_phonetic: "Ab-STRUS sounds like 'abstract truth' - abstract truths are often hard to understand.",
        memory_visual: "Picture a maze with 'ABS' (abstract) pathways that are 'TRUCE' (hard to navigate)",
    },
    Entry {
        word: "ameliorate",
        pronunciation: "/əˈmilyəˌreɪt/",
        level: Level::Medium,
        definition_en: "To make or become better; improve",
        definition_zh: "改善；改进",
        parts: &[("a-", "to"), ("melior", "better"), ("-ate", "verb suffix")],
        explanation: "From Latin 'melior' meaning better, so literally 'to make better'",
        synonym_options: ["worsen", "improve", "maintain", "enhance", "deteriorate", "upgrade"],
        synonyms: [1, 3],
        definition_options: [
            "To make worse",
            "To make or become better; improve",
            "To remain the same",
            "To analyze carefully",
        ],
        correct_definition: 1,
        memory_story: "Amy's lemonade was terrible, but she worked to 'ameliorate' it by adding more sugar until it was much better!",
        memory_phonetic: "A-MELI-ORATE sounds like 'Amy's melody rate' - Amy improved her melody to get a better rate!",
        memory_visual: "Picture 'A MELON RATE' - upgrading from bad melons to premium melons for a better rate",
    },
    Entry {
        word: "castigate",
        pronunciation: "/ˈkæstɪˌgeɪt/",
        level: Level::Medium,
        definition_en: "To criticize or punish severely",
        definition_zh: "严厉批评；惩罚",
        parts: &[("castig", "pure, chaste"), ("-ate", "verb suffix")],
        explanation: "Originally meant 'to make pure' through punishment or discipline",
        synonym_options: ["praise", "scold", "ignore", "rebuke", "compliment", "reward"],
        synonyms: [1, 3],
        definition_options: [
            "To praise highly",
            "To criticize or punish severely",
            "To ignore completely",
            "To reward generously",
        ],
        correct_definition: 1,
        memory_story: "The knight had to 'castigate' (punish) the soldiers who broke the castle gate rules!",
        memory_phonetic: "CASTI-GATE sounds like 'cast the gate' - someone was severely punished and cast out of the gate!",
        memory_visual: "Picture a 'CASTLE GATE' where guards severely scold anyone who breaks the rules",
    },
    Entry {
        word: "ephemeral",
        pronunciation: "/ɪˈfɛmərəl/",
        level: Level::Hard,
        definition_en: "Lasting for a very short time; transitory",
        definition_zh: "短暂的；瞬息的",
        parts: &[("epi-", "upon"), ("hemer", "day"), ("-al", "adjective suffix")],
        explanation: "From Greek 'ephemeros' meaning 'lasting only a day'",
        synonym_options: ["permanent", "temporary", "eternal", "fleeting", "lasting", "durable"],
        synonyms: [1, 3],
        definition_options: [
            "Lasting forever",
            "Lasting for a very short time; transitory",
            "Happening regularly",
            "Very important",
        ],
        correct_definition: 1,
        memory_story: "The beautiful 'ephemeral' butterfly lived for only one day - like an 'e-femoral' (electronic femur) that breaks quickly!",
        memory_phonetic: "E-PHEMER-AL sounds like 'E-FAME-REAL' - electronic fame is often very short-lived and ephemeral!",
        memory_visual: "Picture an 'E-FOLDER' that disappears after one day - very ephemeral digital storage",
    },
    Entry {
        word: "gregarious",
        pronunciation: "/grɪˈgeəriəs/",
        level: Level::Easy,
        definition_en: "Sociable; enjoying the company of others",
        definition_zh: "爱社交的；合群的",
        parts: &[("greg", "flock, herd"), ("-arious", "characterized by")],
        explanation: "From Latin 'grex' meaning flock - someone who likes to be part of a group",
        synonym_options: ["antisocial", "sociable", "isolated", "outgoing", "withdrawn", "lonely"],
        synonyms: [1, 3],
        definition_options: [
            "Preferring to be alone",
            "Sociable; enjoying the company of others",
            "Very aggressive",
            "Extremely quiet",
        ],
        correct_definition: 1,
        memory_story: "Greg was so 'gregarious' that everyone called him 'Great Greg' because he loved hanging out with groups!",
        memory_phonetic: "GREG-ARIOUS sounds like 'Greg-hilarious' - Greg is so sociable and funny that everyone wants to be around him!",
        memory_visual: "Picture 'GREG' surrounded by 'VARIOUS' people - he's gregarious and loves variety in his social circle",
    },
    Entry {
        word: "laconic",
        pronunciation: "/ləˈkɒnɪk/",
        level: Level::Medium,
        definition_en: "Using few words; concise",
        definition_zh: "简洁的；言简意赅的",
        parts: &[("Lacon", "Laconia (Sparta)"), ("-ic", "adjective suffix")],
        explanation: "From Laconia, region of ancient Sparta, known for brief, pithy speech",
        synonym_options: ["verbose", "concise", "talkative", "brief", "wordy", "lengthy"],
        synonyms: [1, 3],
        definition_options: [
            "Using many words",
            "Using few words; concise",
            "Speaking loudly",
            "Speaking softly",
        ],
        correct_definition: 1,
        memory_story: "The 'laconic' speaker was like a 'lack-tonic' - he lacked the tonic of many words and kept it short!",
        memory_phonetic: "LACONIC sounds like 'LACK-TONIC' - he lacks the tonic of long speeches, keeps it brief!",
        memory_visual: "Picture a 'LAKE-COMIC' who tells very short jokes by the lake - brief and to the point",
    },
];
