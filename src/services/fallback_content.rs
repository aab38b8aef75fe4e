use crate::services::catalog::{EnhancedWordRecord, WordRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mnemonics {
    story: String,
    phonetic: String,
    visual: String,
}

/// Network-free mnemonics. Only the three memory fields change; etymology and
/// quiz fields stay as the record has them.
pub fn generate_fallback_content(word: &str, record: &WordRecord) -> EnhancedWordRecord {
    let mnemonics =
        canned_mnemonics(word).unwrap_or_else(|| templated_mnemonics(word, &record.definition_zh));

    let mut enhanced = record.clone();
    enhanced.memory_story = mnemonics.story;
    enhanced.memory_phonetic = mnemonics.phonetic;
    enhanced.memory_visual = mnemonics.visual;
    enhanced
}

fn canned_mnemonics(word: &str) -> Option<Mnemonics> {
    match word {
        "abstruse" => Some(Mnemonics {
            story: format!("想象一个抽象艺术家画了一幅非常'{word}'的画，连他自己都看不懂！"),
            phonetic: format!("'{word}'听起来像'爱不死你'，爱得太深奥难懂！"),
            visual: format!(
                "画面：一个迷宫般复杂的'{}'标志，让人困惑不解",
                upper_prefix(word, 3)
            ),
        }),
        "ameliorate" => Some(Mnemonics {
            story: format!("Amy的柠檬水很难喝，她努力'{word}'改善配方，终于变得美味！"),
            phonetic: format!("'{word}'像'Amy来优化'，Amy来优化让一切变得更好！"),
            visual: format!(
                "想象'{}'牌神奇药水，能让任何东西都变得更好",
                upper_prefix(word, 4)
            ),
        }),
        _ => None,
    }
}

fn templated_mnemonics(word: &str, definition_zh: &str) -> Mnemonics {
    Mnemonics {
        story: format!(
            "想象'{word}'这个词出现在一个有趣的故事中，帮助你记住它的含义：{definition_zh}"
        ),
        phonetic: format!("'{word}'的发音可以联想到相似的中文词汇，帮助记忆"),
        visual: format!("在脑海中创造一个与'{word}'含义相关的生动画面"),
    }
}

fn upper_prefix(word: &str, len: usize) -> String {
    word.chars().take(len).collect::<String>().to_uppercase()
}
