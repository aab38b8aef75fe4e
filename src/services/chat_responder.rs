use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatContext {
    #[serde(default)]
    pub current_word: Option<String>,
}

impl ChatContext {
    pub fn for_word(word: impl Into<String>) -> Self {
        Self {
            current_word: Some(word.into()),
        }
    }

    fn word(&self) -> Option<&str> {
        self.current_word.as_deref().filter(|w| !w.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Memory,
    Etymology,
    Synonym,
    Example,
    Difficulty,
}

/// Checked in order; the first group with a hit decides the reply.
const TOPICS: &[(&str, &str, Topic)] = &[
    ("记忆", "remember", Topic::Memory),
    ("词根", "etymology", Topic::Etymology),
    ("同义词", "synonym", Topic::Synonym),
    ("例句", "example", Topic::Example),
    ("难", "difficult", Topic::Difficulty),
];

fn detect_topic(message: &str) -> Option<Topic> {
    let lower = message.to_lowercase();
    TOPICS
        .iter()
        .find(|(zh, en, _)| message.contains(zh) || lower.contains(en))
        .map(|(_, _, topic)| *topic)
}

/// Deterministic tutor reply keyed on the message topic.
pub fn respond(message: &str, context: &ChatContext) -> String {
    let word = context.word();

    match (detect_topic(message), word) {
        (Some(Topic::Memory), Some(word)) => format!(
            "对于单词'{word}'，我建议使用多种记忆方法：\n1. 词根词缀法：分析单词构成\n2. 联想记忆法：创造有趣的故事\n3. 谐音记忆法：利用发音相似的中文词汇\n4. 视觉记忆法：在脑海中构建画面\n\n你想了解哪种方法呢？"
        ),
        (Some(Topic::Memory), None) => "记忆GRE单词的关键是多样化的方法：词根词缀、联想故事、谐音记忆、视觉画面等。选择最适合你的方法坚持练习！".to_string(),
        (Some(Topic::Etymology), Some(word)) => {
            format!("词根词缀是理解单词的强大工具！它们像拼图一样组成完整的单词含义。我来为你分析一下{word}的词根构成。")
        }
        (Some(Topic::Etymology), None) => "词根词缀是理解单词的强大工具！它们像拼图一样组成完整的单词含义。告诉我你想了解哪个单词的词根分析？".to_string(),
        (Some(Topic::Synonym), word) => {
            let about = word.map(|w| format!("对于{w}，")).unwrap_or_default();
            format!("同义词练习是GRE的重点！{about}记住要注意词汇的细微差别和使用语境。想要更多练习吗？")
        }
        (Some(Topic::Example), Some(word)) => {
            format!("理解'{word}'的用法需要看具体语境。我来给你一些实际例句，帮助你掌握正确用法。")
        }
        (Some(Topic::Example), None) => "例句确实很重要！它们帮助我们理解单词在实际语境中的使用。你想看哪个单词的例句？".to_string(),
        (Some(Topic::Difficulty), _) => "GRE单词确实有挑战性，但不要担心！每个人都会遇到困难。关键是：\n1. 循序渐进，不要急于求成\n2. 反复复习，加深印象\n3. 多种方法结合使用\n4. 保持积极心态\n\n坚持下去，你一定可以的！💪".to_string(),
        (None, word) => {
            let about = word.map(|w| format!("关于{w}，")).unwrap_or_default();
            format!("我理解你的问题。{about}让我来帮你解答。如果你有具体的学习困惑，可以告诉我更多细节，我会提供更有针对性的建议。")
        }
    }
}
