use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::services::catalog::{EnhancedWordRecord, Etymology, EtymologyPart, WordRecord};
use crate::services::fallback_content::generate_fallback_content;
use crate::services::llm_provider::{self, ContentProvider, GenerationError, ProviderConfig};

/// Produces enhanced word records. Always succeeds: provider failures fall
/// back to synthesized content, unreadable provider output keeps the catalog
/// record as-is.
#[derive(Clone)]
pub struct ContentGenerator {
    provider: Arc<dyn ContentProvider>,
}

impl ContentGenerator {
    pub fn new(config: &ProviderConfig) -> Self {
        Self::with_provider(llm_provider::provider_for(config))
    }

    pub fn with_provider(provider: Arc<dyn ContentProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn generate(&self, word: &str, record: &WordRecord) -> EnhancedWordRecord {
        let provider = self.provider.name();

        match self.provider.attempt(word, record).await {
            Ok(parsed) => parsed.merge_into(record),
            Err(GenerationError::Disabled) => {
                debug!(word, "no AI provider configured, using fallback content");
                generate_fallback_content(word, record)
            }
            Err(err) if err.is_malformed_content() => {
                warn!(provider, word, error = %err, "AI response parsing failed, keeping catalog content");
                record.clone()
            }
            Err(err) => {
                warn!(provider, word, error = %err, "AI generation failed, using fallback content");
                generate_fallback_content(word, record)
            }
        }
    }
}

pub fn build_prompt(word: &str, record: &WordRecord) -> String {
    format!(
        r#"请为GRE单词 "{word}" 生成以下学习内容，要求准确、有趣、易记：

单词信息：
- 发音：{pronunciation}
- 英文释义：{definition_en}
- 中文释义：{definition_zh}

请生成：
1. 词根词缀分析（如果有的话）：
   - 拆解词根、前缀、后缀
   - 每个部分的含义
   - 组合后的含义解释

2. 记忆方法（请提供3种）：
   - 联想记忆法：编写一个有趣的小故事
   - 谐音记忆法：利用谐音帮助记忆
   - 视觉记忆法：创造形象的画面联想

3. 6个同义词选项（用于六选二练习）：
   - 包含2个正确同义词
   - 4个干扰选项（意思相近但不完全相同）

4. 4个释义选项（用于释义练习）：
   - 1个正确释义
   - 3个错误但相似的释义

请以JSON格式返回，包含以下字段：
etymology_parts, etymology_explanation, memory_story, memory_phonetic, memory_visual,
synonym_options, correct_synonyms, definition_options, correct_definition_index"#,
        pronunciation = record.pronunciation,
        definition_en = record.definition_en,
        definition_zh = record.definition_zh,
    )
}

/// Normalized provider output. Every field is optional; absent fields leave
/// the catalog value in place when merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParsedContent {
    pub etymology_parts: Option<Vec<EtymologyPart>>,
    pub etymology_explanation: Option<String>,
    pub memory_story: Option<String>,
    pub memory_phonetic: Option<String>,
    pub memory_visual: Option<String>,
    pub synonym_options: Option<Vec<String>>,
    pub correct_synonyms: Option<Vec<usize>>,
    pub definition_options: Option<Vec<String>>,
    pub correct_definition_index: Option<usize>,
}

impl ParsedContent {
    pub fn merge_into(self, record: &WordRecord) -> EnhancedWordRecord {
        let mut enhanced = record.clone();

        if let Some(parts) = self.etymology_parts {
            enhanced.etymology = Etymology {
                parts,
                explanation: self.etymology_explanation.unwrap_or_default(),
            };
        }

        if let Some(story) = self.memory_story {
            enhanced.memory_story = story;
        }
        if let Some(phonetic) = self.memory_phonetic {
            enhanced.memory_phonetic = phonetic;
        }
        if let Some(visual) = self.memory_visual {
            enhanced.memory_visual = visual;
        }

        // Correctness indices only count alongside their option lists.
        if let Some(options) = self.synonym_options {
            enhanced.synonym_options = options;
            enhanced.synonyms = self.correct_synonyms.unwrap_or_else(|| vec![0, 1]);
        }
        if let Some(options) = self.definition_options {
            enhanced.definition_options = options;
            enhanced.correct_definition = self.correct_definition_index.unwrap_or(0);
        }

        enhanced
    }
}

/// JSON when the text opens with `{`, free-text section scan otherwise.
pub fn parse_response(content: &str) -> Result<ParsedContent, serde_json::Error> {
    let trimmed = content.trim();
    if trimmed.starts_with('{') {
        serde_json::from_str(trimmed)
    } else {
        Ok(parse_sections(content))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Etymology,
    Story,
    Phonetic,
    Visual,
}

/// Header keywords in match order. Chinese keywords match as exact
/// substrings, English ones case-insensitively.
const SECTION_HEADERS: &[(&str, &str, Section)] = &[
    ("词根词缀", "etymology", Section::Etymology),
    ("联想记忆", "story", Section::Story),
    ("谐音记忆", "phonetic", Section::Phonetic),
    ("视觉记忆", "visual", Section::Visual),
];

impl Section {
    fn detect(line: &str) -> Option<Self> {
        let lower = line.to_lowercase();
        SECTION_HEADERS
            .iter()
            .find(|(zh, en, _)| line.contains(zh) || lower.contains(en))
            .map(|(_, _, section)| *section)
    }
}

/// Best-effort scan of free-text replies. A header line switches the current
/// section; each later non-empty line replaces that section's value. The
/// etymology section is recognised but never captured.
pub fn parse_sections(content: &str) -> ParsedContent {
    let mut parsed = ParsedContent::default();
    let mut current_section: Option<Section> = None;

    for line in content.split('\n') {
        let line = line.trim();

        if let Some(section) = Section::detect(line) {
            current_section = Some(section);
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let slot = match current_section {
            Some(Section::Story) => &mut parsed.memory_story,
            Some(Section::Phonetic) => &mut parsed.memory_phonetic,
            Some(Section::Visual) => &mut parsed.memory_visual,
            Some(Section::Etymology) | None => continue,
        };
        *slot = Some(line.to_string());
    }

    parsed
}
