//! Property tests for content generation.
//!
//! - Free-text parsing never fails and never touches etymology or quiz fields
//! - JSON content overrides exactly the fields it carries
//! - Fallback synthesis is deterministic and only rewrites mnemonics

use proptest::prelude::*;

use acegre_backend::services::catalog::{gre_words, WordRecord};
use acegre_backend::services::fallback_content::generate_fallback_content;
use acegre_backend::services::llm_provider::ProviderConfig;
use acegre_backend::services::word_content::{parse_response, ContentGenerator};

fn arb_catalog_word() -> impl Strategy<Value = WordRecord> {
    let words = gre_words();
    (0..words.len()).prop_map(move |i| words[i].clone())
}

fn arb_free_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("联想记忆法：".to_string()),
            Just("谐音记忆".to_string()),
            Just("Visual memory".to_string()),
            Just("词根词缀".to_string()),
            Just(String::new()),
            "[a-z ]{1,20}",
            "[一-龥]{1,10}",
        ],
        0..12,
    )
    .prop_map(|lines| lines.join("\n"))
}

fn assert_quiz_untouched(original: &WordRecord, enhanced: &WordRecord) -> Result<(), TestCaseError> {
    prop_assert_eq!(&enhanced.word, &original.word);
    prop_assert_eq!(&enhanced.pronunciation, &original.pronunciation);
    prop_assert_eq!(&enhanced.definition_en, &original.definition_en);
    prop_assert_eq!(&enhanced.definition_zh, &original.definition_zh);
    prop_assert_eq!(&enhanced.etymology, &original.etymology);
    prop_assert_eq!(&enhanced.synonym_options, &original.synonym_options);
    prop_assert_eq!(&enhanced.synonyms, &original.synonyms);
    prop_assert_eq!(&enhanced.definition_options, &original.definition_options);
    prop_assert_eq!(enhanced.correct_definition, original.correct_definition);
    Ok(())
}

proptest! {
    #[test]
    fn free_text_only_touches_mnemonics(record in arb_catalog_word(), text in arb_free_text()) {
        let parsed = parse_response(&text).unwrap();
        let enhanced = parsed.clone().merge_into(&record);

        assert_quiz_untouched(&record, &enhanced)?;
        if parsed.memory_story.is_none() {
            prop_assert_eq!(&enhanced.memory_story, &record.memory_story);
        }
        if let Some(story) = parsed.memory_story {
            prop_assert!(!story.is_empty());
            prop_assert_eq!(enhanced.memory_story, story);
        }
    }

    #[test]
    fn json_overrides_exactly_present_fields(
        record in arb_catalog_word(),
        story in proptest::option::of("[a-z]{1,12}"),
        visual in proptest::option::of("[a-z]{1,12}"),
    ) {
        let mut object = serde_json::Map::new();
        if let Some(story) = &story {
            object.insert("memory_story".into(), story.clone().into());
        }
        if let Some(visual) = &visual {
            object.insert("memory_visual".into(), visual.clone().into());
        }
        let content = serde_json::Value::Object(object).to_string();

        let enhanced = parse_response(&content).unwrap().merge_into(&record);

        assert_quiz_untouched(&record, &enhanced)?;
        prop_assert_eq!(&enhanced.memory_phonetic, &record.memory_phonetic);
        prop_assert_eq!(enhanced.memory_story, story.unwrap_or(record.memory_story.clone()));
        prop_assert_eq!(enhanced.memory_visual, visual.unwrap_or(record.memory_visual.clone()));
    }

    #[test]
    fn fallback_is_deterministic(record in arb_catalog_word()) {
        let first = generate_fallback_content(&record.word, &record);
        let second = generate_fallback_content(&record.word, &record);

        prop_assert_eq!(&first, &second);
        assert_quiz_untouched(&record, &first)?;
        prop_assert!(first.memory_story.contains(&record.word));
    }

    #[test]
    fn disabled_generator_matches_fallback(record in arb_catalog_word()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let generator = ContentGenerator::new(&ProviderConfig::disabled());

        let enhanced = runtime.block_on(generator.generate(&record.word, &record));
        prop_assert_eq!(enhanced, generate_fallback_content(&record.word, &record));
    }
}
