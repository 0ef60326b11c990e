/// Prompt asking the model for one JSON object matching [`WordInsight`].
///
/// [`WordInsight`]: vocably_types::WordInsight
pub fn word_insight_prompt(word: &str) -> String {
    format!(
        r#"Provide a learner-friendly record for the English word "{word}".

Respond with a single JSON object, no surrounding text, with exactly these keys:
- "meaning": the most common meaning, short and clear (1-2 sentences)
- "word_type": part of speech (noun, verb, adjective, adverb...)
- "pronunciation": phonetic transcription, e.g. /ˈæp.əl/
- "context_sentences": 2-3 short example sentences as a JSON array
- "synonyms": up to 5 common synonyms as a JSON array
- "antonyms": up to 5 common antonyms as a JSON array (empty array if none)

If the word has several meanings, pick the most common one.

Word: "{word}""#
    )
}
