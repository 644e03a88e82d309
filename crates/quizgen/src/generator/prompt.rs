//! Prompt construction.

/// Build the instruction sent to the model.
///
/// Topic and language are interpolated verbatim. The count and shape
/// constraints are only a nudge; the reply is validated afterwards.
pub fn build_prompt(topic: &str, num_questions: u32, language: &str, time_limit: u32) -> String {
    format!(
        r#"Generate exactly {num_questions} multiple choice questions about {topic} in {language}.

Requirements:
1. Return ONLY a JSON object with this structure:
{{
  "topic": "{topic}",
  "language": "{language}",
  "timeLimit": {time_limit},
  "questions": [
    {{
      "question": "Question text",
      "options": {{
        "a": "Option A",
        "b": "Option B",
        "c": "Option C",
        "d": "Option D"
      }},
      "correctAnswer": "a"
    }}
  ]
}}

Important:
- Include "timeLimit": {time_limit} in the response
- Exactly {num_questions} questions
- Each question must have 4 options (a-d)"#
    )
}
