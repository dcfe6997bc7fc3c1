//! Flavor Triage Prompt
//!
//! Builds the single user message sent to the chat model: the analyst brief,
//! the raw comments, and the JSON template the reply must follow.

use crate::core::{Comment, SchemaVariant};

const SELECTION_TEMPLATE: &str = r#"{
  "selected": [
    {
      "flavor": "",
      "brand": "",
      "trend_score": 0,
      "confidence": "",
      "why": ""
    }
  ],
  "rejected": [
    {
      "flavor": "",
      "reason": ""
    }
  ],
  "golden_candidate": {
    "flavor": "",
    "brand": "",
    "trend_score": 0,
    "confidence": "",
    "why": ""
  }
}"#;

const VERDICT_TEMPLATE: &str = r#"{
  "accepted": [
    {
      "flavor": "",
      "brand": "",
      "trend_score": 0,
      "confidence": "",
      "why": ""
    }
  ],
  "rejected": [
    {
      "flavor": "",
      "reason": ""
    }
  ],
  "golden_candidate": {
    "flavor": "",
    "brand": "",
    "trend_score": 0,
    "confidence": "",
    "why": ""
  }
}"#;

const TRACE_TEMPLATE: &str = r#"{
  "decision_trace": [
    {
      "flavor": "",
      "brand": "",
      "trend_score": 0,
      "sentiment_score": 0,
      "brand_fit_score": 0,
      "signal_quality_score": 0,
      "final_score": 0,
      "decision": "Accepted | Rejected",
      "reason": ""
    }
  ],
  "golden_candidate": {
    "flavor": "",
    "brand": "",
    "final_score": 0,
    "why": ""
  }
}"#;

pub struct TriagePrompt;

impl TriagePrompt {
    fn steps(schema: SchemaVariant) -> &'static str {
        match schema {
            SchemaVariant::Selection | SchemaVariant::Verdict => {
                r#"1. Identify potential new flavor ideas.
2. Reject weak or noisy ideas.
3. Select the strongest 3 flavor ideas.
4. For each selected idea, provide:
   - trend_score (0-100 based on frequency + excitement)
   - confidence (High / Medium / Low)
   - why (1 simple business sentence)
5. Choose ONE Golden Candidate with brand suggestion and justification."#
            }
            SchemaVariant::Trace => {
                r#"1. Identify every candidate flavor idea mentioned.
2. Score each candidate from 0-100 on:
   - trend_score (frequency + excitement)
   - sentiment_score (how positive the mentions are)
   - brand_fit_score (fit with the suggested brand)
   - signal_quality_score (specific, repeated requests vs. noise)
3. Combine them into a final_score.
4. Mark each candidate "Accepted" or "Rejected" with a one-line reason.
5. Choose ONE Golden Candidate with brand suggestion and justification."#
            }
        }
    }

    fn template(schema: SchemaVariant) -> &'static str {
        match schema {
            SchemaVariant::Selection => SELECTION_TEMPLATE,
            SchemaVariant::Verdict => VERDICT_TEMPLATE,
            SchemaVariant::Trace => TRACE_TEMPLATE,
        }
    }

    pub fn build(comments: &[Comment], schema: SchemaVariant) -> String {
        let comments_text = comments
            .iter()
            .map(Comment::text)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are a product analyst at HealthKart.

From the following social media comments, do the following:
{}

IMPORTANT:
- Be conservative and realistic.
- Scores above 80 should be rare and justified.

Comments:
{}

Return STRICT JSON only in this format:

{}
"#,
            Self::steps(schema),
            comments_text,
            Self::template(schema)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_comments_in_order() {
        let comments = vec![Comment::from("want kesar pista"), Comment::from("chai flavour pls")];
        let prompt = TriagePrompt::build(&comments, SchemaVariant::Selection);
        assert!(prompt.contains("Comments:\nwant kesar pista\nchai flavour pls\n"));
        assert!(prompt.contains("\"selected\""));
        assert!(prompt.contains("\"golden_candidate\""));
    }

    #[test]
    fn test_templates_are_valid_json_for_each_schema() {
        for (schema, key) in [
            (SchemaVariant::Selection, "selected"),
            (SchemaVariant::Verdict, "accepted"),
            (SchemaVariant::Trace, "decision_trace"),
        ] {
            let value: serde_json::Value = serde_json::from_str(TriagePrompt::template(schema)).unwrap();
            assert!(value.get(key).is_some(), "{:?} template lacks {}", schema, key);
            assert!(value.get("golden_candidate").is_some());
        }
    }
}
