use crate::core::cortex::Cortex;
use crate::core::parser::{decode_report, ParseError};
use crate::core::{Comment, SchemaVariant};
use crate::prompt::TriagePrompt;
use crate::render::{render_report, RenderedReport};
use anyhow::{bail, Result};

/// One "Analyze" interaction: the raw reply is always kept for debugging,
/// the cards only exist when the reply decoded cleanly.
#[derive(Debug)]
pub struct AnalysisRun {
    pub raw_output: String,
    pub outcome: Result<RenderedReport, ParseError>,
}

/// Sanitize, decode and render a reply. No partial output on failure.
pub fn interpret(raw_output: &str) -> Result<RenderedReport, ParseError> {
    decode_report(raw_output).map(|report| render_report(&report))
}

pub async fn analyze(cortex: &Cortex, comments: &[Comment], schema: SchemaVariant) -> Result<AnalysisRun> {
    if comments.is_empty() {
        bail!("No comments to analyze");
    }

    let prompt = TriagePrompt::build(comments, schema);
    tracing::info!(comments = comments.len(), ?schema, "asking model for flavor triage");
    let raw_output = cortex.generate(&prompt).await?;

    let outcome = interpret(&raw_output);
    if let Err(e) = &outcome {
        tracing::warn!("model reply rejected: {}", e);
    }
    Ok(AnalysisRun { raw_output, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ScoutConfig;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn cortex_replying(content: &'static str) -> Cortex {
        let router = Router::new().route(
            "/chat/completions",
            post(move |Json(_body): Json<Value>| async move {
                Json(json!({ "choices": [{ "message": { "content": content } }] }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Cortex::new(&ScoutConfig::default(), "sk".into(), format!("http://{}", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_renders_fenced_reply() {
        let cortex = cortex_replying(
            "Here you go:\n```json\n{\"selected\":[],\"rejected\":[],\"golden_candidate\":{\"flavor\":\"Mango\",\"brand\":\"HK Vitals\",\"why\":\"test\"}}\n```",
        )
        .await;
        let run = analyze(&cortex, &[Comment::from("mango please")], SchemaVariant::Selection)
            .await
            .unwrap();
        assert!(run.raw_output.starts_with("Here you go:"));
        let rendered = run.outcome.unwrap();
        assert_eq!(rendered.golden.title, "Mango — HK Vitals");
    }

    #[tokio::test]
    async fn test_analyze_keeps_raw_on_parse_failure() {
        let cortex = cortex_replying("{\"selected\": [},").await;
        let run = analyze(&cortex, &[Comment::from("x")], SchemaVariant::Selection)
            .await
            .unwrap();
        assert_eq!(run.raw_output, "{\"selected\": [},");
        assert!(matches!(run.outcome, Err(ParseError::Json(_))));
    }

    #[tokio::test]
    async fn test_analyze_refuses_empty_input() {
        let cortex = cortex_replying("{}").await;
        assert!(analyze(&cortex, &[], SchemaVariant::Selection).await.is_err());
    }

    #[test]
    fn test_interpret_trailing_comma() {
        assert!(interpret(r#"{"selected":[],"rejected":[],"golden_candidate":{},}"#).is_err());
    }
}
