use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("AI output could not be parsed as JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("AI output is missing expected data: {0}")]
    Schema(#[source] serde_json::Error),
    #[error("AI output has none of the known top-level keys (selected, accepted, decision_trace)")]
    UnknownShape,
}

/// A recommended flavor with its rationale. `selected`, `accepted` and
/// `golden_candidate` all share this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorPick {
    pub flavor: String,
    pub brand: String,
    #[serde(default)]
    pub trend_score: Option<f64>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub final_score: Option<f64>,
    pub why: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub flavor: String,
    pub reason: String,
}

/// One fully scored line of a decision trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub flavor: String,
    pub brand: String,
    pub trend_score: f64,
    pub sentiment_score: f64,
    pub brand_fit_score: f64,
    pub signal_quality_score: f64,
    pub final_score: f64,
    pub decision: String,
    pub reason: String,
}

impl TraceEntry {
    pub fn is_accepted(&self) -> bool {
        let d = self.decision.trim().to_lowercase();
        d.starts_with("accept") || d.starts_with("select")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReport {
    Selection {
        selected: Vec<FlavorPick>,
        rejected: Vec<Rejection>,
        golden_candidate: FlavorPick,
    },
    Trace {
        decision_trace: Vec<TraceEntry>,
        golden_candidate: FlavorPick,
    },
    Verdict {
        accepted: Vec<FlavorPick>,
        rejected: Vec<Rejection>,
        golden_candidate: FlavorPick,
    },
}

#[derive(Deserialize)]
struct SelectionBody {
    selected: Vec<FlavorPick>,
    rejected: Vec<Rejection>,
    golden_candidate: FlavorPick,
}

#[derive(Deserialize)]
struct TraceBody {
    decision_trace: Vec<TraceEntry>,
    golden_candidate: FlavorPick,
}

#[derive(Deserialize)]
struct VerdictBody {
    accepted: Vec<FlavorPick>,
    rejected: Vec<Rejection>,
    golden_candidate: FlavorPick,
}

/// Reduce a model reply to the JSON object it most likely contains.
pub fn sanitize_response(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        text = rest.strip_suffix("```").unwrap_or(rest).trim();
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return &text[start..=end];
        }
    }
    text
}

/// Sanitize, parse and classify a model reply.
pub fn decode_report(raw: &str) -> Result<AnalysisReport, ParseError> {
    let json_str = sanitize_response(raw);
    let value: Value = serde_json::from_str(json_str).map_err(ParseError::Json)?;

    let has_trace = value.get("decision_trace").is_some();
    let has_selected = value.get("selected").is_some();
    let has_accepted = value.get("accepted").is_some();

    if has_trace {
        let body: TraceBody = serde_json::from_value(value).map_err(ParseError::Schema)?;
        Ok(AnalysisReport::Trace {
            decision_trace: body.decision_trace,
            golden_candidate: body.golden_candidate,
        })
    } else if has_selected {
        let body: SelectionBody = serde_json::from_value(value).map_err(ParseError::Schema)?;
        Ok(AnalysisReport::Selection {
            selected: body.selected,
            rejected: body.rejected,
            golden_candidate: body.golden_candidate,
        })
    } else if has_accepted {
        let body: VerdictBody = serde_json::from_value(value).map_err(ParseError::Schema)?;
        Ok(AnalysisReport::Verdict {
            accepted: body.accepted,
            rejected: body.rejected,
            golden_candidate: body.golden_candidate,
        })
    } else {
        Err(ParseError::UnknownShape)
    }
}
