//! Decision Cards
//!
//! Turns a decoded `AnalysisReport` into display cards and prints them.

use crate::core::parser::{AnalysisReport, FlavorPick, Rejection, TraceEntry};
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Accepted,
    Rejected,
    Golden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub kind: CardKind,
    /// Leading part of `title` shown with emphasis.
    pub flavor: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub accepted: Vec<Card>,
    pub rejected: Vec<Card>,
    pub golden: Card,
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

fn pick_card(pick: &FlavorPick) -> Card {
    let mut body = pick.why.clone();
    let mut facts = Vec::new();
    if let Some(score) = pick.trend_score {
        facts.push(format!("trend {}", format_score(score)));
    }
    if let Some(score) = pick.final_score {
        facts.push(format!("final {}", format_score(score)));
    }
    if let Some(confidence) = &pick.confidence {
        facts.push(format!("confidence {}", confidence));
    }
    if !facts.is_empty() {
        body.push_str(&format!("\n[{}]", facts.join(" · ")));
    }
    Card {
        kind: CardKind::Accepted,
        flavor: pick.flavor.clone(),
        title: format!("{} ({})", pick.flavor, pick.brand),
        body,
    }
}

fn rejection_card(rejection: &Rejection) -> Card {
    Card {
        kind: CardKind::Rejected,
        flavor: rejection.flavor.clone(),
        title: format!("{} — {}", rejection.flavor, rejection.reason),
        body: String::new(),
    }
}

fn trace_card(entry: &TraceEntry) -> Card {
    let scores = format!(
        "trend {} · sentiment {} · brand fit {} · signal {} · final {}",
        format_score(entry.trend_score),
        format_score(entry.sentiment_score),
        format_score(entry.brand_fit_score),
        format_score(entry.signal_quality_score),
        format_score(entry.final_score),
    );
    if entry.is_accepted() {
        Card {
            kind: CardKind::Accepted,
            flavor: entry.flavor.clone(),
            title: format!("{} ({})", entry.flavor, entry.brand),
            body: format!("{}\n[{}]", entry.reason, scores),
        }
    } else {
        Card {
            kind: CardKind::Rejected,
            flavor: entry.flavor.clone(),
            title: format!("{} — {}", entry.flavor, entry.reason),
            body: format!("[{}]", scores),
        }
    }
}

fn golden_card(pick: &FlavorPick) -> Card {
    Card {
        kind: CardKind::Golden,
        flavor: pick.flavor.clone(),
        title: format!("{} — {}", pick.flavor, pick.brand),
        body: pick.why.clone(),
    }
}

pub fn render_report(report: &AnalysisReport) -> RenderedReport {
    match report {
        AnalysisReport::Selection {
            selected: picks,
            rejected,
            golden_candidate,
        }
        | AnalysisReport::Verdict {
            accepted: picks,
            rejected,
            golden_candidate,
        } => RenderedReport {
            accepted: picks.iter().map(pick_card).collect(),
            rejected: rejected.iter().map(rejection_card).collect(),
            golden: golden_card(golden_candidate),
        },
        AnalysisReport::Trace {
            decision_trace,
            golden_candidate,
        } => {
            let (accepted, rejected): (Vec<Card>, Vec<Card>) = decision_trace
                .iter()
                .map(trace_card)
                .partition(|c| c.kind == CardKind::Accepted);
            RenderedReport {
                accepted,
                rejected,
                golden: golden_card(golden_candidate),
            }
        }
    }
}

/// Rejected title with the flavor bolded and the reason in plain red.
fn rejected_title(card: &Card) -> String {
    match card.title.strip_prefix(card.flavor.as_str()) {
        Some(rest) => format!("{}{}", card.flavor.red().bold(), rest.red()),
        None => card.title.red().to_string(),
    }
}

pub fn print_report(rendered: &RenderedReport) {
    println!("\n{}", "🧠 Decision Engine".cyan().bold());

    println!("\n{}", "✅ Selected Ideas".green().bold());
    if rendered.accepted.is_empty() {
        println!("   {}", "(none)".dimmed());
    }
    for card in &rendered.accepted {
        println!("   {}", card.title.green().bold());
        for line in card.body.lines() {
            println!("     {}", line);
        }
    }

    println!("\n{}", "❌ Rejected Ideas".red().bold());
    if rendered.rejected.is_empty() {
        println!("   {}", "(none)".dimmed());
    }
    for card in &rendered.rejected {
        println!("   {}", rejected_title(card));
        for line in card.body.lines() {
            println!("     {}", line.dimmed());
        }
    }

    let golden = &rendered.golden;
    let width = golden
        .title
        .chars()
        .count()
        .max(golden.body.lines().map(|l| l.chars().count()).max().unwrap_or(0))
        + 4;
    println!("\n{}", "🏆 Golden Candidate".yellow().bold());
    println!("   ┌{}┐", "─".repeat(width));
    println!("   │  {}│", format!("{:<w$}", golden.title, w = width - 2).bold());
    for line in golden.body.lines() {
        println!("   │  {:<w$}│", line, w = width - 2);
    }
    println!("   └{}┘", "─".repeat(width));
}
