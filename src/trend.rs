//! Trend Wall
//!
//! Keyword mention counts over the loaded chatter. No model involved.

use crate::core::Comment;
use colored::*;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTally {
    pub keyword: String,
    pub mentions: usize,
}

/// Counts non-overlapping, case-insensitive occurrences of each keyword in
/// the space-joined comments. Sorted by mentions, ties keep keyword order.
pub fn tally_keywords<S: AsRef<str>>(comments: &[Comment], keywords: &[S]) -> Vec<KeywordTally> {
    let all_text = comments
        .iter()
        .map(Comment::text)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut tallies: Vec<KeywordTally> = keywords
        .iter()
        .map(|k| {
            let keyword = k.as_ref().to_lowercase();
            let mentions = if keyword.is_empty() {
                0
            } else {
                all_text.matches(keyword.as_str()).count()
            };
            KeywordTally { keyword, mentions }
        })
        .collect();

    tallies.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    tallies
}

/// One line per keyword: padded label, bar scaled to the top count, number.
pub fn render_wall(tallies: &[KeywordTally]) -> Vec<String> {
    let max = tallies.iter().map(|t| t.mentions).max().unwrap_or(0);
    let label_width = tallies.iter().map(|t| t.keyword.chars().count()).max().unwrap_or(0);

    tallies
        .iter()
        .map(|t| {
            let len = if max == 0 { 0 } else { t.mentions * BAR_WIDTH / max };
            format!(
                "{:<width$}  {} {}",
                t.keyword,
                "█".repeat(len),
                t.mentions,
                width = label_width
            )
        })
        .collect()
}

pub fn print_wall(tallies: &[KeywordTally]) {
    println!("{}", "📊 Trend Wall".cyan().bold());
    for line in render_wall(tallies) {
        println!("   {}", line.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments(texts: &[&str]) -> Vec<Comment> {
        texts.iter().map(|t| Comment::from(*t)).collect()
    }

    #[test]
    fn test_case_insensitive_count() {
        let tally = tally_keywords(&comments(&["I love chocolate", "CHOCOLATE is best"]), &["chocolate"]);
        assert_eq!(tally, vec![KeywordTally { keyword: "chocolate".into(), mentions: 2 }]);
    }

    #[test]
    fn test_absent_keyword_is_zero() {
        let tally = tally_keywords(&comments(&["mango lassi"]), &["vanilla"]);
        assert_eq!(tally[0].mentions, 0);
        assert_eq!(tally_keywords(&[], &["vanilla"])[0].mentions, 0);
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let tally = tally_keywords(
            &comments(&["chai chai", "pista", "kesar"]),
            &["kesar", "pista", "chai", "nimbu"],
        );
        let order: Vec<_> = tally.iter().map(|t| t.keyword.as_str()).collect();
        assert_eq!(order, vec!["chai", "kesar", "pista", "nimbu"]);
    }

    #[test]
    fn test_substring_counts() {
        let tally = tally_keywords(&comments(&["Chococoa shake", "orangeorange"]), &["cocoa", "Orange"]);
        assert_eq!(tally[0], KeywordTally { keyword: "orange".into(), mentions: 2 });
        assert_eq!(tally[1], KeywordTally { keyword: "cocoa".into(), mentions: 1 });
    }

    #[test]
    fn test_render_wall_scales_to_max() {
        let lines = render_wall(&[
            KeywordTally { keyword: "chai".into(), mentions: 4 },
            KeywordTally { keyword: "kesar".into(), mentions: 2 },
            KeywordTally { keyword: "nimbu".into(), mentions: 0 },
        ]);
        assert_eq!(lines[0], format!("chai   {} 4", "█".repeat(40)));
        assert_eq!(lines[1], format!("kesar  {} 2", "█".repeat(20)));
        assert_eq!(lines[2], "nimbu   0");
    }
}
