//! Console output formatter for deck results

use chrono::{DateTime, Utc};
use colored::Colorize;
use deckweaver_application::BuildDeckOutput;
use deckweaver_domain::{Card, CardId, CardType, ColorSet, SimilarityGraph};
use serde::Serialize;
use std::collections::BTreeMap;

/// One deck card in the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct ReportCard {
    pub rank: usize,
    pub id: CardId,
    pub name: String,
    pub type_line: String,
    pub colors: ColorSet,
    pub cmc: f64,
    pub relevance: f64,
}

/// JSON deck report
#[derive(Debug, Clone, Serialize)]
pub struct DeckReport {
    pub generated_at: DateTime<Utc>,
    pub commander: Card,
    pub tribal_type: String,
    pub pool_size: usize,
    pub pair_count: usize,
    pub edge_count: usize,
    pub similarity_threshold: f64,
    pub deck_size: usize,
    pub cards: Vec<ReportCard>,
}

impl DeckReport {
    pub fn new(output: &BuildDeckOutput, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            commander: output.commander.clone(),
            tribal_type: output.tribal_type.clone(),
            pool_size: output.pool_size,
            pair_count: output.pair_count,
            edge_count: output.graph.edge_count(),
            similarity_threshold: output.graph.threshold(),
            deck_size: output.deck.len(),
            cards: output
                .deck
                .entries()
                .iter()
                .enumerate()
                .map(|(i, entry)| ReportCard {
                    rank: i + 1,
                    id: entry.card.id.clone(),
                    name: entry.card.name.clone(),
                    type_line: entry.card.type_line.raw().to_string(),
                    colors: entry.card.colors,
                    cmc: entry.card.cmc,
                    relevance: entry.relevance,
                })
                .collect(),
        }
    }
}

/// Formats deck results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete deck report
    pub fn format(output: &BuildDeckOutput) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("Commander Deck"));
        out.push('\n');

        out.push_str(&format!(
            "{} {} ({})\n",
            "Commander:".cyan().bold(),
            output.commander.name,
            output.commander.color_identity()
        ));
        out.push_str(&format!(
            "{} {}\n\n",
            "Tribe:".cyan().bold(),
            output.tribal_type
        ));

        out.push_str(&format!(
            "{} {} eligible, {} pairs scored, {} edges above {}\n",
            "Pool:".cyan().bold(),
            output.pool_size,
            output.pair_count,
            output.graph.edge_count(),
            output.graph.threshold()
        ));

        out.push_str(&Self::section_header(&format!(
            "Deck ({} cards)",
            output.deck.len()
        )));
        for (i, entry) in output.deck.entries().iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. {:<36} {:<32} {}\n",
                i + 1,
                entry.card.name.bold(),
                entry.card.type_line.raw().dimmed(),
                format!("{:.3}", entry.relevance).yellow()
            ));
        }

        let composition = Self::composition(output.deck.cards());
        if !composition.is_empty() {
            out.push_str(&Self::section_header("Composition"));
            for (card_type, count) in composition {
                out.push_str(&format!("  {:<14} {}\n", card_type, count));
            }
        }

        out.push_str(&Self::footer());
        out
    }

    /// One card name per line, commander first
    pub fn format_list(output: &BuildDeckOutput) -> String {
        let mut out = String::new();
        out.push_str(&output.commander.name);
        out.push('\n');
        for card in output.deck.cards() {
            out.push_str(&card.name);
            out.push('\n');
        }
        out
    }

    /// Format as JSON
    pub fn format_json(output: &BuildDeckOutput) -> String {
        Self::format_report_json(&DeckReport::new(output, Utc::now()))
    }

    pub fn format_report_json(report: &DeckReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// The `n` best-connected cards of the graph
    pub fn format_central(graph: &SimilarityGraph, n: usize) -> String {
        let mut out = Self::section_header(&format!("Most central cards (top {})", n));
        let central = graph.most_central(n);
        if central.is_empty() {
            out.push_str("  (graph is empty)\n");
        }
        for (i, (node, weight)) in central.into_iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. {:<36} {} links, weight {}\n",
                i + 1,
                node.name.bold(),
                graph.degree(&node.id),
                format!("{:.3}", weight).yellow()
            ));
        }
        out
    }

    /// A card's record, and where it stands in this run
    pub fn format_card(card: &Card, output: &BuildDeckOutput) -> String {
        let mut out = Self::section_header(&card.name);

        out.push_str(&format!("  {:<10} {}\n", "Id:".cyan(), card.id));
        out.push_str(&format!("  {:<10} {}\n", "Type:".cyan(), card.type_line));
        out.push_str(&format!("  {:<10} {}\n", "Colors:".cyan(), card.colors));
        if card.color_identity() != card.colors {
            out.push_str(&format!(
                "  {:<10} {}\n",
                "Identity:".cyan(),
                card.color_identity()
            ));
        }
        out.push_str(&format!("  {:<10} {}\n", "CMC:".cyan(), card.cmc));
        if let (Some(p), Some(t)) = (&card.power, &card.toughness) {
            out.push_str(&format!("  {:<10} {}/{}\n", "P/T:".cyan(), p, t));
        }
        if let Some(loyalty) = &card.loyalty {
            out.push_str(&format!("  {:<10} {}\n", "Loyalty:".cyan(), loyalty));
        }
        if card.has_text() {
            out.push_str(&format!(
                "  {}\n{}\n",
                "Text:".cyan(),
                Self::indent(&card.text, "    ")
            ));
        }

        let status = if card.id == output.commander.id {
            "commander".green().bold().to_string()
        } else if let Some(rank) = output.deck.entries().iter().position(|e| e.card.id == card.id)
        {
            format!(
                "{} (#{}, relevance {:.3})",
                "in deck".green().bold(),
                rank + 1,
                output.deck.entries()[rank].relevance
            )
        } else if output.graph.contains(&card.id) {
            format!(
                "{} ({} links in the graph)",
                "eligible, not selected".yellow(),
                output.graph.degree(&card.id)
            )
        } else {
            "not eligible".red().to_string()
        };
        out.push_str(&format!("  {:<10} {}\n", "Status:".cyan(), status));

        let closest: Vec<String> = output
            .graph
            .neighbors(&card.id)
            .into_iter()
            .take(3)
            .map(|(node, weight)| format!("{} ({:.3})", node.name, weight))
            .collect();
        if !closest.is_empty() {
            out.push_str(&format!("  {:<10} {}\n", "Closest:".cyan(), closest.join(", ")));
        }
        out
    }

    /// Count of deck cards per primary type
    fn composition<'a>(cards: impl Iterator<Item = &'a Card>) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for card in cards {
            let key = card
                .type_line
                .primary_type()
                .map(|t: CardType| t.as_str().to_string())
                .unwrap_or_else(|| "other".to_string());
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckweaver_application::{DeckBuildConfig, run_pipeline};
    use deckweaver_application::NoProgress;
    use deckweaver_domain::CardCatalog;

    fn sample_output() -> BuildDeckOutput {
        let catalog = CardCatalog::from_cards([
            Card::new("cmd", "Lathril, Blade of the Elves", "Legendary Creature — Elf Noble")
                .with_colors("BG".parse().unwrap())
                .with_text("Whenever Lathril deals combat damage, create that many Elf Warrior tokens."),
            Card::new("e1", "Elvish Warmaster", "Creature — Elf Warrior")
                .with_colors("G".parse().unwrap())
                .with_text("Whenever one or more other Elves enter, create a 1/1 green Elf Warrior creature token.")
                .with_stats("2", "2"),
            Card::new("e2", "Elvish Promenade", "Kindred Sorcery — Elf")
                .with_colors("G".parse().unwrap())
                .with_text("Create a 1/1 green Elf Warrior creature token for each Elf you control."),
            Card::new("g1", "Goblin Guide", "Creature — Goblin Scout")
                .with_colors("R".parse().unwrap()),
        ]);
        let config = DeckBuildConfig::default().with_threshold(0.1);
        run_pipeline(&catalog, "lathril, blade of the elves", "Elf", &config, &NoProgress).unwrap()
    }

    #[test]
    fn test_format_full_contains_deck() {
        colored::control::set_override(false);
        let output = sample_output();
        let text = ConsoleFormatter::format(&output);
        assert!(text.contains("Commander: Lathril, Blade of the Elves (BG)"));
        assert!(text.contains("Elvish Warmaster"));
        assert!(text.contains("Composition"));
        assert!(!text.contains("Goblin Guide"));
    }

    #[test]
    fn test_format_list_commander_first() {
        let output = sample_output();
        let text = ConsoleFormatter::format_list(&output);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Lathril, Blade of the Elves");
        assert_eq!(lines.len(), output.deck.len() + 1);
    }

    #[test]
    fn test_format_json_report() {
        let output = sample_output();
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&output)).unwrap();
        assert_eq!(value["tribal_type"], "Elf");
        assert_eq!(value["commander"]["name"], "Lathril, Blade of the Elves");
        assert_eq!(value["cards"].as_array().unwrap().len(), output.deck.len());
        assert_eq!(value["cards"][0]["rank"], 1);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_format_central_limits_rows() {
        colored::control::set_override(false);
        let output = sample_output();
        let text = ConsoleFormatter::format_central(&output.graph, 1);
        assert!(text.contains("top 1"));
        assert!(text.contains("  1. "));
        assert!(!text.contains("  2. "));
    }

    #[test]
    fn test_format_card_status() {
        colored::control::set_override(false);
        let output = sample_output();

        let warmaster = output.deck.find_by_name("Elvish Warmaster").unwrap().card.clone();
        let text = ConsoleFormatter::format_card(&warmaster, &output);
        assert!(text.contains("in deck"));
        assert!(text.contains("2/2"));
        assert!(text.contains("Closest:"));
        assert!(text.contains("Elvish Promenade ("));

        let goblin = Card::new("g1", "Goblin Guide", "Creature — Goblin Scout");
        assert!(ConsoleFormatter::format_card(&goblin, &output).contains("not eligible"));

        let commander = output.commander.clone();
        assert!(ConsoleFormatter::format_card(&commander, &output).contains("commander"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
