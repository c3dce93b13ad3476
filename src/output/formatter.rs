use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::ranking::TeamRanking;
use crate::snapshot::Snapshot;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// "W-L-T" record string
pub fn format_record(wins: u32, losses: u32, ties: u32) -> String {
    format!("{}-{}-{}", wins, losses, ties)
}

/// Banner line for a snapshot: "Weighted Wins Rankings - 2025 Week 4"
pub fn format_title(snapshot: &Snapshot) -> String {
    format!(
        "Weighted Wins Rankings - {} Week {}",
        snapshot.season, snapshot.week
    )
}

/// Format rankings as a fixed-width table with a header row.
/// Columns: Rank, Team, W-L-T, Win%, WW, WL, Total.
/// Only the first `top` teams are shown.
pub fn format_rankings_table(rankings: &[TeamRanking], top: usize, use_colors: bool) -> String {
    if rankings.is_empty() {
        return "No teams ranked.".to_string();
    }

    let header = format!(
        "{:<6}{:<6}{:<10}{:>7}{:>9}{:>9}{:>9}",
        "Rank", "Team", "W-L-T", "Win%", "WW", "WL", "Total"
    );
    let rule = "-".repeat(header.len());

    let mut lines = Vec::with_capacity(rankings.len().min(top) + 2);
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }
    lines.push(rule);

    for (idx, ranking) in rankings.iter().take(top).enumerate() {
        let rank = format!("{:<6}", idx + 1);
        let team = format!("{:<6}", ranking.team);
        let record = format!(
            "{:<10}",
            format_record(ranking.wins, ranking.losses, ranking.ties)
        );
        let numbers = format!(
            "{:>7.3}{:>9.2}{:>9.2}",
            ranking.win_pct, ranking.weighted_wins, ranking.weighted_losses
        );
        let total = format!("{:>9.2}", ranking.total);

        if use_colors {
            lines.push(format!(
                "{}{}{}{}{}",
                rank.dimmed(),
                team.bold(),
                record,
                numbers,
                total.cyan()
            ));
        } else {
            lines.push(format!("{}{}{}{}{}", rank, team, record, numbers, total));
        }
    }

    lines.join("\n")
}

/// Format rankings as tab-separated values for scripting
/// Columns: rank, team, wins, losses, ties, win_pct, weighted_wins,
/// weighted_losses, total (no headers, no colors)
pub fn format_tsv(rankings: &[TeamRanking]) -> String {
    rankings
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{:.3}\t{:.2}\t{:.2}\t{:.2}",
                idx + 1,
                r.team,
                r.wins,
                r.losses,
                r.ties,
                r.win_pct,
                r.weighted_wins,
                r.weighted_losses,
                r.total
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
