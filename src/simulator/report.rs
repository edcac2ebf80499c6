//! Simulation report generation.

use super::runner::RunStats;
use crate::core::constants::SECONDS_PER_HOUR;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub ticks_per_run: u64,

    // Aggregated stats
    pub avg_gold_earned: f64,
    pub avg_experience_earned: f64,
    pub avg_final_gold: f64,
    pub avg_highest_level: f64,
    pub avg_final_members: f64,
    pub avg_level_ups: f64,
    pub avg_items_dropped: f64,
    pub avg_summons: f64,
    pub avg_offline_treasure: f64,
    pub gold_per_hour: f64,

    /// Highest level reached -> number of runs
    pub level_distribution: BTreeMap<u64, u32>,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], field: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(field).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, ticks_per_run: u64) -> Self {
        let avg_gold_earned = average(&runs, |r| r.gold_earned as f64);
        let gold_per_hour = if ticks_per_run > 0 {
            avg_gold_earned / ticks_per_run as f64 * SECONDS_PER_HOUR as f64
        } else {
            0.0
        };

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.highest_level).or_insert(0) += 1;
        }

        Self {
            num_runs: runs.len() as u32,
            ticks_per_run,
            avg_gold_earned,
            avg_experience_earned: average(&runs, |r| r.experience_earned as f64),
            avg_final_gold: average(&runs, |r| r.final_gold as f64),
            avg_highest_level: average(&runs, |r| r.highest_level as f64),
            avg_final_members: average(&runs, |r| r.final_members as f64),
            avg_level_ups: average(&runs, |r| r.level_ups as f64),
            avg_items_dropped: average(&runs, |r| r.items_dropped as f64),
            avg_summons: average(&runs, |r| r.summons as f64),
            avg_offline_treasure: average(&runs, |r| r.offline_treasure as f64),
            gold_per_hour,
            level_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} × {} ticks\n\n",
            self.num_runs, self.ticks_per_run
        ));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Gold Earned:     {:.0}\n", self.avg_gold_earned));
        report.push_str(&format!("  Avg Final Gold:      {:.0}\n", self.avg_final_gold));
        report.push_str(&format!("  Gold / Hour:         {:.0}\n", self.gold_per_hour));
        if self.avg_offline_treasure > 0.0 {
            report.push_str(&format!(
                "  Avg Offline Chest:   {:.0}\n",
                self.avg_offline_treasure
            ));
        }
        report.push('\n');

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Experience:      {:.0}\n",
            self.avg_experience_earned
        ));
        report.push_str(&format!("  Avg Highest Level:   {:.1}\n", self.avg_highest_level));
        report.push_str(&format!("  Avg Level Ups:       {:.1}\n", self.avg_level_ups));
        report.push_str(&format!("  Avg Members:         {:.1}\n", self.avg_final_members));
        report.push_str(&format!("  Avg Summons:         {:.1}\n", self.avg_summons));
        report.push_str(&format!("  Avg Item Drops:      {:.2}\n\n", self.avg_items_dropped));

        report.push_str("── HIGHEST LEVEL ────────────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = if self.num_runs > 0 {
                (*count as f64 / self.num_runs as f64) * 100.0
            } else {
                0.0
            };
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:4}: {:>5.1}% {}\n", level, pct, bar));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
