//! Simulation statistics collection and reporting.
//!
//! This module gathers the performance metrics of a trace run. It provides:
//! 1. **Summary:** Accesses replayed, host time, and accesses per second.
//! 2. **Cache:** Demand hits, misses, and hits on prefetched lines.
//! 3. **Prefetch:** Queue acceptance, drops, fills, accuracy, and coverage.
//! 4. **Training:** Rounds, phases, early terminations, and the active offset.

use std::time::Instant;

use crate::core::units::cache::PrefetchQueueStats;
use crate::core::units::prefetch::TrainingStats;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Demand accesses replayed.
    pub accesses: u64,
    /// Demand accesses that hit.
    pub hits: u64,
    /// Demand accesses that missed.
    pub misses: u64,
    /// Demand hits on lines whose prefetch bit was set.
    pub prefetch_hits: u64,
    /// Prefetched lines referenced at least once by a demand access.
    pub useful_prefetches: u64,
    /// Host-side prefetch queue counters.
    pub queue: PrefetchQueueStats,
    /// Prefetcher-side training counters.
    pub training: TrainingStats,
    /// Offset in use at the time of the snapshot.
    pub active_offset: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            accesses: 0,
            hits: 0,
            misses: 0,
            prefetch_hits: 0,
            useful_prefetches: 0,
            queue: PrefetchQueueStats::default(),
            training: TrainingStats::default(),
            active_offset: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "cache", "prefetch", "training"];

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

impl SimStats {
    /// Fraction of demand accesses that hit, in percent.
    pub fn hit_rate(&self) -> f64 {
        percent(self.hits, self.accesses)
    }

    /// Fraction of filled prefetches later referenced by demand, in percent.
    pub fn accuracy(&self) -> f64 {
        percent(self.useful_prefetches, self.queue.filled)
    }

    /// Fraction of would-be misses removed by prefetching, in percent.
    pub fn coverage(&self) -> f64 {
        percent(self.useful_prefetches, self.misses + self.useful_prefetches)
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an empty
    /// slice renders everything.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let mut out = Vec::new();

        out.push("==========================================================".to_string());
        out.push("OFFSET PREFETCHER SIMULATION STATISTICS".to_string());
        out.push("==========================================================".to_string());
        if want("summary") {
            let rate = if seconds > 0.0 {
                self.accesses as f64 / seconds / 1000.0
            } else {
                0.0
            };
            out.push(format!("host_seconds             {seconds:.4} s"));
            out.push(format!("sim_accesses             {}", self.accesses));
            out.push(format!("sim_rate                 {rate:.2} k accesses/s"));
            out.push("----------------------------------------------------------".to_string());
        }
        if want("cache") {
            out.push("CACHE".to_string());
            out.push(format!(
                "  demand.hits            {} ({:.2}%)",
                self.hits,
                self.hit_rate()
            ));
            out.push(format!(
                "  demand.misses          {} ({:.2}%)",
                self.misses,
                percent(self.misses, self.accesses)
            ));
            out.push(format!("  prefetch.hits          {}", self.prefetch_hits));
            out.push("----------------------------------------------------------".to_string());
        }
        if want("prefetch") {
            out.push("PREFETCH QUEUE".to_string());
            out.push(format!("  pf.requested           {}", self.training.prefetches_requested));
            out.push(format!("  pf.issued              {}", self.queue.issued));
            out.push(format!("  pf.dropped.resident    {}", self.queue.dropped_resident));
            out.push(format!("  pf.dropped.pending     {}", self.queue.dropped_pending));
            out.push(format!("  pf.dropped.full        {}", self.queue.dropped_full));
            out.push(format!("  pf.filled              {}", self.queue.filled));
            out.push(format!("  pf.superseded          {}", self.queue.superseded));
            out.push(format!("  pf.useful              {}", self.useful_prefetches));
            out.push(format!("  pf.accuracy            {:.2}%", self.accuracy()));
            out.push(format!("  pf.coverage            {:.2}%", self.coverage()));
            out.push("----------------------------------------------------------".to_string());
        }
        if want("training") {
            out.push("TRAINING".to_string());
            out.push(format!("  train.rounds           {}", self.training.rounds_completed));
            out.push(format!("  train.phases           {}", self.training.phases_completed));
            out.push(format!("  train.early_end        {}", self.training.early_terminations));
            out.push(format!("  train.hits             {}", self.training.correlation_hits));
            out.push(format!("  train.offset_changes   {}", self.training.offset_changes));
            out.push(format!("  offset.active          {}", self.active_offset));
        }
        out.push("==========================================================".to_string());
        out.join("\n")
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        println!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
