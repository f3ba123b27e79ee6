use crate::traits::{OpReport, Operation, RunStats};
use anyhow::Result;
use std::time::Duration;
use tokio::signal;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// How many iterations to run and how long to idle between them.
#[derive(Debug, Clone, Copy)]
pub struct RunPlan {
    pub count: u32,
    pub pause: Duration,
}

pub struct OpRunner;

impl OpRunner {
    /// Runs one operation `plan.count` times, strictly sequentially.
    ///
    /// Operations never overlap: nonce ordering for a single account
    /// requires it. A failed iteration is logged and the run moves on to
    /// the next one. Ctrl+C is honored between iterations, never
    /// mid-pipeline.
    pub async fn run<Ctx, O>(op: &O, ctx: &mut Ctx, plan: RunPlan) -> Result<RunStats>
    where
        Ctx: Send,
        O: Operation<Ctx> + ?Sized,
    {
        let token = CancellationToken::new();
        let signal_token = token.clone();
        let signal_task = tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("🛑 Received Ctrl+C. Finishing current operation...");
                    signal_token.cancel();
                }
                Err(err) => {
                    error!("Unable to listen for shutdown signal: {}", err);
                }
            }
        });

        let started = std::time::Instant::now();
        let mut stats = RunStats::default();

        for index in 1..=plan.count {
            if token.is_cancelled() {
                break;
            }

            let op_started = std::time::Instant::now();
            match op.run(ctx, index).await {
                Ok(report) => {
                    Self::log_report(op.name(), index, plan.count, &report, op_started, &mut stats)
                }
                Err(e) => {
                    stats.failed += 1;
                    warn!(
                        target: "op_result",
                        "[{}/{}] Failed [{}] {:#} in {:.1}s",
                        index,
                        plan.count,
                        op.name(),
                        e,
                        op_started.elapsed().as_secs_f64()
                    );
                }
            }

            if index < plan.count {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = sleep(plan.pause) => {}
                }
            }
        }

        signal_task.abort();

        let elapsed = started.elapsed();
        let total = stats.success + stats.failed;
        let rate = if total > 0 {
            (stats.success as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        info!(
            target: "op_result",
            "Total Time: {:.1}s | Success: {} | Failed: {} | Success Rate: {:.2}%",
            elapsed.as_secs_f64(),
            stats.success,
            stats.failed,
            rate
        );

        Ok(stats)
    }

    fn log_report(
        name: &str,
        index: u32,
        count: u32,
        report: &OpReport,
        op_started: std::time::Instant,
        stats: &mut RunStats,
    ) {
        let took = op_started.elapsed().as_secs_f64();
        let tx_note = report
            .tx_hash
            .as_deref()
            .map(|h| format!(" (tx: {})", h))
            .unwrap_or_default();

        if report.success {
            stats.success += 1;
            info!(
                target: "op_result",
                "[{}/{}] Success [{}] {}{} in {:.1}s",
                index, count, name, report.message, tx_note, took
            );
        } else {
            stats.failed += 1;
            warn!(
                target: "op_result",
                "[{}/{}] Failed [{}] {}{} in {:.1}s",
                index, count, name, report.message, tx_note, took
            );
        }
    }
}
