use anyhow::Result;
use async_trait::async_trait;
use core_logic::{OpReport, OpRunner, Operation, RunPlan};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// First call reports failure, second errors out, the rest succeed.
struct FlakyOp {
    calls: AtomicU32,
}

#[async_trait]
impl Operation<()> for FlakyOp {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn run(&self, _ctx: &mut (), _index: u32) -> Result<OpReport> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == 2 {
            anyhow::bail!("temporary node hiccup");
        }
        Ok(OpReport {
            success: call != 1,
            message: format!("call {}", call),
            tx_hash: None,
        })
    }
}

#[tokio::test]
async fn run_continues_past_failed_operations() {
    let op = FlakyOp {
        calls: AtomicU32::new(0),
    };
    let mut ctx = ();
    let plan = RunPlan {
        count: 4,
        pause: Duration::from_millis(1),
    };

    let stats = OpRunner::run(&op, &mut ctx, plan).await.unwrap();

    assert_eq!(op.calls.load(Ordering::SeqCst), 4);
    assert_eq!(stats.success, 2);
    assert_eq!(stats.failed, 2);
}
