//! The hardware smoke test.
//!
//! Builds the fixed two-qubit Bell circuit, submits it to the least-busy
//! operational device and polls the queue to a terminal state. The report
//! carries the measured distribution and an entanglement check (both
//! correlated outcomes observed).

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use eir_hal::Counts;
use eir_ir::{Circuit, qasm};

use crate::api::{IbmClient, least_busy};
use crate::error::{IbmError, IbmResult};

/// Hardware smoke test runner.
pub struct HardwareTest {
    client: IbmClient,
    /// Shots for the test circuit.
    pub shots: u32,
    /// Interval between status polls.
    pub poll_interval: Duration,
    /// Give up waiting after this long. Hardware queues run tens of
    /// minutes, so the default is generous.
    pub timeout: Duration,
}

/// Outcome of a completed hardware test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareTestReport {
    /// Device the job ran on.
    pub backend_name: String,
    /// Device qubit count.
    pub backend_qubits: usize,
    /// Queue depth at submission time.
    pub queue_depth: Option<u32>,
    /// Job ID assigned by the provider.
    pub job_id: String,
    /// Shots executed.
    pub shots: u32,
    /// Measured distribution.
    pub counts: Counts,
    /// Whether the Bell signature was observed (both 00 and 11).
    pub entangled: bool,
    /// When the test finished.
    pub finished_at: DateTime<Utc>,
}

impl HardwareTest {
    /// Create a test runner with default pacing: 100 shots, 5-second
    /// polls, 30-minute timeout.
    pub fn new(client: IbmClient) -> Self {
        Self {
            client,
            shots: 100,
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(30 * 60),
        }
    }

    /// Set the shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the poll timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the smoke test end to end.
    pub async fn run(&self) -> IbmResult<HardwareTestReport> {
        // Pick a device
        let backends = self.client.list_backends().await?;
        let backend = least_busy(&backends)?;
        tracing::info!(
            "selected {} ({} qubits, {} jobs queued)",
            backend.name,
            backend.num_qubits,
            backend.status.pending_jobs.unwrap_or(0)
        );

        // The fixed test circuit
        let circuit = Circuit::bell().map_err(|e| IbmError::Api {
            code: None,
            message: format!("failed to build test circuit: {e}"),
        })?;
        let program = qasm::emit(&circuit);

        // Submit
        let submission = self
            .client
            .submit_sampler_job(&backend.name, vec![program], self.shots)
            .await?;
        tracing::info!("job {} submitted to {}", submission.id, backend.name);

        // Poll to a terminal state
        let started = std::time::Instant::now();
        loop {
            if started.elapsed() > self.timeout {
                return Err(IbmError::Timeout(submission.id.clone()));
            }

            let status = self.client.get_job_status(&submission.id).await?;
            if status.is_completed() {
                break;
            }
            if status.is_failed() {
                return Err(IbmError::JobFailed(
                    status
                        .error_message()
                        .unwrap_or_else(|| "no failure reason reported".to_string()),
                ));
            }
            if status.is_cancelled() {
                return Err(IbmError::JobCancelled);
            }

            tracing::debug!("job {} still {}", submission.id, status.status);
            sleep(self.poll_interval).await;
        }

        // Collect the distribution
        let results = self.client.get_job_results(&submission.id).await?;
        let raw = results
            .results
            .first()
            .map(|r| r.to_counts(self.shots))
            .unwrap_or_default();

        let mut counts = Counts::new();
        for (bitstring, count) in raw {
            counts.insert(bitstring, count);
        }

        let entangled = counts.get("00") > 0 && counts.get("11") > 0;

        Ok(HardwareTestReport {
            backend_name: backend.name.clone(),
            backend_qubits: backend.num_qubits,
            queue_depth: backend.status.pending_jobs,
            job_id: submission.id,
            shots: self.shots,
            counts,
            entangled,
            finished_at: Utc::now(),
        })
    }
}

impl HardwareTestReport {
    /// Render the results file written next to the run.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Quantum Hardware Test Results\n");
        out.push_str("================================\n");
        let _ = writeln!(out, "Date: {}", self.finished_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out, "Quantum Computer: {}", self.backend_name);
        let _ = writeln!(out, "Qubits: {}", self.backend_qubits);
        let _ = writeln!(out, "Job ID: {}", self.job_id);
        let _ = writeln!(out, "Shots: {}", self.shots);
        out.push_str("Results:\n");
        for (bitstring, count) in self.counts.iter() {
            let pct = 100.0 * count as f64 / self.shots.max(1) as f64;
            let _ = writeln!(out, "  |{bitstring}>: {count} ({pct:.1}%)");
        }
        let _ = writeln!(
            out,
            "Entanglement signature: {}",
            if self.entangled { "observed" } else { "not observed" }
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(counts: Counts) -> HardwareTestReport {
        HardwareTestReport {
            backend_name: "ibm_brisbane".to_string(),
            backend_qubits: 127,
            queue_depth: Some(42),
            job_id: "job-abc".to_string(),
            shots: 100,
            counts,
            entangled: false,
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_text() {
        let mut counts = Counts::new();
        counts.insert("00", 55);
        counts.insert("11", 45);
        let mut report = sample_report(counts);
        report.entangled = true;

        let text = report.to_text();
        assert!(text.contains("ibm_brisbane"));
        assert!(text.contains("|00>: 55 (55.0%)"));
        assert!(text.contains("|11>: 45 (45.0%)"));
        assert!(text.contains("Entanglement signature: observed"));
    }

    #[test]
    fn test_entanglement_detection_logic() {
        let mut counts = Counts::new();
        counts.insert("00", 100);
        // Only one correlated outcome: no signature
        let entangled = counts.get("00") > 0 && counts.get("11") > 0;
        assert!(!entangled);

        counts.insert("11", 1);
        let entangled = counts.get("00") > 0 && counts.get("11") > 0;
        assert!(entangled);
    }
}
