//! Simulator backend implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

use eir_hal::{
    Backend, BackendConfig, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job,
    JobId, JobStatus,
};
use eir_ir::Circuit;

use crate::statevector::Statevector;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Simulates quantum circuits with a statevector. Supports circuits up to
/// ~20 qubits (limited by memory).
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Completed jobs.
    jobs: Arc<Mutex<HashMap<String, SimJob>>>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(20)
    }

    /// Create a simulator with a custom qubit ceiling.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Run simulation synchronously.
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!("starting simulation: {} qubits, {} shots", num_qubits, shots);

        // The state is measurement-free until the end, so simulate once and
        // sample the final distribution per shot.
        let sv = Statevector::from_circuit(circuit);

        let mut counts = Counts::new();
        for _ in 0..shots {
            let outcome = sv.sample();
            counts.insert(sv.outcome_to_bitstring(outcome), 1);
        }

        let elapsed = start.elapsed();
        debug!("simulation completed in {:?}", elapsed);

        ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be positive".to_string()));
        }
        let num_qubits = circuit.num_qubits() as u32;
        if num_qubits > self.capabilities.num_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "{num_qubits} qubits exceeds simulator limit of {}",
                self.capabilities.num_qubits
            )));
        }

        let id = JobId::new(Uuid::new_v4().to_string());
        let result = self.run_simulation(circuit, shots);

        let job = Job::new(id.clone(), shots)
            .with_backend(self.name())
            .with_status(JobStatus::Completed);

        let mut jobs = self.jobs.lock().expect("job table lock poisoned");
        jobs.insert(
            id.0.clone(),
            SimJob {
                job,
                result: Some(result),
            },
        );

        Ok(id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self.jobs.lock().expect("job table lock poisoned");
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs.lock().expect("job table lock poisoned");
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;

        match sim_job.job.status {
            JobStatus::Completed => sim_job
                .result
                .clone()
                .ok_or_else(|| HalError::Backend("completed job has no result".to_string())),
            ref status => Err(HalError::Backend(format!(
                "job {} is not completed (status: {status})",
                job_id.0
            ))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs.lock().expect("job table lock poisoned");
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;

        // Simulation is synchronous: jobs are terminal by the time they are
        // visible, and terminal states are permanent.
        if sim_job.job.status.is_pending() {
            sim_job.job = sim_job.job.clone().with_status(JobStatus::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_and_wait_bell() {
        let backend = SimulatorBackend::new();
        let circuit = Circuit::bell().unwrap();

        let job_id = backend.submit(&circuit, 1000).await.unwrap();
        let result = backend.wait(&job_id).await.unwrap();

        assert_eq!(result.shots, 1000);
        assert_eq!(result.counts.total(), 1000);

        // Bell state only produces correlated outcomes
        assert_eq!(result.counts.get("01"), 0);
        assert_eq!(result.counts.get("10"), 0);
        assert!(result.counts.get("00") > 0);
        assert!(result.counts.get("11") > 0);
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        let circuit = Circuit::bell().unwrap();

        let err = backend.submit(&circuit, 0).await.unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(_)));
    }

    #[tokio::test]
    async fn test_too_many_qubits_rejected() {
        let backend = SimulatorBackend::with_max_qubits(4);
        let circuit = Circuit::ghz(8).unwrap();

        let err = backend.submit(&circuit, 100).await.unwrap_err();
        assert!(matches!(err, HalError::CircuitTooLarge(_)));
    }

    #[tokio::test]
    async fn test_unknown_job_id() {
        let backend = SimulatorBackend::new();
        let err = backend.status(&JobId::new("nope")).await.unwrap_err();
        assert!(matches!(err, HalError::JobNotFound(_)));
    }
}
