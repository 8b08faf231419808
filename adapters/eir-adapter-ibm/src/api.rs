//! IBM Quantum REST API client.
//!
//! Token-direct access to the runtime API:
//! - Listing backends and their queue status
//! - Submitting sampler jobs carrying OpenQASM 3.0 circuits
//! - Polling job status and retrieving results

use reqwest::{Client, header};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::error::{IbmError, IbmResult};

/// Default IBM Quantum API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.quantum-computing.ibm.com/runtime";

/// User-Agent sent with requests (edge caches reject the default one).
const USER_AGENT: &str = "eir/0.3 (quantum-demo; +https://github.com/eir-lab/eir)";

/// IBM Quantum API client.
pub struct IbmClient {
    /// HTTP client with auth headers installed.
    client: Client,
    /// API endpoint URL.
    endpoint: String,
}

impl fmt::Debug for IbmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl IbmClient {
    /// Create a client for the default endpoint.
    pub fn new(token: impl Into<String>) -> IbmResult<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, token)
    }

    /// Create a client for an explicit endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>, token: impl Into<String>) -> IbmResult<Self> {
        let token = token.into();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| IbmError::InvalidToken)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Get available backends.
    pub async fn list_backends(&self) -> IbmResult<Vec<BackendInfo>> {
        let url = format!("{}/v1/backends", self.endpoint);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let error: ApiErrorResponse = response.json().await?;
            return Err(IbmError::Api {
                code: error.code,
                message: error.message,
            });
        }

        let backends: BackendsResponse = response.json().await?;
        Ok(backends.backends)
    }

    /// Get details for a specific backend.
    pub async fn get_backend(&self, name: &str) -> IbmResult<BackendInfo> {
        let url = format!("{}/v1/backends/{}", self.endpoint, name);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IbmError::BackendUnavailable(name.to_string()));
            }
            let error: ApiErrorResponse = response.json().await?;
            return Err(IbmError::Api {
                code: error.code,
                message: error.message,
            });
        }

        response.json().await.map_err(IbmError::from)
    }

    /// Submit a job through the sampler primitive.
    pub async fn submit_sampler_job(
        &self,
        backend: &str,
        circuits: Vec<String>,
        shots: u32,
    ) -> IbmResult<SubmitResponse> {
        let url = format!("{}/v1/jobs", self.endpoint);

        let body = serde_json::json!({
            "program_id": "sampler",
            "backend": backend,
            "params": {
                "circuits": circuits,
                "shots": shots
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            return Err(IbmError::Api {
                code: None,
                message: format!("job submission failed: {text}"),
            });
        }

        response.json().await.map_err(IbmError::from)
    }

    /// Get job status.
    pub async fn get_job_status(&self, job_id: &str) -> IbmResult<JobStatusResponse> {
        let url = format!("{}/v1/jobs/{}", self.endpoint, job_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IbmError::JobNotFound(job_id.to_string()));
            }
            let error: ApiErrorResponse = response.json().await?;
            return Err(IbmError::Api {
                code: error.code,
                message: error.message,
            });
        }

        response.json().await.map_err(IbmError::from)
    }

    /// Get job results.
    pub async fn get_job_results(&self, job_id: &str) -> IbmResult<JobResultResponse> {
        let url = format!("{}/v1/jobs/{}/results", self.endpoint, job_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(IbmError::JobNotFound(job_id.to_string()));
            }
            let error: ApiErrorResponse = response.json().await?;
            return Err(IbmError::Api {
                code: error.code,
                message: error.message,
            });
        }

        response.json().await.map_err(IbmError::from)
    }

    /// Cancel a job.
    pub async fn cancel_job(&self, job_id: &str) -> IbmResult<()> {
        let url = format!("{}/v1/jobs/{}/cancel", self.endpoint, job_id);
        let response = self.client.post(&url).send().await?;

        if !response.status().is_success() {
            let error: ApiErrorResponse = response.json().await?;
            return Err(IbmError::Api {
                code: error.code,
                message: error.message,
            });
        }

        Ok(())
    }
}

/// Pick the least-busy operational hardware device from a backend list.
pub fn least_busy(backends: &[BackendInfo]) -> IbmResult<&BackendInfo> {
    backends
        .iter()
        .filter(|b| b.status.operational && !b.simulator)
        .min_by_key(|b| b.status.pending_jobs.unwrap_or(u32::MAX))
        .ok_or(IbmError::NoBackendsAvailable)
}

// ============================================================================
// Response types
// ============================================================================

/// API error response.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    /// Error code.
    #[serde(default)]
    code: Option<String>,
    /// Error message.
    #[serde(default)]
    message: String,
}

/// Backends list response (`{"backends": [...]}`).
#[derive(Debug, Deserialize)]
struct BackendsResponse {
    /// List of backends.
    backends: Vec<BackendInfo>,
}

/// Backend information.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendInfo {
    /// Backend name.
    pub name: String,
    /// Number of qubits.
    pub num_qubits: usize,
    /// Backend status.
    pub status: BackendStatus,
    /// Whether this is a simulator.
    #[serde(default)]
    pub simulator: bool,
    /// Maximum number of shots.
    #[serde(default)]
    pub max_shots: Option<u32>,
}

/// Backend status.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendStatus {
    /// Whether the backend is operational.
    pub operational: bool,
    /// Status message.
    #[serde(default)]
    pub status_msg: Option<String>,
    /// Number of pending jobs.
    #[serde(default)]
    pub pending_jobs: Option<u32>,
}

/// Job submission response.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Job ID.
    pub id: String,
    /// Job status at submission.
    #[serde(default)]
    pub status: String,
}

/// Job status response.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID.
    pub id: String,
    /// Job status string.
    pub status: String,
    /// Backend name.
    #[serde(default)]
    pub backend: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created: Option<String>,
    /// Error information if failed.
    #[serde(default)]
    pub error: Option<JobError>,
}

/// Job error information.
#[derive(Debug, Clone, Deserialize)]
pub struct JobError {
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Error message.
    pub message: String,
}

impl JobStatusResponse {
    fn normalized_status(&self) -> String {
        self.status.to_uppercase()
    }

    /// Check if job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.normalized_status().as_str(),
            "COMPLETED" | "FAILED" | "CANCELLED" | "ERROR"
        )
    }

    /// Check if job completed successfully.
    pub fn is_completed(&self) -> bool {
        self.normalized_status() == "COMPLETED"
    }

    /// Check if job failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.normalized_status().as_str(), "FAILED" | "ERROR")
    }

    /// Check if job was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.normalized_status() == "CANCELLED"
    }

    /// Get the failure reason, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.message.clone())
    }
}

/// Job result response.
#[derive(Debug, Deserialize)]
pub struct JobResultResponse {
    /// Results from the sampler primitive, one per circuit.
    pub results: Vec<SamplerResult>,
}

/// Sampler result for one circuit.
#[derive(Debug, Deserialize)]
pub struct SamplerResult {
    /// Measurement counts (bitstring → count).
    #[serde(default)]
    pub counts: Option<HashMap<String, u64>>,
    /// Quasi-probability distributions (bitstring → probability).
    #[serde(default)]
    pub quasi_dists: Option<Vec<HashMap<String, f64>>>,
}

impl SamplerResult {
    /// Extract measurement counts, deriving them from quasi-probabilities
    /// when the API returns only those.
    pub fn to_counts(&self, shots: u32) -> HashMap<String, u64> {
        if let Some(counts) = &self.counts {
            return counts.clone();
        }
        if let Some(dists) = &self.quasi_dists {
            if let Some(first) = dists.first() {
                return first
                    .iter()
                    .map(|(bitstring, &p)| {
                        (
                            bitstring.clone(),
                            (p.max(0.0) * f64::from(shots)).round() as u64,
                        )
                    })
                    .filter(|(_, count)| *count > 0)
                    .collect();
            }
        }
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_terminal() {
        let status = JobStatusResponse {
            id: "test".to_string(),
            status: "COMPLETED".to_string(),
            backend: None,
            created: None,
            error: None,
        };
        assert!(status.is_terminal());
        assert!(status.is_completed());
        assert!(!status.is_failed());

        let failed = JobStatusResponse {
            id: "test".to_string(),
            status: "Failed".to_string(),
            backend: None,
            created: None,
            error: Some(JobError {
                code: None,
                message: "Test error".to_string(),
            }),
        };
        assert!(failed.is_terminal());
        assert!(failed.is_failed());
        assert_eq!(failed.error_message().unwrap(), "Test error");

        let running = JobStatusResponse {
            id: "test".to_string(),
            status: "Running".to_string(),
            backend: None,
            created: None,
            error: None,
        };
        assert!(!running.is_terminal());
    }

    #[test]
    fn test_backends_response_deserialization() {
        let json = r#"{"backends": [
            {"name": "ibm_brisbane", "num_qubits": 127,
             "status": {"operational": true, "pending_jobs": 420}},
            {"name": "ibmq_qasm_simulator", "num_qubits": 32, "simulator": true,
             "status": {"operational": true, "pending_jobs": 2}}
        ]}"#;
        let resp: BackendsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.backends.len(), 2);
        assert_eq!(resp.backends[0].name, "ibm_brisbane");
        assert!(!resp.backends[0].simulator);
        assert!(resp.backends[1].simulator);
    }

    #[test]
    fn test_least_busy_skips_simulators_and_offline() {
        let backends: Vec<BackendInfo> = serde_json::from_str(
            r#"[
            {"name": "sim", "num_qubits": 32, "simulator": true,
             "status": {"operational": true, "pending_jobs": 0}},
            {"name": "down", "num_qubits": 127,
             "status": {"operational": false, "pending_jobs": 1}},
            {"name": "busy", "num_qubits": 127,
             "status": {"operational": true, "pending_jobs": 400}},
            {"name": "quiet", "num_qubits": 133,
             "status": {"operational": true, "pending_jobs": 12}}
        ]"#,
        )
        .unwrap();

        let chosen = least_busy(&backends).unwrap();
        assert_eq!(chosen.name, "quiet");
    }

    #[test]
    fn test_least_busy_empty() {
        let backends: Vec<BackendInfo> = vec![];
        assert!(matches!(
            least_busy(&backends),
            Err(IbmError::NoBackendsAvailable)
        ));
    }

    #[test]
    fn test_sampler_counts_direct() {
        let result: SamplerResult =
            serde_json::from_str(r#"{"counts": {"00": 52, "11": 48}}"#).unwrap();
        let counts = result.to_counts(100);
        assert_eq!(counts.get("00"), Some(&52));
        assert_eq!(counts.get("11"), Some(&48));
    }

    #[test]
    fn test_sampler_counts_from_quasi_dists() {
        let result: SamplerResult =
            serde_json::from_str(r#"{"quasi_dists": [{"00": 0.52, "11": 0.46, "01": 0.02}]}"#)
                .unwrap();
        let counts = result.to_counts(100);
        assert_eq!(counts.get("00"), Some(&52));
        assert_eq!(counts.get("11"), Some(&46));
        assert_eq!(counts.get("01"), Some(&2));
    }

    #[test]
    fn test_client_debug_redacts_token() {
        let client = IbmClient::new("super-secret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-token"));
    }
}
