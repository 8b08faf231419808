//! Derivative-free optimizers for variational training.
//!
//! Gradients of sampled quantum objectives are expensive, so the trainer
//! uses derivative-free methods: a COBYLA-style trust-region simplex and
//! SPSA. Both are simplified implementations sized for this workload; a
//! production system would reach for a dedicated optimization library.

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameter values.
    pub optimal_params: Vec<f64>,
    /// Optimal objective value.
    pub optimal_value: f64,
    /// Number of objective evaluations.
    pub num_evaluations: usize,
    /// Number of accepted improvements.
    pub num_iterations: usize,
    /// History of best objective values.
    pub history: Vec<f64>,
    /// Whether the optimization converged before exhausting its budget.
    pub converged: bool,
}

/// Trait for derivative-free minimizers.
pub trait Optimizer {
    /// Minimize an objective function starting from `initial_params`.
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64;
}

/// COBYLA-style optimizer: a simplex search with a contracting trust
/// region. Real COBYLA builds linear approximations; the simplex variant
/// behaves comparably on the smooth, low-dimensional objectives here.
#[derive(Debug, Clone)]
pub struct Cobyla {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Convergence tolerance on the simplex spread.
    pub tol: f64,
    /// Initial trust region radius.
    pub rhobeg: f64,
    /// Final trust region radius.
    pub rhoend: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            rhobeg: 0.5,
            rhoend: 1e-4,
        }
    }
}

impl Cobyla {
    /// Create a new COBYLA optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    #[must_use]
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}

impl Optimizer for Cobyla {
    fn minimize<F>(&self, mut objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial_params.len();
        let mut best_value = objective(&initial_params);
        let mut num_evaluations = 1;
        let mut history = vec![best_value];

        // Simplex of n+1 points around the start
        let mut simplex: Vec<Vec<f64>> = vec![initial_params.clone()];
        let mut values: Vec<f64> = vec![best_value];
        for i in 0..n {
            let mut point = initial_params.clone();
            point[i] += self.rhobeg;
            values.push(objective(&point));
            num_evaluations += 1;
            simplex.push(point);
        }

        let mut rho = self.rhobeg;
        let mut converged = false;

        for _ in 0..self.maxiter {
            // Order the simplex by objective value
            let mut order: Vec<usize> = (0..=n).collect();
            order.sort_by(|&a, &b| {
                values[a]
                    .partial_cmp(&values[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let best = order[0];
            let worst = order[n];
            let spread = values[worst] - values[best];

            if spread < self.tol {
                if rho <= self.rhoend {
                    converged = true;
                    break;
                }
                // Contract the trust region and rebuild around the best point
                rho = (rho * 0.5).max(self.rhoend);
                let anchor = simplex[best].clone();
                let anchor_value = values[best];
                simplex = vec![anchor.clone()];
                values = vec![anchor_value];
                for i in 0..n {
                    let mut point = anchor.clone();
                    point[i] += rho;
                    values.push(objective(&point));
                    num_evaluations += 1;
                    simplex.push(point);
                }
                continue;
            }

            // Centroid of all points except the worst
            let mut centroid = vec![0.0; n];
            for &idx in &order[..n] {
                for (c, v) in centroid.iter_mut().zip(&simplex[idx]) {
                    *c += v;
                }
            }
            for c in &mut centroid {
                *c /= n as f64;
            }

            // Reflect the worst point through the centroid, step bounded by rho
            let mut reflected: Vec<f64> = centroid
                .iter()
                .zip(&simplex[worst])
                .map(|(c, w)| 2.0 * c - w)
                .collect();
            for (r, c) in reflected.iter_mut().zip(&centroid) {
                let step = *r - c;
                if step.abs() > rho {
                    *r = c + rho * step.signum();
                }
            }
            let f_reflected = objective(&reflected);
            num_evaluations += 1;

            if f_reflected < values[best] {
                // Try expanding further along the same direction
                let expanded: Vec<f64> = centroid
                    .iter()
                    .zip(&reflected)
                    .map(|(c, r)| c + 2.0 * (r - c))
                    .collect();
                let f_expanded = objective(&expanded);
                num_evaluations += 1;

                if f_expanded < f_reflected {
                    simplex[worst] = expanded;
                    values[worst] = f_expanded;
                } else {
                    simplex[worst] = reflected;
                    values[worst] = f_reflected;
                }
            } else if f_reflected < values[order[n - 1]] {
                simplex[worst] = reflected;
                values[worst] = f_reflected;
            } else {
                // Contract toward the centroid
                let contracted: Vec<f64> = centroid
                    .iter()
                    .zip(&simplex[worst])
                    .map(|(c, w)| 0.5 * (c + w))
                    .collect();
                let f_contracted = objective(&contracted);
                num_evaluations += 1;

                if f_contracted < values[worst] {
                    simplex[worst] = contracted;
                    values[worst] = f_contracted;
                } else {
                    // Shrink the whole simplex toward the best point
                    let anchor = simplex[best].clone();
                    for idx in 0..=n {
                        if idx == best {
                            continue;
                        }
                        for (v, a) in simplex[idx].iter_mut().zip(&anchor) {
                            *v = 0.5 * (*v + a);
                        }
                        values[idx] = objective(&simplex[idx]);
                        num_evaluations += 1;
                    }
                }
            }

            let round_best = values
                .iter()
                .cloned()
                .fold(f64::INFINITY, f64::min);
            if round_best < best_value {
                best_value = round_best;
                history.push(best_value);
            }
        }

        let final_best = values
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);

        OptimizationResult {
            optimal_params: simplex[final_best].clone(),
            optimal_value: values[final_best],
            num_evaluations,
            num_iterations: history.len(),
            history,
            converged,
        }
    }
}

/// SPSA (Simultaneous Perturbation Stochastic Approximation).
///
/// Estimates a descent direction from two objective evaluations per step
/// using random ±1 perturbations.
#[derive(Debug, Clone)]
pub struct Spsa {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Initial step size.
    pub a: f64,
    /// Perturbation size.
    pub c: f64,
    /// Learning rate decay exponent.
    pub alpha: f64,
    /// Perturbation decay exponent.
    pub gamma: f64,
}

impl Default for Spsa {
    fn default() -> Self {
        Self {
            maxiter: 100,
            a: 0.1,
            c: 0.1,
            alpha: 0.602,
            gamma: 0.101,
        }
    }
}

impl Spsa {
    /// Create a new SPSA optimizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    #[must_use]
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }
}

impl Optimizer for Spsa {
    fn minimize<F>(&self, mut objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial_params.len();
        let mut x = initial_params;
        let mut f_x = objective(&x);
        let mut num_evaluations = 1;
        let mut history = vec![f_x];

        // Reproducible ±1 draws without threading an RNG through
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut flip = move || -> f64 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if (state >> 33) & 1 == 1 { 1.0 } else { -1.0 }
        };

        for k in 0..self.maxiter {
            let a_k = self.a / ((k + 1) as f64).powf(self.alpha);
            let c_k = self.c / ((k + 1) as f64).powf(self.gamma);

            let delta: Vec<f64> = (0..n).map(|_| flip()).collect();
            let x_plus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi + c_k * di).collect();
            let x_minus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi - c_k * di).collect();

            let f_plus = objective(&x_plus);
            let f_minus = objective(&x_minus);
            num_evaluations += 2;

            for (xi, di) in x.iter_mut().zip(&delta) {
                let grad = (f_plus - f_minus) / (2.0 * c_k * di);
                *xi -= a_k * grad;
            }

            f_x = objective(&x);
            num_evaluations += 1;
            history.push(f_x);
        }

        OptimizationResult {
            optimal_params: x,
            optimal_value: f_x,
            num_evaluations,
            num_iterations: self.maxiter,
            history,
            converged: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cobyla_quadratic() {
        let cobyla = Cobyla::new().with_maxiter(200);

        // Minimize (x-1)^2 + (y-2)^2
        let result = cobyla.minimize(
            |params| (params[0] - 1.0).powi(2) + (params[1] - 2.0).powi(2),
            vec![0.0, 0.0],
        );

        assert!(result.optimal_value < 0.01);
        assert!((result.optimal_params[0] - 1.0).abs() < 0.1);
        assert!((result.optimal_params[1] - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_cobyla_rosenbrock_improves() {
        let cobyla = Cobyla::new().with_maxiter(500);

        let result = cobyla.minimize(
            |params| {
                let x = params[0];
                let y = params[1];
                (1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2)
            },
            vec![0.0, 0.0],
        );

        // Rosenbrock is hard; just require substantial improvement from 1.0
        assert!(result.optimal_value < 1.0);
    }

    #[test]
    fn test_cobyla_history_monotonic() {
        let cobyla = Cobyla::new().with_maxiter(100);
        let result = cobyla.minimize(
            |params| params.iter().map(|p| p * p).sum(),
            vec![2.0, -1.5, 0.5],
        );

        assert!(
            result
                .history
                .windows(2)
                .all(|w| w[1] <= w[0] + 1e-12),
            "history should be non-increasing"
        );
    }

    #[test]
    fn test_spsa_quadratic() {
        let spsa = Spsa::new().with_maxiter(200);

        let result = spsa.minimize(
            |params| params[0].powi(2) + params[1].powi(2),
            vec![1.0, 1.0],
        );

        assert!(result.optimal_value < 0.5);
    }

    #[test]
    fn test_evaluation_accounting() {
        let cobyla = Cobyla::new().with_maxiter(10);
        let mut calls = 0usize;
        let result = cobyla.minimize(
            |params| {
                calls += 1;
                params[0] * params[0]
            },
            vec![1.0],
        );
        // The optimizer reports exactly the calls it made
        assert_eq!(result.num_evaluations, calls);
    }
}
