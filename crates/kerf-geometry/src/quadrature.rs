//! Fixed-point quadrature rules on the unit interval.

use serde::{Deserialize, Serialize};

/// A set of abscissa/weight pairs normalized to `[0, 1]` (weights sum to 1),
/// rescalable to any `[a, b]` sub-interval. Built once, reused across many
/// intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadratureRule {
    abscissas: Vec<f64>,
    weights: Vec<f64>,
}

impl QuadratureRule {
    /// Gauss-Legendre rule with `n` points, exact for polynomials of degree
    /// `2n - 1`.
    pub fn gauss(n: usize) -> Self {
        let (nodes, weights) = gauss_legendre_nodes_weights(n.max(1));
        // Map from [-1, 1] to [0, 1].
        Self {
            abscissas: nodes.iter().map(|z| 0.5 * (z + 1.0)).collect(),
            weights: weights.iter().map(|w| 0.5 * w).collect(),
        }
    }

    /// Uniform midpoint rule with `n` points.
    pub fn uniform(n: usize) -> Self {
        let n = n.max(1);
        let w = 1.0 / n as f64;
        Self {
            abscissas: (0..n).map(|i| (i as f64 + 0.5) * w).collect(),
            weights: vec![w; n],
        }
    }

    pub fn num_points(&self) -> usize {
        self.abscissas.len()
    }

    /// Iterate `(u, w)` pairs rescaled to `[a, b]`:
    /// `u = a + t (b - a)`, `w' = w (b - a)`.
    pub fn map_to(&self, a: f64, b: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        let h = b - a;
        self.abscissas
            .iter()
            .zip(&self.weights)
            .map(move |(&t, &w)| (a + t * h, w * h))
    }
}

/// Gauss-Legendre nodes and weights on `[-1, 1]`, via Newton iteration on
/// the Legendre polynomial roots.
fn gauss_legendre_nodes_weights(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];

    let m = n.div_ceil(2);
    for i in 0..m {
        // Chebyshev initial guess.
        let mut z = ((i as f64 + 0.75) / (n as f64 + 0.5) * std::f64::consts::PI).cos();

        loop {
            let (p, dp) = legendre_p_and_dp(n, z);
            let z_new = z - p / dp;
            if (z_new - z).abs() < 1e-15 {
                z = z_new;
                break;
            }
            z = z_new;
        }

        let (_, dp) = legendre_p_and_dp(n, z);
        let w = 2.0 / ((1.0 - z * z) * dp * dp);

        nodes[i] = -z;
        nodes[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    (nodes, weights)
}

/// Legendre polynomial `P_n(x)` and its derivative by the three-term
/// recurrence.
fn legendre_p_and_dp(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    if n == 1 {
        return (x, 1.0);
    }

    let mut p_prev = 1.0;
    let mut p_curr = x;
    for k in 2..=n {
        let p_next = ((2 * k - 1) as f64 * x * p_curr - (k - 1) as f64 * p_prev) / k as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }
    let dp = n as f64 * (x * p_curr - p_prev) / (x * x - 1.0);
    (p_curr, dp)
}
