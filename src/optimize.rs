//! Nelder-Mead simplex minimization with box constraints

/// Configuration for the simplex search.
#[derive(Debug, Clone)]
pub(crate) struct NelderMeadConfig {
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            tolerance: 1e-8,
        }
    }
}

/// Outcome of a simplex search.
#[derive(Debug, Clone)]
pub(crate) struct NelderMeadResult {
    pub point: Vec<f64>,
    pub value: f64,
    pub converged: bool,
}

/// Minimize `f` starting from `start`, keeping every evaluated point inside
/// the per-dimension `bounds`. Convergence means the simplex function values
/// have collapsed within the relative tolerance before the iteration cap.
pub(crate) fn nelder_mead<F>(
    f: F,
    start: &[f64],
    bounds: &[(f64, f64)],
    config: &NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let dim = start.len();
    let clamp_into = |point: &mut [f64]| {
        for (v, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *v = v.clamp(lo, hi);
        }
    };

    let mut origin = start.to_vec();
    clamp_into(&mut origin);
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    let origin_value = f(&origin);
    simplex.push((origin.clone(), origin_value));
    for i in 0..dim {
        let mut point = origin.clone();
        let step = 0.1 * (bounds[i].1 - bounds[i].0);
        point[i] = (point[i] + step).min(bounds[i].1);
        if (point[i] - origin[i]).abs() < f64::EPSILON {
            point[i] = (origin[i] - step).max(bounds[i].0);
        }
        let value = f(&point);
        simplex.push((point, value));
    }

    let order = |simplex: &mut Vec<(Vec<f64>, f64)>| {
        simplex.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    };

    let mut converged = false;
    for _ in 0..config.max_iter {
        order(&mut simplex);
        let best = simplex[0].1;
        let worst = simplex[dim].1;
        if (worst - best).abs() <= config.tolerance * (1.0 + best.abs()) {
            converged = true;
            break;
        }

        let mut centroid = vec![0.0; dim];
        for (point, _) in &simplex[..dim] {
            for i in 0..dim {
                centroid[i] += point[i];
            }
        }
        for c in centroid.iter_mut() {
            *c /= dim as f64;
        }

        let worst_point = simplex[dim].0.clone();
        let move_from_worst = |scale: f64| -> Vec<f64> {
            let mut point: Vec<f64> = centroid
                .iter()
                .zip(&worst_point)
                .map(|(c, w)| c + scale * (c - w))
                .collect();
            clamp_into(&mut point);
            point
        };

        let reflected = move_from_worst(1.0);
        let reflected_value = f(&reflected);
        if reflected_value < simplex[0].1 {
            let expanded = move_from_worst(2.0);
            let expanded_value = f(&expanded);
            simplex[dim] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
        } else if reflected_value < simplex[dim - 1].1 {
            simplex[dim] = (reflected, reflected_value);
        } else {
            let contracted = move_from_worst(-0.5);
            let contracted_value = f(&contracted);
            if contracted_value < simplex[dim].1 {
                simplex[dim] = (contracted, contracted_value);
            } else {
                let best_point = simplex[0].0.clone();
                for (point, value) in simplex.iter_mut().skip(1) {
                    for i in 0..dim {
                        point[i] = best_point[i] + 0.5 * (point[i] - best_point[i]);
                    }
                    clamp_into(point);
                    *value = f(point);
                }
            }
        }
    }

    order(&mut simplex);
    NelderMeadResult {
        point: simplex[0].0.clone(),
        value: simplex[0].1,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_minimizes_quadratic() {
        let result = nelder_mead(
            |p| (p[0] - 2.0).powi(2),
            &[0.5],
            &[(0.0, 10.0)],
            &NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_approx_eq!(result.point[0], 2.0, 1e-3);
    }

    #[test]
    fn test_respects_bounds() {
        // Unconstrained minimum at 5.0 lies outside the box.
        let result = nelder_mead(
            |p| (p[0] - 5.0).powi(2),
            &[0.5],
            &[(0.0, 1.0)],
            &NelderMeadConfig::default(),
        );

        assert!(result.point[0] <= 1.0);
        assert_approx_eq!(result.point[0], 1.0, 1e-3);
    }

    #[test]
    fn test_two_dimensional_bowl() {
        let result = nelder_mead(
            |p| (p[0] - 0.3).powi(2) + 2.0 * (p[1] - 0.7).powi(2),
            &[0.9, 0.1],
            &[(0.0, 1.0), (0.0, 1.0)],
            &NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_approx_eq!(result.point[0], 0.3, 1e-3);
        assert_approx_eq!(result.point[1], 0.7, 1e-3);
    }
}
