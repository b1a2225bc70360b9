//! Stable-fluids stages over flat `size`×`size` fields.
//!
//! Every stage writes the interior cells and then re-derives the outer ring
//! with [`set_boundary`]. Fields are plain slices so the caller decides which
//! buffer plays which role in each stage.

use crate::grid::{Boundary, index};

/// Corner weight; the corner takes roughly the mean of its two edge neighbours.
const CORNER_WEIGHT: f32 = 0.33;

/// Overwrite the outer ring of `field` so it reflects the interior.
pub fn set_boundary(size: usize, kind: Boundary, field: &mut [f32]) {
    let n = size as i32;
    let ix = |x: i32, y: i32| index(size, x, y);

    for i in 1..n - 1 {
        let top = field[ix(i, 1)];
        let bottom = field[ix(i, n - 2)];
        if kind == Boundary::VelocityY {
            field[ix(i, 0)] = -top;
            field[ix(i, n - 1)] = -bottom;
        } else {
            field[ix(i, 0)] = top;
            field[ix(i, n - 1)] = bottom;
        }
    }

    for j in 1..n - 1 {
        let left = field[ix(1, j)];
        let right = field[ix(n - 2, j)];
        if kind == Boundary::VelocityX {
            field[ix(0, j)] = -left;
            field[ix(n - 1, j)] = -right;
        } else {
            field[ix(0, j)] = left;
            field[ix(n - 1, j)] = right;
        }
    }

    field[ix(0, 0)] = CORNER_WEIGHT * (field[ix(1, 0)] + field[ix(0, 1)]);
    field[ix(0, n - 1)] = CORNER_WEIGHT * (field[ix(1, n - 1)] + field[ix(0, n - 2)]);
    field[ix(n - 1, 0)] = CORNER_WEIGHT * (field[ix(n - 2, 0)] + field[ix(n - 1, 1)]);
    field[ix(n - 1, n - 1)] =
        CORNER_WEIGHT * (field[ix(n - 2, n - 1)] + field[ix(n - 1, n - 2)]);
}

/// Gauss-Seidel relaxation of `c * x - a * (neighbours of x) = prior`.
///
/// Updates happen in place, so later cells of a sweep already see the new
/// values of earlier ones. The sweep count is fixed; there is no residual test.
pub fn linear_solve(
    size: usize,
    kind: Boundary,
    field: &mut [f32],
    prior: &[f32],
    a: f32,
    c: f32,
    iterations: usize,
) {
    let n = size as i32;
    let c_recip = 1.0 / c;

    for _ in 0..iterations {
        for j in 1..n - 1 {
            for i in 1..n - 1 {
                let neighbours = field[index(size, i + 1, j)]
                    + field[index(size, i - 1, j)]
                    + field[index(size, i, j + 1)]
                    + field[index(size, i, j - 1)];
                let idx = index(size, i, j);
                field[idx] = (prior[idx] + a * neighbours) * c_recip;
            }
        }
        set_boundary(size, kind, field);
    }
}

/// Implicit diffusion of `prior` into `field` at `rate` over `dt`.
///
/// `weight` is the centre coefficient multiplier: 4 balances the four
/// neighbour couplings exactly, the demo default of 5 bleeds a little mass.
#[allow(clippy::too_many_arguments)]
pub fn diffuse(
    size: usize,
    kind: Boundary,
    field: &mut [f32],
    prior: &[f32],
    rate: f32,
    dt: f32,
    weight: f32,
    iterations: usize,
) {
    let interior = (size - 2) as f32;
    let a = dt * rate * interior * interior;
    linear_solve(size, kind, field, prior, a, 1.0 + weight * a, iterations);
}

/// Central-difference divergence of the velocity at interior cell `(i, j)`,
/// scaled the way [`project`] uses it.
#[inline]
pub fn divergence_at(size: usize, velocity_x: &[f32], velocity_y: &[f32], i: i32, j: i32) -> f32 {
    -0.5 * (velocity_x[index(size, i + 1, j)] - velocity_x[index(size, i - 1, j)]
        + velocity_y[index(size, i, j + 1)]
        - velocity_y[index(size, i, j - 1)])
        / size as f32
}

/// Remove the divergent part of the velocity field.
///
/// `pressure` and `divergence` are scratch buffers; their previous contents
/// are discarded.
pub fn project(
    size: usize,
    velocity_x: &mut [f32],
    velocity_y: &mut [f32],
    pressure: &mut [f32],
    divergence: &mut [f32],
    iterations: usize,
) {
    let n = size as i32;
    let scale = size as f32;

    for j in 1..n - 1 {
        for i in 1..n - 1 {
            let idx = index(size, i, j);
            divergence[idx] = divergence_at(size, velocity_x, velocity_y, i, j);
            pressure[idx] = 0.0;
        }
    }

    set_boundary(size, Boundary::Scalar, divergence);
    set_boundary(size, Boundary::Scalar, pressure);
    linear_solve(size, Boundary::Scalar, pressure, divergence, 1.0, 4.0, iterations);

    for j in 1..n - 1 {
        for i in 1..n - 1 {
            let idx = index(size, i, j);
            velocity_x[idx] -=
                0.5 * (pressure[index(size, i + 1, j)] - pressure[index(size, i - 1, j)]) * scale;
            velocity_y[idx] -=
                0.5 * (pressure[index(size, i, j + 1)] - pressure[index(size, i, j - 1)]) * scale;
        }
    }

    set_boundary(size, Boundary::VelocityX, velocity_x);
    set_boundary(size, Boundary::VelocityY, velocity_y);
}

/// Semi-Lagrangian transport of `source` into `dest` through the velocity.
///
/// Each interior cell is traced back along its velocity and `source` is
/// sampled bilinearly at the landing point.
pub fn advect(
    size: usize,
    kind: Boundary,
    dest: &mut [f32],
    source: &[f32],
    velocity_x: &[f32],
    velocity_y: &[f32],
    dt: f32,
) {
    let n = size as i32;
    let dt0 = dt * (size - 2) as f32;
    let upper = size as f32 + 0.5;

    for j in 1..n - 1 {
        for i in 1..n - 1 {
            let idx = index(size, i, j);

            let x = (i as f32 - dt0 * velocity_x[idx]).max(0.5).min(upper);
            let y = (j as f32 - dt0 * velocity_y[idx]).max(0.5).min(upper);

            let i0 = x.floor();
            let j0 = y.floor();

            let s1 = x - i0;
            let s0 = 1.0 - s1;
            let t1 = y - j0;
            let t0 = 1.0 - t1;

            let i0 = i0 as i32;
            let j0 = j0 as i32;
            let i1 = i0 + 1;
            let j1 = j0 + 1;

            dest[idx] = s0 * (t0 * source[index(size, i0, j0)] + t1 * source[index(size, i0, j1)])
                + s1 * (t0 * source[index(size, i1, j0)] + t1 * source[index(size, i1, j1)]);
        }
    }

    set_boundary(size, kind, dest);
}
