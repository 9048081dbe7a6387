//! Pairwise repulsion between nodes.
//!
//! Every unordered pair pushes apart with an inverse-square falloff. The
//! accumulated displacement is applied to positions, not velocities, once
//! the full pairwise pass is done. This spreads nodes out smoothly without
//! building up momentum.
//!
//! O(n²); node counts stay in the tens.

use crate::graph::Node;

/// Softening term added to the squared distance.
pub const SOFTENING: f64 = 1e-5;

/// Displace `nodes` in place according to mutual repulsion.
///
/// Coincident nodes have no defined push direction and are skipped for that
/// pair.
pub fn apply_repulsion(nodes: &mut [Node], repulsion: f64) {
    let n = nodes.len();
    if n < 2 {
        return;
    }

    let mut disp_x = vec![0.0_f64; n];
    let mut disp_y = vec![0.0_f64; n];

    for i in 0..n {
        for j in 0..i {
            let mut dx = nodes[i].x - nodes[j].x;
            let mut dy = nodes[i].y - nodes[j].y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq == 0.0 {
                continue;
            }
            // 1/dist normalizes (dx, dy); 1/(dist² + ε) is the falloff
            let factor = repulsion / (dist_sq.sqrt() * (dist_sq + SOFTENING));
            dx *= factor;
            dy *= factor;
            disp_x[i] += dx;
            disp_y[i] += dy;
            disp_x[j] -= dx;
            disp_y[j] -= dy;
        }
    }

    for (node, (ddx, ddy)) in nodes.iter_mut().zip(disp_x.into_iter().zip(disp_y)) {
        node.x += ddx;
        node.y += ddy;
    }
}
