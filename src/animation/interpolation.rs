// Interpolation utilities for part poses

use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

/// Convert a quaternion to a 3x3 rotation matrix
pub fn quaternion_to_matrix(q: &glm::Quat) -> glm::Mat3 {
    let q = glm::quat_normalize(q);

    let x2 = q.i + q.i;
    let y2 = q.j + q.j;
    let z2 = q.k + q.k;

    let xx = q.i * x2;
    let xy = q.i * y2;
    let xz = q.i * z2;
    let yy = q.j * y2;
    let yz = q.j * z2;
    let zz = q.k * z2;
    let wx = q.w * x2;
    let wy = q.w * y2;
    let wz = q.w * z2;

    // glm::mat3 takes its arguments row by row
    glm::mat3(
        1.0 - (yy + zz),
        xy - wz,
        xz + wy,
        xy + wz,
        1.0 - (xx + zz),
        yz - wx,
        xz - wy,
        yz + wx,
        1.0 - (xx + yy),
    )
}

/// Scale each column of a rotation matrix by the matching scale component
pub fn apply_scaling_to_matrix(matrix: &glm::Mat3, scaling: &glm::Vec3) -> glm::Mat3 {
    glm::mat3(
        matrix[(0, 0)] * scaling.x,
        matrix[(0, 1)] * scaling.y,
        matrix[(0, 2)] * scaling.z,
        matrix[(1, 0)] * scaling.x,
        matrix[(1, 1)] * scaling.y,
        matrix[(1, 2)] * scaling.z,
        matrix[(2, 0)] * scaling.x,
        matrix[(2, 1)] * scaling.y,
        matrix[(2, 2)] * scaling.z,
    )
}

/// Compose translation * rotation * scale into a single model matrix
pub fn compose_trs(translation: &glm::Vec3, rotation: &glm::Quat, scaling: &glm::Vec3) -> glm::Mat4 {
    let rs = apply_scaling_to_matrix(&quaternion_to_matrix(rotation), scaling);
    let mut m = glm::mat3_to_mat4(&rs);
    m[(0, 3)] = translation.x;
    m[(1, 3)] = translation.y;
    m[(2, 3)] = translation.z;
    m
}

/// Rotation from XYZ Euler angles in degrees (three-style intrinsic order)
pub fn quat_from_euler_deg(degrees: &glm::Vec3) -> glm::Quat {
    let qx = glm::quat_angle_axis(degrees.x.to_radians(), &glm::vec3(1.0, 0.0, 0.0));
    let qy = glm::quat_angle_axis(degrees.y.to_radians(), &glm::vec3(0.0, 1.0, 0.0));
    let qz = glm::quat_angle_axis(degrees.z.to_radians(), &glm::vec3(0.0, 0.0, 1.0));
    qx * qy * qz
}

/// Spherical interpolation that returns the endpoints exactly at t = 0 and t = 1
pub fn quat_slerp(q1: &glm::Quat, q2: &glm::Quat, t: f32) -> glm::Quat {
    if t <= 0.0 {
        return *q1;
    }
    if t >= 1.0 {
        return *q2;
    }
    if glm::quat_dot(q1, q2).abs() >= 1.0 - f32::EPSILON {
        return *q1;
    }
    glm::quat_slerp(q1, q2, t)
}

pub fn lerp_vec3(v1: &glm::Vec3, v2: &glm::Vec3, t: f32) -> glm::Vec3 {
    glm::lerp(v1, v2, t)
}

pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Shapes the blend factor between rest and exploded poses.
///
/// Every curve maps 0 to 0 and 1 to 1 and is monotonic in between, so the
/// endpoints of a transition are always hit exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}
