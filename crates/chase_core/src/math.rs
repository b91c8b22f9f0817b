//! Vector helpers over plain `[f32; 3]`
//!
//! The ground plane is XZ; Y is up.

/// A position or direction in world space
pub type Vec3 = [f32; 3];

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn scale(v: Vec3, s: f32) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

#[inline]
pub fn length(v: Vec3) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Length of the XZ component
#[inline]
pub fn planar_length(v: Vec3) -> f32 {
    (v[0] * v[0] + v[2] * v[2]).sqrt()
}

/// Euclidean distance in 3D
#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    length(sub(a, b))
}

/// Distance on the ground plane, ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar_length(sub(a, b))
}

/// Point on the ground plane at `radius` and `angle` (radians) around `center`
#[inline]
pub fn point_on_circle(center: Vec3, radius: f32, angle: f32, y: f32) -> Vec3 {
    [center[0] + angle.cos() * radius, y, center[2] + angle.sin() * radius]
}
