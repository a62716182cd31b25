/// Geometry kernel
///
/// Pure 2D angle math over keypoints. Image coordinates are used throughout:
/// x grows to the right and y grows downward, so "up" is negative y.
///
/// Degenerate input never produces NaN. A zero-length vector resolves to a
/// documented neutral value instead (see each function).

use crate::models::keypoint::Keypoint;

/// Returned by [`angle_between`] when either ray has zero length
pub const DEGENERATE_ANGLE: f64 = 90.0;

/// Angle at `vertex` between the rays to `p1` and `p3`, in degrees (0-180)
///
/// Uses the dot-product/arccos formula. The cosine is clamped into [-1, 1]
/// before inversion; coincident points yield [`DEGENERATE_ANGLE`].
pub fn angle_between(p1: &Keypoint, vertex: &Keypoint, p3: &Keypoint) -> f64 {
    // Vectors from vertex to adjacent points
    let v1_x = p1.x - vertex.x;
    let v1_y = p1.y - vertex.y;
    let v2_x = p3.x - vertex.x;
    let v2_y = p3.y - vertex.y;

    let dot_product = v1_x * v2_x + v1_y * v2_y;
    let mag_1 = (v1_x * v1_x + v1_y * v1_y).sqrt();
    let mag_2 = (v2_x * v2_x + v2_y * v2_y).sqrt();

    if mag_1 == 0.0 || mag_2 == 0.0 {
        return DEGENERATE_ANGLE;
    }

    let cos_angle = dot_product / (mag_1 * mag_2);
    cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle of the segment `from -> to` measured from the upward vertical (0-180)
///
/// Reference axis: vertical. 0 means `to` is straight above `from`, 90 means
/// level, 180 straight below. A zero-length segment reads as 90.
pub fn segment_from_vertical(from: &Keypoint, to: &Keypoint) -> f64 {
    let dx = (to.x - from.x).abs();
    let rise = from.y - to.y;

    if dx == 0.0 && rise == 0.0 {
        return DEGENERATE_ANGLE;
    }

    dx.atan2(rise).to_degrees()
}

/// Forearm deviation from vertical, used as the wrist flexion proxy
///
/// Reference axis: vertical (0 = forearm pointing straight up).
pub fn forearm_from_vertical(elbow: &Keypoint, wrist: &Keypoint) -> f64 {
    segment_from_vertical(elbow, wrist)
}

/// Release trajectory: forearm elevation above horizontal (-90 to 90)
///
/// Reference axis: horizontal. Positive when the wrist is above the elbow;
/// a zero-length forearm reads as 0.
pub fn release_trajectory(elbow: &Keypoint, wrist: &Keypoint) -> f64 {
    90.0 - segment_from_vertical(elbow, wrist)
}

/// Absolute deviation of a left-right segment from horizontal (0-90)
///
/// Reference axis: horizontal. Used for shoulder and hip tilt; coincident
/// points read as level (0).
pub fn line_tilt(a: &Keypoint, b: &Keypoint) -> f64 {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    dy.atan2(dx).to_degrees()
}
