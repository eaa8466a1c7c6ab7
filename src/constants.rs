/// Relative floating point comparison tolerance used throughout the crate's
/// geometry and test code.
pub const EPSILON: f64 = 1e-9;

/// Minimum valid ray parameter. Used both as the floor passed to
/// `Scene::intersect` and subtracted twice from the max distance of NEE
/// shadow rays, so a shadow ray never re-intersects the surface it left or
/// the emitter it's aimed at.
pub const EPSILON_RAY: f64 = 1e-4;

/// Cosine threshold below which an emitter's `pdf_Le` is treated as zero.
/// Guards against division blow-up and sampling the back face of a
/// one-sided emitter.
pub const EPSILON_COS_THETA: f64 = 1e-6;

/// Seed constants for `Sampler::for_pixel`. Both are odd and far apart in
/// their bit patterns so adjacent pixels decorrelate after the XOR.
pub const SEED_A: u64 = 0x9E3779B97F4A7C15;
pub const SEED_B: u64 = 0xC2B2AE3D27D4EB4F;
