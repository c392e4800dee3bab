//! Shared constants for hyperdraw-shapes.

// Scale
pub(crate) const HCROSSF7: f64 = 0.620672; // {7,3} circumradius; scalefactor 1 means this size
pub(crate) const SILHOUETTE_UNIT: f64 = 0.805578; // scalefactor per silhouette unit (S)

// Eye seat height, as a fraction of the human height
pub(crate) const EYEPOS_FLAT_WORLD: f64 = 0.875;
pub(crate) const EYEPOS_SOLID_WORLD: f64 = 0.925;

// Adaptive subdivision
pub(crate) const SUBDIVIDE_SLACK: f64 = 1e-3; // shaved off the running max edge each step
pub(crate) const SUBDIVIDE_LIMIT: f64 = 0.02; // longest kept edge, in units of S

// Icosahedron latitude of the upper ring
pub(crate) const ICOSA_LATITUDE_DEG: f64 = 63.43;

// Revolution sweeps
pub(crate) const REV_STEP_FULL: usize = 24; // degrees per step for a full 360 sweep
pub(crate) const REV_STEP: usize = 10;

pub(crate) const BIRD_FRAMES: usize = 30;
pub(crate) const SLIME_STEP: usize = 8; // lattice steps per icosahedron face edge

// Sub-segments per tile edge on side panels
pub(crate) const SIDE_STEPS: usize = 4;
