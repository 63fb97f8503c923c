//! Arm Kinematics Core
//!
//! Hardware-independent pieces: poses, the angle → duty mapping and the
//! lockstep interpolation that drives them.

pub mod duty;
pub mod motion;
pub mod pose;
