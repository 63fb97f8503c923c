//! Arm Poses
//!
//! A pose is the set of four joint angles (degrees) that fully describes
//! where the arm is. This module holds the joint/channel layout, the preset
//! table selectable over BLE and the gripper end positions.

use defmt::Format;

/// Highest angle a hobby servo accepts
pub const MAX_ANGLE: u8 = 180;

/// Gripper angle for the "close" command
pub const GRIPPER_CLOSED_ANGLE: u8 = 60;

/// Gripper angle for the "open" command
pub const GRIPPER_OPEN_ANGLE: u8 = 120;

/// Number of selectable preset poses
pub const PRESET_COUNT: usize = 8;

/// Pose assumed at power-up (all servos centred)
pub const HOME_POSE: Pose = Pose::new(90, 90, 90, 90);

/// Preset poses, indexed by command digit.
///
/// The first row keeps the arm folded high (joint1 = 130, joint2 = 150) and
/// sweeps the base from left to right; the second row repeats the sweep
/// with the arm lowered.
pub const PRESET_POSES: [Pose; PRESET_COUNT] = [
    Pose::new(160, 130, 150, 90),
    Pose::new(120, 130, 150, 90),
    Pose::new(60, 130, 150, 90),
    Pose::new(5, 130, 150, 90),
    Pose::new(160, 100, 120, 90),
    Pose::new(120, 100, 120, 90),
    Pose::new(60, 100, 120, 90),
    Pose::new(5, 100, 120, 90),
];

/// Arm joints, in PWM channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Joint {
    Base = 0,
    Joint1 = 1,
    Joint2 = 2,
    Gripper = 3,
}

impl Joint {
    /// All joints in channel order
    pub const ALL: [Joint; 4] = [Joint::Base, Joint::Joint1, Joint::Joint2, Joint::Gripper];

    /// PWM channel driving this joint
    pub const fn channel(self) -> usize {
        self as usize
    }
}

/// Target angles for the four joints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct Pose {
    pub base: u8,
    pub joint1: u8,
    pub joint2: u8,
    pub gripper: u8,
}

impl Pose {
    /// Build a pose, clamping every angle to [0, 180]
    pub const fn new(base: u8, joint1: u8, joint2: u8, gripper: u8) -> Self {
        Self {
            base: clamp_angle(base),
            joint1: clamp_angle(joint1),
            joint2: clamp_angle(joint2),
            gripper: clamp_angle(gripper),
        }
    }

    /// Same pose with every angle forced into [0, 180]
    pub const fn clamped(self) -> Self {
        Self::new(self.base, self.joint1, self.joint2, self.gripper)
    }

    /// Angle of a single joint
    pub const fn get(&self, joint: Joint) -> u8 {
        match joint {
            Joint::Base => self.base,
            Joint::Joint1 => self.joint1,
            Joint::Joint2 => self.joint2,
            Joint::Gripper => self.gripper,
        }
    }

    /// Copy of this pose with one joint replaced
    pub const fn with(mut self, joint: Joint, angle: u8) -> Self {
        let angle = clamp_angle(angle);
        match joint {
            Joint::Base => self.base = angle,
            Joint::Joint1 => self.joint1 = angle,
            Joint::Joint2 => self.joint2 = angle,
            Joint::Gripper => self.gripper = angle,
        }
        self
    }

    /// Angles in channel order
    pub const fn angles(&self) -> [u8; 4] {
        [self.base, self.joint1, self.joint2, self.gripper]
    }
}

impl Default for Pose {
    fn default() -> Self {
        HOME_POSE
    }
}

/// Look up a preset pose by index
pub fn preset(index: usize) -> Option<Pose> {
    PRESET_POSES.get(index).copied()
}

pub(crate) const fn clamp_angle(angle: u8) -> u8 {
    if angle > MAX_ANGLE {
        MAX_ANGLE
    } else {
        angle
    }
}
