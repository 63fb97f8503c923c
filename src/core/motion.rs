//! Smooth Multi-Joint Motion
//!
//! Moves the arm from its current pose to a target pose one degree per step,
//! every joint advancing together, with a fixed pause between steps. Joints
//! that arrive early simply hold while the others finish, so a move takes as
//! many steps as the largest single-joint distance.
//!
//! Moves run to completion: the caller awaits the whole ramp before the next
//! command is looked at.

use defmt::{debug, info};
use embedded_hal_async::delay::DelayNs;

use crate::config::MotionConfig;
use crate::core::duty::DutyMapping;
use crate::core::pose::{clamp_angle, Joint, Pose, HOME_POSE};
use crate::servo::{ServoError, ServoOutput};

/// One degree toward `target`, or `current` if already there
pub const fn step_toward(current: u8, target: u8) -> u8 {
    if current < target {
        current + 1
    } else if current > target {
        current - 1
    } else {
        current
    }
}

/// Intermediate poses of a lockstep move, target included
#[derive(Debug, Clone)]
pub struct PoseRamp {
    current: Pose,
    target: Pose,
}

impl PoseRamp {
    pub fn new(from: Pose, to: Pose) -> Self {
        Self {
            current: from.clamped(),
            target: to.clamped(),
        }
    }

    /// Number of steps the ramp will yield
    pub fn step_count(&self) -> u16 {
        Joint::ALL
            .iter()
            .map(|&joint| self.current.get(joint).abs_diff(self.target.get(joint)) as u16)
            .max()
            .unwrap_or(0)
    }
}

impl Iterator for PoseRamp {
    type Item = Pose;

    fn next(&mut self) -> Option<Pose> {
        if self.current == self.target {
            return None;
        }

        let mut next = self.current;
        for joint in Joint::ALL {
            next = next.with(joint, step_toward(self.current.get(joint), self.target.get(joint)));
        }
        self.current = next;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.step_count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for PoseRamp {}

/// The arm: servo outputs plus the pose they were last driven to
pub struct Arm<S: ServoOutput> {
    output: S,
    mapping: DutyMapping,
    motion: MotionConfig,
    pose: Pose,
}

impl<S: ServoOutput> Arm<S> {
    /// New arm assumed to sit at [`HOME_POSE`]
    pub fn new(output: S, mapping: DutyMapping, motion: MotionConfig) -> Self {
        Self {
            output,
            mapping,
            motion,
            pose: HOME_POSE,
        }
    }

    /// Pose the servos were last commanded to
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Borrow the underlying outputs
    pub fn output(&self) -> &S {
        &self.output
    }

    /// Drive all channels to the current pose once, without ramping
    pub fn engage(&mut self) -> Result<(), ServoError> {
        self.write_pose(self.pose)?;
        info!("Servos engaged at {}", self.pose);
        Ok(())
    }

    /// Move every joint to `target` in lockstep; returns the number of steps
    pub async fn move_to<D: DelayNs>(&mut self, target: Pose, delay: &mut D) -> Result<u16, ServoError> {
        let ramp = PoseRamp::new(self.pose, target);
        debug!("Ramping {} -> {} over {} steps", self.pose, target, ramp.step_count());

        let mut steps = 0u16;
        for step in ramp {
            self.write_pose(step)?;
            self.pose = step;
            steps += 1;
            delay.delay_ms(self.motion.pose_step_delay_ms).await;
        }

        info!(
            "Pose reached: base={} joint1={} joint2={} gripper={}",
            self.pose.base, self.pose.joint1, self.pose.joint2, self.pose.gripper
        );
        Ok(steps)
    }

    /// Move only the gripper to `angle`; returns the number of steps
    pub async fn move_gripper_to<D: DelayNs>(&mut self, angle: u8, delay: &mut D) -> Result<u16, ServoError> {
        let target = clamp_angle(angle);
        let mut current = self.pose.gripper;
        let mut steps = 0u16;

        while current != target {
            current = step_toward(current, target);
            self.output.set_duty(Joint::Gripper, self.mapping.duty_for(current))?;
            self.pose = self.pose.with(Joint::Gripper, current);
            steps += 1;
            delay.delay_ms(self.motion.gripper_step_delay_ms).await;
        }

        info!("Gripper eased to {} deg", self.pose.gripper);
        Ok(steps)
    }

    fn write_pose(&mut self, pose: Pose) -> Result<(), ServoError> {
        for joint in Joint::ALL {
            self.output.set_duty(joint, self.mapping.duty_for(pose.get(joint)))?;
        }
        Ok(())
    }
}
