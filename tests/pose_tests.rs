//! Pose table and joint layout tests
//!
//! These tests run on the target hardware using defmt-test

#![no_std]
#![no_main]

mod common;

use servo_arm_firmware::core::pose::{
    preset, Joint, Pose, GRIPPER_CLOSED_ANGLE, GRIPPER_OPEN_ANGLE, HOME_POSE, MAX_ANGLE, PRESET_COUNT,
    PRESET_POSES,
};

#[defmt_test::tests]
mod tests {
    use defmt::{assert, assert_eq};

    use super::*;

    #[test]
    fn test_home_pose_is_centred() {
        assert_eq!(HOME_POSE, Pose::new(90, 90, 90, 90));
        assert_eq!(Pose::default(), HOME_POSE);
    }

    #[test]
    fn test_preset_table() {
        let expected = [
            [160, 130, 150, 90],
            [120, 130, 150, 90],
            [60, 130, 150, 90],
            [5, 130, 150, 90],
            [160, 100, 120, 90],
            [120, 100, 120, 90],
            [60, 100, 120, 90],
            [5, 100, 120, 90],
        ];

        assert_eq!(PRESET_POSES.len(), PRESET_COUNT);
        for (pose, angles) in PRESET_POSES.iter().zip(expected.iter()) {
            assert_eq!(pose.angles(), *angles);
        }
    }

    #[test]
    fn test_presets_leave_gripper_centred() {
        for pose in PRESET_POSES.iter() {
            assert_eq!(pose.gripper, 90);
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(preset(0), Some(Pose::new(160, 130, 150, 90)));
        assert_eq!(preset(7), Some(Pose::new(5, 100, 120, 90)));
        assert_eq!(preset(8), None);
    }

    #[test]
    fn test_gripper_angles() {
        assert_eq!(GRIPPER_CLOSED_ANGLE, 60);
        assert_eq!(GRIPPER_OPEN_ANGLE, 120);
    }

    #[test]
    fn test_joint_channels() {
        assert_eq!(Joint::Base.channel(), 0);
        assert_eq!(Joint::Joint1.channel(), 1);
        assert_eq!(Joint::Joint2.channel(), 2);
        assert_eq!(Joint::Gripper.channel(), 3);

        for (index, joint) in Joint::ALL.iter().enumerate() {
            assert_eq!(joint.channel(), index);
        }
    }

    #[test]
    fn test_new_clamps_angles() {
        let pose = Pose::new(200, 181, 180, 255);
        assert_eq!(pose.angles(), [MAX_ANGLE, MAX_ANGLE, 180, MAX_ANGLE]);
    }

    #[test]
    fn test_clamped_fixes_raw_fields() {
        let raw = Pose {
            base: 250,
            joint1: 10,
            joint2: 190,
            gripper: 0,
        };
        assert_eq!(raw.clamped().angles(), [180, 10, 180, 0]);
    }

    #[test]
    fn test_get_and_with() {
        let pose = Pose::new(1, 2, 3, 4);
        assert_eq!(pose.get(Joint::Base), 1);
        assert_eq!(pose.get(Joint::Joint1), 2);
        assert_eq!(pose.get(Joint::Joint2), 3);
        assert_eq!(pose.get(Joint::Gripper), 4);

        let moved = pose.with(Joint::Gripper, 120);
        assert_eq!(moved.angles(), [1, 2, 3, 120]);
        // Original untouched
        assert_eq!(pose.gripper, 4);

        let clamped = pose.with(Joint::Joint2, 200);
        assert!(clamped.joint2 == MAX_ANGLE);
    }
}
