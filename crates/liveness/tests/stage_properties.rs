use liveness::{LivenessConfig, LivenessMonitor};
use proptest::prelude::*;
use vcu_protocol::NodeId;
use vehicle_state::{NodeStatus, Stage, StateStore};

proptest! {
    /// Random sighting patterns: once in error, the stage never leaves it
    #[test]
    fn error_is_sticky(pattern in prop::collection::vec(any::<u8>(), 1..400)) {
        let mut monitor = LivenessMonitor::new(LivenessConfig::default()).unwrap();
        let mut store = StateStore::new();
        let mut seen_error = false;

        for (tick, mask) in pattern.iter().enumerate() {
            let now = tick as u32 * 10;
            for node in NodeId::ALL {
                if mask & (1 << node.index()) != 0 {
                    store.mark_alive(node, now);
                }
            }
            let stage = monitor.sweep(&mut store, now);
            if seen_error {
                prop_assert_eq!(stage, Stage::Error);
            }
            seen_error |= stage == Stage::Error;
        }
    }

    /// A node heard at least every recovery gap never goes missing once alive
    #[test]
    fn steady_node_never_flaps(
        period in 1u32..=5,
        ticks in 30usize..300,
    ) {
        let mut monitor = LivenessMonitor::new(LivenessConfig::default()).unwrap();
        let mut store = StateStore::new();
        let mut alive = false;

        for tick in 0..ticks {
            let now = tick as u32 * 10;
            if tick as u32 % period == 0 {
                store.mark_alive(NodeId::Pedal, now);
            }
            monitor.sweep(&mut store, now);

            let status = store.liveness(NodeId::Pedal).status;
            if alive {
                prop_assert_eq!(status, NodeStatus::Alive);
            }
            alive |= status == NodeStatus::Alive;
        }
        prop_assert!(alive);
    }

    /// Sightings stamped slightly after the sweep clock, from any starting
    /// tick, never knock a steady vehicle out of running
    #[test]
    fn late_stamps_never_flap(
        start in any::<u32>(),
        period in 1u32..=5,
        jitter in prop::collection::vec(0u32..10, 300),
    ) {
        let mut monitor = LivenessMonitor::new(LivenessConfig::default()).unwrap();
        let mut store = StateStore::new();
        let mut running = false;

        for (tick, late) in jitter.iter().enumerate() {
            let now = start.wrapping_add(tick as u32 * 10);
            if tick as u32 % period == 0 {
                for node in NodeId::ALL {
                    store.mark_alive(node, now.wrapping_add(*late));
                }
            }
            let stage = monitor.sweep(&mut store, now);

            prop_assert_ne!(stage, Stage::Error);
            if running {
                prop_assert_eq!(stage, Stage::Running);
                for node in NodeId::ALL {
                    prop_assert_eq!(store.liveness(node).status, NodeStatus::Alive);
                }
            }
            running |= stage == Stage::Running;
        }
        prop_assert!(running);
    }
}
