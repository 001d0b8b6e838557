//! Tests for `ConnectivityMonitor` and the transition policy.

use super::*;
use crate::monitor::event::{IFF_LOWER_UP, IFF_RUNNING, IFF_UP};
use crate::monitor::{LinkEventKind, LinkListener};
use crate::network::OperState;
use crate::network::filter::{ExactNameFilter, PrefixFilter};
use crate::network::mock::MockInspector;
use crate::notify::mock::MockSink;

// ============================================================================
// Test Fixtures
// ============================================================================

const LO: u32 = 1;
const ETH0: u32 = 2;
const WLAN0: u32 = 3;

fn default_filter() -> FilterChain {
    FilterChain::new()
        .exclude(ExactNameFilter::loopback())
        .exclude(PrefixFilter::new(["veth", "docker", "br-", "tap"]))
}

fn monitor(inspector: MockInspector) -> ConnectivityMonitor<MockInspector, MockSink> {
    ConnectivityMonitor::new(inspector, MockSink::new(), default_filter())
}

/// Carrier still present while the driver briefly reports `down`.
fn flapping() -> LinkSignals {
    LinkSignals {
        oper_state: OperState::Down,
        carrier: true,
        running: false,
        has_default_route: false,
        has_any_default: false,
    }
}

fn negotiating() -> LinkSignals {
    LinkSignals {
        running: false,
        has_default_route: false,
        ..LinkSignals::ready()
    }
}

/// Listener replaying a fixed list of events, then ending.
struct MockListener {
    events: Vec<Result<LinkEvent, ListenerError>>,
}

impl LinkListener for MockListener {
    type Stream = tokio_stream::Iter<std::vec::IntoIter<Result<LinkEvent, ListenerError>>>;

    fn into_stream(self) -> Self::Stream {
        tokio_stream::iter(self.events)
    }
}

// ============================================================================
// Decision::decide
// ============================================================================

mod decide {
    use super::*;

    #[test]
    fn same_state_is_unchanged() {
        for state in [
            CoarseState::Connected,
            CoarseState::Disconnected,
            CoarseState::Intermediate,
        ] {
            assert_eq!(
                Decision::decide(Some(state), state, true),
                Decision::Unchanged
            );
        }
    }

    #[test]
    fn transition_to_connected_notifies_and_records() {
        let decision = Decision::decide(
            Some(CoarseState::Disconnected),
            CoarseState::Connected,
            false,
        );
        assert_eq!(decision, Decision::Connected);
        assert_eq!(decision.announced(), Some(CoarseState::Connected));
        assert_eq!(decision.recorded(), Some(CoarseState::Connected));
    }

    #[test]
    fn real_disconnect_notifies_and_records() {
        let decision =
            Decision::decide(Some(CoarseState::Connected), CoarseState::Disconnected, true);
        assert_eq!(decision, Decision::Disconnected);
        assert_eq!(decision.announced(), Some(CoarseState::Disconnected));
        assert_eq!(decision.recorded(), Some(CoarseState::Disconnected));
    }

    #[test]
    fn fake_disconnect_neither_notifies_nor_records() {
        let decision = Decision::decide(
            Some(CoarseState::Connected),
            CoarseState::Disconnected,
            false,
        );
        assert_eq!(decision, Decision::FakeDisconnect);
        assert_eq!(decision.announced(), None);
        assert_eq!(decision.recorded(), None);
    }

    #[test]
    fn intermediate_records_without_notifying() {
        let decision =
            Decision::decide(Some(CoarseState::Connected), CoarseState::Intermediate, false);
        assert_eq!(decision, Decision::Intermediate);
        assert_eq!(decision.announced(), None);
        assert_eq!(decision.recorded(), Some(CoarseState::Intermediate));
    }

    #[test]
    fn unknown_previous_counts_as_change() {
        assert_eq!(
            Decision::decide(None, CoarseState::Connected, false),
            Decision::Connected
        );
        assert_eq!(
            Decision::decide(None, CoarseState::Disconnected, false),
            Decision::FakeDisconnect
        );
    }
}

// ============================================================================
// Bootstrap
// ============================================================================

mod bootstrap {
    use super::*;

    #[tokio::test]
    async fn seeds_cache_without_notifying() {
        let inspector = MockInspector::new()
            .with_link(ETH0, "eth0", LinkSignals::down())
            .with_link(WLAN0, "wlan0", LinkSignals::ready());
        let mut monitor = monitor(inspector);

        let seeded = monitor.bootstrap().await.unwrap();

        assert_eq!(seeded, 2);
        assert_eq!(
            monitor.cache().get("eth0"),
            Some(CoarseState::Disconnected)
        );
        assert_eq!(monitor.cache().get("wlan0"), Some(CoarseState::Connected));
        assert!(monitor.sink().sent().is_empty());
    }

    #[tokio::test]
    async fn skips_excluded_interfaces() {
        let inspector = MockInspector::new()
            .with_link(LO, "lo", LinkSignals::ready())
            .with_link(4, "docker0", LinkSignals::ready())
            .with_link(5, "veth1a2b", LinkSignals::ready())
            .with_link(ETH0, "eth0", LinkSignals::ready());
        let mut monitor = monitor(inspector);

        let seeded = monitor.bootstrap().await.unwrap();

        assert_eq!(seeded, 1);
        assert_eq!(monitor.cache().len(), 1);
        assert_eq!(monitor.cache().get("lo"), None);
    }

    #[tokio::test]
    async fn many_interfaces_still_silent() {
        let mut inspector = MockInspector::new();
        for index in 10..40 {
            inspector = inspector.with_link(index, &format!("eth{index}"), LinkSignals::ready());
        }
        let mut monitor = monitor(inspector);

        monitor.bootstrap().await.unwrap();

        assert_eq!(monitor.cache().len(), 30);
        assert!(monitor.sink().sent().is_empty());
    }

    #[tokio::test]
    async fn unreadable_interface_is_seeded_as_disconnected() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::ready());
        inspector.break_reads("eth0");
        let mut monitor = monitor(inspector);

        monitor.bootstrap().await.unwrap();

        assert_eq!(
            monitor.cache().get("eth0"),
            Some(CoarseState::Disconnected)
        );
    }
}

// ============================================================================
// handle_event
// ============================================================================

mod handle_event {
    use super::*;

    #[tokio::test]
    async fn eth0_coming_up_notifies_connected() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::down());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();

        monitor
            .inspector()
            .set_signals("eth0", LinkSignals::ready());
        let decision = monitor.handle_event(LinkEvent::added(ETH0)).await;

        assert_eq!(decision, Some(Decision::Connected));
        assert_eq!(monitor.sink().titles(), ["eth0 Connected"]);
        assert_eq!(monitor.sink().sent()[0].body, "eth0");
        assert_eq!(monitor.cache().get("eth0"), Some(CoarseState::Connected));
    }

    #[tokio::test]
    async fn event_flags_do_not_override_live_state() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::ready());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();

        monitor.inspector().set_signals("eth0", LinkSignals::down());
        let stale = LinkEvent::new(
            LinkEventKind::Removed,
            ETH0,
            IFF_UP | IFF_RUNNING | IFF_LOWER_UP,
        );
        let decision = monitor.handle_event(stale).await;

        assert_eq!(decision, Some(Decision::Disconnected));
        assert_eq!(monitor.sink().titles(), ["eth0 Disconnected"]);
    }

    #[tokio::test]
    async fn wlan0_flap_is_ignored_and_cache_kept() {
        let inspector = MockInspector::new().with_link(WLAN0, "wlan0", LinkSignals::ready());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();

        monitor.inspector().set_signals("wlan0", flapping());
        let decision = monitor.handle_event(LinkEvent::added(WLAN0)).await;

        assert_eq!(decision, Some(Decision::FakeDisconnect));
        assert!(monitor.sink().sent().is_empty());
        assert_eq!(monitor.cache().get("wlan0"), Some(CoarseState::Connected));
    }

    #[tokio::test]
    async fn no_carrier_with_unknown_state_is_not_a_real_disconnect() {
        let inspector = MockInspector::new().with_link(WLAN0, "wlan0", LinkSignals::ready());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();

        monitor.inspector().set_signals(
            "wlan0",
            LinkSignals {
                oper_state: OperState::Unknown,
                ..LinkSignals::down()
            },
        );
        let decision = monitor.handle_event(LinkEvent::added(WLAN0)).await;

        assert_eq!(decision, Some(Decision::FakeDisconnect));
        assert!(monitor.sink().sent().is_empty());
    }

    #[tokio::test]
    async fn real_disconnect_notifies() {
        let inspector = MockInspector::new().with_link(WLAN0, "wlan0", LinkSignals::ready());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();

        monitor.inspector().set_signals("wlan0", LinkSignals::down());
        let decision = monitor.handle_event(LinkEvent::added(WLAN0)).await;

        assert_eq!(decision, Some(Decision::Disconnected));
        assert_eq!(monitor.sink().titles(), ["wlan0 Disconnected"]);
        assert_eq!(monitor.sink().sent()[0].icon, "network-offline");
        assert_eq!(
            monitor.cache().get("wlan0"),
            Some(CoarseState::Disconnected)
        );
    }

    #[tokio::test]
    async fn repeated_identical_events_notify_once() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::down());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();
        monitor
            .inspector()
            .set_signals("eth0", LinkSignals::ready());

        let first = monitor.handle_event(LinkEvent::added(ETH0)).await;
        let second = monitor.handle_event(LinkEvent::added(ETH0)).await;

        assert_eq!(first, Some(Decision::Connected));
        assert_eq!(second, Some(Decision::Unchanged));
        assert_eq!(monitor.sink().sent().len(), 1);
    }

    #[tokio::test]
    async fn intermediate_is_recorded_silently_and_exit_detected() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::ready());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();

        monitor.inspector().set_signals("eth0", negotiating());
        let decision = monitor.handle_event(LinkEvent::added(ETH0)).await;
        assert_eq!(decision, Some(Decision::Intermediate));
        assert_eq!(
            monitor.cache().get("eth0"),
            Some(CoarseState::Intermediate)
        );
        assert!(monitor.sink().sent().is_empty());

        monitor
            .inspector()
            .set_signals("eth0", LinkSignals::ready());
        let decision = monitor.handle_event(LinkEvent::added(ETH0)).await;
        assert_eq!(decision, Some(Decision::Connected));
        assert_eq!(monitor.sink().titles(), ["eth0 Connected"]);
    }

    #[tokio::test]
    async fn intermediate_to_intermediate_stays_silent() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", negotiating());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();

        monitor.inspector().set_signals(
            "eth0",
            LinkSignals {
                oper_state: OperState::Dormant,
                ..negotiating()
            },
        );
        let decision = monitor.handle_event(LinkEvent::added(ETH0)).await;

        assert_eq!(decision, Some(Decision::Unchanged));
        assert_eq!(
            monitor.cache().get("eth0"),
            Some(CoarseState::Intermediate)
        );
    }

    #[tokio::test]
    async fn excluded_interfaces_never_reach_classifier_or_sink() {
        let mut inspector = MockInspector::new();
        let excluded = ["lo", "veth0", "docker0", "br-abcdef", "tap0"];
        for (index, name) in (10..).zip(excluded) {
            inspector = inspector.with_link(index, name, LinkSignals::ready());
        }
        let mut monitor = monitor(inspector);

        for (index, _) in (10..).zip(excluded) {
            assert_eq!(monitor.handle_event(LinkEvent::added(index)).await, None);
        }

        assert!(monitor.cache().is_empty());
        assert!(monitor.sink().sent().is_empty());
    }

    #[tokio::test]
    async fn unresolvable_index_is_dropped() {
        let mut monitor = monitor(MockInspector::new());

        let decision = monitor.handle_event(LinkEvent::removed(99)).await;

        assert_eq!(decision, None);
        assert!(monitor.cache().is_empty());
    }

    #[tokio::test]
    async fn first_sighting_of_new_interface_notifies() {
        let mut monitor = monitor(MockInspector::new());
        monitor.bootstrap().await.unwrap();

        monitor
            .inspector()
            .set_link(ETH0, "eth0", LinkSignals::ready());
        let decision = monitor.handle_event(LinkEvent::added(ETH0)).await;

        assert_eq!(decision, Some(Decision::Connected));
        assert_eq!(monitor.sink().sent().len(), 1);
    }

    #[tokio::test]
    async fn sink_failure_does_not_affect_cache() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::down());
        let mut monitor = ConnectivityMonitor::new(inspector, MockSink::failing(), default_filter());
        monitor.bootstrap().await.unwrap();

        monitor
            .inspector()
            .set_signals("eth0", LinkSignals::ready());
        let decision = monitor.handle_event(LinkEvent::added(ETH0)).await;

        assert_eq!(decision, Some(Decision::Connected));
        assert_eq!(monitor.sink().sent().len(), 1);
        assert_eq!(monitor.cache().get("eth0"), Some(CoarseState::Connected));
    }

    #[tokio::test]
    async fn custom_icons_flow_into_notifications() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::down());
        let mut monitor = monitor(inspector).with_icons(Icons {
            connected: "net-up".to_string(),
            disconnected: "net-down".to_string(),
        });
        monitor.bootstrap().await.unwrap();

        monitor
            .inspector()
            .set_signals("eth0", LinkSignals::ready());
        monitor.handle_event(LinkEvent::added(ETH0)).await;

        assert_eq!(monitor.sink().sent()[0].icon, "net-up");
    }
}

// ============================================================================
// Policy flags
// ============================================================================

mod policy {
    use super::*;

    fn ready_without_route() -> LinkSignals {
        LinkSignals {
            has_default_route: false,
            has_any_default: false,
            ..LinkSignals::ready()
        }
    }

    #[tokio::test]
    async fn required_route_missing_is_intermediate() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", ready_without_route());
        let mut monitor = monitor(inspector).with_policy(ClassifyPolicy::new(true, false));

        monitor.bootstrap().await.unwrap();

        assert_eq!(
            monitor.cache().get("eth0"),
            Some(CoarseState::Intermediate)
        );
    }

    #[tokio::test]
    async fn route_on_other_interface_satisfies_system_wide_policy() {
        let inspector = MockInspector::new()
            .with_link(ETH0, "eth0", ready_without_route())
            .with_link(WLAN0, "wlan0", LinkSignals::ready());
        let mut monitor = monitor(inspector).with_policy(ClassifyPolicy::new(true, true));

        monitor.bootstrap().await.unwrap();

        assert_eq!(monitor.cache().get("eth0"), Some(CoarseState::Connected));
        assert!(monitor.inspector().any_default_queries() >= 1);
    }

    #[tokio::test]
    async fn lenient_policy_never_scans_system_routes() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", ready_without_route());
        let mut monitor = monitor(inspector);

        monitor.bootstrap().await.unwrap();

        assert_eq!(monitor.cache().get("eth0"), Some(CoarseState::Connected));
        assert_eq!(monitor.inspector().any_default_queries(), 0);
    }
}

// ============================================================================
// run
// ============================================================================

mod run {
    use super::*;

    #[tokio::test]
    async fn processes_events_in_order_then_reports_stop() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::ready());
        let mut monitor = monitor(inspector);
        monitor.bootstrap().await.unwrap();
        monitor.inspector().set_signals("eth0", LinkSignals::down());

        let listener = MockListener {
            events: vec![
                Ok(LinkEvent::added(ETH0)),
                Err(ListenerError::Netlink {
                    message: "transient".to_string(),
                }),
                Ok(LinkEvent::new(LinkEventKind::Added, ETH0, 0)),
            ],
        };

        let result = monitor
            .run(listener.into_stream(), std::future::pending())
            .await;

        assert!(matches!(result, Err(ListenerError::Stopped)));
        assert_eq!(monitor.sink().titles(), ["eth0 Disconnected"]);
    }

    #[tokio::test]
    async fn shutdown_ends_loop_cleanly() {
        let mut monitor = monitor(MockInspector::new());

        let result = monitor
            .run(tokio_stream::pending(), std::future::ready(()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn shutdown_takes_priority_over_pending_events() {
        let inspector = MockInspector::new().with_link(ETH0, "eth0", LinkSignals::ready());
        let mut monitor = monitor(inspector);

        let listener = MockListener {
            events: vec![Ok(LinkEvent::added(ETH0))],
        };
        let result = monitor
            .run(listener.into_stream(), std::future::ready(()))
            .await;

        assert!(result.is_ok());
        assert!(monitor.sink().sent().is_empty());
    }
}
