use tracing::debug;

use crate::heuristics::types::{HeuristicThresholds, WindowProperties};
use crate::window::{WindowBounds, WindowRecord, WindowScope, WindowServer, windows_owned_by};

/// Window parked far outside any display or collapsed below a visible size.
pub fn is_geometry_implausible(bounds: &WindowBounds, thresholds: &HeuristicThresholds) -> bool {
    bounds.x < thresholds.offscreen_min
        || bounds.y < thresholds.offscreen_min
        || bounds.x > thresholds.offscreen_max
        || bounds.y > thresholds.offscreen_max
        || bounds.width < thresholds.min_dimension
        || bounds.height < thresholds.min_dimension
}

/// Evasion contribution of one window: +1 for implausible geometry,
/// +1 for opting out of capture. A single window can score 2.
pub fn evasion_score(window: &WindowRecord, thresholds: &HeuristicThresholds) -> u32 {
    let geometry = window
        .bounds
        .is_some_and(|bounds| is_geometry_implausible(&bounds, thresholds));
    u32::from(geometry) + u32::from(!window.is_capturable())
}

pub fn is_elevated(window: &WindowRecord, thresholds: &HeuristicThresholds) -> bool {
    window.layer > thresholds.normal_layer_threshold
}

/// Sum of [`evasion_score`] over `windows`. A weighted score, not a window count.
pub fn screen_evasion_score(
    windows: impl IntoIterator<Item = WindowRecord>,
    thresholds: &HeuristicThresholds,
) -> u32 {
    windows
        .into_iter()
        .map(|window| evasion_score(&window, thresholds))
        .sum()
}

pub fn elevated_layer_count(
    windows: impl IntoIterator<Item = WindowRecord>,
    thresholds: &HeuristicThresholds,
) -> u32 {
    windows
        .into_iter()
        .filter(|window| is_elevated(window, thresholds))
        .count() as u32
}

pub fn sharing_disabled_count(windows: impl IntoIterator<Item = WindowRecord>) -> u32 {
    windows
        .into_iter()
        .filter(|window| !window.is_capturable())
        .count() as u32
}

/// Composite flag: 1 iff either signal fired.
pub fn suspicious_window_count(screen_evasion_count: u32, elevated_layer_count: u32) -> u8 {
    u8::from(screen_evasion_count > 0 || elevated_layer_count > 0)
}

/// Screen evasion score for `pid` over all windows. Zero for pid <= 0.
pub fn detect_screen_evasion(
    server: &dyn WindowServer,
    pid: i32,
    thresholds: &HeuristicThresholds,
) -> u32 {
    if pid <= 0 {
        return 0;
    }
    screen_evasion_score(windows_owned_by(server, WindowScope::All, pid), thresholds)
}

/// Number of `pid`'s windows above the normal application layer. Zero for pid <= 0.
pub fn detect_elevated_layers(
    server: &dyn WindowServer,
    pid: i32,
    thresholds: &HeuristicThresholds,
) -> u32 {
    if pid <= 0 {
        return 0;
    }
    elevated_layer_count(windows_owned_by(server, WindowScope::All, pid), thresholds)
}

/// Full window summary for `pid`.
///
/// One on-screen scan for the window count and one full scan feeding the
/// remaining metrics.
pub fn window_properties(
    server: &dyn WindowServer,
    pid: i32,
    thresholds: &HeuristicThresholds,
) -> WindowProperties {
    let mut properties = WindowProperties {
        window_count: crate::window::window_count(server, pid),
        ..WindowProperties::default()
    };

    if pid > 0 {
        for window in windows_owned_by(server, WindowScope::All, pid) {
            properties.suspicious_pattern_count += evasion_score(&window, thresholds);
            properties.elevated_layer_count += u32::from(is_elevated(&window, thresholds));
            properties.sharing_state_disabled_count += u32::from(!window.is_capturable());
        }
    }

    debug!(
        event = "core.heuristics.properties_computed",
        pid = pid,
        window_count = properties.window_count,
        sharing_disabled = properties.sharing_state_disabled_count,
        elevated = properties.elevated_layer_count,
        suspicious_patterns = properties.suspicious_pattern_count
    );

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{SharingState, StaticWindowServer};

    const P: i32 = 4242;

    fn normal() -> WindowBounds {
        WindowBounds::new(100.0, 100.0, 800.0, 600.0)
    }

    fn thresholds() -> HeuristicThresholds {
        HeuristicThresholds::default()
    }

    #[test]
    fn test_offscreen_window_scores_one() {
        let server = StaticWindowServer::new().with_window(WindowRecord::new(
            P,
            WindowBounds::new(-2000.0, -2000.0, 100.0, 100.0),
        ));
        assert_eq!(detect_screen_evasion(&server, P, &thresholds()), 1);
    }

    #[test]
    fn test_offscreen_and_uncapturable_window_scores_two() {
        let server = StaticWindowServer::new().with_window(
            WindowRecord::new(P, WindowBounds::new(-2000.0, -2000.0, 100.0, 100.0))
                .with_sharing_state(SharingState::NotCapturable),
        );
        assert_eq!(detect_screen_evasion(&server, P, &thresholds()), 2);
    }

    #[test]
    fn test_geometry_rule_edges() {
        let t = thresholds();
        assert!(!is_geometry_implausible(&WindowBounds::new(-1000.0, -1000.0, 1.0, 1.0), &t));
        assert!(!is_geometry_implausible(&WindowBounds::new(10000.0, 10000.0, 5.0, 5.0), &t));
        assert!(is_geometry_implausible(&WindowBounds::new(-1000.5, 0.0, 50.0, 50.0), &t));
        assert!(is_geometry_implausible(&WindowBounds::new(0.0, 10000.5, 50.0, 50.0), &t));
        assert!(is_geometry_implausible(&WindowBounds::new(0.0, 0.0, 0.5, 50.0), &t));
        assert!(is_geometry_implausible(&WindowBounds::new(0.0, 0.0, 50.0, 0.0), &t));
    }

    #[test]
    fn test_missing_bounds_skips_geometry_rule() {
        let t = thresholds();
        let window = WindowRecord::new(P, normal()).without_bounds();
        assert_eq!(evasion_score(&window, &t), 0);

        let hidden = window.with_sharing_state(SharingState::NotCapturable);
        assert_eq!(evasion_score(&hidden, &t), 1);
    }

    #[test]
    fn test_evasion_scans_all_scope_and_filters_owner() {
        let server = StaticWindowServer::new()
            .with_hidden_window(WindowRecord::new(P, WindowBounds::new(0.0, 0.0, 0.0, 0.0)))
            .with_window(
                WindowRecord::new(P + 1, normal()).with_sharing_state(SharingState::NotCapturable),
            )
            .with_window(WindowRecord::new(P, normal()));

        assert_eq!(detect_screen_evasion(&server, P, &thresholds()), 1);
        assert_eq!(detect_screen_evasion(&server, P + 1, &thresholds()), 1);
        assert_eq!(detect_screen_evasion(&server, 0, &thresholds()), 0);
    }

    #[test]
    fn test_elevated_layers() {
        let server = StaticWindowServer::new()
            .with_window(WindowRecord::new(P, normal()).with_layer(3))
            .with_window(WindowRecord::new(P, normal()).with_layer(1))
            .with_window(WindowRecord::new(P, normal()).with_layer(2))
            .with_hidden_window(WindowRecord::new(P, normal()).with_layer(25));

        assert_eq!(detect_elevated_layers(&server, P, &thresholds()), 2);
        assert_eq!(detect_elevated_layers(&server, -1, &thresholds()), 0);
    }

    #[test]
    fn test_layer_one_is_not_elevated() {
        let server =
            StaticWindowServer::new().with_window(WindowRecord::new(P, normal()).with_layer(1));
        assert_eq!(detect_elevated_layers(&server, P, &thresholds()), 0);
    }

    #[test]
    fn test_custom_layer_threshold() {
        let t = HeuristicThresholds {
            normal_layer_threshold: 8,
            ..HeuristicThresholds::default()
        };
        let window = WindowRecord::new(P, normal()).with_layer(3);
        assert!(!is_elevated(&window, &t));
        assert!(is_elevated(&window.with_layer(9), &t));
    }

    #[test]
    fn test_suspicious_window_count_policy() {
        assert_eq!(suspicious_window_count(0, 0), 0);
        assert_eq!(suspicious_window_count(1, 0), 1);
        assert_eq!(suspicious_window_count(0, 1), 1);
        assert_eq!(suspicious_window_count(6, 4), 1);
    }

    #[test]
    fn test_window_properties_matches_individual_detectors() {
        let server = StaticWindowServer::new()
            .with_window(WindowRecord::new(P, normal()))
            .with_window(
                WindowRecord::new(P, WindowBounds::new(20000.0, 0.0, 300.0, 300.0))
                    .with_sharing_state(SharingState::NotCapturable)
                    .with_layer(5),
            )
            .with_hidden_window(
                WindowRecord::new(P, normal()).with_sharing_state(SharingState::NotCapturable),
            )
            .with_window(WindowRecord::new(P + 7, normal()).with_layer(10));

        let t = thresholds();
        let properties = window_properties(&server, P, &t);

        assert_eq!(properties.window_count, 2);
        assert_eq!(properties.sharing_state_disabled_count, 2);
        assert_eq!(properties.elevated_layer_count, 1);
        assert_eq!(properties.suspicious_pattern_count, 3);

        assert_eq!(
            properties.suspicious_pattern_count,
            detect_screen_evasion(&server, P, &t)
        );
        assert_eq!(
            properties.elevated_layer_count,
            detect_elevated_layers(&server, P, &t)
        );
        assert_eq!(
            properties.window_count,
            crate::window::window_count(&server, P)
        );
    }

    #[test]
    fn test_window_properties_no_windows() {
        let server = StaticWindowServer::new();
        assert_eq!(
            window_properties(&server, P, &thresholds()),
            WindowProperties::default()
        );
    }

    #[test]
    fn test_pure_scorers_over_slices() {
        let t = thresholds();
        let windows = vec![
            WindowRecord::new(P, WindowBounds::new(0.0, 0.0, 0.0, 0.0))
                .with_sharing_state(SharingState::NotCapturable),
            WindowRecord::new(P, normal()).with_layer(4),
        ];
        assert_eq!(screen_evasion_score(windows.clone(), &t), 2);
        assert_eq!(elevated_layer_count(windows.clone(), &t), 1);
        assert_eq!(sharing_disabled_count(windows), 1);
    }
}
