use chrono::{DateTime, TimeZone, Utc};
use time_slider::core::{DisplayUnit, HandleId, SelectionTopology};
use time_slider::interaction::{FocusTarget, PointerInput, PointerTarget, SliderKey};
use time_slider::{SliderConfig, SliderEngine};

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn year_config() -> SliderConfig {
    SliderConfig::new(utc(2024, 1, 1), utc(2024, 12, 31)).with_display_unit(DisplayUnit::Month)
}

#[test]
fn keys_step_by_granularity_and_display_unit() {
    let mut engine =
        SliderEngine::new(year_config().with_initial_point(utc(2024, 3, 31))).expect("engine");
    assert!(engine.focus_handle(HandleId::Point));

    assert!(engine.key_down(SliderKey::PageDown));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 2, 29)));

    assert!(engine.key_down(SliderKey::ArrowLeft));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 2, 28)));

    assert!(engine.key_down(SliderKey::ArrowUp));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 2, 29)));

    assert!(engine.key_down(SliderKey::End));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 12, 31)));

    assert!(engine.key_down(SliderKey::ArrowRight));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 12, 31)));

    assert!(engine.key_down(SliderKey::Home));
    assert!(engine.key_down(SliderKey::PageUp));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 2, 1)));
    assert_eq!(
        engine.committed_result().and_then(|result| result.point()),
        Some(utc(2024, 2, 1))
    );
}

#[test]
fn keys_without_focus_are_not_consumed() {
    let mut engine = SliderEngine::new(year_config()).expect("engine");
    let before = engine.current_result();
    assert!(!engine.key_down(SliderKey::ArrowRight));
    assert_eq!(engine.current_result(), before);
    assert_eq!(engine.committed_result(), None);
}

#[test]
fn tab_order_runs_start_end_then_unit_control() {
    let config = year_config()
        .with_topology(SelectionTopology::Range)
        .with_display_unit_control(true);
    let mut engine = SliderEngine::new(config).expect("engine");

    assert!(engine.key_down(SliderKey::Tab { shift: false }));
    assert_eq!(engine.focused(), Some(FocusTarget::Handle(HandleId::Start)));
    assert!(engine.key_down(SliderKey::Tab { shift: false }));
    assert_eq!(engine.focused(), Some(FocusTarget::Handle(HandleId::End)));
    assert!(engine.key_down(SliderKey::Tab { shift: false }));
    assert_eq!(engine.focused(), Some(FocusTarget::DisplayUnitControl));

    assert!(!engine.key_down(SliderKey::Tab { shift: false }));
    assert_eq!(engine.focused(), None);

    assert!(engine.key_down(SliderKey::Tab { shift: true }));
    assert_eq!(engine.focused(), Some(FocusTarget::DisplayUnitControl));
    assert!(engine.key_down(SliderKey::Tab { shift: true }));
    assert!(engine.key_down(SliderKey::Tab { shift: true }));
    assert_eq!(engine.focused(), Some(FocusTarget::Handle(HandleId::Start)));
    assert!(!engine.key_down(SliderKey::Tab { shift: true }));
}

#[test]
fn combined_tab_order_ends_on_point() {
    let config = year_config().with_topology(SelectionTopology::Combined);
    let mut engine = SliderEngine::new(config).expect("engine");
    engine.key_down(SliderKey::Tab { shift: true });
    assert_eq!(engine.focused(), Some(FocusTarget::Handle(HandleId::Point)));
    assert!(engine.handle(HandleId::Point).expect("point").focused);
    assert!(!engine.handle(HandleId::Start).expect("start").focused);
}

#[test]
fn focused_start_stops_at_end() {
    let config = year_config()
        .with_topology(SelectionTopology::Range)
        .with_initial_range(utc(2024, 2, 1), utc(2024, 3, 1));
    let mut engine = SliderEngine::new(config).expect("engine");
    engine.focus_handle(HandleId::Start);
    engine.key_down(SliderKey::End);
    assert_eq!(engine.instant_of(HandleId::Start), Some(utc(2024, 3, 1)));
    engine.key_down(SliderKey::PageUp);
    assert_eq!(engine.instant_of(HandleId::Start), Some(utc(2024, 3, 1)));
}

#[test]
fn display_unit_control_cycles_units() {
    let mut engine =
        SliderEngine::new(year_config().with_display_unit_control(true)).expect("engine");
    assert!(engine.focus_target(FocusTarget::DisplayUnitControl));

    assert!(engine.key_down(SliderKey::ArrowRight));
    assert_eq!(engine.display_unit(), DisplayUnit::Year);
    assert!(engine.key_down(SliderKey::ArrowRight));
    assert_eq!(engine.display_unit(), DisplayUnit::Year);
    assert!(engine.key_down(SliderKey::Home));
    assert_eq!(engine.display_unit(), DisplayUnit::Day);
    assert!(engine.key_down(SliderKey::ArrowUp));
    assert_eq!(engine.display_unit(), DisplayUnit::Month);
}

#[test]
fn unit_control_is_absent_unless_enabled() {
    let mut engine = SliderEngine::new(year_config()).expect("engine");
    assert!(!engine.focus_target(FocusTarget::DisplayUnitControl));
    assert_eq!(engine.focused(), None);
}

#[test]
fn keys_during_drag_do_not_move_handles() {
    let config = SliderConfig::new(utc(2024, 1, 1), utc(2024, 1, 11)).with_container_width_px(1_000.0);
    let mut engine = SliderEngine::new(config).expect("engine");
    engine.pointer_down(PointerInput::mouse(500.0), PointerTarget::Handle(HandleId::Point));
    assert!(engine.key_down(SliderKey::ArrowRight));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 1, 6)));
}

#[test]
fn blur_clears_handle_focus() {
    let mut engine = SliderEngine::new(year_config()).expect("engine");
    engine.focus_handle(HandleId::Point);
    engine.blur();
    assert_eq!(engine.focused(), None);
    assert!(!engine.handle(HandleId::Point).expect("point").focused);
}

#[test]
fn key_names_resolve() {
    assert_eq!(SliderKey::from_key_name("PageDown", false), Some(SliderKey::PageDown));
    assert_eq!(
        SliderKey::from_key_name("Tab", true),
        Some(SliderKey::Tab { shift: true })
    );
    assert_eq!(SliderKey::from_key_name("Escape", false), None);
}
