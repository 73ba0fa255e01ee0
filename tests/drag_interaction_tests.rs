use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use time_slider::api::DragEmission;
use time_slider::core::{DisplayUnit, HandleId, SelectionGranularity, SelectionResult};
use time_slider::extensions::FnListener;
use time_slider::interaction::{GestureState, PointerInput, PointerTarget};
use time_slider::{SliderConfig, SliderEngine};

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid date")
}

type Recorded = Rc<RefCell<Vec<SelectionResult>>>;

fn record(engine: &mut SliderEngine) -> Recorded {
    let recorded: Recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&recorded);
    engine
        .register_listener(Box::new(FnListener::new("recorder", move |result, _| {
            sink.borrow_mut().push(result);
        })))
        .expect("register recorder");
    recorded
}

fn points(recorded: &Recorded) -> Vec<DateTime<Utc>> {
    recorded
        .borrow()
        .iter()
        .filter_map(|result| result.point())
        .collect()
}

/// Ten-day point slider, 100 px per day, handle mounted at Jan 6 (x = 500).
fn ten_day_engine(emission: DragEmission) -> SliderEngine {
    let config = SliderConfig::new(utc(2024, 1, 1, 0), utc(2024, 1, 11, 0))
        .with_display_unit(DisplayUnit::Day)
        .with_container_width_px(1_000.0)
        .with_drag_emission(emission);
    SliderEngine::new(config).expect("engine init")
}

fn thirty_day_engine(free_selection: bool) -> SliderEngine {
    let config = SliderConfig::new(utc(2024, 1, 1, 0), utc(2024, 1, 31, 0))
        .with_granularity(SelectionGranularity::Hour)
        .with_display_unit(DisplayUnit::Day)
        .with_container_width_px(3_000.0)
        .with_free_selection_on_track_click(free_selection);
    SliderEngine::new(config).expect("engine init")
}

#[test]
fn track_click_snaps_to_nearest_tick() {
    let mut engine = thirty_day_engine(false);
    let recorded = record(&mut engine);

    assert_eq!(engine.hit_test(1_030.0), PointerTarget::Track);
    engine.pointer_down(PointerInput::mouse(1_030.0), PointerTarget::Track);
    assert_eq!(engine.gesture_state(), GestureState::TrackPressed);
    engine.pointer_up(PointerInput::mouse(1_030.0));
    assert_eq!(points(&recorded), vec![utc(2024, 1, 11, 0)]);

    engine.track_click(1_070.0);
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 1, 12, 0)));
    assert_eq!(engine.gesture_state(), GestureState::Idle);
}

#[test]
fn free_track_click_snaps_to_granularity_only() {
    let mut engine = thirty_day_engine(true);
    let result = engine.track_click(1_030.0).expect("click commits");
    assert_eq!(result.point(), Some(utc(2024, 1, 11, 7)));
}

#[test]
fn track_press_dragged_beyond_slop_is_not_a_click() {
    let mut engine = thirty_day_engine(false);
    let recorded = record(&mut engine);

    engine.pointer_down(PointerInput::mouse(1_030.0), PointerTarget::Track);
    engine.pointer_move(PointerInput::mouse(1_060.0));
    assert_eq!(engine.pointer_up(PointerInput::mouse(1_060.0)), None);
    assert!(recorded.borrow().is_empty());
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 1, 16, 0)));
}

#[test]
fn on_move_emission_commits_changed_positions_and_release() {
    let mut engine = ten_day_engine(DragEmission::OnMove);
    let recorded = record(&mut engine);

    engine.pointer_down(PointerInput::mouse(500.0), PointerTarget::Handle(HandleId::Point));
    engine.pointer_move(PointerInput::mouse(610.0));
    assert_eq!(points(&recorded), vec![utc(2024, 1, 7, 0)]);

    // Same snapped position, nothing new.
    engine.pointer_move(PointerInput::mouse(620.0));
    assert_eq!(recorded.borrow().len(), 1);

    engine.pointer_up(PointerInput::mouse(620.0));
    assert_eq!(points(&recorded), vec![utc(2024, 1, 7, 0), utc(2024, 1, 7, 0)]);
}

#[test]
fn on_release_emission_commits_once() {
    let mut engine = ten_day_engine(DragEmission::OnRelease);
    let recorded = record(&mut engine);

    engine.pointer_down(PointerInput::mouse(500.0), PointerTarget::Handle(HandleId::Point));
    assert_eq!(engine.gesture_state(), GestureState::Dragging(HandleId::Point));
    engine.pointer_move(PointerInput::mouse(610.0));
    engine.pointer_move(PointerInput::mouse(720.0));
    assert!(recorded.borrow().is_empty());
    assert!(engine.handle(HandleId::Point).expect("point").dragging);

    engine.pointer_up(PointerInput::mouse(720.0));
    assert_eq!(points(&recorded), vec![utc(2024, 1, 8, 0)]);
    assert!(!engine.handle(HandleId::Point).expect("point").dragging);
}

#[test]
fn cancel_keeps_position_without_emitting() {
    let mut engine = ten_day_engine(DragEmission::OnRelease);
    let recorded = record(&mut engine);

    engine.pointer_down(PointerInput::mouse(500.0), PointerTarget::Handle(HandleId::Point));
    engine.pointer_move(PointerInput::mouse(720.0));
    engine.pointer_cancel(PointerInput::mouse(720.0));

    assert!(recorded.borrow().is_empty());
    assert_eq!(engine.gesture_state(), GestureState::Idle);
    assert_eq!(engine.committed_result(), None);
    approx::assert_relative_eq!(
        engine.handle(HandleId::Point).expect("point").position,
        70.0,
        epsilon = 1e-9
    );
    // A late release from the same pointer does nothing.
    assert_eq!(engine.pointer_up(PointerInput::mouse(720.0)), None);
}

#[test]
fn cancel_from_foreign_pointer_is_ignored() {
    let mut engine = ten_day_engine(DragEmission::OnRelease);
    engine.pointer_down(PointerInput::touch(7, 500.0), PointerTarget::Handle(HandleId::Point));
    engine.pointer_cancel(PointerInput::touch(8, 500.0));
    assert_eq!(engine.gesture_state(), GestureState::Dragging(HandleId::Point));
}

#[test]
fn second_touch_cancels_drag() {
    let mut engine = ten_day_engine(DragEmission::OnRelease);
    let recorded = record(&mut engine);

    engine.pointer_down(PointerInput::touch(1, 500.0), PointerTarget::Handle(HandleId::Point));
    engine.pointer_move(PointerInput::touch(1, 610.0));
    engine.pointer_down(PointerInput::touch(2, 900.0), PointerTarget::Track);

    assert_eq!(engine.gesture_state(), GestureState::Idle);
    assert_eq!(engine.pointer_up(PointerInput::touch(1, 610.0)), None);
    assert!(recorded.borrow().is_empty());
}

#[test]
fn moves_from_other_pointers_are_ignored() {
    let mut engine = ten_day_engine(DragEmission::OnRelease);
    engine.pointer_down(PointerInput::touch(1, 500.0), PointerTarget::Handle(HandleId::Point));
    engine.pointer_move(PointerInput::touch(2, 900.0));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 1, 6, 0)));
}

#[test]
fn hit_test_prefers_handles_within_radius() {
    let engine = ten_day_engine(DragEmission::OnRelease);
    assert_eq!(engine.hit_test(505.0), PointerTarget::Handle(HandleId::Point));
    assert_eq!(engine.hit_test(700.0), PointerTarget::Track);
}

#[test]
fn pointer_percent_accounts_for_scroll() {
    let config = SliderConfig::new(utc(2024, 1, 1, 0), utc(2024, 1, 11, 0))
        .with_container_width_px(2_000.0)
        .with_viewport_width_px(500.0);
    let mut engine = SliderEngine::new(config).expect("engine init");
    engine.sync_scroll_left(1_000.0);
    approx::assert_relative_eq!(engine.pointer_percent(250.0), 62.5, epsilon = 1e-9);
}

#[test]
fn imperative_move_during_drag_rebases_tracking() {
    let mut engine = ten_day_engine(DragEmission::OnRelease);

    engine.pointer_down(PointerInput::mouse(500.0), PointerTarget::Handle(HandleId::Point));
    engine.pointer_move(PointerInput::mouse(600.0));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 1, 7, 0)));

    engine.set_date_time(utc(2024, 1, 3, 0), None);
    engine.pointer_move(PointerInput::mouse(610.0));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 1, 3, 0)));
    engine.pointer_move(PointerInput::mouse(700.0));
    assert_eq!(engine.instant_of(HandleId::Point), Some(utc(2024, 1, 4, 0)));

    let released = engine.pointer_up(PointerInput::mouse(700.0)).expect("commit");
    assert_eq!(released.point(), Some(utc(2024, 1, 4, 0)));
}

#[test]
fn non_finite_pointer_input_is_ignored() {
    let mut engine = ten_day_engine(DragEmission::OnRelease);
    engine.pointer_down(PointerInput::mouse(f64::NAN), PointerTarget::Track);
    assert_eq!(engine.gesture_state(), GestureState::Idle);
    assert_eq!(engine.track_click(f64::INFINITY), None);
}

#[test]
fn drag_focuses_the_grabbed_handle() {
    let mut engine = ten_day_engine(DragEmission::OnRelease);
    engine.pointer_down(PointerInput::mouse(500.0), PointerTarget::Handle(HandleId::Point));
    assert!(engine.handle(HandleId::Point).expect("point").focused);
}
