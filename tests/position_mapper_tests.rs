use chrono::{DateTime, TimeZone, Utc};
use time_slider::SliderError;
use time_slider::core::{
    SelectionGranularity, TimeAxis, instant_from_percent, percent_from_instant,
};

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid date")
}

fn year_axis(granularity: SelectionGranularity) -> TimeAxis {
    TimeAxis::new(utc(2024, 1, 1, 0, 0), utc(2024, 12, 31, 0, 0), granularity).expect("valid axis")
}

#[test]
fn mid_june_roundtrips_through_percent() {
    let axis = year_axis(SelectionGranularity::Day);
    let june = utc(2024, 6, 15, 0, 0);

    let percent = percent_from_instant(june, axis);
    assert_eq!(instant_from_percent(percent, axis), june);
}

#[test]
fn percent_outside_bounds_is_clamped_before_interpolation() {
    let axis = year_axis(SelectionGranularity::Hour);
    assert_eq!(instant_from_percent(-25.0, axis), axis.start());
    assert_eq!(instant_from_percent(140.0, axis), axis.end());
    assert_eq!(instant_from_percent(f64::NAN, axis), axis.start());
}

#[test]
fn instant_outside_axis_maps_to_edge_percent() {
    let axis = year_axis(SelectionGranularity::Day);
    assert_eq!(percent_from_instant(utc(2023, 5, 1, 0, 0), axis), 0.0);
    assert_eq!(percent_from_instant(utc(2025, 2, 15, 0, 0), axis), 100.0);
}

#[test]
fn interpolation_rounds_to_nearest_granularity_step() {
    let axis = TimeAxis::new(
        utc(2024, 1, 1, 0, 0),
        utc(2024, 1, 2, 0, 0),
        SelectionGranularity::Hour,
    )
    .expect("valid axis");

    // 10h20m and 10h40m.
    assert_eq!(
        instant_from_percent(620.0 / 1440.0 * 100.0, axis),
        utc(2024, 1, 1, 10, 0)
    );
    assert_eq!(
        instant_from_percent(640.0 / 1440.0 * 100.0, axis),
        utc(2024, 1, 1, 11, 0)
    );
    // Exactly 10h30m goes to the later hour.
    assert_eq!(
        instant_from_percent(630.0 / 1440.0 * 100.0, axis),
        utc(2024, 1, 1, 11, 0)
    );
}

#[test]
fn minute_granularity_keeps_minutes() {
    let axis = TimeAxis::new(
        utc(2024, 3, 10, 8, 0),
        utc(2024, 3, 10, 9, 0),
        SelectionGranularity::Minute,
    )
    .expect("valid axis");
    assert_eq!(instant_from_percent(25.0, axis), utc(2024, 3, 10, 8, 15));
}

#[test]
fn inverted_or_empty_axis_is_a_configuration_error() {
    let start = utc(2024, 1, 1, 0, 0);
    let err = TimeAxis::new(start, start, SelectionGranularity::Day)
        .expect_err("empty axis must fail");
    assert!(matches!(err, SliderError::InvalidAxis { .. }));

    let err = TimeAxis::new(utc(2025, 1, 1, 0, 0), start, SelectionGranularity::Day)
        .expect_err("inverted axis must fail");
    assert!(matches!(err, SliderError::InvalidAxis { .. }));
}
