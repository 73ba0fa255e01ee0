use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use time_slider::api::{InitialSelection, RangeGap, SelectionStateMachine};
use time_slider::core::{DisplayUnit, HandleId, SelectionGranularity, SelectionTopology, TimeAxis};

fn year_axis(granularity: SelectionGranularity) -> TimeAxis {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("start");
    let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).single().expect("end");
    TimeAxis::new(start, end, granularity).expect("valid axis")
}

fn gap_holds(machine: &SelectionStateMachine) -> bool {
    let start = machine.instant_of(HandleId::Start).expect("start");
    let end = machine.instant_of(HandleId::End).expect("end");
    machine.gap().holds(start, end)
}

// Gaps that always fit inside a single 2024 axis.
fn fitting_gap() -> impl Strategy<Value = RangeGap> {
    prop_oneof![
        (0u32..=11).prop_map(|units| RangeGap::new(units, DisplayUnit::Month)),
        (0u32..=300).prop_map(|units| RangeGap::new(units, DisplayUnit::Day)),
    ]
}

proptest! {
    #[test]
    fn range_moves_never_break_ordering_or_gap(
        gap in fitting_gap(),
        hourly in any::<bool>(),
        moves in proptest::collection::vec((any::<bool>(), -20.0f64..120.0), 1..24)
    ) {
        let granularity = if hourly { SelectionGranularity::Hour } else { SelectionGranularity::Day };
        let mut machine = SelectionStateMachine::new(
            year_axis(granularity),
            SelectionTopology::Range,
            InitialSelection::default(),
            gap,
        );
        prop_assert!(gap_holds(&machine));

        for (move_start, candidate) in moves {
            let handle = if move_start { HandleId::Start } else { HandleId::End };
            let position = machine.propose_move(handle, candidate).expect("range handle");
            prop_assert!((0.0..=100.0).contains(&position));
            prop_assert!(gap_holds(&machine));

            let range = machine.commit().range().expect("range result");
            prop_assert!(range.start <= range.end);
        }
    }

    #[test]
    fn changing_gap_keeps_handles_inside_axis(
        first_gap in fitting_gap(),
        second_gap in fitting_gap(),
        start in 0.0f64..100.0,
        end in 0.0f64..100.0
    ) {
        let mut machine = SelectionStateMachine::new(
            year_axis(SelectionGranularity::Day),
            SelectionTopology::Combined,
            InitialSelection::default(),
            first_gap,
        );
        machine.propose_move(HandleId::End, end);
        machine.propose_move(HandleId::Start, start);
        machine.set_gap(second_gap);

        prop_assert!(gap_holds(&machine));
        for handle in machine.handles() {
            prop_assert!((0.0..=100.0).contains(&handle.position));
        }
    }
}
