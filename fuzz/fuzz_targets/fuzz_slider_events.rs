#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use twinrange_core::Handle;
use twinrange_core::event::{
    Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind, TouchEvent, TouchPhase,
    TouchPoint,
};
use twinrange_core::geometry::{Orientation, Rect};
use twinrange_widgets::{HandlePair, RangeDomain, RangeSlider, SliderOptions, Target, TrackGeometry};

#[derive(Debug, Arbitrary)]
enum FuzzTarget {
    Min,
    Max,
    Track,
    LabelMin,
    Document,
}

#[derive(Debug, Arbitrary)]
enum FuzzInput {
    MouseDown(f32),
    MouseDrag(f32),
    MouseUp,
    Touch { phase: u8, id: u8, x: f32 },
    Key(u8),
    Char(char),
    Focus(bool),
}

#[derive(Debug, Arbitrary)]
struct FuzzCase {
    fixed: Option<Vec<i16>>,
    min: i16,
    span: u8,
    step: u8,
    allow_push: bool,
    editable: bool,
    steps: Vec<(FuzzInput, FuzzTarget)>,
}

fn to_target(t: &FuzzTarget) -> Target {
    match t {
        FuzzTarget::Min => Target::Handle(Handle::Min),
        FuzzTarget::Max => Target::Handle(Handle::Max),
        FuzzTarget::Track => Target::Track,
        FuzzTarget::LabelMin => Target::Label(Handle::Min),
        FuzzTarget::Document => Target::Document,
    }
}

fn to_event(input: &FuzzInput) -> Event {
    match *input {
        FuzzInput::MouseDown(x) => Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            x,
            5.0,
        )),
        FuzzInput::MouseDrag(x) => Event::Mouse(MouseEvent::new(
            MouseEventKind::Drag(MouseButton::Left),
            x,
            5.0,
        )),
        FuzzInput::MouseUp => {
            Event::Mouse(MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 0.0, 5.0))
        }
        FuzzInput::Touch { phase, id, x } => {
            let phase = match phase % 4 {
                0 => TouchPhase::Start,
                1 => TouchPhase::Move,
                2 => TouchPhase::End,
                _ => TouchPhase::Cancel,
            };
            Event::Touch(TouchEvent::single(
                phase,
                TouchPoint::new(u64::from(id % 4), x, 5.0),
            ))
        }
        FuzzInput::Key(k) => {
            let code = match k % 9 {
                0 => KeyCode::Home,
                1 => KeyCode::End,
                2 => KeyCode::Left,
                3 => KeyCode::Right,
                4 => KeyCode::Up,
                5 => KeyCode::Down,
                6 => KeyCode::Tab,
                7 => KeyCode::Enter,
                _ => KeyCode::Escape,
            };
            Event::Key(KeyEvent::new(code))
        }
        FuzzInput::Char(c) => Event::Key(KeyEvent::new(KeyCode::Char(c))),
        FuzzInput::Focus(f) => Event::Focus(f),
    }
}

fuzz_target!(|case: FuzzCase| {
    let domain = match case.fixed {
        Some(values) => RangeDomain::discrete(values.into_iter().map(f64::from).collect::<Vec<_>>()),
        None => {
            let min = f64::from(case.min);
            RangeDomain::continuous(
                min,
                min + f64::from(case.span),
                f64::from(case.step.max(1)) / 4.0,
            )
        }
    };
    let valid = domain.validate().is_empty();
    let mut slider = RangeSlider::new(
        domain,
        HandlePair::new(f64::MIN, f64::MAX),
        SliderOptions::default()
            .with_allow_push(case.allow_push)
            .with_editable(case.editable),
    );
    slider.set_track(TrackGeometry::new(
        Rect::new(0.0, 0.0, 300.0, 10.0),
        Orientation::Horizontal,
    ));

    for (input, target) in case.steps.iter().take(256) {
        let result = slider.handle_event(&to_event(input), to_target(target));
        // Ordering only means something for a usable domain.
        if valid {
            if let Some(pair) = result.changed {
                assert!(pair.is_ordered(), "committed crossed pair {pair}");
            }
            assert!(slider.value().is_ordered(), "stored crossed pair");
            let pct = slider.percentages();
            assert!((0.0..=100.0).contains(&pct.min) && (0.0..=100.0).contains(&pct.max));
        }
    }
});
