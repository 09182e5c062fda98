use super::*;
use crate::draw::{Point, StrokeStyle, SvgOptions};
use crate::input::{
    DocumentId, EventKind, InputFamily, MouseEvent, PointerEvent, SurfaceId, Touch, TouchEvent,
};
use crate::stroke::PointGroup;
use futures::executor::block_on;
use std::cell::RefCell;
use std::f64::consts::PI;

const SURFACE: SurfaceId = SurfaceId(1);
const DOC: DocumentId = DocumentId(1);
const OTHER_DOC: DocumentId = DocumentId(2);

fn binding() -> Binding {
    Binding::new(SURFACE, DOC)
}

fn pad_with(options: PadOptions) -> SignaturePad {
    SignaturePad::attached(binding(), SurfaceSize::default(), options).unwrap()
}

fn test_pad() -> SignaturePad {
    pad_with(PadOptions::default())
}

fn pointer(kind: EventKind, x: f64, y: f64, t: i64) -> InputEvent {
    PointerEvent::new(kind, x, y, t).with_pressure(1.0).into()
}

fn surface() -> DispatchTarget {
    DispatchTarget::Surface(SURFACE)
}

/// Draws one stroke through `points`, 20 ms apart, released on the document.
fn draw_stroke(pad: &mut SignaturePad, points: &[(f64, f64)], start: i64) {
    let mut time = start;
    for (i, &(x, y)) in points.iter().enumerate() {
        let kind = if i == 0 {
            EventKind::Down
        } else {
            EventKind::Move
        };
        pad.handle_event(surface(), &pointer(kind, x, y, time));
        time += 20;
    }
    if let Some(&(x, y)) = points.last() {
        pad.handle_event(
            DispatchTarget::Document(DOC),
            &pointer(EventKind::Up, x, y, time),
        );
    }
}

fn wave() -> Vec<(f64, f64)> {
    (0..15)
        .map(|i| {
            let x = 20.0 + i as f64 * 15.0;
            (x, 75.0 + (x / 30.0).sin() * 40.0)
        })
        .collect()
}

fn face() -> Vec<PointGroup> {
    let style = StrokeStyle {
        color: "black".into(),
        dot_size: 1.0,
        min_width: 0.5,
        max_width: 2.5,
        velocity_filter_weight: 0.7,
    };
    let mut outline = PointGroup::new(style.clone());
    outline.points = (0..=24)
        .map(|i| {
            let angle = i as f64 * PI / 12.0;
            Point::new(
                150.0 + 50.0 * angle.cos(),
                75.0 + 50.0 * angle.sin(),
                0.5,
                i * 18,
            )
        })
        .collect();
    let mut left_eye = PointGroup::new(style.clone());
    left_eye.points = vec![Point::new(132.0, 60.0, 0.5, 600)];
    let mut right_eye = PointGroup::new(style);
    right_eye.points = vec![Point::new(168.0, 60.0, 0.5, 900)];
    vec![outline, left_eye, right_eye]
}

fn record(pad: &SignaturePad) -> Rc<RefCell<Vec<StrokeEventKind>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for kind in [
        StrokeEventKind::BeginStroke,
        StrokeEventKind::BeforeUpdateStroke,
        StrokeEventKind::AfterUpdateStroke,
        StrokeEventKind::EndStroke,
    ] {
        let seen = Rc::clone(&seen);
        pad.add_event_listener(kind, move |event| seen.borrow_mut().push(event.kind));
    }
    seen
}

#[test]
fn new_pad_is_empty() {
    let pad = test_pad();
    assert!(pad.is_empty());
    assert!(pad.to_data().is_empty());
    assert!(!pad.surface().has_ink());
}

#[test]
fn zero_filters_are_kept() {
    let options = PadOptions {
        throttle: 0,
        min_distance: 0.0,
        ..PadOptions::default()
    };
    let pad = pad_with(options);
    assert_eq!(pad.options.throttle, 0);
    assert_eq!(pad.options.min_distance, 0.0);
    assert_eq!(pad.options.filter().throttle, 0);
}

#[test]
fn three_downs_draw_three_dots() {
    let mut pad = test_pad();
    for (x, y) in [(50.0, 30.0), (240.0, 30.0), (150.0, 120.0)] {
        assert!(pad.handle_event(surface(), &pointer(EventKind::Down, x, y, 0)));
    }

    let data = pad.to_data();
    assert_eq!(data.len(), 3);
    assert!(data.iter().all(|group| group.points.len() == 1));

    let svg = pad.to_svg(SvgOptions::default());
    assert_eq!(svg.matches("<circle").count(), 3);
    assert!(!svg.contains("<path"));
    assert!(pad.surface().pixel(50, 30).is_some_and(|px| px >> 24 != 0));

    let mut again = test_pad();
    for (x, y) in [(50.0, 30.0), (240.0, 30.0), (150.0, 120.0)] {
        again.handle_event(surface(), &pointer(EventKind::Down, x, y, 0));
    }
    assert_eq!(again.to_svg(SvgOptions::default()), svg);
}

#[test]
fn stroke_notifications_arrive_in_order() {
    let mut pad = test_pad();
    let seen = record(&pad);

    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0));
    assert_eq!(
        *seen.borrow(),
        vec![
            StrokeEventKind::BeginStroke,
            StrokeEventKind::BeforeUpdateStroke,
            StrokeEventKind::AfterUpdateStroke,
        ]
    );

    seen.borrow_mut().clear();
    pad.handle_event(surface(), &pointer(EventKind::Up, 50.0, 30.0, 40));
    assert_eq!(
        *seen.borrow(),
        vec![
            StrokeEventKind::BeforeUpdateStroke,
            StrokeEventKind::AfterUpdateStroke,
            StrokeEventKind::EndStroke,
        ]
    );
}

#[test]
fn notifications_carry_the_input_event() {
    let mut pad = test_pad();
    let detail = Rc::new(RefCell::new(None));
    {
        let detail = Rc::clone(&detail);
        pad.add_event_listener(StrokeEventKind::EndStroke, move |event| {
            *detail.borrow_mut() = Some(event.detail.clone());
        });
    }

    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0));
    assert!(detail.borrow().is_none());

    let up = pointer(EventKind::Up, 50.0, 30.0, 30);
    pad.handle_event(surface(), &up);
    assert_eq!(detail.borrow().as_ref(), Some(&up));
}

#[test]
fn removed_listener_is_not_called() {
    let mut pad = test_pad();
    let calls = Rc::new(RefCell::new(0));
    let id = {
        let calls = Rc::clone(&calls);
        pad.add_event_listener(StrokeEventKind::BeginStroke, move |_| {
            *calls.borrow_mut() += 1;
        })
    };
    assert!(pad.remove_event_listener(id));
    assert!(!pad.remove_event_listener(id));

    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0));
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn cancelled_begin_opens_no_group() {
    let mut pad = test_pad();
    pad.add_event_listener(StrokeEventKind::BeginStroke, |event| {
        assert!(event.is_cancelable());
        event.prevent_default();
    });
    let seen = record(&pad);

    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0));
    assert!(pad.is_empty());
    assert_eq!(*seen.borrow(), vec![StrokeEventKind::BeginStroke]);
    assert!(!pad.handle_event(
        DispatchTarget::Document(DOC),
        &pointer(EventKind::Up, 50.0, 30.0, 10)
    ));
}

#[test]
fn alternate_event_target_receives_notifications() {
    let mut pad = test_pad();
    let shared = EventTarget::new();
    let begun = Rc::new(RefCell::new(false));
    {
        let begun = Rc::clone(&begun);
        shared.add_event_listener(StrokeEventKind::BeginStroke, move |_| {
            *begun.borrow_mut() = true;
        });
    }
    let own = record(&pad);
    pad.set_event_target(Rc::clone(&shared));

    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0));
    assert!(*begun.borrow());
    assert!(own.borrow().is_empty());
    assert!(Rc::ptr_eq(&pad.event_target(), &shared));
}

#[test]
fn release_on_owning_document_ends_stroke() {
    let mut pad = test_pad();
    let seen = record(&pad);

    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0));
    pad.handle_event(surface(), &pointer(EventKind::Move, 240.0, 30.0, 20));

    let up = pointer(EventKind::Up, 150.0, 120.0, 40);
    assert!(!pad.handle_event(DispatchTarget::Document(OTHER_DOC), &up));
    assert!(!seen.borrow().contains(&StrokeEventKind::EndStroke));

    assert!(pad.handle_event(DispatchTarget::Document(DOC), &up));
    assert_eq!(seen.borrow().last(), Some(&StrokeEventKind::EndStroke));
    assert_eq!(pad.to_data()[0].points.len(), 3);
}

#[test]
fn clear_is_idempotent() {
    let blank = test_pad();
    let mut pad = test_pad();
    draw_stroke(&mut pad, &wave(), 0);
    assert!(!pad.is_empty());

    pad.clear();
    pad.clear();
    assert!(pad.is_empty());
    assert!(pad.to_data().is_empty());
    assert_eq!(
        pad.to_svg(SvgOptions::default()),
        blank.to_svg(SvgOptions::default())
    );
    assert_eq!(
        pad.to_data_url(ImageFormat::Png).unwrap(),
        blank.to_data_url(ImageFormat::Png).unwrap()
    );
}

#[test]
fn clear_mid_stroke_drops_the_open_group() {
    let mut pad = test_pad();
    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0));
    pad.clear();
    pad.handle_event(surface(), &pointer(EventKind::Move, 90.0, 30.0, 20));
    assert!(pad.is_empty());
}

#[test]
fn export_import_round_trip() {
    let mut pad = test_pad();
    draw_stroke(&mut pad, &wave(), 0);
    draw_stroke(&mut pad, &[(200.0, 20.0)], 1_000);

    let json = pad.to_json().unwrap();
    let mut restored = pad_with(PadOptions {
        pen_color: "red".into(),
        max_width: 9.0,
        ..PadOptions::default()
    });
    restored.from_json(&json, FromDataOptions::default()).unwrap();

    assert_eq!(restored.to_data(), pad.to_data());
    assert_eq!(
        restored.to_svg(SvgOptions::default()),
        pad.to_svg(SvgOptions::default())
    );
    assert_eq!(
        restored.to_data_url(ImageFormat::Png).unwrap(),
        pad.to_data_url(ImageFormat::Png).unwrap()
    );
}

/// Deterministic xorshift stream of values in `0.0..1.0`.
fn fractions(mut state: u64) -> impl Iterator<Item = f64> {
    std::iter::repeat_with(move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    })
}

#[test]
fn json_round_trip_keeps_sub_pixel_coordinates_exact() {
    let mut noise = fractions(0x9e37_79b9_7f4a_7c15);
    let mut points = vec![Point::new(98.88909244140123, 0.1 + 0.2, 0.5, 0)];
    for time in 1..500 {
        let x = noise.next().unwrap_or(0.0) * 300.0 + noise.next().unwrap_or(0.0);
        let y = noise.next().unwrap_or(0.0) * 150.0 + noise.next().unwrap_or(0.0);
        let pressure = noise.next().unwrap_or(0.0);
        points.push(Point::new(x, y, pressure, time));
    }
    let group = PointGroup {
        style: PadOptions::default().style(),
        points,
    };

    let mut pad = test_pad();
    pad.from_data(vec![group], FromDataOptions::default());
    let json = pad.to_json().unwrap();

    let mut restored = test_pad();
    restored.from_json(&json, FromDataOptions::default()).unwrap();
    assert_eq!(restored.to_data(), pad.to_data());
    assert_eq!(restored.to_json().unwrap(), json);
}

#[test]
fn import_uses_group_styles() {
    let mut first = pad_with(PadOptions {
        dot_size: 1.0,
        ..PadOptions::default()
    });
    first.from_data(face(), FromDataOptions::default());
    let expected = first.to_svg(SvgOptions::default());

    let mut second = test_pad();
    second.options.pen_color = "white".into();
    second.options.dot_size = 2.0;
    second.options.min_width = 5.0;
    second.options.max_width = 10.0;
    second.options.velocity_filter_weight = 0.9;
    second.from_data(face(), FromDataOptions::default());
    assert_eq!(second.to_svg(SvgOptions::default()), expected);
}

#[test]
fn from_data_replaces_or_appends() {
    let mut pad = test_pad();
    pad.from_data(face(), FromDataOptions::default());
    pad.from_data(face()[..1].to_vec(), FromDataOptions::default());
    assert_eq!(pad.to_data().len(), 1);

    pad.from_data(face(), FromDataOptions { clear: false });
    assert_eq!(pad.to_data().len(), 4);
}

#[test]
fn malformed_json_leaves_drawing() {
    let mut pad = test_pad();
    pad.from_data(face(), FromDataOptions::default());
    let err = pad
        .from_json("[{\"color\": 3}]", FromDataOptions::default())
        .unwrap_err();
    assert!(matches!(err, DataError::Json(_)));
    assert_eq!(pad.to_data().len(), 3);
}

#[test]
fn style_changes_apply_to_next_stroke() {
    let mut pad = test_pad();
    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0));
    pad.options.pen_color = "blue".into();
    pad.handle_event(surface(), &pointer(EventKind::Move, 90.0, 30.0, 20));
    pad.handle_event(surface(), &pointer(EventKind::Up, 90.0, 30.0, 40));
    pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 90.0, 60));

    let data = pad.to_data();
    assert_eq!(data[0].style.color, "black");
    assert_eq!(data[1].style.color, "blue");
}

#[test]
fn data_urls_per_format() {
    let mut pad = test_pad();
    pad.from_data(face(), FromDataOptions::default());

    assert!(
        pad.to_data_url(ImageFormat::default())
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
    assert!(
        pad.to_data_url(ImageFormat::Svg(SvgOptions::default()))
            .unwrap()
            .starts_with("data:image/svg+xml;base64,")
    );
    assert!(matches!(
        pad.to_data_url(ImageFormat::Jpeg { quality: 0.9 }),
        Err(ExportError::UnsupportedFormat("image/jpeg"))
    ));
}

#[test]
fn svg_scales_with_device_pixel_ratio() {
    let size = SurfaceSize {
        ratio: 2.0,
        ..SurfaceSize::default()
    };
    let mut pad = SignaturePad::new(size, PadOptions::default()).unwrap();
    pad.from_data(face(), FromDataOptions::default());

    let svg = pad.to_svg(SvgOptions::default());
    assert!(svg.contains(r#"viewBox="0 0 300 150" width="600" height="300""#));
    assert_eq!(pad.surface().pixel_size(), (600, 300));
}

#[test]
fn svg_background_only_on_request() {
    let mut pad = pad_with(PadOptions {
        background_color: "#fcc".into(),
        ..PadOptions::default()
    });
    pad.from_data(face(), FromDataOptions::default());

    let plain = pad.to_svg(SvgOptions::default());
    let filled = pad.to_svg(SvgOptions {
        include_background_color: true,
    });
    assert!(!plain.contains("<rect"));
    assert!(filled.contains(r##"<rect width="100%" height="100%" fill="#fcc"/>"##));
}

#[test]
fn from_data_url_draws_image() {
    let mut source = test_pad();
    draw_stroke(&mut source, &wave(), 0);
    let url = source.to_data_url(ImageFormat::Png).unwrap();

    let mut target = test_pad();
    block_on(target.from_data_url(&url, FromDataUrlOptions::default())).unwrap();
    assert!(target.surface().has_ink());
    assert!(target.is_empty());
}

#[test]
fn from_data_url_failure_draws_nothing() {
    let mut target = test_pad();
    let result = block_on(target.from_data_url(
        "data:image/png;base64,aGVsbG8=",
        FromDataUrlOptions::default(),
    ));
    assert!(matches!(result, Err(ImageDecodeError::Png(_))));
    assert!(!target.surface().has_ink());
}

#[test]
fn resize_redraws_drawing() {
    let mut pad = test_pad();
    draw_stroke(&mut pad, &wave(), 0);
    pad.resize(SurfaceSize {
        width: 400.0,
        height: 200.0,
        ratio: 1.0,
    })
    .unwrap();

    assert_eq!(pad.surface().pixel_size(), (400, 200));
    assert!(pad.surface().has_ink());
    assert_eq!(pad.to_data().len(), 1);
}

#[test]
fn off_stops_drawing() {
    let mut pad = test_pad();
    pad.off();
    pad.off();
    assert!(!pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0)));
    assert!(pad.is_empty());

    pad.on(binding());
    assert!(pad.handle_event(surface(), &pointer(EventKind::Down, 50.0, 30.0, 0)));
}

#[test]
fn mouse_events_never_prevent_default() {
    let mut pad = test_pad();
    pad.set_input_mode(InputMode::MouseTouch);
    let seen = record(&pad);

    let down: InputEvent = MouseEvent::new(EventKind::Down, 50.0, 30.0, 0)
        .cancelable(true)
        .into();
    let moved: InputEvent = MouseEvent::new(EventKind::Move, 55.0, 35.0, 20)
        .cancelable(true)
        .into();
    let up: InputEvent = MouseEvent::new(EventKind::Up, 55.0, 35.0, 40)
        .cancelable(true)
        .into();
    pad.handle_event(surface(), &down);
    pad.handle_event(surface(), &moved);
    pad.handle_event(DispatchTarget::Document(DOC), &up);

    assert!(!down.default_prevented());
    assert!(!moved.default_prevented());
    assert!(!up.default_prevented());
    assert_eq!(seen.borrow().last(), Some(&StrokeEventKind::EndStroke));
}

fn touch_events(cancelable: bool) -> [InputEvent; 3] {
    let touch = |x: f64, y: f64| Touch {
        client_x: x,
        client_y: y,
        force: 1.0,
    };
    [
        TouchEvent::new(
            EventKind::Down,
            vec![touch(50.0, 30.0)],
            vec![touch(50.0, 30.0)],
            0,
        )
        .cancelable(cancelable)
        .into(),
        TouchEvent::new(
            EventKind::Move,
            vec![touch(55.0, 35.0)],
            vec![touch(55.0, 35.0)],
            20,
        )
        .cancelable(cancelable)
        .into(),
        TouchEvent::new(EventKind::Up, vec![], vec![touch(55.0, 35.0)], 40)
            .cancelable(cancelable)
            .into(),
    ]
}

#[test]
fn touch_events_prevented_only_when_cancelable() {
    for cancelable in [false, true] {
        let mut pad = test_pad();
        pad.set_input_mode(InputMode::MouseTouch);
        let events = touch_events(cancelable);
        for event in &events {
            assert!(pad.handle_event(surface(), event));
        }
        for event in &events {
            assert_eq!(event.default_prevented(), cancelable);
            assert_eq!(event.family(), InputFamily::Touch);
        }
        assert_eq!(pad.to_data().len(), 1);
    }
}
