use super::*;

#[test]
fn new_capture_is_empty() {
    let s = StrokeCapture::new("#000000", 2.0);
    assert!(s.is_empty());
    assert!(s.points().is_empty());
    assert_eq!(s.color(), "#000000");
    assert!((s.width() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn push_keeps_arrival_order() {
    let mut s = StrokeCapture::new("#000000", 2.0);
    s.push(Point::new(0.0, 0.0));
    s.push(Point::new(1.0, 1.0));
    s.push(Point::new(2.0, 0.0));
    assert_eq!(s.points(), [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)]);
}

#[test]
fn duplicate_samples_are_kept() {
    let mut s = StrokeCapture::new("#000000", 2.0);
    s.push(Point::new(1.0, 1.0));
    s.push(Point::new(1.0, 1.0));
    assert_eq!(s.points().len(), 2);
}

#[test]
fn finish_empty_is_none() {
    assert!(StrokeCapture::new("#000000", 2.0).finish().is_none());
}

#[test]
fn finish_carries_style_and_points() {
    let mut s = StrokeCapture::new("#E0483E", 3.0);
    s.push(Point::new(0.5, -0.5));
    let stroke = s.finish().unwrap();
    assert_eq!(stroke.points, vec![Point::new(0.5, -0.5)]);
    assert_eq!(stroke.color, "#E0483E");
    assert!((stroke.width - 3.0).abs() < f64::EPSILON);
}

#[test]
fn finished_strokes_get_distinct_ids() {
    let mut a = StrokeCapture::new("#000000", 2.0);
    a.push(Point::new(0.0, 0.0));
    let mut b = a.clone();
    b.push(Point::new(1.0, 0.0));
    assert_ne!(a.finish().unwrap().id, b.finish().unwrap().id);
}
