use super::*;
use crate::draw::{LineCap, LineJoin, Point, Stroke, StrokeId, StrokeStyle};
use crate::ink::{DrawMode, HistoryState, PointerEvent, RedoPolicy, ToolConfig};
use crate::util::{Bounds, Rect};

fn pen() -> ToolConfig {
    ToolConfig::default()
}

fn eraser() -> ToolConfig {
    ToolConfig::default().with_mode(DrawMode::Erase)
}

fn draw(session: &mut InkSession, points: &[(f32, f32)]) -> StrokeId {
    let (first, rest) = points.split_first().expect("at least one point");
    let id = session
        .begin_stroke(first.0, first.1, &pen())
        .expect("pen starts a stroke");
    for &(x, y) in rest {
        assert!(session.extend_stroke(x, y));
    }
    assert_eq!(session.end_stroke(), Some(id));
    id
}

fn ids(strokes: &[Stroke]) -> Vec<StrokeId> {
    strokes.iter().map(|stroke| stroke.id).collect()
}

fn points(stroke: &Stroke) -> Vec<(f32, f32)> {
    stroke.points.iter().map(|p| (p.x, p.y)).collect()
}

fn saved_stroke(id: u64, points: &[(f32, f32)]) -> Stroke {
    Stroke {
        id: StrokeId(id),
        style: StrokeStyle {
            color: 2,
            width: 4.0,
            cap: LineCap::Butt,
            join: LineJoin::Bevel,
            opacity: 0.5,
            tool_id: 3,
        },
        points: points.iter().copied().map(Point::from).collect(),
    }
}

#[test]
fn test_stroke_records_down_then_moves_in_order() {
    let mut session = InkSession::default();
    let id = draw(&mut session, &[(0.0, 0.0), (3.0, 4.0), (3.5, 9.0), (12.0, 1.0)]);

    let stroke = session.stroke(id).expect("stroke is visible");
    assert_eq!(
        points(stroke),
        vec![(0.0, 0.0), (3.0, 4.0), (3.5, 9.0), (12.0, 1.0)]
    );
    assert_eq!(session.gesture(), Gesture::Idle);
}

#[test]
fn test_undo_redo_example_sequence() {
    let mut session = InkSession::default();
    draw(&mut session, &[(0.0, 0.0), (10.0, 10.0)]);

    assert_eq!(session.strokes().len(), 1);
    assert_eq!(points(&session.strokes()[0]), vec![(0.0, 0.0), (10.0, 10.0)]);
    assert!(session.can_undo());
    assert!(!session.can_redo());

    session.undo();
    assert!(session.strokes().is_empty());
    assert!(!session.can_undo());
    assert!(session.can_redo());

    session.redo();
    assert_eq!(points(&session.strokes()[0]), vec![(0.0, 0.0), (10.0, 10.0)]);
    assert!(session.can_undo());
    assert!(!session.can_redo());
}

#[test]
fn test_undo_then_redo_restores_identical_state() {
    let mut session = InkSession::default();
    draw(&mut session, &[(0.0, 0.0), (1.0, 1.0)]);
    draw(&mut session, &[(5.0, 5.0)]);
    draw(&mut session, &[(9.0, 9.0), (8.0, 7.0)]);
    let before = session.strokes().to_vec();

    session.undo();
    session.redo();

    assert_eq!(session.strokes(), before.as_slice());
    assert!(session.redo_buffer().is_empty());
}

#[test]
fn test_style_is_snapshotted_at_stroke_start() {
    let mut session = InkSession::default();
    let tool = ToolConfig::default()
        .with_color(5)
        .with_width(3.0)
        .with_opacity(0.4);
    let id = session.begin_stroke(1.0, 1.0, &tool).unwrap();

    // Changing the tool mid-stroke has no effect on the open stroke.
    let _changed = tool.with_color(0).with_width(20.0);
    session.extend_stroke(2.0, 2.0);
    session.end_stroke();

    let style = session.stroke(id).unwrap().style;
    assert_eq!(style.color, 5);
    assert_eq!(style.width, 3.0);
    assert_eq!(style.opacity, 0.4);
}

#[test]
fn test_identical_styles_get_distinct_ids() {
    let mut session = InkSession::default();
    let a = draw(&mut session, &[(0.0, 0.0)]);
    let b = draw(&mut session, &[(0.0, 0.0)]);

    assert_ne!(a, b);
    assert_eq!(session.strokes().len(), 2);
    assert_eq!(session.strokes()[0].style, session.strokes()[1].style);
}

#[test]
fn test_erase_example_removes_only_touched_stroke() {
    let mut session = InkSession::default();
    let a = draw(&mut session, &[(0.0, 0.0), (5.0, 5.0)]);
    let b = draw(&mut session, &[(20.0, 20.0), (25.0, 25.0)]);

    let removed = session.erase_rect(Bounds::from_corners(0.0, 0.0, 6.0, 6.0));

    assert_eq!(removed, vec![a]);
    assert_eq!(ids(session.strokes()), vec![b]);
    assert_eq!(ids(session.redo_buffer()), vec![a]);
}

#[test]
fn test_erase_is_all_or_nothing_per_stroke() {
    let mut session = InkSession::default();
    let id = draw(&mut session, &[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0)]);

    let missed = session.erase_rect(Bounds::from_corners(10.0, -5.0, 40.0, 5.0));
    assert!(missed.is_empty());
    assert_eq!(session.stroke(id).unwrap().points.len(), 3);

    let hit = session.erase_rect(Bounds::from_corners(45.0, -1.0, 55.0, 1.0));
    assert_eq!(hit, vec![id]);
    assert_eq!(session.redo_buffer()[0].points.len(), 3);
}

#[test]
fn test_erase_bounds_are_inclusive() {
    let mut session = InkSession::default();
    let id = draw(&mut session, &[(6.0, 6.0)]);

    assert_eq!(
        session.erase_rect(Bounds::from_corners(0.0, 0.0, 6.0, 6.0)),
        vec![id]
    );
}

#[test]
fn test_erase_gesture_uses_live_rectangle_from_anchor() {
    let mut session = InkSession::default();
    let near = draw(&mut session, &[(12.0, 12.0)]);
    let far = draw(&mut session, &[(40.0, 40.0)]);
    let behind = draw(&mut session, &[(-10.0, -10.0)]);

    let tool = eraser();
    session.handle_pointer(PointerEvent::down(10.0, 10.0), &tool);
    assert!(matches!(session.gesture(), Gesture::Erasing { .. }));
    // Down alone erases nothing.
    assert_eq!(session.strokes().len(), 3);

    session.handle_pointer(PointerEvent::moved(15.0, 15.0), &tool);
    assert_eq!(ids(session.strokes()), vec![far, behind]);

    // Dragging back past the anchor flips the rectangle.
    session.handle_pointer(PointerEvent::moved(-20.0, -20.0), &tool);
    assert_eq!(ids(session.strokes()), vec![far]);

    session.handle_pointer(PointerEvent::up(-20.0, -20.0), &tool);
    assert_eq!(session.gesture(), Gesture::Idle);
    assert_eq!(ids(session.redo_buffer()), vec![near, behind]);
}

#[test]
fn test_erase_removes_multiple_strokes_and_redo_restores_topmost_first() {
    let mut session = InkSession::default();
    let a = draw(&mut session, &[(1.0, 1.0)]);
    let b = draw(&mut session, &[(2.0, 2.0)]);
    let c = draw(&mut session, &[(3.0, 3.0)]);

    session.erase_rect(Bounds::from_corners(0.0, 0.0, 4.0, 4.0));
    assert!(!session.can_undo());
    assert!(session.can_redo());

    assert_eq!(session.redo(), Some(c));
    assert_eq!(session.redo(), Some(b));
    assert_eq!(session.redo(), Some(a));
    assert_eq!(ids(session.strokes()), vec![c, b, a]);
}

#[test]
fn test_redo_appends_at_end_of_paint_order() {
    let mut session = InkSession::new(RedoPolicy::Keep);
    let a = draw(&mut session, &[(0.0, 0.0)]);
    session.undo();
    let b = draw(&mut session, &[(1.0, 1.0)]);

    assert_eq!(session.redo(), Some(a));
    assert_eq!(ids(session.strokes()), vec![b, a]);
}

#[test]
fn test_new_stroke_discards_redo_by_default() {
    let mut session = InkSession::default();
    draw(&mut session, &[(0.0, 0.0)]);
    session.undo();
    assert!(session.can_redo());

    let id = session.begin_stroke(5.0, 5.0, &pen()).unwrap();
    // Still redoable while the new stroke is in progress.
    assert!(session.can_redo());
    session.end_stroke();

    assert!(!session.can_redo());
    assert_eq!(session.redo(), None);
    assert_eq!(ids(session.strokes()), vec![id]);
}

#[test]
fn test_keep_policy_preserves_redo_after_new_stroke() {
    let mut session = InkSession::new(RedoPolicy::Keep);
    draw(&mut session, &[(0.0, 0.0)]);
    session.undo();
    draw(&mut session, &[(5.0, 5.0)]);

    assert!(session.can_redo());
    assert_eq!(session.redo_buffer().len(), 1);
}

#[test]
fn test_clear_empties_everything() {
    let mut session = InkSession::default();
    draw(&mut session, &[(0.0, 0.0)]);
    draw(&mut session, &[(1.0, 1.0)]);
    session.undo();
    session.begin_stroke(2.0, 2.0, &pen());

    session.clear();

    assert!(session.strokes().is_empty());
    assert!(session.redo_buffer().is_empty());
    assert!(!session.can_undo());
    assert!(!session.can_redo());
    assert_eq!(session.gesture(), Gesture::Idle);
    assert!(!session.extend_stroke(3.0, 3.0));
}

#[test]
fn test_clear_redo_keeps_visible_strokes() {
    let mut session = InkSession::default();
    let a = draw(&mut session, &[(0.0, 0.0)]);
    draw(&mut session, &[(1.0, 1.0)]);
    session.undo();

    session.clear_redo();

    assert_eq!(ids(session.strokes()), vec![a]);
    assert!(!session.can_redo());
}

#[test]
fn test_out_of_order_input_is_ignored() {
    let mut session = InkSession::default();
    let tool = pen();

    session.handle_pointer(PointerEvent::moved(1.0, 1.0), &tool);
    session.handle_pointer(PointerEvent::up(1.0, 1.0), &tool);
    assert!(!session.extend_stroke(2.0, 2.0));
    assert_eq!(session.end_stroke(), None);
    assert!(session.erase_to(3.0, 3.0).is_empty());
    assert_eq!(session.undo(), None);
    assert_eq!(session.redo(), None);

    assert!(session.strokes().is_empty());
    assert_eq!(session.history_state(), HistoryState::default());
}

#[test]
fn test_pointer_sequence_builds_stroke_without_up_point() {
    let mut session = InkSession::default();
    let tool = pen();

    session.handle_pointer(PointerEvent::down(1.0, 2.0), &tool);
    session.handle_pointer(PointerEvent::moved(3.0, 4.0), &tool);
    session.handle_pointer(PointerEvent::moved(5.0, 6.0), &tool);
    session.handle_pointer(PointerEvent::up(7.0, 8.0), &tool);

    assert_eq!(session.strokes().len(), 1);
    assert_eq!(
        points(&session.strokes()[0]),
        vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]
    );
}

#[test]
fn test_mode_switch_mid_gesture_follows_gesture() {
    let mut session = InkSession::default();
    session.handle_pointer(PointerEvent::down(0.0, 0.0), &pen());
    // Host switched to the eraser while the pen was still down.
    session.handle_pointer(PointerEvent::moved(1.0, 1.0), &eraser());
    session.handle_pointer(PointerEvent::up(1.0, 1.0), &eraser());

    assert_eq!(session.strokes().len(), 1);
    assert_eq!(session.strokes()[0].points.len(), 2);
}

#[test]
fn test_begin_stroke_in_erase_mode_is_noop() {
    let mut session = InkSession::default();
    assert_eq!(session.begin_stroke(0.0, 0.0, &eraser()), None);
    assert!(session.strokes().is_empty());
}

#[test]
fn test_down_while_drawing_finishes_previous_stroke() {
    let mut session = InkSession::default();
    let tool = pen();
    session.handle_pointer(PointerEvent::down(0.0, 0.0), &tool);
    session.handle_pointer(PointerEvent::down(9.0, 9.0), &tool);
    session.handle_pointer(PointerEvent::moved(10.0, 10.0), &tool);

    assert_eq!(session.strokes().len(), 2);
    assert_eq!(points(&session.strokes()[0]), vec![(0.0, 0.0)]);
    assert_eq!(points(&session.strokes()[1]), vec![(9.0, 9.0), (10.0, 10.0)]);
}

#[test]
fn test_undo_during_stroke_closes_it_first() {
    let mut session = InkSession::default();
    let id = session.begin_stroke(0.0, 0.0, &pen()).unwrap();
    session.extend_stroke(1.0, 1.0);

    assert_eq!(session.undo(), Some(id));
    assert!(session.active_stroke().is_none());
    assert!(!session.extend_stroke(2.0, 2.0));
    assert_eq!(session.redo_buffer()[0].points.len(), 2);
}

#[test]
fn test_extend_after_active_stroke_erased_is_noop() {
    let mut session = InkSession::default();
    session.begin_stroke(0.0, 0.0, &pen());
    session.erase_rect(Bounds::from_corners(-1.0, -1.0, 1.0, 1.0));

    assert!(!session.extend_stroke(5.0, 5.0));
    assert!(session.strokes().is_empty());
}

#[test]
fn test_from_strokes_preserves_order_and_allocates_above_loaded_ids() {
    let loaded = vec![
        saved_stroke(7, &[(0.0, 0.0)]),
        saved_stroke(3, &[(1.0, 1.0)]),
    ];
    let mut session = InkSession::from_strokes(loaded.clone(), RedoPolicy::default());

    assert_eq!(session.strokes(), loaded.as_slice());
    assert!(session.can_undo());

    let id = draw(&mut session, &[(2.0, 2.0)]);
    assert_eq!(id, StrokeId(8));
}

#[test]
fn test_from_strokes_reassigns_duplicate_ids() {
    let loaded = vec![
        saved_stroke(2, &[(0.0, 0.0)]),
        saved_stroke(2, &[(1.0, 1.0)]),
    ];
    let session = InkSession::from_strokes(loaded, RedoPolicy::default());

    assert_eq!(ids(session.strokes()), vec![StrokeId(2), StrokeId(3)]);
}

#[test]
fn test_from_strokes_renumbers_when_max_id_is_loaded() {
    let loaded = vec![
        saved_stroke(u64::MAX, &[(0.0, 0.0)]),
        saved_stroke(5, &[(1.0, 1.0)]),
    ];
    let mut session = InkSession::from_strokes(loaded, RedoPolicy::default());
    assert_eq!(ids(session.strokes()), vec![StrokeId(1), StrokeId(2)]);
    assert_eq!(points(&session.strokes()[0]), vec![(0.0, 0.0)]);

    let fresh = draw(&mut session, &[(2.0, 2.0), (3.0, 3.0)]);
    assert_eq!(fresh, StrokeId(3));
    assert_eq!(session.stroke(fresh).map(points), Some(vec![(2.0, 2.0), (3.0, 3.0)]));
}

#[test]
fn test_exhausted_ids_renumber_strokes_and_redo_buffer() {
    let mut session = InkSession::new(RedoPolicy::Keep);
    let a = draw(&mut session, &[(0.0, 0.0)]);
    draw(&mut session, &[(1.0, 1.0)]);
    session.undo();
    session.next_id = u64::MAX;

    let fresh = session
        .begin_stroke(5.0, 5.0, &pen())
        .expect("pen starts a stroke");
    assert!(session.extend_stroke(6.0, 6.0));
    assert_eq!(session.end_stroke(), Some(fresh));

    assert_eq!(ids(session.strokes()), vec![a, fresh]);
    assert_eq!(ids(session.redo_buffer()), vec![StrokeId(2)]);
    assert_eq!(fresh, StrokeId(3));
    assert_eq!(session.stroke(fresh).map(points), Some(vec![(5.0, 5.0), (6.0, 6.0)]));

    assert_eq!(session.redo(), Some(StrokeId(2)));
    assert_eq!(ids(session.strokes()), vec![a, fresh, StrokeId(2)]);
}

#[test]
fn test_into_strokes_returns_visible_only() {
    let mut session = InkSession::default();
    let a = draw(&mut session, &[(0.0, 0.0)]);
    draw(&mut session, &[(1.0, 1.0)]);
    session.undo();

    assert_eq!(ids(&session.into_strokes()), vec![a]);
}

#[test]
fn test_history_watch_only_notifies_on_change() {
    let mut session = InkSession::default();
    let mut rx = session.subscribe();
    assert_eq!(*rx.borrow_and_update(), HistoryState::default());

    session.begin_stroke(0.0, 0.0, &pen());
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        *rx.borrow_and_update(),
        HistoryState {
            can_undo: true,
            can_redo: false
        }
    );

    session.extend_stroke(1.0, 1.0);
    session.end_stroke();
    draw(&mut session, &[(3.0, 3.0)]);
    assert!(!rx.has_changed().unwrap());

    session.undo();
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        *rx.borrow_and_update(),
        HistoryState {
            can_undo: true,
            can_redo: true
        }
    );

    session.clear();
    assert_eq!(*rx.borrow_and_update(), HistoryState::default());
}

#[test]
fn test_dirty_regions_track_stroke_damage() {
    let mut session = InkSession::default();
    let tool = pen().with_width(2.0);
    session.take_dirty_regions(100, 100);

    session.begin_stroke(10.0, 10.0, &tool);
    session.extend_stroke(20.0, 10.0);
    assert!(session.needs_redraw);

    let regions = session.take_dirty_regions(100, 100);
    assert_eq!(
        regions,
        vec![
            Rect::new(9, 9, 2, 2).unwrap(),
            Rect::new(9, 9, 12, 2).unwrap()
        ]
    );
    assert!(!session.needs_redraw);

    session.clear();
    assert_eq!(
        session.take_dirty_regions(100, 100),
        vec![Rect::new(0, 0, 100, 100).unwrap()]
    );
}

#[test]
fn test_extreme_coordinates_produce_clamped_damage() {
    let mut session = InkSession::default();
    session.take_dirty_regions(100, 100);

    let far = session
        .begin_stroke(3.0e9, 0.0, &pen())
        .expect("pen starts a stroke");
    session.end_stroke();
    let wide = session
        .begin_stroke(-3.0e9, 0.0, &pen())
        .expect("pen starts a stroke");
    assert!(session.extend_stroke(3.0e9, 0.0));
    assert!(session.extend_stroke(f32::INFINITY, f32::NEG_INFINITY));
    session.end_stroke();

    let regions = session.take_dirty_regions(100, 100);
    assert!(!regions.is_empty());
    assert!(regions.iter().all(|rect| rect.is_valid()));

    assert_eq!(session.undo(), Some(wide));
    let removed = session.erase_rect(Bounds::from_corners(2.0e9, -1.0, 4.0e9, 1.0));
    assert_eq!(removed, vec![far]);
    assert!(session.strokes().is_empty());

    let regions = session.take_dirty_regions(100, 100);
    assert!(regions.iter().all(|rect| rect.is_valid()));
    assert!(regions.iter().all(|rect| rect.x >= -1_000_000_000));
}

#[test]
fn test_snapshot_uses_requested_size() {
    let mut session = InkSession::default();
    draw(&mut session, &[(10.0, 10.0), (90.0, 90.0)]);

    let default = session.snapshot(100, 100).unwrap();
    assert_eq!((default.width(), default.height()), (100, 100));

    let large = session.snapshot(640, 480).unwrap();
    assert_eq!((large.width(), large.height()), (640, 480));

    assert!(session.snapshot(0, 100).is_err());
}
