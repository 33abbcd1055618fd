//! End-to-end: a host list driving a row through raw pointer events,
//! frame ticks and a scheduled confirmation timeout.

use panrow::prelude::*;

#[derive(Default)]
struct Inbox {
    archived: Vec<RowPosition>,
    deleted: Vec<RowPosition>,
}

impl TriggeredLeftAction for Inbox {
    fn triggered_left_action(&mut self, _list: ListContext, position: RowPosition) {
        self.archived.push(position);
    }
}

impl TriggeredRightAction for Inbox {
    fn triggered_right_action(&mut self, _list: ListContext, position: RowPosition) {
        self.deleted.push(position);
    }
}

impl ListDelegate for Inbox {
    fn left_action_handler(&mut self) -> Option<&mut dyn TriggeredLeftAction> {
        Some(self as &mut dyn TriggeredLeftAction)
    }

    fn right_action_handler(&mut self) -> Option<&mut dyn TriggeredRightAction> {
        Some(self as &mut dyn TriggeredRightAction)
    }
}

#[derive(Default)]
struct InboxList {
    inbox: Inbox,
}

impl ListController for InboxList {
    fn context(&self) -> ListContext {
        ListContext(42)
    }

    fn delegate(&mut self) -> Option<&mut dyn ListDelegate> {
        Some(&mut self.inbox as &mut dyn ListDelegate)
    }
}

const FRAME: Duration = Duration::from_millis(16);

fn mail_row() -> PannableRow {
    let glyph = |name| ActionGlyph::new(name, Size::new(24.0, 24.0));
    PannableRow::new(RowStyle::Subtitle, "mail", Some(Surface::new("front")), None)
        .with_left_action_glyph(glyph("archive"))
        .with_right_action_glyph(glyph("delete"))
        .with_right_requires_confirmation(true)
}

fn pointer(
    row: &mut PannableRow,
    list: &mut InboxList,
    now: Instant,
    events: &[PointerEvent],
) -> GestureDisposition {
    let mut last = GestureDisposition::Ignored;
    for &event in events {
        last = row.handle_event(&Event::from(event), now, list);
    }
    last
}

/// Tick frames until the row stops animating; returns the frame count.
fn run_frames(row: &mut PannableRow, list: &mut InboxList, mut now: Instant) -> (u32, Instant) {
    let mut frames = 0;
    while row.phase() == RowPhase::Releasing && frames < 600 {
        now += FRAME;
        row.advance(FRAME, now, list);
        frames += 1;
    }
    (frames, now)
}

#[test]
fn swipe_right_archives_after_animation() {
    let mut list = InboxList::default();
    let mut row = mail_row();
    row.bind_position(RowPosition::new(0, 7));
    let t = Instant::now();

    let disposition = pointer(
        &mut row,
        &mut list,
        t,
        &[
            PointerEvent::down(20.0, 22.0),
            PointerEvent::moved(40.0, 23.0),
            PointerEvent::moved(60.0, 23.0),
            PointerEvent::up(60.0, 23.0),
        ],
    );
    assert_eq!(disposition, GestureDisposition::Claimed);
    assert_eq!(row.phase(), RowPhase::Releasing);
    assert!(list.inbox.archived.is_empty());

    let (frames, _) = run_frames(&mut row, &mut list, t);
    assert!(frames > 1 && frames < 600);
    assert_eq!(row.phase(), RowPhase::Idle);
    assert_eq!(row.displacement(), 0.0);
    assert_eq!(list.inbox.archived, vec![RowPosition::new(0, 7)]);
}

#[test]
fn vertical_scroll_is_handed_back() {
    let mut list = InboxList::default();
    let mut row = mail_row();
    let t = Instant::now();

    let disposition = pointer(
        &mut row,
        &mut list,
        t,
        &[
            PointerEvent::down(100.0, 10.0),
            PointerEvent::moved(102.0, 30.0),
        ],
    );
    assert_eq!(disposition, GestureDisposition::Yielded);
    assert_eq!(row.phase(), RowPhase::Idle);
    assert_eq!(row.displacement(), 0.0);
}

#[test]
fn delete_waits_for_confirming_tap() {
    let mut list = InboxList::default();
    let mut row = mail_row();
    row.bind_position(RowPosition::new(1, 0));
    let t = Instant::now();

    pointer(
        &mut row,
        &mut list,
        t,
        &[
            PointerEvent::down(300.0, 22.0),
            PointerEvent::moved(260.0, 22.0),
            PointerEvent::up(260.0, 22.0),
        ],
    );
    let (_, t) = run_frames(&mut row, &mut list, t);
    assert_eq!(row.armed_side(), Some(ActionSide::Right));
    assert!(list.inbox.deleted.is_empty());

    // Tap on the revealed glyph at the right edge.
    pointer(
        &mut row,
        &mut list,
        t,
        &[PointerEvent::down(300.0, 22.0), PointerEvent::up(300.0, 22.0)],
    );
    assert_eq!(list.inbox.deleted, vec![RowPosition::new(1, 0)]);
    run_frames(&mut row, &mut list, t);
    assert_eq!(row.phase(), RowPhase::Idle);
}

#[test]
fn scheduled_timeout_discards_delete() {
    let mut list = InboxList::default();
    let mut row = mail_row();
    row.bind_position(RowPosition::new(1, 1));
    let t = Instant::now();

    pointer(
        &mut row,
        &mut list,
        t,
        &[
            PointerEvent::down(300.0, 22.0),
            PointerEvent::moved(250.0, 22.0),
            PointerEvent::up(250.0, 22.0),
        ],
    );
    let (_, t) = run_frames(&mut row, &mut list, t);
    let (token, deadline) = row.pending_timeout().expect("armed row exposes a deadline");
    assert_eq!(deadline, t + row.confirmation_timeout());

    assert!(row.on_timer(token, deadline));
    run_frames(&mut row, &mut list, deadline);
    assert_eq!(row.phase(), RowPhase::Idle);
    assert!(list.inbox.deleted.is_empty());
}
