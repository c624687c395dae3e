//! Integration tests for input dispatch, focus, hover, cursor and drawing.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use blendint::{
        Context, EventContext, NodeId,
        backend::NullPlatform,
        config::Config,
        cursor::CursorType,
        error::{Error, Result},
        event::{Button, KeyEvent, MouseButtonEvent, MouseKind},
        geom::{Point, Rect, Size},
        layout::LinearLayout,
        testing::{
            Event, PlatformLog, RecordingPainter, RecordingPlatform, TestLog, TestView, snapshot,
        },
        view::{Response, View},
    };
    use pretty_assertions::assert_eq;

    struct Fixture {
        ctx: Context,
        log: TestLog,
        platform: Arc<Mutex<PlatformLog>>,
        row: NodeId,
        a: NodeId,
        b: NodeId,
    }

    /// A 200x100 window holding a row with two 100x100 views side by side.
    /// The row itself has a view named "row"; the children are "a" and "b".
    fn fixture(a: TestView, b: TestView) -> Result<Fixture> {
        let (platform, p) = RecordingPlatform::create();
        let mut ctx = Context::new(p);
        ctx.resize_event(200, 100);
        let log = TestLog::default();
        let (row, a, b) = ctx.update(|t| -> Result<_> {
            let row = t
                .create_container_with(
                    LinearLayout::horizontal(0),
                    TestView::new(1, 1).named("row").with_log(&log),
                )
                .id();
            t.add_child(t.root(), row)?;
            t.resize(row, Size::new(200, 100));
            let a = t.add(row, a.named("a").with_log(&log))?.id();
            let b = t.add(row, b.named("b").with_log(&log))?.id();
            Ok((row, a, b))
        })?;
        Ok(Fixture {
            ctx,
            log,
            platform,
            row,
            a,
            b,
        })
    }

    fn pair() -> Result<Fixture> {
        fixture(TestView::new(100, 100), TestView::new(100, 100))
    }

    fn press(ctx: &mut Context, x: i32, y: i32) -> Response {
        ctx.cursor_pos_event(x, y);
        ctx.mouse_button_event(MouseButtonEvent::press(Button::Left))
    }

    #[test]
    fn cursor_stack_restores_and_tolerates_underflow() {
        let (platform, p) = RecordingPlatform::create();
        let mut ctx = Context::new(p);
        ctx.push_cursor(CursorType::Arrow);
        ctx.push_cursor(CursorType::Cross);
        assert_eq!(ctx.current_cursor(), CursorType::Cross);
        ctx.pop_cursor();
        assert_eq!(ctx.current_cursor(), CursorType::Arrow);
        ctx.pop_cursor();
        assert_eq!(ctx.current_cursor(), CursorType::Arrow);
        assert_eq!(
            snapshot(&platform).cursors,
            vec![CursorType::Cross, CursorType::Arrow]
        );
    }

    #[test]
    fn enter_and_exit_follow_the_pointer() -> Result<()> {
        let mut f = pair()?;
        f.ctx.cursor_pos_event(10, 10);
        assert_eq!(f.ctx.hovered(), &[f.row, f.a]);
        f.ctx.cursor_pos_event(150, 10);
        f.ctx.cursor_pos_event(300, 300);
        assert!(f.ctx.hovered().is_empty());
        assert_eq!(f.log.crossings(), vec!["+row", "+a", "-a", "+b", "-b", "-row"]);
        Ok(())
    }

    #[test]
    fn views_can_push_cursors_on_enter() -> Result<()> {
        let mut f = fixture(
            TestView::new(100, 100).with_cursor(CursorType::Hand),
            TestView::new(100, 100),
        )?;
        f.ctx.cursor_pos_event(10, 10);
        assert_eq!(f.ctx.current_cursor(), CursorType::Hand);
        f.ctx.cursor_pos_event(150, 10);
        assert_eq!(f.ctx.current_cursor(), CursorType::Arrow);
        assert_eq!(
            snapshot(&f.platform).cursors,
            vec![CursorType::Hand, CursorType::Arrow]
        );
        Ok(())
    }

    #[test]
    fn press_focuses_the_acceptor() -> Result<()> {
        let mut f = pair()?;
        assert_eq!(press(&mut f.ctx, 150, 10), Response::Accept);
        assert_eq!(f.ctx.focus(), Some(f.b));

        let events = f.log.events_for("b");
        let Some(Event::Press(e)) = events.last() else {
            panic!("expected a press, got {events:?}");
        };
        assert_eq!(e.kind, MouseKind::Press);
        assert_eq!(e.position, Point::new(150, 10));
        assert_eq!(e.local, Point::new(50, 10));
        Ok(())
    }

    #[test]
    fn ignored_events_bubble_to_the_parent() -> Result<()> {
        let mut f = fixture(
            TestView::new(100, 100).responding(Response::Ignore),
            TestView::new(100, 100),
        )?;
        assert_eq!(press(&mut f.ctx, 10, 10), Response::Accept);
        assert_eq!(f.ctx.focus(), Some(f.row));
        assert!(
            f.log
                .events_for("a")
                .iter()
                .any(|e| matches!(e, Event::Press(_)))
        );

        // The row is focused, so keys go straight to it.
        assert_eq!(f.ctx.key_event(KeyEvent::from('x')), Response::Accept);
        assert!(f.log.events_for("a").iter().all(|e| !matches!(e, Event::Key(_))));
        assert_eq!(
            f.log.events_for("row").last(),
            Some(&Event::Key(KeyEvent::from('x')))
        );
        Ok(())
    }

    #[test]
    fn unfocusable_views_keep_the_old_focus() -> Result<()> {
        let mut f = fixture(
            TestView::new(100, 100),
            TestView::new(100, 100).unfocusable(),
        )?;
        press(&mut f.ctx, 10, 10);
        assert_eq!(f.ctx.focus(), Some(f.a));
        assert_eq!(press(&mut f.ctx, 150, 10), Response::Accept);
        assert_eq!(f.ctx.focus(), Some(f.a));
        Ok(())
    }

    #[test]
    fn release_and_drag_go_to_the_focused_view() -> Result<()> {
        let mut f = pair()?;
        press(&mut f.ctx, 10, 10);
        f.ctx.cursor_pos_event(150, 10);
        f.ctx.mouse_button_event(MouseButtonEvent::release(Button::Left));

        let a = f.log.events_for("a");
        assert!(
            a.iter()
                .any(|e| matches!(e, Event::Move(m) if m.button == Some(Button::Left)))
        );
        assert!(a.iter().any(|e| matches!(e, Event::Release(_))));
        assert!(
            f.log
                .events_for("b")
                .iter()
                .all(|e| !matches!(e, Event::Move(_) | Event::Release(_)))
        );

        // With no button held, motion goes to the view under the pointer.
        f.ctx.cursor_pos_event(160, 10);
        assert!(
            f.log
                .events_for("b")
                .iter()
                .any(|e| matches!(e, Event::Move(m) if m.button.is_none()))
        );
        Ok(())
    }

    #[test]
    fn right_button_opens_context_menus() -> Result<()> {
        let mut f = pair()?;
        f.ctx.cursor_pos_event(150, 10);
        f.ctx.mouse_button_event(MouseButtonEvent::press(Button::Right));
        f.ctx.mouse_button_event(MouseButtonEvent::release(Button::Right));
        let b = f.log.events_for("b");
        assert!(b.iter().any(|e| matches!(e, Event::ContextPress(_))));
        assert!(b.iter().any(|e| matches!(e, Event::ContextRelease(_))));
        assert!(b.iter().all(|e| !matches!(e, Event::Press(_))));
        Ok(())
    }

    #[test]
    fn keys_without_focus_are_ignored() -> Result<()> {
        let mut f = pair()?;
        assert_eq!(f.ctx.key_event(KeyEvent::from('q')), Response::Ignore);

        press(&mut f.ctx, 10, 10);
        f.ctx.update(|t| t.remove(f.a))?;
        assert_eq!(f.ctx.key_event(KeyEvent::from('q')), Response::Ignore);
        assert_eq!(f.ctx.focus(), None);
        Ok(())
    }

    #[test]
    fn redraw_requests_are_coalesced() -> Result<()> {
        let mut f = pair()?;
        let (_paint, mut painter) = RecordingPainter::create();
        f.ctx.draw(&mut painter)?;
        assert!(!f.ctx.is_dirty());
        let base = snapshot(&f.platform).redraws;

        press(&mut f.ctx, 10, 10);
        f.ctx.key_event(KeyEvent::from('a'));
        f.ctx.key_event(KeyEvent::from('b'));
        assert!(f.ctx.is_dirty());
        assert_eq!(snapshot(&f.platform).redraws, base + 1);

        f.ctx.draw(&mut painter)?;
        f.ctx.key_event(KeyEvent::from('c'));
        assert_eq!(snapshot(&f.platform).redraws, base + 2);
        Ok(())
    }

    #[test]
    fn finish_does_not_request_a_redraw() -> Result<()> {
        let mut f = fixture(
            TestView::new(100, 100).responding(Response::Finish),
            TestView::new(100, 100),
        )?;
        let (_paint, mut painter) = RecordingPainter::create();
        f.ctx.cursor_pos_event(10, 10);
        f.ctx.draw(&mut painter)?;
        assert_eq!(
            f.ctx.mouse_button_event(MouseButtonEvent::press(Button::Left)),
            Response::Finish
        );
        assert!(!f.ctx.is_dirty());
        Ok(())
    }

    #[test]
    fn draw_skips_failing_views() -> Result<()> {
        let mut f = fixture(
            TestView::new(100, 100).failing_draw(),
            TestView::new(100, 100),
        )?;
        let (paint, mut painter) = RecordingPainter::create();
        assert_eq!(f.ctx.draw(&mut painter)?, 2);

        let log = snapshot(&paint);
        assert_eq!(log.frames(), 1);
        let shapes = log.shapes();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[1], Rect::new(100, 0, 100, 100));
        assert!(f.log.events_for("a").contains(&Event::Draw));
        Ok(())
    }

    #[test]
    fn hidden_subtrees_are_not_drawn_or_hit() -> Result<()> {
        let mut f = pair()?;
        f.ctx.update(|t| t.set_visible(f.row, false));
        let (_paint, mut painter) = RecordingPainter::create();
        assert_eq!(f.ctx.draw(&mut painter)?, 0);
        assert_eq!(f.ctx.hit_test(Point::new(10, 10)), None);
        Ok(())
    }

    #[test]
    fn modal_frames_block_everything_below() -> Result<()> {
        let mut f = pair()?;
        let popup = f.ctx.update(|t| {
            let p = t.create(TestView::new(50, 50).named("popup").with_log(&f.log));
            t.move_to(p, Point::new(120, 20));
            p.id()
        });
        f.ctx.push_frame(popup, true)?;
        assert!(matches!(
            f.ctx.push_frame(popup, true),
            Err(Error::AlreadyAttached(_))
        ));
        assert!(matches!(
            f.ctx.push_frame(f.a, false),
            Err(Error::AlreadyAttached(_))
        ));

        assert_eq!(f.ctx.hit_test(Point::new(130, 30)), Some(popup));
        assert_eq!(f.ctx.hit_test(Point::new(10, 10)), None);

        let (_paint, mut painter) = RecordingPainter::create();
        f.ctx.draw(&mut painter)?;
        let order = f.ctx.paint_order();
        assert_eq!(order.last(), Some(&popup));

        assert!(f.ctx.pop_frame());
        assert!(!f.ctx.tree().contains(popup));
        assert!(!f.ctx.pop_frame());
        assert_eq!(f.ctx.hit_test(Point::new(10, 10)), Some(f.a));
        Ok(())
    }

    #[test]
    fn modeless_frames_let_the_pointer_through() -> Result<()> {
        let mut f = pair()?;
        let popup = f.ctx.update(|t| t.create(TestView::new(50, 50)).id());
        f.ctx.push_frame(popup, false)?;
        assert_eq!(f.ctx.hit_test(Point::new(10, 10)), Some(popup));
        assert_eq!(f.ctx.hit_test(Point::new(150, 60)), Some(f.b));
        Ok(())
    }

    #[test]
    fn higher_layers_win_hit_tests() -> Result<()> {
        let mut f = pair()?;
        let over = f.ctx.update(|t| t.create(TestView::new(40, 40)).id());
        f.ctx.add_frame(over, 1)?;
        assert_eq!(f.ctx.hit_test(Point::new(10, 10)), Some(over));
        f.ctx.update(|t| t.set_layer(over, -1));
        assert_eq!(f.ctx.hit_test(Point::new(10, 10)), Some(f.a));
        Ok(())
    }

    #[test]
    fn window_resize_ignores_zero() -> Result<()> {
        let mut ctx = Context::with_config(Config::default(), NullPlatform)?;
        ctx.resize_event(0, 10);
        ctx.resize_event(640, 480);
        assert_eq!(ctx.size(), Size::new(640, 480));
        ctx.resize_event(640, 0);
        assert_eq!(ctx.size(), Size::new(640, 480));

        let bad = Config {
            arc_resolution: 1,
            ..Config::default()
        };
        assert!(Context::with_config(bad, NullPlatform).is_err());
        Ok(())
    }

    /// Grows by ten pixels per key press.
    struct Grower {
        width: u32,
    }

    impl View for Grower {
        fn preferred_size(&self) -> Size {
            Size::new(self.width, 10)
        }

        fn key_press(&mut self, _event: &KeyEvent, ctx: &mut dyn EventContext) -> Response {
            self.width += 10;
            assert!(ctx.is_focused());
            Response::Accept
        }
    }

    #[test]
    fn handlers_can_change_their_preferred_size() -> Result<()> {
        let mut ctx = Context::new(NullPlatform);
        ctx.resize_event(200, 100);
        let row = ctx.update(|t| -> Result<NodeId> {
            let row = t.create_container(LinearLayout::horizontal(0));
            t.add_child(t.root(), row)?;
            Ok(row)
        })?;
        let g = ctx.add(row, Grower { width: 20 })?;
        ctx.update(|t| t.resize(row, Size::new(200, 100)));
        ctx.cursor_pos_event(5, 50);
        ctx.mouse_button_event(MouseButtonEvent::press(Button::Left));
        assert_eq!(ctx.focus(), None);

        ctx.set_focus(Some(g.id()));
        ctx.key_event(KeyEvent::from('+'));
        assert_eq!(ctx.tree().preferred_size(row), Some(Size::new(30, 10)));
        assert_eq!(ctx.tree().size(g), Some(Size::new(30, 10)));
        Ok(())
    }
}
