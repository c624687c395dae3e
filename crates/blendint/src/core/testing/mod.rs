//! Test doubles: a scriptable view, a recording backend and platform, and a
//! synthetic font service.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::Level;

use crate::{
    backend::{Painter, Platform, RenderContext},
    core::{
        context::EventContext,
        name::ViewName,
        view::{Response, Verdict, View},
    },
    cursor::CursorType,
    error::{Error, Result},
    event::{KeyEvent, MouseEvent},
    font::{FontDescriptor, FontService, Glyph, GlyphBitmap, GlyphMetrics, PlacedGlyph},
    form::{Outline, RoundType},
    geom::{Point, Rect, Size},
    request::{Update, UpdateRequest},
};

/// Lock a mutex, recovering the data if a panicking test poisoned it.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Install a tracing subscriber that writes through the test harness.
/// Returns false if one was already installed.
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::TRACE)
        .without_time()
        .try_init()
        .is_ok()
}

/// Something that happened to a [`TestView`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An update was stored.
    Update(Update),
    /// A key event.
    Key(KeyEvent),
    /// A left or middle button press.
    Press(MouseEvent),
    /// A left or middle button release.
    Release(MouseEvent),
    /// Pointer motion.
    Move(MouseEvent),
    /// A right button press.
    ContextPress(MouseEvent),
    /// A right button release.
    ContextRelease(MouseEvent),
    /// The pointer entered.
    Enter,
    /// The pointer left.
    Exit,
    /// The view was asked to draw.
    Draw,
}

/// A log shared between test views, recording `(view name, event)` pairs
/// in the order they happened.
#[derive(Debug, Clone, Default)]
pub struct TestLog(Arc<Mutex<Vec<(String, Event)>>>);

impl TestLog {
    /// Append an entry.
    pub fn push(&self, name: &str, event: Event) {
        lock(&self.0).push((name.to_string(), event));
    }

    /// A copy of every entry.
    pub fn entries(&self) -> Vec<(String, Event)> {
        lock(&self.0).clone()
    }

    /// Events recorded by the view called `name`.
    pub fn events_for(&self, name: &str) -> Vec<Event> {
        lock(&self.0)
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Names of views that recorded `Enter` or `Exit`, with a marker, in order.
    pub fn crossings(&self) -> Vec<String> {
        lock(&self.0)
            .iter()
            .filter_map(|(n, e)| match e {
                Event::Enter => Some(format!("+{n}")),
                Event::Exit => Some(format!("-{n}")),
                _ => None,
            })
            .collect()
    }

    /// Forget every entry.
    pub fn clear(&self) {
        lock(&self.0).clear();
    }
}

/// A leaf view with scriptable preferences and responses that records
/// everything delivered to it.
#[derive(Debug, Clone)]
pub struct TestView {
    /// Reported name.
    name: ViewName,
    /// Reported preferred size.
    preferred: Size,
    /// Expand flags.
    expand: (bool, bool),
    /// Takes the focus on a handled press.
    focusable: bool,
    /// Returned from every input handler.
    response: Response,
    /// Refuse every update.
    refuse: bool,
    /// Clamp proposed sizes to this.
    max_size: Option<Size>,
    /// Pushed on enter and popped on exit.
    cursor: Option<CursorType>,
    /// Fail every draw call.
    fail_draw: bool,
    /// Shared record.
    log: TestLog,
}

impl TestView {
    /// A view preferring `width` by `height` that accepts every event.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            name: ViewName::convert("test_view"),
            preferred: Size::new(width, height),
            expand: (false, false),
            focusable: true,
            response: Response::Accept,
            refuse: false,
            max_size: None,
            cursor: None,
            fail_draw: false,
            log: TestLog::default(),
        }
    }

    /// Rename the view.
    pub fn named(mut self, name: &str) -> Self {
        self.name = ViewName::convert(name);
        self
    }

    /// Set the expand flags.
    pub fn expanding(mut self, x: bool, y: bool) -> Self {
        self.expand = (x, y);
        self
    }

    /// Return `response` from every input handler.
    pub fn responding(mut self, response: Response) -> Self {
        self.response = response;
        self
    }

    /// Never take the focus.
    pub fn unfocusable(mut self) -> Self {
        self.focusable = false;
        self
    }

    /// Refuse every update.
    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }

    /// Clamp proposed sizes to at most `max`.
    pub fn clamped_to(mut self, max: Size) -> Self {
        self.max_size = Some(max);
        self
    }

    /// Push `cursor` when the pointer enters and pop it when it leaves.
    pub fn with_cursor(mut self, cursor: CursorType) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Fail every draw call.
    pub fn failing_draw(mut self) -> Self {
        self.fail_draw = true;
        self
    }

    /// Record into `log` instead of a private log.
    pub fn with_log(mut self, log: &TestLog) -> Self {
        self.log = log.clone();
        self
    }

    /// The view's log.
    pub fn log(&self) -> TestLog {
        self.log.clone()
    }

    /// Change the preferred size. Tell the tree with
    /// `Tree::invalidate_preferred` or mutate through `Tree::with_view_mut`.
    pub fn set_preferred(&mut self, size: Size) {
        self.preferred = size;
    }

    /// Events recorded by this view.
    pub fn events(&self) -> Vec<Event> {
        self.log.events_for(self.name.as_str())
    }

    /// Updates recorded by this view.
    pub fn updates(&self) -> Vec<Update> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Update(u) => Some(u),
                _ => None,
            })
            .collect()
    }

    /// Log an event under this view's name.
    fn record(&self, event: Event) -> Response {
        self.log.push(self.name.as_str(), event);
        self.response
    }
}

impl View for TestView {
    fn name(&self) -> ViewName {
        self.name.clone()
    }

    fn preferred_size(&self) -> Size {
        self.preferred
    }

    fn expand_x(&self) -> bool {
        self.expand.0
    }

    fn expand_y(&self) -> bool {
        self.expand.1
    }

    fn accept_focus(&self) -> bool {
        self.focusable
    }

    fn test_update(&self, request: &UpdateRequest) -> Verdict {
        if self.refuse {
            return Verdict::Refuse;
        }
        match (request.update, self.max_size) {
            (Update::Size(s), Some(max)) if !max.contains(&s) => Verdict::Clamp(Size::new(
                s.width.min(max.width),
                s.height.min(max.height),
            )),
            _ => Verdict::Accept,
        }
    }

    fn perform_update(&mut self, request: &UpdateRequest) {
        self.record(Event::Update(request.update));
    }

    fn key_press(&mut self, event: &KeyEvent, _ctx: &mut dyn EventContext) -> Response {
        self.record(Event::Key(*event))
    }

    fn mouse_press(&mut self, event: &MouseEvent, _ctx: &mut dyn EventContext) -> Response {
        self.record(Event::Press(*event))
    }

    fn mouse_release(&mut self, event: &MouseEvent, _ctx: &mut dyn EventContext) -> Response {
        self.record(Event::Release(*event))
    }

    fn mouse_move(&mut self, event: &MouseEvent, _ctx: &mut dyn EventContext) -> Response {
        self.record(Event::Move(*event))
    }

    fn context_menu_press(&mut self, event: &MouseEvent, _ctx: &mut dyn EventContext) -> Response {
        self.record(Event::ContextPress(*event))
    }

    fn context_menu_release(
        &mut self,
        event: &MouseEvent,
        _ctx: &mut dyn EventContext,
    ) -> Response {
        self.record(Event::ContextRelease(*event))
    }

    fn cursor_enter(&mut self, ctx: &mut dyn EventContext) -> Response {
        if let Some(cursor) = self.cursor {
            ctx.push_cursor(cursor);
        }
        self.record(Event::Enter)
    }

    fn cursor_exit(&mut self, ctx: &mut dyn EventContext) -> Response {
        if self.cursor.is_some() {
            ctx.pop_cursor();
        }
        self.record(Event::Exit)
    }

    fn draw(&self, r: &mut RenderContext<'_>) -> Result<Response> {
        self.log.push(self.name.as_str(), Event::Draw);
        if self.fail_draw {
            return Err(Error::Render(format!("{} refused to draw", self.name)));
        }
        r.shape()?;
        Ok(Response::Accept)
    }
}

/// A backend call captured by [`RecordingPainter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCall {
    /// Frame start with the window size.
    Begin(Size),
    /// A round-cornered box.
    Shape {
        /// Window rectangle.
        rect: Rect,
        /// Rounded corners.
        round: RoundType,
        /// Effective radius.
        radius: f32,
        /// Outline vertex count.
        vertices: usize,
    },
    /// A run of glyphs.
    Glyphs {
        /// Origin the glyphs are relative to.
        origin: Point,
        /// The characters drawn.
        text: String,
    },
    /// Frame end.
    End,
}

/// Calls captured by a [`RecordingPainter`].
#[derive(Debug, Clone, Default)]
pub struct PaintLog {
    /// Every call in order.
    pub calls: Vec<PaintCall>,
}

impl PaintLog {
    /// Rectangles of every shape drawn.
    pub fn shapes(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PaintCall::Shape { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Number of completed frames.
    pub fn frames(&self) -> usize {
        self.calls.iter().filter(|c| **c == PaintCall::End).count()
    }
}

/// A [`Painter`] that records its calls.
#[derive(Debug, Clone)]
pub struct RecordingPainter {
    /// Shared record.
    pub log: Arc<Mutex<PaintLog>>,
}

impl RecordingPainter {
    /// Returns the shared record and the painter writing to it.
    pub fn create() -> (Arc<Mutex<PaintLog>>, Self) {
        let log = Arc::new(Mutex::new(PaintLog::default()));
        (log.clone(), Self { log })
    }

    /// A copy of the record.
    pub fn snapshot(&self) -> PaintLog {
        lock(&self.log).clone()
    }
}

impl Painter for RecordingPainter {
    fn begin_frame(&mut self, size: Size) -> Result<()> {
        lock(&self.log).calls.push(PaintCall::Begin(size));
        Ok(())
    }

    fn shape(&mut self, rect: Rect, outline: &Outline, round: RoundType, radius: f32) -> Result<()> {
        lock(&self.log).calls.push(PaintCall::Shape {
            rect,
            round,
            radius,
            vertices: outline.vertex_count(),
        });
        Ok(())
    }

    fn glyphs(&mut self, origin: Point, glyphs: &[PlacedGlyph]) -> Result<()> {
        lock(&self.log).calls.push(PaintCall::Glyphs {
            origin,
            text: glyphs.iter().map(|g| g.ch).collect(),
        });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        lock(&self.log).calls.push(PaintCall::End);
        Ok(())
    }
}

/// Requests captured by a [`RecordingPlatform`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformLog {
    /// Number of redraw requests.
    pub redraws: usize,
    /// Every cursor change in order.
    pub cursors: Vec<CursorType>,
}

/// A [`Platform`] that records its calls.
#[derive(Debug, Clone)]
pub struct RecordingPlatform {
    /// Shared record.
    pub log: Arc<Mutex<PlatformLog>>,
}

impl RecordingPlatform {
    /// Returns the shared record and the platform writing to it.
    pub fn create() -> (Arc<Mutex<PlatformLog>>, Self) {
        let log = Arc::new(Mutex::new(PlatformLog::default()));
        (log.clone(), Self { log })
    }
}

impl Platform for RecordingPlatform {
    fn request_redraw(&mut self) {
        lock(&self.log).redraws += 1;
    }

    fn set_cursor(&mut self, cursor: CursorType) {
        lock(&self.log).cursors.push(cursor);
    }
}

/// Read a shared record.
pub fn snapshot<T: Clone>(log: &Mutex<T>) -> T {
    lock(log).clone()
}

/// A monospaced synthetic font. Every visible character is an opaque
/// `advance`-wide box three quarters of the line height tall, sitting on
/// the baseline; whitespace has no bitmap.
#[derive(Debug, Clone, Default)]
pub struct MapFontService {
    /// Pen advance of every glyph.
    advance: u32,
    /// Line height.
    line_height: u32,
    /// Glyphs returned instead of the synthetic box.
    overrides: HashMap<char, Glyph>,
    /// Characters that fail to rasterise.
    missing: HashSet<char>,
    /// Number of `lookup` calls.
    lookups: usize,
}

impl MapFontService {
    /// A font with fixed advance and line height.
    pub fn new(advance: u32, line_height: u32) -> Self {
        Self {
            advance,
            line_height,
            ..Default::default()
        }
    }

    /// Return `glyph` for `ch`.
    pub fn with_glyph(mut self, ch: char, glyph: Glyph) -> Self {
        self.overrides.insert(ch, glyph);
        self
    }

    /// Fail lookups of `ch`.
    pub fn without(mut self, ch: char) -> Self {
        self.missing.insert(ch);
        self
    }

    /// Number of lookups so far.
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}

impl FontService for MapFontService {
    fn lookup(&mut self, ch: char, font: &FontDescriptor) -> Result<Glyph> {
        self.lookups += 1;
        if self.missing.contains(&ch) {
            return Err(Error::Font(format!("no glyph for {ch:?} in {}", font.family)));
        }
        if let Some(glyph) = self.overrides.get(&ch) {
            return Ok(glyph.clone());
        }
        if ch.is_whitespace() {
            return Ok(Glyph {
                metrics: GlyphMetrics {
                    advance: self.advance,
                    ..Default::default()
                },
                bitmap: GlyphBitmap::default(),
            });
        }
        let height = self.line_height * 3 / 4;
        Ok(Glyph {
            metrics: GlyphMetrics {
                width: self.advance,
                height,
                bearing_x: 0,
                bearing_y: height as i32,
                advance: self.advance,
            },
            bitmap: GlyphBitmap {
                width: self.advance,
                height,
                pixels: vec![255; (self.advance * height) as usize],
            },
        })
    }

    fn line_height(&self, _font: &FontDescriptor) -> u32 {
        self.line_height
    }
}
