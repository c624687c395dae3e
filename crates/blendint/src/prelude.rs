//! Convenience re-exports for common BlendInt types.

pub use crate::{
    Context, EventContext, NodeId, Tree, TypedId, ViewName,
    backend::{Painter, Platform, RenderContext},
    config::Config,
    cursor::CursorType,
    error::{self, Error},
    event::{Action, Button, KeyCode, KeyEvent, Mods, MouseButtonEvent, MouseEvent},
    form::RoundType,
    geom::{Edges, Margin, Orientation, Point, Rect, Size},
    layout::{
        Alignment, BlockLayout, Cell, FreeLayout, LinearLayout, StackLayout, TableLayout,
    },
    view::{Response, Verdict, View},
};

/// Common result alias for BlendInt operations.
pub type Result<T> = error::Result<T>;
