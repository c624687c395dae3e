//! The view tree arena and the size/position negotiation protocol.

use std::{
    any::{Any, type_name},
    mem,
};

use slotmap::SlotMap;

use crate::{
    config::Config,
    core::{
        id::{NodeId, TypedId},
        name::ViewName,
        node::{Node, NodeKind},
        view::{DEFAULT_PREFERRED_SIZE, Verdict, View},
    },
    error::{Error, Result},
    form::{Outline, RoundType, clamp_radius},
    geom::{Margin, Orientation, Point, Rect, Size},
    layout::{Arrange, Arrangement, Cell, ChildInfo, FreeLayout, LinearLayout},
    request::{Origin, Update, UpdateRequest},
};

/// Owns every node and runs the negotiation protocol.
///
/// Nodes are addressed by generational [`NodeId`]s; a stale id simply stops
/// resolving. The root is a [`FreeLayout`] container sized by the window.
/// Nodes may also live detached from the root, which is how popup frames
/// are held.
pub struct Tree {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    root: NodeId,
    /// Defaults for new nodes and outline generation.
    config: Config,
    /// Something visible changed since the flag was last taken.
    dirty: bool,
}

/// Smallest size a node can have.
fn at_least_one(size: Size) -> Size {
    Size::new(size.width.max(1), size.height.max(1))
}

/// Outline for a node's current geometry.
fn outline_for(node: &Node, config: &Config) -> Outline {
    Outline::generate(
        node.size,
        config.border_width,
        node.round,
        node.effective_radius,
        config.arc_resolution,
    )
}

impl Tree {
    /// Create a tree holding only the root.
    pub fn new(config: Config) -> Self {
        let mut tree = Self {
            nodes: SlotMap::with_key(),
            root: NodeId::default(),
            config,
            dirty: false,
        };
        let root = tree.insert(None, NodeKind::Container(FreeLayout.into()));
        if let Some(node) = tree.nodes.get_mut(root) {
            node.name = ViewName::convert("root");
            node.margin = Margin::default();
        }
        tree.root = root;
        tree
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The configuration the tree was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look up a node.
    pub fn node(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(id.into())
    }

    /// Does the id refer to a live node?
    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.nodes.contains_key(id.into())
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Parent of a node.
    pub fn parent(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.nodes.get(id.into()).and_then(|n| n.parent)
    }

    /// Children of a node; empty for unknown ids.
    pub fn children(&self, id: impl Into<NodeId>) -> &[NodeId] {
        self.nodes
            .get(id.into())
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Current size of a node.
    pub fn size(&self, id: impl Into<NodeId>) -> Option<Size> {
        self.nodes.get(id.into()).map(|n| n.size)
    }

    /// Position of a node relative to its parent.
    pub fn position(&self, id: impl Into<NodeId>) -> Option<Point> {
        self.nodes.get(id.into()).map(|n| n.position)
    }

    /// Preferred size: the view's for a leaf, the arrangement's aggregate
    /// over visible children plus margins for a container.
    pub fn preferred_size(&self, id: impl Into<NodeId>) -> Option<Size> {
        self.nodes.get(id.into()).map(|n| n.preferred)
    }

    /// Does the node want surplus width?
    pub fn expand_x(&self, id: impl Into<NodeId>) -> bool {
        self.nodes.get(id.into()).is_some_and(|n| n.expand.0)
    }

    /// Does the node want surplus height?
    pub fn expand_y(&self, id: impl Into<NodeId>) -> bool {
        self.nodes.get(id.into()).is_some_and(|n| n.expand.1)
    }

    /// Take the redraw flag, clearing it.
    pub(crate) fn take_dirty(&mut self) -> bool {
        mem::take(&mut self.dirty)
    }

    /// Borrow a view as its concrete type.
    pub fn view<V: View>(&self, id: impl Into<NodeId>) -> Option<&V> {
        let view = self.nodes.get(id.into())?.view.as_deref()?;
        (view as &dyn Any).downcast_ref::<V>()
    }

    /// Borrow a view through its typed id.
    pub fn typed<V: View>(&self, id: TypedId<V>) -> Option<&V> {
        self.view::<V>(id)
    }

    /// Mutate a view, then pick up any change to its preferred size or
    /// expand flags.
    pub fn with_view_mut<V: View, R>(
        &mut self,
        id: impl Into<NodeId>,
        f: impl FnOnce(&mut V) -> R,
    ) -> Result<R> {
        let id = id.into();
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let view = node
            .view
            .as_deref_mut()
            .ok_or_else(|| Error::Invalid(format!("{id:?} has no view")))?;
        let view = (view as &mut dyn Any).downcast_mut::<V>().ok_or_else(|| {
            Error::Invalid(format!("expected view type {}", type_name::<V>()))
        })?;
        let out = f(view);
        self.dirty = true;
        self.report_preferred(id);
        Ok(out)
    }

    /// Lend a view out of its slot.
    pub(crate) fn take_view(&mut self, id: NodeId) -> Option<Box<dyn View>> {
        self.nodes.get_mut(id)?.view.take()
    }

    /// Return a lent view. Dropped if the node was removed meanwhile.
    pub(crate) fn restore_view(&mut self, id: NodeId, view: Box<dyn View>) {
        if let Some(node) = self.nodes.get_mut(id)
            && node.view.is_none()
        {
            node.view = Some(view);
        }
    }

    /// Store a new node, sized to its preferred size.
    fn insert(&mut self, view: Option<Box<dyn View>>, kind: NodeKind) -> NodeId {
        let name = match (&view, &kind) {
            (Some(v), _) => v.name(),
            (None, NodeKind::Container(a)) => ViewName::convert(a.kind()),
            (None, NodeKind::Leaf) => ViewName::convert("leaf"),
        };
        let margin = match kind {
            NodeKind::Container(_) => self.config.default_margin,
            NodeKind::Leaf => Margin::default(),
        };
        let node = Node {
            view,
            kind,
            parent: None,
            children: Vec::new(),
            position: Point::zero(),
            size: DEFAULT_PREFERRED_SIZE,
            margin,
            visible: true,
            round: RoundType::NONE,
            radius: self.config.default_radius,
            effective_radius: 0.0,
            layer: 0,
            name,
            cell: None,
            preferred: DEFAULT_PREFERRED_SIZE,
            expand: (false, false),
            outline: Outline::default(),
        };
        let id = self.nodes.insert(node);
        let (preferred, expand) = self.measure(id);
        if let Some(node) = self.nodes.get_mut(id) {
            node.preferred = preferred;
            node.expand = expand;
            node.size = preferred;
            node.effective_radius = clamp_radius(preferred, node.radius);
            node.outline = outline_for(node, &self.config);
        }
        id
    }

    /// Create a detached leaf node.
    pub fn create<V: View>(&mut self, view: V) -> TypedId<V> {
        TypedId::new(self.insert(Some(Box::new(view)), NodeKind::Leaf))
    }

    /// Create a detached leaf node from a boxed view.
    pub fn create_boxed(&mut self, view: Box<dyn View>) -> NodeId {
        self.insert(Some(view), NodeKind::Leaf)
    }

    /// Create a detached container without a view.
    pub fn create_container(&mut self, arrangement: impl Into<Arrangement>) -> NodeId {
        self.insert(None, NodeKind::Container(arrangement.into()))
    }

    /// Create a detached linear container using the configured default
    /// spacing.
    pub fn create_linear(&mut self, orientation: Orientation) -> NodeId {
        let layout = match orientation {
            Orientation::Horizontal => LinearLayout::horizontal(self.config.default_spacing),
            Orientation::Vertical => LinearLayout::vertical(self.config.default_spacing),
        };
        self.create_container(layout)
    }

    /// Create a detached container whose view draws and handles events.
    pub fn create_container_with<V: View>(
        &mut self,
        arrangement: impl Into<Arrangement>,
        view: V,
    ) -> TypedId<V> {
        TypedId::new(self.insert(
            Some(Box::new(view)),
            NodeKind::Container(arrangement.into()),
        ))
    }

    /// Create a leaf and attach it to `parent`.
    pub fn add<V: View>(&mut self, parent: impl Into<NodeId>, view: V) -> Result<TypedId<V>> {
        let id = self.create(view);
        if let Err(e) = self.add_child(parent, id) {
            self.nodes.remove(id.id());
            return Err(e);
        }
        Ok(id)
    }

    /// Is `ancestor` on the parent chain of `node`?
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Validate attaching `child` under `parent`.
    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<&Arrangement> {
        let p = self.nodes.get(parent).ok_or(Error::NodeNotFound(parent))?;
        let c = self.nodes.get(child).ok_or(Error::NodeNotFound(child))?;
        if child == self.root {
            return Err(Error::RootRemoval);
        }
        let arrangement = p.arrangement().ok_or(Error::NotAContainer(parent))?;
        if c.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::Cycle(child));
        }
        Ok(arrangement)
    }

    /// Cells already taken in a table.
    fn occupied_cells(&self, table: NodeId) -> Vec<Cell> {
        self.children(table)
            .iter()
            .filter_map(|c| self.nodes.get(*c).and_then(|n| n.cell))
            .collect()
    }

    /// Attach a detached node as the last child of a container. Children of
    /// a table fill the next free cell in row-major order.
    pub fn add_child(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        let (parent, child) = (parent.into(), child.into());
        let cell = match self.check_attach(parent, child)? {
            Arrangement::Table(table) => {
                let table = *table;
                Some(
                    table
                        .next_free(&self.occupied_cells(parent))
                        .ok_or_else(|| Error::Cell(format!("table {parent:?} is full")))?,
                )
            }
            _ => None,
        };
        self.attach(parent, child, cell);
        Ok(())
    }

    /// Attach a detached node to a specific table cell.
    pub fn insert_cell(
        &mut self,
        table: impl Into<NodeId>,
        row: u32,
        column: u32,
        child: impl Into<NodeId>,
    ) -> Result<()> {
        let (table, child) = (table.into(), child.into());
        let cell = Cell::new(row, column);
        let Arrangement::Table(layout) = self.check_attach(table, child)? else {
            return Err(Error::Cell(format!("{table:?} is not a table")));
        };
        if !layout.contains(cell) {
            return Err(Error::Cell(format!(
                "cell ({row}, {column}) outside a {}x{} table",
                layout.rows, layout.columns
            )));
        }
        if self.occupied_cells(table).contains(&cell) {
            return Err(Error::Cell(format!("cell ({row}, {column}) is occupied")));
        }
        self.attach(table, child, Some(cell));
        Ok(())
    }

    /// Link a validated child and let the parent react.
    fn attach(&mut self, parent: NodeId, child: NodeId, cell: Option<Cell>) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
            node.cell = cell;
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        tracing::debug!(?parent, ?child, ?cell, "attach");
        self.structure_changed(parent);
    }

    /// Unlink a node from its parent, keeping its subtree alive.
    pub fn detach(&mut self, child: impl Into<NodeId>) -> Result<()> {
        let child = child.into();
        if child == self.root {
            return Err(Error::RootRemoval);
        }
        let node = self.nodes.get_mut(child).ok_or(Error::NodeNotFound(child))?;
        let Some(parent) = node.parent.take() else {
            return Ok(());
        };
        node.cell = None;
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|id| *id != child);
        }
        tracing::debug!(?parent, ?child, "detach");
        self.structure_changed(parent);
        Ok(())
    }

    /// Remove a direct child of `parent` and its whole subtree.
    pub fn remove_child(
        &mut self,
        parent: impl Into<NodeId>,
        child: impl Into<NodeId>,
    ) -> Result<()> {
        let (parent, child) = (parent.into(), child.into());
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if self.parent(child) != Some(parent) {
            return Err(Error::NotAChild { parent, child });
        }
        self.remove(child)
    }

    /// Remove a node and its whole subtree, wherever it is.
    pub fn remove(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Replace a container's arrangement and re-arrange.
    ///
    /// Switching to a table hands every child without a cell the next free
    /// one in row-major order. If the children do not fit, nothing changes
    /// and [`Error::Cell`] is returned. Switching away from a table clears
    /// the cells.
    pub fn set_arrangement(
        &mut self,
        id: impl Into<NodeId>,
        arrangement: impl Into<Arrangement>,
    ) -> Result<()> {
        let id = id.into();
        let arrangement = arrangement.into();
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        if !node.is_container() {
            return Err(Error::NotAContainer(id));
        }
        let children = node.children.clone();

        let mut cells = Vec::with_capacity(children.len());
        if let Arrangement::Table(table) = &arrangement {
            let mut occupied: Vec<Cell> = children
                .iter()
                .filter_map(|c| self.nodes.get(*c).and_then(|n| n.cell))
                .filter(|c| table.contains(*c))
                .collect();
            for child in &children {
                let kept = self
                    .nodes
                    .get(*child)
                    .and_then(|n| n.cell)
                    .filter(|c| table.contains(*c));
                let cell = match kept {
                    Some(cell) => cell,
                    None => {
                        let cell = table.next_free(&occupied).ok_or_else(|| {
                            Error::Cell(format!(
                                "table {id:?} cannot hold {} children",
                                children.len()
                            ))
                        })?;
                        occupied.push(cell);
                        cell
                    }
                };
                cells.push(Some(cell));
            }
        } else {
            cells.resize(children.len(), None);
        }

        if let Some(NodeKind::Container(current)) = self.nodes.get_mut(id).map(|n| &mut n.kind) {
            tracing::debug!(
                ?id,
                from = current.kind(),
                to = arrangement.kind(),
                "arrangement"
            );
            *current = arrangement;
        }
        for (child, cell) in children.into_iter().zip(cells) {
            if let Some(c) = self.nodes.get_mut(child) {
                c.cell = cell;
            }
        }
        self.structure_changed(id);
        Ok(())
    }

    /// Show a different page of a stack container.
    pub fn set_stack_index(&mut self, id: impl Into<NodeId>, index: usize) -> Result<()> {
        let id = id.into();
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let NodeKind::Container(Arrangement::Stack(stack)) = &mut node.kind else {
            return Err(Error::Invalid(format!("{id:?} is not a stack")));
        };
        if stack.active != index {
            stack.active = index;
            tracing::debug!(?id, index, "stack page");
            self.arrange(id, Origin::TopDown);
        }
        Ok(())
    }

    /// Propose a new size. Zero-sized proposals are rejected; an unchanged
    /// size is accepted without touching anything.
    pub fn resize(&mut self, id: impl Into<NodeId>, size: Size) -> bool {
        let id = id.into();
        if !size.is_valid() {
            tracing::trace!(?id, ?size, "rejected resize");
            return false;
        }
        self.negotiate(id, id, Origin::TopDown, Update::Size(size))
    }

    /// Move a node relative to its parent. Always succeeds for a live node;
    /// the view is told about the move but cannot veto it.
    pub fn move_to(&mut self, id: impl Into<NodeId>, position: Point) -> bool {
        let id = id.into();
        self.negotiate(id, id, Origin::TopDown, Update::Position(position))
    }

    /// Change the margin. Rejected when it leaves no content area.
    pub fn set_margin(&mut self, id: impl Into<NodeId>, margin: Margin) -> bool {
        let id = id.into();
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if node.size.rect().inset(margin).is_none() {
            tracing::trace!(?id, ?margin, size = ?node.size, "rejected margin");
            return false;
        }
        self.negotiate(id, id, Origin::TopDown, Update::Margin(margin))
    }

    /// Choose which corners are rounded.
    pub fn set_round_type(&mut self, id: impl Into<NodeId>, round: RoundType) -> bool {
        let id = id.into();
        self.negotiate(id, id, Origin::TopDown, Update::RoundType(round))
    }

    /// Request a corner radius. Negative and NaN radii are rejected; the
    /// stored effective radius is clamped to half the shorter side.
    pub fn set_radius(&mut self, id: impl Into<NodeId>, radius: f32) -> bool {
        let id = id.into();
        if radius.is_nan() || radius < 0.0 {
            tracing::trace!(?id, radius, "rejected radius");
            return false;
        }
        self.negotiate(id, id, Origin::TopDown, Update::RoundRadius(radius))
    }

    /// Show or hide a node. The parent re-arranges.
    pub fn set_visible(&mut self, id: impl Into<NodeId>, visible: bool) -> bool {
        let id = id.into();
        self.negotiate(id, id, Origin::TopDown, Update::Visibility(visible))
    }

    /// Set the stacking layer used among the root's top-level frames.
    pub fn set_layer(&mut self, id: impl Into<NodeId>, layer: i32) -> bool {
        let Some(node) = self.nodes.get_mut(id.into()) else {
            return false;
        };
        if node.layer != layer {
            node.layer = layer;
            self.dirty = true;
        }
        true
    }

    /// Re-read a node's preferred size and expand flags after its content
    /// changed, and let the ancestors react.
    pub fn invalidate_preferred(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        if !self.nodes.contains_key(id) {
            return Err(Error::NodeNotFound(id));
        }
        self.report_preferred(id);
        Ok(())
    }

    /// Does the node already hold the proposed value?
    fn holds(node: &Node, update: &Update) -> bool {
        match *update {
            Update::Size(s) => node.size == s,
            Update::Position(p) => node.position == p,
            Update::Margin(m) => node.margin == m,
            Update::RoundType(r) => node.round == r,
            Update::RoundRadius(r) => node.radius == r,
            Update::Visibility(v) => node.visible == v,
        }
    }

    /// Run one step of the negotiation protocol.
    ///
    /// The target's view may accept, clamp or refuse the proposal, except
    /// for position changes, which always go through. Accepted
    /// updates are stored and the view notified; a container whose size or
    /// margin changed re-arranges its children depth first. When the target
    /// initiated the change itself, a change of its preferred size is
    /// reported to the parent.
    pub(crate) fn negotiate(
        &mut self,
        source: NodeId,
        target: NodeId,
        origin: Origin,
        update: Update,
    ) -> bool {
        let Some(node) = self.nodes.get(target) else {
            return false;
        };
        if Self::holds(node, &update) {
            return true;
        }
        let mut request = UpdateRequest {
            source,
            target,
            origin,
            update,
        };
        let verdict = match request.update {
            // Positions are never negotiated.
            Update::Position(_) => Verdict::Accept,
            _ => node
                .view
                .as_deref()
                .map_or(Verdict::Accept, |v| v.test_update(&request)),
        };
        match (verdict, request.update) {
            (Verdict::Refuse, _) => {
                tracing::trace!(?request, "update refused");
                return false;
            }
            (Verdict::Clamp(size), Update::Size(_)) => {
                let size = at_least_one(size);
                if node.size == size {
                    return true;
                }
                request.update = Update::Size(size);
            }
            _ => {}
        }

        self.store(target, request.update);
        if let Some(view) = self
            .nodes
            .get_mut(target)
            .and_then(|n| n.view.as_deref_mut())
        {
            view.perform_update(&request);
        }
        self.dirty = true;

        match request.update {
            Update::Size(_) | Update::Margin(_) => self.arrange(target, origin),
            Update::Visibility(_) if request.is_self_initiated() => {
                if let Some(parent) = self.parent(target) {
                    self.structure_changed(parent);
                }
            }
            _ => {}
        }
        if request.is_self_initiated() {
            self.report_preferred(target);
        }
        true
    }

    /// Write an accepted update into the node.
    fn store(&mut self, id: NodeId, update: Update) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        match update {
            Update::Size(size) => {
                node.size = size;
                node.effective_radius = clamp_radius(size, node.radius);
                node.outline = outline_for(node, &self.config);
            }
            Update::Position(p) => node.position = p,
            Update::Margin(m) => node.margin = m,
            Update::RoundType(r) => {
                node.round = r;
                node.outline = outline_for(node, &self.config);
            }
            Update::RoundRadius(r) => {
                node.radius = r;
                node.effective_radius = clamp_radius(node.size, r);
                node.outline = outline_for(node, &self.config);
            }
            Update::Visibility(v) => node.visible = v,
        }
    }

    /// Snapshot of a container's children for its arrangement.
    fn child_infos(&self, id: NodeId) -> Vec<ChildInfo> {
        self.children(id)
            .iter()
            .filter_map(|c| self.nodes.get(*c))
            .map(|c| ChildInfo {
                preferred: c.preferred,
                expand_x: c.expand.0,
                expand_y: c.expand.1,
                visible: c.visible,
                position: c.position,
                size: c.size,
                cell: c.cell,
            })
            .collect()
    }

    /// Compute preferred size and expand flags from scratch.
    ///
    /// A leaf whose view is lent out keeps its cached values.
    fn measure(&self, id: NodeId) -> (Size, (bool, bool)) {
        let Some(node) = self.nodes.get(id) else {
            return (DEFAULT_PREFERRED_SIZE, (false, false));
        };
        let view_expand = node
            .view
            .as_deref()
            .map_or((false, false), |v| (v.expand_x(), v.expand_y()));
        match &node.kind {
            NodeKind::Leaf => match node.view.as_deref() {
                Some(v) => (at_least_one(v.preferred_size()), view_expand),
                None => (node.preferred, node.expand),
            },
            NodeKind::Container(arrangement) => {
                let infos = self.child_infos(id);
                let (x, y) = arrangement.expand(&infos);
                (
                    arrangement.preferred_size(node.margin, &infos),
                    (x || view_expand.0, y || view_expand.1),
                )
            }
        }
    }

    /// Refresh cached preferred sizes from `id` upward, re-arranging each
    /// parent whose child changed, until nothing changes.
    pub(crate) fn report_preferred(&mut self, id: NodeId) {
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get(current) else {
                return;
            };
            let measured = self.measure(current);
            if (node.preferred, node.expand) == measured {
                return;
            }
            let parent = node.parent;
            if let Some(node) = self.nodes.get_mut(current) {
                (node.preferred, node.expand) = measured;
            }
            tracing::debug!(id = ?current, preferred = ?measured.0, "preferred size changed");
            let Some(parent) = parent else {
                return;
            };
            self.arrange(parent, Origin::BottomUp);
            current = parent;
        }
    }

    /// A child was added, removed, shown or hidden.
    fn structure_changed(&mut self, parent: NodeId) {
        self.arrange(parent, Origin::BottomUp);
        self.report_preferred(parent);
        self.dirty = true;
    }

    /// Place every child of a container according to its arrangement.
    pub(crate) fn arrange(&mut self, id: NodeId, origin: Origin) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let NodeKind::Container(arrangement) = &node.kind else {
            return;
        };
        let Some(content) = node.content_rect() else {
            tracing::trace!(?id, size = ?node.size, margin = ?node.margin, "no content area");
            return;
        };
        let arrangement = arrangement.clone();
        let children = node.children.clone();
        let placements = arrangement.arrange(content, &self.child_infos(id));
        tracing::debug!(
            ?id,
            kind = arrangement.kind(),
            ?content,
            ?origin,
            children = children.len(),
            "arrange"
        );
        for (child, placement) in children.into_iter().zip(placements) {
            let Some(p) = placement else {
                continue;
            };
            if let Some(visible) = p.visible {
                self.negotiate(id, child, origin, Update::Visibility(visible));
            }
            if let Some(round) = p.round {
                self.negotiate(id, child, origin, Update::RoundType(round));
            }
            self.negotiate(id, child, origin, Update::Position(p.position));
            self.negotiate(id, child, origin, Update::Size(p.size));
        }
    }

    /// A node's rectangle in window coordinates. Detached nodes are
    /// positioned relative to the window.
    pub fn absolute_rect(&self, id: impl Into<NodeId>) -> Option<Rect> {
        let node = self.nodes.get(id.into())?;
        let mut rect = node.rect();
        let mut parent = node.parent;
        while let Some(p) = parent {
            let n = self.nodes.get(p)?;
            rect = rect.translate(n.position);
            parent = n.parent;
        }
        Some(rect)
    }

    /// Top-level children of the root, lowest layer first. Siblings on the
    /// same layer keep their order.
    pub fn layers(&self) -> Vec<NodeId> {
        let mut top: Vec<NodeId> = self.children(self.root).to_vec();
        top.sort_by_key(|id| self.nodes.get(*id).map_or(0, |n| n.layer));
        top
    }

    /// Deepest visible node under `point` within the subtree at `id`.
    pub fn locate(&self, id: impl Into<NodeId>, point: Point) -> Option<NodeId> {
        let id = id.into();
        let origin = self
            .parent(id)
            .and_then(|p| self.absolute_rect(p))
            .map_or_else(Point::zero, |r| r.tl);
        self.locate_recursive(id, origin, point)
    }

    /// Recursive helper for `locate`; `origin` is the parent's window position.
    fn locate_recursive(&self, id: NodeId, origin: Point, point: Point) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if !node.visible {
            return None;
        }
        let rect = node.rect().translate(origin);
        if !rect.contains_point(point) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|child| self.locate_recursive(*child, rect.tl, point))
            .or(Some(id))
    }

    /// Deepest visible node under `point` among the root's descendants,
    /// searching higher layers first. The root itself is never returned.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        let origin = self.nodes.get(self.root)?.position;
        self.layers()
            .iter()
            .rev()
            .find_map(|id| self.locate_recursive(*id, origin, point))
    }

    /// Visible nodes of a subtree in pre-order, the order they are painted in.
    pub fn paint_order(&self, id: impl Into<NodeId>) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id.into()];
        while let Some(next) = stack.pop() {
            let Some(node) = self.nodes.get(next) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            out.push(next);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// First node in pre-order below the root with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(next) = stack.pop() {
            let node = self.nodes.get(next)?;
            if node.name == name {
                return Some(next);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}
