use egui::{self, CursorIcon, Id, Margin, Order, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use epaint::Shape;
use tracing::{debug, trace};

use crate::utils::{insert_index, shift_vec};
use crate::Handle;

/// Width of the line marking the edge the dragged item would land on.
const DROP_MARKER_WIDTH: f32 = 4.0;
/// How much narrower the placeholder of the dragged item is drawn, relative to the list width.
const PLACEHOLDER_SHRINK: f32 = 0.05;

/// Which side of the hovered item the dragged item lands on if dropped now.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Above,
    #[default]
    Below,
}

impl DropPosition {
    /// Above if the pointer is above the vertical midpoint of `container`, below otherwise.
    pub fn from_pointer(pointer_y: f32, container: Rect) -> Self {
        if pointer_y < container.center().y {
            DropPosition::Above
        } else {
            DropPosition::Below
        }
    }
}

/// State of a drag in progress. Only exists between a drag start and the following drop or drag end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Index of the item being dragged
    pub source: usize,
    /// Index of the item under the pointer. Never equal to `source`.
    pub hovered: Option<usize>,
    pub position: DropPosition,
}

/// How an item should be presented, derived from the drag state each frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ItemVisuals {
    /// The item is the one being dragged: drawn faded and shrunk.
    pub dragging: bool,
    /// The item is hovered by a drag: an edge marker is drawn on this side.
    pub drag_over: Option<DropPosition>,
}

/// Result of drawing a [DragDropUi] for one frame.
///
/// `CurrentDrag` is returned while something is being dragged and can be used to update some state
/// while the drag is in progress. `Completed` carries the full reordered list after a successful drop
/// and is returned at most once per drop. Commit it with [DragDropResponse::on_reorder] or by
/// replacing your list with it.
#[derive(Debug, Clone, PartialEq)]
pub enum DragDropResponse<T> {
    NoDrag,
    CurrentDrag(DragSession),
    Completed(Vec<T>),
}

impl<T> DragDropResponse<T> {
    /// Calls `on_reorder` with the new list if a drop completed this frame. Returns whether it was called.
    pub fn on_reorder(self, on_reorder: impl FnOnce(Vec<T>)) -> bool {
        match self {
            DragDropResponse::Completed(items) => {
                on_reorder(items);
                true
            }
            _ => false,
        }
    }

    pub fn completed(self) -> Option<Vec<T>> {
        match self {
            DragDropResponse::Completed(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragDropResponse::CurrentDrag(_))
    }
}

/// [DragDropUi] stores the state of the Drag & Drop list.
///
/// It never touches the caller's items. The list is passed in every frame and a reordered copy is
/// handed back once a drop completes.
///
/// `item_ui` should be a function to draw the ui elements for each item in `items`. Its arguments are:
/// - a mutable reference to the ui
/// - a `Handle` that can be used to draw the draggable part of the item ui
/// - the index of the current item in the `items` list
/// - a reference to the current item in the `items` list
///
/// # Example
/// ```rust,no_run
/// use eframe::egui::{CentralPanel, Context};
/// use egui_reorder::DragDropUi;
///
/// struct DnDApp {
///     items: Vec<String>,
///     dnd: DragDropUi,
/// }
///
/// impl eframe::App for DnDApp {
///     fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
///         CentralPanel::default().show(ctx, |ui| {
///             self.dnd
///                 .ui(ui, &self.items, |ui, handle, _index, item| {
///                     ui.horizontal(|ui| {
///                         handle.ui(ui, |ui| {
///                             ui.label("grab");
///                         });
///                         ui.label(item.as_str());
///                     });
///                 })
///                 .on_reorder(|items| self.items = items);
///         });
///     }
/// }
///
/// fn main() -> eframe::Result<()> {
///     eframe::run_native(
///         "DnD Example",
///         eframe::NativeOptions::default(),
///         Box::new(|_| {
///             Box::new(DnDApp {
///                 dnd: DragDropUi::default(),
///                 items: vec!["a", "b", "c"].into_iter().map(String::from).collect(),
///             })
///         }),
///     )
/// }
/// ```
#[derive(Clone, Debug)]
pub struct DragDropUi {
    id: Id,
    session: Option<DragSession>,
    /// Pointer position relative to the origin of the dragged widget when dragging began
    pub(crate) drag_delta: Option<Vec2>,
}

impl Default for DragDropUi {
    fn default() -> Self {
        Self::new("drag_drop_ui")
    }
}

impl DragDropUi {
    /// Use a distinct `id_salt` for every list drawn into the same parent ui.
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id: Id::new(id_salt),
            session: None,
            drag_delta: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.session.map(|s| s.source)
    }

    pub fn drag_over_index(&self) -> Option<usize> {
        self.session.and_then(|s| s.hovered)
    }

    /// Defaults to [DropPosition::Below] when no drag is active.
    pub fn drop_position(&self) -> DropPosition {
        self.session.map(|s| s.position).unwrap_or_default()
    }

    pub fn item_visuals(&self, index: usize) -> ItemVisuals {
        match self.session {
            Some(session) => ItemVisuals {
                dragging: session.source == index,
                drag_over: (session.hovered == Some(index)).then_some(session.position),
            },
            None => ItemVisuals::default(),
        }
    }

    /// Starts dragging the item at `index`. A drag already in progress is replaced.
    pub fn begin_drag(&mut self, index: usize) {
        debug!(index, "drag started");
        self.session = Some(DragSession {
            source: index,
            hovered: None,
            position: DropPosition::default(),
        });
        self.drag_delta = None;
    }

    /// The pointer moved over the container of the item at `index`.
    pub fn hover(&mut self, index: usize, pointer_y: f32, container: Rect) {
        let Some(session) = &mut self.session else {
            return;
        };
        if session.source == index {
            return;
        }

        let position = DropPosition::from_pointer(pointer_y, container);
        if session.hovered != Some(index) || session.position != position {
            trace!(index, ?position, "drag target changed");
        }
        session.hovered = Some(index);
        session.position = position;
    }

    /// The pointer left a container. Nested widgets report leaving while the pointer is still inside
    /// the container, so the target is only cleared once `pointer` is outside `container`.
    pub fn leave_container(&mut self, pointer: Pos2, container: Rect) {
        if container.contains(pointer) {
            return;
        }
        if let Some(session) = &mut self.session {
            if session.hovered.is_some() {
                trace!("drag target cleared");
            }
            session.hovered = None;
        }
    }

    /// The dragged item was released over the item at `drop_index`. Calls `on_reorder` with the
    /// reordered copy of `items` unless this is a drop onto the dragged item itself. The drag ends
    /// either way.
    pub fn drop<T: Clone>(&mut self, items: &[T], drop_index: usize, on_reorder: impl FnOnce(Vec<T>)) {
        if let Some(session) = self.session {
            if session.source == drop_index {
                debug!(index = drop_index, "item dropped onto itself");
            } else {
                let mut reordered = items.to_vec();
                if shift_vec(session.source, drop_index, session.position, &mut reordered) {
                    debug!(
                        source = session.source,
                        target = drop_index,
                        position = ?session.position,
                        insert = insert_index(session.source, drop_index, session.position),
                        "items reordered"
                    );
                    on_reorder(reordered);
                } else {
                    debug!(
                        source = session.source,
                        target = drop_index,
                        len = items.len(),
                        "drop outside of list bounds ignored"
                    );
                }
            }
        }
        self.end_drag();
    }

    /// Ends the drag without a drop, e.g. when released outside of the list.
    pub fn end_drag(&mut self) {
        if self.session.take().is_some() {
            debug!("drag ended");
        }
        self.drag_delta = None;
    }

    /// Draws the list and handles the dragging for this frame.
    pub fn ui<T: Clone>(
        &mut self,
        ui: &mut Ui,
        items: &[T],
        mut item_ui: impl FnMut(&mut Ui, Handle, usize, &T),
    ) -> DragDropResponse<T> {
        let (pointer_pos, released) =
            ui.input(|i| (i.pointer.hover_pos(), i.pointer.any_released()));

        // egui dropped the drag without a release we saw (escape, focus loss, ...)
        if self.is_dragging() && !released && !ui.memory(|mem| mem.is_anything_being_dragged()) {
            debug!("drag cancelled");
            self.end_drag();
        }

        let mut drop_target = None;
        let mut source_width = None;

        // draw list entries
        let has_drop_target = self.drag_over_index().is_some();
        DragDropUi::draw_list(ui, has_drop_target, |ui| {
            let half_spacing = Vec2::new(0.0, ui.spacing().item_spacing.y / 2.0);
            for (idx, item) in items.iter().enumerate() {
                let rect = self.draw_item(ui, idx, |ui, handle| item_ui(ui, handle, idx, item));
                if self.dragged_index() == Some(idx) {
                    source_width = Some(rect.width());
                }

                // containers are hit tested without the gaps between them
                let container = rect.expand2(half_spacing);
                match pointer_pos {
                    Some(pointer) if self.is_dragging() => {
                        if container.contains(pointer) {
                            self.hover(idx, pointer.y, container);
                            drop_target = Some(idx);
                        } else if self.drag_over_index() == Some(idx) {
                            self.leave_container(pointer, container);
                        }
                    }
                    _ => {}
                }

                self.paint_drop_marker(ui, idx, rect);
            }
        });

        let Some(session) = self.session else {
            return DragDropResponse::NoDrag;
        };

        if released {
            let mut reordered = None;
            match drop_target {
                Some(idx) => self.drop(items, idx, |new_items| reordered = Some(new_items)),
                None => self.end_drag(),
            }
            return match reordered {
                Some(items) => DragDropResponse::Completed(items),
                None => DragDropResponse::NoDrag,
            };
        }

        // dragging in progress
        ui.output_mut(|o| o.cursor_icon = CursorIcon::Grabbing);
        if let (Some(pointer), Some(item)) = (pointer_pos, items.get(session.source)) {
            self.draw_proxy(ui, pointer, source_width, |ui, handle| {
                item_ui(ui, handle, session.source, item)
            });
        }

        DragDropResponse::CurrentDrag(session)
    }

    /// Draw the widget for an item using `item_body` and return its rect. The item being dragged is
    /// drawn as a disabled placeholder with a shrunk outline, it follows the pointer in
    /// [DragDropUi::draw_proxy].
    fn draw_item(
        &mut self,
        ui: &mut Ui,
        index: usize,
        mut item_body: impl FnMut(&mut Ui, Handle),
    ) -> Rect {
        let id = self.id.with(index);

        if !self.item_visuals(index).dragging {
            // not dragged -> draw widget to ui
            let scope = ui.scope(|ui| {
                item_body(
                    ui,
                    Handle {
                        state: self,
                        id,
                        index,
                        placeholder: false,
                    },
                )
            });
            return scope.response.rect;
        }

        // disabled style for placeholder ui, inset so it reads as shrunk
        let inset = ui.available_width() * PLACEHOLDER_SHRINK / 2.0;
        let scope = ui.scope(|ui| {
            egui::Frame::none()
                .inner_margin(Margin::symmetric(inset, 0.0))
                .show(ui, |ui| {
                    ui.add_enabled_ui(false, |ui| {
                        item_body(
                            ui,
                            Handle {
                                state: self,
                                id,
                                index,
                                placeholder: true,
                            },
                        )
                    });
                });
        });
        let rect = scope.response.rect;

        let visuals = ui.visuals().widgets.noninteractive;
        ui.painter().rect_stroke(
            rect.shrink2(Vec2::new(inset, 0.0)),
            visuals.rounding,
            visuals.bg_stroke,
        );

        rect
    }

    /// Draws a copy of the dragged item on top of everything at the pointer position. It is rebuilt
    /// every frame, so there is nothing to clean up once the drag ends.
    fn draw_proxy(
        &mut self,
        ui: &mut Ui,
        pointer_pos: Pos2,
        width: Option<f32>,
        mut item_body: impl FnMut(&mut Ui, Handle),
    ) {
        let Some(source) = self.dragged_index() else {
            return;
        };
        let id = self.id.with(source);
        let pos = pointer_pos + self.drag_delta.unwrap_or_default();
        let frame = egui::Frame::popup(ui.style()).stroke(ui.visuals().selection.stroke);

        egui::Area::new(self.id.with("drag_proxy"))
            .order(Order::Tooltip)
            .interactable(false)
            .fixed_pos(pos)
            .show(ui.ctx(), |ui| {
                frame.show(ui, |ui| {
                    if let Some(width) = width {
                        ui.set_width(width);
                    }
                    ui.add_enabled_ui(false, |ui| {
                        item_body(
                            ui,
                            Handle {
                                state: self,
                                id,
                                index: source,
                                placeholder: true,
                            },
                        )
                    });
                });
            });
    }

    fn paint_drop_marker(&self, ui: &Ui, index: usize, rect: Rect) {
        let Some(position) = self.item_visuals(index).drag_over else {
            return;
        };
        let y = match position {
            DropPosition::Above => rect.top(),
            DropPosition::Below => rect.bottom(),
        };
        let stroke = Stroke::new(DROP_MARKER_WIDTH, ui.visuals().selection.stroke.color);
        ui.painter()
            .line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
    }

    /// Draw the list body on a background that takes the selection color while a dragged item is
    /// over one of its entries.
    fn draw_list(ui: &mut Ui, has_drop_target: bool, list_body: impl FnOnce(&mut Ui)) {
        let margin = Vec2::splat(4.0);

        let bounds = ui.available_rect_before_wrap();
        let background = ui.painter().add(Shape::Noop);

        let mut content_ui = ui.child_ui(bounds.shrink2(margin), *ui.layout());
        list_body(&mut content_ui);

        let size = (content_ui.min_rect().max + margin) - bounds.min;
        let (rect, _) = ui.allocate_at_least(size, Sense::hover());

        let visuals = ui.visuals();
        let fill = if has_drop_target {
            visuals.selection.bg_fill.linear_multiply(0.25)
        } else {
            visuals.faint_bg_color
        };
        let rounding = visuals.widgets.noninteractive.rounding;
        ui.painter()
            .set(background, Shape::rect_filled(rect, rounding, fill));
    }
}
