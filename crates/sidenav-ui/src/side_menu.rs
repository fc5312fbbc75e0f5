//! The collapsible side menu: a header with logo and toggle button above a
//! stack of [`ItemView`] rows built from a [`MenuModel`].
//!
//! Widths are kept in pixels, as the configuration surface expresses them,
//! and converted to grid columns with [`SideMenuConfig::column_px`]. Toggling
//! animates the width toward its target on a recurring timer; the host
//! forwards [`Msg::Tick`]s and re-lays out on [`SideMenuAction::Resized`].

use std::sync::mpsc::Sender;
use std::time::Duration;

use sidenav_core::{
    AttrMask, Cell, Color, Context, Effect, Grid, Key, ListenerId, MouseAction, Msg, Point, Range,
    Style, TimerId,
};
use sidenav_menu::{Icon, MenuItem, MenuModel};

use crate::item_view::{ClickIntent, ItemView, RowLook};

/// Static configuration of a [`SideMenu`].
#[derive(Debug)]
pub struct SideMenuConfig {
    pub model: MenuModel,
    /// Sender the menu subscribes to its model with. Without one the menu
    /// only rebuilds on its own changes and on [`SideMenu::rebuild`].
    pub mailbox: Option<Sender<Msg>>,
    pub expanded: bool,
    pub collapsed_width: i32,
    pub expanded_width: i32,
    /// Pixels per grid column.
    pub column_px: i32,
    /// Left indent per nesting level, in pixels.
    pub indent_px: i32,
    pub header_rows: i32,
    /// Grid rows available to the menu, header included. `None` leaves the
    /// rows unscrolled until [`SideMenu::set_height`] or a `Msg::Screen`.
    pub height: Option<i32>,
    /// Animation tick interval.
    pub tick: Duration,
    pub keys: SideMenuKeys,
    pub style: SideMenuStyle,
}

impl Default for SideMenuConfig {
    fn default() -> Self {
        Self {
            model: SideMenu::default_model(),
            mailbox: None,
            expanded: false,
            collapsed_width: 60,
            expanded_width: 250,
            column_px: 10,
            indent_px: 15,
            header_rows: 3,
            height: None,
            tick: Duration::from_millis(10),
            keys: SideMenuKeys::default(),
            style: SideMenuStyle::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SideMenuKeys {
    pub up: Vec<Key>,
    pub down: Vec<Key>,
    /// Click the selected row.
    pub invoke: Vec<Key>,
    /// Switch between collapsed and expanded.
    pub toggle: Vec<Key>,
}

impl Default for SideMenuKeys {
    fn default() -> Self {
        Self {
            up: vec![Key::ArrowUp, Key::Char('k')],
            down: vec![Key::ArrowDown, Key::Char('j')],
            invoke: vec![Key::Enter, Key::Space],
            toggle: vec![Key::Tab],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideMenuStyle {
    pub background: Color,
    /// Color of the toggle button glyph.
    pub hamburger_color: Color,
    pub toggle_hover: Color,
    pub hover: Color,
    pub text_hover: Color,
    pub text: Color,
    pub selected: Color,
    pub disabled: Color,
    /// Text attributes of the row labels.
    pub font: AttrMask,
    pub hamburger_icon: Icon,
    pub close_icon: Icon,
    /// Takes precedence over `logo_text` when set.
    pub logo_icon: Option<Icon>,
    pub logo_text: String,
}

impl Default for SideMenuStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            hamburger_color: Color::BLACK,
            toggle_hover: Color::from_rgb(70, 70, 70),
            hover: Color::CYAN,
            text_hover: Color::BLACK,
            text: Color::BLACK,
            selected: Color::from_rgb(80, 80, 80),
            disabled: Color::from_rgb(120, 120, 120),
            font: AttrMask::BOLD,
            hamburger_icon: Icon::glyph('☰'),
            close_icon: Icon::glyph('×'),
            logo_icon: None,
            logo_text: String::new(),
        }
    }
}

/// Actions returned by [`SideMenu::update`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SideMenuAction {
    Pass,
    /// Hover or selection moved.
    Move,
    /// The menu switched between collapsed and expanded; an animation may
    /// be pending in [`SideMenu::take_effect`].
    Toggled,
    /// The width changed by one animation step.
    Resized,
    /// The named row's children are now visible.
    Expanded(String),
    /// The named row's children are now hidden.
    Collapsed(String),
    /// A leaf row was clicked; carries its text.
    Activated(String),
    /// Rows were rebuilt after a model change.
    Rebuilt,
}

#[derive(Debug)]
struct Animation {
    timer: TimerId,
    ctx: Context,
    target: i32,
    step: i32,
}

#[derive(Debug)]
pub struct SideMenu {
    model: MenuModel,
    mailbox: Option<Sender<Msg>>,
    listener: Option<ListenerId>,
    expanded: bool,
    /// Current width in pixels; differs from the target while animating.
    width: i32,
    collapsed_width: i32,
    expanded_width: i32,
    column_px: i32,
    indent_px: i32,
    header_rows: i32,
    height: Option<i32>,
    tick: Duration,
    rows: Vec<ItemView>,
    /// Index of the first row drawn below the header.
    scroll: usize,
    selected: Option<usize>,
    hover: Option<usize>,
    toggle_hover: bool,
    animation: Option<Animation>,
    pending: Option<Effect>,
    keys: SideMenuKeys,
    style: SideMenuStyle,
    action: SideMenuAction,
}

impl SideMenu {
    pub fn new(config: SideMenuConfig) -> Self {
        let width = if config.expanded {
            config.expanded_width
        } else {
            config.collapsed_width
        };
        let mut menu = Self {
            model: MenuModel::new(),
            mailbox: config.mailbox,
            listener: None,
            expanded: config.expanded,
            width,
            collapsed_width: config.collapsed_width,
            expanded_width: config.expanded_width,
            column_px: config.column_px.max(1),
            indent_px: config.indent_px,
            header_rows: config.header_rows.max(1),
            height: config.height,
            tick: config.tick,
            rows: Vec::new(),
            scroll: 0,
            selected: None,
            hover: None,
            toggle_hover: false,
            animation: None,
            pending: None,
            keys: config.keys,
            style: config.style,
            action: SideMenuAction::Pass,
        };
        menu.set_model(config.model);
        menu
    }

    /// The five entries a fresh menu starts with.
    pub fn default_model() -> MenuModel {
        [
            ("Home", "/icons/home.png", "Go to Home"),
            ("Profile", "/icons/profile.png", "View user profile"),
            ("Messages", "/icons/messages.png", "View messages"),
            ("Settings", "/icons/settings.png", "Go to settings"),
            ("Help", "/icons/help.png", "Help"),
        ]
        .into_iter()
        .map(|(text, icon, tip)| MenuItem::new(text).with_icon_path(icon).with_tooltip(tip))
        .collect()
    }

    // -- Model --

    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    /// Mutations made through this reference notify the menu like any
    /// other observer: the rows are rebuilt on the next turn.
    pub fn model_mut(&mut self) -> &mut MenuModel {
        &mut self.model
    }

    /// Swap in a new model, detaching from the old one. Returns the old
    /// model.
    pub fn set_model(&mut self, model: MenuModel) -> MenuModel {
        let mut old = std::mem::replace(&mut self.model, model);
        if let Some(id) = self.listener.take() {
            old.unsubscribe(id);
        }
        if let Some(tx) = &self.mailbox {
            self.listener = Some(self.model.subscribe(tx.clone()));
        }
        self.rebuild();
        old
    }

    /// See [`MenuModel::bind_action`].
    pub fn bind_action(&mut self, text: &str, action: impl Fn(&str) + 'static) -> bool {
        self.model.bind_action(text, action)
    }

    /// Re-derive the rows from the model. Nodes that cannot be rendered
    /// are logged and skipped.
    pub fn rebuild(&mut self) {
        let selected_path = self
            .selected
            .and_then(|i| self.rows.get(i))
            .map(|row| row.path().to_vec());

        let mut rows = Vec::new();
        for entry in self.model.flatten() {
            match ItemView::from_entry(&entry) {
                Ok(view) => rows.push(view),
                Err(e) => log::warn!("skipping menu row: {e}"),
            }
        }
        self.rows = rows;
        self.hover = None;
        self.selected = selected_path
            .and_then(|p| self.rows.iter().position(|r| r.path() == p.as_slice()));
        if let Some(i) = self.selected {
            self.rows[i].set_selected(true);
        }
        self.scroll_to_selection();
        log::debug!("side menu rebuilt with {} rows", self.rows.len());
    }

    pub fn rows(&self) -> &[ItemView] {
        &self.rows
    }

    /// Texts of the current rows, top to bottom.
    pub fn row_texts(&self) -> Vec<&str> {
        self.rows.iter().map(ItemView::text).collect()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_selected(&mut self, row: Option<usize>) {
        if let Some(i) = self.selected.take() {
            if let Some(r) = self.rows.get_mut(i) {
                r.set_selected(false);
            }
        }
        if let Some(r) = row.and_then(|i| self.rows.get_mut(i)) {
            r.set_selected(true);
            self.selected = row;
        }
        self.scroll_to_selection();
    }

    /// Index of the first visible row.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Set the grid rows available to the menu, header included.
    pub fn set_height(&mut self, rows: i32) {
        self.height = Some(rows.max(0));
        self.scroll_to_selection();
    }

    fn visible_rows(&self) -> usize {
        self.height
            .map_or(usize::MAX, |h| (h - self.header_rows).max(0) as usize)
    }

    fn scroll_to_selection(&mut self) {
        let visible = self.visible_rows();
        if let Some(i) = self.selected {
            if i < self.scroll {
                self.scroll = i;
            } else if visible > 0 && i >= self.scroll.saturating_add(visible) {
                self.scroll = i + 1 - visible;
            }
        }
        let max = self.rows.len().saturating_sub(visible.max(1));
        self.scroll = self.scroll.min(max);
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover
    }

    /// Tooltip of the row under the mouse.
    pub fn hovered_tooltip(&self) -> Option<&str> {
        self.hover
            .and_then(|i| self.rows.get(i))
            .and_then(ItemView::tooltip)
    }

    // -- Size and state --

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Current width in pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Current width in grid columns, rounded up.
    pub fn columns(&self) -> i32 {
        px_to_columns(self.width, self.column_px)
    }

    pub fn collapsed_width(&self) -> i32 {
        self.collapsed_width
    }

    pub fn expanded_width(&self) -> i32 {
        self.expanded_width
    }

    /// Applies at once while collapsed. A running collapse animation is
    /// restarted toward the new width; its effect is queued for
    /// [`take_effect`](Self::take_effect).
    pub fn set_collapsed_width(&mut self, px: i32) {
        self.collapsed_width = px;
        if !self.expanded {
            self.retarget();
        }
        self.rebuild();
    }

    /// Applies at once while expanded. See
    /// [`set_collapsed_width`](Self::set_collapsed_width).
    pub fn set_expanded_width(&mut self, px: i32) {
        self.expanded_width = px;
        if self.expanded {
            self.retarget();
        }
        self.rebuild();
    }

    fn retarget(&mut self) {
        if self.animation.is_none() {
            self.width = self.target_width();
        } else if let Some(effect) = self.animate() {
            self.queue_effect(effect);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Timer of the running animation, if any.
    pub fn animation_timer(&self) -> Option<TimerId> {
        self.animation.as_ref().map(|a| a.timer)
    }

    fn target_width(&self) -> i32 {
        if self.expanded {
            self.expanded_width
        } else {
            self.collapsed_width
        }
    }

    /// Switch between collapsed and expanded. Returns the timer effect
    /// driving the width animation, if the width has to change.
    pub fn toggle(&mut self) -> Option<Effect> {
        self.expanded = !self.expanded;
        log::debug!("side menu {}", if self.expanded { "expanding" } else { "collapsing" });
        self.animate()
    }

    pub fn set_expanded(&mut self, expanded: bool) -> Option<Effect> {
        if expanded == self.expanded {
            return None;
        }
        self.toggle()
    }

    /// The effect produced by the last [`update`](Self::update), if any.
    pub fn take_effect(&mut self) -> Option<Effect> {
        self.pending.take()
    }

    pub(crate) fn queue_effect(&mut self, effect: Effect) {
        self.pending = Some(match self.pending.take() {
            Some(prev) => Effect::Batch(vec![prev, effect]),
            None => effect,
        });
    }

    fn animate(&mut self) -> Option<Effect> {
        if let Some(old) = self.animation.take() {
            old.ctx.cancel();
        }
        let target = self.target_width();
        let distance = target - self.width;
        if distance == 0 {
            return None;
        }
        let step = match distance / 10 {
            0 => distance.signum(),
            step => step,
        };
        let timer = TimerId::fresh();
        let ctx = Context::new();
        self.animation = Some(Animation {
            timer,
            ctx: ctx.clone(),
            target,
            step,
        });
        Some(Effect::Every {
            interval: self.tick,
            ctx,
            timer,
        })
    }

    fn step_animation(&mut self, timer: TimerId) -> SideMenuAction {
        let Some(anim) = &self.animation else {
            return SideMenuAction::Pass;
        };
        if anim.timer != timer {
            return SideMenuAction::Pass;
        }
        let (target, step) = (anim.target, anim.step);
        let next = self.width + step;
        if (step > 0 && next >= target) || (step < 0 && next <= target) {
            self.width = target;
            if let Some(done) = self.animation.take() {
                done.ctx.cancel();
            }
        } else {
            self.width = next;
        }
        SideMenuAction::Resized
    }

    // -- Style --

    pub fn style(&self) -> &SideMenuStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: SideMenuStyle) {
        self.style = style;
        self.rebuild();
    }

    fn look(&self) -> RowLook {
        RowLook {
            background: self.style.background,
            hover: self.style.hover,
            selected: self.style.selected,
            text: self.style.text,
            text_hover: self.style.text_hover,
            disabled: self.style.disabled,
            font: self.style.font,
            icon_columns: px_to_columns(self.collapsed_width, self.column_px),
            indent_px: self.indent_px,
            column_px: self.column_px,
            menu_expanded: self.expanded,
        }
    }

    // -- Update --

    /// Process a message. Mouse positions are relative to the menu's
    /// top-left corner.
    pub fn update(&mut self, msg: Msg) -> SideMenuAction {
        self.action = SideMenuAction::Pass;
        match msg {
            Msg::Changed { topic } if topic == self.model.topic() => {
                self.rebuild();
                self.action = SideMenuAction::Rebuilt;
            }
            Msg::Tick { timer, .. } => self.action = self.step_animation(timer),
            Msg::Screen { height, .. } => self.set_height(height),
            Msg::KeyDown { ref key, .. } => self.handle_key(key),
            Msg::Mouse { action, pos, .. } => self.handle_mouse(action, pos),
            _ => {}
        }
        self.action.clone()
    }

    pub fn action(&self) -> &SideMenuAction {
        &self.action
    }

    fn handle_key(&mut self, key: &Key) {
        if self.keys.up.contains(key) {
            self.move_selection(-1);
        } else if self.keys.down.contains(key) {
            self.move_selection(1);
        } else if self.keys.invoke.contains(key) {
            if let Some(i) = self.selected {
                self.action = self.click_row(i);
            }
        } else if self.keys.toggle.contains(key) {
            if let Some(effect) = self.toggle() {
                self.queue_effect(effect);
            }
            self.action = SideMenuAction::Toggled;
        }
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point) {
        match action {
            MouseAction::Move => {
                let toggle_hover = self.toggle_range().contains(pos);
                let hover = self.row_at(pos);
                if toggle_hover != self.toggle_hover || hover != self.hover {
                    self.toggle_hover = toggle_hover;
                    self.set_hover(hover);
                    self.action = SideMenuAction::Move;
                }
            }
            MouseAction::Main => {
                if self.toggle_range().contains(pos) {
                    if let Some(effect) = self.toggle() {
                        self.queue_effect(effect);
                    }
                    self.action = SideMenuAction::Toggled;
                } else if let Some(i) = self.row_at(pos) {
                    self.set_selected(Some(i));
                    self.action = self.click_row(i);
                }
            }
            MouseAction::WheelUp => self.move_selection(-1),
            MouseAction::WheelDown => self.move_selection(1),
            _ => {}
        }
    }

    fn set_hover(&mut self, hover: Option<usize>) {
        if let Some(r) = self.hover.and_then(|i| self.rows.get_mut(i)) {
            r.set_hovered(false);
        }
        self.hover = hover;
        if let Some(r) = hover.and_then(|i| self.rows.get_mut(i)) {
            r.set_hovered(true);
        }
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.rows.len() as i32;
        if len == 0 {
            return;
        }
        let next = match self.selected {
            None if delta > 0 => 0,
            None => len - 1,
            Some(i) => (i as i32 + delta).rem_euclid(len),
        };
        self.set_selected(Some(next as usize));
        self.action = SideMenuAction::Move;
    }

    fn click_row(&mut self, i: usize) -> SideMenuAction {
        let Some(row) = self.rows.get(i) else {
            return SideMenuAction::Pass;
        };
        let path = row.path().to_vec();
        match row.click() {
            ClickIntent::Ignore => SideMenuAction::Pass,
            ClickIntent::ToggleExpand => {
                let Some(item) = self.model.item_at_mut(&path) else {
                    return SideMenuAction::Pass;
                };
                item.toggle_expanded();
                let text = item.text().to_string();
                let expanded = item.is_expanded();
                self.rebuild();
                if expanded {
                    SideMenuAction::Expanded(text)
                } else {
                    SideMenuAction::Collapsed(text)
                }
            }
            ClickIntent::Activate => {
                let text = row.text().to_string();
                if let Some(item) = self.model.item_at(&path) {
                    item.execute_action();
                }
                SideMenuAction::Activated(text)
            }
        }
    }

    fn toggle_range(&self) -> Range {
        let w = self.columns();
        let tw = px_to_columns(self.collapsed_width, self.column_px).min(w);
        Range::new(w - tw, 0, w, self.header_rows)
    }

    fn row_at(&self, pos: Point) -> Option<usize> {
        if pos.x < 0 || pos.x >= self.columns() || pos.y < self.header_rows {
            return None;
        }
        let line = (pos.y - self.header_rows) as usize;
        if line >= self.visible_rows() {
            return None;
        }
        let i = self.scroll + line;
        (i < self.rows.len()).then_some(i)
    }

    // -- Draw --

    /// Draw into the left [`columns`](Self::columns) of `grid`. Space below
    /// the last row is left in the background color.
    pub fn draw(&self, grid: &Grid) {
        let w = self.columns().min(grid.width());
        let area = grid.slice(Range::new(0, 0, w, grid.height()));
        area.fill(Cell::new(' ', Style::default().with_bg(self.style.background)));

        self.draw_header(&area.slice(Range::new(0, 0, w, self.header_rows)));

        let look = self.look();
        for (i, row) in self.rows.iter().skip(self.scroll).enumerate() {
            let y = self.header_rows + i as i32;
            if y >= area.height() {
                break;
            }
            row.draw(&area.slice(Range::new(0, y, w, y + 1)), &look);
        }
    }

    fn draw_header(&self, header: &Grid) {
        let st = &self.style;
        let toggle = self.toggle_range();
        let toggle_bg = if self.toggle_hover {
            st.toggle_hover
        } else {
            st.background
        };
        let button = header.slice(toggle);
        button.fill(Cell::new(' ', Style::default().with_bg(toggle_bg)));
        let glyph = if self.expanded {
            st.close_icon.ch()
        } else {
            st.hamburger_icon.ch()
        };
        let mid = self.header_rows / 2;
        button.set(
            Point::new(button.width() / 2, mid),
            Cell::new(glyph, Style::default().with_fg(st.hamburger_color).with_bg(toggle_bg)),
        );

        if !self.expanded {
            return;
        }
        let logo = header.slice(Range::new(0, 0, toggle.min.x, self.header_rows));
        let logo_style = Style::default()
            .with_fg(st.text)
            .with_bg(st.background)
            .with_attrs(st.font);
        match &st.logo_icon {
            Some(icon) => logo.set(Point::new(1, mid), Cell::new(icon.ch(), logo_style)),
            None => {
                logo.draw_text(Point::new(1, mid), &st.logo_text, logo_style);
            }
        }
    }
}

impl Drop for SideMenu {
    fn drop(&mut self) {
        if let Some(anim) = self.animation.take() {
            anim.ctx.cancel();
        }
        if let Some(id) = self.listener.take() {
            self.model.unsubscribe(id);
        }
    }
}

fn px_to_columns(px: i32, column_px: i32) -> i32 {
    let column_px = column_px.max(1);
    (px.max(0) + column_px - 1) / column_px
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::{self, Receiver};

    fn menu_with(items: Vec<MenuItem>) -> (SideMenu, Receiver<Msg>) {
        let (tx, rx) = mpsc::channel();
        let menu = SideMenu::new(SideMenuConfig {
            model: MenuModel::from_items(items),
            mailbox: Some(tx),
            ..SideMenuConfig::default()
        });
        (menu, rx)
    }

    fn profile_tree() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Home"),
            MenuItem::new("Profile").with_child(MenuItem::new("Settings")),
        ]
    }

    /// Deliver queued messages the way the app loop would on its next turn.
    fn pump(menu: &mut SideMenu, rx: &Receiver<Msg>) -> Vec<SideMenuAction> {
        rx.try_iter().map(|m| menu.update(m)).collect()
    }

    fn timer_of(effect: Option<Effect>) -> TimerId {
        match effect {
            Some(Effect::Every { timer, .. }) => timer,
            other => panic!("expected a timer effect, got {other:?}"),
        }
    }

    fn click(menu: &mut SideMenu, row: i32) -> SideMenuAction {
        menu.update(Msg::mouse(MouseAction::Main, Point::new(1, 3 + row)))
    }

    #[test]
    fn default_model_has_five_entries() {
        let menu = SideMenu::new(SideMenuConfig::default());
        assert_eq!(
            menu.row_texts(),
            ["Home", "Profile", "Messages", "Settings", "Help"]
        );
        assert_eq!(menu.model().item(0).unwrap().tooltip(), Some("Go to Home"));
        assert_eq!(menu.model().item(0).unwrap().icon().unwrap().ch(), '⌂');
        assert_eq!(menu.width(), 60);
        assert_eq!(menu.columns(), 6);
    }

    #[test]
    fn rebuild_follows_model_changes_on_the_next_turn() {
        let (mut menu, rx) = menu_with(profile_tree());
        assert_eq!(menu.row_texts(), ["Home", "Profile"]);

        menu.model_mut().edit_at(&[1], |i| i.set_expanded(true));
        // Nothing happens until the queued notification is delivered.
        assert_eq!(menu.row_texts(), ["Home", "Profile"]);
        assert_eq!(pump(&mut menu, &rx), [SideMenuAction::Rebuilt]);
        assert_eq!(menu.row_texts(), ["Home", "Profile", "Settings"]);
    }

    #[test]
    fn collapsed_ancestor_hides_expanded_descendants() {
        let (mut menu, rx) = menu_with(vec![
            MenuItem::new("A").with_child(
                MenuItem::new("B")
                    .with_expanded(true)
                    .with_child(MenuItem::new("C")),
            ),
            MenuItem::new("D"),
        ]);
        assert_eq!(menu.row_texts(), ["A", "D"]);
        menu.model_mut().edit_at(&[0], |i| i.set_expanded(true));
        pump(&mut menu, &rx);
        assert_eq!(menu.row_texts(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn hidden_and_malformed_rows_are_skipped() {
        let (menu, _rx) = menu_with(vec![
            MenuItem::new("Home"),
            MenuItem::new("Secret").with_shown(false),
            MenuItem::new("bad\u{7}"),
            MenuItem::new("Help"),
        ]);
        assert_eq!(menu.row_texts(), ["Home", "Help"]);
    }

    #[test]
    fn leaf_click_runs_bound_action_once() {
        let (mut menu, _rx) = menu_with(vec![
            MenuItem::new("Home"),
            MenuItem::new("Profile")
                .with_expanded(true)
                .with_child(MenuItem::new("Settings")),
        ]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        assert!(menu.bind_action("Settings", move |t| sink.borrow_mut().push(t.to_string())));

        assert_eq!(click(&mut menu, 2), SideMenuAction::Activated("Settings".into()));
        assert_eq!(*seen.borrow(), ["Settings"]);

        assert_eq!(click(&mut menu, 1), SideMenuAction::Collapsed("Profile".into()));
        assert_eq!(*seen.borrow(), ["Settings"]);
        assert_eq!(menu.row_texts(), ["Home", "Profile"]);
        assert_eq!(click(&mut menu, 1), SideMenuAction::Expanded("Profile".into()));
        assert_eq!(menu.row_texts(), ["Home", "Profile", "Settings"]);
    }

    #[test]
    fn disabled_rows_ignore_clicks() {
        let (mut menu, _rx) = menu_with(vec![
            MenuItem::new("Off")
                .with_enabled(false)
                .with_child(MenuItem::new("Child")),
        ]);
        assert_eq!(click(&mut menu, 0), SideMenuAction::Pass);
        assert!(!menu.model().item(0).unwrap().is_expanded());
    }

    #[test]
    fn toggle_animates_to_expanded_width_exactly() {
        let (mut menu, _rx) = menu_with(profile_tree());
        assert_eq!(menu.width(), 60);
        let timer = timer_of(menu.toggle());
        assert!(menu.is_expanded());
        let mut ticks = 0;
        while menu.is_animating() {
            assert_eq!(menu.update(Msg::tick(timer)), SideMenuAction::Resized);
            ticks += 1;
        }
        assert_eq!(ticks, 10);
        assert_eq!(menu.width(), 250);
        assert_eq!(menu.columns(), 25);
        assert_eq!(menu.update(Msg::tick(timer)), SideMenuAction::Pass);
    }

    #[test]
    fn retoggle_cancels_the_running_animation() {
        let (mut menu, _rx) = menu_with(profile_tree());
        let first = menu.toggle();
        let first_ctx = match &first {
            Some(Effect::Every { ctx, .. }) => ctx.clone(),
            _ => unreachable!(),
        };
        let first_timer = timer_of(first);
        for _ in 0..3 {
            menu.update(Msg::tick(first_timer));
        }
        assert_eq!(menu.width(), 117);

        let second = timer_of(menu.toggle());
        assert!(first_ctx.is_done());
        assert_eq!(menu.update(Msg::tick(first_timer)), SideMenuAction::Pass);
        while menu.is_animating() {
            menu.update(Msg::tick(second));
        }
        assert_eq!(menu.width(), 60);
        assert!(!menu.is_expanded());
    }

    #[test]
    fn small_distances_still_converge() {
        let (tx, _rx) = mpsc::channel();
        let mut menu = SideMenu::new(SideMenuConfig {
            model: MenuModel::new(),
            mailbox: Some(tx),
            expanded_width: 65,
            ..SideMenuConfig::default()
        });
        let timer = timer_of(menu.toggle());
        let mut ticks = 0;
        while menu.is_animating() {
            menu.update(Msg::tick(timer));
            ticks += 1;
        }
        assert_eq!((ticks, menu.width()), (5, 65));
    }

    #[test]
    fn toggle_key_queues_the_animation() {
        let (mut menu, _rx) = menu_with(profile_tree());
        assert_eq!(menu.update(Msg::key(Key::Tab)), SideMenuAction::Toggled);
        assert!(matches!(menu.take_effect(), Some(Effect::Every { .. })));
        assert!(menu.take_effect().is_none());
        assert!(menu.set_expanded(true).is_none());
    }

    #[test]
    fn toggle_button_click() {
        let (mut menu, _rx) = menu_with(profile_tree());
        let action = menu.update(Msg::mouse(MouseAction::Main, Point::new(3, 1)));
        assert_eq!(action, SideMenuAction::Toggled);
        assert!(menu.is_expanded());
        assert!(menu.take_effect().is_some());
    }

    #[test]
    fn keyboard_selection_wraps() {
        let (mut menu, _rx) = menu_with(profile_tree());
        assert_eq!(menu.update(Msg::key(Key::ArrowDown)), SideMenuAction::Move);
        assert_eq!(menu.selected(), Some(0));
        menu.update(Msg::key(Key::ArrowUp));
        assert_eq!(menu.selected(), Some(1));
        assert_eq!(
            menu.update(Msg::key(Key::Enter)),
            SideMenuAction::Expanded("Profile".into())
        );
        assert_eq!(menu.selected(), Some(1));
        assert!(menu.rows()[1].is_selected());
    }

    #[test]
    fn hover_tracks_the_mouse() {
        let (mut menu, _rx) = menu_with(vec![
            MenuItem::new("Home").with_tooltip("Go home"),
            MenuItem::new("Off").with_enabled(false),
        ]);
        let moved = menu.update(Msg::mouse(MouseAction::Move, Point::new(0, 3)));
        assert_eq!(moved, SideMenuAction::Move);
        assert_eq!(menu.hovered_tooltip(), Some("Go home"));
        menu.update(Msg::mouse(MouseAction::Move, Point::new(0, 4)));
        assert!(!menu.rows()[1].is_hovered());
        assert!(!menu.rows()[0].is_hovered());
    }

    #[test]
    fn set_model_moves_the_subscription() {
        let (mut menu, rx) = menu_with(profile_tree());
        let mut old = menu.set_model(MenuModel::from_items(vec![MenuItem::new("New")]));
        assert_eq!(old.listener_count(), 0);
        assert_eq!(menu.model().listener_count(), 1);
        assert_eq!(menu.row_texts(), ["New"]);

        old.add_item(MenuItem::new("Ignored"));
        assert!(rx.try_recv().is_err());
        menu.model_mut().add_item(MenuItem::new("Seen"));
        assert_eq!(pump(&mut menu, &rx), [SideMenuAction::Rebuilt]);
        assert_eq!(menu.row_texts(), ["New", "Seen"]);
    }

    #[test]
    fn foreign_topics_are_ignored() {
        let (mut menu, _rx) = menu_with(profile_tree());
        let other = MenuModel::new();
        assert_eq!(menu.update(Msg::changed(other.topic())), SideMenuAction::Pass);
    }

    #[test]
    fn width_setters_apply_to_the_current_state() {
        let (mut menu, _rx) = menu_with(profile_tree());
        menu.set_expanded_width(300);
        assert_eq!(menu.width(), 60);
        menu.set_collapsed_width(40);
        assert_eq!(menu.width(), 40);
        assert_eq!(menu.columns(), 4);
    }

    #[test]
    fn width_change_mid_animation_retargets() {
        let (mut menu, _rx) = menu_with(profile_tree());
        let first = timer_of(menu.toggle());
        menu.update(Msg::tick(first));
        assert_eq!(menu.width(), 79);

        // The other state's width does not touch the running animation.
        menu.set_collapsed_width(50);
        assert!(menu.take_effect().is_none());

        menu.set_expanded_width(300);
        let second = timer_of(menu.take_effect());
        assert_eq!(menu.update(Msg::tick(first)), SideMenuAction::Pass);
        while menu.is_animating() {
            menu.update(Msg::tick(second));
        }
        assert!(menu.is_expanded());
        assert_eq!(menu.width(), menu.expanded_width());
        assert_eq!(menu.width(), 300);
    }

    #[test]
    fn collapse_retargets_to_new_collapsed_width() {
        let (tx, _rx) = mpsc::channel();
        let mut menu = SideMenu::new(SideMenuConfig {
            model: MenuModel::from_items(profile_tree()),
            mailbox: Some(tx),
            expanded: true,
            ..SideMenuConfig::default()
        });
        let first = timer_of(menu.toggle());
        menu.update(Msg::tick(first));
        menu.set_collapsed_width(40);
        let second = timer_of(menu.take_effect());
        while menu.is_animating() {
            menu.update(Msg::tick(second));
        }
        assert!(!menu.is_expanded());
        assert_eq!(menu.width(), 40);
    }

    fn tall_menu(height: i32) -> SideMenu {
        let (tx, _rx) = mpsc::channel();
        SideMenu::new(SideMenuConfig {
            model: (0..10).map(|i| MenuItem::new(format!("Item {i}"))).collect(),
            mailbox: Some(tx),
            expanded: true,
            height: Some(height),
            ..SideMenuConfig::default()
        })
    }

    #[test]
    fn selection_scrolls_rows_into_view() {
        // Three header rows leave four for items.
        let mut menu = tall_menu(7);
        for _ in 0..6 {
            menu.update(Msg::key(Key::ArrowDown));
        }
        assert_eq!(menu.selected(), Some(5));
        assert_eq!(menu.scroll_offset(), 2);

        let grid = Grid::new(25, 7);
        menu.draw(&grid);
        assert!(grid.line(3).contains("Item 2"));
        assert!(grid.line(6).contains("Item 5"));

        assert_eq!(click(&mut menu, 0), SideMenuAction::Activated("Item 2".into()));
        assert_eq!(menu.selected(), Some(2));

        menu.update(Msg::key(Key::ArrowUp));
        assert_eq!(menu.scroll_offset(), 1);
    }

    #[test]
    fn rows_below_the_viewport_are_not_clickable() {
        let mut menu = tall_menu(7);
        assert_eq!(click(&mut menu, 4), SideMenuAction::Pass);
        assert_eq!(menu.selected(), None);

        menu.update(Msg::Screen {
            width: 80,
            height: 20,
            time: std::time::Instant::now(),
        });
        assert_eq!(click(&mut menu, 4), SideMenuAction::Activated("Item 4".into()));
    }

    #[test]
    fn wrapping_up_scrolls_to_the_last_row() {
        let mut menu = tall_menu(7);
        menu.update(Msg::key(Key::ArrowUp));
        assert_eq!(menu.selected(), Some(9));
        assert_eq!(menu.scroll_offset(), 6);
    }

    #[test]
    fn draws_header_and_rows() {
        let (mut menu, _rx) = menu_with(vec![MenuItem::new("Home").with_icon(Icon::glyph('⌂'))]);
        let grid = Grid::new(30, 6);
        menu.draw(&grid);
        assert_eq!(grid.line(1), "   ☰                          ");
        assert_eq!(grid.line(3), "  ⌂                           ");
        assert_eq!(grid.at(Point::new(0, 5)).style.bg, Color::WHITE);

        let mut style = menu.style().clone();
        style.logo_text = "Logo".into();
        menu.set_style(style);
        let timer = timer_of(menu.toggle());
        while menu.is_animating() {
            menu.update(Msg::tick(timer));
        }
        menu.draw(&grid);
        assert_eq!(grid.line(1), " Logo                 ×       ");
        assert_eq!(grid.line(3), "  ⌂   Home                    ");
    }

    #[test]
    fn logo_icon_takes_precedence() {
        let (tx, _rx) = mpsc::channel();
        let menu = SideMenu::new(SideMenuConfig {
            model: MenuModel::new(),
            mailbox: Some(tx),
            expanded: true,
            style: SideMenuStyle {
                logo_icon: Some(Icon::glyph('★')),
                logo_text: "Text".into(),
                ..SideMenuStyle::default()
            },
            ..SideMenuConfig::default()
        });
        let grid = Grid::new(25, 4);
        menu.draw(&grid);
        assert!(grid.line(1).starts_with(" ★ "));
    }
}
