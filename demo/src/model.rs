use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use sidenav_core::{Cell, Effect, Grid, Key, Model, Msg, Point, Range, Style};
use sidenav_menu::{MenuItem, MenuModel, codegen};
use sidenav_ui::{
    BoxDecor, EditorAction, EditorConfig, ModelEditor, SideMenu, SideMenuAction, SideMenuConfig,
    SideMenuStyle,
};

use crate::Cli;

/// Lines kept in the activation history.
const HISTORY: usize = 8;

#[derive(Debug)]
enum Mode {
    Normal,
    Editor(ModelEditor),
    /// Generated initializer code shown in the content pane.
    Code(String),
}

/// The demo: a side menu on the left, a content pane on the right.
pub struct DemoModel {
    menu: SideMenu,
    mode: Mode,
    width: i32,
    height: i32,
    status: String,
    history: Rc<RefCell<Vec<String>>>,
}

fn demo_items() -> MenuModel {
    MenuModel::from_items(vec![
        MenuItem::new("Home")
            .with_icon_path("/icons/home.png")
            .with_tooltip("Go to Home"),
        MenuItem::new("Profile")
            .with_icon_path("/icons/profile.png")
            .with_tooltip("View user profile"),
        MenuItem::new("Messages")
            .with_icon_path("/icons/messages.png")
            .with_tooltip("View messages"),
        MenuItem::new("Settings")
            .with_icon_path("/icons/settings.png")
            .with_tooltip("Go to settings")
            .with_children(vec![
                MenuItem::new("Theme").with_tooltip("Colors and fonts"),
                MenuItem::new("Privacy").with_tooltip("Who can see you"),
                MenuItem::new("Billing")
                    .with_tooltip("Not available on this plan")
                    .with_enabled(false),
            ]),
        MenuItem::new("Help")
            .with_icon_path("/icons/help.png")
            .with_tooltip("Help"),
    ])
}

impl DemoModel {
    pub fn new(cli: &Cli, mailbox: Sender<Msg>, width: i32, height: i32) -> Self {
        let style = SideMenuStyle {
            logo_text: cli.logo.clone(),
            ..SideMenuStyle::default()
        };
        let mut menu = SideMenu::new(SideMenuConfig {
            model: demo_items(),
            mailbox: Some(mailbox),
            expanded: cli.expanded,
            collapsed_width: cli.collapsed_width,
            expanded_width: cli.expanded_width,
            height: Some(height),
            style,
            ..SideMenuConfig::default()
        });
        let history = Rc::new(RefCell::new(Vec::new()));
        for text in ["Home", "Profile", "Messages", "Theme", "Privacy", "Help"] {
            let history = Rc::clone(&history);
            menu.bind_action(text, move |name: &str| {
                let mut h = history.borrow_mut();
                h.push(format!("ran action for {name}"));
                if h.len() > HISTORY {
                    h.remove(0);
                }
            });
        }
        Self {
            menu,
            mode: Mode::Normal,
            width,
            height,
            status: "Nothing activated yet.".to_string(),
            history,
        }
    }

    fn menu_range(&self) -> Range {
        Range::new(0, 0, self.menu.columns().min(self.width), self.height)
    }

    fn content_range(&self) -> Range {
        Range::new(self.menu.columns().min(self.width), 0, self.width, self.height)
    }

    fn update_editor(&mut self, msg: Msg) -> Option<Effect> {
        let Mode::Editor(editor) = &mut self.mode else {
            return None;
        };
        match editor.update(msg) {
            EditorAction::Accept => {
                if let Mode::Editor(editor) = std::mem::replace(&mut self.mode, Mode::Normal) {
                    let accepted = editor.accept();
                    tracing::info!("menu edited: {accepted}");
                    self.menu.set_model(accepted);
                    self.status = "Menu updated.".to_string();
                }
            }
            EditorAction::Cancel => {
                if let Mode::Editor(editor) = std::mem::replace(&mut self.mode, Mode::Normal) {
                    editor.cancel();
                }
            }
            _ => {}
        }
        None
    }

    fn update_menu(&mut self, msg: Msg) -> Option<Effect> {
        if let Msg::Mouse { pos, .. } = &msg {
            if let Mode::Code(_) = self.mode {
                if self.content_range().contains(*pos) {
                    return None;
                }
            }
        }
        match self.menu.update(msg) {
            SideMenuAction::Activated(text) => {
                tracing::debug!("activated {text}");
                self.status = format!("Activated: {text}");
            }
            SideMenuAction::Expanded(text) => self.status = format!("Expanded: {text}"),
            SideMenuAction::Collapsed(text) => self.status = format!("Collapsed: {text}"),
            _ => {}
        }
        self.menu.take_effect()
    }

    fn draw_content(&self, grid: &Grid) {
        let decor = BoxDecor::new()
            .with_title("Content")
            .with_footer("Tab menu  e edit  g code  q quit");
        let inner = grid.slice(decor.draw(grid));
        let text = Style::default();
        inner.fill(Cell::new(' ', text));
        match &self.mode {
            Mode::Code(code) => {
                for (y, line) in code.lines().enumerate() {
                    inner.draw_text(Point::new(1, y as i32), line, text);
                }
            }
            _ => {
                inner.draw_text(Point::new(1, 0), &self.status, text);
                if let Some(tip) = self.menu.hovered_tooltip() {
                    inner.draw_text(Point::new(1, 1), tip, text.with_fg(self.menu.style().hover));
                }
                for (y, line) in self.history.borrow().iter().enumerate() {
                    inner.draw_text(Point::new(1, 3 + y as i32), line, text);
                }
            }
        }
    }
}

impl Model for DemoModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match &msg {
            Msg::Quit => return Some(Effect::End),
            Msg::Screen { width, height, .. } => {
                self.width = *width;
                self.height = *height;
                self.menu.set_height(*height);
                if let Mode::Editor(editor) = &mut self.mode {
                    editor.set_height(*height);
                }
                return None;
            }
            _ => {}
        }
        if let Mode::Editor(_) = self.mode {
            // Timers and model notifications still belong to the menu.
            return match msg {
                Msg::Tick { .. } | Msg::Changed { .. } => self.update_menu(msg),
                _ => self.update_editor(msg),
            };
        }
        match &msg {
            Msg::KeyDown { key: Key::Char('q'), .. } => Some(Effect::End),
            Msg::KeyDown { key: Key::Char('e'), .. } => {
                let config = EditorConfig {
                    height: Some(self.height),
                    ..EditorConfig::default()
                };
                self.mode = Mode::Editor(ModelEditor::new(self.menu.model(), config));
                None
            }
            Msg::KeyDown { key: Key::Char('g'), .. } => {
                self.mode = match self.mode {
                    Mode::Code(_) => Mode::Normal,
                    _ => Mode::Code(codegen::initializer(self.menu.model())),
                };
                None
            }
            _ => self.update_menu(msg),
        }
    }

    fn draw(&self, grid: &mut Grid) {
        if let Mode::Editor(editor) = &self.mode {
            editor.draw(grid);
            return;
        }
        self.menu.draw(&grid.slice(self.menu_range()));
        self.draw_content(&grid.slice(self.content_range()));
    }
}
