use crate::config::RcConfig;
use crate::controller::browse::BrowseController;
use crate::controller::closed::ClosedController;
use crate::controller::command_types::Mode;
use crate::controller::edit::EditController;
use crate::controller::filter::FilterController;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedState};
use crate::error::VarsError;
use crate::store::{ClipboardPort, VariablesPort};
use crate::variables_model::{Variable, VariablesOverlay};
use crate::view::{RenderParams, View};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use tracing::{debug, info};

pub struct App {
    shared: SharedState,
    current_mode: Mode,

    // Mode-specific controllers
    closed_controller: ClosedController,
    browse_controller: BrowseController,
    edit_controller: EditController,
    filter_controller: FilterController,
}

impl App {
    pub fn new(
        store: Box<dyn VariablesPort>,
        clipboard: Box<dyn ClipboardPort>,
        system_variables: Vec<Variable>,
        config: &RcConfig,
    ) -> Self {
        let mut overlay = VariablesOverlay::new(true);
        overlay.set_show_values(config.show_values);
        overlay.set_system_variables(system_variables);
        if config.system_variables {
            overlay.set_system_variables_enabled(true);
        }

        let mut view = View::new();
        view.set_name_width(config.name_width);

        Self {
            shared: SharedState {
                overlay,
                store,
                clipboard,
                view,
                status_message: String::new(),
            },
            current_mode: Mode::Browse,
            closed_controller: ClosedController::new(),
            browse_controller: BrowseController::new(),
            edit_controller: EditController::new(),
            filter_controller: FilterController::new(),
        }
    }

    /// Fetches `environment` from the store and hands it to the overlay.
    pub fn load_environment(&mut self, environment: &str) -> Result<(), VarsError> {
        let variables = self.shared.store.variables(environment)?;
        self.shared.overlay.supply_environment(environment, variables);
        Ok(())
    }

    pub fn overlay(&self) -> &VariablesOverlay {
        &self.shared.overlay
    }

    pub fn mode(&self) -> Mode {
        self.current_mode
    }

    pub fn status_message(&self) -> &str {
        &self.shared.status_message
    }

    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;

        let result = self.run_loop();

        disable_raw_mode()?;
        execute!(stdout(), LeaveAlternateScreen, crossterm::cursor::Show)?;

        result
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Variables overlay started");
        loop {
            self.sync();

            let environment_info = self.environment_info();
            let render = self.shared.overlay.render();
            let input = self.filter_controller.get_filter_buffer().to_string();
            let params = RenderParams {
                mode: &self.current_mode,
                input_buffer: &input,
                status_message: &self.shared.status_message,
                environment_info: environment_info.as_deref(),
            };
            self.shared.view.render(&render, &params)?;

            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if self.handle_key(key_event) {
                        break;
                    }
                }
                Event::Resize(_, _) => self.shared.view.force_redraw(),
                _ => {}
            }
        }
        info!("Variables overlay stopped");
        Ok(())
    }

    /// Feeds one key to the current mode. Returns true when the app should quit.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> bool {
        self.shared.status_message.clear();

        let transition = match self.current_mode {
            Mode::Closed => self.closed_controller.handle_key(key_event, &mut self.shared),
            Mode::Browse => self.browse_controller.handle_key(key_event, &mut self.shared),
            Mode::Edit => self.edit_controller.handle_key(key_event, &mut self.shared),
            Mode::Filter => self.filter_controller.handle_key(key_event, &mut self.shared),
        };

        match transition {
            ModeTransition::Stay => false,
            ModeTransition::ToMode(new_mode) => {
                self.transition_to_mode(new_mode);
                false
            }
            ModeTransition::Quit => true,
        }
    }

    /// Applies store notices and reconciles the mode with the widget state.
    pub fn sync(&mut self) {
        for change in self.shared.store.poll_changes() {
            self.shared.overlay.apply_change(change);
        }
        for notice in self.shared.overlay.take_notices() {
            info!(?notice, "Overlay notice");
        }

        if !self.shared.overlay.is_opened() {
            self.current_mode = Mode::Closed;
        } else if self.current_mode == Mode::Edit {
            let editing = self
                .shared
                .overlay
                .environment_list()
                .and_then(|list| list.editing())
                .is_some();
            if !editing {
                debug!("Editor closed by refresh");
                self.current_mode = Mode::Browse;
            }
        }
    }

    fn transition_to_mode(&mut self, new_mode: Mode) {
        if new_mode == Mode::Filter {
            let current = self
                .shared
                .overlay
                .focused_list()
                .and_then(|list| list.filter())
                .unwrap_or_default()
                .to_string();
            self.filter_controller.filter_buffer = current;
        }
        debug!(from = ?self.current_mode, to = ?new_mode, "Mode change");
        self.current_mode = new_mode;
    }

    fn environment_info(&self) -> Option<String> {
        let current = self.shared.overlay.current_environment()?;
        let environments = self.shared.store.environments();
        let index = environments.iter().position(|e| e == current)?;
        Some(format!("{current} ({}/{})", index + 1, environments.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::browse::READ_ONLY_MESSAGE;
    use crate::store::MemoryStore;
    use crate::variables_model::system::{StaticTable, SystemVariableSource};
    use crate::variables_model::{DEFAULT_ENVIRONMENT, NewVariable};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeClipboard(Rc<RefCell<Vec<String>>>);

    impl ClipboardPort for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), VarsError> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, codes: &[KeyCode]) -> bool {
        let mut quit = false;
        for code in codes {
            quit = app.handle_key(key(*code));
            app.sync();
        }
        quit
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app_with(count: usize, clipboard: FakeClipboard) -> App {
        let mut store = MemoryStore::new();
        for i in 0..count {
            store.insert(
                DEFAULT_ENVIRONMENT,
                NewVariable {
                    name: format!("VAR_{i}"),
                    value: format!("value-{i}"),
                    enabled: true,
                },
            );
        }
        store.insert("staging", NewVariable::default());
        let mut app = App::new(
            Box::new(store),
            Box::new(clipboard),
            StaticTable::demo().variables(),
            &RcConfig::default(),
        );
        app.load_environment(DEFAULT_ENVIRONMENT).unwrap();
        app.sync();
        app
    }

    fn names(app: &App) -> Vec<String> {
        app.overlay()
            .environment_list()
            .unwrap()
            .variables()
            .iter()
            .map(|v| v.name.clone())
            .collect()
    }

    #[test]
    fn test_add_and_name_new_variable() {
        let mut app = app_with(0, FakeClipboard::default());

        press(&mut app, &[KeyCode::Char('a')]);
        assert_eq!(app.mode(), Mode::Edit);
        assert_eq!(names(&app), vec![String::new()]);

        type_text(&mut app, "TOKEN");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(names(&app), vec!["TOKEN".to_string()]);
        assert_eq!(app.status_message(), "Saved");

        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "abc");
        press(&mut app, &[KeyCode::Enter, KeyCode::Esc]);
        assert_eq!(app.mode(), Mode::Browse);
        let list = app.overlay().environment_list().unwrap();
        assert_eq!(list.variables()[0].value, "abc");
        assert!(list.editing().is_none());
    }

    #[test]
    fn test_escape_discards_uncommitted_edit() {
        let mut app = app_with(1, FakeClipboard::default());

        press(&mut app, &[KeyCode::Char('e')]);
        type_text(&mut app, "_CHANGED");
        press(&mut app, &[KeyCode::Esc]);

        assert_eq!(names(&app), vec!["VAR_0".to_string()]);
        assert_eq!(app.mode(), Mode::Browse);
    }

    #[test]
    fn test_toggle_enabled_and_delete() {
        let mut app = app_with(2, FakeClipboard::default());

        press(&mut app, &[KeyCode::Char(' ')]);
        assert!(!app.overlay().environment_list().unwrap().variables()[0].enabled);

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('d')]);
        assert_eq!(names(&app), vec!["VAR_0".to_string()]);
    }

    #[test]
    fn test_system_list_is_read_only() {
        let mut app = app_with(1, FakeClipboard::default());

        press(&mut app, &[KeyCode::Char('s'), KeyCode::Tab, KeyCode::Char('d')]);
        assert_eq!(app.status_message(), READ_ONLY_MESSAGE);
        press(&mut app, &[KeyCode::Char('e')]);
        assert_eq!(app.mode(), Mode::Browse);
        press(&mut app, &[KeyCode::Char('a')]);
        assert_eq!(app.status_message(), READ_ONLY_MESSAGE);
        assert_eq!(
            app.overlay().system_list().unwrap().variables().len(),
            StaticTable::demo().variables().len()
        );
        assert_eq!(names(&app), vec!["VAR_0".to_string()]);
    }

    #[test]
    fn test_copy_value() {
        let clipboard = FakeClipboard::default();
        let mut app = app_with(2, clipboard.clone());

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('y')]);
        assert_eq!(*clipboard.0.borrow(), vec!["value-1".to_string()]);
        assert_eq!(app.status_message(), "Copied value of \"VAR_1\"");
    }

    #[test]
    fn test_close_open_and_quit() {
        let mut app = app_with(1, FakeClipboard::default());

        assert!(!press(&mut app, &[KeyCode::Char('q')]));
        assert_eq!(app.mode(), Mode::Closed);
        assert!(!app.overlay().is_opened());

        press(&mut app, &[KeyCode::Char('s')]);
        assert!(app.overlay().system_variables_enabled());

        press(&mut app, &[KeyCode::Char('o')]);
        assert_eq!(app.mode(), Mode::Browse);
        assert!(app.overlay().render().system.is_some());

        press(&mut app, &[KeyCode::Esc]);
        assert!(press(&mut app, &[KeyCode::Char('q')]));
    }

    #[test]
    fn test_filter_mode() {
        let mut app = app_with(12, FakeClipboard::default());

        press(&mut app, &[KeyCode::Char('/')]);
        assert_eq!(app.mode(), Mode::Filter);
        type_text(&mut app, "VAR_1");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.mode(), Mode::Browse);
        // VAR_1, VAR_10, VAR_11
        assert_eq!(app.overlay().environment_list().unwrap().render().rows().len(), 3);

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('('), KeyCode::Enter]);
        assert_eq!(app.status_message(), "Invalid filter pattern");

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Esc]);
        assert_eq!(app.overlay().environment_list().unwrap().render().rows().len(), 12);
    }

    #[test]
    fn test_add_while_filtered_keeps_editor_visible() {
        let mut app = app_with(3, FakeClipboard::default());

        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "VAR_1");
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('a')]);
        assert_eq!(app.mode(), Mode::Edit);

        type_text(&mut app, "TOKEN");
        press(&mut app, &[KeyCode::Enter]);
        let render = app.overlay().environment_list().unwrap().render();
        assert_eq!(render.rows().len(), 2);
        assert!(render.editor().is_some());

        press(&mut app, &[KeyCode::Esc]);
        let render = app.overlay().environment_list().unwrap().render();
        assert_eq!(render.rows().len(), 1);
        assert!(render.editor().is_none());
    }

    #[test]
    fn test_switch_environment() {
        let mut app = app_with(1, FakeClipboard::default());

        press(&mut app, &[KeyCode::Char(']')]);
        assert_eq!(app.overlay().current_environment(), Some("staging"));
        assert_eq!(app.environment_info().as_deref(), Some("staging (2/2)"));

        press(&mut app, &[KeyCode::Char('[')]);
        assert_eq!(app.overlay().current_environment(), Some(DEFAULT_ENVIRONMENT));
    }
}
