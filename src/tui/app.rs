use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend as TerminalBackend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};

use crate::backend::{create_backend, Backend, BackendKind, Session};
use crate::config::Config;
use crate::state::chat::ChatRequest;
use crate::state::layout::{nav_items, Sidebar};
use crate::state::login::AuthRequest;
use crate::state::questions::RegenTarget;
use crate::state::route::Router;
use crate::state::theme::{system_appearance, Appearance};
use crate::state::{Notification, Notifications, Route, ThemeHandle, ThemePreference, ThemeReader};
use crate::tui::page::{ListCursor, Page, QUICK_ACTIONS};
use crate::tui::tasks::{Completion, TaskOutcome, TaskRunner};
use crate::tui::ui::render_ui;

/// Input mode for pages with a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// TUI application state
pub struct AxionApp {
    router: Router,
    page: Page,
    // bumped on every navigation so late results can be told apart
    mount: u64,
    sidebar: Sidebar,
    theme: ThemeHandle,
    // the render side only ever reads the preference
    theme_reader: ThemeReader,
    system_appearance: Appearance,
    notifications: Notifications,
    backend: Backend,
    tasks: TaskRunner,
    input_mode: InputMode,
    session: Option<Session>,
    ticks: u64,
    should_quit: bool,
}

impl AxionApp {
    pub fn new(config: &Config, backend: Backend) -> Self {
        // Create the theme channel and mount the first page
        let theme = ThemeHandle::new(config.theme);
        let theme_reader = theme.reader();
        let router = Router::new(&config.start_route);
        let page = Page::mount(router.route(), theme.current());

        let mut app = Self {
            router,
            page,
            mount: 0,
            sidebar: Sidebar::default(),
            theme,
            theme_reader,
            system_appearance: system_appearance(),
            notifications: Notifications::new(config.notification_ttl()),
            backend,
            tasks: TaskRunner::new(),
            input_mode: InputMode::Normal,
            session: None,
            ticks: 0,
            should_quit: false,
        };
        app.on_mount();
        app
    }

    pub fn route(&self) -> Route {
        self.router.route()
    }

    pub fn requested_path(&self) -> &str {
        self.router.path()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn theme(&self) -> &ThemeReader {
        &self.theme_reader
    }

    pub fn appearance(&self) -> Appearance {
        self.theme.current().resolve(self.system_appearance)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True while any background task is still running.
    pub fn busy(&self) -> bool {
        self.tasks.in_flight() > 0
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Unmount the current page, cancelling its tasks, and mount the page
    /// for `path`. Staying on the same route keeps the page as it is.
    pub fn navigate(&mut self, path: &str) {
        if self.router.navigate(path).is_none() {
            return;
        }

        // Cancel the old page's work, then mount the new one
        self.tasks.cancel_mount(self.mount);
        self.mount += 1;
        self.page = Page::mount(self.router.route(), self.theme.current());
        self.on_mount();
    }

    fn on_mount(&mut self) {
        // Pages with a composer start in typing mode
        self.input_mode = match self.page {
            Page::Assistant(_) => InputMode::Editing,
            _ => InputMode::Normal,
        };
        // Insights fetch their data on mount
        if let Page::Insights(insights) = &mut self.page {
            if insights.begin_load() {
                let analytics = self.backend.analytics.clone();
                self.tasks.spawn(self.mount, self.router.route(), async move {
                    TaskOutcome::Insights(analytics.insights().await)
                });
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.notifications.expire(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.page {
            Page::Login(_) => self.handle_login_key(key),
            Page::NotFound => match key.code {
                KeyCode::Enter | KeyCode::Char('h') => self.navigate("/"),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            _ => match self.input_mode {
                InputMode::Editing => self.handle_editing_key(key),
                InputMode::Normal => self.handle_normal_key(key),
            },
        }
    }

    /// A terminal paste. Dropping a file on the terminal pastes its path.
    pub fn handle_paste(&mut self, text: &str) {
        match &mut self.page {
            Page::Upload(upload) => match upload.choose_path(text) {
                // a new file discards any extraction still running
                Ok(()) => {
                    self.tasks.cancel_mount(self.mount);
                }
                Err(err) => self.notify(err.notification()),
            },
            Page::Assistant(chat) if self.input_mode == InputMode::Editing => {
                text.chars()
                    .filter(|c| !c.is_control())
                    .for_each(|c| chat.handle_input(c));
            }
            Page::Login(login) => {
                text.chars()
                    .filter(|c| !c.is_control())
                    .for_each(|c| login.handle_input(c));
            }
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        let Page::Login(login) = &mut self.page else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(2) => login.switch_tab(),
            KeyCode::Char('t') if ctrl => login.switch_tab(),
            KeyCode::Char('p') if ctrl => login.toggle_password_visibility(),
            KeyCode::Tab | KeyCode::Down => login.next_field(true),
            KeyCode::BackTab | KeyCode::Up => login.next_field(false),
            KeyCode::Backspace => login.backspace(),
            KeyCode::Enter => {
                if let Some(request) = login.submit() {
                    self.spawn_auth(request);
                }
            }
            KeyCode::Char(c) if !ctrl => login.handle_input(c),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                return;
            }
            KeyCode::Enter => {
                self.submit_input();
                return;
            }
            _ => {}
        }

        match &mut self.page {
            Page::Assistant(chat) => match key.code {
                KeyCode::Char(c) => chat.handle_input(c),
                KeyCode::Backspace => chat.backspace(),
                _ => {}
            },
            Page::Upload(upload) => match key.code {
                KeyCode::Char(c) => upload.handle_input(c),
                KeyCode::Backspace => upload.backspace(),
                _ => {}
            },
            _ => self.input_mode = InputMode::Normal,
        }
    }

    fn submit_input(&mut self) {
        match &mut self.page {
            Page::Assistant(chat) => {
                if let Some(request) = chat.submit() {
                    self.spawn_chat(request);
                }
            }
            Page::Upload(upload) => match upload.choose_typed_path() {
                Ok(()) => {
                    self.tasks.cancel_mount(self.mount);
                    self.input_mode = InputMode::Normal;
                }
                Err(err) => self.notify(err.notification()),
            },
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        // Global keys first
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('b') => {
                self.sidebar.toggle();
                return;
            }
            KeyCode::Char('x') => {
                self.notifications.dismiss_all();
                return;
            }
            KeyCode::Char('e') | KeyCode::Char('i') if self.page.has_text_input() => {
                self.input_mode = InputMode::Editing;
                return;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(item) = nav_items().nth(index) {
                    self.navigate(item.path);
                }
                return;
            }
            _ => {}
        }

        // Then the page's own keys
        match &self.page {
            Page::Dashboard(_) => self.handle_dashboard_key(key),
            Page::Upload(_) => self.handle_upload_key(key),
            Page::Assistant(_) => self.handle_assistant_key(key),
            Page::Questions(_) => self.handle_questions_key(key),
            Page::Settings(_) => self.handle_settings_key(key),
            Page::Insights(_) | Page::Login(_) | Page::NotFound => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        let Page::Dashboard(cursor) = &mut self.page else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => cursor.step(false, QUICK_ACTIONS.len()),
            KeyCode::Down | KeyCode::Char('j') => cursor.step(true, QUICK_ACTIONS.len()),
            KeyCode::Enter => {
                let (_, _, path) = QUICK_ACTIONS[cursor.index()];
                self.navigate(path);
            }
            KeyCode::Char('a') => self.navigate("/ai-assistant"),
            KeyCode::Char('u') => self.navigate("/syllabus-upload"),
            _ => {}
        }
    }

    fn handle_upload_key(&mut self, key: KeyEvent) {
        let Page::Upload(upload) = &mut self.page else {
            return;
        };
        match key.code {
            KeyCode::Char('p') | KeyCode::Enter if upload.units().is_empty() => {
                if let Some(file) = upload.begin_processing() {
                    let ingestion = self.backend.ingestion.clone();
                    self.tasks.spawn(self.mount, self.router.route(), async move {
                        TaskOutcome::Extraction(ingestion.extract_units(&file).await)
                    });
                }
            }
            KeyCode::Char('c') => {
                upload.cancel();
                self.tasks.cancel_mount(self.mount);
            }
            KeyCode::Up | KeyCode::Char('k') => upload.move_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => upload.move_cursor(true),
            KeyCode::Char(' ') | KeyCode::Enter => upload.toggle_unit_at_cursor(),
            _ => {}
        }
    }

    fn handle_assistant_key(&mut self, key: KeyEvent) {
        let Page::Assistant(chat) = &mut self.page else {
            return;
        };
        match key.code {
            KeyCode::Char(']') => chat.cycle_unit(true),
            KeyCode::Char('[') => chat.cycle_unit(false),
            KeyCode::Right | KeyCode::Char('l') => chat.move_topic_cursor(true),
            KeyCode::Left | KeyCode::Char('h') => chat.move_topic_cursor(false),
            KeyCode::Char(' ') => chat.toggle_topic_at_cursor(),
            KeyCode::Char('c') => chat.selection.clear(),
            KeyCode::Char('g') => {
                if let Some(request) = chat.generate_questions() {
                    self.spawn_chat(request);
                }
            }
            _ => {}
        }
    }

    fn handle_questions_key(&mut self, key: KeyEvent) {
        let Page::Questions(questions) = &mut self.page else {
            return;
        };
        let target = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                questions.move_cursor(false);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                questions.move_cursor(true);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                questions.toggle_focused();
                None
            }
            KeyCode::Char('r') => questions.focused_unit().map(|id| RegenTarget::Unit(id.to_string())),
            KeyCode::Char('R') => Some(RegenTarget::All),
            _ => None,
        };

        if let Some(target) = target {
            if questions.begin_regenerate(target.clone()) {
                let assistant = self.backend.assistant.clone();
                self.tasks.spawn(self.mount, self.router.route(), async move {
                    let unit_id = match &target {
                        RegenTarget::Unit(id) => Some(id.as_str()),
                        RegenTarget::All => None,
                    };
                    let result = assistant.regenerate_questions(unit_id).await;
                    TaskOutcome::Regenerated { target, result }
                });
            }
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        let Page::Settings(cursor) = &mut self.page else {
            return;
        };
        let choice = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                cursor.step(false, ThemePreference::ALL.len());
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                cursor.step(true, ThemePreference::ALL.len());
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(ThemePreference::ALL[cursor.index()]),
            KeyCode::Char('l') => Some(ThemePreference::Light),
            KeyCode::Char('d') => Some(ThemePreference::Dark),
            KeyCode::Char('s') => Some(ThemePreference::System),
            KeyCode::Char('o') => {
                self.sign_out();
                return;
            }
            _ => None,
        };

        if let Some(preference) = choice {
            if let Some(i) = ThemePreference::ALL.iter().position(|t| *t == preference) {
                *cursor = ListCursor::at(i);
            }
            self.theme.set(preference);
        }
    }

    fn sign_out(&mut self) {
        self.session = None;
        self.notify(Notification::info(
            "Logged out",
            "You have been successfully logged out.",
        ));
        self.navigate("/");
    }

    fn spawn_auth(&mut self, request: AuthRequest) {
        let auth = self.backend.auth.clone();
        self.tasks.spawn(self.mount, self.router.route(), async move {
            let result = match &request {
                AuthRequest::Login(credentials) => auth.login(credentials).await,
                AuthRequest::Signup(form) => auth.signup(form).await,
            };
            TaskOutcome::Auth(result)
        });
    }

    fn spawn_chat(&mut self, request: ChatRequest) {
        let assistant = self.backend.assistant.clone();
        self.tasks.spawn(self.mount, self.router.route(), async move {
            let result = match request {
                ChatRequest::Answer { question, context } => {
                    assistant.answer(&question, &context).await
                }
                ChatRequest::GenerateQuestions { unit } => assistant.generate_questions(unit).await,
            };
            TaskOutcome::Reply(result)
        });
    }

    /// Apply every completion that is ready.
    pub fn drain_completions(&mut self) {
        while let Some(completion) = self.tasks.try_next() {
            self.apply(completion);
        }
    }

    fn apply(&mut self, completion: Completion) {
        if completion.mount != self.mount {
            tracing::debug!(
                id = completion.id,
                route = %completion.route,
                "dropping result for a page that is gone"
            );
            return;
        }
        tracing::debug!(id = completion.id, route = %completion.route, "task finished");

        // Hand the outcome to the page that asked for it
        match (completion.outcome, &mut self.page) {
            (TaskOutcome::Auth(result), Page::Login(login)) => {
                login.finish();
                match result {
                    Ok(session) => {
                        let toast = if session.new_account {
                            Notification::success(
                                "Account created!",
                                "Welcome to AXION. Let's get started.",
                            )
                        } else {
                            Notification::success(
                                "Welcome back!",
                                "Successfully logged in to AXION.",
                            )
                        };
                        tracing::info!(email = %session.email, "signed in");
                        self.session = Some(session);
                        self.notify(toast);
                        self.navigate("/dashboard");
                    }
                    Err(err) => self.notify(err.notification()),
                }
            }
            (TaskOutcome::Reply(result), Page::Assistant(chat)) => match result {
                Ok(content) => chat.receive_reply(content),
                Err(err) => {
                    chat.receive_failure();
                    self.notify(err.notification());
                }
            },
            (TaskOutcome::Extraction(result), Page::Upload(upload)) => match result {
                Ok(units) => {
                    let count = units.len();
                    if upload.finish_processing(units) {
                        self.notify(Notification::success(
                            "Syllabus processed!",
                            format!("Extracted {} units from your syllabus.", count),
                        ));
                    }
                }
                Err(err) => {
                    upload.processing_failed();
                    self.notify(err.notification());
                }
            },
            (TaskOutcome::Regenerated { target, result }, Page::Questions(questions)) => {
                questions.finish_regenerate(&target);
                if let Err(err) = result {
                    self.notify(err.notification());
                }
            }
            (TaskOutcome::Insights(result), Page::Insights(insights)) => match result {
                Ok(data) => insights.loaded(data),
                Err(err) => {
                    insights.load_failed();
                    self.notify(err.notification());
                }
            },
            (outcome, _) => {
                tracing::warn!(?outcome, "result does not match the mounted page");
            }
        }
    }
}

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run it
    let services = create_backend(BackendKind::Simulated, &config);
    let mut app = AxionApp::new(&config, services);
    tracing::info!(route = %app.route(), theme = %config.theme, "starting terminal ui");

    let result = run_app(&mut terminal, &mut app, config.tick_rate()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app<B: TerminalBackend>(
    terminal: &mut Terminal<B>,
    app: &mut AxionApp,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        // Draw UI
        terminal.draw(|f| render_ui(f, app))?;

        // Handle input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        // Apply finished tasks
        app.drain_completions();

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::message::MessageRole;
    use crate::state::upload::UploadPhase;
    use std::io::Write;
    use tempfile::tempdir;

    fn app_at(path: &str) -> AxionApp {
        let config = Config {
            start_route: path.to_string(),
            ..Config::instant()
        };
        let backend = create_backend(BackendKind::Simulated, &config);
        AxionApp::new(&config, backend)
    }

    fn press(app: &mut AxionApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut AxionApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Apply results until nothing is left in flight.
    async fn settle(app: &mut AxionApp) {
        while let Some(completion) = app.tasks.next().await {
            app.apply(completion);
        }
    }

    fn chat_roles(app: &AxionApp) -> Vec<MessageRole> {
        match app.page() {
            Page::Assistant(chat) => chat.messages().iter().map(|m| m.role).collect(),
            other => panic!("not on the assistant page: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_root_is_login_outside_layout() {
        let app = app_at("/");
        assert_eq!(app.route(), Route::Login);
        assert!(!app.route().in_layout());
        assert!(matches!(app.page(), Page::Login(_)));
    }

    #[tokio::test]
    async fn test_unknown_path_then_home() {
        let mut app = app_at("/nowhere");
        assert!(matches!(app.page(), Page::NotFound));
        assert_eq!(app.requested_path(), "/nowhere");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_login_navigates_to_dashboard() {
        let mut app = app_at("/");
        type_text(&mut app, "me@uni.edu");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.page(), Page::Login(login) if login.is_loading()));

        settle(&mut app).await;
        assert_eq!(app.route(), Route::Dashboard);
        assert_eq!(app.session().map(|s| s.email.as_str()), Some("me@uni.edu"));
        assert_eq!(
            app.notifications().iter().last().map(|n| n.title.as_str()),
            Some("Welcome back!")
        );
    }

    #[tokio::test]
    async fn test_chat_turn_appends_user_then_assistant() {
        let mut app = app_at("/ai-assistant");
        assert_eq!(app.input_mode(), InputMode::Editing);

        type_text(&mut app, "explain binary trees");
        press(&mut app, KeyCode::Enter);
        assert_eq!(chat_roles(&app), vec![MessageRole::User]);

        settle(&mut app).await;
        assert_eq!(
            chat_roles(&app),
            vec![MessageRole::User, MessageRole::Assistant]
        );
        let Page::Assistant(chat) = app.page() else {
            panic!("not on the assistant page");
        };
        let reply = &chat.messages()[1].content;
        assert!(reply.contains("Explanation (Exam-Oriented)"));
        assert!(reply.contains("Binary Search Tree (BST)"));
        assert!(!chat.is_awaiting());
    }

    #[tokio::test]
    async fn test_whitespace_chat_changes_nothing() {
        let mut app = app_at("/ai-assistant");
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(chat_roles(&app).is_empty());
        assert_eq!(app.tasks.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_leaving_page_drops_pending_reply() {
        let config = Config {
            start_route: "/ai-assistant".to_string(),
            ..Config::default()
        };
        let backend = create_backend(BackendKind::Simulated, &config);
        let mut app = AxionApp::new(&config, backend);

        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tasks.in_flight(), 1);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.route(), Route::Dashboard);
        assert_eq!(app.tasks.in_flight(), 0);

        press(&mut app, KeyCode::Char('3'));
        assert!(chat_roles(&app).is_empty());
    }

    #[tokio::test]
    async fn test_sidebar_toggle_keeps_route() {
        let mut app = app_at("/faculty-insights");
        let before = app.sidebar().clone();
        press(&mut app, KeyCode::Char('b'));
        assert!(app.sidebar().is_collapsed());
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.sidebar(), &before);
        assert_eq!(app.route(), Route::FacultyInsights);
    }

    #[tokio::test]
    async fn test_insights_load_on_mount() {
        let mut app = app_at("/faculty-insights");
        assert!(matches!(app.page(), Page::Insights(i) if i.is_loading()));
        settle(&mut app).await;
        let Page::Insights(insights) = app.page() else {
            panic!("not on insights");
        };
        assert_eq!(insights.data().map(|d| d.total_doubts()), Some(211));
    }

    #[tokio::test]
    async fn test_upload_flow_with_rejection() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let pdf = dir.path().join("syllabus.pdf");
        std::fs::File::create(&pdf)?.write_all(b"%PDF-1.4")?;
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "not a pdf")?;

        let mut app = app_at("/syllabus-upload");
        app.handle_paste(&pdf.to_string_lossy());
        app.handle_paste(&txt.to_string_lossy());

        assert_eq!(app.notifications().len(), 1);
        assert_eq!(
            app.notifications().iter().next().map(|n| n.title.as_str()),
            Some("Invalid file type")
        );
        let Page::Upload(upload) = app.page() else {
            panic!("not on upload");
        };
        assert_eq!(upload.file().map(|f| f.name.as_str()), Some("syllabus.pdf"));

        press(&mut app, KeyCode::Char('p'));
        settle(&mut app).await;
        let Page::Upload(upload) = app.page() else {
            panic!("not on upload");
        };
        assert_eq!(upload.units().len(), 4);
        assert!(upload.is_unit_expanded(0));
        assert_eq!(
            app.notifications().iter().last().map(|n| n.description.as_str()),
            Some("Extracted 4 units from your syllabus.")
        );

        press(&mut app, KeyCode::Char('c'));
        let Page::Upload(upload) = app.page() else {
            panic!("not on upload");
        };
        assert_eq!(upload.phase(), &UploadPhase::NoFile);
        Ok(())
    }

    #[tokio::test]
    async fn test_typed_path_rejection_keeps_chosen_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let pdf = dir.path().join("syllabus.pdf");
        std::fs::write(&pdf, b"%PDF-1.4")?;
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "not a pdf")?;

        let mut app = app_at("/syllabus-upload");
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, &pdf.to_string_lossy());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(app.notifications().is_empty());

        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, &txt.to_string_lossy());
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.notifications().len(), 1);
        assert_eq!(
            app.notifications().iter().next().map(|n| n.title.as_str()),
            Some("Invalid file type")
        );
        let Page::Upload(upload) = app.page() else {
            panic!("not on upload");
        };
        assert_eq!(upload.file().map(|f| f.name.as_str()), Some("syllabus.pdf"));
        assert!(!upload.is_processing());
        Ok(())
    }

    #[tokio::test]
    async fn test_same_route_keeps_pending_reply() {
        let config = Config {
            start_route: "/ai-assistant".to_string(),
            ..Config::default()
        };
        let backend = create_backend(BackendKind::Simulated, &config);
        let mut app = AxionApp::new(&config, backend);

        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('3'));

        assert_eq!(app.route(), Route::AiAssistant);
        assert_eq!(chat_roles(&app), vec![MessageRole::User]);
        assert_eq!(app.tasks.in_flight(), 1);
        assert!(app.busy());
        assert_eq!(app.input_mode(), InputMode::Normal);
    }

    #[tokio::test]
    async fn test_cancel_aborts_processing() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let pdf = dir.path().join("syllabus.pdf");
        std::fs::write(&pdf, b"%PDF-1.4")?;

        let config = Config {
            start_route: "/syllabus-upload".to_string(),
            ..Config::default()
        };
        let backend = create_backend(BackendKind::Simulated, &config);
        let mut app = AxionApp::new(&config, backend);

        app.handle_paste(&pdf.to_string_lossy());
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.tasks.in_flight(), 1);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.tasks.in_flight(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_settings_is_the_theme_writer() {
        let mut app = app_at("/settings");
        let reader = app.theme().clone();
        assert_eq!(reader.current(), ThemePreference::System);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(reader.current(), ThemePreference::Dark);
        assert_eq!(app.appearance(), Appearance::Dark);

        // theme keys mean nothing elsewhere
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(reader.current(), ThemePreference::Dark);
    }

    #[tokio::test]
    async fn test_sign_out_returns_to_login() {
        let mut app = app_at("/settings");
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.route(), Route::Login);
        assert_eq!(
            app.notifications().iter().last().map(|n| n.title.as_str()),
            Some("Logged out")
        );
    }

    #[tokio::test]
    async fn test_regenerate_clears_indicator() {
        let mut app = app_at("/important-questions");
        press(&mut app, KeyCode::Char('r'));
        assert!(matches!(app.page(), Page::Questions(q) if q.regenerating().is_some()));
        settle(&mut app).await;
        assert!(matches!(app.page(), Page::Questions(q) if q.regenerating().is_none()));
    }

    #[tokio::test]
    async fn test_generate_questions_from_assistant() {
        let mut app = app_at("/ai-assistant");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char('g'));
        settle(&mut app).await;

        let Page::Assistant(chat) = app.page() else {
            panic!("not on the assistant page");
        };
        assert_eq!(
            chat.messages()[0].content,
            "Generate important exam questions for Unit 2: Trees and Graphs"
        );
        assert!(chat.messages()[1].content.starts_with("**Important Exam Questions**"));
    }
}
