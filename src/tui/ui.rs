use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::state::layout::{BOTTOM_NAV, MAIN_NAV};
use crate::state::notification::NotificationKind;
use crate::state::theme::Appearance;
use crate::tui::app::{AxionApp, InputMode};
use crate::tui::page::Page;
use crate::tui::views;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Colours for one appearance
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub muted: Color,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub destructive: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Dark => Self {
                fg: Color::White,
                muted: Color::DarkGray,
                primary: Color::Cyan,
                success: Color::Green,
                warning: Color::Yellow,
                destructive: Color::Red,
                border: Color::Gray,
            },
            Appearance::Light => Self {
                fg: Color::Black,
                muted: Color::Gray,
                primary: Color::Blue,
                success: Color::Green,
                warning: Color::Rgb(180, 120, 0),
                destructive: Color::Red,
                border: Color::DarkGray,
            },
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border))
            .title(Span::styled(title, self.heading()))
    }
}

pub fn spinner(ticks: u64) -> &'static str {
    SPINNER[(ticks % SPINNER.len() as u64) as usize]
}

/// Render the whole screen
pub fn render_ui(f: &mut Frame, app: &AxionApp) {
    let palette = Palette::for_appearance(app.appearance());

    if app.route().in_layout() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(app.sidebar().width()),
                Constraint::Min(20),
            ])
            .split(f.size());

        // Sidebar on the left, page chrome on the right
        render_sidebar(f, app, columns[0], &palette);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Top bar
                Constraint::Min(5),    // Page
                Constraint::Length(1), // Key hints
            ])
            .split(columns[1]);

        render_top_bar(f, app, rows[0], &palette);
        render_page(f, app, rows[1], &palette);
        render_hints(f, app, rows[2], &palette);
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(f.size());
        render_page(f, app, rows[0], &palette);
        render_hints(f, app, rows[1], &palette);
    }

    render_toasts(f, app, &palette);
}

fn render_page(f: &mut Frame, app: &AxionApp, area: Rect, palette: &Palette) {
    let spin = spinner(app.ticks());
    match app.page() {
        Page::Login(login) => views::render_login(f, login, area, palette, spin),
        Page::Dashboard(cursor) => views::render_dashboard(
            f,
            *cursor,
            app.session().map(|s| s.display_name.as_str()),
            area,
            palette,
        ),
        Page::Upload(upload) => views::render_upload(
            f,
            upload,
            app.input_mode() == InputMode::Editing,
            area,
            palette,
            spin,
        ),
        Page::Assistant(chat) => views::render_assistant(
            f,
            chat,
            app.input_mode() == InputMode::Editing,
            area,
            palette,
            spin,
        ),
        Page::Questions(questions) => views::render_questions(f, questions, area, palette, spin),
        Page::Insights(insights) => views::render_insights(f, insights, area, palette, spin),
        Page::Settings(cursor) => {
            views::render_settings(f, *cursor, app.theme().current(), area, palette)
        }
        Page::NotFound => views::render_not_found(f, app.requested_path(), area, palette),
    }
}

fn render_sidebar(f: &mut Frame, app: &AxionApp, area: Rect, palette: &Palette) {
    let collapsed = app.sidebar().is_collapsed();
    let active = app.sidebar().active_item(app.route());

    let item = |index: usize, nav: &crate::state::layout::NavItem| {
        let selected = active.map(|a| a.path) == Some(nav.path);
        let style = if selected {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            palette.text()
        };
        let label = if collapsed {
            format!(" {} ", nav.icon)
        } else {
            format!(" {} {} {}", index + 1, nav.icon, nav.label)
        };
        ListItem::new(Line::from(Span::styled(label, style)))
    };

    let main: Vec<ListItem> = MAIN_NAV
        .iter()
        .enumerate()
        .map(|(i, nav)| item(i, nav))
        .collect();
    let bottom: Vec<ListItem> = BOTTOM_NAV
        .iter()
        .enumerate()
        .map(|(i, nav)| item(MAIN_NAV.len() + i, nav))
        .collect();

    let title = if collapsed { "A" } else { "AXION" };
    let block = palette.block(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_NAV.len() as u16),
            Constraint::Length(BOTTOM_NAV.len() as u16),
        ])
        .split(inner);

    f.render_widget(List::new(main), parts[0]);
    f.render_widget(List::new(bottom), parts[1]);
}

fn render_top_bar(f: &mut Frame, app: &AxionApp, area: Rect, palette: &Palette) {
    let user = app
        .session()
        .map(|s| format!("{} ({})", s.display_name, s.role.label()))
        .unwrap_or_else(|| "Guest".to_string());

    let mut spans = vec![
        Span::styled(app.route().title(), palette.heading()),
        Span::styled("  |  theme: ", palette.dim()),
        Span::styled(app.theme().current().label(), palette.text()),
        Span::styled("  |  ", palette.dim()),
        Span::styled(user, palette.text()),
    ];
    if app.busy() {
        spans.push(Span::styled(
            format!("  {} working", spinner(app.ticks())),
            Style::default().fg(palette.warning),
        ));
    }
    let line = Line::from(spans);

    let bar = Paragraph::new(line).block(palette.block("Educational Assistant"));
    f.render_widget(bar, area);
}

fn render_hints(f: &mut Frame, app: &AxionApp, area: Rect, palette: &Palette) {
    let hints = match (app.page(), app.input_mode()) {
        (Page::Login(_), _) => "Tab next field  Enter submit  F2 switch tab  Ctrl+P show password  Esc quit",
        (Page::NotFound, _) => "Enter return home  q quit",
        (_, InputMode::Editing) => "Enter submit  Esc stop typing",
        (Page::Dashboard(_), _) => "Up/Down choose  Enter open  a assistant  u upload",
        (Page::Upload(_), _) => "e type path  p process  Space expand  c clear",
        (Page::Assistant(_), _) => "e type  [ ] unit  Left/Right topic  Space pick  g generate  c clear",
        (Page::Questions(_), _) => "Up/Down choose  Enter expand  r regenerate  R regenerate all",
        (Page::Insights(_), _) => "",
        (Page::Settings(_), _) => "Up/Down choose  Enter apply  l/d/s theme  o sign out",
    };
    let global = "1-6 navigate  b sidebar  x dismiss  q quit";
    let text = if !app.route().in_layout() {
        hints.to_string()
    } else if hints.is_empty() {
        global.to_string()
    } else {
        format!("{}  |  {}", hints, global)
    };
    f.render_widget(Paragraph::new(Span::styled(text, palette.dim())), area);
}

fn render_toasts(f: &mut Frame, app: &AxionApp, palette: &Palette) {
    if app.notifications().is_empty() {
        return;
    }

    // Stack toasts down the top right corner
    let screen = f.size();
    let width = 44.min(screen.width);
    let mut y = screen.y + 1;

    for toast in app.notifications().iter() {
        let height = 4;
        if y + height > screen.bottom() {
            break;
        }
        let area = Rect {
            x: screen.right().saturating_sub(width + 1),
            y,
            width,
            height,
        };
        let colour = match toast.kind {
            NotificationKind::Info => palette.primary,
            NotificationKind::Success => palette.success,
            NotificationKind::Destructive => palette.destructive,
        };

        let body = Text::from(vec![
            Line::from(Span::styled(
                toast.title.as_str(),
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(toast.description.as_str(), palette.text())),
        ]);
        let widget = Paragraph::new(body)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colour)),
            );
        f.render_widget(Clear, area);
        f.render_widget(widget, area);
        y += height;
    }
}
