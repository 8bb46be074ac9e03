use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::backend::Severity;
use crate::catalog::{self, Difficulty, DASHBOARD_STATS, EXAM_TIPS, RECENT_ACTIVITY};
use crate::state::chat::ChatState;
use crate::state::insights::InsightsState;
use crate::state::login::{LoginField, LoginState, LoginTab};
use crate::state::message::MessageRole;
use crate::state::questions::{QuestionsState, RegenTarget};
use crate::state::upload::{UploadPhase, UploadState};
use crate::state::ThemePreference;
use crate::tui::page::{ListCursor, QUICK_ACTIONS};
use crate::tui::ui::Palette;

/// Split assistant text into styled lines. `**` toggles bold.
pub fn rich_lines<'a>(content: &'a str, base: Style) -> Vec<Line<'a>> {
    content
        .lines()
        .map(|line| {
            let spans: Vec<Span> = line
                .split("**")
                .enumerate()
                .filter(|(_, part)| !part.is_empty())
                .map(|(i, part)| {
                    if i % 2 == 1 {
                        Span::styled(part, base.add_modifier(Modifier::BOLD))
                    } else {
                        Span::styled(part, base)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn selected(palette: &Palette, on: bool) -> Style {
    if on {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        palette.text()
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_login(f: &mut Frame, login: &LoginState, area: Rect, palette: &Palette, spin: &str) {
    let height = 8 + 2 * login.fields().len() as u16;
    // Create the login card
    let card = centered(area, 56, height);
    let block = palette.block("AXION - Educational Assistant");
    let inner = block.inner(card);
    f.render_widget(block, card);

    let tab = |label: &'static str, active: bool| {
        Span::styled(format!(" {} ", label), selected(palette, active))
    };
    let mut lines = vec![
        Line::from(vec![
            tab("Login", login.tab() == LoginTab::Login),
            Span::raw("  "),
            tab("Sign up", login.tab() == LoginTab::Signup),
        ]),
        Line::from(""),
    ];

    // Fields for the active tab
    for field in login.fields() {
        let focused = login.focus() == *field;
        let (label, value) = match field {
            LoginField::Name => ("Full name", login.name.clone()),
            LoginField::Email => ("Email", login.email.clone()),
            LoginField::Password => (
                "Password",
                if login.show_password() {
                    login.password.clone()
                } else {
                    "*".repeat(login.password.chars().count())
                },
            ),
            LoginField::Role => ("Role", format!("< {} >", login.role.label())),
        };
        let marker = if focused { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, label),
            if focused { palette.heading() } else { palette.dim() },
        )));
        lines.push(Line::from(Span::styled(format!("  {}", value), palette.text())));
    }

    lines.push(Line::from(""));
    let action = match login.tab() {
        LoginTab::Login => "Sign in",
        LoginTab::Signup => "Create account",
    };
    lines.push(if login.is_loading() {
        Line::from(Span::styled(format!("{} Please wait...", spin), palette.dim()))
    } else {
        Line::from(Span::styled(format!("[ {} ]", action), palette.heading()))
    });

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_dashboard(
    f: &mut Frame,
    cursor: ListCursor,
    name: Option<&str>,
    area: Rect,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(QUICK_ACTIONS.len() as u16 * 2 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    // Welcome
    let welcome = match name {
        Some(name) => format!("Welcome back, {}!", name),
        None => "Welcome to AXION".to_string(),
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(welcome, palette.heading())),
            Line::from(Span::styled(
                "Your exam-oriented study companion",
                palette.dim(),
            )),
        ]),
        rows[0],
    );

    // Stats row
    let stat_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    for (stat, col) in DASHBOARD_STATS.iter().zip(stat_cols.iter()) {
        let body = Paragraph::new(Line::from(Span::styled(stat.value, palette.heading())))
            .alignment(Alignment::Center)
            .block(palette.block(stat.label));
        f.render_widget(body, *col);
    }

    // Quick actions
    let actions: Vec<ListItem> = QUICK_ACTIONS
        .iter()
        .enumerate()
        .map(|(i, (title, desc, _))| {
            ListItem::new(vec![
                Line::from(Span::styled(*title, selected(palette, cursor.index() == i))),
                Line::from(Span::styled(format!("  {}", desc), palette.dim())),
            ])
        })
        .collect();
    f.render_widget(
        List::new(actions).block(palette.block("Quick Actions")),
        rows[2],
    );

    // Recent activity
    let activity: Vec<ListItem> = RECENT_ACTIVITY
        .iter()
        .map(|a| {
            ListItem::new(Line::from(vec![
                Span::styled(a.action, palette.text()),
                Span::styled(format!(" - {}", a.subject), palette.dim()),
                Span::styled(format!("  ({})", a.time), palette.dim()),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(activity).block(palette.block("Recent Activity")),
        rows[3],
    );
}

pub fn render_upload(
    f: &mut Frame,
    upload: &UploadState,
    editing: bool,
    area: Rect,
    palette: &Palette,
    spin: &str,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    // Render the drop zone, chosen file or extracted units
    match upload.phase() {
        UploadPhase::NoFile => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled("Drop your syllabus PDF here", palette.heading())),
                Line::from(Span::styled(
                    "Drag the file onto this terminal, or press e to type its path",
                    palette.dim(),
                )),
                Line::from(Span::styled("Only PDF files are accepted", palette.dim())),
            ];
            f.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(palette.block("Upload Syllabus")),
                rows[0],
            );
        }
        UploadPhase::FileSelected { file, .. } => {
            let status = if upload.is_processing() {
                Line::from(Span::styled(
                    format!("{} Processing syllabus...", spin),
                    Style::default().fg(palette.warning),
                ))
            } else {
                Line::from(Span::styled(
                    "Press p to process, c to remove",
                    palette.dim(),
                ))
            };
            let text = vec![
                Line::from(Span::styled(file.name.as_str(), palette.heading())),
                Line::from(Span::styled(
                    format!("{:.2} KB", file.size_kb()),
                    palette.dim(),
                )),
                Line::from(""),
                status,
            ];
            f.render_widget(
                Paragraph::new(text).block(palette.block("Selected File")),
                rows[0],
            );
        }
        UploadPhase::Processed { file, units, .. } => {
            let mut items = vec![ListItem::new(Line::from(vec![
                Span::styled(file.name.as_str(), palette.text()),
                Span::styled(
                    format!("  {:.2} KB  {} units", file.size_kb(), units.len()),
                    palette.dim(),
                ),
            ]))];
            for (i, unit) in units.iter().enumerate() {
                let open = upload.is_unit_expanded(i);
                let arrow = if open { "v" } else { ">" };
                let mut lines = vec![Line::from(Span::styled(
                    format!("{} {}", arrow, unit.name),
                    selected(palette, upload.unit_cursor() == i),
                ))];
                if open {
                    lines.extend(unit.topics.iter().map(|topic| {
                        Line::from(Span::styled(format!("    - {}", topic), palette.text()))
                    }));
                }
                items.push(ListItem::new(lines));
            }
            f.render_widget(
                List::new(items).block(palette.block("Extracted Units")),
                rows[0],
            );
        }
    }

    // Path field, also used to replace a chosen file
    let border = if editing {
        Style::default().fg(palette.primary)
    } else {
        palette.dim()
    };
    let title = if upload.file().is_some() {
        "Replace with path"
    } else {
        "File path"
    };
    render_input(
        f,
        upload.path_input(),
        title,
        border,
        editing,
        rows[1],
        palette,
    );
}

pub fn render_assistant(
    f: &mut Frame,
    chat: &ChatState,
    editing: bool,
    area: Rect,
    palette: &Palette,
    spin: &str,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Unit and topic
            Constraint::Min(5),    // Conversation and tips
            Constraint::Length(3), // Input
        ])
        .split(area);

    // Unit and topic selectors
    let unit = chat
        .selection
        .unit()
        .map(|u| u.name)
        .unwrap_or("All units");
    let mut chips = vec![Span::styled("Topic: ", palette.dim())];
    for (i, topic) in chat.selection.topics().iter().enumerate() {
        let picked = chat.selection.topic() == Some(*topic);
        let mut style = if picked {
            Style::default().fg(palette.success).add_modifier(Modifier::BOLD)
        } else {
            palette.text()
        };
        if i == chat.topic_cursor() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        chips.push(Span::styled(format!("[{}]", topic), style));
        chips.push(Span::raw(" "));
    }
    let context = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Unit: ", palette.dim()),
            Span::styled(unit, palette.heading()),
        ]),
        Line::from(chips),
    ])
    .block(palette.block("Context"));
    f.render_widget(context, rows[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);

    // Conversation
    let mut lines: Vec<Line> = Vec::new();
    if chat.messages().is_empty() {
        lines.push(Line::from(Span::styled("Ask AXION anything", palette.heading())));
        lines.push(Line::from(Span::styled(
            "Answers are exam-oriented and follow the selected unit and topic.",
            palette.dim(),
        )));
    }
    for message in chat.messages() {
        let (who, colour) = match message.role {
            MessageRole::User => ("You", palette.primary),
            MessageRole::Assistant => ("AXION", palette.success),
        };
        lines.push(Line::from(vec![
            Span::styled(
                who,
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", message.timestamp.format("%H:%M")),
                palette.dim(),
            ),
        ]));
        lines.extend(rich_lines(&message.content, palette.text()));
        lines.push(Line::from(""));
    }
    if chat.is_awaiting() {
        lines.push(Line::from(Span::styled(
            format!("{} AXION is thinking...", spin),
            palette.dim(),
        )));
    }

    // Wrap up front so the newest line can be pinned to the bottom
    let block = palette.block("Conversation");
    let inner = block.inner(middle[0]);
    let wrapped = wrap_lines(&lines, inner.width as usize);
    let scroll = wrapped.len().saturating_sub(inner.height as usize);
    let conversation = Paragraph::new(wrapped)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        .block(block);
    f.render_widget(conversation, middle[0]);

    // Exam tips stay beside the conversation
    let tips: Vec<Line> = EXAM_TIPS
        .iter()
        .map(|tip| Line::from(Span::styled(format!("- {}", tip), palette.text())))
        .collect();
    f.render_widget(
        Paragraph::new(tips)
            .wrap(Wrap { trim: true })
            .block(palette.block("Exam Tips")),
        middle[1],
    );

    // Input
    let border = if editing && !chat.is_awaiting() {
        Style::default().fg(palette.primary)
    } else {
        palette.dim()
    };
    render_input(
        f,
        chat.input(),
        "Message",
        border,
        editing && !chat.is_awaiting(),
        rows[2],
        palette,
    );
}

/// Single-line text field. A long value scrolls so its end and the cursor
/// stay inside the box.
fn render_input(
    f: &mut Frame,
    value: &str,
    title: &str,
    border: Style,
    show_cursor: bool,
    area: Rect,
    palette: &Palette,
) {
    let room = area.width.saturating_sub(3);
    let len = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
    let offset = len.saturating_sub(room);

    let input = Paragraph::new(Span::styled(value, palette.text()))
        .scroll((0, offset))
        .block(palette.block(title).border_style(border));
    f.render_widget(input, area);

    if show_cursor {
        let column = area
            .x
            .saturating_add(1)
            .saturating_add(len - offset)
            .min(area.right().saturating_sub(2));
        f.set_cursor(column, area.y.saturating_add(1));
    }
}

/// Break styled lines into rows of at most `width` cells, word by word.
/// Whitespace at a break is dropped; words longer than a row are split.
pub fn wrap_lines(lines: &[Line], width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for line in lines {
        let cells: Vec<(char, Style)> = line
            .spans
            .iter()
            .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
            .collect();

        let mut row: Vec<(char, Style)> = Vec::new();
        let mut start = 0;
        while start < cells.len() {
            let space = cells[start].0.is_whitespace();
            let end = cells[start..]
                .iter()
                .position(|(c, _)| c.is_whitespace() != space)
                .map_or(cells.len(), |n| start + n);
            let token = &cells[start..end];

            if row.len() + token.len() <= width {
                row.extend_from_slice(token);
            } else if space {
                if !row.is_empty() {
                    rows.push(styled_row(std::mem::take(&mut row)));
                }
            } else if token.len() <= width {
                rows.push(styled_row(std::mem::take(&mut row)));
                row.extend_from_slice(token);
            } else {
                for cell in token {
                    if row.len() == width {
                        rows.push(styled_row(std::mem::take(&mut row)));
                    }
                    row.push(*cell);
                }
            }
            start = end;
        }
        rows.push(styled_row(row));
    }
    rows
}

fn styled_row(cells: Vec<(char, Style)>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut current: Option<Style> = None;
    for (c, style) in cells {
        if current.is_some_and(|s| s != style) {
            spans.push(Span::styled(std::mem::take(&mut text), current.unwrap_or_default()));
        }
        current = Some(style);
        text.push(c);
    }
    if let Some(style) = current {
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

pub fn render_questions(
    f: &mut Frame,
    questions: &QuestionsState,
    area: Rect,
    palette: &Palette,
    spin: &str,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5), Constraint::Length(6)])
        .split(area);

    let header = if questions.is_regenerating(&RegenTarget::All) {
        Span::styled(
            format!("{} Regenerating all units...", spin),
            Style::default().fg(palette.warning),
        )
    } else {
        Span::styled("Press R to regenerate every unit", palette.dim())
    };
    f.render_widget(Paragraph::new(header), rows[0]);

    let items: Vec<ListItem> = catalog::question_bank()
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let open = questions.is_expanded(unit.unit_id);
            let busy = questions.regenerating() == Some(&RegenTarget::Unit(unit.unit_id.to_string()))
                || questions.is_regenerating(&RegenTarget::All);
            let mut head = vec![
                Span::styled(
                    format!("{} {}", if open { "v" } else { ">" }, unit.unit_name),
                    selected(palette, questions.cursor() == i),
                ),
                Span::styled(
                    format!("  {} questions, {} marks", unit.questions.len(), unit.total_marks()),
                    palette.dim(),
                ),
            ];
            if busy {
                head.push(Span::styled(
                    format!("  {} regenerating", spin),
                    Style::default().fg(palette.warning),
                ));
            }

            let mut lines = vec![Line::from(head)];
            if open {
                for (n, q) in unit.questions.iter().enumerate() {
                    let colour = match q.difficulty {
                        Difficulty::Easy => palette.success,
                        Difficulty::Medium => palette.warning,
                        Difficulty::Hard => palette.destructive,
                    };
                    lines.push(Line::from(vec![
                        Span::styled(format!("   {}. {}", n + 1, q.text), palette.text()),
                        Span::styled(
                            format!("  [{}]", q.difficulty.label()),
                            Style::default().fg(colour),
                        ),
                        Span::styled(format!(" {} marks", q.marks), palette.dim()),
                    ]));
                }
            }
            ListItem::new(lines)
        })
        .collect();
    f.render_widget(
        List::new(items).block(palette.block("Important Questions")),
        rows[1],
    );

    let tips: Vec<Line> = EXAM_TIPS
        .iter()
        .map(|tip| Line::from(Span::styled(format!("- {}", tip), palette.text())))
        .collect();
    f.render_widget(
        Paragraph::new(tips)
            .wrap(Wrap { trim: true })
            .block(palette.block("Exam Tips")),
        rows[2],
    );
}

pub fn render_insights(
    f: &mut Frame,
    insights: &InsightsState,
    area: Rect,
    palette: &Palette,
    spin: &str,
) {
    let Some(data) = insights.data() else {
        let text = if insights.is_loading() {
            format!("{} Loading insights...", spin)
        } else {
            "No insights available".to_string()
        };
        f.render_widget(
            Paragraph::new(Span::styled(text, palette.dim())).block(palette.block("Faculty Insights")),
            area,
        );
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(data.recent_doubts.len() as u16 + 2),
        ])
        .split(area);

    let hardest = data
        .most_difficult_unit()
        .map(|u| u.label.clone())
        .unwrap_or_else(|| "-".to_string());
    let stats = [
        ("Active Students", data.active_students.to_string()),
        ("Questions Generated", data.questions_generated.to_string()),
        (
            "Total Doubts",
            format!("{} ({:+}%)", data.total_doubts(), data.doubts_trend),
        ),
        ("Most Difficult", hardest),
    ];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    for ((label, value), col) in stats.iter().zip(cols.iter()) {
        f.render_widget(
            Paragraph::new(Span::styled(value.as_str(), palette.heading()))
                .alignment(Alignment::Center)
                .block(palette.block(label)),
            *col,
        );
    }

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let bars: Vec<(&str, u64)> = data
        .doubts_by_unit
        .iter()
        .map(|u| (u.unit.as_str(), u.doubts))
        .collect();
    let chart = BarChart::default()
        .block(palette.block("Doubts by Unit"))
        .data(bars.as_slice())
        .bar_width(8)
        .bar_gap(2)
        .bar_style(Style::default().fg(palette.primary))
        .value_style(Style::default().fg(palette.fg).add_modifier(Modifier::BOLD));
    f.render_widget(chart, middle[0]);

    let topics_block = palette.block("Difficult Topics");
    let topics_area = topics_block.inner(middle[1]);
    f.render_widget(topics_block, middle[1]);
    let gauge_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            data.difficult_topics
                .iter()
                .map(|_| Constraint::Length(2))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(topics_area);
    for (topic, row) in data.difficult_topics.iter().zip(gauge_rows.iter()) {
        let colour = match topic.severity() {
            Severity::Destructive => palette.destructive,
            Severity::Warning => palette.warning,
            Severity::Primary => palette.primary,
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(colour))
            .percent(topic.difficulty.min(100))
            .label(format!("{} ({}) {}%", topic.topic, topic.unit, topic.difficulty));
        f.render_widget(gauge, *row);
    }

    let doubts: Vec<ListItem> = data
        .recent_doubts
        .iter()
        .map(|d| {
            ListItem::new(Line::from(vec![
                Span::styled(d.student.as_str(), palette.heading()),
                Span::styled(format!(": {}", d.question), palette.text()),
                Span::styled(format!("  {}", d.time), palette.dim()),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(doubts).block(palette.block("Recent Student Doubts")),
        rows[2],
    );
}

pub fn render_settings(
    f: &mut Frame,
    cursor: ListCursor,
    current: ThemePreference,
    area: Rect,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ThemePreference::ALL.len() as u16 * 2 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    let items: Vec<ListItem> = ThemePreference::ALL
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let mark = if *theme == current { "(*)" } else { "( )" };
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("{} {}", mark, theme.label()),
                    selected(palette, cursor.index() == i),
                )),
                Line::from(Span::styled(
                    format!("    {}", theme.description()),
                    palette.dim(),
                )),
            ])
        })
        .collect();
    f.render_widget(List::new(items).block(palette.block("Appearance")), rows[0]);

    let account = Paragraph::new(vec![
        Line::from(Span::styled("Sign out of AXION on this device", palette.text())),
        Line::from(Span::styled("Press o to log out", palette.dim())),
    ])
    .block(palette.block("Account"));
    f.render_widget(account, rows[1]);
}

pub fn render_not_found(f: &mut Frame, path: &str, area: Rect, palette: &Palette) {
    let card = centered(area, 50, 7);
    let text = vec![
        Line::from(Span::styled("404", palette.heading())),
        Line::from(Span::styled("Oops! Page not found", palette.text())),
        Line::from(Span::styled(path, palette.dim())),
        Line::from(""),
        Line::from(Span::styled("Press Enter to return home", palette.dim())),
    ];
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), card);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_double_stars_become_bold() {
        let lines = rich_lines("**Explanation (Exam-Oriented)**\n\nplain **bold** tail", Style::default());
        assert_eq!(lines.len(), 3);

        let heading = &lines[0].spans;
        assert_eq!(heading.len(), 1);
        assert_eq!(heading[0].content, "Explanation (Exam-Oriented)");
        assert!(heading[0].style.add_modifier.contains(Modifier::BOLD));

        assert!(lines[1].spans.is_empty());

        let mixed: Vec<(&str, bool)> = lines[2]
            .spans
            .iter()
            .map(|s| (s.content.as_ref(), s.style.add_modifier.contains(Modifier::BOLD)))
            .collect();
        assert_eq!(mixed, vec![("plain ", false), ("bold", true), (" tail", false)]);
    }

    #[test]
    fn test_wrap_lines_breaks_on_words() {
        let text = |rows: Vec<Line>| -> Vec<String> {
            rows.iter()
                .map(|row| row.spans.iter().map(|s| s.content.as_ref()).collect())
                .collect()
        };

        let rows = wrap_lines(&[Line::from("aaa bbb ccc")], 7);
        assert_eq!(text(rows), vec!["aaa bbb", "ccc"]);

        let rows = wrap_lines(&[Line::from("abcdefghij")], 4);
        assert_eq!(text(rows), vec!["abcd", "efgh", "ij"]);

        let rows = wrap_lines(&[Line::from(""), Line::from("ok")], 10);
        assert_eq!(text(rows), vec!["", "ok"]);
    }

    #[test]
    fn test_wrap_lines_keeps_styles() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![Span::styled("one ", bold), Span::raw("two three")]);

        let rows = wrap_lines(&[line], 8);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].spans[0].content, "one ");
        assert_eq!(rows[0].spans[0].style, bold);
        assert_eq!(rows[0].spans[1].content, "two ");
        assert_eq!(rows[1].spans[0].content, "three");
    }

    fn draw_assistant(chat: &ChatState, width: u16, height: u16) -> (String, (u16, u16)) {
        let palette = Palette::for_appearance(crate::state::theme::Appearance::Dark);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_assistant(f, chat, true, f.size(), &palette, "|"))
            .unwrap();
        let cursor = terminal.get_cursor().unwrap();
        (format!("{:?}", terminal.backend().buffer()), cursor)
    }

    #[test]
    fn test_long_reply_tail_is_on_screen() {
        let mut chat = ChatState::new();
        for c in "Explain BST deletion".chars() {
            chat.handle_input(c);
        }
        assert!(chat.submit().is_some());

        let mut reply = String::from("**Deletion in a Binary Search Tree**\n");
        for i in 1..=6 {
            reply.push_str(&format!(
                "Step {}: compare the key with the current node and walk left or right until it is found\n",
                i
            ));
        }
        reply.push_str("Case 3: node with two children");
        chat.receive_reply(reply);

        let (screen, _) = draw_assistant(&chat, 50, 30);
        assert!(screen.contains("two children"));
        assert!(screen.contains("Exam Tips"));
    }

    #[test]
    fn test_huge_input_keeps_cursor_in_box() {
        let mut chat = ChatState::new();
        for _ in 0..65535 {
            chat.handle_input('x');
        }

        let (_, (x, y)) = draw_assistant(&chat, 40, 12);
        assert!(x < 40);
        assert!(y < 12);
    }
}
