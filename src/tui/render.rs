use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::{App, ListFocus};
use super::form::LoginField;
use super::theme::Theme;
use crate::api::{or_na, value_or_na, Horse};
use crate::notify::Severity;
use crate::router::Route;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let theme = app.theme.theme();

    // Paint the background in the active palette
    let background = Block::default().style(
        Style::default()
            .bg(theme.background)
            .fg(theme.foreground),
    );
    frame.render_widget(background, frame.area());

    match app.route {
        Route::Login => render_login(frame, app, &theme),
        Route::Horses => render_horses(frame, app, &theme),
        Route::HorseDetails(_) => render_detail(frame, app, &theme),
        // The guard never lets the other routes render
        _ => {}
    }

    render_notices(frame, app, &theme);
}

/// Render the notification stack as an overlay in the top-right corner
fn render_notices(frame: &mut Frame, app: &App, theme: &Theme) {
    let notices = app.notices.snapshot();
    if notices.is_empty() {
        return;
    }

    let width = 44.min(frame.area().width);
    let height = (notices.len() as u16 + 2).min(frame.area().height);
    let area = Rect {
        x: frame.area().width.saturating_sub(width),
        y: 0,
        width,
        height,
    };

    let lines: Vec<Line> = notices
        .iter()
        .map(|notice| {
            let color = match notice.severity {
                Severity::Success => theme.success,
                Severity::Error => theme.error,
                Severity::Info => theme.info,
            };
            Line::from(Span::styled(notice.message.clone(), Style::default().fg(color)))
        })
        .collect();

    let paused = app.notices.with(|center| center.is_paused());
    let title = if paused { " Notifications (paused) " } else { " Notifications " };

    frame.render_widget(Clear, area);
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(if paused {
                    theme.border_focused
                } else {
                    theme.border
                })),
        );
    frame.render_widget(panel, area);
}

/// Render the login screen
fn render_login(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = centered_rect(50, 18, frame.area());

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Horses Management ")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(theme.header));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // Email
                Constraint::Length(1), // Email error
                Constraint::Length(3), // Password
                Constraint::Length(1), // Password error
                Constraint::Length(1), // Hints
                Constraint::Length(1), // Spinner
            ]
            .as_ref() as &[Constraint],
        )
        .split(inner);

    render_field(
        frame,
        chunks[0],
        "Email",
        &app.login.email,
        app.login.focus == LoginField::Email,
        theme,
    );
    render_error_line(frame, chunks[1], app.login.email_error.as_deref(), theme);

    let password_label = if app.login.show_password {
        "Password (visible)"
    } else {
        "Password"
    };
    render_field(
        frame,
        chunks[2],
        password_label,
        &app.login.password,
        app.login.focus == LoginField::Password,
        theme,
    );
    render_error_line(frame, chunks[3], app.login.password_error.as_deref(), theme);

    let hints = Paragraph::new("Tab: switch field | Ctrl+P: show/hide password | Enter: login")
        .style(Style::default().fg(theme.text_secondary))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[4]);

    if app.login.submitting {
        let spinner = Paragraph::new("Logging in...")
            .style(Style::default().fg(theme.info))
            .alignment(Alignment::Center);
        frame.render_widget(spinner, chunks[5]);
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    field: &tui_textarea::TextArea,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", label))
        .border_style(Style::default().fg(if focused {
            theme.border_focused
        } else {
            theme.border
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(field, inner);
}

fn render_error_line(frame: &mut Frame, area: Rect, error: Option<&str>, theme: &Theme) {
    if let Some(message) = error {
        let line = Paragraph::new(message).style(Style::default().fg(theme.error));
        frame.render_widget(line, area);
    }
}

/// Render the catalog page
fn render_horses(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search & filter bar
                Constraint::Min(5),    // Table
                Constraint::Length(1), // Pagination
                Constraint::Length(1), // Status bar
            ]
            .as_ref() as &[Constraint],
        )
        .split(frame.area());

    render_header(frame, chunks[0], app, theme);

    let filter_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref() as &[Constraint])
        .split(chunks[1]);

    render_field(
        frame,
        filter_chunks[0],
        "Search by horse name",
        &app.list.search,
        app.list.focus == ListFocus::Search,
        theme,
    );
    render_field(
        frame,
        filter_chunks[1],
        "Filter by breed",
        &app.list.breed,
        app.list.focus == ListFocus::Breed,
        theme,
    );

    if app.list.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(theme.info))
            .alignment(Alignment::Center);
        frame.render_widget(loading, chunks[2]);
    } else {
        render_horse_table(frame, chunks[2], app, theme);
    }

    // Pagination indicator, only when there is more than one page
    let page_count = app.list.page_count();
    if page_count > 1 {
        let pager = Paragraph::new(format!(
            "<- prev | Page {}/{} | next ->",
            app.list.page, page_count
        ))
        .style(Style::default().fg(theme.text_secondary))
        .alignment(Alignment::Center);
        frame.render_widget(pager, chunks[3]);
    }

    render_status_bar(
        frame,
        chunks[4],
        "Tab: focus | Up/Down: select | Enter: details | Left/Right: page | q: quit",
        theme,
    );
}

fn render_horse_table(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let today = chrono::Local::now().date_naive();
    let rows: Vec<Row> = app
        .list
        .page_rows()
        .iter()
        .enumerate()
        .map(|(i, horse)| {
            let age = horse.age(today).unwrap_or_else(|| "N/A".to_string());
            let style = if i == app.list.selected && app.list.focus == ListFocus::Table {
                Style::default()
                    .fg(theme.text_highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_primary)
            };
            Row::new(vec![
                Cell::from(horse.name.clone()),
                Cell::from(age),
                Cell::from(horse.breed.clone().unwrap_or_else(|| "N/A".to_string())),
            ])
            .style(style)
        })
        .collect();

    let empty = rows.is_empty();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ],
    )
    .header(
        Row::new(vec!["Name", "Age", "Breed"])
            .style(Style::default().fg(theme.header).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Horses ")
            .border_style(Style::default().fg(if app.list.focus == ListFocus::Table {
                theme.border_focused
            } else {
                theme.border
            })),
    );
    frame.render_widget(table, area);

    if empty {
        let message = Paragraph::new("No horses match the current filters")
            .style(Style::default().fg(theme.text_secondary))
            .alignment(Alignment::Center);
        let mut inner = area;
        inner.y += area.height / 2;
        inner.height = 1;
        frame.render_widget(message, inner);
    }
}

/// Render the detail page
fn render_detail(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Record
                Constraint::Length(1), // Status bar
            ]
            .as_ref() as &[Constraint],
        )
        .split(frame.area());

    render_header(frame, chunks[0], app, theme);

    if app.detail.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(theme.info))
            .alignment(Alignment::Center);
        frame.render_widget(loading, chunks[1]);
    } else if let Some(horse) = &app.detail.horse {
        let record = Paragraph::new(horse_lines(horse, theme))
            .wrap(Wrap { trim: false })
            .scroll((app.detail.scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", horse.name))
                    .border_style(Style::default().fg(theme.border)),
            );
        frame.render_widget(record, chunks[1]);
    } else {
        let message = Paragraph::new("Failed to fetch horse details")
            .style(Style::default().fg(theme.error))
            .alignment(Alignment::Center);
        frame.render_widget(message, chunks[1]);
    }

    render_status_bar(
        frame,
        chunks[2],
        "Up/Down: scroll | Esc: back to list | q: quit",
        theme,
    );
}

fn horse_lines<'a>(horse: &'a Horse, theme: &Theme) -> Vec<Line<'a>> {
    let heading = Style::default().fg(theme.header).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(theme.text_secondary);
    let mut lines = Vec::new();

    let mut kv = |lines: &mut Vec<Line<'a>>, key: &'a str, value: String| {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", key), label),
            Span::raw(value),
        ]));
    };

    lines.push(Line::from(Span::styled("Basic Info", heading)));
    kv(&mut lines, "Horse Number", or_na(horse.horse_number.as_deref()).to_string());
    kv(
        &mut lines,
        "Gender",
        or_na(horse.gender.as_ref().and_then(|g| g.name_en.as_deref())).to_string(),
    );
    kv(&mut lines, "Breed", or_na(horse.breed.as_deref()).to_string());
    kv(&mut lines, "Country Origin", or_na(horse.country_origin.as_deref()).to_string());
    kv(&mut lines, "Date Of Birth", or_na(horse.date_of_birth.as_deref()).to_string());
    kv(
        &mut lines,
        "Paternity Certificate",
        or_na(horse.paternity_certificate.as_deref()).to_string(),
    );

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Family Details", heading)));
    kv(&mut lines, "Father", or_na(horse.father_name.as_deref()).to_string());
    kv(&mut lines, "Mother", or_na(horse.mother_name.as_deref()).to_string());

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("User", heading)));
    match &horse.user {
        Some(user) => {
            kv(
                &mut lines,
                "Name",
                format!(
                    "{} {}",
                    or_na(user.first_name.as_deref()),
                    or_na(user.last_name.as_deref())
                ),
            );
            kv(&mut lines, "Email", or_na(user.email.as_deref()).to_string());
            kv(&mut lines, "Phone", or_na(user.phone.as_deref()).to_string());
        }
        None => kv(&mut lines, "Name", "N/A".to_string()),
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Services", heading)));
    if horse.services.is_empty() {
        lines.push(Line::from("No services"));
    } else {
        for service in &horse.services {
            kv(&mut lines, "Name", or_na(service.name.as_deref()).to_string());
            kv(&mut lines, "Price", value_or_na(service.price.as_ref()));
            kv(
                &mut lines,
                "Payment",
                or_na(service.payment.as_ref().and_then(|p| p.status.as_deref())).to_string(),
            );
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Return Policy", heading)));
    kv(
        &mut lines,
        "Training",
        if horse.training_horse { "Yes" } else { "No" }.to_string(),
    );
    kv(
        &mut lines,
        "Place",
        format!(
            "{} - {}",
            or_na(horse.place.as_ref().and_then(|p| p.number.as_deref())),
            or_na(
                horse
                    .place
                    .as_ref()
                    .and_then(|p| p.category.as_ref())
                    .and_then(|c| c.name.as_deref())
            )
        ),
    );
    kv(
        &mut lines,
        "Injuries Count",
        if horse.injuries.is_empty() {
            "None".to_string()
        } else {
            horse.injuries.len().to_string()
        },
    );

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Injuries", heading)));
    if horse.injuries.is_empty() {
        lines.push(Line::from("No injuries"));
    } else {
        for injury in &horse.injuries {
            lines.push(Line::from(format!("- {}", injury)));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Packages", heading)));
    if horse.packages.is_empty() {
        lines.push(Line::from("No packages"));
    } else {
        for package in &horse.packages {
            kv(
                &mut lines,
                "Category",
                or_na(
                    package
                        .service_category
                        .as_ref()
                        .and_then(|c| c.name_en.as_deref()),
                )
                .to_string(),
            );
            kv(&mut lines, "Period", or_na(package.period.as_deref()).to_string());
            kv(&mut lines, "Price", value_or_na(package.price.as_ref()));
            kv(
                &mut lines,
                "Payment",
                or_na(package.payment.as_ref().and_then(|p| p.status.as_deref())).to_string(),
            );
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Registers", heading)));
    if horse.registers.is_empty() {
        lines.push(Line::from("No registers"));
    } else {
        for register in &horse.registers {
            lines.push(Line::from(format!("- {}", register)));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("More Info", heading)));
    kv(&mut lines, "Other Registers", or_na(horse.other_registers.as_deref()).to_string());
    kv(&mut lines, "Other Injuries", or_na(horse.other_injuries.as_deref()).to_string());
    kv(
        &mut lines,
        "Production Place",
        or_na(horse.production_place.as_deref()).to_string(),
    );
    kv(
        &mut lines,
        "Is Out",
        if horse.is_out { "Yes" } else { "No" }.to_string(),
    );
    kv(&mut lines, "Out Reason", or_na(horse.out_reason.as_deref()).to_string());
    kv(&mut lines, "Out Time", or_na(horse.out_time.as_deref()).to_string());
    kv(&mut lines, "Created At", or_na(horse.created_at.as_deref()).to_string());

    lines
}

/// Render the shared header shown on the list and detail pages
fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mode = if app.theme.is_dark_mode() {
        "Light Mode: Ctrl+T"
    } else {
        "Dark Mode: Ctrl+T"
    };
    let header_text = vec![Line::from(vec![
        Span::styled(
            "Horse Management",
            Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(mode, Style::default().fg(theme.text_secondary)),
        Span::raw(" | "),
        Span::styled("Log Out: Ctrl+L", Style::default().fg(theme.text_secondary)),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, hint: &str, theme: &Theme) {
    let bar = Paragraph::new(hint).style(Style::default().fg(theme.text_secondary));
    frame.render_widget(bar, area);
}

/// Center a fixed-size rect inside the given area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
