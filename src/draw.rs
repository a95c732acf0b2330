use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::components::form::FormView;
use crate::components::records;
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 7] = &[
    "League",
    "Teams",
    "Players",
    "Matches",
    "Injuries",
    "Narratives",
    "Prompt",
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            if app.state.show_intro {
                draw_intro(f, f.area());
                return;
            }

            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::League => draw_league(f, layout.main, app),
                MenuItem::Teams => draw_teams(f, layout.main, app),
                MenuItem::Players => draw_players(f, layout.main, app),
                MenuItem::Matches => draw_matches(f, layout.main, app),
                MenuItem::Injuries => draw_injuries(f, layout.main, app),
                MenuItem::Narratives => draw_narratives(f, layout.main, app),
                MenuItem::Prompt => draw_prompt(f, layout.main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    layout.main,
                    "Help: q=quit  1-7=tabs  j/k=move  a=add  e/Enter=edit  d=delete\n\
                     Prompt tab: e=report settings  g=generate  w=write to file\n\
                     Forms: Enter=next/save  ^S=save  Esc=cancel",
                ),
            }

            if app.state.show_logs {
                draw_logs(f, layout.main);
            }

            if let Some(form) = app.state.form.as_ref() {
                let height = (form.fields.len() as u16) + 4;
                let overlay = centered_rect(layout.main, 64, height);
                f.render_widget(FormView { session: form }, overlay);
            }

            draw_status_bar(f, layout.status_bar, app);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_intro(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Blood Bowl ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top_pad, banner_area, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let banner = "BLOOD BOWL\nLEAGUE PROMPT GENERATOR\n\nRecord your league. Generate the headlines.";
    f.render_widget(
        Paragraph::new(banner)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        banner_area,
    );
    f.render_widget(
        Paragraph::new("Press Enter to open the league")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::League => 0,
        MenuItem::Teams => 1,
        MenuItem::Players => 2,
        MenuItem::Matches => 3,
        MenuItem::Injuries => 4,
        MenuItem::Narratives => 5,
        MenuItem::Prompt => 6,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_league(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" League ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let info = &app.league.info;
    let name = if info.name.is_empty() {
        "(unnamed league — press e to edit)"
    } else {
        info.name.as_str()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::DarkGray)),
            Span::styled(name, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Description: ", Style::default().fg(Color::DarkGray)),
            Span::raw(info.description.as_str()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} teams  |  {} players  |  {} matches  |  {} injuries  |  {} narratives",
                app.league.teams.len(),
                app.league.players.len(),
                app.league.matches.len(),
                app.league.injuries.len(),
                app.league.narratives.len()
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Data dir: {}", app.settings.data_dir.display()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Keys: e=edit league info  2-6=record tabs  7=prompt",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if app.league.teams.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Start by adding teams on tab 2.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let rows: Vec<String> = app
        .league
        .teams
        .iter()
        .map(|t| records::team_row(t, width))
        .collect();
    draw_collection(f, area, " Teams ", rows, &app.state.teams);
}

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let rows: Vec<String> = app
        .league
        .players
        .iter()
        .map(|p| records::player_row(p, width))
        .collect();
    draw_collection(f, area, " Players ", rows, &app.state.players);
}

fn draw_matches(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let rows: Vec<String> = app
        .league
        .matches
        .iter()
        .map(|m| records::match_row(m, width))
        .collect();
    draw_collection(f, area, " Matches ", rows, &app.state.matches);
}

fn draw_injuries(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let rows: Vec<String> = app
        .league
        .injuries
        .iter()
        .map(|i| records::injury_row(i, width))
        .collect();
    draw_collection(f, area, " Injuries ", rows, &app.state.injuries);
}

fn draw_narratives(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let rows: Vec<String> = app
        .league
        .narratives
        .iter()
        .map(|n| records::narrative_row(n, width))
        .collect();
    draw_collection(f, area, " Narratives ", rows, &app.state.narratives);
}

fn draw_collection(
    f: &mut Frame,
    area: Rect,
    title: &str,
    rows: Vec<String>,
    view: &crate::state::app_state::CollectionView,
) {
    let block = default_border(Color::White).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Keys: j/k=move  a=add  e/Enter=edit  d=delete  ?=help")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );

    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("No records yet. Press a to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    // Window the rows so the selection is always on screen.
    let visible = content.height as usize;
    let start = if view.selected >= visible {
        view.selected + 1 - visible
    } else {
        0
    };

    let mut lines = Vec::with_capacity(rows.len().min(visible));
    for (idx, row) in rows.iter().enumerate().skip(start).take(visible.max(1)) {
        let marker = if idx == view.selected { '>' } else { ' ' };
        let style = if idx == view.selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(format!("{marker} {row}"), style)));
    }
    f.render_widget(Paragraph::new(lines), content);
}

fn draw_prompt(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Prompt ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [settings_area, output_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Fill(1)]).areas(inner);

    let inputs = &app.state.prompt.inputs;
    let field = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
            Span::raw(if value.is_empty() { "—" } else { value }.to_string()),
        ])
    };
    let settings = vec![
        Line::from(Span::styled(
            "Keys: e=report settings  g=generate  w=write file  j/k=scroll",
            Style::default().fg(Color::DarkGray),
        )),
        field("Type of Report", &inputs.report_type),
        field("Reporter", &inputs.reporter_name),
        field("Tone and Style", &inputs.tone_style),
        field("Format and Length", &inputs.format_length),
        field("Additional Details", &inputs.additional_details),
    ];
    f.render_widget(Paragraph::new(settings), settings_area);

    let output_block = default_border(Color::DarkGray).title(" Generated Prompt ");
    let output_inner = output_block.inner(output_area);
    f.render_widget(output_block, output_area);

    if app.state.prompt.text.is_empty() {
        f.render_widget(
            Paragraph::new("Press g to generate the prompt from the current league data.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            output_inner,
        );
        return;
    }

    let visible = output_inner.height as usize;
    let offset = app.state.prompt.scroll as usize;
    let window: Vec<Line> = app
        .state
        .prompt
        .text
        .lines()
        .skip(offset)
        .take(visible.max(1))
        .map(|l| Line::from(l.to_string()))
        .collect();
    f.render_widget(Paragraph::new(window), output_inner);
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if let Some(err) = app.state.last_error.as_deref() {
        (err.to_string(), Style::default().fg(Color::Red))
    } else if let Some(status) = app.state.status.as_deref() {
        (status.to_string(), Style::default().fg(Color::Gray))
    } else {
        (String::new(), Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let [_, logs_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(area);
    let widget = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, logs_area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
