use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::{AppState, FocusedView, TableView};

const HELP: &[(&str, &str)] = &[
    ("j/k, Up/Down", "move selection"),
    ("g/G", "first/last row"),
    ("Enter", "open the selected kind"),
    ("Tab", "switch between kinds and resource"),
    ("/", "search, Enter commits, Esc cancels"),
    ("r, F5", "refresh"),
    ("?", "this help, Esc closes"),
    ("q", "quit"),
];

pub fn draw(frame: &mut Frame, state: &AppState, view: &mut TableView, status: Option<&str>) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, state, view);
    draw_table(frame, body, view);
    draw_footer(frame, footer, state, status);

    if state.show_menu() {
        draw_help(frame, body);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, state: &AppState, view: &TableView) {
    let mut spans = vec![
        Span::styled(" kubetable ", Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(format!(" {} ", state.current_page())),
    ];

    if !view.query().is_empty() {
        spans.push(Span::styled(
            format!(" filter: {} ", view.query()),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Line::from(spans), area);
}

fn draw_table(frame: &mut Frame, area: Rect, view: &mut TableView) {
    let widths: Vec<Constraint> = view
        .column_widths()
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let table = view.table();

    let header = Row::new(
        table
            .columns()
            .iter()
            .map(|column| Cell::from(column.name.clone())),
    )
    .style(Style::default().fg(Color::DarkGray));

    let rows: Vec<Row> = table
        .rows()
        .iter()
        .map(|row| Row::new(row.cells.iter().map(|cell| Cell::from(cell.clone()))))
        .collect();

    let title = format!(" {} [{}] ", view.title(), table.len());

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(3)
        .block(Block::bordered().title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(widget, area, view.state_mut());
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState, status: Option<&str>) {
    let line = match (state.focused_view(), status) {
        (FocusedView::Search, _) => Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Cyan)),
            Span::raw(state.search_text()),
        ]),
        (FocusedView::Content, Some(status)) => {
            Line::styled(status, Style::default().fg(Color::Red))
        }
        (FocusedView::Content, None) => {
            Line::styled("? help  / search  r refresh  q quit", Style::default().fg(Color::DarkGray))
        }
    };

    frame.render_widget(line, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let [area] = Layout::horizontal([Constraint::Length(56)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(HELP.len() as u16 + 2)])
        .flex(Flex::Center)
        .areas(area);

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:>14}", key), Style::default().fg(Color::Cyan)),
                Span::raw(format!("  {}", desc)),
            ])
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Help ")),
        area,
    );
}
