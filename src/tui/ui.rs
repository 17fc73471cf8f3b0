//! Terminal setup, the main loop, and drawing.

use super::app::{PX_PER_COLUMN, ViewApp};
use super::events::{Event, EventHandler, apply_theme, handle_key_event, handle_mouse_event};
use super::theme::{FOOTER_HINTS, colors, hint_spans, link_color, node_color};
use crate::panel::{PANEL_TITLE, PLACEHOLDER_HINT, PLACEHOLDER_TITLE};
use crate::render::{INTERACTION_HINT, NodeKind, Scene, ZoomTransform};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        Block, Borders, Clear, Paragraph, Wrap,
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
    },
};
use std::io::{self, stdout};
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 14;
const DETAILS_WIDTH: u16 = 34;
/// Segments used to approximate one link curve.
const LINK_SEGMENTS: usize = 12;
/// Horizontal label offset from the node centre, in canvas pixels.
const LABEL_OFFSET: f64 = 13.0;

/// Run the viewer until the user quits.
pub fn run_view_tui(app: &mut ViewApp) -> io::Result<()> {
    apply_theme(app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    if app.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::default();
    let result = (|| -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, app))?;

            match events.next()? {
                Event::Key(key) => handle_key_event(app, key),
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                Event::Resize(_, _) | Event::Tick => {}
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main render function.
fn render(frame: &mut Frame, app: &mut ViewApp) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_size_warning(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(DETAILS_WIDTH)])
        .split(chunks[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors().canvas_border))
        .title(Span::styled(
            " Crafting tree ",
            Style::default().fg(colors().title).bold(),
        ));
    let inner = block.inner(body[0]);
    app.resize_canvas(inner);
    render_canvas(frame, body[0], block, app);
    render_details(frame, body[1], app);

    render_status_bar(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let sep = Span::styled(" │ ", Style::default().fg(colors().separator));
    let mut spans = vec![
        Span::styled(
            format!(" {PANEL_TITLE}"),
            Style::default().fg(colors().title).bold(),
        ),
        sep.clone(),
        Span::styled(
            app.document.target_element.clone(),
            Style::default().fg(colors().text).bold(),
        ),
        sep.clone(),
        Span::styled(
            app.document.algorithm.clone(),
            Style::default().fg(colors().hint),
        ),
    ];
    if let Some(label) = app.panel.selector_label() {
        spans.push(sep);
        spans.push(Span::styled(label, Style::default().fg(colors().highlight)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_canvas(frame: &mut Frame, area: Rect, block: Block<'_>, app: &ViewApp) {
    if app.panel.shows_placeholder() {
        let text = vec![
            Line::from(""),
            Line::styled(PLACEHOLDER_TITLE, Style::default().fg(colors().text).bold()),
            Line::from(""),
            Line::styled(PLACEHOLDER_HINT, Style::default().fg(colors().hint)),
        ];
        let placeholder = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
        return;
    }

    let Some(scene) = app.scene() else {
        frame.render_widget(block, area);
        return;
    };

    let (width, height) = app.canvas_size();
    let zoom = app.zoom;
    let palette = app.panel.renderer().palette();
    let node_radius = app.panel.renderer().config().node_radius;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            paint_links(ctx, scene, zoom, height, link_color(palette));
            ctx.layer();
            for node in &scene.nodes {
                let (x, y) = to_canvas(scene, zoom, height, (node.x, node.y));
                let color = node_color(node.kind, palette);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: (node_radius * zoom.k).max(1.0),
                    color,
                });
                paint_label(ctx, node.name.as_str(), node.has_children, x, y, zoom.k);
            }
            for caption in &scene.captions {
                let color = if caption.text == INTERACTION_HINT {
                    colors().hint
                } else {
                    colors().error
                };
                ctx.print(
                    caption.x,
                    height - caption.y,
                    Span::styled(caption.text.clone(), Style::default().fg(color)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

/// Scene coordinates to canvas coordinates: margin, zoom, then a y flip
/// because the canvas origin is bottom-left.
fn to_canvas(scene: &Scene, zoom: ZoomTransform, height: f64, (x, y): (f64, f64)) -> (f64, f64) {
    let (sx, sy) = zoom.apply((x + scene.margins.left, y + scene.margins.top));
    (sx, height - sy)
}

/// Draw each link as a sampled cubic with vertical tangents at both ends.
fn paint_links(ctx: &mut Context<'_>, scene: &Scene, zoom: ZoomTransform, height: f64, color: Color) {
    for link in &scene.links {
        let (x0, y0) = link.source;
        let (x1, y1) = link.target;
        let ym = (y0 + y1) / 2.0;
        let mut prev = to_canvas(scene, zoom, height, (x0, y0));
        for step in 1..=LINK_SEGMENTS {
            let t = step as f64 / LINK_SEGMENTS as f64;
            let point = cubic((x0, y0), (x0, ym), (x1, ym), (x1, y1), t);
            let next = to_canvas(scene, zoom, height, point);
            ctx.draw(&CanvasLine {
                x1: prev.0,
                y1: prev.1,
                x2: next.0,
                y2: next.1,
                color,
            });
            prev = next;
        }
    }
}

fn cubic(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

/// Labels sit left of nodes with children and right of leaves.
fn paint_label(ctx: &mut Context<'_>, name: &str, has_children: bool, x: f64, y: f64, k: f64) {
    let offset = LABEL_OFFSET * k;
    let label_x = if has_children {
        x - offset - name.width() as f64 * PX_PER_COLUMN
    } else {
        x + offset
    };
    ctx.print(
        label_x,
        y,
        Span::styled(name.to_string(), Style::default().fg(colors().text)),
    );
}

fn render_details(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors().border))
        .title(Span::styled(
            " Details ",
            Style::default().fg(colors().title).bold(),
        ));

    let mut lines = Vec::new();
    match app.panel.details() {
        Some(details) => {
            for (label, value) in details.rows() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label:<14}"), Style::default().fg(colors().hint)),
                    Span::styled(value, Style::default().fg(colors().text)),
                ]));
            }
        }
        None if app.panel.shows_placeholder() => {
            lines.push(Line::styled(
                "No trees loaded",
                Style::default().fg(colors().hint),
            ));
        }
        None => {
            lines.push(Line::styled(
                format!(
                    "Tree {} is out of range ({} available)",
                    app.current_index() + 1,
                    app.tree_count()
                ),
                Style::default().fg(colors().warning),
            ));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Legend",
        Style::default().fg(colors().title).bold(),
    ));
    let palette = app.panel.renderer().palette();
    for kind in NodeKind::ALL {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(node_color(kind, palette))),
            Span::styled(kind.label(), Style::default().fg(colors().text)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let sep = Span::styled(" │ ", Style::default().fg(colors().separator));
    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(colors().hint)),
        Span::styled(
            format!("{:.2}×", app.zoom.k),
            Style::default().fg(colors().title).bold(),
        ),
    ];
    if let Some(scene) = app.scene() {
        spans.push(sep.clone());
        spans.push(Span::styled("Nodes: ", Style::default().fg(colors().hint)));
        spans.push(Span::styled(
            scene.node_count().to_string(),
            Style::default().fg(colors().title),
        ));
        if scene.collapsed_count > 0 {
            spans.push(sep);
            spans.push(Span::styled(
                "Collapsed: ",
                Style::default().fg(colors().hint),
            ));
            spans.push(Span::styled(
                scene.collapsed_count.to_string(),
                Style::default().fg(colors().warning),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &ViewApp) {
    // Show status message if set, otherwise show hints
    if let Some(ref msg) = app.status_message {
        let status_line = Line::from(vec![
            Span::styled("ℹ ", Style::default().fg(colors().highlight)),
            Span::styled(msg.as_str(), Style::default().fg(colors().highlight).bold()),
        ]);
        let footer = Paragraph::new(status_line).alignment(Alignment::Center);
        frame.render_widget(footer, area);
        return;
    }

    let footer = Paragraph::new(Line::from(hint_spans(&FOOTER_HINTS)))
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors().hint));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<16}"), Style::default().fg(colors().highlight)),
            Span::styled(desc, Style::default().fg(colors().text)),
        ])
    };

    let help_text = vec![
        Line::styled(
            "━━━ Recipe Viewer Help ━━━",
            Style::default().fg(colors().highlight).bold(),
        ),
        Line::from(""),
        Line::styled("View", Style::default().fg(colors().title).bold()),
        key("←↑↓→ or hjkl", "Pan"),
        key("+ / -", "Zoom in / out"),
        key("0", "Reset zoom"),
        key("Mouse wheel", "Zoom at pointer"),
        key("Mouse drag", "Pan"),
        Line::from(""),
        Line::styled("Trees", Style::default().fg(colors().title).bold()),
        key("n or ]", "Next recipe"),
        key("p or [", "Previous recipe"),
        Line::from(""),
        Line::styled("Other", Style::default().fg(colors().title).bold()),
        key("e", "Export current view as SVG"),
        key("T", "Toggle theme"),
        key("?", "Toggle this help"),
        key("q / Esc", "Quit"),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors().canvas_border))
            .title(" Help "),
    );
    frame.render_widget(help, popup_area);
}

fn render_size_warning(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::styled(
            "Terminal too small",
            Style::default().fg(colors().error).bold(),
        ),
        Line::from(format!(
            "Need at least {MIN_WIDTH}×{MIN_HEIGHT}, have {}×{}",
            area.width, area.height
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        area,
    );
}

/// Create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::model::{RecipeDocument, RecipeTree};
    use ratatui::backend::TestBackend;

    fn draw(app: &mut ViewApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_cubic_endpoints() {
        let p = cubic((0.0, 0.0), (0.0, 5.0), (10.0, 5.0), (10.0, 10.0), 0.0);
        assert_eq!(p, (0.0, 0.0));
        let q = cubic((0.0, 0.0), (0.0, 5.0), (10.0, 5.0), (10.0, 10.0), 1.0);
        assert_eq!(q, (10.0, 10.0));
    }

    #[test]
    fn test_render_shows_header_and_details() {
        let tree = RecipeTree::new("Mud")
            .with_ingredients([RecipeTree::base("Water"), RecipeTree::base("Earth")]);
        let mut app = ViewApp::new(
            RecipeDocument::new("Mud", "bfs", vec![tree, RecipeTree::new("Mud")]),
            0,
            &AppConfig::default(),
        );
        let screen = draw(&mut app, 120, 30);
        assert!(screen.contains("Recipe Visualization"));
        assert!(screen.contains("Recipe 1 of 2"));
        assert!(screen.contains("Details"));
        assert!(screen.contains("Legend"));
        // Canvas width follows the terminal.
        let canvas_cols = 120 - DETAILS_WIDTH - 2;
        assert_eq!(app.canvas_size().0, f64::from(canvas_cols) * PX_PER_COLUMN);
    }

    #[test]
    fn test_render_placeholder() {
        let mut app = ViewApp::new(
            RecipeDocument::new("", "bfs", Vec::new()),
            0,
            &AppConfig::default(),
        );
        let screen = draw(&mut app, 120, 30);
        assert!(screen.contains("No recipe data to display"));
    }

    #[test]
    fn test_small_terminal_warning() {
        let mut app = ViewApp::new(
            RecipeDocument::new("Mud", "bfs", vec![RecipeTree::new("Mud")]),
            0,
            &AppConfig::default(),
        );
        let screen = draw(&mut app, 40, 10);
        assert!(screen.contains("Terminal too small"));
    }
}
