//! Responsive widget grid.
//!
//! Cells fill rows left to right in visible order. Every row is as tall as
//! its tallest cell; when the rows do not fit, leading rows scroll out so
//! the focused row stays on screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::registry::WidgetId;

/// Minimum cell width; the column count is the terminal width divided by it.
pub const CELL_WIDTH: u16 = 36;

/// Border rows plus one body row.
const MIN_CELL_HEIGHT: u16 = 3;

/// Shown when every widget is hidden.
pub const EMPTY_TEXT: &str = "No widgets visible. Press s to choose widgets.";

/// Number of grid columns for an area `width` columns wide.
pub fn columns(width: u16) -> usize {
    usize::from(width / CELL_WIDTH).max(1)
}

/// What the grid needs to know about one cell besides its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Widget in this cell.
    pub id: WidgetId,
    /// Title shown in the top border.
    pub title: String,
    /// Widget key hint, shown in the title while selected.
    pub hint: Option<&'static str>,
    /// Whether a refresh is running.
    pub refreshing: bool,
}

/// Selection and drag markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    /// The focused cell.
    pub selected: Option<WidgetId>,
    /// The picked-up cell.
    pub dragged: Option<WidgetId>,
    /// Where the picked-up cell would land.
    pub target: Option<WidgetId>,
}

impl Highlight {
    /// The cell that must stay in view: the drop target while dragging,
    /// the selection otherwise.
    fn focus(&self) -> Option<WidgetId> {
        self.target.or(self.selected)
    }
}

/// Rows a body takes once wrapped to `width`.
pub fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    if width == 0 {
        return lines.len() as u16;
    }
    let width = usize::from(width);
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Renders `cells` into `area`, asking `body` for each cell's lines at its
/// inner width. Returns the screen rectangle of every cell drawn, for
/// mouse hit-testing.
pub fn render_grid<F>(
    frame: &mut Frame,
    area: Rect,
    cells: &[GridCell],
    highlight: &Highlight,
    mut body: F,
) -> Vec<(WidgetId, Rect)>
where
    F: FnMut(WidgetId, u16) -> Vec<Line<'static>>,
{
    if cells.is_empty() {
        let empty = Paragraph::new(Line::styled(EMPTY_TEXT, Style::default().fg(Color::DarkGray)));
        frame.render_widget(empty, area);
        return Vec::new();
    }

    let columns = columns(area.width);
    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .split(area);

    // Lay out bodies first so every row knows its height.
    let rows: Vec<(u16, Vec<(&GridCell, Vec<Line<'static>>)>)> = cells
        .chunks(columns)
        .map(|row| {
            let bodies: Vec<_> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let inner = column_areas[i].width.saturating_sub(2);
                    (cell, body(cell.id, inner))
                })
                .collect();
            let height = bodies
                .iter()
                .enumerate()
                .map(|(i, (_, lines))| {
                    wrapped_height(lines, column_areas[i].width.saturating_sub(2)) + 2
                })
                .max()
                .unwrap_or(MIN_CELL_HEIGHT)
                .clamp(MIN_CELL_HEIGHT, area.height.max(MIN_CELL_HEIGHT));
            (height, bodies)
        })
        .collect();

    let focus_row = highlight
        .focus()
        .and_then(|id| cells.iter().position(|c| c.id == id))
        .map_or(0, |index| index / columns);
    let heights: Vec<u16> = rows.iter().map(|(h, _)| *h).collect();
    let first_row = first_visible_row(&heights, focus_row, area.height);

    let mut drawn = Vec::with_capacity(cells.len());
    let mut y = area.y;
    for (row_height, bodies) in rows.into_iter().skip(first_row) {
        let remaining = area.bottom().saturating_sub(y);
        if remaining < MIN_CELL_HEIGHT {
            break;
        }
        let height = row_height.min(remaining);
        for (i, (cell, lines)) in bodies.into_iter().enumerate() {
            let rect = Rect::new(column_areas[i].x, y, column_areas[i].width, height);
            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(cell_block(cell, highlight));
            frame.render_widget(paragraph, rect);
            drawn.push((cell.id, rect));
        }
        y += height;
    }
    drawn
}

/// First row to draw so that `focus_row` ends inside `available` rows.
fn first_visible_row(heights: &[u16], focus_row: usize, available: u16) -> usize {
    let focus_row = focus_row.min(heights.len().saturating_sub(1));
    let mut first = 0;
    while first < focus_row {
        let used: u32 = heights[first..=focus_row].iter().map(|h| u32::from(*h)).sum();
        if used <= u32::from(available) {
            break;
        }
        first += 1;
    }
    first
}

fn cell_block(cell: &GridCell, highlight: &Highlight) -> Block<'static> {
    let is_dragged = highlight.dragged == Some(cell.id);
    let is_target = !is_dragged && highlight.dragged.is_some() && highlight.target == Some(cell.id);
    let is_selected = highlight.selected == Some(cell.id);

    let mut title = if is_dragged {
        format!(" ↕ {} ", cell.title)
    } else {
        format!(" {} ", cell.title)
    };
    if cell.refreshing {
        title.push_str("⟳ ");
    }
    if is_selected && highlight.dragged.is_none() {
        if let Some(hint) = cell.hint {
            title.push_str(&format!("· {hint} "));
        }
    }

    let (border_style, border_type) = if is_dragged {
        (Style::default().fg(Color::Yellow), BorderType::Thick)
    } else if is_target {
        (Style::default().fg(Color::Green), BorderType::Double)
    } else if is_selected {
        (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            BorderType::Plain,
        )
    } else {
        (Style::default().fg(Color::DarkGray), BorderType::Plain)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
}
