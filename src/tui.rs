//! Ratatui backend that draws a carousel node tree and reports clickable regions.
//!
//! Layout is deliberately small: a container stacks its non-button children
//! top to bottom and lines its buttons up in one centered row underneath. A
//! `figure` becomes a rounded block holding the image placeholder and the
//! caption line.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::attrs::AttrValue;
use crate::carousel::ACTION_ATTR;
use crate::node::{ClickHandler, Element, Node};

const BORDER_COLOR: Color = Color::Rgb(255, 90, 90);
const TITLE_COLOR: Color = Color::Rgb(255, 110, 110);
const DIM_COLOR: Color = Color::Rgb(130, 70, 70);
const CAPTION_COLOR: Color = Color::Rgb(210, 205, 200);
const BUTTON_COLOR: Color = Color::Rgb(255, 220, 100);
const STATUS_COLOR: Color = Color::Rgb(160, 150, 150);
const BUTTON_GAP: u16 = 2;

/// A drawn element that reacts to a mouse click.
#[derive(Debug, Clone)]
pub struct Hitbox {
    pub area: Rect,
    /// `data-action` of the element, when it has one.
    pub action: Option<String>,
    handler: ClickHandler,
}

impl Hitbox {
    /// Zero-based terminal cell containment.
    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }

    pub fn click(&self) {
        self.handler.call();
    }
}

/// Topmost hitbox under `(column, row)`. Later hitboxes were drawn last.
#[must_use]
pub fn hit_test(hitboxes: &[Hitbox], column: u16, row: u16) -> Option<&Hitbox> {
    hitboxes.iter().rev().find(|hitbox| hitbox.contains(column, row))
}

/// Draw `node` over the whole frame with `status` in the bottom row.
pub fn draw_carousel(frame: &mut Frame<'_>, node: &Node, status: &str) -> Vec<Hitbox> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let mut hitboxes = Vec::new();
    draw_node(frame, chunks[0], node, &mut hitboxes);

    let status_line = truncate_display(status, usize::from(chunks[1].width));
    frame.render_widget(
        Paragraph::new(status_line).style(Style::default().fg(STATUS_COLOR)),
        chunks[1],
    );
    hitboxes
}

/// Draw one node into `area`, appending hitboxes for clickable elements.
pub fn draw_node(frame: &mut Frame<'_>, area: Rect, node: &Node, hitboxes: &mut Vec<Hitbox>) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let element = match node {
        Node::Text(text) => {
            let text = truncate_display(text, usize::from(area.width));
            frame.render_widget(Paragraph::new(text), area);
            return;
        }
        Node::Element(element) => element,
    };
    match element.tag {
        "figure" => draw_figure(frame, area, element, hitboxes),
        "img" => draw_image(frame, area, element),
        "figcaption" => draw_caption(frame, area, element),
        "button" => draw_buttons(frame, area, &[element], hitboxes),
        _ => draw_container(frame, area, element, hitboxes),
    }
    if element.tag != "button" {
        push_hitbox(hitboxes, area, element);
    }
}

fn draw_container(frame: &mut Frame<'_>, area: Rect, element: &Element, hitboxes: &mut Vec<Hitbox>) {
    let buttons: Vec<&Element> = element
        .child_elements()
        .filter(|child| child.tag == "button")
        .collect();
    let blocks: Vec<&Node> = element
        .children
        .iter()
        .filter(|child| child.tag() != Some("button"))
        .collect();

    let mut constraints: Vec<Constraint> = blocks
        .iter()
        .map(|child| Constraint::Length(node_height(child)))
        .collect();
    if !buttons.is_empty() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (child, row) in blocks.iter().zip(rows.iter()) {
        draw_node(frame, *row, child, hitboxes);
    }
    if !buttons.is_empty() {
        draw_buttons(frame, rows[blocks.len()], &buttons, hitboxes);
    }
}

fn draw_figure(frame: &mut Frame<'_>, area: Rect, element: &Element, hitboxes: &mut Vec<Hitbox>) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR));
    if let Some(title) = element.attrs.get_text("title") {
        block = block.title(Span::styled(
            format!(" {title} "),
            Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
        ));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let children: Vec<&Node> = element.children.iter().collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            children
                .iter()
                .map(|child| Constraint::Length(node_height(child)))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);
    for (child, row) in children.iter().zip(rows.iter()) {
        draw_node(frame, *row, child, hitboxes);
    }
}

fn draw_image(frame: &mut Frame<'_>, area: Rect, element: &Element) {
    let src = element.attrs.get_text("src").unwrap_or_default();
    let label = truncate_display(&format!("▣ {src}"), usize::from(area.width));
    let mut lines = vec![Line::default(); usize::from(area.height.saturating_sub(1) / 2)];
    lines.push(Line::from(Span::styled(label, Style::default().fg(DIM_COLOR))));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_caption(frame: &mut Frame<'_>, area: Rect, element: &Element) {
    let mut spans = Vec::new();
    let mut used = 0usize;
    let width = usize::from(area.width);
    for child in &element.children {
        let (text, style) = match child {
            Node::Element(inner) if inner.tag == "strong" => (
                inner.text_content(),
                Style::default().fg(CAPTION_COLOR).add_modifier(Modifier::BOLD),
            ),
            other => (other.text_content(), Style::default().fg(CAPTION_COLOR)),
        };
        let text = truncate_display(&text, width.saturating_sub(used));
        used += display_width(&text);
        spans.push(Span::styled(text, style));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn draw_buttons(
    frame: &mut Frame<'_>,
    area: Rect,
    buttons: &[&Element],
    hitboxes: &mut Vec<Hitbox>,
) {
    let labels: Vec<String> = buttons
        .iter()
        .map(|button| format!("[ {} ]", button.text_content()))
        .collect();
    let widths: Vec<u16> = labels
        .iter()
        .map(|label| u16::try_from(display_width(label)).unwrap_or(u16::MAX))
        .collect();
    let gaps = u16::try_from(widths.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let total = widths
        .iter()
        .fold(BUTTON_GAP.saturating_mul(gaps), |acc, w| acc.saturating_add(*w));
    let mut x = area.x.saturating_add(area.width.saturating_sub(total) / 2);
    let right = area.x.saturating_add(area.width);

    for ((button, label), width) in buttons.iter().zip(labels).zip(widths) {
        if x >= right {
            break;
        }
        let width = width.min(right - x);
        let rect = Rect::new(x, area.y, width, 1);
        let label = truncate_display(&label, usize::from(width));
        frame.render_widget(
            Paragraph::new(Span::styled(
                label,
                Style::default().fg(BUTTON_COLOR).add_modifier(Modifier::BOLD),
            )),
            rect,
        );
        push_hitbox(hitboxes, rect, button);
        x = x.saturating_add(width).saturating_add(BUTTON_GAP);
    }
}

fn push_hitbox(hitboxes: &mut Vec<Hitbox>, area: Rect, element: &Element) {
    if let Some(handler) = &element.on_click {
        hitboxes.push(Hitbox {
            area,
            action: element.attrs.get_text(ACTION_ATTR),
            handler: handler.clone(),
        });
    }
}

/// Rows a node wants when stacked.
fn node_height(node: &Node) -> u16 {
    match node {
        Node::Text(_) => 1,
        Node::Element(element) => match element.tag {
            "figure" => element
                .children
                .iter()
                .map(node_height)
                .fold(2u16, u16::saturating_add),
            "img" => match element.attrs.get("height") {
                Some(AttrValue::Integer(rows)) => u16::try_from(*rows).unwrap_or(1).max(1),
                _ => 1,
            },
            _ => 1,
        },
    }
}

#[must_use]
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[must_use]
fn truncate_display(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
