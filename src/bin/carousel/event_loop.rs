//! Interactive terminal loop: draw, wait for input, route keys and clicks to the carousel buttons.

use anyhow::{Context, Result};
use carousel_tui::terminal_restore::TerminalGuard;
use carousel_tui::tui::{draw_carousel, hit_test, Hitbox};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::app::CarouselApp;
use crate::config::ClickAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Quit,
}

pub(crate) fn run_event_loop(app: &CarouselApp, mouse: bool) -> Result<()> {
    let guard = TerminalGuard::new();
    guard
        .enable_raw_mode()
        .context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    guard
        .enter_alt_screen(&mut stdout)
        .context("failed to enter alternate screen")?;
    if mouse {
        guard
            .enable_mouse_capture(&mut stdout)
            .context("failed to enable mouse capture")?;
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    loop {
        let tree = app.render();
        let status = app.status();
        let mut hitboxes = Vec::new();
        terminal.draw(|frame| {
            hitboxes = draw_carousel(frame, &tree, &status);
        })?;

        let event = event::read().context("failed to read terminal event")?;
        if handle_event(app, &hitboxes, &event) == LoopControl::Quit {
            break;
        }
    }

    guard.restore();
    Ok(())
}

pub(crate) fn handle_event(app: &CarouselApp, hitboxes: &[Hitbox], event: &Event) -> LoopControl {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => {
            handle_mouse(hitboxes, mouse);
            LoopControl::Continue
        }
        _ => LoopControl::Continue,
    }
}

fn handle_key(app: &CarouselApp, key: &KeyEvent) -> LoopControl {
    if key.kind != KeyEventKind::Press {
        return LoopControl::Continue;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => LoopControl::Quit,
        KeyCode::Char('q') | KeyCode::Esc => LoopControl::Quit,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
            app.apply(ClickAction::Prev);
            LoopControl::Continue
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
            app.apply(ClickAction::Next);
            LoopControl::Continue
        }
        _ => LoopControl::Continue,
    }
}

fn handle_mouse(hitboxes: &[Hitbox], mouse: &MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if let Some(hitbox) = hit_test(hitboxes, mouse.column, mouse.row) {
        tracing::debug!(action = ?hitbox.action, "mouse click");
        hitbox.click();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ownership;
    use carousel_tui::{CarouselProps, Slide};
    use ratatui::backend::TestBackend;

    fn app() -> CarouselApp {
        let slides = vec![
            Slide::new("a.png", "A"),
            Slide::new("b.png", "B"),
            Slide::new("c.png", "C"),
        ];
        CarouselApp::new(Ownership::Delegated, CarouselProps::new(slides))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn left_click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn drawn_hitboxes(app: &CarouselApp) -> Vec<Hitbox> {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).expect("test terminal");
        let tree = app.render();
        let status = app.status();
        let mut hitboxes = Vec::new();
        terminal
            .draw(|frame| {
                hitboxes = draw_carousel(frame, &tree, &status);
            })
            .expect("draw");
        hitboxes
    }

    #[test]
    fn arrow_and_vi_keys_move_the_index() {
        let app = app();
        assert_eq!(handle_event(&app, &[], &key(KeyCode::Right)), LoopControl::Continue);
        assert_eq!(app.index(), 1);
        handle_event(&app, &[], &key(KeyCode::Char('l')));
        assert_eq!(app.index(), 2);
        handle_event(&app, &[], &key(KeyCode::Char('n')));
        assert_eq!(app.index(), 0);
        handle_event(&app, &[], &key(KeyCode::Left));
        assert_eq!(app.index(), 2);
        handle_event(&app, &[], &key(KeyCode::Char('h')));
        handle_event(&app, &[], &key(KeyCode::Char('p')));
        assert_eq!(app.index(), 0);
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let app = app();
        assert_eq!(handle_event(&app, &[], &key(KeyCode::Char('q'))), LoopControl::Quit);
        assert_eq!(handle_event(&app, &[], &key(KeyCode::Esc)), LoopControl::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&app, &[], &ctrl_c), LoopControl::Quit);
        assert_eq!(handle_event(&app, &[], &key(KeyCode::Char('c'))), LoopControl::Continue);
    }

    #[test]
    fn key_release_is_ignored() {
        let app = app();
        let mut release = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        handle_event(&app, &[], &Event::Key(release));
        assert_eq!(app.index(), 0);
    }

    #[test]
    fn left_click_on_button_fires_its_handler() {
        let app = app();
        let hitboxes = drawn_hitboxes(&app);
        let next = hitboxes
            .iter()
            .find(|hitbox| hitbox.action.as_deref() == Some("next"))
            .expect("next button drawn");
        let event = left_click(next.area.x, next.area.y);
        assert_eq!(handle_event(&app, &hitboxes, &event), LoopControl::Continue);
        assert_eq!(app.index(), 1);

        let hitboxes = drawn_hitboxes(&app);
        let prev = hitboxes
            .iter()
            .find(|hitbox| hitbox.action.as_deref() == Some("prev"))
            .expect("prev button drawn");
        handle_event(&app, &hitboxes, &left_click(prev.area.x, prev.area.y));
        handle_event(&app, &hitboxes, &left_click(prev.area.x, prev.area.y));
        assert_eq!(app.index(), 2);
    }

    #[test]
    fn clicks_outside_buttons_and_other_buttons_do_nothing() {
        let app = app();
        let hitboxes = drawn_hitboxes(&app);
        handle_event(&app, &hitboxes, &left_click(0, 0));
        let next = hitboxes
            .iter()
            .find(|hitbox| hitbox.action.as_deref() == Some("next"))
            .expect("next button drawn");
        let right_click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: next.area.x,
            row: next.area.y,
            modifiers: KeyModifiers::NONE,
        });
        handle_event(&app, &hitboxes, &right_click);
        assert_eq!(app.index(), 0);
    }
}
