use crossterm::event::KeyCode;
use cli_log::*;

use super::core::App;
use super::types::Action;
use crate::ui::view::{ActionView, select_view};

impl App {
    /// Returns false when the user asked to quit.
    pub fn handle_key_input(&mut self, key_code: KeyCode) -> bool {
        // A notice blocks the screen until dismissed
        if self.state.notice.is_some() {
            match key_code {
                KeyCode::Char('q') => return false,
                KeyCode::Esc | KeyCode::Enter => self.dispatch(Action::DismissNotice),
                _ => {}
            }
            return true;
        }

        match key_code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('c') => {
                if !self.state.connected {
                    self.connect_wallet();
                }
            }
            KeyCode::Char('r') => {
                if self.state.connected {
                    self.refresh_all();
                } else {
                    debug!("Ignoring refresh while disconnected");
                }
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                self.dispatch(Action::MintInputPushed(ch));
            }
            KeyCode::Backspace => self.dispatch(Action::MintInputPopped),
            KeyCode::Enter => self.handle_enter(),
            _ => {}
        }
        true
    }

    fn handle_enter(&mut self) {
        match select_view(&self.state) {
            ActionView::Connect => self.connect_wallet(),
            ActionView::Loading => {}
            ActionView::Withdraw => self.withdraw(),
            ActionView::Claim { .. } => self.claim(),
            ActionView::Mint { enabled } => {
                if enabled {
                    self.mint();
                }
            }
        }
    }
}
