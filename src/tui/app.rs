//! Application state for the TUI.

use crate::cli::AppContext;
use crate::config::DisplayConfig;
use crate::night::{Quality, SleepNight};
use crate::viewmodel::{SleepQualityViewModel, SleepTrackerViewModel};

/// The screen currently shown.
pub enum Screen {
    /// Start/stop/clear and the nights list.
    Tracker,
    /// Rating the night that just ended.
    Quality {
        vm: SleepQualityViewModel,
        night: SleepNight,
        selected: usize,
    },
}

/// Application state.
pub struct App<'a> {
    ctx: &'a AppContext,
    /// View-model bound to the tracker screen.
    pub tracker: SleepTrackerViewModel,
    /// Current screen.
    pub screen: Screen,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Create a new app instance on the tracker screen.
    #[must_use]
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            tracker: ctx.tracker(),
            screen: Screen::Tracker,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
        }
    }

    /// Display labels from the loaded config.
    #[must_use]
    pub fn labels(&self) -> &DisplayConfig {
        &self.ctx.config.display
    }

    /// Start tracking if the start button is showing.
    pub fn start(&mut self) {
        if *self.tracker.start_button_visible().borrow() {
            drop(self.tracker.on_start_tracking());
            self.status = Some("Sleep well!".to_string());
        }
    }

    /// Stop tracking if the stop button is showing.
    pub fn stop(&mut self) {
        if *self.tracker.stop_button_visible().borrow() {
            drop(self.tracker.on_stop_tracking());
            self.status = Some("Good morning!".to_string());
        }
    }

    /// Clear all nights if the clear button is showing.
    pub fn clear(&mut self) {
        if *self.tracker.clear_button_visible().borrow() {
            drop(self.tracker.on_clear());
            self.status = Some("Cleared all nights".to_string());
        }
    }

    /// Move the quality selection up.
    pub fn select_previous(&mut self) {
        if let Screen::Quality { selected, .. } = &mut self.screen {
            *selected = selected.saturating_sub(1);
        }
    }

    /// Move the quality selection down.
    pub fn select_next(&mut self) {
        if let Screen::Quality { selected, .. } = &mut self.screen {
            if *selected + 1 < Quality::ALL.len() {
                *selected += 1;
            }
        }
    }

    /// Submit a rating on the quality screen.
    pub fn rate(&mut self, rating: Option<i32>) {
        if let Screen::Quality { vm, selected, .. } = &self.screen {
            let rating = rating.unwrap_or_else(|| Quality::ALL[*selected].rating());
            drop(vm.on_set_sleep_quality(rating));
        }
    }

    /// Leave the quality screen without rating.
    pub fn skip_rating(&mut self) {
        if matches!(self.screen, Screen::Quality { .. }) {
            self.return_to_tracker();
            self.status = Some("Rating skipped".to_string());
        }
    }

    /// Follow pending navigation signals from the view-models.
    pub fn navigate(&mut self) {
        match &self.screen {
            Screen::Tracker => {
                let pending = self.tracker.navigate_to_sleep_quality().borrow().clone();
                if let Some(night) = pending {
                    self.tracker.done_navigating();
                    self.screen = Screen::Quality {
                        vm: self.ctx.quality(night.night_id),
                        night,
                        selected: Quality::ALL
                            .iter()
                            .position(|q| *q == Quality::Ok)
                            .unwrap_or(0),
                    };
                    self.status = Some("How did you sleep?".to_string());
                }
            }
            Screen::Quality { vm, .. } => {
                if *vm.navigate_to_sleep_tracker().borrow() {
                    vm.done_navigating();
                    self.return_to_tracker();
                    self.status = Some("Rating saved".to_string());
                }
            }
        }
    }

    /// Tear down the rating screen and rebuild the tracker screen.
    fn return_to_tracker(&mut self) {
        if let Screen::Quality { vm, .. } = &self.screen {
            vm.on_cleared();
        }
        self.screen = Screen::Tracker;
        self.tracker.on_cleared();
        self.tracker = self.ctx.tracker();
    }

    /// Tear down every view-model before exit.
    pub fn shutdown(&mut self) {
        if let Screen::Quality { vm, .. } = &self.screen {
            vm.on_cleared();
        }
        self.tracker.on_cleared();
    }
}
