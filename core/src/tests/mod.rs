
use crate::types::*;
use crate::window::GameWindow;

// ==========================================
// HELPER FUNCTIONS
// ==========================================

const DAY: Moment = 24 * 60 * 60;
const T0: Moment = 1_700_000_000;
const WEIGHTS: [Multiplier; 4] = [150, 120, 100, 80];

fn four_day_window() -> GameWindow {
    GameWindow::new(T0, DAY, 4).expect("four day window is valid")
}
