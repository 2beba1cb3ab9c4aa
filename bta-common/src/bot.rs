//! UI-automation fallback for pairing confirmation.
//!
//! When the privileged confirm/set-pin calls are unavailable, the last
//! avenue is simulating a user tap on the platform-rendered pairing dialog.
//! The bot watches foreground-window identity changes; when the native
//! pairing dialog comes to the front it looks up the confirmation control
//! in the active accessibility tree and activates it.

use tracing::{debug, trace};

use crate::ui_tree::{self, UiNode};

/// Screen identity of the platform's native pairing-confirmation dialog.
pub const PAIRING_DIALOG_SCREEN: &str = "com.android.settings.bluetooth.BluetoothPairingDialog";

/// Resource id of the dialog's confirmation control.
pub const CONFIRM_CONTROL_ID: &str = "android:id/button1";

/// Live screen surface the bot inspects and taps.
pub trait ScreenDriver {
    /// Accessibility-tree snapshot of the active window, if one exists.
    fn active_root(&self) -> Option<UiNode>;

    /// Synthetic activation of a control. Returns whether the platform
    /// accepted the gesture.
    fn tap(&mut self, node: &UiNode) -> bool;
}

/// Watches foreground-window changes and taps the pairing dialog's
/// confirmation control when it appears.
#[derive(Debug)]
pub struct ScreenBot {
    dialog_screen: String,
    confirm_id: String,
    top_screen: String,
}

impl Default for ScreenBot {
    fn default() -> Self {
        Self::new(PAIRING_DIALOG_SCREEN, CONFIRM_CONTROL_ID)
    }
}

impl ScreenBot {
    pub fn new(dialog_screen: impl Into<String>, confirm_id: impl Into<String>) -> Self {
        Self {
            dialog_screen: dialog_screen.into(),
            confirm_id: confirm_id.into(),
            top_screen: String::new(),
        }
    }

    /// Currently tracked foreground screen identity.
    pub fn top_screen(&self) -> &str {
        &self.top_screen
    }

    /// Feed one foreground-window identity change. Returns whether a
    /// confirmation control was tapped.
    pub fn on_window_changed(&mut self, driver: &mut dyn ScreenDriver, screen: &str) -> bool {
        if screen.is_empty() || screen == self.top_screen {
            return false;
        }
        debug!(from = %self.top_screen, to = %screen, "foreground screen changed");
        self.top_screen = screen.to_string();
        if screen != self.dialog_screen {
            return false;
        }
        let Some(root) = driver.active_root() else {
            debug!("pairing dialog has no active window root");
            return false;
        };
        trace!(tree = %ui_tree::format_tree(&root), "pairing dialog tree");
        match ui_tree::find_first_by_id(&root, &self.confirm_id) {
            Some(control) => {
                debug!(id = %self.confirm_id, "tapping pairing confirmation control");
                driver.tap(control)
            }
            None => {
                debug!(id = %self.confirm_id, "confirmation control not found");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeScreen {
        root: Option<UiNode>,
        taps: Vec<String>,
    }

    impl FakeScreen {
        fn showing(root: UiNode) -> Self {
            Self {
                root: Some(root),
                taps: Vec::new(),
            }
        }

        fn empty() -> Self {
            Self {
                root: None,
                taps: Vec::new(),
            }
        }
    }

    impl ScreenDriver for FakeScreen {
        fn active_root(&self) -> Option<UiNode> {
            self.root.clone()
        }

        fn tap(&mut self, node: &UiNode) -> bool {
            self.taps.push(node.id.clone().unwrap_or_default());
            true
        }
    }

    fn pairing_dialog() -> UiNode {
        UiNode::new("android.widget.FrameLayout")
            .with_child(
                UiNode::new("android.widget.Button")
                    .with_id("android:id/button2")
                    .with_text("Cancel"),
            )
            .with_child(
                UiNode::new("android.widget.Button")
                    .with_id("android:id/button1")
                    .with_text("Pair"),
            )
    }

    #[test]
    fn taps_the_confirmation_control_when_the_dialog_appears() {
        let mut bot = ScreenBot::default();
        let mut screen = FakeScreen::showing(pairing_dialog());
        assert!(!bot.on_window_changed(&mut screen, "com.example.launcher.Home"));
        assert!(bot.on_window_changed(&mut screen, PAIRING_DIALOG_SCREEN));
        assert_eq!(screen.taps, ["android:id/button1"]);
    }

    #[test]
    fn other_screens_are_only_tracked() {
        let mut bot = ScreenBot::default();
        let mut screen = FakeScreen::showing(pairing_dialog());
        assert!(!bot.on_window_changed(&mut screen, "com.example.app.Main"));
        assert_eq!(bot.top_screen(), "com.example.app.Main");
        assert!(screen.taps.is_empty());
    }

    #[test]
    fn same_screen_changes_are_ignored() {
        let mut bot = ScreenBot::default();
        let mut screen = FakeScreen::showing(pairing_dialog());
        assert!(bot.on_window_changed(&mut screen, PAIRING_DIALOG_SCREEN));
        // Re-delivery of the same identity must not tap again.
        assert!(!bot.on_window_changed(&mut screen, PAIRING_DIALOG_SCREEN));
        assert_eq!(screen.taps.len(), 1);
    }

    #[test]
    fn missing_root_or_control_is_a_no_op() {
        let mut bot = ScreenBot::default();
        let mut blank = FakeScreen::empty();
        assert!(!bot.on_window_changed(&mut blank, PAIRING_DIALOG_SCREEN));

        let mut bot = ScreenBot::default();
        let mut no_button = FakeScreen::showing(UiNode::new("android.widget.FrameLayout"));
        assert!(!bot.on_window_changed(&mut no_button, PAIRING_DIALOG_SCREEN));
        assert!(no_button.taps.is_empty());
    }
}
