use std::path::Path;

use claude_sync::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::icon::Icon;

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning], ui: &UiContext) {
    if ui.json {
        return;
    }
    let icon = Icon::Warning.colored(ui.color, ui.unicode);
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("{} Unknown config key '{}' in {}:{}", icon, w.key, path.display(), line);
        } else {
            eprintln!("{} Unknown config key '{}' in {}", icon, w.key, path.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}
