//! Emoji used by the terminal views, with plain-text fallbacks.

use console::Emoji;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static BELL: Emoji<'_, '_> = Emoji("🔔 ", "[!]");
pub static FILTER: Emoji<'_, '_> = Emoji("🔎 ", "[F]");
pub static ISSUE: Emoji<'_, '_> = Emoji("📄 ", "#");
