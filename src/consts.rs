//! Project-wide constants.

/// Audit database, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "moviebot.db";

/// Language that titles and plots are translated into for display.
pub const DEFAULT_DISPLAY_LANG: &str = "ru";

/// Environment variable holding the Telegram bot token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Environment variable holding the OMDb API key.
pub const OMDB_API_KEY_VAR: &str = "OMDB_API_KEY";

pub const OMDB_BASE_URL: &str = "http://www.omdbapi.com";
pub const TELEGRAM_BASE_URL: &str = "https://api.telegram.org";
pub const GOOGLE_TRANSLATE_BASE_URL: &str = "https://translate.googleapis.com";

/// Long-poll window passed to `getUpdates`, in seconds.
pub const POLL_TIMEOUT_SECS: u64 = 30;

/// Pause after a failed `getUpdates` before polling again, in seconds.
pub const POLL_RETRY_DELAY_SECS: u64 = 5;

// --- Fixed replies ---

pub const GREETING: &str = "Привет! Введи название фильма, и я найду о нём информацию.";
pub const EMPTY_INPUT_REPLY: &str = "Введите название фильма.";
pub const NOT_FOUND_REPLY: &str = "Фильм не найден.";
pub const FAILURE_REPLY: &str = "Произошла ошибка при поиске фильма.";
