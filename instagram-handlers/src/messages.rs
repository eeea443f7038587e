//! User-facing texts of the Instagram bot.

pub const START_TEXT: &str =
    "سلام! 👋\nلینک پست یا ریل اینستاگرام رو برام بفرست تا برات دانلودش کنم.";

pub const HELP_TEXT: &str =
    "کافیه لینک پست یا ریل اینستاگرام رو ارسال کنی تا فایل برات برگردونده بشه.";

pub const MSG_UNEXPECTED_ERROR: &str = "❌ یه خطای غیرمنتظره رخ داد. لطفا بعداً دوباره امتحان کن.";

pub const MSG_SEND_FAILED: &str = "ارسال فایل به تلگرام با خطا مواجه شد. لطفا دوباره تلاش کن.";

/// Reply for a link Instagram would not give us media for.
pub fn download_failed(reason: &str) -> String {
    format!("⚠️ متاسفانه نتونستم مدیای اینستاگرام رو دانلود کنم: {}", reason)
}
