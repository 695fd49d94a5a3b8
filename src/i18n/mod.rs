//! Internationalization (i18n) support
//!
//! Console messages, alerts and error descriptions go through `t!`.
//! Supported languages: Korean (ko, default) and English (en).
//!
//! # Environment Variables
//!
//! - `REPUTATION_LANG`: preferred language (ko, en). Defaults to Korean.
//!
//! # Usage
//!
//! ```rust,ignore
//! use reputation::i18n::{t, set_locale};
//!
//! set_locale("en");
//! let msg = t!("console.content.reject_confirm");
//! ```

use std::sync::RwLock;

// Note: rust_i18n::i18n! macro is declared in lib.rs (crate root)

static CURRENT_LOCALE: RwLock<Option<String>> = RwLock::new(None);

const DEFAULT_LOCALE: &str = "ko";

/// Set the current locale for translations
///
/// # Examples
///
/// ```rust,ignore
/// use reputation::i18n::set_locale;
///
/// set_locale("en-US");
/// ```
pub fn set_locale(locale: &str) {
    let normalized = normalize_locale(locale);
    rust_i18n::set_locale(&normalized);
    if let Ok(mut current) = CURRENT_LOCALE.write() {
        *current = Some(normalized);
    }
}

/// Get the current locale, or the default when none was set
pub fn current_locale() -> String {
    CURRENT_LOCALE
        .read()
        .ok()
        .and_then(|current| current.clone())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Initialize i18n from `REPUTATION_LANG`, falling back to Korean
pub fn init_from_env() {
    let locale =
        std::env::var("REPUTATION_LANG").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());
    set_locale(&locale);
}

/// Normalize locale code to a supported one
///
/// - ko-KR, ko_KR, korean -> ko
/// - en-US, en_US, english -> en
/// - anything else -> ko
fn normalize_locale(locale: &str) -> String {
    let lower = locale.to_lowercase();

    if lower.starts_with("en") || lower == "english" {
        "en".to_string()
    } else {
        "ko".to_string()
    }
}

/// Translate a key with optional parameters
///
/// Re-export of `rust_i18n::t!`.
///
/// ```rust,ignore
/// use reputation::i18n::t;
///
/// let msg = t!("console.schedule.created", slots = 8);
/// ```
#[doc(inline)]
pub use rust_i18n::t;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("ko"), "ko");
        assert_eq!(normalize_locale("ko-KR"), "ko");
        assert_eq!(normalize_locale("ko_KR"), "ko");
        assert_eq!(normalize_locale("korean"), "ko");

        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("english"), "en");

        assert_eq!(normalize_locale("unknown"), "ko");
    }

    #[test]
    #[serial]
    fn test_set_and_get_locale() {
        set_locale("en-US");
        assert_eq!(current_locale(), "en");

        set_locale("ko");
        assert_eq!(current_locale(), "ko");
    }

    #[test]
    #[serial]
    fn test_translation_follows_locale() {
        set_locale("en");
        let en = t!("console.schedule.no_days").to_string();
        set_locale("ko");
        let ko = t!("console.schedule.no_days").to_string();
        assert_eq!(ko, "발행 요일을 하나 이상 선택해 주세요.");
        assert_ne!(en, ko);
    }
}
