//! Locale conventions needed to read and write decimal text. Only the decimal separator matters
//! here: everything else a full culture database knows about is out of scope.
//!
//! A [`Locale`] is a plain value passed to whatever needs it. Callers with their own culture data
//! build one with [`Locale::new`]; otherwise [`Locale::from_tag`] covers common tags and
//! [`Locale::current`] resolves the process environment the way POSIX does.

use phf::phf_map;
use tracing::{debug, trace};

/// Decimal separator by primary language subtag.
static LANGUAGE_SEPARATORS: phf::Map<&'static str, char> = phf_map! {
    "en" => '.',
    "ja" => '.',
    "zh" => '.',
    "ko" => '.',
    "he" => '.',
    "th" => '.',
    "hi" => '.',
    "ga" => '.',
    "cy" => '.',
    "ms" => '.',
    "fil" => '.',
    "de" => ',',
    "fr" => ',',
    "es" => ',',
    "it" => ',',
    "pt" => ',',
    "nl" => ',',
    "ru" => ',',
    "uk" => ',',
    "pl" => ',',
    "cs" => ',',
    "sk" => ',',
    "sl" => ',',
    "hr" => ',',
    "sr" => ',',
    "bg" => ',',
    "ro" => ',',
    "hu" => ',',
    "el" => ',',
    "tr" => ',',
    "sv" => ',',
    "nb" => ',',
    "nn" => ',',
    "no" => ',',
    "da" => ',',
    "fi" => ',',
    "is" => ',',
    "et" => ',',
    "lv" => ',',
    "lt" => ',',
    "id" => ',',
    "vi" => ',',
};

/// Regions that disagree with their language's default, keyed by the full lowercase tag.
static REGION_SEPARATORS: phf::Map<&'static str, char> = phf_map! {
    "de-ch" => '.',
    "de-li" => '.',
    "fr-ch" => '.',
    "it-ch" => '.',
    "es-mx" => '.',
    "es-us" => '.',
    "es-pr" => '.',
    "es-gt" => '.',
    "en-za" => ',',
    "en-dk" => ',',
    "en-be" => ',',
    "nl-be" => ',',
};

/// Environment variables consulted by [`Locale::current`], highest priority first.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

/// The decimal conventions of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    decimal_separator: char,
}

impl Locale {
    /// The culture-neutral convention: `.` as the decimal separator.
    pub const INVARIANT: Locale = Locale::new('.');

    pub const fn new(decimal_separator: char) -> Self {
        Self { decimal_separator }
    }

    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Looks up a locale tag such as `de-DE`, `fr_CH.UTF-8` or `C`. The full tag is tried first,
    /// then its language alone. Returns `None` for languages not in the table.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = normalize_tag(tag);
        if tag == "c" || tag == "posix" {
            return Some(Self::INVARIANT);
        }

        let language = tag.split('-').next().unwrap_or_default();
        REGION_SEPARATORS
            .get(tag.as_str())
            .or_else(|| LANGUAGE_SEPARATORS.get(language))
            .map(|&sep| Self::new(sep))
    }

    /// The locale of the process environment, read at call time. See [`Locale::from_env_with`].
    pub fn current() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Resolves a locale from environment variables supplied by `read`: the first non-empty of
    /// [`LOCALE_ENV_VARS`] wins. Missing variables and unknown tags fall back to
    /// [`Locale::INVARIANT`].
    pub fn from_env_with<F: Fn(&str) -> Option<String>>(read: F) -> Self {
        let Some((name, tag)) = LOCALE_ENV_VARS.iter().find_map(|&name| {
            read(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (name, value))
        }) else {
            trace!("no locale set in the environment, using invariant");
            return Self::INVARIANT;
        };

        match Self::from_tag(&tag) {
            Some(locale) => {
                trace!(name, %tag, ?locale, "resolved locale");
                locale
            }
            None => {
                debug!(name, %tag, "unknown locale tag, using invariant");
                Self::INVARIANT
            }
        }
    }

    /// Writes a float as its shortest round-trip decimal text, never in exponent notation, with
    /// this locale's separator.
    pub fn render_f64(&self, value: f64) -> String {
        let text = value.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', self.decimal_separator.encode_utf8(&mut [0; 4]))
        }
    }
}

impl Default for Locale {
    /// The environment's locale, as for [`Locale::current`].
    fn default() -> Self {
        Self::current()
    }
}

/// `de_DE.UTF-8@euro` -> `de-de`
fn normalize_tag(tag: &str) -> String {
    tag.split(|c: char| c == '.' || c == '@')
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-")
        .to_ascii_lowercase()
}
