//! Locale tags and resolution helpers

use crate::error::{I18nError, I18nResult};
use iris_common::env_var_nonempty;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Environment variables consulted for the system locale, highest priority first
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A validated locale tag such as `en_IN`
///
/// Tags are accepted with `_` or `-` separators and with POSIX suffixes
/// (`en_IN.UTF-8`, `de_DE@euro`). They are normalized to the underscore form
/// catalogs are named by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl LocaleTag {
    /// Parse and normalize a locale tag
    pub fn parse(tag: &str) -> I18nResult<Self> {
        let bare = tag.split(['.', '@']).next().unwrap_or_default().trim();
        if bare.is_empty() {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        let langid: LanguageIdentifier = bare
            .parse()
            .map_err(|_| I18nError::InvalidLocale(tag.to_string()))?;

        let language = langid.language.as_str();
        if language == "und" {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        Ok(Self {
            language: language.to_string(),
            script: langid.script.map(|s| s.as_str().to_string()),
            region: langid.region.map(|r| r.as_str().to_string()),
        })
    }

    /// The underscore-joined name used for catalog files, e.g. `en_IN`
    pub fn name(&self) -> String {
        let mut name = self.language.clone();
        for part in [&self.script, &self.region].into_iter().flatten() {
            name.push('_');
            name.push_str(part);
        }
        name
    }

    /// Language subtag, e.g. `en`
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Region subtag, e.g. `IN`
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Tags to try in order: `zh_Hans_CN`, `zh_Hans`, `zh`
    pub fn fallback_chain(&self) -> Vec<Self> {
        let mut chain = vec![self.clone()];
        if self.script.is_some() && self.region.is_some() {
            chain.push(Self {
                language: self.language.clone(),
                script: self.script.clone(),
                region: None,
            });
        }
        if self.script.is_some() || self.region.is_some() {
            chain.push(Self {
                language: self.language.clone(),
                script: None,
                region: None,
            });
        }
        chain
    }

    /// Convert to a BCP 47 `LanguageIdentifier`
    pub fn to_language_identifier(&self) -> I18nResult<LanguageIdentifier> {
        self.name()
            .parse()
            .map_err(|_| I18nError::InvalidLocale(self.name()))
    }

    /// Detect the system locale from `LC_ALL`, `LC_MESSAGES` and `LANG`
    pub fn from_env() -> Option<Self> {
        Self::from_env_with(env_var_nonempty)
    }

    /// Detect the locale through `lookup`, which maps a variable name to its value
    pub fn from_env_with<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        LOCALE_ENV_VARS
            .into_iter()
            .filter_map(|var| lookup(var))
            .find(|value| !matches!(value.as_str(), "C" | "POSIX") && !value.starts_with("C."))
            .and_then(|value| Self::parse(&value).ok())
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for LocaleTag {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    #[test]
    fn test_parse_normalizes_separators_and_case() {
        assert_eq!(tag("en_IN").name(), "en_IN");
        assert_eq!(tag("en-in").name(), "en_IN");
        assert_eq!(tag("EN").name(), "en");
        assert_eq!(tag("en_IN.UTF-8").name(), "en_IN");
        assert_eq!(tag("de_DE@euro").name(), "de_DE");
        assert_eq!(tag("zh-hans-cn").name(), "zh_Hans_CN");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "  ", ".UTF-8", "not a locale", "und"] {
            assert!(
                matches!(LocaleTag::parse(bad), Err(I18nError::InvalidLocale(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_fallback_chain() {
        let names = |t: &str| -> Vec<String> {
            tag(t).fallback_chain().iter().map(LocaleTag::name).collect()
        };
        assert_eq!(names("en_IN"), ["en_IN", "en"]);
        assert_eq!(names("en"), ["en"]);
        assert_eq!(names("zh_Hans_CN"), ["zh_Hans_CN", "zh_Hans", "zh"]);
    }

    #[test]
    fn test_from_env_priority() {
        let env = |pairs: &[(&str, &str)]| {
            let map: HashMap<String, String> = pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
            move |name: &str| map.get(name).cloned()
        };

        let detected = LocaleTag::from_env_with(env(&[("LANG", "de_DE.UTF-8"), ("LC_ALL", "fr_FR")]));
        assert_eq!(detected, Some(tag("fr_FR")));

        let detected = LocaleTag::from_env_with(env(&[("LC_ALL", "C"), ("LANG", "it_IT.UTF-8")]));
        assert_eq!(detected, Some(tag("it_IT")));

        assert_eq!(LocaleTag::from_env_with(env(&[("LANG", "POSIX")])), None);
        assert_eq!(LocaleTag::from_env_with(env(&[])), None);
    }

    #[test]
    fn test_language_identifier_conversion() {
        let lang_id = tag("en_IN").to_language_identifier().unwrap();
        assert_eq!(lang_id.to_string(), "en-IN");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&tag("en-IN")).unwrap();
        assert_eq!(json, "\"en_IN\"");
        let back: LocaleTag = serde_json::from_str("\"pt-br\"").unwrap();
        assert_eq!(back.name(), "pt_BR");
        assert!(serde_json::from_str::<LocaleTag>("\"!!\"").is_err());
    }
}
