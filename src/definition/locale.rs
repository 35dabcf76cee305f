use std::fmt;
use std::str::FromStr;

use super::DefinitionsError;

/// Language, country and variant used to pick localized definitions files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    country: Option<String>,
    variant: Option<String>,
}

impl Locale {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            country: None,
            variant: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into().to_uppercase());
        self
    }

    /// Sets the variant. A variant only narrows a country, so it is ignored
    /// unless a country is set.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        if self.country.is_some() {
            self.variant = Some(variant.into());
        }
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// File name postfixes to try for this locale, most generic first.
    ///
    /// `fr_FR` yields `["", "_fr", "_fr_FR"]`.
    pub fn postfixes(&self) -> Vec<String> {
        let mut postfixes = vec![String::new()];
        let mut current = format!("_{}", self.language);
        postfixes.push(current.clone());

        if let Some(country) = &self.country {
            current = format!("{current}_{country}");
            postfixes.push(current.clone());
            if let Some(variant) = &self.variant {
                postfixes.push(format!("{current}_{variant}"));
            }
        }
        postfixes
    }
}

/// Postfixes for an optional locale; without one only the base file is read.
pub(crate) fn postfixes(locale: Option<&Locale>) -> Vec<String> {
    locale.map_or_else(|| vec![String::new()], Locale::postfixes)
}

impl FromStr for Locale {
    type Err = DefinitionsError;

    /// Parses `fr`, `fr_FR`, `fr-FR` or `fr_FR_variant`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DefinitionsError::InvalidLocale(s.to_string());
        let mut parts = s.trim().splitn(3, ['_', '-']);

        let language = parts.next().filter(|l| is_alpha(l)).ok_or_else(invalid)?;
        let mut locale = Locale::new(language);

        if let Some(country) = parts.next() {
            if !is_alpha(country) {
                return Err(invalid());
            }
            locale = locale.with_country(country);
        }
        if let Some(variant) = parts.next() {
            if variant.is_empty() {
                return Err(invalid());
            }
            locale = locale.with_variant(variant);
        }
        Ok(locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(country) = &self.country {
            write!(f, "_{country}")?;
            if let Some(variant) = &self.variant {
                write!(f, "_{variant}")?;
            }
        }
        Ok(())
    }
}

fn is_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}
