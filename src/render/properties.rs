//! Renderer properties: `KEY=VALUE` files merged over per-renderer defaults

use crate::error::VisualiserError;
use anyhow::{Context, Result};
use image::Rgb;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;

/// One tunable renderer property
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub key: &'static str,
    pub doc: &'static str,
    pub default: &'static str,
}

/// String-valued renderer settings keyed by property name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a properties file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read properties file: {:?}", path))?;
        Ok(Self::parse(&text))
    }

    /// Parse `KEY=VALUE` (or `KEY: VALUE`) lines; `#`/`!` comments and blank lines are skipped
    pub fn parse(text: &str) -> Self {
        let mut props = Self::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            match line.split_once(['=', ':']) {
                Some((key, value)) => props.set(key.trim(), value.trim()),
                None => log::warn!("Ignoring malformed property line: {}", line),
            }
        }
        props
    }

    /// Defaults from `specs` overlaid with the known keys of `overrides`
    ///
    /// Unknown keys are logged and dropped.
    pub fn with_defaults(specs: &[PropertySpec], overrides: &Properties) -> Self {
        let mut merged = Self::new();
        for spec in specs {
            merged.set(spec.key, spec.default);
        }
        for (key, value) in overrides.iter() {
            if specs.iter().any(|s| s.key == key) {
                merged.set(key, value);
            } else {
                log::warn!("Omitting unknown property: {}", key);
            }
        }
        merged
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse `key` as `T`; a Java-style `f` suffix on floats is accepted
    pub fn parse_value<T: FromStr>(&self, key: &str) -> Result<T, VisualiserError> {
        let raw = self.get(key).unwrap_or_default();
        raw.parse::<T>()
            .or_else(|_| raw.trim_end_matches(['f', 'F']).parse())
            .map_err(|_| invalid(key, raw))
    }

    /// Parse `key` as `T` and reject values outside `range`
    pub fn parse_in_range<T>(&self, key: &str, range: RangeInclusive<T>) -> Result<T, VisualiserError>
    where
        T: FromStr + PartialOrd,
    {
        let value = self.parse_value(key)?;
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(invalid(key, self.get(key).unwrap_or_default()))
        }
    }

    /// Parse `key` as an `r,g,b` colour
    pub fn parse_rgb(&self, key: &str) -> Result<Rgb<u8>, VisualiserError> {
        let raw = self.get(key).unwrap_or_default();
        let channels: Vec<u8> = raw
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid(key, raw))?;

        match channels.as_slice() {
            &[r, g, b] => Ok(Rgb([r, g, b])),
            _ => Err(invalid(key, raw)),
        }
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// `KEY -> documentation` listing, one line per property
pub fn describe(specs: &[PropertySpec]) -> String {
    specs
        .iter()
        .map(|s| format!("{} -> {} (default: {})\n", s.key, s.doc, s.default))
        .collect()
}

fn invalid(key: &str, value: &str) -> VisualiserError {
    VisualiserError::InvalidProperty {
        key: key.to_string(),
        value: value.to_string(),
    }
}
