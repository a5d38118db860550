use std::{fmt::Display, str::FromStr};

use smol_str::SmolStr;
use toml::Value;

use crate::diagnostics::Severity;

/// Configuration of the lint rules, usually read from an `enumck.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LintConfig {
    pub enum_switch: EnumSwitchConfig,
    pub diagnostics: Vec<ConfigDiagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumSwitchConfig {
    pub severity: Severity,
    pub integer_kinds: IntegerKinds,
    pub qualified_labels: QualifiedLabels,
    pub conversion_labels: ConversionLabels,
}

impl Default for EnumSwitchConfig {
    fn default() -> Self {
        Self {
            severity: Severity::Error,
            integer_kinds: IntegerKinds::Signed,
            qualified_labels: QualifiedLabels::Loose,
            conversion_labels: ConversionLabels::Ignore,
        }
    }
}

/// Underlying integer kinds that make a named type enum-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerKinds {
    /// Only the platform `int`.
    Int,
    /// `int` and the fixed-width signed integers.
    Signed,
    /// Every integer kind, unsigned ones included.
    Any,
}

/// How package-qualified case labels (`pkg.Name`) are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifiedLabels {
    /// Match on the selected member name alone.
    Loose,
    /// The qualifier must reference the package owning the enum type.
    Strict,
}

/// How case labels that are neither identifiers nor selectors are treated,
/// e.g. `Kind(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionLabels {
    /// Such labels cover nothing.
    Ignore,
    /// Labels of the enum type with a known constant value cover every
    /// constant sharing that value.
    Evaluate,
}

impl LintConfig {
    /// Parses a configuration file. Only malformed TOML is an error; unknown
    /// or invalid entries are recorded in `diagnostics` and fall back to the
    /// defaults.
    pub fn parse(content: &str) -> Result<Self, <Value as FromStr>::Err> {
        let mut diagnostics = Vec::new();
        let mut enum_switch = EnumSwitchConfig::default();

        let parsed: Value = content.parse()?;

        if let Some(value) = parsed.get("enum-switch") {
            match value.as_table() {
                Some(table) => {
                    for (key, value) in table {
                        match key.as_str() {
                            "severity" => {
                                if let Some(severity) =
                                    parse_choice(key, value, &mut diagnostics, |s| match s {
                                        "error" => Some(Severity::Error),
                                        "warning" => Some(Severity::Warning),
                                        "note" => Some(Severity::Note),
                                        _ => None,
                                    })
                                {
                                    enum_switch.severity = severity;
                                }
                            }
                            "integer-kinds" => {
                                if let Some(kinds) =
                                    parse_choice(key, value, &mut diagnostics, |s| match s {
                                        "int" => Some(IntegerKinds::Int),
                                        "signed" => Some(IntegerKinds::Signed),
                                        "any" => Some(IntegerKinds::Any),
                                        _ => None,
                                    })
                                {
                                    enum_switch.integer_kinds = kinds;
                                }
                            }
                            "qualified-labels" => {
                                if let Some(policy) =
                                    parse_choice(key, value, &mut diagnostics, |s| match s {
                                        "loose" => Some(QualifiedLabels::Loose),
                                        "strict" => Some(QualifiedLabels::Strict),
                                        _ => None,
                                    })
                                {
                                    enum_switch.qualified_labels = policy;
                                }
                            }
                            "conversion-labels" => {
                                if let Some(policy) =
                                    parse_choice(key, value, &mut diagnostics, |s| match s {
                                        "ignore" => Some(ConversionLabels::Ignore),
                                        "evaluate" => Some(ConversionLabels::Evaluate),
                                        _ => None,
                                    })
                                {
                                    enum_switch.conversion_labels = policy;
                                }
                            }
                            _ => diagnostics.push(ConfigDiagnostic::UnknownField(
                                format!("enum-switch.{key}").into(),
                            )),
                        }
                    }
                }
                None => diagnostics.push(ConfigDiagnostic::UnexpectedTomlData {
                    field: "enum-switch".into(),
                    found: value.type_str().to_lowercase().into(),
                    expected: Some("table".into()),
                }),
            }
        }

        Ok(Self {
            enum_switch,
            diagnostics,
        })
    }

    pub fn formatted_diagnostics(&self) -> Option<String> {
        if self.diagnostics.is_empty() {
            None
        } else {
            Some(
                self.diagnostics
                    .iter()
                    .map(|diag| format!("  {diag}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        }
    }
}

fn parse_choice<T>(
    key: &str,
    value: &Value,
    diagnostics: &mut Vec<ConfigDiagnostic>,
    choose: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let Some(text) = value.as_str() else {
        diagnostics.push(ConfigDiagnostic::UnexpectedTomlData {
            field: key.into(),
            found: value.type_str().to_lowercase().into(),
            expected: Some("string".into()),
        });
        return None;
    };

    let choice = choose(text);
    if choice.is_none() {
        diagnostics.push(ConfigDiagnostic::InvalidValue {
            field: key.into(),
            value: text.into(),
        });
    }
    choice
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigDiagnostic {
    UnknownField(SmolStr),
    InvalidValue {
        field: SmolStr,
        value: SmolStr,
    },
    UnexpectedTomlData {
        field: SmolStr,
        found: SmolStr,
        expected: Option<SmolStr>,
    },
}

impl Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(field) => write!(f, "Unknown field {field}"),
            Self::InvalidValue { field, value } => {
                write!(f, "Invalid value \"{value}\" for field {field}")
            }
            Self::UnexpectedTomlData {
                field,
                found,
                expected,
            } => {
                if let Some(expected) = expected {
                    write!(
                        f,
                        "Expected a {expected} in field {field}, but found a {found}"
                    )
                } else {
                    write!(f, "Unexpected field {field}")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = LintConfig::parse("").unwrap();
        assert_eq!(config, LintConfig::default());
    }

    #[test]
    fn parse_enum_switch_table() {
        let config = LintConfig::parse(
            r#"
[enum-switch]
severity = "warning"
integer-kinds = "any"
qualified-labels = "strict"
conversion-labels = "evaluate"
"#,
        )
        .unwrap();

        assert!(config.diagnostics.is_empty());
        assert_eq!(
            config.enum_switch,
            EnumSwitchConfig {
                severity: Severity::Warning,
                integer_kinds: IntegerKinds::Any,
                qualified_labels: QualifiedLabels::Strict,
                conversion_labels: ConversionLabels::Evaluate,
            }
        );
    }

    #[test]
    fn invalid_entries_fall_back_to_defaults() {
        let config = LintConfig::parse(
            r#"
[enum-switch]
severity = 3
integer-kinds = "unsigned"
colour = "blue"
"#,
        )
        .unwrap();

        assert_eq!(config.enum_switch, EnumSwitchConfig::default());
        assert_eq!(
            config.diagnostics,
            vec![
                ConfigDiagnostic::UnknownField("enum-switch.colour".into()),
                ConfigDiagnostic::InvalidValue {
                    field: "integer-kinds".into(),
                    value: "unsigned".into(),
                },
                ConfigDiagnostic::UnexpectedTomlData {
                    field: "severity".into(),
                    found: "integer".into(),
                    expected: Some("string".into()),
                },
            ]
        );
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(LintConfig::parse("[enum-switch").is_err());
    }
}
