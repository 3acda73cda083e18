//! Tool command templates and placeholder substitution.
//!
//! Templates are immutable constants keyed by purpose. Substitution is a
//! single left-to-right pass: substituted values are never rescanned, and a
//! placeholder without a matching key is left verbatim, so callers must
//! supply full coverage.

/// Sub-command issued to the external tool, keyed by purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCommand {
    /// Alias reachability probe.
    Status,
    /// Source-to-destination data sync.
    SqlSync,
    /// Cache invalidation on an alias.
    CacheClear,
    /// Simulated cache invalidation used to validate the target at startup.
    CacheClearDryRun,
}

impl ToolCommand {
    /// Template string with `%token` placeholders.
    pub fn template(self) -> &'static str {
        match self {
            ToolCommand::Status => "@%alias st",
            ToolCommand::SqlSync => "-y sql-sync @%source @%destination",
            ToolCommand::CacheClear => "@%alias cc %target",
            ToolCommand::CacheClearDryRun => "-s @%alias cc %target",
        }
    }
}

/// Replace `%token` placeholders in `template` with their mapped values.
///
/// The longest matching token wins at each `%`, and unmapped placeholders
/// stay verbatim.
pub fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(idx) = rest.find('%') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        let hit = replacements
            .iter()
            .filter(|(token, _)| rest.starts_with(*token))
            .max_by_key(|(token, _)| token.len());
        match hit {
            Some((token, value)) => {
                out.push_str(value);
                rest = &rest[token.len()..];
            }
            None => {
                out.push('%');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
